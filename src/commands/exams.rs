//! 시험 기록 명령

use anyhow::Result;

use academy_client::ExamFilter;
use academy_core::dates::format_date;
use academy_core::stats::{exam_averages, score_percentage};
use academy_core::{Exam, ExamAverage, ExamInput, RouteRequirement};

use super::{done, Context};
use crate::cli::ExamsCommand;

fn print_exam(exam: &Exam) {
    println!(
        "{:>4}  {} {:<8} {:<16} {}/{}점 ({:.0}%)",
        exam.id,
        exam.exam_date.map(format_date).unwrap_or_default(),
        exam.student_name,
        exam.name,
        exam.score,
        exam.max_score,
        score_percentage(exam.score, exam.max_score)
    );
}

fn print_average(average: &ExamAverage) {
    println!(
        "{:<16} 평균 {:.1}점 (최고 {} / 최저 {}, {}명)",
        average.name, average.average_score, average.max_score, average.min_score, average.count
    );
}

pub async fn run(ctx: &Context, command: ExamsCommand) -> Result<()> {
    match command {
        ExamsCommand::List {
            student_id,
            class_id,
        } => {
            ctx.require(RouteRequirement::Authenticated)?;
            let filter = ExamFilter {
                student_id,
                class_id,
            };
            let exams = ctx.client.exams().list(&filter).await?;
            for exam in &exams {
                print_exam(exam);
            }
            if !exams.is_empty() {
                println!();
                for average in exam_averages(&exams) {
                    print_average(&average);
                }
            }
        }
        ExamsCommand::Add {
            attendance_id,
            name,
            score,
            max_score,
        } => {
            let input = ExamInput {
                attendance: attendance_id,
                name,
                score,
                max_score,
            };
            input.validate()?;
            let record = ctx.client.attendances().get(attendance_id).await?;
            ctx.require_student_write(record.student).await?;
            let exam = ctx.client.exams().create(&input).await?;
            println!("시험 기록이 추가되었습니다.");
            print_exam(&exam);
        }
        ExamsCommand::Edit {
            id,
            name,
            score,
            max_score,
        } => {
            let exam = ctx.client.exams().get(id).await?;
            let record = ctx.client.attendances().get(exam.attendance).await?;
            ctx.require_student_write(record.student).await?;
            let mut input = ExamInput::from(&exam);
            if let Some(name) = name {
                input.name = name;
            }
            if let Some(score) = score {
                input.score = score;
            }
            if let Some(max_score) = max_score {
                input.max_score = max_score;
            }
            input.validate()?;
            let exam = ctx.client.exams().update(id, &input).await?;
            println!("시험 기록이 수정되었습니다.");
            print_exam(&exam);
        }
        ExamsCommand::Delete { id } => {
            let exam = ctx.client.exams().get(id).await?;
            let record = ctx.client.attendances().get(exam.attendance).await?;
            ctx.require_student_write(record.student).await?;
            let response = ctx.client.exams().delete(id).await?;
            println!("{}", done(&response.message, "시험 기록이 삭제되었습니다."));
        }
        ExamsCommand::Averages { class_id } => {
            ctx.require(RouteRequirement::Authenticated)?;
            for average in ctx.client.exams().averages(class_id).await? {
                print_average(&average);
            }
        }
    }
    Ok(())
}
