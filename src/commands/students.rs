//! 학생 관리 명령

use anyhow::Result;

use academy_core::dates::format_date;
use academy_core::stats::{attendance_rate, homework_averages, score_percentage};
use academy_core::{AttendanceSummary, RouteRequirement, ScoreSummary, Student, StudentInput};

use super::{done, or_dash, Context};
use crate::cli::StudentsCommand;

fn print_student(student: &Student) {
    println!(
        "{:>4}  {:<8} {:<16} 학부모 {}  학생 {}  출석률 {:.0}%  평균 {}점",
        student.id,
        student.name,
        student.class_info_name,
        student.parent_phone,
        or_dash(student.student_phone.as_deref()),
        attendance_rate(&student.attendance_stats),
        student.exam_stats.average_score
    );
}

pub async fn run(ctx: &Context, command: StudentsCommand) -> Result<()> {
    match command {
        StudentsCommand::List { class_id } => {
            ctx.require(RouteRequirement::Authenticated)?;
            let students = ctx.client.students().list(class_id).await?;
            for student in &students {
                print_student(student);
            }
            println!("총 {}명", students.len());
        }
        StudentsCommand::Show { id } => {
            ctx.require(RouteRequirement::Authenticated)?;
            let detail = ctx.client.students().get(id).await?;
            print_student(&detail.student);

            let attendance = AttendanceSummary::from_records(&detail.attendance_records);
            let homework = homework_averages(&detail.attendance_records);
            println!(
                "출석 {}회 (지각 {}회), 출석률 {:.1}%, 숙제 이행도 {:.1}% / 정답률 {:.1}%",
                attendance.total_classes,
                attendance.late_count,
                attendance_rate(&attendance),
                homework.completion,
                homework.accuracy
            );
            for record in &detail.attendance_records {
                println!(
                    "  {} {:<4} {}{}",
                    format_date(record.date),
                    record.class_type.label(),
                    record.content,
                    if record.is_late { " (지각)" } else { "" }
                );
            }

            let scores: Vec<u32> = detail.exam_records.iter().map(|e| e.score).collect();
            let summary = ScoreSummary::from_scores(&scores);
            println!(
                "시험 {}회, 평균 {}점, 최고 {}점, 최저 {}점",
                summary.count, summary.average, summary.highest, summary.lowest
            );
            for exam in &detail.exam_records {
                println!(
                    "  {} {}: {}/{}점 ({:.0}%)",
                    exam.exam_date.map(format_date).unwrap_or_default(),
                    exam.name,
                    exam.score,
                    exam.max_score,
                    score_percentage(exam.score, exam.max_score)
                );
            }
        }
        StudentsCommand::Create {
            name,
            class_id,
            parent_phone,
            student_phone,
        } => {
            let input = StudentInput {
                name,
                class_info: class_id,
                parent_phone,
                student_phone,
            };
            input.validate()?;
            let class = ctx.client.classes().get(class_id).await?;
            ctx.require_roster_write(class.subject)?;
            let student = ctx.client.students().create(&input).await?;
            println!("학생이 등록되었습니다.");
            print_student(&student);
        }
        StudentsCommand::Edit {
            id,
            name,
            class_id,
            parent_phone,
            student_phone,
        } => {
            let detail = ctx.client.students().get(id).await?;
            let current = ctx.client.classes().get(detail.student.class_info).await?;
            ctx.require_roster_write(current.subject)?;
            let mut input = StudentInput::from(&detail.student);
            if let Some(class_id) = class_id.filter(|&c| c != input.class_info) {
                let target = ctx.client.classes().get(class_id).await?;
                ctx.require_roster_write(target.subject)?;
                input.class_info = class_id;
            }
            if let Some(name) = name {
                input.name = name;
            }
            if let Some(parent_phone) = parent_phone {
                input.parent_phone = parent_phone;
            }
            if let Some(student_phone) = student_phone {
                // 空字符串表示清除
                input.student_phone = Some(student_phone).filter(|p| !p.is_empty());
            }
            input.validate()?;
            let student = ctx.client.students().update(id, &input).await?;
            println!("학생 정보가 수정되었습니다.");
            print_student(&student);
        }
        StudentsCommand::Delete { id } => {
            ctx.require_student_write(id).await?;
            let response = ctx.client.students().delete(id).await?;
            println!("{}", done(&response.message, "학생이 삭제되었습니다."));
        }
    }
    Ok(())
}
