//! 출석 기록 명령

use anyhow::Result;
use chrono::Local;

use academy_client::AttendanceFilter;
use academy_core::dates::format_date;
use academy_core::{Attendance, AttendanceInput, RouteRequirement};

use super::{done, Context};
use crate::cli::AttendanceCommand;

fn print_attendance(record: &Attendance) {
    println!(
        "{:>4}  {} {:<8} {:<4} {}  숙제 {}%/{}%  {}",
        record.id,
        format_date(record.date),
        record.student_name,
        record.class_type.label(),
        if record.is_late { "지각" } else { "출석" },
        record.homework_completion,
        record.homework_accuracy,
        record.content
    );
}

pub async fn run(ctx: &Context, command: AttendanceCommand) -> Result<()> {
    match command {
        AttendanceCommand::List {
            student_id,
            class_id,
            date,
        } => {
            ctx.require(RouteRequirement::Authenticated)?;
            let filter = AttendanceFilter {
                student_id,
                class_id,
                date,
            };
            for record in ctx.client.attendances().list(&filter).await? {
                print_attendance(&record);
            }
        }
        AttendanceCommand::Add {
            student_id,
            date,
            class_type,
            content,
            late,
            completion,
            accuracy,
        } => {
            let input = AttendanceInput {
                student: student_id,
                class_info: None,
                date: date.unwrap_or_else(|| Local::now().date_naive()),
                class_type,
                content,
                is_late: late,
                homework_completion: completion,
                homework_accuracy: accuracy,
            };
            input.validate()?;
            ctx.require_student_write(student_id).await?;
            let record = ctx.client.attendances().create(&input).await?;
            println!("출석 기록이 추가되었습니다.");
            print_attendance(&record);
        }
        AttendanceCommand::Edit {
            id,
            date,
            class_type,
            content,
            late,
            completion,
            accuracy,
        } => {
            let record = ctx.client.attendances().get(id).await?;
            ctx.require_student_write(record.student).await?;
            let mut input = AttendanceInput::from(&record);
            if let Some(date) = date {
                input.date = date;
            }
            if let Some(class_type) = class_type {
                input.class_type = class_type;
            }
            if let Some(content) = content {
                input.content = content;
            }
            if let Some(late) = late {
                input.is_late = late;
            }
            if let Some(completion) = completion {
                input.homework_completion = completion;
            }
            if let Some(accuracy) = accuracy {
                input.homework_accuracy = accuracy;
            }
            input.validate()?;
            let record = ctx.client.attendances().update(id, &input).await?;
            println!("출석 기록이 수정되었습니다.");
            print_attendance(&record);
        }
        AttendanceCommand::Delete { id } => {
            let record = ctx.client.attendances().get(id).await?;
            ctx.require_student_write(record.student).await?;
            let response = ctx.client.attendances().delete(id).await?;
            println!("{}", done(&response.message, "출석 기록이 삭제되었습니다."));
        }
    }
    Ok(())
}
