//! 반 관리 명령

use anyhow::Result;

use academy_core::access::{can_view_subject, visible_classes};
use academy_core::dates::format_time;
use academy_core::{AccessDenied, Class, ClassInput, RouteRequirement};

use super::{done, Context};
use crate::cli::ClassesCommand;

fn print_class(class: &Class) {
    println!(
        "{:>4}  {:<16} {:<4} {} {}  학생 {}명",
        class.id,
        class.name,
        class.subject.label(),
        class.day_of_week.label(),
        format_time(&class.start_time.to_string()),
        class.student_count
    );
}

pub async fn run(ctx: &Context, command: ClassesCommand) -> Result<()> {
    match command {
        ClassesCommand::List { subject } => {
            let user = ctx.require(RouteRequirement::Authenticated)?;
            let classes = ctx.client.classes().list(subject).await?;
            for class in visible_classes(user, &classes) {
                print_class(class);
            }
        }
        ClassesCommand::Show { id } => {
            let user = ctx.require(RouteRequirement::Authenticated)?;
            let class = ctx.client.classes().get(id).await?;
            if !can_view_subject(user, class.subject) {
                return Err(
                    AccessDenied::new(user.role, format!("{} 과목 조회", class.subject.label())).into(),
                );
            }
            print_class(&class);
            let students = ctx.client.students().list(Some(id)).await?;
            for student in &students {
                println!("      - {} ({})", student.name, student.parent_phone);
            }
        }
        ClassesCommand::Create {
            name,
            subject,
            day,
            time,
        } => {
            ctx.require_roster_write(subject)?;
            let input = ClassInput {
                name,
                subject,
                start_time: time,
                day_of_week: day,
            };
            input.validate()?;
            let class = ctx.client.classes().create(&input).await?;
            println!("반이 생성되었습니다.");
            print_class(&class);
        }
        ClassesCommand::Edit {
            id,
            name,
            subject,
            day,
            time,
        } => {
            let class = ctx.client.classes().get(id).await?;
            ctx.require_roster_write(class.subject)?;
            let mut input = ClassInput::from(&class);
            if let Some(subject) = subject {
                // 改科目时新科目也需要写权限
                ctx.require_roster_write(subject)?;
                input.subject = subject;
            }
            if let Some(name) = name {
                input.name = name;
            }
            if let Some(day) = day {
                input.day_of_week = day;
            }
            if let Some(time) = time {
                input.start_time = time;
            }
            input.validate()?;
            let class = ctx.client.classes().update(id, &input).await?;
            println!("반 정보가 수정되었습니다.");
            print_class(&class);
        }
        ClassesCommand::Delete { id } => {
            let class = ctx.client.classes().get(id).await?;
            ctx.require_roster_write(class.subject)?;
            let response = ctx.client.classes().delete(id).await?;
            println!("{}", done(&response.message, "반이 삭제되었습니다."));
        }
    }
    Ok(())
}
