//! 학부모 알림 명령

use anyhow::Result;
use chrono::Local;

use academy_core::{NotificationResponse, RouteRequirement};

use super::{done, Context};
use crate::cli::NotifyCommand;

fn print_response(response: &NotificationResponse) {
    println!("{}", done(&response.message, "알림이 전송되었습니다."));
    if let (Some(total), Some(success)) = (response.total_count, response.success_count) {
        println!("전송 {}건 중 {}건 성공", total, success);
    }
    if let Some(data) = &response.notification_data {
        println!("\n{}", data.preview());
    }
}

pub async fn run(ctx: &Context, command: NotifyCommand) -> Result<()> {
    ctx.require(RouteRequirement::Authenticated)?;
    let response = match command {
        NotifyCommand::Single {
            student_id,
            attendance_id,
        } => {
            ctx.client
                .notifications()
                .send_single(student_id, attendance_id)
                .await?
        }
        NotifyCommand::Bulk { student_ids, date } => {
            let date = date.unwrap_or_else(|| Local::now().date_naive());
            ctx.client
                .notifications()
                .send_bulk(student_ids, date)
                .await?
        }
    };
    print_response(&response);
    Ok(())
}
