//! 대시보드 명령

use anyhow::Result;

use academy_client::{AttendanceFilter, ExamFilter};
use academy_core::access::can_view_subject;
use academy_core::dates::{format_date, format_date_korean, parse_month};
use academy_core::stats::{daily_attendance, grade_stats_by_keyword};
use academy_core::{DailyAttendance, RouteRequirement};

use super::Context;

pub async fn run(
    ctx: &Context,
    class_id: Option<u64>,
    month: Option<&str>,
    keywords: &[String],
) -> Result<()> {
    let user = ctx.require(RouteRequirement::Authenticated)?;
    let (first, last) = parse_month(month);
    let month = first.format("%Y-%m").to_string();
    println!(
        "기간: {} ~ {}",
        format_date_korean(first),
        format_date_korean(last)
    );

    let stats = ctx.client.dashboard().stats(class_id, Some(&month)).await?;

    println!("\n[반별 현황]");
    for class in stats
        .class_stats
        .iter()
        .filter(|class| can_view_subject(user, class.subject))
    {
        println!(
            "{:>4}  {:<16} {:<4} 학생 {}명",
            class.id,
            class.name,
            class.subject.label(),
            class.student_count
        );
    }

    let Some(class_id) = class_id else {
        return Ok(());
    };

    let mut attendance = stats.attendance_stats;
    if attendance.is_empty() {
        // 后端未汇总时用出勤记录在本地计算
        let class = ctx.client.classes().get(class_id).await?;
        let filter = AttendanceFilter {
            class_id: Some(class_id),
            ..AttendanceFilter::default()
        };
        let records: Vec<_> = ctx
            .client
            .attendances()
            .list(&filter)
            .await?
            .into_iter()
            .filter(|record| record.date >= first && record.date <= last)
            .collect();
        attendance = daily_attendance(&records, class.student_count);
    }
    print_attendance(&attendance);

    println!("\n[성적 현황]");
    for grade in &stats.grade_stats {
        println!(
            "{:<16} 평균 {}점 (최고 {} / 최저 {}, {}명)",
            grade.exam_name, grade.average, grade.highest, grade.lowest, grade.count
        );
    }

    if !keywords.is_empty() {
        let filter = ExamFilter {
            class_id: Some(class_id),
            ..ExamFilter::default()
        };
        let exams = ctx.client.exams().list(&filter).await?;
        let keywords: Vec<&str> = keywords.iter().map(String::as_str).collect();
        println!("\n[키워드별 성적]");
        for grade in grade_stats_by_keyword(&exams, &keywords) {
            println!(
                "{:<10} 평균 {}점 (최고 {} / 최저 {}, {}건)",
                grade.keyword,
                grade.summary.average,
                grade.summary.highest,
                grade.summary.lowest,
                grade.summary.count
            );
        }
    }
    Ok(())
}

fn print_attendance(days: &[DailyAttendance]) {
    println!("\n[출석 현황]");
    for day in days {
        println!(
            "{}  출석 {:>3}  결석 {:>3}  지각 {:>3}",
            format_date(day.date),
            day.present,
            day.absent,
            day.late
        );
    }
}
