//! 日期时间格式化

use chrono::{Datelike, Local, NaiveDate, NaiveTime};
use tracing::warn;

/// "14:00:00" -> "14:00"，无法解析时原样返回
pub fn format_time(time: &str) -> String {
    let parsed = NaiveTime::parse_from_str(time, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M"));
    match parsed {
        Ok(t) => t.format("%H:%M").to_string(),
        Err(e) => {
            warn!(input = %time, error = %e, "시간 파싱 실패");
            time.to_string()
        }
    }
}

/// "2024-01-01"
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// "2024년 1월 1일"
pub fn format_date_korean(date: NaiveDate) -> String {
    format!("{}년 {}월 {}일", date.year(), date.month(), date.day())
}

/// 解析 "YYYY-MM"，返回该月第一天和最后一天
///
/// 解析失败时退回到当前月份。
pub fn parse_month(month: Option<&str>) -> (NaiveDate, NaiveDate) {
    let first = month
        .and_then(|m| {
            let (year, month) = m.split_once('-')?;
            NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)
        })
        .unwrap_or_else(|| {
            if let Some(m) = month {
                warn!(input = %m, "월 파싱 실패, 이번 달로 대체");
            }
            let today = Local::now().date_naive();
            today.with_day(1).unwrap_or(today)
        });
    (first, last_day_of_month(first))
}

fn last_day_of_month(first: NaiveDate) -> NaiveDate {
    let (year, month) = if first.month() == 12 {
        (first.year() + 1, 1)
    } else {
        (first.year(), first.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|next| next.pred_opt())
        .unwrap_or(first)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time() {
        assert_eq!(format_time("14:00:00"), "14:00");
        assert_eq!(format_time("09:30"), "09:30");
        assert_eq!(format_time("오후 2시"), "오후 2시");
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(format_date(date), "2024-01-01");
        assert_eq!(format_date_korean(date), "2024년 1월 1일");
    }

    #[test]
    fn test_parse_month() {
        let (first, last) = parse_month(Some("2024-02"));
        assert_eq!(first.to_string(), "2024-02-01");
        assert_eq!(last.to_string(), "2024-02-29");

        let (first, last) = parse_month(Some("2023-12"));
        assert_eq!(first.to_string(), "2023-12-01");
        assert_eq!(last.to_string(), "2023-12-31");
    }

    #[test]
    fn test_parse_month_fallback() {
        let (first, last) = parse_month(Some("garbage"));
        assert_eq!(first.day(), 1);
        assert_eq!(first.month(), last.month());
        assert_eq!(parse_month(None).0, first);
    }
}
