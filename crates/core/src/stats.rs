//! 统计计算
//!
//! 从已获取的出勤和考试记录推导平均分、出勤率等展示数据。

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::types::{Attendance, AttendanceSummary, DailyAttendance, Exam, ExamAverage};

/// 一组分数的汇总
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScoreSummary {
    /// 平均分（四舍五入）
    pub average: u32,
    pub highest: u32,
    pub lowest: u32,
    pub count: u32,
}

impl ScoreSummary {
    /// 空列表时全部为 0
    pub fn from_scores(scores: &[u32]) -> Self {
        let (Some(&highest), Some(&lowest)) = (scores.iter().max(), scores.iter().min()) else {
            return Self::default();
        };
        let total: u64 = scores.iter().map(|&s| u64::from(s)).sum();
        let average = (total as f64 / scores.len() as f64).round() as u32;
        Self {
            average,
            highest,
            lowest,
            count: scores.len() as u32,
        }
    }
}

/// 按关键字分组的成绩统计
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordGrade {
    pub keyword: String,
    #[serde(flatten)]
    pub summary: ScoreSummary,
}

/// 对名称包含关键字的考试分别汇总
pub fn grade_stats_by_keyword(exams: &[Exam], keywords: &[&str]) -> Vec<KeywordGrade> {
    keywords
        .iter()
        .map(|keyword| {
            let scores: Vec<u32> = exams
                .iter()
                .filter(|exam| exam.name.contains(keyword))
                .map(|exam| exam.score)
                .collect();
            KeywordGrade {
                keyword: keyword.to_string(),
                summary: ScoreSummary::from_scores(&scores),
            }
        })
        .collect()
}

/// 按考试名称聚合，结果按名称排序
pub fn exam_averages(exams: &[Exam]) -> Vec<ExamAverage> {
    let mut grouped: BTreeMap<&str, Vec<u32>> = BTreeMap::new();
    for exam in exams {
        grouped.entry(exam.name.as_str()).or_default().push(exam.score);
    }

    grouped
        .into_iter()
        .map(|(name, scores)| {
            let total: u64 = scores.iter().map(|&s| u64::from(s)).sum();
            ExamAverage {
                name: name.to_string(),
                average_score: total as f64 / scores.len() as f64,
                max_score: scores.iter().copied().max().unwrap_or(0),
                min_score: scores.iter().copied().min().unwrap_or(0),
                count: scores.len() as u32,
            }
        })
        .collect()
}

/// 按日期统计出勤，缺勤人数 = 班级人数 - 出勤 - 迟到
pub fn daily_attendance(records: &[Attendance], total_students: u32) -> Vec<DailyAttendance> {
    let mut by_date: BTreeMap<NaiveDate, (u32, u32)> = BTreeMap::new();
    for record in records {
        let entry = by_date.entry(record.date).or_default();
        if record.is_late {
            entry.1 += 1;
        } else {
            entry.0 += 1;
        }
    }

    by_date
        .into_iter()
        .map(|(date, (present, late))| DailyAttendance {
            date,
            present,
            late,
            absent: total_students.saturating_sub(present + late),
        })
        .collect()
}

impl AttendanceSummary {
    /// 从出勤记录计算汇总，迟到不计入正常出勤
    pub fn from_records(records: &[Attendance]) -> Self {
        let late_count = records.iter().filter(|r| r.is_late).count() as u32;
        let total_classes = records.len() as u32;
        Self {
            total_classes,
            attended_classes: total_classes - late_count,
            late_count,
        }
    }
}

/// 正常出勤率（百分比），没有记录时为 0
pub fn attendance_rate(summary: &AttendanceSummary) -> f64 {
    if summary.total_classes == 0 {
        return 0.0;
    }
    f64::from(summary.attended_classes) / f64::from(summary.total_classes) * 100.0
}

/// 作业平均完成度和正确率
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct HomeworkAverages {
    pub completion: f64,
    pub accuracy: f64,
}

pub fn homework_averages(records: &[Attendance]) -> HomeworkAverages {
    if records.is_empty() {
        return HomeworkAverages::default();
    }
    let n = records.len() as f64;
    let completion: f64 = records
        .iter()
        .map(|r| f64::from(r.homework_completion))
        .sum();
    let accuracy: f64 = records.iter().map(|r| f64::from(r.homework_accuracy)).sum();
    HomeworkAverages {
        completion: completion / n,
        accuracy: accuracy / n,
    }
}

/// 得分率（百分比），满分为 0 时返回 0
pub fn score_percentage(score: u32, max_score: u32) -> f64 {
    if max_score == 0 {
        return 0.0;
    }
    f64::from(score) / f64::from(max_score) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ClassType;
    use proptest::prelude::*;

    fn attendance(id: u64, date: &str, is_late: bool, completion: u32) -> Attendance {
        Attendance {
            id,
            student: id,
            student_name: String::new(),
            class_info_name: String::new(),
            date: date.parse().unwrap(),
            class_type: ClassType::Regular,
            class_type_display: String::new(),
            content: String::new(),
            is_late,
            homework_completion: completion,
            homework_accuracy: 50,
        }
    }

    fn exam(name: &str, score: u32) -> Exam {
        Exam {
            id: 0,
            attendance: 0,
            student_name: String::new(),
            exam_date: None,
            name: name.to_string(),
            score,
            max_score: 100,
        }
    }

    #[test]
    fn test_score_summary_empty() {
        assert_eq!(ScoreSummary::from_scores(&[]), ScoreSummary::default());
    }

    #[test]
    fn test_score_summary_rounds() {
        let summary = ScoreSummary::from_scores(&[80, 85]);
        assert_eq!(summary.average, 83); // 82.5 -> 83
        assert_eq!(summary.highest, 85);
        assert_eq!(summary.lowest, 80);
        assert_eq!(summary.count, 2);
    }

    #[test]
    fn test_grade_stats_by_keyword() {
        let exams = vec![
            exam("화학 단원평가", 90),
            exam("화학 모의고사", 70),
            exam("생명 퀴즈", 60),
        ];
        let stats = grade_stats_by_keyword(&exams, &["화학", "지학"]);
        assert_eq!(stats[0].summary.average, 80);
        assert_eq!(stats[0].summary.count, 2);
        assert_eq!(stats[1].summary, ScoreSummary::default());
    }

    #[test]
    fn test_exam_averages_sorted() {
        let exams = vec![exam("B", 80), exam("A", 70), exam("B", 91)];
        let averages = exam_averages(&exams);
        assert_eq!(averages[0].name, "A");
        assert_eq!(averages[1].name, "B");
        assert!((averages[1].average_score - 85.5).abs() < f64::EPSILON);
        assert_eq!(averages[1].max_score, 91);
        assert_eq!(averages[1].min_score, 80);
        assert_eq!(averages[1].count, 2);
    }

    #[test]
    fn test_daily_attendance() {
        let records = vec![
            attendance(1, "2024-03-05", false, 100),
            attendance(2, "2024-03-04", true, 100),
            attendance(3, "2024-03-05", true, 100),
        ];
        let daily = daily_attendance(&records, 5);
        assert_eq!(daily.len(), 2);
        assert_eq!(daily[0].date.to_string(), "2024-03-04");
        assert_eq!((daily[0].present, daily[0].late, daily[0].absent), (0, 1, 4));
        assert_eq!((daily[1].present, daily[1].late, daily[1].absent), (1, 1, 3));

        // 记录多于班级人数时不下溢
        let daily = daily_attendance(&records, 1);
        assert_eq!(daily[1].absent, 0);
    }

    #[test]
    fn test_attendance_summary_and_rate() {
        let records = vec![
            attendance(1, "2024-03-04", false, 100),
            attendance(2, "2024-03-05", true, 80),
            attendance(3, "2024-03-06", false, 60),
            attendance(4, "2024-03-07", false, 40),
        ];
        let summary = AttendanceSummary::from_records(&records);
        assert_eq!(summary.total_classes, 4);
        assert_eq!(summary.attended_classes, 3);
        assert_eq!(summary.late_count, 1);
        assert!((attendance_rate(&summary) - 75.0).abs() < f64::EPSILON);
        assert_eq!(attendance_rate(&AttendanceSummary::default()), 0.0);

        let homework = homework_averages(&records);
        assert!((homework.completion - 70.0).abs() < f64::EPSILON);
        assert!((homework.accuracy - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_score_percentage() {
        assert!((score_percentage(45, 50) - 90.0).abs() < f64::EPSILON);
        assert_eq!(score_percentage(10, 0), 0.0);
    }

    proptest! {
        #[test]
        fn prop_summary_bounds(scores in proptest::collection::vec(0u32..=100, 1..50)) {
            let summary = ScoreSummary::from_scores(&scores);
            prop_assert!(summary.lowest <= summary.average);
            prop_assert!(summary.average <= summary.highest);
            prop_assert_eq!(summary.count as usize, scores.len());
        }
    }
}
