//! 家长通知文本

use crate::dates::format_date_korean;
use crate::types::{NotificationData, RelatedExam};

/// 每场考试一行：名称、得分和班级平均
pub fn format_exam_info(related_exams: &[RelatedExam]) -> String {
    if related_exams.is_empty() {
        return "관련 시험 기록이 없습니다.".to_string();
    }
    related_exams
        .iter()
        .map(|exam| {
            let average = exam.class_average.unwrap_or(0.0).trunc() as u32;
            format!(
                "{}: {}/{}점 (반평균: {}/{}점)",
                exam.name, exam.score, exam.max_score, average, exam.max_score
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

impl NotificationData {
    /// 发送前预览
    pub fn preview(&self) -> String {
        let late = if self.is_late { "지각" } else { "정상 출석" };
        let mut lines = vec![
            format!("[{}] {} 학생", format_date_korean(self.attendance_date), self.student_name),
            format!("수업: {} / {}", self.class_type, late),
        ];
        if !self.content.is_empty() {
            lines.push(format!("수업 내용: {}", self.content));
        }
        lines.push(format!(
            "숙제 이행도: {}% / 숙제 정답률: {}%",
            self.homework_completion, self.homework_accuracy
        ));
        lines.push(format_exam_info(&self.related_exams));
        if !self.sender_name.is_empty() {
            lines.push(format!("- {} {}", self.sender_role, self.sender_name));
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn exam(name: &str, score: u32, average: Option<f64>) -> RelatedExam {
        RelatedExam {
            name: name.to_string(),
            score,
            max_score: 100,
            exam_date: None,
            class_average: average,
            class_max_score: None,
            class_min_score: None,
            class_count: None,
        }
    }

    #[test]
    fn test_format_exam_info_empty() {
        assert_eq!(format_exam_info(&[]), "관련 시험 기록이 없습니다.");
    }

    #[test]
    fn test_format_exam_info_lines() {
        let text = format_exam_info(&[exam("단원평가", 92, Some(78.6)), exam("퀴즈", 40, None)]);
        assert_eq!(
            text,
            "단원평가: 92/100점 (반평균: 78/100점)\n퀴즈: 40/100점 (반평균: 0/100점)"
        );
    }

    #[test]
    fn test_preview() {
        let data = NotificationData {
            student_name: "김철수".to_string(),
            parent_phone: "010-0000-0000".to_string(),
            attendance_date: NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
            class_type: "정규".to_string(),
            content: "산화 환원".to_string(),
            is_late: true,
            homework_completion: 80,
            homework_accuracy: 90,
            related_exams: vec![],
            sender_role: "선생님".to_string(),
            sender_name: "박선생".to_string(),
        };
        let preview = data.preview();
        assert!(preview.starts_with("[2024년 5월 2일] 김철수 학생"));
        assert!(preview.contains("지각"));
        assert!(preview.contains("숙제 이행도: 80%"));
        assert!(preview.ends_with("- 선생님 박선생"));
    }
}
