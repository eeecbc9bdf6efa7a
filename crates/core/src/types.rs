//! 类型定义
//!
//! 本模块定义与后端 REST API 对应的数据类型，包括：
//! - 用户、角色和科目
//! - 班级、学生
//! - 出勤和考试记录
//! - 仪表盘统计
//! - 家长通知

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

// ============================================================================
// 枚举
// ============================================================================

/// 用户角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// 管理员
    Admin,
    /// 老师
    Teacher,
    /// 助教
    Assistant,
}

impl Role {
    /// 显示名称
    pub fn label(&self) -> &'static str {
        match self {
            Self::Admin => "관리자",
            Self::Teacher => "선생님",
            Self::Assistant => "조교",
        }
    }

    /// 线上格式（与后端一致）
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Teacher => "TEACHER",
            Self::Assistant => "ASSISTANT",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 科目
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Subject {
    Chemistry,
    Biology,
    EarthScience,
}

impl Subject {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Chemistry => "화학",
            Self::Biology => "생명",
            Self::EarthScience => "지학",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Chemistry => "CHEMISTRY",
            Self::Biology => "BIOLOGY",
            Self::EarthScience => "EARTH_SCIENCE",
        }
    }
}

impl std::fmt::Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 上课星期
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Monday => "월요일",
            Self::Tuesday => "화요일",
            Self::Wednesday => "수요일",
            Self::Thursday => "목요일",
            Self::Friday => "금요일",
            Self::Saturday => "토요일",
            Self::Sunday => "일요일",
        }
    }
}

/// 课程类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClassType {
    /// 正课
    Regular,
    /// 替代课
    Makeup,
    /// 补课
    Extra,
    /// 加课
    Additional,
}

impl ClassType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Regular => "정규",
            Self::Makeup => "대체",
            Self::Extra => "보강",
            Self::Additional => "추가",
        }
    }
}

impl Default for ClassType {
    fn default() -> Self {
        Self::Regular
    }
}

/// 后端对未设置的选项字段返回空字符串
fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    match value {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) if s.is_empty() => Ok(None),
        Some(other) => T::deserialize(other)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

// ============================================================================
// 用户
// ============================================================================

/// 用户信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub name: String,
    pub role: Role,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub subject: Option<Subject>,
    #[serde(default)]
    pub date_joined: Option<DateTime<Utc>>,
}

/// 新建用户表单
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
    pub name: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<Subject>,
}

/// 修改用户表单
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<Subject>,
    /// 由管理员或老师重置他人密码
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_password: Option<String>,
}

/// 修改本人资料
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<Subject>,
}

/// 修改本人密码
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PasswordChange {
    pub old_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

/// 登录响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub message: String,
    pub user: User,
}

/// 只带提示信息的响应（登出、删除等）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

// ============================================================================
// 班级和学生
// ============================================================================

/// 班级
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Class {
    pub id: u64,
    pub name: String,
    pub subject: Subject,
    pub start_time: NaiveTime,
    pub day_of_week: DayOfWeek,
    #[serde(default)]
    pub student_count: u32,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// 新建或修改班级
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassInput {
    pub name: String,
    pub subject: Subject,
    pub start_time: NaiveTime,
    pub day_of_week: DayOfWeek,
}

/// 学生出勤汇总（后端计算）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceSummary {
    pub total_classes: u32,
    pub attended_classes: u32,
    pub late_count: u32,
}

/// 学生成绩汇总（后端计算）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamSummary {
    pub average_score: u32,
    pub highest_score: u32,
    pub lowest_score: u32,
}

/// 学生
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: u64,
    pub name: String,
    pub class_info: u64,
    #[serde(default)]
    pub class_info_name: String,
    pub parent_phone: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub student_phone: Option<String>,
    #[serde(default)]
    pub attendance_stats: AttendanceSummary,
    #[serde(default)]
    pub exam_stats: ExamSummary,
}

/// 学生详情（含出勤和考试记录）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentDetail {
    #[serde(flatten)]
    pub student: Student,
    #[serde(default)]
    pub attendance_records: Vec<Attendance>,
    #[serde(default)]
    pub exam_records: Vec<Exam>,
}

/// 新建或修改学生
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentInput {
    pub name: String,
    pub class_info: u64,
    pub parent_phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_phone: Option<String>,
}

// ============================================================================
// 出勤和考试
// ============================================================================

/// 出勤记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attendance {
    pub id: u64,
    pub student: u64,
    #[serde(default)]
    pub student_name: String,
    #[serde(default)]
    pub class_info_name: String,
    pub date: NaiveDate,
    pub class_type: ClassType,
    #[serde(default)]
    pub class_type_display: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub is_late: bool,
    /// 作业完成度（百分比）
    pub homework_completion: u32,
    /// 作业正确率（百分比）
    pub homework_accuracy: u32,
}

/// 新建或修改出勤记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceInput {
    pub student: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_info: Option<u64>,
    pub date: NaiveDate,
    pub class_type: ClassType,
    pub content: String,
    pub is_late: bool,
    pub homework_completion: u32,
    pub homework_accuracy: u32,
}

fn default_max_score() -> u32 {
    100
}

/// 考试记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exam {
    pub id: u64,
    pub attendance: u64,
    #[serde(default)]
    pub student_name: String,
    #[serde(default)]
    pub exam_date: Option<NaiveDate>,
    pub name: String,
    pub score: u32,
    #[serde(default = "default_max_score")]
    pub max_score: u32,
}

/// 新建或修改考试记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamInput {
    pub attendance: u64,
    pub name: String,
    pub score: u32,
    #[serde(default = "default_max_score")]
    pub max_score: u32,
}

/// 按考试名称聚合的平均分
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamAverage {
    pub name: String,
    #[serde(default)]
    pub average_score: f64,
    #[serde(default)]
    pub max_score: u32,
    #[serde(default)]
    pub min_score: u32,
    #[serde(default)]
    pub count: u32,
}

// 编辑表单以现有记录为初始值

impl From<&Class> for ClassInput {
    fn from(class: &Class) -> Self {
        Self {
            name: class.name.clone(),
            subject: class.subject,
            start_time: class.start_time,
            day_of_week: class.day_of_week,
        }
    }
}

impl From<&Student> for StudentInput {
    fn from(student: &Student) -> Self {
        Self {
            name: student.name.clone(),
            class_info: student.class_info,
            parent_phone: student.parent_phone.clone(),
            student_phone: student.student_phone.clone(),
        }
    }
}

impl From<&Attendance> for AttendanceInput {
    fn from(record: &Attendance) -> Self {
        Self {
            student: record.student,
            class_info: None,
            date: record.date,
            class_type: record.class_type,
            content: record.content.clone(),
            is_late: record.is_late,
            homework_completion: record.homework_completion,
            homework_accuracy: record.homework_accuracy,
        }
    }
}

impl From<&Exam> for ExamInput {
    fn from(exam: &Exam) -> Self {
        Self {
            attendance: exam.attendance,
            name: exam.name.clone(),
            score: exam.score,
            max_score: exam.max_score,
        }
    }
}

// ============================================================================
// 仪表盘
// ============================================================================

/// 班级统计行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassStat {
    pub id: u64,
    pub name: String,
    pub subject: Subject,
    #[serde(default)]
    pub student_count: u32,
}

/// 按日期的出勤统计
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyAttendance {
    pub date: NaiveDate,
    pub present: u32,
    pub absent: u32,
    pub late: u32,
}

/// 按考试名称的成绩统计
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeStat {
    pub exam_name: String,
    pub average: u32,
    pub highest: u32,
    pub lowest: u32,
    pub count: u32,
}

/// 仪表盘聚合数据
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(default)]
    pub class_stats: Vec<ClassStat>,
    #[serde(default)]
    pub attendance_stats: Vec<DailyAttendance>,
    #[serde(default)]
    pub grade_stats: Vec<GradeStat>,
}

// ============================================================================
// 家长通知
// ============================================================================

/// 通知发送请求
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NotificationRequest {
    /// 单个学生的某次出勤
    Single { student_id: u64, attendance_id: u64 },
    /// 多个学生的某一天
    Bulk {
        student_ids: Vec<u64>,
        target_date: NaiveDate,
    },
}

/// 通知中附带的考试信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelatedExam {
    pub name: String,
    pub score: u32,
    #[serde(default = "default_max_score")]
    pub max_score: u32,
    #[serde(default)]
    pub exam_date: Option<NaiveDate>,
    #[serde(default)]
    pub class_average: Option<f64>,
    #[serde(default)]
    pub class_max_score: Option<u32>,
    #[serde(default)]
    pub class_min_score: Option<u32>,
    #[serde(default)]
    pub class_count: Option<u32>,
}

/// 发送给家长的通知内容
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationData {
    pub student_name: String,
    pub parent_phone: String,
    pub attendance_date: NaiveDate,
    /// 课程类型显示名
    #[serde(default)]
    pub class_type: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub is_late: bool,
    #[serde(default)]
    pub homework_completion: u32,
    #[serde(default)]
    pub homework_accuracy: u32,
    #[serde(default)]
    pub related_exams: Vec<RelatedExam>,
    #[serde(default)]
    pub sender_role: String,
    #[serde(default)]
    pub sender_name: String,
}

/// 通知发送结果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotificationResponse {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub total_count: Option<u32>,
    #[serde(default)]
    pub success_count: Option<u32>,
    #[serde(default)]
    pub notification_data: Option<NotificationData>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_role_wire_format() {
        assert_eq!(serde_json::to_value(Role::Admin).unwrap(), json!("ADMIN"));
        let role: Role = serde_json::from_value(json!("ASSISTANT")).unwrap();
        assert_eq!(role, Role::Assistant);
        assert_eq!(
            serde_json::to_value(Subject::EarthScience).unwrap(),
            json!("EARTH_SCIENCE")
        );
    }

    #[test]
    fn test_user_empty_subject() {
        let user: User = serde_json::from_value(json!({
            "id": 1,
            "username": "admin",
            "name": "관리자",
            "role": "ADMIN",
            "subject": "",
            "date_joined": "2024-03-01T09:00:00Z"
        }))
        .unwrap();
        assert_eq!(user.subject, None);
        assert!(user.date_joined.is_some());
    }

    #[test]
    fn test_class_time_format() {
        let class: Class = serde_json::from_value(json!({
            "id": 3,
            "name": "화학 A반",
            "subject": "CHEMISTRY",
            "start_time": "14:00:00",
            "day_of_week": "MONDAY",
            "student_count": 12
        }))
        .unwrap();
        assert_eq!(class.start_time, NaiveTime::from_hms_opt(14, 0, 0).unwrap());
        assert_eq!(class.day_of_week.label(), "월요일");
    }

    #[test]
    fn test_student_detail_flatten() {
        let detail: StudentDetail = serde_json::from_value(json!({
            "id": 7,
            "name": "김철수",
            "class_info": 3,
            "class_info_name": "화학 A반",
            "parent_phone": "010-1234-5678",
            "student_phone": null,
            "attendance_stats": {"total_classes": 4, "attended_classes": 3, "late_count": 1},
            "exam_stats": {"average_score": 80, "highest_score": 90, "lowest_score": 70},
            "attendance_records": [],
            "exam_records": [{
                "id": 1, "attendance": 2, "name": "중간고사", "score": 90
            }]
        }))
        .unwrap();
        assert_eq!(detail.student.attendance_stats.late_count, 1);
        assert_eq!(detail.exam_records[0].max_score, 100);
    }

    #[test]
    fn test_notification_request_tagged() {
        let single = NotificationRequest::Single {
            student_id: 1,
            attendance_id: 9,
        };
        assert_eq!(
            serde_json::to_value(&single).unwrap(),
            json!({"type": "single", "student_id": 1, "attendance_id": 9})
        );

        let bulk = NotificationRequest::Bulk {
            student_ids: vec![1, 2],
            target_date: NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
        };
        assert_eq!(
            serde_json::to_value(&bulk).unwrap(),
            json!({"type": "bulk", "student_ids": [1, 2], "target_date": "2024-05-02"})
        );
    }

    #[test]
    fn test_user_update_skips_unset() {
        let update = UserUpdate {
            name: Some("이영희".to_string()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({"name": "이영희"})
        );
    }

    #[test]
    fn test_edit_form_from_record() {
        let exam: Exam = serde_json::from_value(json!({
            "id": 4,
            "attendance": 12,
            "student_name": "김학생",
            "name": "월말평가",
            "score": 72
        }))
        .unwrap();
        let input = ExamInput::from(&exam);
        assert_eq!(input.attendance, 12);
        assert_eq!(input.max_score, 100);

        let record: Attendance = serde_json::from_value(json!({
            "id": 12,
            "student": 7,
            "date": "2024-03-04",
            "class_type": "EXTRA",
            "content": "화학 결합",
            "is_late": true,
            "homework_completion": 80,
            "homework_accuracy": 70
        }))
        .unwrap();
        let input = AttendanceInput::from(&record);
        assert_eq!(input.class_type, ClassType::Extra);
        assert!(input.is_late);
        assert_eq!(input.class_info, None);
    }
}
