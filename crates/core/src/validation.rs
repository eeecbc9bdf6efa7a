//! 表单校验
//!
//! 在提交前拦截后端一定会拒绝的输入。

use crate::types::{
    AttendanceInput, ClassInput, ExamInput, NewUser, PasswordChange, ProfileUpdate, StudentInput,
    UserUpdate,
};

/// 密码最小长度
pub const MIN_PASSWORD_LEN: usize = 8;

/// 表单校验错误
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0}을(를) 입력해주세요.")]
    Required(&'static str),

    #[error("비밀번호는 최소 8자 이상이어야 합니다.")]
    PasswordTooShort,

    #[error("비밀번호가 일치하지 않습니다.")]
    PasswordMismatch,

    #[error("{field}은(는) 0에서 100 사이여야 합니다: {value}")]
    PercentOutOfRange { field: &'static str, value: u32 },

    #[error("점수({score})가 만점({max_score})보다 클 수 없습니다.")]
    ScoreAboveMax { score: u32, max_score: u32 },

    #[error("만점은 0보다 커야 합니다.")]
    ZeroMaxScore,

    #[error("전화번호 형식이 올바르지 않습니다: {0}")]
    InvalidPhone(String),

    #[error("변경할 항목이 없습니다.")]
    NothingToUpdate,
}

fn required(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required(field));
    }
    Ok(())
}

/// 新密码：长度和确认一致
pub fn validate_new_password(password: &str, confirm: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort);
    }
    if password != confirm {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}

fn percent(value: u32, field: &'static str) -> Result<(), ValidationError> {
    if value > 100 {
        return Err(ValidationError::PercentOutOfRange { field, value });
    }
    Ok(())
}

/// 只允许数字和连字符
fn phone(value: &str) -> Result<(), ValidationError> {
    let valid = value.chars().any(|c| c.is_ascii_digit())
        && value.chars().all(|c| c.is_ascii_digit() || c == '-');
    if !valid {
        return Err(ValidationError::InvalidPhone(value.to_string()));
    }
    Ok(())
}

impl NewUser {
    pub fn validate(&self) -> Result<(), ValidationError> {
        required(&self.username, "아이디")?;
        required(&self.name, "이름")?;
        validate_new_password(&self.password, &self.confirm_password)
    }
}

impl UserUpdate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.is_none()
            && self.role.is_none()
            && self.subject.is_none()
            && self.new_password.is_none()
        {
            return Err(ValidationError::NothingToUpdate);
        }
        if let Some(name) = &self.name {
            required(name, "이름")?;
        }
        Ok(())
    }
}

impl ProfileUpdate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.is_none() && self.subject.is_none() {
            return Err(ValidationError::NothingToUpdate);
        }
        if let Some(name) = &self.name {
            required(name, "이름")?;
        }
        Ok(())
    }
}

impl ClassInput {
    pub fn validate(&self) -> Result<(), ValidationError> {
        required(&self.name, "반 이름")
    }
}

impl PasswordChange {
    pub fn validate(&self) -> Result<(), ValidationError> {
        required(&self.old_password, "현재 비밀번호")?;
        required(&self.new_password, "새 비밀번호")?;
        required(&self.confirm_password, "새 비밀번호 확인")?;
        validate_new_password(&self.new_password, &self.confirm_password)
    }
}

impl StudentInput {
    pub fn validate(&self) -> Result<(), ValidationError> {
        required(&self.name, "이름")?;
        required(&self.parent_phone, "부모님 전화번호")?;
        phone(&self.parent_phone)?;
        if let Some(student_phone) = self.student_phone.as_deref() {
            if !student_phone.is_empty() {
                phone(student_phone)?;
            }
        }
        Ok(())
    }
}

impl AttendanceInput {
    pub fn validate(&self) -> Result<(), ValidationError> {
        required(&self.content, "수업내용")?;
        percent(self.homework_completion, "숙제이행도")?;
        percent(self.homework_accuracy, "숙제정답률")
    }
}

impl ExamInput {
    pub fn validate(&self) -> Result<(), ValidationError> {
        required(&self.name, "시험이름")?;
        if self.max_score == 0 {
            return Err(ValidationError::ZeroMaxScore);
        }
        if self.score > self.max_score {
            return Err(ValidationError::ScoreAboveMax {
                score: self.score,
                max_score: self.max_score,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ClassType, DayOfWeek, Role, Subject};
    use chrono::{NaiveDate, NaiveTime};

    fn new_user(password: &str, confirm: &str) -> NewUser {
        NewUser {
            username: "assistant1".to_string(),
            password: password.to_string(),
            confirm_password: confirm.to_string(),
            name: "조교".to_string(),
            role: Role::Assistant,
            subject: None,
        }
    }

    #[test]
    fn test_new_user() {
        assert!(new_user("password1", "password1").validate().is_ok());
        assert_eq!(
            new_user("short", "short").validate(),
            Err(ValidationError::PasswordTooShort)
        );
        assert_eq!(
            new_user("password1", "password2").validate(),
            Err(ValidationError::PasswordMismatch)
        );

        let mut user = new_user("password1", "password1");
        user.username = "  ".to_string();
        assert_eq!(user.validate(), Err(ValidationError::Required("아이디")));
    }

    #[test]
    fn test_password_change() {
        let change = PasswordChange {
            old_password: String::new(),
            new_password: "newpassword".to_string(),
            confirm_password: "newpassword".to_string(),
        };
        assert_eq!(
            change.validate(),
            Err(ValidationError::Required("현재 비밀번호"))
        );
    }

    #[test]
    fn test_student_phone() {
        let mut input = StudentInput {
            name: "김철수".to_string(),
            class_info: 1,
            parent_phone: "010-1234-5678".to_string(),
            student_phone: Some(String::new()),
        };
        assert!(input.validate().is_ok());

        input.parent_phone = "010-abcd".to_string();
        assert!(matches!(
            input.validate(),
            Err(ValidationError::InvalidPhone(_))
        ));
    }

    #[test]
    fn test_attendance_percent() {
        let input = AttendanceInput {
            student: 1,
            class_info: None,
            date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            class_type: ClassType::Regular,
            content: "원소 주기율표".to_string(),
            is_late: false,
            homework_completion: 120,
            homework_accuracy: 50,
        };
        assert_eq!(
            input.validate(),
            Err(ValidationError::PercentOutOfRange {
                field: "숙제이행도",
                value: 120
            })
        );
    }

    #[test]
    fn test_exam_scores() {
        let mut input = ExamInput {
            attendance: 1,
            name: "단원평가".to_string(),
            score: 45,
            max_score: 50,
        };
        assert!(input.validate().is_ok());
        input.score = 51;
        assert!(matches!(
            input.validate(),
            Err(ValidationError::ScoreAboveMax { .. })
        ));
        input.max_score = 0;
        assert_eq!(input.validate(), Err(ValidationError::ZeroMaxScore));
    }

    #[test]
    fn test_user_update() {
        assert_eq!(
            UserUpdate::default().validate(),
            Err(ValidationError::NothingToUpdate)
        );
        let update = UserUpdate {
            name: Some(" ".to_string()),
            ..UserUpdate::default()
        };
        assert_eq!(update.validate(), Err(ValidationError::Required("이름")));
        let update = UserUpdate {
            role: Some(Role::Teacher),
            ..UserUpdate::default()
        };
        assert!(update.validate().is_ok());
    }

    #[test]
    fn test_profile_update() {
        assert_eq!(
            ProfileUpdate::default().validate(),
            Err(ValidationError::NothingToUpdate)
        );
        let update = ProfileUpdate {
            subject: Some(Subject::Biology),
            ..ProfileUpdate::default()
        };
        assert!(update.validate().is_ok());
    }

    #[test]
    fn test_class_name_required() {
        let input = ClassInput {
            name: String::new(),
            subject: Subject::Chemistry,
            start_time: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
            day_of_week: DayOfWeek::Friday,
        };
        assert_eq!(input.validate(), Err(ValidationError::Required("반 이름")));
    }
}
