//! 基于角色的可见性判断
//!
//! 菜单、页面访问和写操作的本地权限检查。后端仍会做最终校验，
//! 这里只用于在发请求之前隐藏或拒绝明显无权的操作。

use serde::Serialize;
use tracing::warn;

use crate::types::{Class, Role, Subject, User};

/// 菜单项
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    pub label: &'static str,
    pub path: &'static str,
}

const DASHBOARD: MenuItem = MenuItem {
    label: "대시보드",
    path: "/",
};
const USERS: MenuItem = MenuItem {
    label: "회원 관리",
    path: "/users",
};
const CLASSES: MenuItem = MenuItem {
    label: "반 관리",
    path: "/classes",
};
const STUDENTS: MenuItem = MenuItem {
    label: "학생 관리",
    path: "/students",
};
const PROFILE: MenuItem = MenuItem {
    label: "프로필",
    path: "/profile",
};

/// 获取角色可见的菜单
///
/// 只有管理员和老师能看到用户管理，插在第二位。
pub fn menu_items(role: Role) -> Vec<MenuItem> {
    let mut items = vec![DASHBOARD, CLASSES, STUDENTS, PROFILE];
    if can_manage_users(role) {
        items.insert(1, USERS);
    }
    items
}

/// 页面访问要求
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteRequirement {
    /// 已登录即可
    Authenticated,
    /// 必须是指定角色
    Role(Role),
    /// 属于其中任一角色
    AnyOf(Vec<Role>),
}

impl std::fmt::Display for RouteRequirement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Authenticated => f.write_str("authenticated"),
            Self::Role(role) => write!(f, "{role}"),
            Self::AnyOf(roles) => {
                let names: Vec<&str> = roles.iter().map(Role::as_str).collect();
                f.write_str(&names.join(", "))
            }
        }
    }
}

/// 权限不足
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("권한 부족: {role} 사용자는 {required} 권한이 필요한 작업을 할 수 없습니다")]
pub struct AccessDenied {
    pub role: Role,
    pub required: String,
}

impl AccessDenied {
    pub fn new(role: Role, required: impl Into<String>) -> Self {
        Self {
            role,
            required: required.into(),
        }
    }
}

/// 检查用户是否满足页面访问要求
pub fn check_route(user: &User, requirement: &RouteRequirement) -> Result<(), AccessDenied> {
    let allowed = match requirement {
        RouteRequirement::Authenticated => true,
        RouteRequirement::Role(role) => user.role == *role,
        RouteRequirement::AnyOf(roles) => roles.contains(&user.role),
    };

    if allowed {
        return Ok(());
    }

    warn!(
        user = %user.username,
        role = %user.role,
        required = %requirement,
        "권한 부족으로 접근 거부"
    );
    Err(AccessDenied::new(user.role, requirement.to_string()))
}

/// 是否能进入用户管理
pub fn can_manage_users(role: Role) -> bool {
    matches!(role, Role::Admin | Role::Teacher)
}

/// 是否能查看某科目的数据
pub fn can_view_subject(actor: &User, subject: Subject) -> bool {
    match actor.role {
        Role::Admin => true,
        Role::Teacher | Role::Assistant => actor.subject == Some(subject),
    }
}

/// 是否能新建、修改、删除某科目的班级、学生、出勤和考试
pub fn can_write_roster(actor: &User, subject: Subject) -> bool {
    match actor.role {
        Role::Admin => true,
        Role::Teacher => actor.subject == Some(subject),
        Role::Assistant => false,
    }
}

/// 是否能创建或赋予该角色
pub fn can_assign_role(actor: Role, role: Role) -> bool {
    match actor {
        Role::Admin => true,
        Role::Teacher => role != Role::Admin,
        Role::Assistant => false,
    }
}

/// 是否能修改或删除目标用户
pub fn can_edit_user(actor: &User, target: &User) -> bool {
    match actor.role {
        Role::Admin => true,
        Role::Teacher => target.role != Role::Admin,
        Role::Assistant => false,
    }
}

/// 是否能重置目标用户的密码
pub fn can_reset_password(actor: &User, target: &User) -> bool {
    match actor.role {
        Role::Admin => true,
        Role::Teacher => target.role == Role::Assistant,
        Role::Assistant => false,
    }
}

/// 是否能修改本人资料
pub fn can_edit_profile(actor: &User) -> bool {
    actor.role != Role::Assistant
}

/// 老师和助教只能看到本科目的班级
pub fn visible_classes<'a>(actor: &User, classes: &'a [Class]) -> Vec<&'a Class> {
    classes
        .iter()
        .filter(|class| can_view_subject(actor, class.subject))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn user(role: Role, subject: Option<Subject>) -> User {
        User {
            id: 1,
            username: "tester".to_string(),
            name: "테스터".to_string(),
            role,
            subject,
            date_joined: None,
        }
    }

    fn class(id: u64, subject: Subject) -> Class {
        Class {
            id,
            name: format!("반 {id}"),
            subject,
            start_time: NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
            day_of_week: crate::types::DayOfWeek::Monday,
            student_count: 0,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_menu_items_by_role() {
        let admin = menu_items(Role::Admin);
        assert_eq!(admin.len(), 5);
        assert_eq!(admin[1].path, "/users");

        let teacher = menu_items(Role::Teacher);
        assert_eq!(teacher[1].path, "/users");

        let assistant = menu_items(Role::Assistant);
        assert_eq!(assistant.len(), 4);
        assert!(assistant.iter().all(|item| item.path != "/users"));
    }

    #[test]
    fn test_check_route() {
        let teacher = user(Role::Teacher, Some(Subject::Biology));
        assert!(check_route(&teacher, &RouteRequirement::Authenticated).is_ok());
        assert!(check_route(&teacher, &RouteRequirement::Role(Role::Teacher)).is_ok());

        let denied = check_route(&teacher, &RouteRequirement::Role(Role::Admin)).unwrap_err();
        assert_eq!(denied.role, Role::Teacher);
        assert_eq!(denied.required, "ADMIN");

        let any = RouteRequirement::AnyOf(vec![Role::Admin, Role::Assistant]);
        let denied = check_route(&teacher, &any).unwrap_err();
        assert_eq!(denied.required, "ADMIN, ASSISTANT");
    }

    #[test]
    fn test_roster_write_rules() {
        let admin = user(Role::Admin, None);
        let teacher = user(Role::Teacher, Some(Subject::Chemistry));
        let assistant = user(Role::Assistant, Some(Subject::Chemistry));

        assert!(can_write_roster(&admin, Subject::Biology));
        assert!(can_write_roster(&teacher, Subject::Chemistry));
        assert!(!can_write_roster(&teacher, Subject::Biology));
        assert!(!can_write_roster(&assistant, Subject::Chemistry));
        assert!(can_view_subject(&assistant, Subject::Chemistry));
    }

    #[test]
    fn test_user_management_rules() {
        let admin = user(Role::Admin, None);
        let teacher = user(Role::Teacher, Some(Subject::Chemistry));
        let assistant = user(Role::Assistant, Some(Subject::Chemistry));

        assert!(can_assign_role(Role::Admin, Role::Admin));
        assert!(!can_assign_role(Role::Teacher, Role::Admin));
        assert!(can_assign_role(Role::Teacher, Role::Assistant));
        assert!(!can_assign_role(Role::Assistant, Role::Assistant));

        assert!(can_edit_user(&teacher, &assistant));
        assert!(!can_edit_user(&teacher, &admin));
        assert!(!can_edit_user(&assistant, &teacher));

        assert!(can_reset_password(&teacher, &assistant));
        assert!(!can_reset_password(&teacher, &teacher));
        assert!(can_reset_password(&admin, &teacher));

        assert!(can_edit_profile(&teacher));
        assert!(!can_edit_profile(&assistant));
    }

    #[test]
    fn test_visible_classes() {
        let classes = vec![
            class(1, Subject::Chemistry),
            class(2, Subject::Biology),
            class(3, Subject::Chemistry),
        ];
        let teacher = user(Role::Teacher, Some(Subject::Chemistry));
        let ids: Vec<u64> = visible_classes(&teacher, &classes)
            .iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec![1, 3]);

        let admin = user(Role::Admin, None);
        assert_eq!(visible_classes(&admin, &classes).len(), 3);
    }
}
