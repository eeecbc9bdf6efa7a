//! 子命令实现
//!
//! 每个命令先在本地检查角色权限和表单，再调用后端。

mod attendance;
mod auth;
mod classes;
mod dashboard;
mod exams;
mod notify;
mod students;
mod users;

use anyhow::{anyhow, Result};

use academy_client::ApiClient;
use academy_core::access::{can_edit_profile, can_write_roster, check_route};
use academy_core::{AccessDenied, RouteRequirement, Subject, User};

use crate::cli::Command;
use crate::config::AppConfig;
use crate::session::{Session, SessionStore};

/// 命令执行上下文
pub struct Context {
    pub client: ApiClient,
    pub session: SessionStore,
    user: Option<User>,
}

impl Context {
    /// 创建客户端并恢复已保存的会话
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = ApiClient::new(&config.api)?;
        let session = SessionStore::new(config.session_path());
        let user = session.load()?.map(|saved| {
            client.restore_cookies(&saved.cookies);
            saved.user
        });
        Ok(Self {
            client,
            session,
            user,
        })
    }

    /// 当前登录用户
    pub fn user(&self) -> Result<&User> {
        self.user
            .as_ref()
            .ok_or_else(|| anyhow!("로그인이 필요합니다. 먼저 `academy-admin login`을 실행하세요."))
    }

    /// 检查页面访问要求
    pub fn require(&self, requirement: RouteRequirement) -> Result<&User> {
        let user = self.user()?;
        check_route(user, &requirement)?;
        Ok(user)
    }

    /// 保存当前 cookie 和用户
    pub fn remember(&mut self, user: User) -> Result<()> {
        let cookies = self.client.cookie_header().unwrap_or_default();
        self.session.save(&Session::new(cookies, user.clone()))?;
        self.user = Some(user);
        Ok(())
    }

    pub fn forget(&mut self) -> Result<bool> {
        self.user = None;
        self.session.clear()
    }

    /// 助教不能修改本人资料
    pub fn require_profile_edit(&self) -> Result<&User> {
        let user = self.user()?;
        if !can_edit_profile(user) {
            return Err(AccessDenied::new(user.role, "프로필 수정").into());
        }
        Ok(user)
    }

    /// 要求对某科目有写权限
    pub fn require_roster_write(&self, subject: Subject) -> Result<&User> {
        let user = self.user()?;
        if !can_write_roster(user, subject) {
            return Err(AccessDenied::new(user.role, format!("{} 과목 쓰기", subject.label())).into());
        }
        Ok(user)
    }

    /// 要求对学生所在班级的科目有写权限
    pub async fn require_student_write(&self, student_id: u64) -> Result<&User> {
        let student = self.client.students().get(student_id).await?;
        let class = self.client.classes().get(student.student.class_info).await?;
        self.require_roster_write(class.subject)
    }
}

/// 执行子命令
pub async fn run(command: Command, config: &AppConfig) -> Result<()> {
    let mut ctx = Context::new(config)?;
    match command {
        Command::Login { username, password } => auth::login(&mut ctx, &username, &password).await,
        Command::Logout => auth::logout(&mut ctx).await,
        Command::Whoami => auth::whoami(&mut ctx).await,
        Command::Menu => auth::menu(&ctx),
        Command::Users { command } => users::run(&mut ctx, command).await,
        Command::Classes { command } => classes::run(&ctx, command).await,
        Command::Students { command } => students::run(&ctx, command).await,
        Command::Attendance { command } => attendance::run(&ctx, command).await,
        Command::Exams { command } => exams::run(&ctx, command).await,
        Command::Dashboard {
            class_id,
            month,
            keywords,
        } => dashboard::run(&ctx, class_id, month.as_deref(), &keywords).await,
        Command::Notify { command } => notify::run(&ctx, command).await,
    }
}

/// 未设置的可选值显示为 "-"
fn or_dash(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or("-")
}

/// 后端提示为空时使用默认文字
fn done<'a>(message: &'a str, fallback: &'a str) -> &'a str {
    if message.is_empty() {
        fallback
    } else {
        message
    }
}
