//! academy-admin - 学院管理命令行控制台
//!
//! 在 academy-client 之上提供登录会话、配置文件、日志初始化和各资源的子命令。

pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod session;

pub use config::AppConfig;
pub use session::{Session, SessionStore};
