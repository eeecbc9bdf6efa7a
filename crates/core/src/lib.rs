//! academy-core - 学院管理领域模型
//!
//! 提供后端数据结构、基于角色的可见性判断、统计计算、表单校验和日期格式化。
//! 不依赖任何 HTTP 实现，可被客户端库和命令行共同使用。

pub mod access;
pub mod dates;
pub mod notification;
pub mod stats;
pub mod types;
pub mod validation;

pub use access::{AccessDenied, MenuItem, RouteRequirement};
pub use stats::ScoreSummary;
pub use types::*;
pub use validation::ValidationError;
