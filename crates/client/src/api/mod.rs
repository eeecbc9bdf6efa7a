//! 按资源分组的端点
//!
//! 每组通过 `ApiClient` 上的访问器获取，例如 `client.students().list(None)`。

mod attendances;
mod auth;
mod classes;
mod dashboard;
mod exams;
mod notifications;
mod students;
mod users;

pub use attendances::{AttendanceFilter, AttendancesApi};
pub use auth::AuthApi;
pub use classes::ClassesApi;
pub use dashboard::DashboardApi;
pub use exams::{ExamFilter, ExamsApi};
pub use notifications::NotificationsApi;
pub use students::StudentsApi;
pub use users::UsersApi;
