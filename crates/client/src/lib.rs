//! academy-client - 学院后端 API 客户端
//!
//! 基于 reqwest 的会话式客户端：cookie 会话、CSRF 请求头、统一的错误信息提取，
//! 以及对相同并发请求的合并（见 [`inflight`]）。

pub mod api;
pub mod client;
pub mod config;
pub mod csrf;
pub mod error;
pub mod inflight;
pub mod request;
pub mod transport;

pub use api::{AttendanceFilter, ExamFilter};
pub use client::ApiClient;
pub use config::ClientConfig;
pub use error::{ApiError, Result};
pub use inflight::InflightRequests;
pub use request::{ApiRequest, RequestKey};
pub use transport::{HttpTransport, Transport};
