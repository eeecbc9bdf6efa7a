//! 客户端配置

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// API 客户端配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// 后端 API 根地址
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// 请求超时（秒）
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// 存放 CSRF 令牌的 cookie 名称
    #[serde(default = "default_csrf_cookie_name")]
    pub csrf_cookie_name: String,
    /// 携带 CSRF 令牌的请求头名称
    #[serde(default = "default_csrf_header_name")]
    pub csrf_header_name: String,
    /// 是否合并相同的并发请求
    #[serde(default = "default_dedupe_requests")]
    pub dedupe_requests: bool,
    /// User-Agent
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    "http://localhost:8000/api".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_csrf_cookie_name() -> String {
    "csrftoken".to_string()
}

fn default_csrf_header_name() -> String {
    "X-CSRFToken".to_string()
}

fn default_dedupe_requests() -> bool {
    true
}

fn default_user_agent() -> String {
    format!("academy-client/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            csrf_cookie_name: default_csrf_cookie_name(),
            csrf_header_name: default_csrf_header_name(),
            dedupe_requests: default_dedupe_requests(),
            user_agent: default_user_agent(),
        }
    }
}

impl ClientConfig {
    /// 指定后端地址，其余使用默认值
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// 获取请求超时 Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
