//! API 错误类型
//!
//! 错误需要 `Clone`：同一个进行中的请求可能被多个调用方共享，
//! 每个调用方都拿到同一个错误。

use serde_json::Value;

/// 统一结果类型
pub type Result<T> = std::result::Result<T, ApiError>;

/// API 调用错误
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// 网络或传输层失败
    #[error("네트워크 오류: {0}")]
    Network(String),

    /// 后端返回非 2xx
    #[error("{message}")]
    Http { status: u16, message: String },

    /// 响应体无法解析
    #[error("응답 파싱 실패: {0}")]
    Decode(String),

    /// 请求体无法序列化
    #[error("요청 직렬화 실패: {0}")]
    Encode(String),

    /// 客户端配置错误
    #[error("설정 오류: {0}")]
    Config(String),
}

impl ApiError {
    /// 从错误响应构造
    pub fn from_response(status: u16, body: &Value) -> Self {
        Self::Http {
            status,
            message: extract_error_message(status, body),
        }
    }

    /// 面向用户的提示
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// 4xx：后端拒绝了输入或权限
    pub fn is_client_error(&self) -> bool {
        matches!(self.status(), Some(400..=499))
    }
}

/// 从错误响应体中提取提示信息
///
/// 依次查找 `detail`、`non_field_errors`、`error`、`message`，
/// 都没有时取第一个字段的值；字段错误通常是字符串数组，取第一条。
pub fn extract_error_message(status: u16, body: &Value) -> String {
    const KNOWN_FIELDS: [&str; 4] = ["detail", "non_field_errors", "error", "message"];

    if let Some(object) = body.as_object() {
        let found = KNOWN_FIELDS
            .iter()
            .find_map(|field| object.get(*field).and_then(message_text))
            .or_else(|| object.values().next().and_then(message_text));
        if let Some(message) = found {
            return message;
        }
    }

    if let Some(text) = body.as_str().filter(|s| !s.trim().is_empty()) {
        return text.to_string();
    }

    format!("HTTP error! status: {status}")
}

fn message_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Array(items) => items.iter().find_map(message_text),
        Value::Object(map) => map.values().find_map(message_text),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::Decode(e.to_string())
        } else if e.is_builder() {
            Self::Config(e.to_string())
        } else {
            Self::Network(e.to_string())
        }
    }
}
