//! 请求描述和请求键

use std::fmt;

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use crate::error::{ApiError, Result};

/// 请求键：方法 + 路径（含查询串）+ 序列化后的请求体
///
/// 用于识别"相同"的并发请求。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestKey {
    method: Method,
    path: String,
    body: String,
}

impl RequestKey {
    /// 请求体按紧凑 JSON 序列化；serde_json 的 Map 按键排序，
    /// 相同内容得到相同的键。
    pub fn new(method: Method, path: impl Into<String>, body: Option<&Value>) -> Self {
        Self {
            method,
            path: path.into(),
            body: body.map(Value::to_string).unwrap_or_default(),
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl fmt::Display for RequestKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.method, self.path, self.body)
    }
}

/// 一次 API 请求
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// 相对 base_url 的路径，如 `/students/?class_id=3`
    pub path: String,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// 设置 JSON 请求体
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        let value = serde_json::to_value(body).map_err(|e| ApiError::Encode(e.to_string()))?;
        self.body = Some(value);
        Ok(self)
    }

    /// 追加查询串，未设置的字段会被跳过
    pub fn query<Q: Serialize + ?Sized>(mut self, query: &Q) -> Result<Self> {
        let encoded =
            serde_urlencoded::to_string(query).map_err(|e| ApiError::Encode(e.to_string()))?;
        if !encoded.is_empty() {
            let separator = if self.path.contains('?') { '&' } else { '?' };
            self.path = format!("{}{}{}", self.path, separator, encoded);
        }
        Ok(self)
    }

    pub fn key(&self) -> RequestKey {
        RequestKey::new(self.method.clone(), self.path.clone(), self.body.as_ref())
    }
}
