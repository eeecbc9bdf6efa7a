//! 传输层
//!
//! `Transport` 负责把一次 `ApiRequest` 变成 JSON 响应。
//! 默认实现基于 reqwest，带 cookie 存储和 CSRF 请求头。

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde_json::Value;
use tracing::{debug, error, warn};
use url::Url;

use crate::config::ClientConfig;
use crate::csrf::csrf_token_from_cookie_header;
use crate::error::{ApiError, Result};
use crate::request::ApiRequest;

/// 传输层接口
#[async_trait]
pub trait Transport: Send + Sync {
    /// 发送请求，成功时返回 JSON 响应体（空响应为 `Value::Null`）
    async fn execute(&self, request: ApiRequest) -> Result<Value>;

    /// 当前会话的 Cookie 头，用于持久化
    fn cookie_header(&self) -> Option<String> {
        None
    }

    /// 恢复持久化的 Cookie
    fn restore_cookies(&self, _header: &str) {}
}

/// 基于 reqwest 的 HTTP 传输
pub struct HttpTransport {
    client: reqwest::Client,
    jar: Arc<Jar>,
    base_url: Url,
    csrf_cookie_name: String,
    csrf_header_name: String,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ApiError::Config(format!("잘못된 API 주소 {}: {e}", config.base_url)))?;
        let jar = Arc::new(Jar::default());
        let client = reqwest::Client::builder()
            .cookie_provider(jar.clone())
            .timeout(config.request_timeout())
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| ApiError::Config(e.to_string()))?;

        Ok(Self {
            client,
            jar,
            base_url,
            csrf_cookie_name: config.csrf_cookie_name.clone(),
            csrf_header_name: config.csrf_header_name.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    /// 当前 cookie 中的 CSRF 令牌
    pub fn csrf_token(&self) -> Option<String> {
        let header = self.cookie_header()?;
        csrf_token_from_cookie_header(&header, &self.csrf_cookie_name)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: ApiRequest) -> Result<Value> {
        let url = self.url(&request.path);
        debug!(method = %request.method, url = %url, "API 요청");

        let mut builder = self
            .client
            .request(request.method.clone(), &url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json");
        if let Some(token) = self.csrf_token() {
            builder = builder.header(self.csrf_header_name.as_str(), token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            error!(method = %request.method, url = %url, error = %e, "API 호출 실패");
            ApiError::from(e)
        })?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !status.is_success() {
            let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
            let err = ApiError::from_response(status.as_u16(), &body);
            warn!(
                method = %request.method,
                url = %url,
                status = status.as_u16(),
                error = %err,
                "API 오류 응답"
            );
            return Err(err);
        }

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn cookie_header(&self) -> Option<String> {
        self.jar
            .cookies(&self.base_url)
            .and_then(|value| value.to_str().ok().map(str::to_string))
    }

    fn restore_cookies(&self, header: &str) {
        for pair in header.split(';').map(str::trim).filter(|p| !p.is_empty()) {
            self.jar.add_cookie_str(pair, &self.base_url);
        }
    }
}
