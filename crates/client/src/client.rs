//! API 客户端
//!
//! 所有端点调用都经过这里：先查进行中请求表，再交给传输层。

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use academy_core::MessageResponse;

use crate::config::ClientConfig;
use crate::error::{ApiError, Result};
use crate::inflight::InflightRequests;
use crate::request::ApiRequest;
use crate::transport::{HttpTransport, Transport};

/// 学院后端 API 客户端
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    /// 关闭去重时为 None
    inflight: Option<InflightRequests<Value>>,
}

impl ApiClient {
    /// 使用 HTTP 传输创建客户端
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let transport = Arc::new(HttpTransport::new(config)?);
        Ok(Self::with_transport(transport, config.dedupe_requests))
    }

    /// 使用自定义传输创建客户端
    pub fn with_transport(transport: Arc<dyn Transport>, dedupe_requests: bool) -> Self {
        Self {
            transport,
            inflight: dedupe_requests.then(InflightRequests::new),
        }
    }

    /// 发送请求并返回原始 JSON
    pub async fn send(&self, request: ApiRequest) -> Result<Value> {
        let Some(inflight) = &self.inflight else {
            return self.transport.execute(request).await;
        };

        let transport = self.transport.clone();
        let key = request.key();
        inflight
            .dispatch(key, move || async move { transport.execute(request).await })
            .await
    }

    /// 发送请求并解析为指定类型
    pub async fn request<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        let value = self.send(request).await?;
        serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// 用于删除、登出等只返回提示信息（或空响应）的端点
    pub async fn request_message(&self, request: ApiRequest) -> Result<MessageResponse> {
        match self.send(request).await? {
            Value::Null => Ok(MessageResponse::default()),
            value => serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string())),
        }
    }

    /// 当前进行中的请求数
    pub fn inflight_len(&self) -> usize {
        self.inflight.as_ref().map_or(0, InflightRequests::len)
    }

    pub fn cookie_header(&self) -> Option<String> {
        self.transport.cookie_header()
    }

    pub fn restore_cookies(&self, header: &str) {
        self.transport.restore_cookies(header);
    }
}
