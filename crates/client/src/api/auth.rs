//! 登录和登出

use serde::Serialize;
use tracing::info;

use academy_core::{LoginResponse, MessageResponse};

use crate::client::ApiClient;
use crate::error::Result;
use crate::request::ApiRequest;

#[derive(Serialize)]
struct Credentials<'a> {
    username: &'a str,
    password: &'a str,
}

/// 会话端点
pub struct AuthApi<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi { client: self }
    }
}

impl AuthApi<'_> {
    /// 登录，成功后会话 cookie 保存在传输层
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse> {
        let request = ApiRequest::post("/login/").json(&Credentials { username, password })?;
        let response: LoginResponse = self.client.request(request).await?;
        info!(user = %response.user.username, role = %response.user.role, "로그인 성공");
        Ok(response)
    }

    pub async fn logout(&self) -> Result<MessageResponse> {
        self.client
            .request_message(ApiRequest::post("/logout/"))
            .await
    }
}
