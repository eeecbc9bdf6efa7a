//! 用户管理

use academy_core::{
    MessageResponse, NewUser, PasswordChange, ProfileUpdate, User, UserUpdate,
};

use crate::client::ApiClient;
use crate::error::Result;
use crate::request::ApiRequest;

/// 用户端点
pub struct UsersApi<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    pub fn users(&self) -> UsersApi<'_> {
        UsersApi { client: self }
    }
}

impl UsersApi<'_> {
    pub async fn list(&self) -> Result<Vec<User>> {
        self.client.request(ApiRequest::get("/users/")).await
    }

    pub async fn get(&self, id: u64) -> Result<User> {
        self.client
            .request(ApiRequest::get(format!("/users/{id}/")))
            .await
    }

    pub async fn create(&self, user: &NewUser) -> Result<User> {
        self.client
            .request(ApiRequest::post("/users/").json(user)?)
            .await
    }

    pub async fn update(&self, id: u64, update: &UserUpdate) -> Result<User> {
        self.client
            .request(ApiRequest::put(format!("/users/{id}/")).json(update)?)
            .await
    }

    pub async fn delete(&self, id: u64) -> Result<MessageResponse> {
        self.client
            .request_message(ApiRequest::delete(format!("/users/{id}/")))
            .await
    }

    /// 当前登录用户
    pub async fn profile(&self) -> Result<User> {
        self.client.request(ApiRequest::get("/users/profile/")).await
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User> {
        self.client
            .request(ApiRequest::put("/users/update_profile/").json(update)?)
            .await
    }

    pub async fn change_password(&self, change: &PasswordChange) -> Result<MessageResponse> {
        self.client
            .request_message(ApiRequest::post("/users/change_password/").json(change)?)
            .await
    }
}
