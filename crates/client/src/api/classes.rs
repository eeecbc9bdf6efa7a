//! 班级管理

use serde::Serialize;

use academy_core::{Class, ClassInput, MessageResponse, Subject};

use crate::client::ApiClient;
use crate::error::Result;
use crate::request::ApiRequest;

#[derive(Serialize)]
struct ClassQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    subject: Option<Subject>,
}

/// 班级端点
pub struct ClassesApi<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    pub fn classes(&self) -> ClassesApi<'_> {
        ClassesApi { client: self }
    }
}

impl ClassesApi<'_> {
    /// 可按科目过滤
    pub async fn list(&self, subject: Option<Subject>) -> Result<Vec<Class>> {
        let request = ApiRequest::get("/classes/").query(&ClassQuery { subject })?;
        self.client.request(request).await
    }

    pub async fn get(&self, id: u64) -> Result<Class> {
        self.client
            .request(ApiRequest::get(format!("/classes/{id}/")))
            .await
    }

    pub async fn create(&self, class: &ClassInput) -> Result<Class> {
        self.client
            .request(ApiRequest::post("/classes/").json(class)?)
            .await
    }

    pub async fn update(&self, id: u64, class: &ClassInput) -> Result<Class> {
        self.client
            .request(ApiRequest::put(format!("/classes/{id}/")).json(class)?)
            .await
    }

    pub async fn delete(&self, id: u64) -> Result<MessageResponse> {
        self.client
            .request_message(ApiRequest::delete(format!("/classes/{id}/")))
            .await
    }
}
