//! 出勤记录

use chrono::NaiveDate;
use serde::Serialize;

use academy_core::{Attendance, AttendanceInput, MessageResponse};

use crate::client::ApiClient;
use crate::error::Result;
use crate::request::ApiRequest;

/// 出勤查询条件
#[derive(Debug, Clone, Default, Serialize)]
pub struct AttendanceFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

/// 出勤端点
pub struct AttendancesApi<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    pub fn attendances(&self) -> AttendancesApi<'_> {
        AttendancesApi { client: self }
    }
}

impl AttendancesApi<'_> {
    pub async fn list(&self, filter: &AttendanceFilter) -> Result<Vec<Attendance>> {
        let request = ApiRequest::get("/attendances/").query(filter)?;
        self.client.request(request).await
    }

    pub async fn get(&self, id: u64) -> Result<Attendance> {
        self.client
            .request(ApiRequest::get(format!("/attendances/{id}/")))
            .await
    }

    pub async fn create(&self, attendance: &AttendanceInput) -> Result<Attendance> {
        self.client
            .request(ApiRequest::post("/attendances/").json(attendance)?)
            .await
    }

    pub async fn update(&self, id: u64, attendance: &AttendanceInput) -> Result<Attendance> {
        self.client
            .request(ApiRequest::put(format!("/attendances/{id}/")).json(attendance)?)
            .await
    }

    /// 同时删除关联的考试记录
    pub async fn delete(&self, id: u64) -> Result<MessageResponse> {
        self.client
            .request_message(ApiRequest::delete(format!("/attendances/{id}/")))
            .await
    }
}
