//! 学生管理

use serde::Serialize;

use academy_core::{Attendance, Exam, MessageResponse, Student, StudentDetail, StudentInput};

use crate::client::ApiClient;
use crate::error::Result;
use crate::request::ApiRequest;

#[derive(Serialize)]
struct StudentQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    class_id: Option<u64>,
}

/// 学生端点
pub struct StudentsApi<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    pub fn students(&self) -> StudentsApi<'_> {
        StudentsApi { client: self }
    }
}

impl StudentsApi<'_> {
    pub async fn list(&self, class_id: Option<u64>) -> Result<Vec<Student>> {
        let request = ApiRequest::get("/students/").query(&StudentQuery { class_id })?;
        self.client.request(request).await
    }

    /// 学生详情，包含出勤和考试记录
    pub async fn get(&self, id: u64) -> Result<StudentDetail> {
        self.client
            .request(ApiRequest::get(format!("/students/{id}/")))
            .await
    }

    pub async fn create(&self, student: &StudentInput) -> Result<Student> {
        self.client
            .request(ApiRequest::post("/students/").json(student)?)
            .await
    }

    pub async fn update(&self, id: u64, student: &StudentInput) -> Result<Student> {
        self.client
            .request(ApiRequest::put(format!("/students/{id}/")).json(student)?)
            .await
    }

    pub async fn delete(&self, id: u64) -> Result<MessageResponse> {
        self.client
            .request_message(ApiRequest::delete(format!("/students/{id}/")))
            .await
    }

    pub async fn attendance_records(&self, id: u64) -> Result<Vec<Attendance>> {
        self.client
            .request(ApiRequest::get(format!("/students/{id}/attendance_records/")))
            .await
    }

    pub async fn exam_records(&self, id: u64) -> Result<Vec<Exam>> {
        self.client
            .request(ApiRequest::get(format!("/students/{id}/exam_records/")))
            .await
    }
}
