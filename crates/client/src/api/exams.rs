//! 考试记录

use serde::Serialize;

use academy_core::{Exam, ExamAverage, ExamInput, MessageResponse};

use crate::client::ApiClient;
use crate::error::Result;
use crate::request::ApiRequest;

/// 考试查询条件
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExamFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_id: Option<u64>,
}

/// 考试端点
pub struct ExamsApi<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    pub fn exams(&self) -> ExamsApi<'_> {
        ExamsApi { client: self }
    }
}

impl ExamsApi<'_> {
    pub async fn list(&self, filter: &ExamFilter) -> Result<Vec<Exam>> {
        let request = ApiRequest::get("/exams/").query(filter)?;
        self.client.request(request).await
    }

    pub async fn get(&self, id: u64) -> Result<Exam> {
        self.client
            .request(ApiRequest::get(format!("/exams/{id}/")))
            .await
    }

    pub async fn create(&self, exam: &ExamInput) -> Result<Exam> {
        self.client
            .request(ApiRequest::post("/exams/").json(exam)?)
            .await
    }

    pub async fn update(&self, id: u64, exam: &ExamInput) -> Result<Exam> {
        self.client
            .request(ApiRequest::put(format!("/exams/{id}/")).json(exam)?)
            .await
    }

    pub async fn delete(&self, id: u64) -> Result<MessageResponse> {
        self.client
            .request_message(ApiRequest::delete(format!("/exams/{id}/")))
            .await
    }

    /// 按考试名称聚合的平均分
    pub async fn averages(&self, class_id: Option<u64>) -> Result<Vec<ExamAverage>> {
        let filter = ExamFilter {
            student_id: None,
            class_id,
        };
        let request = ApiRequest::get("/exams/exam_averages/").query(&filter)?;
        self.client.request(request).await
    }
}
