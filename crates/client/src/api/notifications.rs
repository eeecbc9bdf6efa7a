//! 家长通知

use chrono::NaiveDate;
use tracing::info;

use academy_core::{NotificationRequest, NotificationResponse};

use crate::client::ApiClient;
use crate::error::Result;
use crate::request::ApiRequest;

/// 通知端点
pub struct NotificationsApi<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    pub fn notifications(&self) -> NotificationsApi<'_> {
        NotificationsApi { client: self }
    }
}

impl NotificationsApi<'_> {
    /// 发送单个学生某次出勤的通知
    pub async fn send_single(
        &self,
        student_id: u64,
        attendance_id: u64,
    ) -> Result<NotificationResponse> {
        self.send(&NotificationRequest::Single {
            student_id,
            attendance_id,
        })
        .await
    }

    /// 批量发送某一天的通知
    pub async fn send_bulk(
        &self,
        student_ids: Vec<u64>,
        target_date: NaiveDate,
    ) -> Result<NotificationResponse> {
        self.send(&NotificationRequest::Bulk {
            student_ids,
            target_date,
        })
        .await
    }

    async fn send(&self, request: &NotificationRequest) -> Result<NotificationResponse> {
        let response: NotificationResponse = self
            .client
            .request(ApiRequest::post("/notifications/").json(request)?)
            .await?;
        info!(
            total = ?response.total_count,
            success = ?response.success_count,
            "알림톡 전송 완료"
        );
        Ok(response)
    }
}
