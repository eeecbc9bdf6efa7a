//! 仪表盘

use serde::Serialize;

use academy_core::DashboardStats;

use crate::client::ApiClient;
use crate::error::Result;
use crate::request::ApiRequest;

#[derive(Serialize)]
struct DashboardQuery<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    class_id: Option<u64>,
    /// "YYYY-MM"
    #[serde(skip_serializing_if = "Option::is_none")]
    month: Option<&'a str>,
}

/// 仪表盘端点
pub struct DashboardApi<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    pub fn dashboard(&self) -> DashboardApi<'_> {
        DashboardApi { client: self }
    }
}

impl DashboardApi<'_> {
    pub async fn stats(&self, class_id: Option<u64>, month: Option<&str>) -> Result<DashboardStats> {
        let request = ApiRequest::get("/dashboard/").query(&DashboardQuery { class_id, month })?;
        self.client.request(request).await
    }
}
