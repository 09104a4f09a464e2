//! Blocked dates: days on which a school or service takes no bookings.

use chrono::NaiveDate;
use serde_json::Value;
use tracing::info;

use schooladmin_core::result::AppResult;
use schooladmin_core::types::{BlockId, ServiceId};
use schooladmin_entity::school::{BlockDateRequest, ScheduleOverview};
use schooladmin_http::ApiClient;

use crate::context::AdminContext;

/// Lists, adds, and removes blocked dates.
#[derive(Debug, Clone)]
pub struct BlockService {
    api: ApiClient,
}

impl BlockService {
    /// Creates a new block service.
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Current blocked dates.
    pub async fn list(&self, ctx: &AdminContext) -> AppResult<ScheduleOverview> {
        self.api.get(ctx.school_path("/schedule"), Vec::new()).await
    }

    /// Block `date` for one service, or for the whole school when `service`
    /// is `None`.
    pub async fn block(
        &self,
        ctx: &AdminContext,
        service: Option<ServiceId>,
        date: NaiveDate,
        reason: Option<String>,
    ) -> AppResult<()> {
        let request = BlockDateRequest::new(ctx.school_id, service, date, reason);
        let _: Value = self.api.post("/schools/schedule/block", &request).await?;
        info!(school_id = %ctx.school_id, %date, "Date blocked");
        Ok(())
    }

    /// Remove a blocked date.
    pub async fn unblock(&self, ctx: &AdminContext, id: BlockId) -> AppResult<()> {
        self.api
            .delete(ctx.school_path(&format!("/schedule/{id}")))
            .await?;
        info!(school_id = %ctx.school_id, block_id = %id, "Date unblocked");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schooladmin_core::traits::HttpMethod;
    use serde_json::json;

    use crate::test_support::{client, ctx};

    #[tokio::test]
    async fn test_block_posts_school_and_service() {
        let (mock, api) = client();
        mock.on(HttpMethod::Post, "/schools/schedule/block", 201, json!({"id": 4}));
        let date = NaiveDate::from_ymd_opt(2099, 12, 25).unwrap();

        BlockService::new(api)
            .block(&ctx(), Some(ServiceId(5)), date, Some("Holiday".into()))
            .await
            .unwrap();

        assert_eq!(
            mock.requests()[0].json_body().cloned().unwrap(),
            json!({"schoolId": 1, "serviceId": 5, "blockedDate": "2099-12-25", "reason": "Holiday"})
        );
    }

    #[tokio::test]
    async fn test_unblock_and_list() {
        let (mock, api) = client();
        mock.on(HttpMethod::Delete, "/schools/1/schedule/4", 200, json!({}));
        mock.on(
            HttpMethod::Get,
            "/schools/1/schedule",
            200,
            json!({"blockedDates": [{"id": 6, "blockedDate": "2099-01-01"}]}),
        );
        let service = BlockService::new(api);

        service.unblock(&ctx(), BlockId(4)).await.unwrap();
        let overview = service.list(&ctx()).await.unwrap();

        assert_eq!(overview.blocked_dates.len(), 1);
        assert_eq!(overview.blocked_dates[0].id, Some(BlockId(6)));
    }
}
