//! Dashboard service: bookings, booking stats, and revenue.

use serde_json::Value;
use tracing::debug;

use schooladmin_core::result::AppResult;
use schooladmin_core::types::PageRequest;
use schooladmin_entity::booking::{BookingPage, BookingPageResponse, BookingTab};
use schooladmin_entity::stats::{
    RevenueMonth, RevenuePoint, StatsFilter, StatsResponse, StatsSummary, revenue_series,
};
use schooladmin_http::ApiClient;

use crate::context::AdminContext;

/// Read-only views of the school's bookings.
#[derive(Debug, Clone)]
pub struct DashboardService {
    api: ApiClient,
}

impl DashboardService {
    /// Creates a new dashboard service.
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// One page of bookings for a status tab.
    pub async fn bookings(
        &self,
        ctx: &AdminContext,
        page: PageRequest,
        tab: BookingTab,
    ) -> AppResult<BookingPage> {
        let mut query = page.to_query();
        query.push(("status".to_string(), tab.as_str().to_string()));
        let response: BookingPageResponse = self.api.get(ctx.school_path("/bookings"), query).await?;
        let page = BookingPage::from_response(response, &page);
        debug!(
            school_id = %ctx.school_id,
            tab = tab.as_str(),
            page = page.page,
            total = page.total,
            "Bookings loaded"
        );
        Ok(page)
    }

    /// Headline counts and the bookings chart.
    pub async fn stats(&self, ctx: &AdminContext, filter: &StatsFilter) -> AppResult<StatsSummary> {
        let response: StatsResponse = self
            .api
            .get(ctx.school_path("/stats"), filter.to_query())
            .await?;
        Ok(StatsSummary::from(response))
    }

    /// Monthly revenue in chronological order. The status filter is not sent.
    pub async fn revenue(
        &self,
        ctx: &AdminContext,
        filter: &StatsFilter,
    ) -> AppResult<Vec<RevenuePoint>> {
        let filter = StatsFilter {
            status: None,
            ..filter.clone()
        };
        let body: Value = self
            .api
            .get(ctx.school_path("/revenue"), filter.to_query())
            .await?;
        if !body.is_array() {
            return Ok(Vec::new());
        }
        let months: Vec<RevenueMonth> = serde_json::from_value(body)?;
        Ok(revenue_series(months))
    }
}
