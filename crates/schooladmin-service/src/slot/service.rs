//! Slot service: raw access to slot definitions and their availability.

use chrono::NaiveDate;
use serde_json::Value;
use tracing::{debug, info};

use schooladmin_core::config::SchedulingConfig;
use schooladmin_core::error::AppError;
use schooladmin_core::result::AppResult;
use schooladmin_core::types::{ServiceId, SlotId};
use schooladmin_entity::serde_helpers::DATE_FORMAT;
use schooladmin_entity::slot::{
    AvailabilityRow, AvailabilityUpdate, NewSlot, SlotAvailability, SlotDefinition,
    SlotListResponse, SlotUpdate,
};
use schooladmin_http::ApiClient;

use crate::context::AdminContext;

/// Lists and edits master slot definitions.
#[derive(Debug, Clone)]
pub struct SlotService {
    api: ApiClient,
    config: SchedulingConfig,
}

impl SlotService {
    /// Creates a new slot service.
    pub fn new(api: ApiClient, config: SchedulingConfig) -> Self {
        Self { api, config }
    }

    /// First page of definitions, optionally for one service.
    pub async fn list(
        &self,
        ctx: &AdminContext,
        service: Option<ServiceId>,
    ) -> AppResult<Vec<SlotDefinition>> {
        let mut query = Vec::new();
        if let Some(service) = service {
            query.push(("serviceId".to_string(), service.to_string()));
        }
        query.push(("page".to_string(), "1".to_string()));
        query.push(("limit".to_string(), self.config.slot_page_limit.to_string()));

        let body: Value = self.api.get(ctx.school_path("/slots"), query).await?;
        let slots = if body.is_array() {
            serde_json::from_value(body)?
        } else {
            serde_json::from_value::<SlotListResponse>(body)?.slots
        };
        debug!(school_id = %ctx.school_id, count = slots.len(), "Slots listed");
        Ok(slots)
    }

    /// One definition by id.
    pub async fn find(&self, ctx: &AdminContext, id: SlotId) -> AppResult<SlotDefinition> {
        self.list(ctx, None)
            .await?
            .into_iter()
            .find(|s| s.id == id)
            .ok_or_else(|| AppError::not_found(format!("Slot {id} not found")))
    }

    /// Create one definition; the raw response is returned for id lookup.
    pub async fn create(&self, ctx: &AdminContext, slot: &NewSlot) -> AppResult<Value> {
        self.api.post(ctx.school_path("/slots"), slot).await
    }

    /// Change base capacity and active flag.
    pub async fn update(&self, id: SlotId, update: SlotUpdate) -> AppResult<()> {
        if update.capacity == 0 {
            return Err(AppError::validation("Capacity must be at least 1"));
        }
        let _: Value = self.api.put(format!("/schools/slots/{id}"), &update).await?;
        info!(slot_id = %id, capacity = update.capacity, active = update.is_active, "Slot updated");
        Ok(())
    }

    /// Flip the active flag, keeping capacity.
    pub async fn set_active(&self, slot: &SlotDefinition, active: bool) -> AppResult<()> {
        self.update(
            slot.id,
            SlotUpdate {
                capacity: slot.capacity,
                is_active: active,
            },
        )
        .await
    }

    /// Change base capacity, keeping the active flag.
    pub async fn set_capacity(&self, slot: &SlotDefinition, capacity: u32) -> AppResult<()> {
        self.update(
            slot.id,
            SlotUpdate {
                capacity,
                is_active: slot.is_active,
            },
        )
        .await
    }

    /// Delete one definition.
    pub async fn delete(&self, id: SlotId) -> AppResult<()> {
        self.api.delete(format!("/schools/slots/{id}")).await?;
        info!(slot_id = %id, "Slot deleted");
        Ok(())
    }

    /// Availability rows for one date, merged by time window.
    pub async fn availability(
        &self,
        ctx: &AdminContext,
        date: NaiveDate,
        service: Option<ServiceId>,
    ) -> AppResult<Vec<AvailabilityRow>> {
        let mut query = vec![("date".to_string(), date.format(DATE_FORMAT).to_string())];
        if let Some(service) = service {
            query.push(("serviceId".to_string(), service.to_string()));
        }
        let body: Value = self
            .api
            .get(ctx.school_path("/slots/availability"), query)
            .await?;
        let rows: Vec<SlotAvailability> = if body.is_array() {
            serde_json::from_value(body)?
        } else {
            Vec::new()
        };
        Ok(AvailabilityRow::dedupe(rows))
    }

    /// Send capacity overrides.
    pub async fn update_availability(
        &self,
        ctx: &AdminContext,
        update: &AvailabilityUpdate,
    ) -> AppResult<()> {
        let _: Value = self
            .api
            .put(ctx.school_path("/slots/availability"), update)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schooladmin_core::traits::HttpMethod;
    use serde_json::json;

    use crate::test_support::{client, ctx};

    fn service(api: ApiClient) -> SlotService {
        SlotService::new(api, SchedulingConfig::default())
    }

    #[tokio::test]
    async fn test_list_sends_filter_and_page_limit() {
        let (mock, api) = client();
        mock.on(
            HttpMethod::Get,
            "/schools/1/slots",
            200,
            json!({"slots": [{"id": 3, "slotName": "9:00 AM - 12:00 PM", "capacity": 15}]}),
        );

        let slots = service(api).list(&ctx(), Some(ServiceId(5))).await.unwrap();
        assert_eq!(slots.len(), 1);

        let request = &mock.requests()[0];
        assert_eq!(request.query_value("serviceId"), Some("5"));
        assert_eq!(request.query_value("page"), Some("1"));
        assert_eq!(request.query_value("limit"), Some("100"));
    }

    #[tokio::test]
    async fn test_set_active_keeps_capacity() {
        let (mock, api) = client();
        mock.on(HttpMethod::Put, "/schools/slots/3", 200, json!({}));
        let slot: SlotDefinition =
            serde_json::from_value(json!({"id": 3, "capacity": 12, "isActive": true})).unwrap();

        service(api).set_active(&slot, false).await.unwrap();

        let body = mock.requests()[0].json_body().cloned().unwrap();
        assert_eq!(body, json!({"capacity": 12, "isActive": false}));
    }

    #[tokio::test]
    async fn test_zero_base_capacity_is_rejected() {
        let (mock, api) = client();
        let err = service(api)
            .update(SlotId(3), SlotUpdate { capacity: 0, is_active: true })
            .await
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test]
    async fn test_availability_is_deduplicated_by_window() {
        let (mock, api) = client();
        mock.on(
            HttpMethod::Get,
            "/schools/1/slots/availability",
            200,
            json!([
                {"id": 1, "startTime": "09:00", "endTime": "12:00", "currentCapacity": 15},
                {"id": 2, "startTime": "12:00", "endTime": "15:00", "currentCapacity": 15},
                {"id": 7, "startTime": "09:00", "endTime": "12:00", "currentCapacity": 10}
            ]),
        );
        let date = NaiveDate::from_ymd_opt(2030, 1, 7).unwrap();

        let rows = service(api)
            .availability(&ctx(), date, Some(ServiceId(5)))
            .await
            .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].ids, vec![SlotId(1), SlotId(7)]);
        assert_eq!(mock.requests()[0].query_value("date"), Some("2030-01-07"));
    }
}
