//! Catalog service: list, create, edit, and delete bookable services.

use serde_json::Value;
use tracing::{debug, info};
use validator::Validate;

use schooladmin_core::error::AppError;
use schooladmin_core::result::AppResult;
use schooladmin_core::types::ServiceId;
use schooladmin_entity::catalog::{NewService, Service, ServiceDraft, ServiceUpdate};
use schooladmin_entity::slot::TimeBucket;
use schooladmin_http::ApiClient;

use crate::context::AdminContext;

/// Field-level edits to an existing service. Unset fields keep their
/// current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub cost: Option<f64>,
    pub phone_number: Option<String>,
    pub advanced_booking_enabled: Option<bool>,
    /// New price per bucket.
    pub prices: Vec<(TimeBucket, f64)>,
    /// New active flag per bucket.
    pub active: Vec<(TimeBucket, bool)>,
}

impl ServiceChanges {
    fn apply_to(&self, mut draft: ServiceDraft) -> ServiceDraft {
        if let Some(name) = &self.name {
            draft.name = name.trim().to_string();
        }
        if let Some(description) = &self.description {
            draft.description = description.clone();
        }
        if let Some(cost) = self.cost {
            draft.cost = cost;
        }
        if let Some(phone) = &self.phone_number {
            draft.phone_number = phone.clone();
        }
        if let Some(enabled) = self.advanced_booking_enabled {
            draft.advanced_booking_enabled = enabled;
        }
        draft
    }
}

/// Manages the services a school offers.
#[derive(Debug, Clone)]
pub struct CatalogService {
    api: ApiClient,
}

impl CatalogService {
    /// Creates a new catalog service.
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Every service of the school. A non-list body reads as empty.
    pub async fn list(&self, ctx: &AdminContext) -> AppResult<Vec<Service>> {
        let body: Value = self.api.get(ctx.school_path("/services"), Vec::new()).await?;
        if !body.is_array() {
            debug!(school_id = %ctx.school_id, "Service list was not an array");
            return Ok(Vec::new());
        }
        Ok(serde_json::from_value(body)?)
    }

    /// Find one service by id.
    pub async fn find(&self, ctx: &AdminContext, id: ServiceId) -> AppResult<Service> {
        self.list(ctx)
            .await?
            .into_iter()
            .find(|s| s.id == id)
            .ok_or_else(|| AppError::not_found(format!("Service {id} not found")))
    }

    /// Create a service with per-bucket prices; unpriced buckets cost zero.
    pub async fn create(
        &self,
        ctx: &AdminContext,
        draft: ServiceDraft,
        prices: &[(TimeBucket, f64)],
    ) -> AppResult<()> {
        let draft = ServiceDraft {
            name: draft.name.trim().to_string(),
            ..draft
        };
        draft.validate()?;
        ensure_prices(prices)?;

        let name = draft.name.clone();
        let payload = NewService::new(draft, ctx.school_id, prices);
        let _: Value = self.api.post(ctx.school_path("/service"), &payload).await?;
        info!(school_id = %ctx.school_id, service = %name, "Service created");
        Ok(())
    }

    /// Apply `changes` on top of the service's current values.
    pub async fn update(
        &self,
        ctx: &AdminContext,
        id: ServiceId,
        changes: &ServiceChanges,
    ) -> AppResult<()> {
        ensure_prices(&changes.prices)?;
        let service = self.find(ctx, id).await?;

        let draft = changes.apply_to(ServiceDraft::from(&service));
        draft.validate()?;

        let mut payload = ServiceUpdate::new(draft, ctx.school_id, &service);
        for (bucket, price) in &changes.prices {
            if !payload.set_price(*bucket, *price) {
                return Err(missing_bucket(&service, *bucket));
            }
        }
        for (bucket, active) in &changes.active {
            if !payload.set_active(*bucket, *active) {
                return Err(missing_bucket(&service, *bucket));
            }
        }

        let _: Value = self
            .api
            .put(format!("/schools/service/{id}"), &payload)
            .await?;
        info!(school_id = %ctx.school_id, service_id = %id, "Service updated");
        Ok(())
    }

    /// Delete a service.
    pub async fn delete(&self, ctx: &AdminContext, id: ServiceId) -> AppResult<()> {
        self.api.delete(format!("/schools/service/{id}")).await?;
        info!(school_id = %ctx.school_id, service_id = %id, "Service deleted");
        Ok(())
    }
}

fn ensure_prices(prices: &[(TimeBucket, f64)]) -> AppResult<()> {
    match prices.iter().find(|(_, p)| !p.is_finite() || *p < 0.0) {
        Some((bucket, _)) => Err(AppError::validation(format!(
            "Price for {bucket} cannot be negative"
        ))),
        None => Ok(()),
    }
}

fn missing_bucket(service: &Service, bucket: TimeBucket) -> AppError {
    AppError::validation(format!("{} has no {bucket} slot", service.name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use schooladmin_core::error::ErrorKind;
    use schooladmin_core::traits::HttpMethod;
    use serde_json::json;

    use crate::test_support::{client, ctx};

    fn daycare() -> Value {
        json!([{
            "id": 5,
            "name": "Daycare",
            "description": "Full day",
            "duration": 180,
            "cost": "1200",
            "advancedBookingEnabled": false,
            "slots": [
                {"id": 21, "slotName": "12:00 PM - 3:00 PM", "price": "300", "isActive": true},
                {"id": 20, "slotName": "9:00 AM - 12:00 PM", "price": 250, "isActive": true}
            ]
        }])
    }

    #[tokio::test]
    async fn test_list_tolerates_non_array_body() {
        let (mock, api) = client();
        mock.on(HttpMethod::Get, "/schools/1/services", 200, json!({"message": "none"}));
        let services = CatalogService::new(api).list(&ctx()).await.unwrap();
        assert!(services.is_empty());
    }

    #[tokio::test]
    async fn test_create_sends_every_bucket_price() {
        let (mock, api) = client();
        mock.on(HttpMethod::Post, "/schools/1/service", 201, json!({"id": 6}));
        let draft = ServiceDraft {
            name: " Weekend care ".into(),
            cost: 900.0,
            ..Default::default()
        };

        CatalogService::new(api)
            .create(&ctx(), draft, &[(TimeBucket::Evening, 150.5)])
            .await
            .unwrap();

        let body = mock.requests()[0].json_body().cloned().unwrap();
        assert_eq!(body["name"], "Weekend care");
        assert_eq!(body["duration"], 180);
        assert_eq!(body["schoolId"], 1);
        assert_eq!(body["slotPrices"]["6:00 PM - 9:00 PM"], "150.5");
        assert_eq!(body["slotPrices"]["9:00 AM - 12:00 PM"], "0");
    }

    #[tokio::test]
    async fn test_create_requires_name() {
        let (mock, api) = client();
        let err = CatalogService::new(api)
            .create(&ctx(), ServiceDraft::default(), &[])
            .await
            .unwrap_err();
        assert_eq!(err.message, "Service name is required");
        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test]
    async fn test_update_merges_changes_into_current_values() {
        let (mock, api) = client();
        mock.on(HttpMethod::Get, "/schools/1/services", 200, daycare());
        mock.on(HttpMethod::Put, "/schools/service/5", 200, json!({"message": "ok"}));
        let changes = ServiceChanges {
            cost: Some(1500.0),
            prices: vec![(TimeBucket::Morning, 275.0)],
            active: vec![(TimeBucket::Midday, false)],
            ..Default::default()
        };

        CatalogService::new(api)
            .update(&ctx(), ServiceId(5), &changes)
            .await
            .unwrap();

        let put = mock.requests_to(HttpMethod::Put, "/schools/service/5");
        let body = put[0].json_body().cloned().unwrap();
        assert_eq!(body["name"], "Daycare");
        assert_eq!(body["cost"], 1500.0);
        assert_eq!(body["slotUpdates"][0]["id"], 20);
        assert_eq!(body["slotUpdates"][0]["price"], "275");
        assert_eq!(body["slotUpdates"][1]["isActive"], false);
    }

    #[tokio::test]
    async fn test_update_unknown_service_is_not_found() {
        let (mock, api) = client();
        mock.on(HttpMethod::Get, "/schools/1/services", 200, daycare());
        let err = CatalogService::new(api)
            .update(&ctx(), ServiceId(99), &ServiceChanges::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert_eq!(mock.request_count(), 1);
    }

    #[tokio::test]
    async fn test_update_rejects_bucket_without_row() {
        let (mock, api) = client();
        mock.on(HttpMethod::Get, "/schools/1/services", 200, daycare());
        let changes = ServiceChanges {
            prices: vec![(TimeBucket::Evening, 10.0)],
            ..Default::default()
        };
        let err = CatalogService::new(api)
            .update(&ctx(), ServiceId(5), &changes)
            .await
            .unwrap_err();
        assert!(err.is_validation());
        assert!(mock.requests_to(HttpMethod::Put, "/schools/service/5").is_empty());
    }
}
