//! Integration tests for schedule creation and per-date availability edits.

mod helpers;

use chrono::NaiveDate;
use serde_json::json;

use schooladmin_core::config::AppConfig;
use schooladmin_core::error::ErrorKind;
use schooladmin_core::traits::HttpMethod;
use schooladmin_core::types::{ServiceId, SlotId};
use schooladmin_entity::slot::{TimeBucket, Weekday, WeekdaySet};
use schooladmin_service::{AvailabilityEdit, ScheduleRequest, SlotSelector};

use helpers::TestApp;

const SLOTS: &str = "/schools/1/slots";
const AVAILABILITY: &str = "/schools/1/slots/availability";

fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2099, month, day).unwrap()
}

fn request(t: &TestApp) -> ScheduleRequest {
    ScheduleRequest::new(ServiceId(5), date(3, 1), date(3, 14), &t.app.config.scheduling)
}

#[tokio::test]
async fn test_schedule_requires_permanent_password() {
    let t = TestApp::new().await;
    t.script_login(true);
    t.app.session.login("principal", "initial1").await.unwrap();

    let err = t.app.context().await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Session);
    assert_eq!(t.mock.requests_to(HttpMethod::Post, SLOTS).len(), 0);
}

#[tokio::test]
async fn test_full_schedule_creates_one_slot_per_bucket() {
    let t = TestApp::logged_in().await;
    t.mock.on(HttpMethod::Post, SLOTS, 201, json!({"id": 100}));
    let ctx = t.app.context().await.unwrap();

    let outcome = t
        .app
        .schedule
        .create(&ctx, &request(&t).with_capacity(TimeBucket::Evening, 0))
        .await
        .unwrap()
        .into_result()
        .unwrap();

    assert_eq!(outcome.created.len(), 3);
    assert_eq!(outcome.skipped, vec![TimeBucket::Evening]);
    let posts = t.mock.requests_to(HttpMethod::Post, SLOTS);
    assert_eq!(posts.len(), 3);
    let body = posts[0].json_body().cloned().unwrap();
    assert_eq!(body["serviceId"], 5);
    assert_eq!(body["fromDate"], "2099-03-01");
    assert_eq!(body["endDate"], "2099-03-14");
    assert_eq!(body["weekdays"], json!(["Mon", "Tue", "Wed", "Thu", "Fri"]));
}

#[tokio::test]
async fn test_partial_failure_rolls_back_created_slots() {
    let t = TestApp::logged_in().await;
    t.mock.on_when(
        HttpMethod::Post,
        SLOTS,
        |req| {
            req.json_body()
                .and_then(|b| b["startTime"].as_str())
                .is_some_and(|s| s == "15:00")
        },
        400,
        json!({"message": "Slot overlaps an existing slot"}),
    );
    t.mock.on(HttpMethod::Post, SLOTS, 201, json!({"id": 7}));
    t.mock.on(HttpMethod::Delete, "/schools/slots/7", 200, json!({}));
    let ctx = t.app.context().await.unwrap();

    let outcome = t.app.schedule.create(&ctx, &request(&t)).await.unwrap();
    assert!(!outcome.is_complete());
    assert_eq!(outcome.failed.len(), 1);
    assert_eq!(outcome.failed[0].bucket, TimeBucket::Afternoon);
    assert_eq!(outcome.rolled_back.len(), 3);
    assert!(outcome.remaining().is_empty());

    let err = outcome.into_result().unwrap_err();
    assert!(err.message.starts_with("Slot overlaps an existing slot"));
    assert!(err.message.contains("1 of 4 buckets failed"));
}

#[tokio::test]
async fn test_rollback_can_be_disabled() {
    let mut config = AppConfig::default();
    config.scheduling.rollback_on_partial_failure = false;
    let t = TestApp::with_config(config).await;
    t.script_login(false);
    t.app.session.login("principal", "secret123").await.unwrap();

    t.mock.on_when(
        HttpMethod::Post,
        SLOTS,
        |req| {
            req.json_body()
                .and_then(|b| b["startTime"].as_str())
                .is_some_and(|s| s == "09:00")
        },
        500,
        json!({"message": "boom"}),
    );
    t.mock.on(HttpMethod::Post, SLOTS, 201, json!({"id": 8}));
    let ctx = t.app.context().await.unwrap();

    let outcome = t.app.schedule.create(&ctx, &request(&t)).await.unwrap();
    assert_eq!(outcome.remaining().len(), 3);
    assert_eq!(t.mock.requests_to(HttpMethod::Delete, "/schools/slots/8").len(), 0);
}

#[tokio::test]
async fn test_invalid_schedule_input_makes_no_calls() {
    let t = TestApp::logged_in().await;
    let ctx = t.app.context().await.unwrap();
    let before = t.mock.request_count();

    let reversed = ScheduleRequest::new(ServiceId(5), date(3, 14), date(3, 1), &t.app.config.scheduling);
    assert!(t.app.schedule.create(&ctx, &reversed).await.unwrap_err().is_validation());

    let too_long = ScheduleRequest::new(ServiceId(5), date(3, 1), date(5, 1), &t.app.config.scheduling);
    assert!(t.app.schedule.create(&ctx, &too_long).await.unwrap_err().is_validation());

    let no_days = request(&t).with_weekdays(WeekdaySet::empty());
    let err = t.app.schedule.create(&ctx, &no_days).await.unwrap_err();
    assert_eq!(err.message, "Please select at least one weekday to create a schedule");

    assert_eq!(t.mock.request_count(), before);
}

#[tokio::test]
async fn test_weekend_schedule_sends_selected_days() {
    let t = TestApp::logged_in().await;
    t.mock.on(HttpMethod::Post, SLOTS, 201, json!({"slot": {"id": 3}}));
    let ctx = t.app.context().await.unwrap();

    let weekend: WeekdaySet = [Weekday::Sat, Weekday::Sun].into_iter().collect();
    t.app
        .schedule
        .create(&ctx, &request(&t).with_weekdays(weekend))
        .await
        .unwrap();

    let body = t.mock.requests_to(HttpMethod::Post, SLOTS)[0]
        .json_body()
        .cloned()
        .unwrap();
    assert_eq!(body["weekdays"], json!(["Sat", "Sun"]));
}

#[tokio::test]
async fn test_availability_edit_over_range() {
    let t = TestApp::logged_in().await;
    t.mock.on(
        HttpMethod::Get,
        AVAILABILITY,
        200,
        json!([
            {"id": 21, "startTime": "09:00", "endTime": "12:00", "currentCapacity": 15, "bookedCount": 6, "available": 9},
            {"id": 22, "startTime": "12:00", "endTime": "15:00", "currentCapacity": 15, "bookedCount": 0, "available": 15}
        ]),
    );
    t.mock.on(HttpMethod::Put, AVAILABILITY, 200, json!({"message": "Updated"}));
    let ctx = t.app.context().await.unwrap();
    let edit = AvailabilityEdit::range(ServiceId(5), date(4, 1), date(4, 10));

    let err = t
        .app
        .availability
        .set_capacity(&ctx, &edit, SlotSelector::Bucket(TimeBucket::Morning), 5)
        .await
        .unwrap_err();
    assert!(err.is_validation());

    let err = t
        .app
        .availability
        .cancel(&ctx, &edit, SlotSelector::Id(SlotId(21)))
        .await
        .unwrap_err();
    assert!(err.is_validation());
    assert!(t.mock.requests_to(HttpMethod::Put, AVAILABILITY).is_empty());

    t.app
        .availability
        .cancel(&ctx, &edit, SlotSelector::Bucket(TimeBucket::Midday))
        .await
        .unwrap();
    let body = t.mock.requests_to(HttpMethod::Put, AVAILABILITY)[0]
        .json_body()
        .cloned()
        .unwrap();
    assert_eq!(
        body,
        json!({
            "date": "",
            "updates": [{"slotId": 22, "newCapacity": 0}],
            "fromDate": "2099-04-01",
            "endDate": "2099-04-10"
        })
    );
}

#[tokio::test]
async fn test_availability_rejects_ranges_beyond_limit() {
    let t = TestApp::logged_in().await;
    let ctx = t.app.context().await.unwrap();
    let before = t.mock.request_count();

    let edit = AvailabilityEdit::range(ServiceId(5), date(4, 1), date(6, 1));
    let err = t.app.availability.snapshot(&ctx, &edit).await.unwrap_err();
    assert!(err.is_validation());
    assert_eq!(t.mock.request_count(), before);
}
