//! Integration tests for the bookings table and statistics.

mod helpers;

use serde_json::json;

use schooladmin_core::error::ErrorKind;
use schooladmin_core::traits::HttpMethod;
use schooladmin_core::types::{PageRequest, ServiceId};
use schooladmin_entity::booking::BookingTab;
use schooladmin_entity::stats::StatsFilter;

use helpers::TestApp;

#[tokio::test]
async fn test_bookings_page_uses_tab_and_paging() {
    let t = TestApp::logged_in().await;
    t.mock.on(
        HttpMethod::Get,
        "/schools/1/bookings",
        200,
        json!({
            "bookings": [{
                "id": 301,
                "bookingIdStr": "BK-301",
                "date": "2099-05-02T00:00:00.000Z",
                "amount": "450",
                "status": "booked",
                "service": {"name": "Daycare"},
                "slot": {"slotName": "9:00 AM - 12:00 PM"},
                "child": {"name": "Ira"}
            }],
            "total": 21
        }),
    );
    let ctx = t.app.context().await.unwrap();

    let page = t
        .app
        .dashboard
        .bookings(&ctx, PageRequest::new(2, 10), BookingTab::Upcoming)
        .await
        .unwrap();

    assert_eq!(page.total, 21);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.bookings[0].display_id, "BK-301");
    assert_eq!(page.bookings[0].amount, 450.0);

    let request = &t.mock.requests_to(HttpMethod::Get, "/schools/1/bookings")[0];
    assert_eq!(request.query_value("page"), Some("2"));
    assert_eq!(request.query_value("limit"), Some("10"));
    assert_eq!(request.query_value("status"), Some("upcoming"));
}

#[tokio::test]
async fn test_stats_and_revenue_filters() {
    let t = TestApp::logged_in().await;
    t.mock.on(
        HttpMethod::Get,
        "/schools/1/stats",
        200,
        json!({"totalBookings": 12, "upcomingCount": 4, "chartData": [{"name": "Jan", "bookings": 12}]}),
    );
    t.mock.on(HttpMethod::Get, "/schools/1/revenue", 200, json!({"error": "not ready"}));
    let ctx = t.app.context().await.unwrap();
    let filter = StatsFilter {
        service: Some(ServiceId(5)),
        year: Some(2099),
        month: None,
        status: Some("completed".to_string()),
    };

    let summary = t.app.dashboard.stats(&ctx, &filter).await.unwrap();
    assert_eq!(summary.total_bookings, 12);
    assert_eq!(summary.chart[0].name, "Jan");

    let revenue = t.app.dashboard.revenue(&ctx, &filter).await.unwrap();
    assert!(revenue.is_empty());

    let stats_req = &t.mock.requests_to(HttpMethod::Get, "/schools/1/stats")[0];
    assert_eq!(stats_req.query_value("status"), Some("completed"));
    let revenue_req = &t.mock.requests_to(HttpMethod::Get, "/schools/1/revenue")[0];
    assert_eq!(revenue_req.query_value("year"), Some("2099"));
    assert_eq!(revenue_req.query_value("status"), None);
}

#[tokio::test]
async fn test_expired_token_surfaces_as_authentication_error() {
    let t = TestApp::logged_in().await;
    t.mock.on(
        HttpMethod::Get,
        "/schools/1/stats",
        401,
        json!({"message": "Token expired"}),
    );
    let ctx = t.app.context().await.unwrap();

    let err = t
        .app
        .dashboard
        .stats(&ctx, &StatsFilter::default())
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authentication);
    assert_eq!(err.message, "Token expired");
}
