//! Booking wire records and the display model derived from them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use schooladmin_core::types::{BookingId, PageRequest};

use super::status::{BookingStatus, PaymentStatus};
use crate::serde_helpers::{lenient_f64, lenient_u32, null_as_empty, optional_date};

/// Parent details captured at booking time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParentSnapshot {
    /// Father's name.
    pub father_name: Option<String>,
    /// Mother's name.
    pub mother_name: Option<String>,
    /// Primary phone number.
    pub primary_contact: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Postal address.
    pub address: Option<String>,
}

/// Child details captured at booking time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChildSnapshot {
    /// Child's name.
    pub name: Option<String>,
    /// Age in years.
    pub age: Option<u32>,
    /// Gender.
    pub gender: Option<String>,
    /// Disability category.
    pub disability_type: Option<String>,
    /// Disability percentage.
    pub disability_percent: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NamedRef {
    #[serde(default, deserialize_with = "null_as_empty")]
    name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SlotRef {
    #[serde(default, deserialize_with = "null_as_empty")]
    slot_name: String,
}

/// One element of the `bookings` array.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRecord {
    #[serde(default)]
    id: Option<BookingId>,
    #[serde(default)]
    booking_id_str: Option<String>,
    #[serde(default, deserialize_with = "optional_date")]
    date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_f64")]
    amount: f64,
    #[serde(default = "unknown_status")]
    status: BookingStatus,
    #[serde(default)]
    payment_status: Option<PaymentStatus>,
    #[serde(default)]
    service: Option<NamedRef>,
    #[serde(default)]
    slot: Option<SlotRef>,
    #[serde(default)]
    parent: Option<ParentSnapshot>,
    #[serde(default)]
    child: Option<ChildSnapshot>,
    #[serde(default)]
    special_requirements: Option<String>,
}

fn unknown_status() -> BookingStatus {
    BookingStatus::Unknown
}

/// Booking as shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// `bookingIdStr`, or `BK-{id}` when absent.
    pub display_id: String,
    /// Numeric id, when sent.
    pub id: Option<BookingId>,
    /// Service name; empty when unknown.
    pub service_name: String,
    /// Session date.
    pub date: Option<NaiveDate>,
    /// Slot label; empty when unknown.
    pub slot_name: String,
    /// Amount charged.
    pub amount: f64,
    /// Lifecycle state.
    pub status: BookingStatus,
    /// Payment state.
    pub payment_status: Option<PaymentStatus>,
    /// Parent snapshot.
    pub parent: ParentSnapshot,
    /// Child snapshot.
    pub child: ChildSnapshot,
    /// Free-text notes.
    pub special_requirements: Option<String>,
}

impl From<BookingRecord> for Booking {
    fn from(record: BookingRecord) -> Self {
        let display_id = match (record.booking_id_str.filter(|s| !s.is_empty()), record.id) {
            (Some(label), _) => label,
            (None, Some(id)) => format!("BK-{id}"),
            (None, None) => "BK-?".to_string(),
        };
        Self {
            display_id,
            id: record.id,
            service_name: record.service.map(|s| s.name).unwrap_or_default(),
            date: record.date,
            slot_name: record.slot.map(|s| s.slot_name).unwrap_or_default(),
            amount: record.amount,
            status: record.status,
            payment_status: record.payment_status,
            parent: record.parent.unwrap_or_default(),
            child: record.child.unwrap_or_default(),
            special_requirements: record.special_requirements,
        }
    }
}

/// Body of `GET /schools/{id}/bookings`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingPageResponse {
    /// Page items.
    #[serde(default)]
    pub bookings: Vec<BookingRecord>,
    /// Total across pages.
    #[serde(default, deserialize_with = "lenient_u32")]
    pub total: u32,
    /// Older spelling of `total`.
    #[serde(default, deserialize_with = "lenient_u32")]
    pub total_bookings: u32,
}

/// One page of bookings with its pagination metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingPage {
    /// Page items.
    pub bookings: Vec<Booking>,
    /// Total across pages.
    pub total: u64,
    /// 1-based page number.
    pub page: u32,
    /// Page size.
    pub limit: u32,
    /// At least one.
    pub total_pages: u64,
}

impl BookingPage {
    /// Map a response using the request that produced it.
    pub fn from_response(response: BookingPageResponse, request: &PageRequest) -> Self {
        let total = if response.total > 0 {
            response.total
        } else {
            response.total_bookings
        };
        let total = u64::from(total);
        Self {
            bookings: response.bookings.into_iter().map(Booking::from).collect(),
            total,
            page: request.page,
            limit: request.limit,
            total_pages: request.total_pages(total),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display_id_fallback() {
        let response: BookingPageResponse = serde_json::from_value(json!({
            "bookings": [
                {"id": 7, "status": "booked", "amount": "450.00"},
                {"id": 8, "bookingIdStr": "BK2025-0008", "status": "completed",
                 "service": {"name": "Speech Therapy"}, "date": "2025-02-10T00:00:00Z"}
            ],
            "totalBookings": 21
        }))
        .unwrap();

        let page = BookingPage::from_response(response, &PageRequest::new(1, 10));
        assert_eq!(page.total, 21);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.bookings[0].display_id, "BK-7");
        assert_eq!(page.bookings[0].amount, 450.0);
        assert_eq!(page.bookings[0].status.to_string(), "upcoming");
        assert_eq!(page.bookings[1].display_id, "BK2025-0008");
        assert_eq!(page.bookings[1].service_name, "Speech Therapy");
        assert_eq!(page.bookings[1].date, NaiveDate::from_ymd_opt(2025, 2, 10));
    }

    #[test]
    fn test_empty_response_has_one_page() {
        let page = BookingPage::from_response(BookingPageResponse::default(), &PageRequest::default());
        assert!(page.bookings.is_empty());
        assert_eq!(page.total_pages, 1);
    }
}
