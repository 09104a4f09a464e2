//! Query filters shared by the stats and revenue endpoints.

use serde::Serialize;

use schooladmin_core::types::ServiceId;

/// Optional chart filters; unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatsFilter {
    pub service: Option<ServiceId>,
    pub year: Option<i32>,
    /// 1 to 12.
    pub month: Option<u32>,
    /// Booking status; ignored by the revenue endpoint.
    pub status: Option<String>,
}

impl StatsFilter {
    /// Render the set fields as query pairs.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(service) = self.service {
            pairs.push(("service".to_string(), service.to_string()));
        }
        if let Some(year) = self.year {
            pairs.push(("year".to_string(), year.to_string()));
        }
        if let Some(month) = self.month {
            pairs.push(("month".to_string(), month.to_string()));
        }
        if let Some(status) = self.status.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("status".to_string(), status.to_string()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_set_fields_are_sent() {
        assert!(StatsFilter::default().to_query().is_empty());
        let filter = StatsFilter {
            year: Some(2025),
            status: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(filter.to_query(), vec![("year".to_string(), "2025".to_string())]);
    }
}
