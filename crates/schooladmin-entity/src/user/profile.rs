//! Partial profile update for the signed-in administrator.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::model::User;

/// Fields accepted by `PUT /auth/profile`. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ProfileUpdate {
    /// New display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: Option<String>,
    /// New contact email.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: Option<String>,
}

impl ProfileUpdate {
    /// Whether no field would change.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }

    /// Apply the submitted fields to a local user record.
    pub fn apply_to(&self, user: &User) -> User {
        let mut updated = user.clone();
        if let Some(name) = &self.name {
            updated.name = name.clone();
        }
        if let Some(email) = &self.email {
            updated.email = email.clone();
        }
        updated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schooladmin_core::types::UserId;

    #[test]
    fn test_email_validation() {
        let update = ProfileUpdate {
            name: None,
            email: Some("not-an-email".into()),
        };
        assert!(update.validate().is_err());

        let update = ProfileUpdate {
            name: Some("Asha".into()),
            email: Some("asha@school.in".into()),
        };
        assert!(update.validate().is_ok());
    }

    #[test]
    fn test_serializes_only_present_fields() {
        let update = ProfileUpdate {
            name: Some("Asha".into()),
            email: None,
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({ "name": "Asha" }));
    }

    #[test]
    fn test_apply_to_keeps_other_fields() {
        let user = User {
            id: UserId(1),
            mobile_number: "9876543210".into(),
            name: "Old".into(),
            email: "old@school.in".into(),
            role: Default::default(),
            school_id: None,
            is_first_login: true,
        };
        let update = ProfileUpdate {
            name: Some("New".into()),
            email: None,
        };
        let updated = update.apply_to(&user);
        assert_eq!(updated.name, "New");
        assert_eq!(updated.email, "old@school.in");
        assert!(updated.is_first_login);
    }
}
