//! Per-call context naming the acting administrator and their school.

use serde::Serialize;

use schooladmin_auth::SessionManager;
use schooladmin_core::error::AppError;
use schooladmin_core::result::AppResult;
use schooladmin_core::types::{SchoolId, UserId};

/// Who is acting, and on which school.
///
/// Resolved from the [`SessionManager`] once per command so that every
/// service call is gated on a usable dashboard session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminContext {
    /// The signed-in administrator.
    pub user_id: UserId,
    /// The school they manage.
    pub school_id: SchoolId,
    /// Display name, for log lines and greetings.
    pub name: String,
}

impl AdminContext {
    /// Creates a context.
    pub fn new(user_id: UserId, school_id: SchoolId, name: impl Into<String>) -> Self {
        Self {
            user_id,
            school_id,
            name: name.into(),
        }
    }

    /// Context for the current session; fails unless the dashboard is usable.
    pub async fn from_session(session: &SessionManager) -> AppResult<Self> {
        let user = session.require_dashboard().await?;
        let school_id = user
            .school_id
            .ok_or_else(|| AppError::session("This account is not linked to a school"))?;
        Ok(Self::new(user.id, school_id, user.name))
    }

    /// `/schools/{id}` prefix for school-scoped endpoints.
    pub fn school_path(&self, suffix: &str) -> String {
        format!("/schools/{}{}", self.school_id, suffix)
    }
}
