//! Mapping of `reqwest` failures and backend error bodies into [`AppError`].

use serde_json::Value;

use schooladmin_core::error::{AppError, ErrorKind};

/// Convert a transport-level failure. Status errors never reach here: the
/// transport returns every status as a response.
pub fn map_reqwest_error(err: reqwest::Error) -> AppError {
    let message = if err.is_timeout() {
        "The backend did not respond in time".to_string()
    } else if err.is_connect() {
        "Could not connect to the backend".to_string()
    } else if err.is_builder() {
        format!("Invalid request: {err}")
    } else {
        format!("Network error: {err}")
    };
    let kind = if err.is_builder() {
        ErrorKind::Configuration
    } else {
        ErrorKind::Network
    };
    AppError::with_source(kind, message, err)
}

/// The operator-facing message for a non-success response.
///
/// Prefers the body's `message`, then `error`, then a plain-text body, and
/// finally a generic status line.
pub fn backend_message(status: u16, body: &Value) -> String {
    let field = |name: &str| {
        body.get(name)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };
    field("message")
        .or_else(|| field("error"))
        .or_else(|| {
            body.as_str()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(|| format!("Request failed with status code {status}"))
}

/// Build the error for a non-success response.
pub fn backend_error(status: u16, body: &Value) -> AppError {
    AppError::backend(status, backend_message(status, body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_message_precedence() {
        assert_eq!(
            backend_message(400, &json!({"message": "Slot already exists", "error": "Bad Request"})),
            "Slot already exists"
        );
        assert_eq!(backend_message(500, &json!({"error": "boom"})), "boom");
        assert_eq!(backend_message(502, &json!("Bad gateway")), "Bad gateway");
        assert_eq!(
            backend_message(503, &Value::Null),
            "Request failed with status code 503"
        );
    }

    #[test]
    fn test_backend_error_kind() {
        let err = backend_error(401, &json!({"message": "Invalid credentials"}));
        assert_eq!(err.kind, ErrorKind::Authentication);
        assert_eq!(err.to_string(), "Invalid credentials");
    }
}
