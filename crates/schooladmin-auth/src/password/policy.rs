//! Password policy enforcement for new passwords.

use schooladmin_core::config::AuthConfig;
use schooladmin_core::error::AppError;

/// Confirmation and minimum-length rules for a new password.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordPolicy {
    /// Minimum length in characters.
    min_length: usize,
}

impl PasswordPolicy {
    /// Policy with an explicit minimum length.
    pub fn new(min_length: usize) -> Self {
        Self { min_length }
    }

    /// Policy for the first-login reset screen.
    pub fn first_login(config: &AuthConfig) -> Self {
        Self::new(config.reset_password_min_length)
    }

    /// Policy for the account-settings change form.
    pub fn account_change(config: &AuthConfig) -> Self {
        Self::new(config.change_password_min_length)
    }

    /// Minimum length in characters.
    pub fn min_length(&self) -> usize {
        self.min_length
    }

    /// Check the confirmation first, then the length.
    pub fn validate(&self, new_password: &str, confirm: &str) -> Result<(), AppError> {
        if new_password != confirm {
            return Err(AppError::validation("Passwords do not match"));
        }
        if new_password.chars().count() < self.min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters",
                self.min_length
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mismatch_reported_before_length() {
        let policy = PasswordPolicy::new(8);
        let err = policy.validate("short", "other").unwrap_err();
        assert_eq!(err.message, "Passwords do not match");
    }

    #[test]
    fn test_length_boundary() {
        let policy = PasswordPolicy::first_login(&AuthConfig::default());
        assert_eq!(policy.min_length(), 8);
        assert!(policy.validate("1234567", "1234567").unwrap_err().is_validation());
        assert!(policy.validate("12345678", "12345678").is_ok());
    }

    #[test]
    fn test_account_change_allows_six() {
        let policy = PasswordPolicy::account_change(&AuthConfig::default());
        assert!(policy.validate("abcdef", "abcdef").is_ok());
        assert!(policy.validate("abcde", "abcde").is_err());
    }
}
