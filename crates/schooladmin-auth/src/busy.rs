//! Single-flight guard for operator actions.

use std::sync::atomic::{AtomicBool, Ordering};

use schooladmin_core::error::AppError;

/// Rejects a second submission of the same action while one is in flight.
/// Unrelated actions use separate flags and are never serialized.
#[derive(Debug, Default)]
pub struct BusyFlag {
    busy: AtomicBool,
}

impl BusyFlag {
    /// An idle flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the action as running until the guard drops.
    pub fn try_acquire(&self, action: &str) -> Result<BusyGuard<'_>, AppError> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| AppError::conflict(format!("{action} is already in progress")))?;
        Ok(BusyGuard { flag: &self.busy })
    }

    /// Whether an action currently holds the flag.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// Clears its flag on drop, including on early return and error paths.
#[derive(Debug)]
pub struct BusyGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schooladmin_core::error::ErrorKind;

    #[test]
    fn test_second_acquire_conflicts_until_release() {
        let flag = BusyFlag::new();
        let guard = flag.try_acquire("Login").unwrap();
        assert!(flag.is_busy());

        let err = flag.try_acquire("Login").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
        assert_eq!(err.message, "Login is already in progress");

        drop(guard);
        assert!(!flag.is_busy());
        assert!(flag.try_acquire("Login").is_ok());
    }
}
