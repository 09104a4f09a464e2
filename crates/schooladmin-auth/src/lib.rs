//! # schooladmin-auth
//!
//! Everything between the operator and a usable session.
//!
//! ## Modules
//!
//! - `store`: durable key-value backends (JSON file, in-memory)
//! - `session`: the session store, the auth service, and the session manager
//! - `password`: password policy checks run before any network call
//! - `busy`: single-flight guard for in-flight actions

pub mod busy;
pub mod password;
pub mod session;
pub mod store;

pub use busy::{BusyFlag, BusyGuard};
pub use password::PasswordPolicy;
pub use session::{AuthService, SessionManager, SessionStore};
pub use store::{FileKeyValueStore, MemoryKeyValueStore};
