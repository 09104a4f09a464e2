//! Session persistence, backend authentication, and the session lifecycle.

pub mod manager;
pub mod service;
pub mod store;

pub use manager::SessionManager;
pub use service::AuthService;
pub use store::SessionStore;
