//! # schooladmin-http
//!
//! The wire layer of the console: a `reqwest`-backed [`HttpTransport`]
//! implementation and the [`ApiClient`] every service talks through.
//!
//! [`HttpTransport`]: schooladmin_core::traits::HttpTransport

pub mod client;
pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod transport;

pub use client::ApiClient;
pub use transport::ReqwestTransport;
