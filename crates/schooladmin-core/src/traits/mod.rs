//! Core traits defined in `schooladmin-core` and implemented by other crates.

pub mod kv_store;
pub mod transport;

pub use kv_store::KeyValueStore;
pub use transport::{
    ApiRequest, ApiResponse, HttpMethod, HttpTransport, RequestBody, TokenProvider, UploadPart,
};
