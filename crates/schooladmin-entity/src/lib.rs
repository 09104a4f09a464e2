//! # schooladmin-entity
//!
//! Domain models for the school admin console together with the backend
//! wire payloads they are mapped from. Every mapping from a wire type to a
//! model is a total function with its defaults spelled out.

pub mod booking;
pub mod catalog;
pub mod preference;
pub mod school;
pub mod serde_helpers;
pub mod session;
pub mod slot;
pub mod stats;
pub mod user;
