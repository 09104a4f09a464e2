//! Administrator account entities.

pub mod model;
pub mod profile;
pub mod role;
pub mod wire;

pub use model::User;
pub use profile::ProfileUpdate;
pub use role::UserRole;
pub use wire::{LoginPayload, LoginResponse, MessageResponse, ProfileResponse};
