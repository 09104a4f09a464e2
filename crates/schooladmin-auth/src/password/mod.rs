//! Password checks performed locally before a change request is sent.

pub mod policy;

pub use policy::PasswordPolicy;
