//! Client session entities.

pub mod model;
pub mod phase;

pub use model::{NavigationTarget, SessionSnapshot, StoredSession, TempPassword};
pub use phase::SessionPhase;
