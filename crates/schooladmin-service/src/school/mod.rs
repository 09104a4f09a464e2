//! School profile: details, location, and images.

pub mod images;
pub mod service;

pub use images::ImageUpload;
pub use service::SchoolService;
