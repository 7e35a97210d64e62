//! Configuration management for Dynamic Third Person
//!
//! - **schema**: the JSON file format and its defaults
//! - **version**: numeric schema version ordering
//! - **store**: load/migrate/save against the config file
//! - **camera**: typed camera parameters parsed from the string-encoded file values

pub mod camera;
pub mod schema;
pub mod store;
pub mod version;

// Re-export commonly used types
pub use camera::CameraSettings;
pub use schema::{Configuration, ThirdPersonMode};
pub use store::{ConfigStore, LoadOutcome};
