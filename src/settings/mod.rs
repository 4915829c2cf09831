//! Calculator settings: the active rate configuration and its persistence.
//!
//! Settings are a last-write-wins key-value blob. The pricing engine never
//! reads them directly; callers take a snapshot and pass it in.

pub mod queries;
pub mod routes;
pub mod store;

pub use routes::router;
pub use store::{validate_config, SettingsPatch, SettingsStore};
