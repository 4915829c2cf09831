//! Pricing engine module for borewell quotations.
//!
//! `slab` builds the depth tier table, `calculators` turns one input and one
//! rate config into an itemized quote. Both are pure; everything async lives
//! in `services` and `routes`.

pub mod calculators;
pub mod errors;
pub mod models;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod services;
pub mod slab;

// Re-export commonly used items
pub use calculators::{compute, compute_drilling_cost, round_money};
pub use errors::{ConfigError, QuoteError, ValidationError};
pub use models::{DrillingMode, QuoteInput, QuoteResult, RateConfig, SlabTier};
pub use routes::router;
pub use services::SavedQuote;
