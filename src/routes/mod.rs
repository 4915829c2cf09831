//! HTML and share routes

pub mod quotes;
