//! Statistics over survey responses.
//!
//! The aggregation engine turns the raw response list into per-question
//! descriptive statistics for the admin dashboard.

pub mod aggregator;

pub use aggregator::*;
