//! Dashboard report generation.
//!
//! Renders the admin dashboard as Markdown or JSON.

pub mod generator;

pub use generator::{generate_json_report, generate_markdown_report};
