//! Utility functions shared across the CLI.

mod discovery;
pub mod ui;

pub use discovery::{catalog_path, discover_locales};
