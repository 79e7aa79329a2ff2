//! Core types, errors, and shared functionality.

mod errors;
mod settings;

pub use errors::*;
pub use settings::*;
