//! Machine translation providers.

mod google;

pub use google::{DEFAULT_ENDPOINT, GoogleTranslator};
