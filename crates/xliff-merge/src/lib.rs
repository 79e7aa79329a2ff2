#![doc = include_str!("../README.md")]

mod error;
pub mod merge;
pub mod model;
pub mod translate;
pub mod xliff;

pub use error::XliffError;
pub use merge::{MergeOutcome, MergeStats, merge, passthrough};
pub use model::{Catalog, FileGroup, State, Unit};
pub use translate::{FnTranslator, TranslateError, Translator};
