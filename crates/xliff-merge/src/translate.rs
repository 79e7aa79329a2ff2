//! The machine translation capability consumed by the merge engine.

use thiserror::Error;

/// Errors a [`Translator`] can report. The merge engine never propagates them.
#[derive(Debug, Error)]
pub enum TranslateError {
    /// The request could not be sent or the response could not be read.
    #[error("translation request failed: {0}")]
    Request(String),
    /// The service answered with a non-success status.
    #[error("translation service returned status {code}: {body}")]
    Status {
        /// HTTP status code.
        code: u16,
        /// Response body, possibly truncated.
        body: String,
    },
    /// The service answered but the payload had no usable translation.
    #[error("invalid translation response: {0}")]
    InvalidResponse(String),
    /// The target locale is not a valid language identifier.
    #[error("unsupported target locale '{0}'")]
    UnsupportedLocale(String),
}

/// Translates source text into a target locale.
pub trait Translator {
    /// Translate `text` into `target_locale`.
    fn translate(&self, text: &str, target_locale: &str) -> Result<String, TranslateError>;
}

impl<T: Translator + ?Sized> Translator for &T {
    fn translate(&self, text: &str, target_locale: &str) -> Result<String, TranslateError> {
        (**self).translate(text, target_locale)
    }
}

impl<T: Translator + ?Sized> Translator for Box<T> {
    fn translate(&self, text: &str, target_locale: &str) -> Result<String, TranslateError> {
        (**self).translate(text, target_locale)
    }
}

/// Adapts a closure into a [`Translator`].
pub struct FnTranslator<F>(F);

impl<F> FnTranslator<F>
where
    F: Fn(&str, &str) -> Result<String, TranslateError>,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> Translator for FnTranslator<F>
where
    F: Fn(&str, &str) -> Result<String, TranslateError>,
{
    fn translate(&self, text: &str, target_locale: &str) -> Result<String, TranslateError> {
        (self.0)(text, target_locale)
    }
}
