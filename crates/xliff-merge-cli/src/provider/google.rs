//! Google Cloud Translation (v2) client.
//!
//! One blocking request per unit, no retries. Failures are returned to the
//! merge engine, which falls back to the source text.

use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;
use unic_langid::LanguageIdentifier;
use xliff_merge::{TranslateError, Translator};

/// Translation v2 REST endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://translation.googleapis.com/language/translate/v2";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Longest error body kept in [`TranslateError::Status`].
const MAX_ERROR_BODY: usize = 512;

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    data: TranslationList,
}

#[derive(Debug, Deserialize)]
struct TranslationList {
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Translation {
    translated_text: String,
}

/// Translates units through the Google Translate API.
#[derive(Debug, Clone)]
pub struct GoogleTranslator {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl GoogleTranslator {
    pub fn new(api_key: impl Into<String>) -> Result<Self, TranslateError> {
        Self::with_endpoint(api_key, DEFAULT_ENDPOINT)
    }

    /// Create a client talking to a custom endpoint.
    pub fn with_endpoint(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
    ) -> Result<Self, TranslateError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| TranslateError::Request(err.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        })
    }
}

impl Translator for GoogleTranslator {
    fn translate(&self, text: &str, target_locale: &str) -> Result<String, TranslateError> {
        let target = target_language(target_locale)?;

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .form(&[("q", text), ("target", target.as_str()), ("format", "html")])
            .send()
            .map_err(|err| TranslateError::Request(err.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|err| TranslateError::Request(err.to_string()))?;

        if !status.is_success() {
            return Err(TranslateError::Status {
                code: status.as_u16(),
                body: truncate(body, MAX_ERROR_BODY),
            });
        }

        parse_response(&body)
    }
}

/// Normalize a locale code into the tag sent as `target`.
fn target_language(locale: &str) -> Result<String, TranslateError> {
    locale
        .parse::<LanguageIdentifier>()
        .map(|lang| lang.to_string())
        .map_err(|_| TranslateError::UnsupportedLocale(locale.to_string()))
}

fn parse_response(body: &str) -> Result<String, TranslateError> {
    let response: TranslateResponse = serde_json::from_str(body)
        .map_err(|err| TranslateError::InvalidResponse(err.to_string()))?;

    response
        .data
        .translations
        .into_iter()
        .next()
        .map(|translation| translation.translated_text)
        .ok_or_else(|| TranslateError::InvalidResponse("no translations returned".to_string()))
}

fn truncate(mut body: String, max: usize) -> String {
    if body.len() > max {
        let mut end = max;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        body.truncate(end);
    }
    body
}
