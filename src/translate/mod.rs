//! Translation of tier labels.
//!
//! The batch drivers call a [`Translator`] synchronously, once per
//! non-empty label. Translation is explicit configuration: the identity
//! translator is used unless the user opts into the remote backend.

use std::time::Duration;

use crate::error::{Error, Result};

/// Google Translate endpoint used by the remote backend.
const TRANSLATE_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";

/// Request timeout for translation calls.
const TRANSLATE_TIMEOUT: Duration = Duration::from_secs(30);

/// A synchronous text translation service.
pub trait Translator {
    /// Translate `text` from `source_lang` to `target_lang`.
    ///
    /// Empty input must translate to an empty string without a remote
    /// call.
    fn translate(&self, text: &str, source_lang: &str, target_lang: &str) -> Result<String>;
}

/// Translator that returns its input unchanged.
///
/// Used when translation is disabled, so the translation tier is a
/// plain copy of its source tier.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityTranslator;

impl Translator for IdentityTranslator {
    fn translate(&self, text: &str, _source_lang: &str, _target_lang: &str) -> Result<String> {
        Ok(text.to_string())
    }
}

/// Translator backed by the public Google Translate endpoint.
pub struct GoogleTranslator {
    client: reqwest::blocking::Client,
}

impl GoogleTranslator {
    /// Build a translator with a default HTTP client.
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(TRANSLATE_TIMEOUT)
            .build()
            .map_err(|e| Error::Translation {
                reason: format!("failed to build HTTP client: {e}"),
            })?;
        Ok(Self { client })
    }
}

impl Translator for GoogleTranslator {
    fn translate(&self, text: &str, source_lang: &str, target_lang: &str) -> Result<String> {
        if text.is_empty() {
            return Ok(String::new());
        }

        let response = self
            .client
            .get(TRANSLATE_ENDPOINT)
            .query(&[
                ("client", "gtx"),
                ("sl", source_lang),
                ("tl", target_lang),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .map_err(|e| Error::Translation {
                reason: e.to_string(),
            })?;

        let body: serde_json::Value = response.json().map_err(|e| Error::Translation {
            reason: format!("invalid response body: {e}"),
        })?;

        parse_translation_body(&body).ok_or_else(|| Error::Translation {
            reason: "unexpected response shape".to_string(),
        })
    }
}

/// Extract the translated text from the endpoint's response.
///
/// The body is a nested array whose first element lists translated
/// segments as `[translated, original, ...]` pairs; segments are
/// concatenated in order.
fn parse_translation_body(body: &serde_json::Value) -> Option<String> {
    let segments = body.as_array()?.first()?.as_array()?;
    let mut out = String::new();
    for segment in segments {
        out.push_str(segment.as_array()?.first()?.as_str()?);
    }
    Some(out)
}
