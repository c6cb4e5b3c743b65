//! Configuration type definitions.

use crate::constants::{DEFAULT_SOURCE_LANG, DEFAULT_TARGET_LANG, columns};
use serde::{Deserialize, Serialize};

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default settings.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// CSV column name overrides.
    #[serde(default)]
    pub columns: ColumnsConfig,
}

/// Default processing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// CSV field delimiter (single character).
    pub delimiter: String,

    /// Marker written into the prosodic unit tier for non-empty words.
    /// Unset keeps the word label verbatim.
    pub unit_marker: Option<String>,

    /// Translate the realization tier into the target language.
    pub translate: bool,

    /// Source language code for translation.
    pub source_lang: String,

    /// Target language code for translation.
    pub target_lang: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            delimiter: ";".to_string(),
            unit_marker: None,
            translate: false,
            source_lang: DEFAULT_SOURCE_LANG.to_string(),
            target_lang: DEFAULT_TARGET_LANG.to_string(),
        }
    }
}

/// CSV column names, overridable per corpus.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnsConfig {
    /// Participant (informant) key column.
    pub participant: String,
    /// Source audio file name column.
    pub audio_filename: String,
    /// Interval start time column.
    pub start_time: String,
    /// Interval end time column.
    pub end_time: String,
    /// Audio duration column.
    pub duration: String,
    /// Response label column (generate).
    pub response: String,
    /// Realization label column (seed).
    pub realization: String,
    /// Trial-number column (modify).
    pub uniquenumb: String,
}

impl Default for ColumnsConfig {
    fn default() -> Self {
        Self {
            participant: columns::PARTICIPANT.to_string(),
            audio_filename: columns::AUDIO_FILENAME.to_string(),
            start_time: columns::START_TIME.to_string(),
            end_time: columns::END_TIME.to_string(),
            duration: columns::DURATION.to_string(),
            response: columns::RESPONSE.to_string(),
            realization: columns::REALIZATION.to_string(),
            uniquenumb: columns::UNIQUENUMB.to_string(),
        }
    }
}

impl DefaultsConfig {
    /// The delimiter as a single byte for the CSV reader.
    ///
    /// Falls back to `;` when the configured value is not a single
    /// one-byte character.
    pub fn delimiter_byte(&self) -> u8 {
        let bytes = self.delimiter.as_bytes();
        if bytes.len() == 1 {
            bytes[0]
        } else {
            crate::constants::DEFAULT_DELIMITER
        }
    }
}
