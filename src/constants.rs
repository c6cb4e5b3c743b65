//! Application-wide constants.
//!
//! All magic strings are defined here to ensure consistency and make
//! changes easy to track.

/// Application name used for config directories and user-facing messages.
pub const APP_NAME: &str = "tgprep";

/// TextGrid file extension, matched exactly (case-sensitive).
pub const TEXTGRID_EXTENSION: &str = ".TextGrid";

/// Audio file extension scanned by the seed command, matched exactly.
pub const WAV_EXTENSION: &str = ".wav";

/// Default CSV field delimiter.
pub const DEFAULT_DELIMITER: u8 = b';';

/// Default output directory names.
pub mod output_dirs {
    /// Directory for generated TextGrids, created beside the input CSV
    /// or under the audio directory.
    pub const GENERATED: &str = "textgrids";
    /// Directory for restructured TextGrids, created under the input
    /// directory.
    pub const MODIFIED: &str = "modified_textgrids";
}

/// Fixed tier names used by the prosodic annotation layout.
pub mod tiers {
    /// Word tier produced by the forced aligner.
    pub const WORD: &str = "word";
    /// Phone tier produced by the forced aligner.
    pub const PHONE: &str = "phone";
    /// Manual stress annotation point tier.
    pub const STRESS: &str = "stress (S|SS|0)";
    /// Prosodic unit tier derived from the word tier.
    pub const PROSODIC_UNIT: &str = "prosodic unit";
    /// Manual emphasis annotation point tier.
    pub const EMPHASIS: &str = "emphasis (E)";
    /// Trial-number tier joined in from CSV data.
    pub const UNIQUENUMB: &str = "uniquenumb";
    /// Realization (transcription) tier.
    pub const REALIZATION: &str = "realization";
    /// Machine translation of the realization tier.
    pub const TRANSLATION: &str = "translation";
    /// Free-form comment tier.
    pub const COMMENT: &str = "comment";
    /// Suffix the forced aligner appends to its phone tier.
    pub const ALIGNER_PHONE_SUFFIX: &str = " - phone";
    /// Suffix the forced aligner appends to its word tier.
    pub const ALIGNER_WORD_SUFFIX: &str = " - word";
    /// Suffix the forced aligner appends to its transcript tier.
    pub const ALIGNER_TRANS_SUFFIX: &str = " - trans";
}

/// Default CSV column names.
pub mod columns {
    /// Participant (informant) key column.
    pub const PARTICIPANT: &str = "participant";
    /// Source audio file name column.
    pub const AUDIO_FILENAME: &str = "audio_filename";
    /// Interval start time column (seconds).
    pub const START_TIME: &str = "start_time";
    /// Interval end time column (seconds).
    pub const END_TIME: &str = "end_time";
    /// Audio duration column (seconds), used when no explicit end time
    /// is available.
    pub const DURATION: &str = "duration";
    /// Response label column used by the generate command.
    pub const RESPONSE: &str = "response";
    /// Realization label column used by the seed command.
    pub const REALIZATION: &str = "realization";
    /// Trial-number column joined into the uniquenumb tier.
    pub const UNIQUENUMB: &str = "uniquenumb";
}

/// Default tier name for TextGrids generated from response CSV data.
pub const DEFAULT_GENERATE_TIER: &str = "response";

/// Label separator used when overlapping intervals are merged.
pub const MERGE_LABEL_SEPARATOR: &str = "-";

/// Default source language for realization translation.
pub const DEFAULT_SOURCE_LANG: &str = "no";

/// Default target language for realization translation.
pub const DEFAULT_TARGET_LANG: &str = "en";
