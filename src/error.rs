//! Error types for tgprep.

/// Result type alias for tgprep operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for tgprep.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration directory could not be determined.
    #[error("could not determine configuration directory for this platform")]
    ConfigDirNotFound,

    /// Failed to read configuration file.
    #[error("failed to read config file '{path}'")]
    ConfigRead {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}'")]
    ConfigParse {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// Failed to write configuration file.
    #[error("failed to write config file '{path}'")]
    ConfigWrite {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize configuration.
    #[error("failed to serialize config")]
    ConfigSerialize {
        /// Underlying serialization error.
        #[source]
        source: toml::ser::Error,
    },

    /// Failed to read a CSV input file.
    #[error("failed to read CSV file '{path}'")]
    CsvRead {
        /// Path to the CSV file.
        path: std::path::PathBuf,
        /// Underlying error.
        #[source]
        source: csv::Error,
    },

    /// A CSV record could not be decoded.
    #[error("invalid CSV record in '{path}': {message}")]
    CsvRecord {
        /// Path to the CSV file.
        path: std::path::PathBuf,
        /// Description of the decode failure.
        message: String,
    },

    /// A required CSV column is absent.
    #[error("CSV file '{path}' has no '{column}' column")]
    ColumnMissing {
        /// Path to the CSV file.
        path: std::path::PathBuf,
        /// Name of the missing column.
        column: String,
    },

    /// A CSV row has no value for a required column.
    #[error("missing value for column '{column}' (line {line})")]
    FieldMissing {
        /// Name of the column.
        column: String,
        /// 1-based line number including the header.
        line: usize,
    },

    /// A numeric CSV field could not be parsed.
    #[error("invalid number '{value}' in column '{column}' (line {line})")]
    InvalidNumber {
        /// The unparseable value.
        value: String,
        /// Column the value came from.
        column: String,
        /// 1-based line number including the header.
        line: usize,
    },

    /// Failed to read a TextGrid file.
    #[error("failed to read TextGrid '{path}'")]
    TextGridRead {
        /// Path to the TextGrid file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A TextGrid file is malformed.
    #[error("failed to parse TextGrid '{path}': {message}")]
    TextGridParse {
        /// Path to the TextGrid file.
        path: std::path::PathBuf,
        /// Description of the parse failure.
        message: String,
    },

    /// Failed to write a TextGrid file.
    #[error("failed to write TextGrid '{path}'")]
    TextGridWrite {
        /// Path to the TextGrid file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A referenced tier does not exist in the document.
    #[error("tier '{name}' not found in TextGrid")]
    TierNotFound {
        /// Name of the missing tier.
        name: String,
    },

    /// A tier has the wrong kind for the requested operation.
    #[error("tier '{name}' is not an {expected} tier")]
    TierKind {
        /// Name of the tier.
        name: String,
        /// Expected tier kind.
        expected: String,
    },

    /// A tier with this name already exists in the document.
    #[error("tier '{name}' already exists in TextGrid")]
    DuplicateTier {
        /// Name of the colliding tier.
        name: String,
    },

    /// An interval entry has invalid bounds.
    #[error("invalid interval ({start}, {end}): end must not precede start")]
    InvalidInterval {
        /// Interval start time.
        start: f64,
        /// Interval end time.
        end: f64,
    },

    /// Failed to open an audio file for duration probing.
    #[error("failed to open audio file '{path}'")]
    AudioOpen {
        /// Path to the audio file.
        path: std::path::PathBuf,
        /// Underlying error.
        #[source]
        source: hound::Error,
    },

    /// Failed to create output directory.
    #[error("failed to create output directory '{path}'")]
    OutputDirCreate {
        /// Path to the output directory.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// No matching input files were found.
    #[error("no files with extension '{extension}' found in '{path}'")]
    NoInputFiles {
        /// Directory that was scanned.
        path: std::path::PathBuf,
        /// Extension that was looked for.
        extension: String,
    },

    /// A participant key could not be derived from a file name.
    #[error("cannot derive participant key from file name '{file_name}'")]
    InvalidParticipantKey {
        /// The offending file name.
        file_name: String,
    },

    /// Translation service call failed.
    #[error("translation failed: {reason}")]
    Translation {
        /// Description of the failure.
        reason: String,
    },
}
