//! CLI argument definitions.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// TextGrid preparation for forced alignment and prosodic annotation.
#[derive(Debug, Parser)]
#[command(name = "tgprep")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Logging options shared by all subcommands.
    #[command(flatten)]
    pub logging: LoggingArgs,
}

/// Global logging options.
#[derive(Debug, Args)]
pub struct LoggingArgs {
    /// Suppress progress output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase verbosity (-v: debug, -vv: trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate TextGrids from a CSV of time-aligned responses, one per
    /// participant.
    Generate(GenerateArgs),
    /// Seed TextGrids for a directory of audio recordings, using each
    /// file's duration as the global time bound.
    Seed(SeedArgs),
    /// Restructure force-aligned TextGrids into the prosodic annotation
    /// tier layout.
    Modify(ModifyArgs),
    /// Manage configuration.
    Config {
        /// Configuration action to perform.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommand actions.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigAction {
    /// Create default configuration file.
    Init,
    /// Display current configuration.
    Show,
    /// Print configuration file path.
    Path,
}

/// Arguments for the generate command.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// CSV file with participant, time, and response columns.
    pub csv: PathBuf,

    /// Output directory (default: `textgrids/` beside the CSV).
    #[arg(short, long, env = "TGPREP_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// CSV field delimiter.
    #[arg(short, long, env = "TGPREP_DELIMITER")]
    pub delimiter: Option<char>,

    /// Name of the generated interval tier.
    #[arg(long)]
    pub tier: Option<String>,

    /// Column holding the interval label.
    #[arg(long)]
    pub label_column: Option<String>,
}

/// Arguments for the seed command.
#[derive(Debug, Args)]
pub struct SeedArgs {
    /// CSV file with audio file name, participant, duration, and label
    /// columns.
    pub csv: PathBuf,

    /// Directory scanned (non-recursively) for `.wav` files.
    pub audio_dir: PathBuf,

    /// Output directory (default: `textgrids/` under the audio directory).
    #[arg(short, long, env = "TGPREP_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// CSV field delimiter.
    #[arg(short, long, env = "TGPREP_DELIMITER")]
    pub delimiter: Option<char>,

    /// Column holding the interval label.
    #[arg(long)]
    pub label_column: Option<String>,
}

/// Arguments for the modify command.
#[derive(Debug, Args)]
pub struct ModifyArgs {
    /// Directory scanned (non-recursively) for `.TextGrid` files.
    pub input_dir: PathBuf,

    /// Output directory (default: `modified_textgrids/` under the input
    /// directory).
    #[arg(short, long, env = "TGPREP_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// CSV file with per-trial values for the uniquenumb tier.
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// CSV field delimiter.
    #[arg(short, long, env = "TGPREP_DELIMITER")]
    pub delimiter: Option<char>,

    /// Marker for non-empty prosodic unit entries (e.g. `σ`); word
    /// labels are kept verbatim when unset.
    #[arg(long, env = "TGPREP_UNIT_MARKER")]
    pub unit_marker: Option<String>,

    /// Forced-aligner input tier name, used to detect its prefixed
    /// output tiers.
    #[arg(long)]
    pub source_tier: Option<String>,

    /// Translate realization labels into the target language.
    #[arg(long)]
    pub translate: bool,

    /// Source language code for translation.
    #[arg(long, env = "TGPREP_SOURCE_LANG")]
    pub source_lang: Option<String>,

    /// Target language code for translation.
    #[arg(long, env = "TGPREP_TARGET_LANG")]
    pub target_lang: Option<String>,
}
