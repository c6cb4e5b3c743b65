//! tgprep - TextGrid preparation CLI tool.
//!
//! This crate generates Praat TextGrid files from tabular annotation
//! data and restructures force-aligned TextGrids for manual prosodic
//! annotation.

#![warn(missing_docs)]

pub mod audio;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod pipeline;
pub mod rows;
pub mod textgrid;
pub mod transform;
pub mod translate;

use clap::Parser;
use cli::{Cli, Command, ConfigAction, GenerateArgs, LoggingArgs, ModifyArgs, SeedArgs};
use config::{Config, config_file_path, load_default_config, save_default_config};
use constants::DEFAULT_GENERATE_TIER;
use pipeline::{GenerateOptions, ModifyOptions, SeedOptions};
use translate::{GoogleTranslator, IdentityTranslator, Translator};

use tracing::{info, warn};

pub use error::{Error, Result};

/// Main entry point for the tgprep CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.logging.verbose, cli.logging.quiet);

    let config = load_default_config()?;

    match cli.command {
        Command::Generate(args) => run_generate(&args, &config, &cli.logging),
        Command::Seed(args) => run_seed(&args, &config, &cli.logging),
        Command::Modify(args) => run_modify(&args, &config, &cli.logging),
        Command::Config { action } => handle_config_command(action),
    }
}

/// Generate TextGrids from a CSV of time-aligned responses.
fn run_generate(args: &GenerateArgs, config: &Config, logging: &LoggingArgs) -> Result<()> {
    let options = GenerateOptions {
        csv_path: args.csv.clone(),
        output_dir: args.output_dir.clone(),
        delimiter: resolve_delimiter(args.delimiter, config),
        tier_name: args
            .tier
            .clone()
            .unwrap_or_else(|| DEFAULT_GENERATE_TIER.to_string()),
        participant_column: config.columns.participant.clone(),
        start_column: config.columns.start_time.clone(),
        end_column: config.columns.end_time.clone(),
        label_column: args
            .label_column
            .clone()
            .unwrap_or_else(|| config.columns.response.clone()),
        progress_enabled: !logging.quiet,
    };

    let summary = pipeline::generate(&options)?;
    info!(
        "Generated {} TextGrid(s) in '{}'",
        summary.written,
        summary.output_dir.display()
    );
    Ok(())
}

/// Seed TextGrids for a directory of audio recordings.
fn run_seed(args: &SeedArgs, config: &Config, logging: &LoggingArgs) -> Result<()> {
    let options = SeedOptions {
        csv_path: args.csv.clone(),
        audio_dir: args.audio_dir.clone(),
        output_dir: args.output_dir.clone(),
        delimiter: resolve_delimiter(args.delimiter, config),
        audio_column: config.columns.audio_filename.clone(),
        participant_column: config.columns.participant.clone(),
        duration_column: config.columns.duration.clone(),
        label_column: args
            .label_column
            .clone()
            .unwrap_or_else(|| config.columns.realization.clone()),
        progress_enabled: !logging.quiet,
    };

    let summary = pipeline::seed(&options)?;
    info!(
        "Seeded {} TextGrid(s) in '{}'",
        summary.written,
        summary.output_dir.display()
    );
    Ok(())
}

/// Restructure force-aligned TextGrids for prosodic annotation.
fn run_modify(args: &ModifyArgs, config: &Config, logging: &LoggingArgs) -> Result<()> {
    let translate_enabled = args.translate || config.defaults.translate;
    let translator: Box<dyn Translator> = if translate_enabled {
        Box::new(GoogleTranslator::new()?)
    } else {
        Box::new(IdentityTranslator)
    };

    let options = ModifyOptions {
        input_dir: args.input_dir.clone(),
        output_dir: args.output_dir.clone(),
        csv_path: args.csv.clone(),
        delimiter: resolve_delimiter(args.delimiter, config),
        participant_column: config.columns.participant.clone(),
        start_column: config.columns.start_time.clone(),
        end_column: config.columns.end_time.clone(),
        value_column: config.columns.uniquenumb.clone(),
        unit_marker: args
            .unit_marker
            .clone()
            .or_else(|| config.defaults.unit_marker.clone()),
        source_tier: args
            .source_tier
            .clone()
            .unwrap_or_else(|| constants::tiers::REALIZATION.to_string()),
        source_lang: args
            .source_lang
            .clone()
            .unwrap_or_else(|| config.defaults.source_lang.clone()),
        target_lang: args
            .target_lang
            .clone()
            .unwrap_or_else(|| config.defaults.target_lang.clone()),
        progress_enabled: !logging.quiet,
    };

    let summary = pipeline::modify(&options, translator.as_ref())?;
    info!(
        "Modified {} TextGrid(s) in '{}'",
        summary.written,
        summary.output_dir.display()
    );
    Ok(())
}

/// Resolve the CSV delimiter from the CLI flag, falling back to config.
fn resolve_delimiter(flag: Option<char>, config: &Config) -> u8 {
    if let Some(c) = flag {
        if let Ok(byte) = u8::try_from(c) {
            return byte;
        }
        warn!("Delimiter '{c}' is not a single-byte character; using config default");
    }
    config.defaults.delimiter_byte()
}

fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter_str = if quiet {
        "warn"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str));

    fmt().with_env_filter(filter).init();
}

#[allow(clippy::print_stdout)]
fn handle_config_command(action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Init => {
            let path = config_file_path()?;
            if path.exists() {
                println!("Configuration file already exists: {}", path.display());
            } else {
                let config = Config::default();
                let saved_path = save_default_config(&config)?;
                println!("Created configuration file: {}", saved_path.display());
            }
            Ok(())
        }
        ConfigAction::Show => {
            let config = load_default_config()?;
            println!("{config:#?}");
            Ok(())
        }
        ConfigAction::Path => {
            let path = config_file_path()?;
            println!("{}", path.display());
            Ok(())
        }
    }
}
