//! TextGrid seeding for audio recordings awaiting forced alignment.
//!
//! Each `.wav` file in the audio directory gets a TextGrid whose global
//! time bound is the audio duration, with a `realization` interval tier
//! populated from CSV rows keyed by `(audio_filename, participant)`.

use std::path::PathBuf;

use tracing::info;

use crate::audio::wav_duration;
use crate::constants::{TEXTGRID_EXTENSION, WAV_EXTENSION, output_dirs, tiers};
use crate::error::Result;
use crate::pipeline::{collect_files_with_extension, ensure_output_dir, progress};
use crate::rows::RowSet;
use crate::textgrid::{Interval, IntervalTier, TextGrid, save};

/// Options for the seed pipeline.
#[derive(Debug, Clone)]
pub struct SeedOptions {
    /// CSV file to read.
    pub csv_path: PathBuf,
    /// Directory scanned for `.wav` files.
    pub audio_dir: PathBuf,
    /// Output directory (None = `textgrids/` under the audio directory).
    pub output_dir: Option<PathBuf>,
    /// CSV field delimiter.
    pub delimiter: u8,
    /// Audio file name column.
    pub audio_column: String,
    /// Participant key column.
    pub participant_column: String,
    /// Interval duration column (seconds; implicit start time 0).
    pub duration_column: String,
    /// Interval label column.
    pub label_column: String,
    /// Show a progress bar.
    pub progress_enabled: bool,
}

/// Result of a seed run.
#[derive(Debug)]
pub struct SeedSummary {
    /// Number of TextGrids written.
    pub written: usize,
    /// Directory the TextGrids were written to.
    pub output_dir: PathBuf,
}

/// Seed one TextGrid per audio file in the audio directory.
pub fn seed(options: &SeedOptions) -> Result<SeedSummary> {
    let rows = RowSet::read(&options.csv_path, options.delimiter)?;
    rows.require_columns(&[
        &options.audio_column,
        &options.participant_column,
        &options.duration_column,
        &options.label_column,
    ])?;
    let groups = rows.group_by_recording(&options.audio_column, &options.participant_column)?;

    let files = collect_files_with_extension(&options.audio_dir, WAV_EXTENSION)?;

    let output_dir = options
        .output_dir
        .clone()
        .unwrap_or_else(|| options.audio_dir.join(output_dirs::GENERATED));
    ensure_output_dir(&output_dir)?;

    let pb = progress::create_file_progress(files.len(), options.progress_enabled);
    let mut written = 0;

    for audio_path in &files {
        let file_name = audio_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        info!("Seeding TextGrid for '{file_name}'");

        let duration = wav_duration(audio_path)?;
        let mut tier = IntervalTier::new(tiers::REALIZATION, 0.0, duration);

        // Rows for this recording, whichever participant they belong to.
        for ((audio_filename, _participant), group) in &groups {
            if audio_filename != file_name {
                continue;
            }
            for row in group {
                let end = row.number(&options.duration_column)?;
                let label = row.get(&options.label_column)?;
                tier.insert_merge(Interval::new(0.0, end, label))?;
            }
        }

        let mut tg = TextGrid::with_bounds(0.0, duration);
        tg.add_tier(tier)?;

        let stem = file_name.strip_suffix(WAV_EXTENSION).unwrap_or(file_name);
        let path = output_dir.join(format!("{stem}{TEXTGRID_EXTENSION}"));
        save(&tg, &path, true)?;
        info!("Saved '{}'", path.display());

        written += 1;
        progress::inc_progress(pb.as_ref());
    }
    progress::finish_progress(pb, "Complete");

    Ok(SeedSummary {
        written,
        output_dir,
    })
}
