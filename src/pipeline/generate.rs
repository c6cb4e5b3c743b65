//! TextGrid generation from time-aligned response CSV data.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::constants::{TEXTGRID_EXTENSION, output_dirs};
use crate::error::Result;
use crate::pipeline::{ensure_output_dir, progress};
use crate::rows::{Row, RowSet};
use crate::textgrid::{Interval, IntervalTier, TextGrid, save};

/// Options for the generate pipeline.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// CSV file to read.
    pub csv_path: PathBuf,
    /// Output directory (None = `textgrids/` beside the CSV).
    pub output_dir: Option<PathBuf>,
    /// CSV field delimiter.
    pub delimiter: u8,
    /// Name of the generated interval tier.
    pub tier_name: String,
    /// Participant key column.
    pub participant_column: String,
    /// Interval start time column.
    pub start_column: String,
    /// Interval end time column.
    pub end_column: String,
    /// Interval label column.
    pub label_column: String,
    /// Show a progress bar.
    pub progress_enabled: bool,
}

/// Result of a generate run.
#[derive(Debug)]
pub struct GenerateSummary {
    /// Number of TextGrids written.
    pub written: usize,
    /// Directory the TextGrids were written to.
    pub output_dir: PathBuf,
}

/// Generate one TextGrid per participant from the CSV rows.
pub fn generate(options: &GenerateOptions) -> Result<GenerateSummary> {
    let rows = RowSet::read(&options.csv_path, options.delimiter)?;
    rows.require_columns(&[
        &options.participant_column,
        &options.start_column,
        &options.end_column,
        &options.label_column,
    ])?;

    let groups = rows.group_by(&options.participant_column)?;

    let output_dir = options.output_dir.clone().unwrap_or_else(|| {
        options
            .csv_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(output_dirs::GENERATED)
    });
    ensure_output_dir(&output_dir)?;

    let pb = progress::create_file_progress(groups.len(), options.progress_enabled);
    let mut written = 0;

    for (participant, group) in &groups {
        let tg = build_participant_textgrid(options, group)?;

        let path = output_dir.join(format!("{participant}{TEXTGRID_EXTENSION}"));
        save(&tg, &path, true)?;
        info!("Generated '{}'", path.display());

        written += 1;
        progress::inc_progress(pb.as_ref());
    }
    progress::finish_progress(pb, "Complete");

    Ok(GenerateSummary {
        written,
        output_dir,
    })
}

/// Build a single participant's document from their rows.
fn build_participant_textgrid(options: &GenerateOptions, group: &[&Row]) -> Result<TextGrid> {
    let mut tier = IntervalTier::new(&options.tier_name, 0.0, 0.0);
    for row in group {
        let start = row.number(&options.start_column)?;
        let end = row.number(&options.end_column)?;
        let label = row.get(&options.label_column)?;
        tier.insert_merge(Interval::new(start, end, label))?;
    }

    let mut tg = TextGrid::with_bounds(0.0, tier.max_time);
    tg.add_tier(tier)?;
    Ok(tg)
}
