//! Restructuring of force-aligned TextGrids for prosodic annotation.
//!
//! Every document comes out with the same tier layout: the derived
//! annotation tiers in a fixed declared order, with the aligner's word
//! and phone tiers re-added below them. Tier order in the saved file is
//! exactly the order of `add_tier` calls.

use std::collections::BTreeMap;
use std::path::PathBuf;

use tracing::info;

use crate::constants::{TEXTGRID_EXTENSION, output_dirs, tiers};
use crate::error::{Error, Result};
use crate::pipeline::{collect_files_with_extension, ensure_output_dir, participant_key, progress};
use crate::rows::RowSet;
use crate::textgrid::{IntervalTier, TextGrid, Tier, open_textgrid, save};
use crate::transform::{self, JoinEntry};
use crate::translate::Translator;

/// Options for the modify pipeline.
#[derive(Debug, Clone)]
pub struct ModifyOptions {
    /// Directory scanned for `.TextGrid` files.
    pub input_dir: PathBuf,
    /// Output directory (None = `modified_textgrids/` under the input
    /// directory).
    pub output_dir: Option<PathBuf>,
    /// CSV file with per-trial values for the uniquenumb tier.
    pub csv_path: Option<PathBuf>,
    /// CSV field delimiter.
    pub delimiter: u8,
    /// Participant key column.
    pub participant_column: String,
    /// Interval start time column.
    pub start_column: String,
    /// Interval end time column.
    pub end_column: String,
    /// Column joined into the uniquenumb tier.
    pub value_column: String,
    /// Marker for non-empty prosodic unit entries; word labels are kept
    /// verbatim when unset.
    pub unit_marker: Option<String>,
    /// Forced-aligner input tier name.
    pub source_tier: String,
    /// Source language code for translation.
    pub source_lang: String,
    /// Target language code for translation.
    pub target_lang: String,
    /// Show a progress bar.
    pub progress_enabled: bool,
}

/// Result of a modify run.
#[derive(Debug)]
pub struct ModifySummary {
    /// Number of TextGrids written.
    pub written: usize,
    /// Directory the TextGrids were written to.
    pub output_dir: PathBuf,
}

/// Everything [`restructure`] needs to rework one document.
pub struct RestructureContext<'a> {
    /// Marker for non-empty prosodic unit entries.
    pub unit_marker: Option<&'a str>,
    /// Forced-aligner input tier name.
    pub source_tier: &'a str,
    /// External rows joined into the uniquenumb tier.
    pub join_entries: &'a [JoinEntry],
    /// Translator for the translation tier.
    pub translator: &'a dyn Translator,
    /// Source language code.
    pub source_lang: &'a str,
    /// Target language code.
    pub target_lang: &'a str,
}

/// Restructure all TextGrids in the input directory.
pub fn modify(options: &ModifyOptions, translator: &dyn Translator) -> Result<ModifySummary> {
    let files = collect_files_with_extension(&options.input_dir, TEXTGRID_EXTENSION)?;
    let joined = options
        .csv_path
        .as_deref()
        .map(|path| {
            let rows = RowSet::read(path, options.delimiter)?;
            rows.require_columns(&[
                &options.participant_column,
                &options.start_column,
                &options.end_column,
                &options.value_column,
            ])?;
            join_entries_by_participant(&rows, options)
        })
        .transpose()?;

    let output_dir = options
        .output_dir
        .clone()
        .unwrap_or_else(|| options.input_dir.join(output_dirs::MODIFIED));
    ensure_output_dir(&output_dir)?;

    let pb = progress::create_file_progress(files.len(), options.progress_enabled);
    let mut written = 0;

    for path in &files {
        info!(
            "Modifying '{}' located in '{}'",
            path.display(),
            options.input_dir.display()
        );

        let key = participant_key(path)?;
        let empty = Vec::new();
        let entries = joined
            .as_ref()
            .and_then(|groups| groups.get(&key))
            .unwrap_or(&empty);

        let tg = open_textgrid(path, true)?;
        let tg = restructure(
            tg,
            &RestructureContext {
                unit_marker: options.unit_marker.as_deref(),
                source_tier: &options.source_tier,
                join_entries: entries,
                translator,
                source_lang: &options.source_lang,
                target_lang: &options.target_lang,
            },
        )?;

        let out_path = output_dir.join(format!("{key}{TEXTGRID_EXTENSION}"));
        save(&tg, &out_path, true)?;
        info!("Saved '{}'", out_path.display());

        written += 1;
        progress::inc_progress(pb.as_ref());
    }
    progress::finish_progress(pb, "Complete");

    Ok(ModifySummary {
        written,
        output_dir,
    })
}

/// Group the CSV rows by participant and extract their join entries.
fn join_entries_by_participant(
    rows: &RowSet,
    options: &ModifyOptions,
) -> Result<BTreeMap<String, Vec<JoinEntry>>> {
    let mut map = BTreeMap::new();
    for (key, group) in rows.group_by(&options.participant_column)? {
        let entries = group
            .iter()
            .map(|row| {
                JoinEntry::from_row(
                    row,
                    &options.start_column,
                    &options.end_column,
                    &options.value_column,
                )
            })
            .collect::<Result<Vec<_>>>()?;
        map.insert(key, entries);
    }
    Ok(map)
}

/// Rework one document into the prosodic annotation tier layout.
///
/// Derived tiers are appended in a fixed declared order (stress,
/// prosodic unit, emphasis, uniquenumb, realization, translation,
/// comment); the word and phone tiers are removed first and re-added
/// after them, which places them at the bottom of the display order.
pub fn restructure(mut tg: TextGrid, ctx: &RestructureContext<'_>) -> Result<TextGrid> {
    // The aligner names its output tiers after the input tier; fold
    // them back to plain names before assembling the layout.
    let phone_alias = format!("{}{}", ctx.source_tier, tiers::ALIGNER_PHONE_SUFFIX);
    if tg.has_tier(&phone_alias) {
        tg.rename_tier(&phone_alias, tiers::PHONE)?;
    }
    let word_alias = format!("{}{}", ctx.source_tier, tiers::ALIGNER_WORD_SUFFIX);
    if tg.has_tier(&word_alias) {
        tg.rename_tier(&word_alias, tiers::WORD)?;
    }

    let trans_alias = format!("{}{}", ctx.source_tier, tiers::ALIGNER_TRANS_SUFFIX);
    let realization = if tg.has_tier(&trans_alias) {
        let trans = as_interval_tier(tg.remove_tier(&trans_alias)?)?;
        Some(transform::duplicate(&trans, tiers::REALIZATION))
    } else if tg.has_tier(tiers::REALIZATION) {
        // Already present: pull it out so it lands in its declared slot.
        Some(as_interval_tier(tg.remove_tier(tiers::REALIZATION)?)?)
    } else {
        None
    };

    let word = as_interval_tier(tg.remove_tier(tiers::WORD)?)?;
    let phone = tg.remove_tier(tiers::PHONE)?;

    let max_time = tg.max_time;
    let realization = realization
        .unwrap_or_else(|| transform::empty_interval_tier(tiers::REALIZATION, 0.0, max_time));
    let translation = transform::try_map_labels(&realization, tiers::TRANSLATION, |label| {
        ctx.translator
            .translate(label, ctx.source_lang, ctx.target_lang)
    })?;

    tg.add_tier(transform::empty_point_tier(tiers::STRESS, 0.0, max_time))?;
    tg.add_tier(transform::prosodic_unit_tier(&word, ctx.unit_marker))?;
    tg.add_tier(transform::empty_point_tier(tiers::EMPHASIS, 0.0, max_time))?;
    tg.add_tier(transform::join_rows(
        tiers::UNIQUENUMB,
        ctx.join_entries,
        0.0,
        max_time,
    )?)?;
    tg.add_tier(realization)?;
    tg.add_tier(translation)?;
    tg.add_tier(transform::blank_intervals(&word, tiers::COMMENT))?;

    tg.add_tier(word)?;
    tg.add_tier(phone)?;
    Ok(tg)
}

fn as_interval_tier(tier: Tier) -> Result<IntervalTier> {
    match tier {
        Tier::Interval(t) => Ok(t),
        Tier::Point(t) => Err(Error::TierKind {
            name: t.name,
            expected: "interval".to_string(),
        }),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::textgrid::{Interval, PointTier};
    use crate::translate::IdentityTranslator;

    fn aligned_textgrid() -> TextGrid {
        let mut tg = TextGrid::new();
        tg.add_tier(IntervalTier::with_entries(
            "realization - phone",
            0.0,
            2.0,
            vec![
                Interval::new(0.0, 0.4, "h"),
                Interval::new(0.4, 1.0, "ei"),
            ],
        ))
        .unwrap();
        tg.add_tier(IntervalTier::with_entries(
            "realization - word",
            0.0,
            2.0,
            vec![
                Interval::new(0.0, 1.0, "hei"),
                Interval::new(1.0, 1.5, ""),
                Interval::new(1.5, 2.0, "du"),
            ],
        ))
        .unwrap();
        tg.add_tier(IntervalTier::with_entries(
            "realization - trans",
            0.0,
            2.0,
            vec![Interval::new(0.0, 2.0, "hei du")],
        ))
        .unwrap();
        tg
    }

    fn context<'a>(
        entries: &'a [JoinEntry],
        translator: &'a IdentityTranslator,
    ) -> RestructureContext<'a> {
        RestructureContext {
            unit_marker: Some("σ"),
            source_tier: "realization",
            join_entries: entries,
            translator,
            source_lang: "no",
            target_lang: "en",
        }
    }

    #[test]
    fn test_restructure_tier_layout() {
        let translator = IdentityTranslator;
        let tg = restructure(aligned_textgrid(), &context(&[], &translator)).unwrap();

        assert_eq!(
            tg.tier_names(),
            vec![
                "stress (S|SS|0)",
                "prosodic unit",
                "emphasis (E)",
                "uniquenumb",
                "realization",
                "translation",
                "comment",
                "word",
                "phone",
            ]
        );
    }

    #[test]
    fn test_restructure_prosodic_unit_marks_words() {
        let translator = IdentityTranslator;
        let tg = restructure(aligned_textgrid(), &context(&[], &translator)).unwrap();

        let unit = tg.tier("prosodic unit").unwrap().as_interval().unwrap();
        let labels: Vec<&str> = unit.entries.iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, vec!["σ", "", "σ"]);

        let word = tg.tier("word").unwrap().as_interval().unwrap();
        for (u, w) in unit.entries.iter().zip(word.entries.iter()) {
            assert_eq!(u.start, w.start);
            assert_eq!(u.end, w.end);
        }
    }

    #[test]
    fn test_restructure_realization_from_trans_tier() {
        let translator = IdentityTranslator;
        let tg = restructure(aligned_textgrid(), &context(&[], &translator)).unwrap();

        assert!(!tg.has_tier("realization - trans"));
        let realization = tg.tier("realization").unwrap().as_interval().unwrap();
        assert_eq!(realization.entries.len(), 1);
        assert_eq!(realization.entries[0].label, "hei du");

        // Identity translation copies the realization labels.
        let translation = tg.tier("translation").unwrap().as_interval().unwrap();
        assert_eq!(translation.entries[0].label, "hei du");
    }

    #[test]
    fn test_restructure_joins_uniquenumb_entries() {
        let translator = IdentityTranslator;
        let entries = vec![JoinEntry {
            start: 0.5,
            end: 1.2,
            value: "7".to_string(),
        }];
        let tg = restructure(aligned_textgrid(), &context(&entries, &translator)).unwrap();

        let numb = tg.tier("uniquenumb").unwrap().as_interval().unwrap();
        assert_eq!(numb.entries.len(), 1);
        assert_eq!(numb.entries[0].start, 0.5);
        assert_eq!(numb.entries[0].end, 1.2);
        assert_eq!(numb.entries[0].label, "7");
    }

    #[test]
    fn test_restructure_comment_tier_shadows_word_bounds() {
        let translator = IdentityTranslator;
        let tg = restructure(aligned_textgrid(), &context(&[], &translator)).unwrap();

        let comment = tg.tier("comment").unwrap().as_interval().unwrap();
        let word = tg.tier("word").unwrap().as_interval().unwrap();
        assert_eq!(comment.entries.len(), word.entries.len());
        assert!(comment.entries.iter().all(|i| i.label.is_empty()));
    }

    #[test]
    fn test_restructure_without_aligner_prefixes() {
        // Documents that already carry plain word/phone tiers (and no
        // realization source) still get the full layout, with empty
        // realization and translation tiers.
        let mut tg = TextGrid::new();
        tg.add_tier(IntervalTier::with_entries(
            "word",
            0.0,
            1.0,
            vec![Interval::new(0.0, 1.0, "hei")],
        ))
        .unwrap();
        tg.add_tier(IntervalTier::new("phone", 0.0, 1.0)).unwrap();

        let translator = IdentityTranslator;
        let tg = restructure(tg, &context(&[], &translator)).unwrap();

        assert!(tg.has_tier("realization"));
        assert!(tg.tier("realization").unwrap().is_empty());
        assert!(tg.tier("translation").unwrap().is_empty());
        assert_eq!(tg.tier_names().len(), 9);
    }

    #[test]
    fn test_restructure_fails_without_word_tier() {
        let mut tg = TextGrid::new();
        tg.add_tier(IntervalTier::new("phone", 0.0, 1.0)).unwrap();

        let translator = IdentityTranslator;
        let result = restructure(tg, &context(&[], &translator));
        assert!(matches!(result, Err(Error::TierNotFound { name }) if name == "word"));
    }

    #[test]
    fn test_restructure_rejects_point_word_tier() {
        let mut tg = TextGrid::new();
        tg.add_tier(PointTier::new("word", 0.0, 1.0)).unwrap();
        tg.add_tier(IntervalTier::new("phone", 0.0, 1.0)).unwrap();

        let translator = IdentityTranslator;
        let result = restructure(tg, &context(&[], &translator));
        assert!(matches!(result, Err(Error::TierKind { .. })));
    }

    #[test]
    fn test_modify_batch_writes_restructured_files() {
        let dir = tempfile::tempdir().unwrap();
        let tg_path = dir.path().join("S01.TextGrid");
        save(&aligned_textgrid(), &tg_path, true).unwrap();
        // A stray non-TextGrid file must be skipped.
        std::fs::write(dir.path().join("S01.wav"), "not audio").unwrap();

        let csv = dir.path().join("trials.csv");
        std::fs::write(
            &csv,
            "participant;start_time;end_time;uniquenumb\nS01;0,5;1,2;7\nS99;0;1;8\n",
        )
        .unwrap();

        let options = ModifyOptions {
            input_dir: dir.path().to_path_buf(),
            output_dir: None,
            csv_path: Some(csv),
            delimiter: b';',
            participant_column: "participant".to_string(),
            start_column: "start_time".to_string(),
            end_column: "end_time".to_string(),
            value_column: "uniquenumb".to_string(),
            unit_marker: Some("σ".to_string()),
            source_tier: "realization".to_string(),
            source_lang: "no".to_string(),
            target_lang: "en".to_string(),
            progress_enabled: false,
        };
        let summary = modify(&options, &IdentityTranslator).unwrap();
        assert_eq!(summary.written, 1);

        let out = dir.path().join("modified_textgrids").join("S01.TextGrid");
        let tg = open_textgrid(&out, false).unwrap();
        assert_eq!(tg.tier_names().len(), 9);

        // Only S01's rows were joined.
        let numb = tg.tier("uniquenumb").unwrap().as_interval().unwrap();
        assert_eq!(numb.entries.len(), 1);
        assert_eq!(numb.entries[0].label, "7");
        assert_eq!(numb.entries[0].start, 0.5);
    }
}
