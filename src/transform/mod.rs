//! Tier transform engine.
//!
//! Pure, deterministic tier derivations used by the assembly pipelines.
//! None of these touch the filesystem; they take a tier (and possibly
//! external rows) and produce a new tier.

use crate::constants::tiers;
use crate::error::Result;
use crate::rows::Row;
use crate::textgrid::{Interval, IntervalTier, PointTier};

/// Produce a same-shaped tier with labels transformed by `f`.
///
/// Entry count and every `(start, end)` pair are preserved exactly;
/// empty labels pass through as empty strings without calling `f`.
pub fn map_labels<F>(tier: &IntervalTier, name: &str, mut f: F) -> IntervalTier
where
    F: FnMut(&str) -> String,
{
    let entries = tier
        .entries
        .iter()
        .map(|interval| {
            let label = if interval.label.is_empty() {
                String::new()
            } else {
                f(&interval.label)
            };
            Interval::new(interval.start, interval.end, label)
        })
        .collect();
    IntervalTier::with_entries(name, tier.min_time, tier.max_time, entries)
}

/// Fallible variant of [`map_labels`] for mappings that can fail, such
/// as remote translation.
pub fn try_map_labels<F>(tier: &IntervalTier, name: &str, mut f: F) -> Result<IntervalTier>
where
    F: FnMut(&str) -> Result<String>,
{
    let mut entries = Vec::with_capacity(tier.entries.len());
    for interval in &tier.entries {
        let label = if interval.label.is_empty() {
            String::new()
        } else {
            f(&interval.label)?
        };
        entries.push(Interval::new(interval.start, interval.end, label));
    }
    Ok(IntervalTier::with_entries(
        name,
        tier.min_time,
        tier.max_time,
        entries,
    ))
}

/// Label-presence mapping for the prosodic unit tier.
///
/// Empty labels stay empty; non-empty labels become the fixed `marker`
/// when one is configured (e.g. `σ`) and are kept verbatim otherwise.
pub fn presence_marker(label: &str, marker: Option<&str>) -> String {
    if label.is_empty() {
        return String::new();
    }
    marker.map_or_else(|| label.to_string(), ToString::to_string)
}

/// Derive the prosodic unit tier from the word tier.
pub fn prosodic_unit_tier(word: &IntervalTier, marker: Option<&str>) -> IntervalTier {
    map_labels(word, tiers::PROSODIC_UNIT, |label| {
        presence_marker(label, marker)
    })
}

/// Produce a tier with the source tier's exact interval bounds and
/// all-empty labels.
pub fn blank_intervals(tier: &IntervalTier, name: &str) -> IntervalTier {
    let entries = tier
        .entries
        .iter()
        .map(|i| Interval::new(i.start, i.end, ""))
        .collect();
    IntervalTier::with_entries(name, tier.min_time, tier.max_time, entries)
}

/// Duplicate a tier under a new name.
pub fn duplicate(tier: &IntervalTier, name: &str) -> IntervalTier {
    IntervalTier {
        name: name.to_string(),
        ..tier.clone()
    }
}

/// A fresh empty point tier spanning `[min_time, max_time]`.
pub fn empty_point_tier(name: &str, min_time: f64, max_time: f64) -> PointTier {
    PointTier::new(name, min_time, max_time)
}

/// A fresh empty interval tier spanning `[min_time, max_time]`.
pub fn empty_interval_tier(name: &str, min_time: f64, max_time: f64) -> IntervalTier {
    IntervalTier::new(name, min_time, max_time)
}

/// External-value join: one interval per row, inserted with the merge
/// collision policy (overlapping entries collapse into a single interval
/// spanning the union of their bounds).
pub fn join_rows<'a, I>(name: &str, rows: I, min_time: f64, max_time: f64) -> Result<IntervalTier>
where
    I: IntoIterator<Item = &'a JoinEntry>,
{
    let mut tier = IntervalTier::new(name, min_time, max_time);
    for entry in rows {
        tier.insert_merge(Interval::new(entry.start, entry.end, entry.value.clone()))?;
    }
    Ok(tier)
}

/// One row's contribution to a joined tier.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinEntry {
    /// Interval start time in seconds.
    pub start: f64,
    /// Interval end time in seconds.
    pub end: f64,
    /// Label value, always a concrete string.
    pub value: String,
}

impl JoinEntry {
    /// Extract a join entry from an external row.
    pub fn from_row(row: &Row, start_column: &str, end_column: &str, value_column: &str) -> Result<Self> {
        Ok(Self {
            start: row.number(start_column)?,
            end: row.number(end_column)?,
            value: row.get(value_column)?.to_string(),
        })
    }
}
