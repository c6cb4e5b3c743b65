//! Tier types: interval tiers, point tiers, and their entries.

use crate::constants::MERGE_LABEL_SEPARATOR;
use crate::error::{Error, Result};

/// A labeled time span within an interval tier.
#[derive(Debug, Clone, PartialEq)]
pub struct Interval {
    /// Start time in seconds.
    pub start: f64,
    /// End time in seconds.
    pub end: f64,
    /// Annotation label. Empty string represents a gap.
    pub label: String,
}

impl Interval {
    /// Create a new interval entry.
    pub fn new(start: f64, end: f64, label: impl Into<String>) -> Self {
        Self {
            start,
            end,
            label: label.into(),
        }
    }

    /// Whether this interval temporally overlaps another.
    ///
    /// Intervals that merely share an endpoint do not overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// A labeled instant within a point tier.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    /// Time in seconds.
    pub time: f64,
    /// Annotation label.
    pub label: String,
}

impl Point {
    /// Create a new point entry.
    pub fn new(time: f64, label: impl Into<String>) -> Self {
        Self {
            time,
            label: label.into(),
        }
    }
}

/// A tier of labeled time spans.
///
/// Entries are kept sorted by start time and non-overlapping.
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalTier {
    /// Tier name, unique within its document.
    pub name: String,
    /// Lower time bound of the tier.
    pub min_time: f64,
    /// Upper time bound of the tier.
    pub max_time: f64,
    /// Interval entries, sorted by start time.
    pub entries: Vec<Interval>,
}

impl IntervalTier {
    /// Create an empty interval tier spanning `[min_time, max_time]`.
    pub fn new(name: impl Into<String>, min_time: f64, max_time: f64) -> Self {
        Self {
            name: name.into(),
            min_time,
            max_time,
            entries: Vec::new(),
        }
    }

    /// Create an interval tier from entries, sorting them by start time.
    pub fn with_entries(
        name: impl Into<String>,
        min_time: f64,
        max_time: f64,
        mut entries: Vec<Interval>,
    ) -> Self {
        entries.sort_by(|a, b| a.start.total_cmp(&b.start));
        Self {
            name: name.into(),
            min_time,
            max_time,
            entries,
        }
    }

    /// Insert an entry, merging it with any entries it overlaps.
    ///
    /// The merged entry spans the union of all overlapping bounds. Labels
    /// are joined with `-` in time order, the inserted label last; empty
    /// labels are dropped from the join.
    pub fn insert_merge(&mut self, entry: Interval) -> Result<()> {
        if entry.end < entry.start {
            return Err(Error::InvalidInterval {
                start: entry.start,
                end: entry.end,
            });
        }

        let mut start = entry.start;
        let mut end = entry.end;
        let mut labels: Vec<String> = Vec::new();

        // Drain overlapping entries, widening the merged span as we go.
        let mut kept = Vec::with_capacity(self.entries.len() + 1);
        for existing in self.entries.drain(..) {
            if existing.overlaps(&entry) {
                start = start.min(existing.start);
                end = end.max(existing.end);
                if !existing.label.is_empty() {
                    labels.push(existing.label);
                }
            } else {
                kept.push(existing);
            }
        }
        if !entry.label.is_empty() {
            labels.push(entry.label);
        }

        let merged = Interval::new(start, end, labels.join(MERGE_LABEL_SEPARATOR));
        let at = kept
            .iter()
            .position(|i| i.start > merged.start)
            .unwrap_or(kept.len());
        kept.insert(at, merged);
        self.entries = kept;

        if end > self.max_time {
            self.max_time = end;
        }
        Ok(())
    }

    /// Fill all gaps with explicit empty-label intervals so the tier is
    /// contiguous over `[min_time, max_time]`.
    pub fn fill_gaps(&mut self) {
        let mut filled = Vec::with_capacity(self.entries.len() * 2 + 1);
        let mut cursor = self.min_time;

        for entry in self.entries.drain(..) {
            if entry.start > cursor {
                filled.push(Interval::new(cursor, entry.start, ""));
            }
            cursor = cursor.max(entry.end);
            filled.push(entry);
        }
        if cursor < self.max_time {
            filled.push(Interval::new(cursor, self.max_time, ""));
        }
        if filled.is_empty() {
            filled.push(Interval::new(self.min_time, self.max_time, ""));
        }

        self.entries = filled;
    }

    /// Remove all empty-label entries.
    pub fn strip_empty(&mut self) {
        self.entries.retain(|i| !i.label.is_empty());
    }
}

/// A tier of labeled instants.
#[derive(Debug, Clone, PartialEq)]
pub struct PointTier {
    /// Tier name, unique within its document.
    pub name: String,
    /// Lower time bound of the tier.
    pub min_time: f64,
    /// Upper time bound of the tier.
    pub max_time: f64,
    /// Point entries, sorted by time.
    pub entries: Vec<Point>,
}

impl PointTier {
    /// Create an empty point tier spanning `[min_time, max_time]`.
    pub fn new(name: impl Into<String>, min_time: f64, max_time: f64) -> Self {
        Self {
            name: name.into(),
            min_time,
            max_time,
            entries: Vec::new(),
        }
    }

    /// Create a point tier from entries, sorting them by time.
    pub fn with_entries(
        name: impl Into<String>,
        min_time: f64,
        max_time: f64,
        mut entries: Vec<Point>,
    ) -> Self {
        entries.sort_by(|a, b| a.time.total_cmp(&b.time));
        Self {
            name: name.into(),
            min_time,
            max_time,
            entries,
        }
    }
}

/// A named annotation track, either interval-based or point-based.
#[derive(Debug, Clone, PartialEq)]
pub enum Tier {
    /// Tier of labeled time spans.
    Interval(IntervalTier),
    /// Tier of labeled instants.
    Point(PointTier),
}

impl Tier {
    /// Tier name.
    pub fn name(&self) -> &str {
        match self {
            Self::Interval(t) => &t.name,
            Self::Point(t) => &t.name,
        }
    }

    /// Rename the tier in place.
    pub fn set_name(&mut self, name: impl Into<String>) {
        match self {
            Self::Interval(t) => t.name = name.into(),
            Self::Point(t) => t.name = name.into(),
        }
    }

    /// Lower time bound.
    pub fn min_time(&self) -> f64 {
        match self {
            Self::Interval(t) => t.min_time,
            Self::Point(t) => t.min_time,
        }
    }

    /// Upper time bound.
    pub fn max_time(&self) -> f64 {
        match self {
            Self::Interval(t) => t.max_time,
            Self::Point(t) => t.max_time,
        }
    }

    /// Number of entries in the tier.
    pub fn len(&self) -> usize {
        match self {
            Self::Interval(t) => t.entries.len(),
            Self::Point(t) => t.entries.len(),
        }
    }

    /// Whether the tier has no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Borrow the interval tier, if this is one.
    pub fn as_interval(&self) -> Option<&IntervalTier> {
        match self {
            Self::Interval(t) => Some(t),
            Self::Point(_) => None,
        }
    }

    /// Borrow the point tier, if this is one.
    pub fn as_point(&self) -> Option<&PointTier> {
        match self {
            Self::Point(t) => Some(t),
            Self::Interval(_) => None,
        }
    }
}

impl From<IntervalTier> for Tier {
    fn from(tier: IntervalTier) -> Self {
        Self::Interval(tier)
    }
}

impl From<PointTier> for Tier {
    fn from(tier: PointTier) -> Self {
        Self::Point(tier)
    }
}
