//! Long-format TextGrid serialization.

use std::fmt::Write as _;
use std::path::Path;

use crate::error::{Error, Result};
use crate::textgrid::{IntervalTier, PointTier, TextGrid, Tier};

/// Serialize a document to the long textual layout and write it to disk.
///
/// With `include_blank_spaces` set, gaps in interval tiers are
/// materialized as explicit empty-label intervals, so every interval
/// tier in the output is contiguous over its time bounds.
pub fn save(tg: &TextGrid, path: &Path, include_blank_spaces: bool) -> Result<()> {
    let contents = serialize(tg, include_blank_spaces);
    std::fs::write(path, contents).map_err(|e| Error::TextGridWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Serialize a document to the long textual layout.
pub fn serialize(tg: &TextGrid, include_blank_spaces: bool) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "File type = \"ooTextFile\"");
    let _ = writeln!(out, "Object class = \"TextGrid\"");
    out.push('\n');
    let _ = writeln!(out, "xmin = {}", tg.min_time);
    let _ = writeln!(out, "xmax = {}", tg.max_time);

    if tg.tiers().is_empty() {
        let _ = writeln!(out, "tiers? <absent>");
        return out;
    }

    let _ = writeln!(out, "tiers? <exists>");
    let _ = writeln!(out, "size = {}", tg.tiers().len());
    let _ = writeln!(out, "item []:");

    for (index, tier) in tg.tiers().iter().enumerate() {
        let _ = writeln!(out, "    item [{}]:", index + 1);
        match tier {
            Tier::Interval(t) => write_interval_tier(&mut out, t, include_blank_spaces),
            Tier::Point(t) => write_point_tier(&mut out, t),
        }
    }

    out
}

fn write_interval_tier(out: &mut String, tier: &IntervalTier, include_blank_spaces: bool) {
    let tier = if include_blank_spaces {
        let mut filled = tier.clone();
        filled.fill_gaps();
        std::borrow::Cow::Owned(filled)
    } else {
        std::borrow::Cow::Borrowed(tier)
    };

    let _ = writeln!(out, "        class = \"IntervalTier\"");
    let _ = writeln!(out, "        name = \"{}\"", escape(&tier.name));
    let _ = writeln!(out, "        xmin = {}", tier.min_time);
    let _ = writeln!(out, "        xmax = {}", tier.max_time);
    let _ = writeln!(out, "        intervals: size = {}", tier.entries.len());

    for (index, interval) in tier.entries.iter().enumerate() {
        let _ = writeln!(out, "        intervals [{}]:", index + 1);
        let _ = writeln!(out, "            xmin = {}", interval.start);
        let _ = writeln!(out, "            xmax = {}", interval.end);
        let _ = writeln!(out, "            text = \"{}\"", escape(&interval.label));
    }
}

fn write_point_tier(out: &mut String, tier: &PointTier) {
    let _ = writeln!(out, "        class = \"TextTier\"");
    let _ = writeln!(out, "        name = \"{}\"", escape(&tier.name));
    let _ = writeln!(out, "        xmin = {}", tier.min_time);
    let _ = writeln!(out, "        xmax = {}", tier.max_time);
    let _ = writeln!(out, "        points: size = {}", tier.entries.len());

    for (index, point) in tier.entries.iter().enumerate() {
        let _ = writeln!(out, "        points [{}]:", index + 1);
        let _ = writeln!(out, "            number = {}", point.time);
        let _ = writeln!(out, "            mark = \"{}\"", escape(&point.label));
    }
}

/// Escape a text value for the TextGrid format: embedded quotes are
/// doubled.
fn escape(value: &str) -> String {
    value.replace('"', "\"\"")
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::textgrid::{Interval, Point};

    fn sample() -> TextGrid {
        let mut tg = TextGrid::new();
        tg.add_tier(IntervalTier::with_entries(
            "word",
            0.0,
            2.0,
            vec![Interval::new(0.5, 1.0, "hei")],
        ))
        .unwrap();
        tg.add_tier(PointTier::with_entries(
            "stress",
            0.0,
            2.0,
            vec![Point::new(0.75, "S")],
        ))
        .unwrap();
        tg
    }

    #[test]
    fn test_serialize_header_and_tier_blocks() {
        let text = serialize(&sample(), false);
        assert!(text.starts_with("File type = \"ooTextFile\"\nObject class = \"TextGrid\"\n"));
        assert!(text.contains("size = 2"));
        assert!(text.contains("class = \"IntervalTier\""));
        assert!(text.contains("name = \"word\""));
        assert!(text.contains("class = \"TextTier\""));
        assert!(text.contains("number = 0.75"));
        assert!(text.contains("mark = \"S\""));
    }

    #[test]
    fn test_serialize_with_blank_spaces_fills_gaps() {
        let text = serialize(&sample(), true);
        // [0, 0.5] and [1, 2] gaps become explicit empty intervals.
        assert!(text.contains("intervals: size = 3"));
        assert!(text.contains("text = \"\""));
    }

    #[test]
    fn test_serialize_without_blank_spaces_keeps_entries_as_is() {
        let text = serialize(&sample(), false);
        assert!(text.contains("intervals: size = 1"));
    }

    #[test]
    fn test_serialize_escapes_quotes() {
        let mut tg = TextGrid::new();
        tg.add_tier(IntervalTier::with_entries(
            "word",
            0.0,
            1.0,
            vec![Interval::new(0.0, 1.0, "he said \"hei\"")],
        ))
        .unwrap();
        let text = serialize(&tg, false);
        assert!(text.contains("text = \"he said \"\"hei\"\"\""));
    }

    #[test]
    fn test_serialize_empty_document() {
        let text = serialize(&TextGrid::new(), true);
        assert!(text.contains("tiers? <absent>"));
    }

    #[test]
    fn test_roundtrip_preserves_tiers_and_entries() {
        let text = serialize(&sample(), true);
        let tg = super::super::parser::parse(&text, true).unwrap();
        assert_eq!(tg.tier_names(), vec!["word", "stress"]);
        let word = tg.tier("word").unwrap().as_interval().unwrap();
        assert_eq!(word.entries.len(), 3);
        assert_eq!(word.entries[1].label, "hei");
        assert_eq!(word.entries[1].start, 0.5);
    }
}
