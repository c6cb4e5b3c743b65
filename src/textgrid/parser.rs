//! Long-format ("ooTextFile") TextGrid parsing.
//!
//! Only the long textual layout is supported; the short layout and the
//! binary format are rejected with a parse error naming the problem.

use std::path::Path;

use crate::error::{Error, Result};
use crate::textgrid::{Interval, IntervalTier, Point, PointTier, TextGrid, Tier};

/// Parse a TextGrid file from disk.
///
/// With `include_empty_intervals` set, every interval tier is normalized
/// to be gap-free and contiguous over its time bounds by inserting
/// explicit empty-label intervals. Without it, empty-label intervals are
/// dropped instead.
pub fn open_textgrid(path: &Path, include_empty_intervals: bool) -> Result<TextGrid> {
    let contents = std::fs::read_to_string(path).map_err(|e| Error::TextGridRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse(&contents, include_empty_intervals).map_err(|message| Error::TextGridParse {
        path: path.to_path_buf(),
        message,
    })
}

/// Parse long-format TextGrid text.
pub(crate) fn parse(
    contents: &str,
    include_empty_intervals: bool,
) -> std::result::Result<TextGrid, String> {
    let mut parser = Parser::new(contents);

    let file_type = parser.read_string("File type")?;
    match file_type.as_str() {
        "ooTextFile" => {}
        "ooTextFile short" => return Err("short TextGrid format is not supported".to_string()),
        other => return Err(format!("unsupported file type '{other}'")),
    }
    let object_class = parser.read_string("Object class")?;
    if object_class != "TextGrid" {
        return Err(format!("expected object class 'TextGrid', got '{object_class}'"));
    }

    let min_time = parser.read_number("xmin")?;
    let max_time = parser.read_number("xmax")?;

    let tiers_flag = parser
        .next_content_line()
        .ok_or("unexpected end of file, expected 'tiers?'")?;
    let mut tg = TextGrid::with_bounds(min_time, max_time);
    match tiers_flag {
        "tiers? <exists>" => {}
        "tiers? <absent>" => return Ok(tg),
        other => return Err(format!("expected 'tiers? <exists>', got '{other}'")),
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let size = parser.read_number("size")? as usize;
    parser.expect_header("item []")?;

    for _ in 0..size {
        parser.expect_header("item [")?;
        let tier = parser.read_tier(include_empty_intervals)?;
        tg.add_tier(tier).map_err(|e| e.to_string())?;
    }

    Ok(tg)
}

/// Line-oriented cursor over the file contents.
struct Parser<'a> {
    lines: Vec<&'a str>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(contents: &'a str) -> Self {
        Self {
            lines: contents.lines().collect(),
            pos: 0,
        }
    }

    /// Next non-blank line, trimmed.
    fn next_content_line(&mut self) -> Option<&'a str> {
        while self.pos < self.lines.len() {
            let line = self.lines[self.pos].trim();
            self.pos += 1;
            if !line.is_empty() {
                return Some(line);
            }
        }
        None
    }

    /// Next raw line, blank lines included. Used for string continuations,
    /// where a blank line is part of the label.
    fn next_raw_line(&mut self) -> Option<&'a str> {
        let line = self.lines.get(self.pos)?;
        self.pos += 1;
        Some(line)
    }

    /// Read a `key = value` line and return the raw value text.
    fn read_value(&mut self, key: &str) -> std::result::Result<&'a str, String> {
        let line = self
            .next_content_line()
            .ok_or_else(|| format!("unexpected end of file, expected '{key}'"))?;
        let Some((lhs, rhs)) = line.split_once('=') else {
            return Err(format!("expected '{key} = ...', got '{line}'"));
        };
        if lhs.trim() != key {
            return Err(format!("expected '{key}', got '{}'", lhs.trim()));
        }
        Ok(rhs.trim())
    }

    /// Read a numeric `key = value` field.
    fn read_number(&mut self, key: &str) -> std::result::Result<f64, String> {
        let value = self.read_value(key)?;
        value
            .parse::<f64>()
            .map_err(|_| format!("invalid number '{value}' for '{key}'"))
    }

    /// Read a quoted string `key = "value"` field. The value may span
    /// multiple lines; embedded quotes are doubled.
    fn read_string(&mut self, key: &str) -> std::result::Result<String, String> {
        let value = self.read_value(key)?;
        self.read_quoted(value)
    }

    /// Expect a block header line such as `item [1]:`.
    fn expect_header(&mut self, prefix: &str) -> std::result::Result<(), String> {
        let line = self
            .next_content_line()
            .ok_or_else(|| format!("unexpected end of file, expected '{prefix}...]:'"))?;
        if line.starts_with(prefix) && line.ends_with(':') {
            Ok(())
        } else {
            Err(format!("expected '{prefix}...]:', got '{line}'"))
        }
    }

    /// Finish reading a quoted value starting at `fragment`, consuming
    /// further raw lines while the string remains open.
    fn read_quoted(&mut self, fragment: &str) -> std::result::Result<String, String> {
        let mut buffer = fragment.to_string();
        loop {
            match unquote(&buffer)? {
                Some(value) => return Ok(value),
                None => {
                    let next = self
                        .next_raw_line()
                        .ok_or_else(|| "unterminated string value".to_string())?;
                    buffer.push('\n');
                    buffer.push_str(next);
                }
            }
        }
    }

    /// Read one complete tier block (`class` through the last entry).
    fn read_tier(&mut self, include_empty_intervals: bool) -> std::result::Result<Tier, String> {
        let class = self.read_string("class")?;
        let name = self.read_string("name")?;
        let min_time = self.read_number("xmin")?;
        let max_time = self.read_number("xmax")?;

        match class.as_str() {
            "IntervalTier" => {
                let size = self.read_entry_count("intervals: size")?;
                let mut entries = Vec::with_capacity(size);
                for _ in 0..size {
                    self.expect_header("intervals [")?;
                    let start = self.read_number("xmin")?;
                    let end = self.read_number("xmax")?;
                    let label = self.read_string("text")?;
                    if end < start {
                        return Err(format!(
                            "interval in tier '{name}' ends ({end}) before it starts ({start})"
                        ));
                    }
                    entries.push(Interval::new(start, end, label));
                }

                let mut tier = IntervalTier::with_entries(name, min_time, max_time, entries);
                if include_empty_intervals {
                    tier.fill_gaps();
                } else {
                    tier.strip_empty();
                }
                Ok(Tier::Interval(tier))
            }
            "TextTier" | "PointTier" => {
                let size = self.read_entry_count("points: size")?;
                let mut entries = Vec::with_capacity(size);
                for _ in 0..size {
                    self.expect_header("points [")?;
                    let time = self.read_point_time()?;
                    let label = self.read_string("mark")?;
                    entries.push(Point::new(time, label));
                }
                Ok(Tier::Point(PointTier::with_entries(
                    name, min_time, max_time, entries,
                )))
            }
            other => Err(format!("unknown tier class '{other}'")),
        }
    }

    /// Read an entry-count field such as `intervals: size = 3`.
    fn read_entry_count(&mut self, key: &str) -> std::result::Result<usize, String> {
        let value = self.read_value(key)?;
        value
            .parse::<usize>()
            .map_err(|_| format!("invalid entry count '{value}' for '{key}'"))
    }

    /// Read a point time, accepting both the modern `number` key and the
    /// older `time` key.
    fn read_point_time(&mut self) -> std::result::Result<f64, String> {
        let line = self
            .next_content_line()
            .ok_or("unexpected end of file, expected 'number'")?;
        let Some((lhs, rhs)) = line.split_once('=') else {
            return Err(format!("expected 'number = ...', got '{line}'"));
        };
        let key = lhs.trim();
        if key != "number" && key != "time" {
            return Err(format!("expected 'number', got '{key}'"));
        }
        let value = rhs.trim();
        value
            .parse::<f64>()
            .map_err(|_| format!("invalid number '{value}' for '{key}'"))
    }
}

/// Try to close a quoted string fragment.
///
/// Returns `Ok(Some(value))` when the fragment holds a complete quoted
/// string, `Ok(None)` when the string is still open (continues on the
/// next line), and an error for malformed quoting.
fn unquote(fragment: &str) -> std::result::Result<Option<String>, String> {
    let Some(rest) = fragment.strip_prefix('"') else {
        return Err(format!("expected quoted string, got '{fragment}'"));
    };

    let mut value = String::new();
    let mut chars = rest.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '"' {
            if chars.peek() == Some(&'"') {
                chars.next();
                value.push('"');
            } else {
                let trailing: String = chars.collect();
                if trailing.trim().is_empty() {
                    return Ok(Some(value));
                }
                return Err(format!("unexpected text after closing quote: '{trailing}'"));
            }
        } else {
            value.push(c);
        }
    }
    Ok(None)
}
