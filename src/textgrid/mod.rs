//! Praat TextGrid document model.
//!
//! An in-memory representation of a time-aligned multi-tier annotation
//! document, together with parsing and serialization of the long
//! ("ooTextFile") textual layout.

mod document;
mod parser;
mod tier;
mod writer;

pub use document::TextGrid;
pub use parser::open_textgrid;
pub use tier::{Interval, IntervalTier, Point, PointTier, Tier};
pub use writer::{save, serialize};
