//! External tabular data (CSV) loading and grouping.
//!
//! Reads delimiter-configurable CSV files (UTF-8 BOM tolerated, handled
//! by the `csv` crate) into name-keyed rows and groups them by the
//! participant or recording key used to join them onto TextGrids.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// A single CSV row: a mapping from column name to string value.
#[derive(Debug, Clone)]
pub struct Row {
    /// 1-based line number in the source file, header included.
    pub line: usize,
    fields: HashMap<String, String>,
}

impl Row {
    /// Look up a field by column name.
    pub fn get(&self, column: &str) -> Result<&str> {
        self.fields
            .get(column)
            .map(String::as_str)
            .ok_or_else(|| Error::FieldMissing {
                column: column.to_string(),
                line: self.line,
            })
    }

    /// Parse a numeric field, normalizing a decimal comma to a decimal
    /// point first.
    pub fn number(&self, column: &str) -> Result<f64> {
        let raw = self.get(column)?;
        let normalized = raw.trim().replace(',', ".");
        normalized
            .parse::<f64>()
            .map_err(|_| Error::InvalidNumber {
                value: raw.to_string(),
                column: column.to_string(),
                line: self.line,
            })
    }
}

/// All rows of one CSV file plus its header set.
#[derive(Debug, Clone)]
pub struct RowSet {
    path: PathBuf,
    headers: Vec<String>,
    rows: Vec<Row>,
}

impl RowSet {
    /// Read a CSV file with the given field delimiter.
    pub fn read(path: &Path, delimiter: u8) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .delimiter(delimiter)
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|e| Error::CsvRead {
                path: path.to_path_buf(),
                source: e,
            })?;

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| Error::CsvRead {
                path: path.to_path_buf(),
                source: e,
            })?
            .iter()
            .map(ToString::to_string)
            .collect();

        let mut rows = Vec::new();
        for (index, record) in reader.records().enumerate() {
            let record = record.map_err(|e| Error::CsvRecord {
                path: path.to_path_buf(),
                message: format!("line {}: {e}", index + 2),
            })?;
            let fields = headers
                .iter()
                .zip(record.iter())
                .map(|(h, v)| (h.clone(), v.to_string()))
                .collect();
            rows.push(Row {
                line: index + 2,
                fields,
            });
        }

        Ok(Self {
            path: path.to_path_buf(),
            headers,
            rows,
        })
    }

    /// Path the rows were read from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rows in file order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Verify that every named column exists in the header.
    pub fn require_columns(&self, columns: &[&str]) -> Result<()> {
        for column in columns {
            if !self.headers.iter().any(|h| h == column) {
                return Err(Error::ColumnMissing {
                    path: self.path.clone(),
                    column: (*column).to_string(),
                });
            }
        }
        Ok(())
    }

    /// Group rows by the value of one key column, in sorted key order.
    pub fn group_by(&self, column: &str) -> Result<BTreeMap<String, Vec<&Row>>> {
        let mut groups: BTreeMap<String, Vec<&Row>> = BTreeMap::new();
        for row in &self.rows {
            let key = row.get(column)?.to_string();
            groups.entry(key).or_default().push(row);
        }
        Ok(groups)
    }

    /// Group rows by `(audio_filename, participant)`, in sorted key order.
    pub fn group_by_recording(
        &self,
        audio_column: &str,
        participant_column: &str,
    ) -> Result<BTreeMap<(String, String), Vec<&Row>>> {
        let mut groups: BTreeMap<(String, String), Vec<&Row>> = BTreeMap::new();
        for row in &self.rows {
            let key = (
                row.get(audio_column)?.to_string(),
                row.get(participant_column)?.to_string(),
            );
            groups.entry(key).or_default().push(row);
        }
        Ok(groups)
    }
}
