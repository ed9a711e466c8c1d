use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::LoadError;

/// One data row as read from the file, before any interpretation.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    /// 1-based line in the source, the header being line 1.
    pub line: u64,
    pub cells: Vec<String>,
}

impl RawRow {
    /// Short rows read as empty cells.
    pub fn cell(&self, index: usize) -> &str {
        self.cells.get(index).map(String::as_str).unwrap_or("")
    }
}

/// Untyped header + rows, exactly as found in the CSV.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl RawTable {
    /// Builds a table in memory; rows are numbered as if they followed a header line.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(i, cells)| RawRow {
                line: i as u64 + 2,
                cells,
            })
            .collect();
        Self { headers, rows }
    }

    pub fn from_reader<R: Read>(reader: R, file: &str) -> Result<Self, LoadError> {
        let csv_err = |source| LoadError::Csv {
            file: file.to_string(),
            source,
        };

        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = rdr
            .headers()
            .map_err(csv_err)?
            .iter()
            .map(str::to_string)
            .collect();

        let mut rows = Vec::new();
        for result in rdr.records() {
            let record = result.map_err(csv_err)?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            rows.push(RawRow {
                line,
                cells: record.iter().map(str::to_string).collect(),
            });
        }

        Ok(Self { headers, rows })
    }

    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let label = path.display().to_string();
        let file = File::open(path).map_err(|source| LoadError::Io {
            file: label.clone(),
            source,
        })?;
        Self::from_reader(BufReader::new(file), &label)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
