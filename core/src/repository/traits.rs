use std::path::PathBuf;

use anyhow::Result;
use chrono::Month;

use crate::raw::RawTable;

/// A data file and the month it holds.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthFile {
    pub month: Month,
    pub path: PathBuf,
}

impl MonthFile {
    pub fn label(&self) -> String {
        self.path.display().to_string()
    }
}

pub trait DatasetRepository {
    /// Available months, in calendar order.
    fn list(&self) -> Result<Vec<MonthFile>>;
    fn read(&self, file: &MonthFile) -> Result<RawTable>;
}
