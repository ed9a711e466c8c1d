use chrono::Month;
use serde::Serialize;

use crate::model::daily_record::DailyRecord;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct MonthlyDataset {
    pub month: Month,
    /// Where the rows came from, used in messages.
    pub source: String,
    pub extra_columns: Vec<String>,
    pub records: Vec<DailyRecord>,
}

impl MonthlyDataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn first_day(&self) -> Option<u32> {
        self.records.first().map(|r| r.day)
    }

    pub fn last_day(&self) -> Option<u32> {
        self.records.last().map(|r| r.day)
    }
}
