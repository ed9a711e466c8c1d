use serde::Serialize;

use crate::model::daily_record::DailyRecord;

/// Days ending at or below this SOC count as "at minimum".
pub const DEFAULT_MIN_SOC_THRESHOLD: f64 = 20.5;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct MonthlySummary {
    pub days: usize,
    pub total_h2_kg: f64,
    /// NaN when no day reports a hydrogen value.
    pub avg_daily_h2_kg: f64,
    pub days_at_min_soc: usize,
    pub zero_h2_days: usize,
    pub min_soc_threshold: f64,
}

impl MonthlySummary {
    pub fn from_records(records: &[DailyRecord], min_soc_threshold: f64) -> Self {
        let produced: Vec<f64> = records
            .iter()
            .filter_map(|r| r.h2_produced_kg)
            .filter(|kg| !kg.is_nan())
            .collect();

        let total_h2_kg: f64 = produced.iter().sum();
        let avg_daily_h2_kg = if produced.is_empty() {
            f64::NAN
        } else {
            total_h2_kg / produced.len() as f64
        };

        let days_at_min_soc = records
            .iter()
            .filter(|r| r.final_soc_pct <= min_soc_threshold)
            .count();
        let zero_h2_days = produced.iter().filter(|&&kg| kg == 0.0).count();

        Self {
            days: records.len(),
            total_h2_kg,
            avg_daily_h2_kg,
            days_at_min_soc,
            zero_h2_days,
            min_soc_threshold,
        }
    }

    pub fn has_average(&self) -> bool {
        !self.avg_daily_h2_kg.is_nan()
    }
}
