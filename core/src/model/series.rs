use serde::Serialize;

use crate::model::daily_record::DailyRecord;

/// A per-day quantity that the presentation layer can chart.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Series {
    PvTotal,
    H2Produced,
    BattToH2,
    PvToH2,
    H2EnergyTotal,
    H2Duration,
    FinalSoc,
    BatteryCycles,
}

/// Largest and smallest value of a series with the day each first occurs on.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct Extrema {
    pub max: f64,
    pub max_day: u32,
    pub min: f64,
    pub min_day: u32,
}

impl Series {
    pub const ALL: [Series; 8] = [
        Series::PvTotal,
        Series::H2Produced,
        Series::BattToH2,
        Series::PvToH2,
        Series::H2EnergyTotal,
        Series::H2Duration,
        Series::FinalSoc,
        Series::BatteryCycles,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Series::PvTotal => "Daily PV Production",
            Series::H2Produced => "Daily H₂ Production",
            Series::BattToH2 => "Battery → Electrolyzer",
            Series::PvToH2 => "PV → Electrolyzer",
            Series::H2EnergyTotal => "Total Energy Used by Electrolyzer (PV + Battery)",
            Series::H2Duration => "H₂ On Duration (Hours)",
            Series::FinalSoc => "Battery End-of-Day SOC",
            Series::BatteryCycles => "Daily Battery Cycles",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Series::PvTotal => "MWh",
            Series::H2Produced => "kg",
            Series::BattToH2 | Series::PvToH2 | Series::H2EnergyTotal => "kWh",
            Series::H2Duration => "h",
            Series::FinalSoc => "%",
            Series::BatteryCycles => "cycles",
        }
    }

    pub fn value(self, record: &DailyRecord) -> Option<f64> {
        match self {
            Series::PvTotal => Some(record.pv_total_mwh),
            Series::H2Produced => record.h2_produced_kg,
            Series::BattToH2 => Some(record.batt_to_h2_kwh),
            Series::PvToH2 => Some(record.pv_to_h2_kwh),
            Series::H2EnergyTotal => Some(record.h2_energy_total_kwh),
            Series::H2Duration => Some(record.h2_duration_hours),
            Series::FinalSoc => Some(record.final_soc_pct),
            Series::BatteryCycles => Some(record.battery_cycles_daily),
        }
    }

    /// (day, value) pairs, skipping absent values.
    pub fn points(self, records: &[DailyRecord]) -> Vec<(u32, f64)> {
        records
            .iter()
            .filter_map(|r| self.value(r).map(|v| (r.day, v)))
            .filter(|(_, v)| !v.is_nan())
            .collect()
    }

    pub fn extrema(self, records: &[DailyRecord]) -> Option<Extrema> {
        let points = self.points(records);
        let (&(first_day, first), rest) = points.split_first()?;
        let mut ext = Extrema {
            max: first,
            max_day: first_day,
            min: first,
            min_day: first_day,
        };
        for &(day, value) in rest {
            // Strict comparisons keep the first occurrence.
            if value > ext.max {
                ext.max = value;
                ext.max_day = day;
            }
            if value < ext.min {
                ext.min = value;
                ext.min_day = day;
            }
        }
        Some(ext)
    }

    /// Y axis tick spacing, roughly five ticks up to the series maximum.
    pub fn axis_step(self, records: &[DailyRecord]) -> f64 {
        let max = self.extrema(records).map(|e| e.max).unwrap_or(0.0);
        match self {
            Series::H2Duration => 6.0,
            Series::FinalSoc => 20.0,
            Series::PvTotal | Series::H2Produced => {
                if max > 0.0 {
                    round_to(max / 5.0, 1).max(0.1)
                } else {
                    1.0
                }
            }
            Series::BattToH2 | Series::PvToH2 => {
                if max > 0.0 {
                    round_to(max / 5.0, 0).max(1.0)
                } else {
                    1.0
                }
            }
            Series::H2EnergyTotal => round_to(max / 5.0, 0).max(1.0),
            Series::BatteryCycles => round_to(max / 5.0, 1).max(0.5),
        }
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(day: u32, pv: f64, h2: Option<f64>, cycles: f64) -> DailyRecord {
        DailyRecord {
            day,
            pv_total_mwh: pv,
            pv_to_h2_kwh: 0.0,
            batt_to_h2_kwh: 0.0,
            h2_start_hour: None,
            h2_stop_hour: None,
            h2_produced_kg: h2,
            final_soc_pct: 50.0,
            battery_cycles_daily: cycles,
            h2_duration_hours: 0.0,
            h2_energy_total_kwh: 0.0,
            extra: Vec::new(),
        }
    }

    #[test]
    fn test_extrema_first_occurrence() {
        let records = vec![
            record(1, 10.0, Some(5.0), 1.0),
            record(2, 30.0, None, 1.0),
            record(3, 30.0, Some(1.0), 1.0),
            record(4, 10.0, Some(1.0), 1.0),
        ];

        let pv = Series::PvTotal.extrema(&records).unwrap();
        assert_eq!((pv.max, pv.max_day), (30.0, 2));
        assert_eq!((pv.min, pv.min_day), (10.0, 1));

        // Day 2 has no H2 value and is skipped.
        let h2 = Series::H2Produced.extrema(&records).unwrap();
        assert_eq!((h2.max, h2.max_day), (5.0, 1));
        assert_eq!((h2.min, h2.min_day), (1.0, 3));
    }

    #[test]
    fn test_extrema_empty() {
        assert!(Series::FinalSoc.extrema(&[]).is_none());
        assert!(Series::H2Produced
            .extrema(&[record(1, 1.0, None, 0.0)])
            .is_none());
    }

    #[test]
    fn test_axis_step() {
        let records = vec![record(1, 23.0, Some(120.0), 1.2), record(2, 4.0, Some(0.0), 0.4)];
        assert_eq!(Series::PvTotal.axis_step(&records), 4.6);
        assert_eq!(Series::H2Produced.axis_step(&records), 24.0);
        assert_eq!(Series::BatteryCycles.axis_step(&records), 0.5);
        assert_eq!(Series::H2Duration.axis_step(&records), 6.0);
        assert_eq!(Series::FinalSoc.axis_step(&records), 20.0);
        // Energy columns are all zero here.
        assert_eq!(Series::BattToH2.axis_step(&records), 1.0);
        assert_eq!(Series::H2EnergyTotal.axis_step(&records), 1.0);
    }
}
