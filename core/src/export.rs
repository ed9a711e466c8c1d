use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::loader::{H2_DURATION, H2_ENERGY_TOTAL_KWH, REQUIRED_COLUMNS};
use crate::model::dataset::MonthlyDataset;

fn one_decimal(value: f64) -> String {
    format!("{:.1}", value)
}

fn optional(value: Option<f64>) -> String {
    value.map(one_decimal).unwrap_or_default()
}

pub fn header(dataset: &MonthlyDataset) -> Vec<String> {
    REQUIRED_COLUMNS
        .iter()
        .map(|c| c.to_string())
        .chain(dataset.extra_columns.iter().cloned())
        .chain([H2_DURATION.to_string(), H2_ENERGY_TOTAL_KWH.to_string()])
        .collect()
}

/// Writes the normalized table as CSV, numbers rounded to one decimal.
/// Pass-through columns are written as they were read.
pub fn write_csv<W: Write>(dataset: &MonthlyDataset, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(header(dataset))?;

    for r in &dataset.records {
        let mut row = vec![
            r.day.to_string(),
            one_decimal(r.pv_total_mwh),
            one_decimal(r.pv_to_h2_kwh),
            one_decimal(r.batt_to_h2_kwh),
            optional(r.h2_start_hour),
            optional(r.h2_stop_hour),
            optional(r.h2_produced_kg),
            one_decimal(r.final_soc_pct),
            one_decimal(r.battery_cycles_daily),
        ];
        // Same order as `extra_columns`, duplicates included.
        row.extend(r.extra.iter().map(|(_, value)| value.clone()));
        row.push(one_decimal(r.h2_duration_hours));
        row.push(one_decimal(r.h2_energy_total_kwh));
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn export_csv(dataset: &MonthlyDataset, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("Could not create {}", parent.display()))?;
    }
    let file = File::create(path).with_context(|| format!("Could not create {}", path.display()))?;
    write_csv(dataset, BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::load_dataset;
    use crate::raw::RawTable;
    use chrono::Month;

    fn dataset() -> MonthlyDataset {
        let data = "Day,PV_Total_MWh,PV_to_H2_kWh,Batt_to_H2_kWh,H2_Start_Hour,H2_Stop_Hour,H2_Produced_kg,Final_SOC_pct,Battery_Cycles_Daily,Weather\n\
                    2,5.04,0,0,5,9,0,20.46,0.5,rain\n\
                    1,20.26,100.04,20.02,6.24,14.5,50.36,60,1.27,sun\n";
        let raw = RawTable::from_reader(data.as_bytes(), "t.csv").unwrap();
        load_dataset(Month::May, &raw, "t.csv").unwrap()
    }

    #[test]
    fn test_write_csv_rounds_and_orders() {
        let mut out = Vec::new();
        write_csv(&dataset(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines[0],
            "Day,PV_Total_MWh,PV_to_H2_kWh,Batt_to_H2_kWh,H2_Start_Hour,H2_Stop_Hour,H2_Produced_kg,Final_SOC_pct,Battery_Cycles_Daily,Weather,H2_Duration,H2_Energy_Total_kWh"
        );
        assert_eq!(lines[1], "1,20.3,100.0,20.0,6.2,14.5,50.4,60.0,1.3,sun,8.3,120.1");
        assert_eq!(lines[2], "2,5.0,0.0,0.0,,,0.0,20.5,0.5,rain,0.0,0.0");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_export_csv_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("solar_h2_may_2023_detailed.csv");
        export_csv(&dataset(), &path).unwrap();

        let reread = RawTable::from_path(&path).unwrap();
        assert_eq!(reread.len(), 2);
        assert_eq!(reread.headers.len(), 12);
    }

    #[test]
    fn test_duplicate_extra_columns_keep_their_values() {
        let data = "Day,PV_Total_MWh,PV_to_H2_kWh,Batt_to_H2_kWh,H2_Start_Hour,H2_Stop_Hour,H2_Produced_kg,Final_SOC_pct,Battery_Cycles_Daily,Note,Note\n\
                    1,1,1,1,6,7,1,50,1,first,second\n";
        let raw = RawTable::from_reader(data.as_bytes(), "t.csv").unwrap();
        let dataset = load_dataset(Month::May, &raw, "t.csv").unwrap();

        let mut out = Vec::new();
        write_csv(&dataset, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].contains("Note,Note,H2_Duration"));
        assert_eq!(lines[1], "1,1.0,1.0,1.0,6.0,7.0,1.0,50.0,1.0,first,second,1.0,2.0");
    }

    #[test]
    fn test_export_csv_creates_parent_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("exports").join("solar_h2_may_2023_detailed.csv");
        export_csv(&dataset(), &path).unwrap();
        assert!(path.exists());
    }
}
