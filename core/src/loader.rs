use chrono::Month;
use tracing::debug;

use crate::error::LoadError;
use crate::model::daily_record::DailyRecord;
use crate::model::dataset::MonthlyDataset;
use crate::raw::{RawRow, RawTable};

pub const DAY: &str = "Day";
pub const PV_TOTAL_MWH: &str = "PV_Total_MWh";
pub const PV_TO_H2_KWH: &str = "PV_to_H2_kWh";
pub const BATT_TO_H2_KWH: &str = "Batt_to_H2_kWh";
pub const H2_START_HOUR: &str = "H2_Start_Hour";
pub const H2_STOP_HOUR: &str = "H2_Stop_Hour";
pub const H2_PRODUCED_KG: &str = "H2_Produced_kg";
pub const FINAL_SOC_PCT: &str = "Final_SOC_pct";
pub const BATTERY_CYCLES_DAILY: &str = "Battery_Cycles_Daily";

pub const H2_DURATION: &str = "H2_Duration";
pub const H2_ENERGY_TOTAL_KWH: &str = "H2_Energy_Total_kWh";

pub const REQUIRED_COLUMNS: [&str; 9] = [
    DAY,
    PV_TOTAL_MWH,
    PV_TO_H2_KWH,
    BATT_TO_H2_KWH,
    H2_START_HOUR,
    H2_STOP_HOUR,
    H2_PRODUCED_KG,
    FINAL_SOC_PCT,
    BATTERY_CYCLES_DAILY,
];

/// Accepted range of a numeric cell.
#[derive(Debug, Clone, Copy)]
enum Domain {
    Any,
    NonNegative,
    Between(f64, f64),
}

impl Domain {
    fn check(self, value: f64) -> Result<f64, String> {
        match self {
            Domain::NonNegative if value < 0.0 => Err("must not be negative".to_string()),
            Domain::Between(lo, hi) if value < lo || value > hi => {
                Err(format!("must be between {} and {}", lo, hi))
            }
            _ => Ok(value),
        }
    }
}

enum Cell {
    Absent,
    Value(f64),
    Malformed,
}

fn read_cell(raw: &str) -> Cell {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Cell::Absent;
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_nan() => Cell::Absent,
        Ok(v) if v.is_infinite() => Cell::Malformed,
        Ok(v) => Cell::Value(v),
        Err(_) => Cell::Malformed,
    }
}

enum Day {
    Unparseable,
    BeforeFirst,
    Valid(u32),
    Invalid(&'static str),
}

fn read_day(raw: &str) -> Day {
    match read_cell(raw) {
        Cell::Value(v) if v < 1.0 => Day::BeforeFirst,
        Cell::Value(v) if v.fract() != 0.0 => Day::Invalid("must be a whole number"),
        Cell::Value(v) if v > f64::from(u32::MAX) => Day::Invalid("too large"),
        Cell::Value(v) => Day::Valid(v as u32),
        Cell::Absent | Cell::Malformed => Day::Unparseable,
    }
}

/// Position of each required column in the trimmed header.
struct Columns {
    day: usize,
    pv_total: usize,
    pv_to_h2: usize,
    batt_to_h2: usize,
    h2_start: usize,
    h2_stop: usize,
    h2_produced: usize,
    final_soc: usize,
    cycles: usize,
    /// Everything else, passed through.
    extra: Vec<(usize, String)>,
}

impl Columns {
    fn resolve(headers: &[String], file: &str) -> Result<Self, LoadError> {
        let find = |name: &str| headers.iter().position(|h| h == name);

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|&&name| find(name).is_none())
            .map(|&name| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(LoadError::MissingColumns {
                file: file.to_string(),
                columns: missing,
            });
        }

        let idx = |name: &str| find(name).unwrap_or_default();
        let required: Vec<usize> = REQUIRED_COLUMNS.iter().map(|&name| idx(name)).collect();
        let extra = headers
            .iter()
            .enumerate()
            .filter(|(i, _)| !required.contains(i))
            .map(|(i, h)| (i, h.clone()))
            .collect();

        Ok(Self {
            day: idx(DAY),
            pv_total: idx(PV_TOTAL_MWH),
            pv_to_h2: idx(PV_TO_H2_KWH),
            batt_to_h2: idx(BATT_TO_H2_KWH),
            h2_start: idx(H2_START_HOUR),
            h2_stop: idx(H2_STOP_HOUR),
            h2_produced: idx(H2_PRODUCED_KG),
            final_soc: idx(FINAL_SOC_PCT),
            cycles: idx(BATTERY_CYCLES_DAILY),
            extra,
        })
    }
}

struct RowReader<'a> {
    row: &'a RawRow,
    file: &'a str,
}

impl RowReader<'_> {
    fn error(&self, column: &str, value: &str, reason: impl Into<String>) -> LoadError {
        LoadError::Parse {
            file: self.file.to_string(),
            line: self.row.line,
            column: column.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    fn optional(&self, index: usize, column: &str, domain: Domain) -> Result<Option<f64>, LoadError> {
        let raw = self.row.cell(index);
        match read_cell(raw) {
            Cell::Absent => Ok(None),
            Cell::Malformed => Err(self.error(column, raw, "not a number")),
            Cell::Value(v) => domain
                .check(v)
                .map(Some)
                .map_err(|reason| self.error(column, raw, reason)),
        }
    }

    /// Range check for a value read earlier with `Domain::Any`.
    fn within(&self, value: Option<f64>, index: usize, column: &str, domain: Domain) -> Result<Option<f64>, LoadError> {
        value
            .map(|v| domain.check(v).map_err(|reason| self.error(column, self.row.cell(index), reason)))
            .transpose()
    }

    fn required(&self, index: usize, column: &str, domain: Domain) -> Result<f64, LoadError> {
        self.optional(index, column, domain)?
            .ok_or_else(|| self.error(column, self.row.cell(index), "value is required"))
    }
}

fn build_record(day: u32, row: &RawRow, cols: &Columns, file: &str) -> Result<DailyRecord, LoadError> {
    let r = RowReader { row, file };
    let hours = Domain::Between(0.0, 24.0);

    let pv_total_mwh = r.required(cols.pv_total, PV_TOTAL_MWH, Domain::NonNegative)?;
    let pv_to_h2_kwh = r.required(cols.pv_to_h2, PV_TO_H2_KWH, Domain::NonNegative)?;
    let batt_to_h2_kwh = r.required(cols.batt_to_h2, BATT_TO_H2_KWH, Domain::NonNegative)?;
    let start = r.optional(cols.h2_start, H2_START_HOUR, Domain::Any)?;
    let stop = r.optional(cols.h2_stop, H2_STOP_HOUR, Domain::Any)?;
    let h2_produced_kg = r.optional(cols.h2_produced, H2_PRODUCED_KG, Domain::NonNegative)?;
    let final_soc_pct = r.required(cols.final_soc, FINAL_SOC_PCT, Domain::Between(0.0, 100.0))?;
    let battery_cycles_daily = r.required(cols.cycles, BATTERY_CYCLES_DAILY, Domain::NonNegative)?;

    // No production means no operating window; its hours are not checked.
    let producing = h2_produced_kg.is_some_and(|kg| kg != 0.0);
    let (h2_start_hour, h2_stop_hour, h2_duration_hours) = if producing {
        let start = r.within(start, cols.h2_start, H2_START_HOUR, hours)?;
        let stop = r.within(stop, cols.h2_stop, H2_STOP_HOUR, hours)?;
        let duration = match (start, stop) {
            (Some(a), Some(b)) => (b - a).max(0.0),
            _ => 0.0,
        };
        (start, stop, duration)
    } else {
        (None, None, 0.0)
    };

    let extra = cols
        .extra
        .iter()
        .map(|(i, name)| (name.clone(), row.cell(*i).to_string()))
        .collect();

    Ok(DailyRecord {
        day,
        pv_total_mwh,
        pv_to_h2_kwh,
        batt_to_h2_kwh,
        h2_start_hour,
        h2_stop_hour,
        h2_produced_kg,
        final_soc_pct,
        battery_cycles_daily,
        h2_duration_hours,
        h2_energy_total_kwh: pv_to_h2_kwh + batt_to_h2_kwh,
        extra,
    })
}

/// Validates, cleans and derives the rows of one month's table.
///
/// Rows whose `Day` is not a number are dropped, as are days below 1. A
/// numeric day that is not a whole number is a parse error. The rest are
/// sorted by day, keeping file order between equal days.
/// `raw` is only read.
pub fn normalize(raw: &RawTable, file: &str) -> Result<(Vec<String>, Vec<DailyRecord>), LoadError> {
    let headers: Vec<String> = raw.headers.iter().map(|h| h.trim().to_string()).collect();
    let cols = Columns::resolve(&headers, file)?;

    let mut unparseable = 0usize;
    let mut before_first = 0usize;
    let mut kept = Vec::with_capacity(raw.rows.len());
    for row in &raw.rows {
        match read_day(row.cell(cols.day)) {
            Day::Unparseable => unparseable += 1,
            Day::BeforeFirst => before_first += 1,
            Day::Valid(day) => kept.push((day, row)),
            Day::Invalid(reason) => {
                return Err(LoadError::Parse {
                    file: file.to_string(),
                    line: row.line,
                    column: DAY.to_string(),
                    value: row.cell(cols.day).to_string(),
                    reason: reason.to_string(),
                })
            }
        }
    }

    debug!(
        file,
        rows = raw.rows.len(),
        kept = kept.len(),
        unparseable,
        before_first,
        "filtered rows"
    );

    if kept.is_empty() {
        return Err(LoadError::EmptyDataset {
            file: file.to_string(),
        });
    }

    let mut records = kept
        .into_iter()
        .map(|(day, row)| build_record(day, row, &cols, file))
        .collect::<Result<Vec<_>, _>>()?;
    records.sort_by_key(|r| r.day);

    let extra_columns = cols.extra.into_iter().map(|(_, name)| name).collect();
    Ok((extra_columns, records))
}

/// Loads one month; nothing partial is ever returned.
pub fn load_dataset(month: Month, raw: &RawTable, file: &str) -> Result<MonthlyDataset, LoadError> {
    let (extra_columns, records) = normalize(raw, file)?;
    Ok(MonthlyDataset {
        month,
        source: file.to_string(),
        extra_columns,
        records,
    })
}
