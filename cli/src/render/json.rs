use std::io::Write;

use anyhow::Result;
use serde::Serialize;
use solarh2_core::{DailyRecord, Extrema, MonthlySummary, Series};

use super::{MonthView, ReportRenderer};

#[derive(Serialize)]
struct SeriesExtrema {
    series: Series,
    unit: &'static str,
    extrema: Option<Extrema>,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    month: &'static str,
    year: i32,
    source: &'a str,
    summary: &'a MonthlySummary,
    extrema: Vec<SeriesExtrema>,
    records: &'a [DailyRecord],
}

pub struct JsonRenderer;

impl ReportRenderer for JsonRenderer {
    fn render(&self, view: &MonthView<'_>, out: &mut dyn Write) -> Result<()> {
        let records = &view.dataset.records;
        let report = JsonReport {
            month: view.dataset.month.name(),
            year: view.year,
            source: &view.dataset.source,
            summary: view.summary,
            extrema: Series::ALL
                .iter()
                .map(|&series| SeriesExtrema {
                    series,
                    unit: series.unit(),
                    extrema: series.extrema(records),
                })
                .collect(),
            records,
        };
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
        Ok(())
    }
}
