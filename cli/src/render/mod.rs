pub mod csv;
pub mod html;
pub mod json;
pub mod table;

use std::io::Write;

use anyhow::Result;
use clap::ValueEnum;
use solarh2_core::{MonthlyDataset, MonthlySummary};

/// What every renderer gets to draw.
pub struct MonthView<'a> {
    pub dataset: &'a MonthlyDataset,
    pub summary: &'a MonthlySummary,
    pub year: i32,
}

impl MonthView<'_> {
    pub fn title(&self) -> String {
        format!("{} {}", self.dataset.month.name(), self.year)
    }
}

pub trait ReportRenderer {
    fn render(&self, view: &MonthView<'_>, out: &mut dyn Write) -> Result<()>;
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderFormat {
    #[default]
    Table,
    Csv,
    Html,
    Json,
}

impl RenderFormat {
    /// `colored` only matters for terminal output.
    pub fn renderer(self, colored: bool) -> Box<dyn ReportRenderer> {
        match self {
            RenderFormat::Table => Box::new(table::TableRenderer { colored }),
            RenderFormat::Csv => Box::new(csv::CsvRenderer),
            RenderFormat::Html => Box::new(html::HtmlRenderer),
            RenderFormat::Json => Box::new(json::JsonRenderer),
        }
    }
}

/// The four headline metrics as (label, value).
pub fn metrics(summary: &MonthlySummary) -> Vec<(String, String)> {
    let avg = if summary.has_average() {
        format!("{:.1} kg", summary.avg_daily_h2_kg)
    } else {
        "n/a".to_string()
    };
    vec![
        ("Total H₂ Produced".to_string(), format!("{:.0} kg", summary.total_h2_kg)),
        ("Avg Daily H₂".to_string(), avg),
        ("Zero H₂ Days".to_string(), summary.zero_h2_days.to_string()),
        (
            format!("Days at ≤{}% SOC", summary.min_soc_threshold),
            summary.days_at_min_soc.to_string(),
        ),
    ]
}

pub fn fmt_opt(value: Option<f64>) -> String {
    value.map(|v| format!("{:.1}", v)).unwrap_or_else(|| "-".to_string())
}
