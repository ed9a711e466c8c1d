use std::io::Write;

use anyhow::Result;
use solarh2_core::DailyRecord;
use tabled::settings::object::Rows;
use tabled::settings::{Color, Modify, Style};
use tabled::{Table, Tabled};

use super::{fmt_opt, metrics, MonthView, ReportRenderer};

#[derive(Tabled)]
struct DayRow {
    #[tabled(rename = "Day")]
    day: u32,
    #[tabled(rename = "PV (MWh)")]
    pv_total: String,
    #[tabled(rename = "PV→H₂ (kWh)")]
    pv_to_h2: String,
    #[tabled(rename = "Batt→H₂ (kWh)")]
    batt_to_h2: String,
    #[tabled(rename = "Start (h)")]
    start: String,
    #[tabled(rename = "Stop (h)")]
    stop: String,
    #[tabled(rename = "H₂ (kg)")]
    h2: String,
    #[tabled(rename = "On (h)")]
    duration: String,
    #[tabled(rename = "Electrolyzer (kWh)")]
    energy: String,
    #[tabled(rename = "SOC (%)")]
    soc: String,
    #[tabled(rename = "Cycles")]
    cycles: String,
}

impl From<&DailyRecord> for DayRow {
    fn from(r: &DailyRecord) -> Self {
        Self {
            day: r.day,
            pv_total: format!("{:.1}", r.pv_total_mwh),
            pv_to_h2: format!("{:.1}", r.pv_to_h2_kwh),
            batt_to_h2: format!("{:.1}", r.batt_to_h2_kwh),
            start: fmt_opt(r.h2_start_hour),
            stop: fmt_opt(r.h2_stop_hour),
            h2: fmt_opt(r.h2_produced_kg),
            duration: format!("{:.1}", r.h2_duration_hours),
            energy: format!("{:.1}", r.h2_energy_total_kwh),
            soc: format!("{:.1}", r.final_soc_pct),
            cycles: format!("{:.1}", r.battery_cycles_daily),
        }
    }
}

/// Metric header followed by the daily table.
pub struct TableRenderer {
    pub colored: bool,
}

impl ReportRenderer for TableRenderer {
    fn render(&self, view: &MonthView<'_>, out: &mut dyn Write) -> Result<()> {
        if self.colored {
            writeln!(out, "\x1b[1;36m{} Results\x1b[0m", view.title())?;
        } else {
            writeln!(out, "{} Results", view.title())?;
        }
        for (label, value) in metrics(view.summary) {
            writeln!(out, "  {:<22} {}", label, value)?;
        }
        writeln!(out)?;

        let rows: Vec<DayRow> = view.dataset.records.iter().map(DayRow::from).collect();
        let mut table = Table::new(rows);
        table.with(Style::modern());
        if self.colored {
            table.with(Modify::new(Rows::first()).with(Color::FG_CYAN));
        }
        writeln!(out, "{}", table)?;
        Ok(())
    }
}
