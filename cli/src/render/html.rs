//! Self-contained HTML report. No external assets, same input gives the
//! same bytes.

use std::io::Write;

use anyhow::Result;
use solarh2_core::{Series, PLANT_INFO};

use super::{fmt_opt, metrics, MonthView, ReportRenderer};

const STYLE: &str = "body{font-family:sans-serif;margin:2em;color:#222}\
.cards{display:flex;gap:1em;margin:1em 0}\
.card{border:1px solid #ccc;border-radius:6px;padding:.8em 1.2em}\
.card .v{font-size:1.6em;font-weight:bold}\
table{border-collapse:collapse;margin:1em 0}\
th,td{border:1px solid #ddd;padding:.3em .6em;text-align:right}\
th{background:#f0f4f8}";

struct Html {
    buf: String,
}

impl Html {
    fn new() -> Self {
        Self { buf: String::with_capacity(16 * 1024) }
    }

    fn push<S: AsRef<str>>(&mut self, s: S) {
        self.buf.push_str(s.as_ref());
    }

    fn text(&mut self, s: &str) {
        self.buf.push_str(&esc(s));
    }

    fn row<I, S>(&mut self, tag: &str, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.push("<tr>");
        for cell in cells {
            self.push(format!("<{tag}>"));
            self.text(cell.as_ref());
            self.push(format!("</{tag}>"));
        }
        self.push("</tr>\n");
    }

    fn finish(self) -> String {
        self.buf
    }
}

fn esc(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub struct HtmlRenderer;

impl HtmlRenderer {
    fn document(view: &MonthView<'_>) -> String {
        let dataset = view.dataset;
        let mut w = Html::new();

        w.push("<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\"><title>");
        w.text(&format!("Solar-H₂ Results – {}", view.title()));
        w.push("</title><style>");
        w.push(STYLE);
        w.push("</style></head><body>\n<h1>");
        w.text(&format!("{} Results", view.title()));
        w.push("</h1>\n<p class=\"source\">");
        w.text(&dataset.source);
        w.push("</p>\n");

        w.push("<div class=\"cards\">");
        for (label, value) in metrics(view.summary) {
            w.push("<div class=\"card\"><div class=\"l\">");
            w.text(&label);
            w.push("</div><div class=\"v\">");
            w.text(&value);
            w.push("</div></div>");
        }
        w.push("</div>\n");

        w.push("<h2>System</h2><ul>");
        for (label, value) in [
            ("PV Plant", PLANT_INFO.pv_plant),
            ("Battery", PLANT_INFO.battery),
            ("Electrolyzer", PLANT_INFO.electrolyzer),
            ("Simulation", PLANT_INFO.simulation),
        ] {
            w.push("<li><b>");
            w.text(label);
            w.push("</b>: ");
            w.text(value);
            w.push("</li>");
        }
        w.push("</ul>\n");

        w.push("<h2>Extremes</h2><table>\n");
        w.row("th", ["Series", "Max", "Day", "Min", "Day"]);
        for series in Series::ALL {
            let Some(ext) = series.extrema(&dataset.records) else {
                continue;
            };
            w.row(
                "td",
                [
                    format!("{} ({})", series.title(), series.unit()),
                    format!("{:.2}", ext.max),
                    ext.max_day.to_string(),
                    format!("{:.2}", ext.min),
                    ext.min_day.to_string(),
                ],
            );
        }
        w.push("</table>\n");

        w.push("<h2>Daily Data</h2><table>\n");
        let mut header: Vec<String> = [
            "Day", "PV (MWh)", "PV→H₂ (kWh)", "Batt→H₂ (kWh)", "Start (h)", "Stop (h)",
            "H₂ (kg)", "On (h)", "Electrolyzer (kWh)", "SOC (%)", "Cycles",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        header.extend(dataset.extra_columns.iter().cloned());
        w.row("th", &header);

        for r in &dataset.records {
            let mut cells = vec![
                r.day.to_string(),
                format!("{:.1}", r.pv_total_mwh),
                format!("{:.1}", r.pv_to_h2_kwh),
                format!("{:.1}", r.batt_to_h2_kwh),
                fmt_opt(r.h2_start_hour),
                fmt_opt(r.h2_stop_hour),
                fmt_opt(r.h2_produced_kg),
                format!("{:.1}", r.h2_duration_hours),
                format!("{:.1}", r.h2_energy_total_kwh),
                format!("{:.1}", r.final_soc_pct),
                format!("{:.1}", r.battery_cycles_daily),
            ];
            cells.extend(r.extra.iter().map(|(_, v)| v.clone()));
            w.row("td", &cells);
        }
        w.push("</table>\n</body></html>\n");

        w.finish()
    }
}

impl ReportRenderer for HtmlRenderer {
    fn render(&self, view: &MonthView<'_>, out: &mut dyn Write) -> Result<()> {
        out.write_all(Self::document(view).as_bytes())?;
        Ok(())
    }
}
