use std::io::Write;

use anyhow::Result;
use solarh2_core::write_csv;

use super::{MonthView, ReportRenderer};

/// Same table as the input, derived columns appended, one decimal.
pub struct CsvRenderer;

impl ReportRenderer for CsvRenderer {
    fn render(&self, view: &MonthView<'_>, out: &mut dyn Write) -> Result<()> {
        write_csv(view.dataset, out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::fixtures;

    #[test]
    fn test_csv_output() {
        let dataset = fixtures::dataset();
        let summary = fixtures::summary(&dataset);
        let view = MonthView { dataset: &dataset, summary: &summary, year: 2023 };

        let mut out = Vec::new();
        CsvRenderer.render(&view, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();

        assert!(lines.next().unwrap().ends_with("Note,H2_Duration,H2_Energy_Total_kWh"));
        assert_eq!(
            lines.next().unwrap(),
            "1,20.0,100.0,20.0,6.0,14.0,50.0,60.0,1.0,<clear & sunny>,8.0,120.0"
        );
        assert_eq!(lines.next().unwrap(), "2,5.0,0.0,0.0,,,0.0,20.0,0.5,overcast,0.0,0.0");
    }
}
