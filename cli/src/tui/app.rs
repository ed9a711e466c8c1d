use chrono::Month;
use solarh2_core::{MonthlyDataset, MonthlySummary, Series};

pub struct DashboardApp {
    pub datasets: Vec<MonthlyDataset>,
    pub summaries: Vec<MonthlySummary>,
    pub year: i32,
    pub month_index: usize,
    pub series_index: usize,
}

impl DashboardApp {
    /// Starts on `start` when it was loaded, otherwise on the first month.
    pub fn new(
        datasets: Vec<MonthlyDataset>,
        year: i32,
        min_soc_threshold: f64,
        start: Option<Month>,
    ) -> Self {
        let summaries = datasets
            .iter()
            .map(|d| MonthlySummary::from_records(&d.records, min_soc_threshold))
            .collect();
        let month_index = start
            .and_then(|m| datasets.iter().position(|d| d.month == m))
            .unwrap_or(0);
        Self {
            datasets,
            summaries,
            year,
            month_index,
            series_index: 0,
        }
    }

    pub fn next_month(&mut self) {
        if !self.datasets.is_empty() && self.month_index < self.datasets.len() - 1 {
            self.month_index += 1;
        }
    }

    pub fn previous_month(&mut self) {
        if self.month_index > 0 {
            self.month_index -= 1;
        }
    }

    pub fn next_series(&mut self) {
        self.series_index = (self.series_index + 1) % Series::ALL.len();
    }

    pub fn previous_series(&mut self) {
        self.series_index = if self.series_index == 0 {
            Series::ALL.len() - 1
        } else {
            self.series_index - 1
        };
    }

    pub fn series(&self) -> Series {
        Series::ALL[self.series_index]
    }

    pub fn has_previous(&self) -> bool {
        self.month_index > 0
    }

    pub fn has_next(&self) -> bool {
        self.month_index + 1 < self.datasets.len()
    }

    pub fn current(&self) -> Option<(&MonthlyDataset, &MonthlySummary)> {
        Some((
            self.datasets.get(self.month_index)?,
            self.summaries.get(self.month_index)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solarh2_core::{load_dataset, RawTable};

    fn month(m: Month) -> MonthlyDataset {
        let data = "Day,PV_Total_MWh,PV_to_H2_kWh,Batt_to_H2_kWh,H2_Start_Hour,H2_Stop_Hour,H2_Produced_kg,Final_SOC_pct,Battery_Cycles_Daily\n\
                    1,20,100,20,6,14,50,60,1\n";
        let raw = RawTable::from_reader(data.as_bytes(), "t.csv").unwrap();
        load_dataset(m, &raw, "t.csv").unwrap()
    }

    #[test]
    fn test_month_navigation_is_clamped() {
        let mut app = DashboardApp::new(
            vec![month(Month::January), month(Month::February)],
            2023,
            20.5,
            None,
        );
        assert_eq!(app.month_index, 0);
        assert!(!app.has_previous());

        app.previous_month();
        assert_eq!(app.month_index, 0);
        app.next_month();
        app.next_month();
        assert_eq!(app.month_index, 1);
        assert!(!app.has_next());
        assert_eq!(app.current().unwrap().0.month, Month::February);
    }

    #[test]
    fn test_start_month() {
        let app = DashboardApp::new(
            vec![month(Month::January), month(Month::June)],
            2023,
            20.5,
            Some(Month::June),
        );
        assert_eq!(app.month_index, 1);

        let fallback = DashboardApp::new(vec![month(Month::January)], 2023, 20.5, Some(Month::June));
        assert_eq!(fallback.month_index, 0);
    }

    #[test]
    fn test_series_navigation_wraps() {
        let mut app = DashboardApp::new(vec![month(Month::May)], 2023, 20.5, None);
        assert_eq!(app.series(), Series::PvTotal);
        app.previous_series();
        assert_eq!(app.series(), Series::BatteryCycles);
        app.next_series();
        app.next_series();
        assert_eq!(app.series(), Series::H2Produced);
    }

    #[test]
    fn test_empty_app() {
        let mut app = DashboardApp::new(Vec::new(), 2023, 20.5, None);
        app.next_month();
        assert!(app.current().is_none());
    }
}
