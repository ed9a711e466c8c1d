use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Result};
use chrono::Month;
use tracing::{info, warn};

use crate::export::export_csv;
use crate::loader::load_dataset;
use crate::model::dataset::MonthlyDataset;
use crate::model::summary::MonthlySummary;
use crate::repository::{DatasetRepository, MonthFile};

#[derive(Debug)]
pub struct LoadFailure {
    pub path: PathBuf,
    pub error: anyhow::Error,
}

/// Outcome of loading every available month.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Calendar order.
    pub datasets: Vec<MonthlyDataset>,
    pub failures: Vec<LoadFailure>,
}

impl LoadReport {
    pub fn get(&self, month: Month) -> Option<&MonthlyDataset> {
        self.datasets.iter().find(|d| d.month == month)
    }

    pub fn months(&self) -> Vec<Month> {
        self.datasets.iter().map(|d| d.month).collect()
    }
}

pub struct DatasetService<R: DatasetRepository> {
    repo: R,
}

impl<R: DatasetRepository> DatasetService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn available_months(&self) -> Result<Vec<MonthFile>> {
        self.repo.list()
    }

    pub fn load_month(&self, month: Month) -> Result<MonthlyDataset> {
        let file = self
            .repo
            .list()?
            .into_iter()
            .find(|f| f.month == month)
            .ok_or_else(|| anyhow!("No data file for {}", month.name()))?;
        self.load_file(&file)
    }

    fn load_file(&self, file: &MonthFile) -> Result<MonthlyDataset> {
        let raw = self.repo.read(file)?;
        let dataset = load_dataset(file.month, &raw, &file.label())?;
        info!(
            month = file.month.name(),
            days = dataset.len(),
            file = %file.path.display(),
            "loaded month"
        );
        Ok(dataset)
    }

    /// Loads every month it can; a bad file is recorded and skipped.
    pub fn load_all(&self) -> Result<LoadReport> {
        let mut report = LoadReport::default();
        for file in self.repo.list()? {
            match self.load_file(&file) {
                Ok(dataset) => report.datasets.push(dataset),
                Err(error) => {
                    warn!(file = %file.path.display(), "skipping month: {:#}", error);
                    report.failures.push(LoadFailure {
                        path: file.path,
                        error,
                    });
                }
            }
        }
        Ok(report)
    }

    /// Writes `dataset` as CSV to `path`. A path that is one of the source
    /// files is refused unless `overwrite` is set.
    pub fn export_month(&self, dataset: &MonthlyDataset, path: &Path, overwrite: bool) -> Result<()> {
        if !overwrite {
            if let Some(source) = self.repo.list()?.into_iter().find(|f| same_file(&f.path, path)) {
                bail!(
                    "Refusing to overwrite {}, the source file for {}",
                    path.display(),
                    source.month.name()
                );
            }
        }
        export_csv(dataset, path)?;
        info!(month = dataset.month.name(), file = %path.display(), "exported month");
        Ok(())
    }

    pub fn summarize(&self, dataset: &MonthlyDataset, min_soc_threshold: f64) -> MonthlySummary {
        MonthlySummary::from_records(&dataset.records, min_soc_threshold)
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoadError;
    use crate::raw::RawTable;
    use std::collections::HashMap;

    const HEADER: &str = "Day,PV_Total_MWh,PV_to_H2_kWh,Batt_to_H2_kWh,H2_Start_Hour,H2_Stop_Hour,H2_Produced_kg,Final_SOC_pct,Battery_Cycles_Daily";

    struct MockRepo {
        files: HashMap<String, String>,
    }

    impl MockRepo {
        fn new(files: &[(&str, &str)]) -> Self {
            Self {
                files: files
                    .iter()
                    .map(|(name, body)| (name.to_string(), body.to_string()))
                    .collect(),
            }
        }
    }

    impl DatasetRepository for MockRepo {
        fn list(&self) -> Result<Vec<MonthFile>> {
            let mut files: Vec<MonthFile> = self
                .files
                .keys()
                .filter_map(|name| {
                    crate::model::month::detect_month(name).map(|month| MonthFile {
                        month,
                        path: PathBuf::from(name),
                    })
                })
                .collect();
            files.sort_by_key(|f| f.month.number_from_month());
            Ok(files)
        }

        fn read(&self, file: &MonthFile) -> Result<RawTable> {
            let body = &self.files[&file.label()];
            Ok(RawTable::from_reader(body.as_bytes(), &file.label())?)
        }
    }

    fn good() -> String {
        format!("{}\n2,5,0,0,5,9,0,20,0.5\n1,20,100,20,6,14,50,60,1\n", HEADER)
    }

    #[test]
    fn test_load_month() {
        let body = good();
        let service = DatasetService::new(MockRepo::new(&[("june.csv", body.as_str())]));
        let dataset = service.load_month(Month::June).unwrap();
        assert_eq!(dataset.month, Month::June);
        assert_eq!(dataset.first_day(), Some(1));
        assert_eq!(dataset.last_day(), Some(2));

        let summary = service.summarize(&dataset, 20.5);
        assert_eq!(summary.total_h2_kg, 50.0);
        assert_eq!(summary.avg_daily_h2_kg, 25.0);
        assert_eq!(summary.days_at_min_soc, 1);
        assert_eq!(summary.zero_h2_days, 1);
    }

    #[test]
    fn test_load_month_not_available() {
        let body = good();
        let service = DatasetService::new(MockRepo::new(&[("june.csv", body.as_str())]));
        let err = service.load_month(Month::July).unwrap_err();
        assert!(err.to_string().contains("July"));
    }

    #[test]
    fn test_load_month_keeps_typed_error() {
        let service = DatasetService::new(MockRepo::new(&[("june.csv", "Day,PV_Total_MWh\n1,2\n")]));
        let err = service.load_month(Month::June).unwrap_err();
        match err.downcast_ref::<LoadError>() {
            Some(LoadError::MissingColumns { file, columns }) => {
                assert_eq!(file, "june.csv");
                assert!(columns.contains(&"Final_SOC_pct".to_string()));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_load_all_skips_bad_months() {
        let body = good();
        let empty = format!("{}\nTotal,1,1,1,1,1,1,1,1\n", HEADER);
        let service = DatasetService::new(MockRepo::new(&[
            ("march.csv", body.as_str()),
            ("january.csv", body.as_str()),
            ("february.csv", empty.as_str()),
        ]));

        let report = service.load_all().unwrap();
        assert_eq!(report.months(), vec![Month::January, Month::March]);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].path, PathBuf::from("february.csv"));
        assert!(matches!(
            report.failures[0].error.downcast_ref::<LoadError>(),
            Some(LoadError::EmptyDataset { .. })
        ));
        assert!(report.get(Month::March).is_some());
        assert!(report.get(Month::February).is_none());
    }

    #[test]
    fn test_export_month_keeps_source_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("solar_h2_january_2023_detailed.csv");
        let body = format!("{}\n1,13.48,5122.44,190,7.25,15.5,96.66,57,0.8\n", HEADER);
        std::fs::write(&source, &body).unwrap();

        let repo = crate::repository::FileDatasetRepository::new(dir.path().to_path_buf()).unwrap();
        let service = DatasetService::new(repo);
        let dataset = service.load_month(Month::January).unwrap();

        let err = service.export_month(&dataset, &source, false).unwrap_err();
        assert!(err.to_string().contains("Refusing to overwrite"));
        assert_eq!(std::fs::read_to_string(&source).unwrap(), body);

        // Same file through a different spelling of the path.
        let dotted = dir.path().join(".").join("solar_h2_january_2023_detailed.csv");
        assert!(service.export_month(&dataset, &dotted, false).is_err());

        let target = dir.path().join("exports").join("solar_h2_january_2023_detailed.csv");
        service.export_month(&dataset, &target, false).unwrap();
        assert!(std::fs::read_to_string(&target).unwrap().contains("13.5"));
        assert_eq!(service.available_months().unwrap().len(), 1);

        service.export_month(&dataset, &source, true).unwrap();
        assert_ne!(std::fs::read_to_string(&source).unwrap(), body);
    }
}
