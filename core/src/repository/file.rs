use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use tracing::warn;

use crate::model::month::{detect_month, month_index};
use crate::raw::RawTable;
use crate::repository::traits::{DatasetRepository, MonthFile};

#[derive(Clone, Debug)]
pub struct FileDatasetRepository {
    data_dir: PathBuf,
}

impl FileDatasetRepository {
    pub fn new(data_dir: PathBuf) -> Result<Self> {
        if !data_dir.is_dir() {
            return Err(anyhow!("Data directory not found: {}", data_dir.display()));
        }
        Ok(FileDatasetRepository { data_dir })
    }

    fn csv_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        let entries = fs::read_dir(&self.data_dir)
            .with_context(|| format!("Could not list {}", self.data_dir.display()))?;
        for entry in entries {
            let path = entry?.path();
            let is_csv = path
                .extension()
                .and_then(|s| s.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
            if is_csv && path.is_file() {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }
}

impl DatasetRepository for FileDatasetRepository {
    fn list(&self) -> Result<Vec<MonthFile>> {
        let mut found: Vec<MonthFile> = Vec::new();
        for path in self.csv_files()? {
            let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
            let Some(month) = detect_month(name) else {
                warn!(file = %path.display(), "could not detect month from file name");
                continue;
            };
            if let Some(existing) = found.iter().find(|f| f.month == month) {
                warn!(
                    file = %path.display(),
                    kept = %existing.path.display(),
                    month = month.name(),
                    "duplicate month file ignored"
                );
                continue;
            }
            found.push(MonthFile { month, path });
        }
        found.sort_by_key(|f| month_index(f.month));
        Ok(found)
    }

    fn read(&self, file: &MonthFile) -> Result<RawTable> {
        Ok(RawTable::from_path(&file.path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Month;
    use std::path::Path;

    fn touch(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_list_detects_and_orders_months() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "solar_h2_march_2023_detailed.csv", "Day\n");
        touch(dir.path(), "solar_h2_january_2023_detailed.CSV", "Day\n");
        touch(dir.path(), "readme.txt", "");
        touch(dir.path(), "totals_2023.csv", "Day\n");
        touch(dir.path(), "z_march_copy.csv", "Day\n");

        let repo = FileDatasetRepository::new(dir.path().to_path_buf()).unwrap();
        let files = repo.list().unwrap();

        let months: Vec<Month> = files.iter().map(|f| f.month).collect();
        assert_eq!(months, vec![Month::January, Month::March]);
        // The first file name in sort order wins.
        assert!(files[1].label().ends_with("solar_h2_march_2023_detailed.csv"));
    }

    #[test]
    fn test_read_file() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "solar_h2_may_2023_detailed.csv", "Day,X\n1,2\n");
        let repo = FileDatasetRepository::new(dir.path().to_path_buf()).unwrap();
        let files = repo.list().unwrap();
        let table = repo.read(&files[0]).unwrap();
        assert_eq!(table.headers, vec!["Day", "X"]);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(FileDatasetRepository::new(dir.path().join("missing")).is_err());
    }
}
