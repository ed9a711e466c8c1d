pub mod config;
pub mod error;
pub mod export;
pub mod loader;
pub mod model;
pub mod raw;
pub mod repository;
pub mod service;

pub use config::DashboardConfig;
pub use error::LoadError;
pub use export::{export_csv, write_csv};
pub use loader::{load_dataset, normalize, REQUIRED_COLUMNS};
pub use model::daily_record::DailyRecord;
pub use model::dataset::MonthlyDataset;
pub use model::month::{data_file_name, detect_month, parse_month, MONTHS};
pub use model::plant::PLANT_INFO;
pub use model::series::{Extrema, Series};
pub use model::summary::MonthlySummary;
pub use raw::RawTable;
pub use repository::{DatasetRepository, FileDatasetRepository, MonthFile};
pub use service::{DatasetService, LoadReport};
