pub mod file;
pub mod traits;

pub use file::FileDatasetRepository;
pub use traits::{DatasetRepository, MonthFile};
