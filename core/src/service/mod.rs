pub mod dataset_service;

pub use dataset_service::{DatasetService, LoadFailure, LoadReport};
