pub mod repository;

pub use repository::{DatasetRepository, JsonDatasetRepository, StaticDatasetRepository};
