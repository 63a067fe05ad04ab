pub mod config;
pub mod dataset;
pub mod error;

pub use config::AtlasConfig;
pub use dataset::{dataset, dataset_info, DatasetInfo, GEO_CLIMATE_DATA};
pub use error::{AtlasError, Result};
