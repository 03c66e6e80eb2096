//! File formats, configuration, logging and reports around the `ubi-core`
//! taxation engine.

pub mod config;
pub mod loader;
pub mod logging;
pub mod report;

pub use config::{FlatSection, PolicyConfig, PolicyConfigError};
pub use loader::{IncomeSegmentLoader, IncomeSegmentLoaderError, IncomeSegmentRecord};
pub use report::ModelReport;
