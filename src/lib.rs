pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{CliConfig, Command};

pub use crate::adapters::{BackupReport, CsvStore, ImportSummary};
pub use crate::config::AppConfig;
pub use crate::core::{GpaStatistics, RecordsService, Transcript};
pub use crate::utils::error::{RecordsError, Result};
