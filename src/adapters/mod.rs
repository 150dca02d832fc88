// Adapters layer: concrete implementations for external systems (CSV files, backups).

pub mod csv_store;

pub use csv_store::{BackupReport, CsvStore, ImportSummary};
