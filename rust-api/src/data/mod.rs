//! Data loading and export modules

pub mod csv_loader;
pub mod export;

// Re-export commonly used types
pub use csv_loader::{LoadError, OddsTable};
pub use export::{hits_to_dataframe, write_hits_csv, write_report_json};
