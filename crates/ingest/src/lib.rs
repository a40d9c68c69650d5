//! Campaign data ingestion from ad-platform CSV exports.

pub mod csv_import;

pub use csv_import::{import_csv_file, parse_campaigns_csv, DetectedColumns, ImportSummary};
