//! Report distribution. Copying goes through a [`ReportSink`]; when the
//! sink fails the caller gets the text back for a manual-copy preview
//! instead of an error.

use profitguard_core::{ProfitGuardError, ProfitGuardResult};
use std::path::PathBuf;
use tracing::{info, warn};

pub const COPIED_NOTICE: &str = "✅ Report copied! Ready to paste into email or docs.";

/// Destination for a finished report (clipboard, file, ...).
pub trait ReportSink {
    fn write_report(&self, text: &str) -> ProfitGuardResult<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportDelivery {
    Copied { notice: &'static str },
    /// The sink rejected the report; show it for manual copying.
    Preview(String),
}

pub fn deliver_report(sink: &dyn ReportSink, text: &str) -> ReportDelivery {
    match sink.write_report(text) {
        Ok(()) => {
            info!(bytes = text.len(), "Report delivered");
            ReportDelivery::Copied {
                notice: COPIED_NOTICE,
            }
        }
        Err(e) => {
            warn!(error = %e, "Report delivery failed, falling back to preview");
            ReportDelivery::Preview(text.to_string())
        }
    }
}

/// Writes the report to a file on disk.
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ReportSink for FileSink {
    fn write_report(&self, text: &str) -> ProfitGuardResult<()> {
        std::fs::write(&self.path, text).map_err(|e| {
            ProfitGuardError::Delivery(format!("{}: {e}", self.path.display()))
        })
    }
}
