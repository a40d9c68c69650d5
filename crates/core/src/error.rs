use thiserror::Error;

pub type ProfitGuardResult<T> = Result<T, ProfitGuardError>;

/// Structural failures that abort a whole CSV import. Row-level numeric
/// problems never show up here; they are coerced to zero.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CsvImportError {
    #[error("File is empty or invalid.")]
    EmptyFile,

    #[error("Could not detect 'Cost' and 'Revenue' columns. Please check your headers.")]
    MissingColumns,
}

#[derive(Error, Debug)]
pub enum ProfitGuardError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("CSV import error: {0}")]
    CsvImport(#[from] CsvImportError),

    #[error("Invalid cost rate {0}: must be within [0, 1]")]
    InvalidCostRate(f64),

    #[error("Report delivery error: {0}")]
    Delivery(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<config::ConfigError> for ProfitGuardError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}
