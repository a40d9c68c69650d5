//! ProfitGuard core — campaign types, profit-aware metrics, risk rules,
//! configuration and the shared error type.

pub mod config;
pub mod error;
pub mod format;
pub mod metrics;
pub mod risk;
pub mod types;

pub use config::AppConfig;
pub use error::{CsvImportError, ProfitGuardError, ProfitGuardResult};
pub use metrics::{calculate_profit_aware_metrics, ProfitMetrics};
pub use risk::{classify, Classification};
pub use types::{Campaign, CampaignStatus, CostRate, RiskLevel};
