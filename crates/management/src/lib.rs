//! Dashboard state management — reducer, savings ledger, demo data and the
//! simulated protection/growth actions.
//!
//! All state is in memory and resets on restart. No action reaches a real
//! ad platform.

pub mod ledger;
pub mod models;
pub mod scheduler;
pub mod seed;
pub mod simulation;
pub mod state;

pub use ledger::SavingsLedger;
pub use models::{CostPreset, DataSource, LedgerCategory, LedgerEntry, LedgerFilter};
pub use scheduler::{ManualScheduler, Scheduler, TokioScheduler};
pub use simulation::SimulationRunner;
pub use state::{DashboardAction, DashboardState, Transition};
