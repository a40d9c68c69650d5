//! Append-only savings ledger of simulated protection and growth actions.
//! Newest entries come first.

use crate::models::{LedgerCategory, LedgerEntry, LedgerFilter};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SavingsLedger {
    entries: VecDeque<LedgerEntry>,
}

impl SavingsLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from entries already ordered newest first.
    pub fn from_entries(entries: Vec<LedgerEntry>) -> Self {
        Self {
            entries: entries.into(),
        }
    }

    pub fn record(&mut self, entry: LedgerEntry) {
        info!(
            entry_id = %entry.id,
            campaign = %entry.campaign,
            action = %entry.action,
            impact = %entry.impact,
            "Ledger entry recorded"
        );
        self.entries.push_front(entry);
    }

    /// Record a stop-loss for `campaign`, crediting the absolute margin as saved.
    pub fn record_stop_loss(&mut self, campaign: &str, margin: f64, at: DateTime<Utc>) -> LedgerEntry {
        let entry = LedgerEntry {
            id: new_entry_id(),
            recorded_at: at,
            campaign: campaign.to_string(),
            action: "Stopped Loss".to_string(),
            agent: "Safety Net".to_string(),
            impact: format!("+${} Saved", profitguard_core::format::abs_whole(margin)),
            category: LedgerCategory::Protection,
        };
        self.record(entry.clone());
        entry
    }

    pub fn get(&self, id: &str) -> Option<&LedgerEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &LedgerEntry> {
        self.entries.iter()
    }

    pub fn filtered(&self, filter: LedgerFilter) -> Vec<&LedgerEntry> {
        self.entries.iter().filter(|e| filter.matches(e)).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Short random identifier for a ledger row.
fn new_entry_id() -> String {
    Uuid::new_v4().simple().to_string()[..9].to_string()
}
