//! Management domain types — savings ledger, keyword opportunities,
//! safety guards, cost presets.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ─── Ledger ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LedgerCategory {
    Protection,
    Growth,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LedgerEntry {
    pub id: String,
    pub recorded_at: DateTime<Utc>,
    pub campaign: String,
    pub action: String,
    pub agent: String,
    pub impact: String,
    pub category: LedgerCategory,
}

impl LedgerEntry {
    /// `YYYY-MM-DD HH:MM`, as shown in the savings ledger.
    pub fn display_time(&self) -> String {
        self.recorded_at.format("%Y-%m-%d %H:%M").to_string()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum LedgerFilter {
    #[default]
    All,
    Protection,
    Growth,
}

impl LedgerFilter {
    pub fn matches(self, entry: &LedgerEntry) -> bool {
        match self {
            LedgerFilter::All => true,
            LedgerFilter::Protection => entry.category == LedgerCategory::Protection,
            LedgerFilter::Growth => entry.category == LedgerCategory::Growth,
        }
    }
}

impl std::str::FromStr for LedgerFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(LedgerFilter::All),
            "protection" => Ok(LedgerFilter::Protection),
            "growth" => Ok(LedgerFilter::Growth),
            other => Err(format!("unknown ledger filter: {other}")),
        }
    }
}

// ─── Growth ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct KeywordOpportunity {
    pub id: String,
    pub term: String,
    pub status: String,
    pub added: bool,
}

// ─── Safety guards ─────────────────────────────────────────────────────────

pub const MAX_MIN_MARGIN: u8 = 50;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SafetyGuards {
    /// Minimum acceptable margin in percent, 0-50.
    pub min_margin: u8,
    pub auto_pause: bool,
}

impl SafetyGuards {
    pub fn profit_floor_label(&self) -> &'static str {
        profit_floor_label(self.min_margin)
    }
}

impl Default for SafetyGuards {
    fn default() -> Self {
        Self {
            min_margin: 15,
            auto_pause: true,
        }
    }
}

pub fn profit_floor_label(min_margin: u8) -> &'static str {
    if min_margin < 10 {
        "High Risk (Growth Mode)"
    } else if min_margin <= 20 {
        "Balanced (Recommended)"
    } else {
        "Strict (Profit Mode)"
    }
}

// ─── Business model ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CostPreset {
    DigitalSaas,
    Manufacturing,
    RetailResale,
    Dropshipping,
}

impl CostPreset {
    pub const ALL: [CostPreset; 4] = [
        CostPreset::DigitalSaas,
        CostPreset::Manufacturing,
        CostPreset::RetailResale,
        CostPreset::Dropshipping,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CostPreset::DigitalSaas => "Digital/SaaS",
            CostPreset::Manufacturing => "Manufacturing",
            CostPreset::RetailResale => "Retail/Resale",
            CostPreset::Dropshipping => "Dropshipping",
        }
    }

    pub fn rate(self) -> f64 {
        match self {
            CostPreset::DigitalSaas => 0.15,
            CostPreset::Manufacturing => 0.50,
            CostPreset::RetailResale => 0.65,
            CostPreset::Dropshipping => 0.80,
        }
    }
}

/// Cost of goods as a fraction of price, from unit price and unit cost as
/// typed by the user. `None` unless both parse and the price is positive.
pub fn cogs_from_unit_economics(price: &str, cost: &str) -> Option<f64> {
    let price: f64 = price.trim().parse().ok()?;
    let cost: f64 = cost.trim().parse().ok()?;
    if price.is_nan() || cost.is_nan() || price <= 0.0 {
        return None;
    }
    Some(cost / price)
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    #[default]
    Default,
    Csv,
}
