use crate::error::{ProfitGuardError, ProfitGuardResult};
use crate::metrics::{calculate_profit_aware_metrics, ProfitMetrics};
use crate::risk::classify;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CampaignStatus {
    Active,
    Paused,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
        };
        f.write_str(label)
    }
}

/// Fraction of revenue consumed by cost of goods sold.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct CostRate(f64);

impl CostRate {
    pub fn new(rate: f64) -> ProfitGuardResult<Self> {
        if (0.0..=1.0).contains(&rate) {
            Ok(Self(rate))
        } else {
            Err(ProfitGuardError::InvalidCostRate(rate))
        }
    }

    /// Build from a whole-number percentage, as entered on a 0-100 slider.
    pub fn from_percent(percent: u8) -> ProfitGuardResult<Self> {
        Self::new(f64::from(percent) / 100.0)
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Share of revenue left after cost of goods, rounded to a whole percent.
    pub fn gross_margin_percent(self) -> i64 {
        crate::format::round_half_up((1.0 - self.0) * 100.0) as i64
    }
}

impl Default for CostRate {
    fn default() -> Self {
        Self(0.60)
    }
}

impl TryFrom<f64> for CostRate {
    type Error = ProfitGuardError;

    fn try_from(rate: f64) -> Result<Self, Self::Error> {
        Self::new(rate)
    }
}

impl From<CostRate> for f64 {
    fn from(rate: CostRate) -> Self {
        rate.0
    }
}

impl fmt::Display for CostRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", crate::format::round_half_up(self.0 * 100.0))
    }
}

/// An ad campaign as seen through the profit lens. `roas`, `margin`,
/// `recommendation` and `risk_level` are derived from spend, revenue and
/// the current cost rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: String,
    pub name: String,
    pub status: CampaignStatus,
    pub spend: f64,
    pub revenue: f64,
    pub roas: f64,
    pub margin: f64,
    pub recommendation: String,
    pub risk_level: RiskLevel,
}

impl Campaign {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        spend: f64,
        revenue: f64,
        cost_rate: CostRate,
    ) -> Self {
        let mut campaign = Self {
            id: id.into(),
            name: name.into(),
            status: CampaignStatus::Active,
            spend,
            revenue,
            roas: 0.0,
            margin: 0.0,
            recommendation: String::new(),
            risk_level: RiskLevel::Low,
        };
        campaign.recompute(cost_rate);
        campaign
    }

    /// Re-derive metrics and classification for a new cost rate.
    pub fn recompute(&mut self, cost_rate: CostRate) {
        let metrics = calculate_profit_aware_metrics(self.spend, self.revenue, cost_rate.value());
        let classification = classify(&metrics);
        self.margin = metrics.margin;
        self.roas = metrics.roas;
        self.risk_level = classification.level;
        self.recommendation = classification.recommendation.to_string();
    }

    pub fn metrics(&self) -> ProfitMetrics {
        ProfitMetrics {
            margin: self.margin,
            roas: self.roas,
        }
    }

    pub fn is_paused(&self) -> bool {
        self.status == CampaignStatus::Paused
    }
}
