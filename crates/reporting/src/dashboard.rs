//! Portfolio-level aggregates for the profit dashboard.

use profitguard_core::metrics::global_efficiency;
use profitguard_core::{Campaign, CostRate, RiskLevel};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardOverview {
    pub campaign_count: usize,
    pub total_spend: f64,
    pub total_revenue: f64,
    /// Real profit after cost of goods and ad spend.
    pub total_margin: f64,
    pub blended_roas: f64,
    pub global_efficiency_pct: f64,
    pub high_risk_active: usize,
    pub cost_rate: CostRate,
    pub gross_margin_pct: i64,
}

pub fn overview(campaigns: &[Campaign], cost_rate: CostRate) -> DashboardOverview {
    let total_spend: f64 = campaigns.iter().map(|c| c.spend).sum();
    let total_revenue: f64 = campaigns.iter().map(|c| c.revenue).sum();
    let total_margin: f64 = campaigns.iter().map(|c| c.margin).sum();
    let spend_divisor = if total_spend != 0.0 { total_spend } else { 1.0 };

    DashboardOverview {
        campaign_count: campaigns.len(),
        total_spend,
        total_revenue,
        total_margin,
        blended_roas: total_revenue / spend_divisor,
        global_efficiency_pct: global_efficiency(total_margin, total_revenue),
        high_risk_active: campaigns
            .iter()
            .filter(|c| c.risk_level == RiskLevel::High && !c.is_paused())
            .count(),
        cost_rate,
        gross_margin_pct: cost_rate.gross_margin_percent(),
    }
}

/// The campaign with the highest margin. On a tie the later campaign wins.
pub fn star_performer(campaigns: &[Campaign]) -> Option<&Campaign> {
    campaigns
        .iter()
        .reduce(|best, current| if best.margin > current.margin { best } else { current })
}
