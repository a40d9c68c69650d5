//! Action-plan insights derived from the current campaign set.
//!
//! Output order is fixed: every kill insight in campaign order, then the
//! single strategy insight if it applies, then every shift insight in
//! campaign order. Report text relies on this ordering.

use profitguard_core::format::{abs_amount, round_half_up};
use profitguard_core::metrics::global_efficiency;
use profitguard_core::{Campaign, CostRate};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Cost rate above which the pricing strategy insight can fire.
pub const STRATEGY_COST_RATE: f64 = 0.6;
/// Global efficiency (percent) below which the pricing strategy insight fires.
pub const STRATEGY_EFFICIENCY_PCT: f64 = 40.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum InsightCategory {
    Kill,
    Strategy,
    Shift,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Insight {
    pub category: InsightCategory,
    pub title: String,
    /// Name of the campaign that triggered the insight, if any.
    pub campaign: Option<String>,
    pub body: String,
    pub why: String,
}

const KILL_TITLE: &str = "🛑 Stop Bleeding Money";
const KILL_WHY: &str = "When you pay $5 to make a sale that only profits $3, you lose $2 every time. \
It is better to have 0 sales than negative sales. Each click on this campaign is actively \
shrinking your bank account.";

const STRATEGY_TITLE: &str = "💡 Pricing Problem Detected";
const STRATEGY_WHY: &str = "Advertising is a multiplier. If your unit economics are broken \
(low margin), scaling ads will only multiply your losses faster. You cannot 'spend your way' \
out of high inventory costs.";

const SHIFT_TITLE: &str = "📢 Move This Budget";
const SHIFT_WHY: &str = "Competitive intent keywords are expensive. If the cost-per-click eats \
all your profit, you must move to interruptive marketing (Social) where attention is currently \
undervalued compared to search intent.";

pub fn is_kill_candidate(c: &Campaign) -> bool {
    c.margin < 0.0 || (c.spend > 500.0 && c.roas < 1.0)
}

pub fn is_shift_candidate(c: &Campaign) -> bool {
    c.spend > 1000.0 && c.roas < 2.0
}

pub fn generate_insights(campaigns: &[Campaign], cost_rate: CostRate) -> Vec<Insight> {
    let mut list: Vec<Insight> = campaigns
        .iter()
        .filter(|c| is_kill_candidate(c))
        .map(|c| Insight {
            category: InsightCategory::Kill,
            title: KILL_TITLE.to_string(),
            campaign: Some(c.name.clone()),
            body: format!(
                "{} has lost ${} in real profit. Pause this immediately to stop the drain.",
                c.name,
                abs_amount(c.margin)
            ),
            why: KILL_WHY.to_string(),
        })
        .collect();

    let total_revenue: f64 = campaigns.iter().map(|c| c.revenue).sum();
    let total_margin: f64 = campaigns.iter().map(|c| c.margin).sum();
    let efficiency = global_efficiency(total_margin, total_revenue);

    if cost_rate.value() > STRATEGY_COST_RATE && efficiency < STRATEGY_EFFICIENCY_PCT {
        list.push(Insight {
            category: InsightCategory::Strategy,
            title: STRATEGY_TITLE.to_string(),
            campaign: None,
            body: format!(
                "Your Global Efficiency ({}%) is too low. Your product costs are too high to \
                 support your current ad spend.",
                round_half_up(efficiency)
            ),
            why: STRATEGY_WHY.to_string(),
        });
    }

    list.extend(campaigns.iter().filter(|c| is_shift_candidate(c)).map(|c| Insight {
        category: InsightCategory::Shift,
        title: SHIFT_TITLE.to_string(),
        campaign: Some(c.name.clone()),
        body: format!(
            "The CPA for {} is unsustainable. Consider moving this budget to visual platforms \
             (Meta/TikTok) for est. 60% lower costs.",
            c.name
        ),
        why: SHIFT_WHY.to_string(),
    }));

    debug!(
        campaigns = campaigns.len(),
        insights = list.len(),
        efficiency,
        "Insights generated"
    );
    list
}

#[cfg(test)]
mod tests {
    use super::*;
    use profitguard_core::CampaignStatus;
    use profitguard_core::RiskLevel;

    fn raw(name: &str, spend: f64, revenue: f64, margin: f64, roas: f64) -> Campaign {
        Campaign {
            id: name.to_lowercase(),
            name: name.to_string(),
            status: CampaignStatus::Active,
            spend,
            revenue,
            roas,
            margin,
            recommendation: String::new(),
            risk_level: RiskLevel::Low,
        }
    }

    fn rate(r: f64) -> CostRate {
        CostRate::new(r).unwrap()
    }

    #[test]
    fn test_order_kills_then_strategy_then_shifts() {
        let campaigns = vec![
            raw("A", 100.0, 100.0, -50.0, 1.0),
            raw("B", 600.0, 300.0, 10.0, 0.5),
            raw("C", 1200.0, 1800.0, 20.0, 1.5),
        ];
        let insights = generate_insights(&campaigns, rate(0.7));
        let seq: Vec<_> = insights
            .iter()
            .map(|i| (i.category, i.campaign.clone()))
            .collect();
        assert_eq!(
            seq,
            vec![
                (InsightCategory::Kill, Some("A".to_string())),
                (InsightCategory::Kill, Some("B".to_string())),
                (InsightCategory::Strategy, None),
                (InsightCategory::Shift, Some("C".to_string())),
            ]
        );
    }

    #[test]
    fn test_no_strategy_at_or_below_sixty_percent() {
        let campaigns = vec![raw("A", 100.0, 100.0, -50.0, 1.0)];
        let insights = generate_insights(&campaigns, rate(0.6));
        assert!(insights
            .iter()
            .all(|i| i.category != InsightCategory::Strategy));
    }

    #[test]
    fn test_no_strategy_when_efficient() {
        let campaigns = vec![raw("A", 10.0, 1000.0, 500.0, 100.0)];
        assert!(generate_insights(&campaigns, rate(0.65)).is_empty());
    }

    #[test]
    fn test_strategy_body_rounds_efficiency() {
        let campaigns = vec![raw("A", 100.0, 1000.0, 125.0, 10.0)];
        let insights = generate_insights(&campaigns, rate(0.75));
        assert_eq!(insights.len(), 1);
        assert!(insights[0].body.starts_with("Your Global Efficiency (13%)"));
        assert!(insights[0].campaign.is_none());
    }

    #[test]
    fn test_kill_body_uses_absolute_rounded_margin() {
        let campaigns = vec![raw("Competitor_Search", 1250.0, 2800.0, -1130.4, 2.24)];
        let insights = generate_insights(&campaigns, rate(0.5));
        assert_eq!(
            insights[0].body,
            "Competitor_Search has lost $1,130 in real profit. Pause this immediately to stop the drain."
        );
        assert_eq!(insights[0].title, KILL_TITLE);
    }

    #[test]
    fn test_kill_body_for_margin_beyond_i64() {
        let campaigns = vec![Campaign::new("csv-0", "Huge", 1e20, 0.0, rate(0.5))];
        let insights = generate_insights(&campaigns, rate(0.5));
        assert_eq!(
            insights[0].body,
            "Huge has lost $100,000,000,000,000,000,000 in real profit. Pause this immediately to stop the drain."
        );
    }

    #[test]
    fn test_empty_input_yields_no_insights() {
        assert!(generate_insights(&[], rate(0.5)).is_empty());
    }

    #[test]
    fn test_empty_input_at_high_cost_rate_flags_pricing() {
        let insights = generate_insights(&[], rate(0.9));
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].category, InsightCategory::Strategy);
        assert!(insights[0].body.contains("(0%)"));
    }

    #[test]
    fn test_seed_like_portfolio_at_default_rate() {
        let r = rate(0.6);
        let campaigns = vec![
            Campaign::new("c1", "Competitor_Search", 1250.0, 2800.0, r),
            Campaign::new("c2", "Brand_Keywords_Alpha", 450.0, 4200.0, r),
            Campaign::new("c3", "PMax_Global_Scale", 3200.0, 8500.0, r),
            Campaign::new("c4", "Display_Retargeting", 800.0, 1600.0, r),
        ];
        let insights = generate_insights(&campaigns, r);
        let kills: Vec<_> = insights
            .iter()
            .filter(|i| i.category == InsightCategory::Kill)
            .filter_map(|i| i.campaign.as_deref())
            .collect();
        assert_eq!(
            kills,
            ["Competitor_Search", "Display_Retargeting"]
        );
        assert!(insights
            .iter()
            .all(|i| i.category != InsightCategory::Shift));
    }
}
