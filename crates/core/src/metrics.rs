//! Profit-aware campaign metrics.
//!
//! Ad platforms report ROAS against gross revenue. Here the margin also
//! deducts cost of goods, which is what makes a "4x ROAS" campaign show up
//! as a loss-maker when product costs are high.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfitMetrics {
    /// Net profit after cost of goods and ad spend.
    pub margin: f64,
    /// Revenue per unit of spend; zero when nothing was spent.
    pub roas: f64,
}

/// Compute margin and ROAS for a single campaign.
///
/// Inputs are not validated: negative spend or revenue simply flow through
/// the arithmetic.
pub fn calculate_profit_aware_metrics(spend: f64, revenue: f64, cost_rate: f64) -> ProfitMetrics {
    let roas = if spend > 0.0 { revenue / spend } else { 0.0 };
    let margin = revenue - revenue * cost_rate - spend;
    ProfitMetrics { margin, roas }
}

/// Aggregate profitability over a set of campaigns, as a percentage of
/// revenue. Zero when there is no revenue at all.
pub fn global_efficiency(total_margin: f64, total_revenue: f64) -> f64 {
    if total_revenue > 0.0 {
        total_margin / total_revenue * 100.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_basic_metrics() {
        let m = calculate_profit_aware_metrics(100.0, 250.0, 0.5);
        assert_eq!(m.margin, 25.0);
        assert_eq!(m.roas, 2.5);
    }

    #[test]
    fn test_zero_spend_has_zero_roas() {
        let m = calculate_profit_aware_metrics(0.0, 5000.0, 0.2);
        assert_eq!(m.roas, 0.0);
        assert_eq!(m.margin, 4000.0);
    }

    #[test]
    fn test_negative_inputs_propagate() {
        let m = calculate_profit_aware_metrics(-10.0, 100.0, 0.0);
        assert_eq!(m.roas, 0.0);
        assert_eq!(m.margin, 110.0);
    }

    #[test]
    fn test_high_roas_can_hide_a_loss() {
        // 4x ROAS but 80% COGS: every sale loses money.
        let m = calculate_profit_aware_metrics(1000.0, 4000.0, 0.8);
        assert_eq!(m.roas, 4.0);
        assert!(m.margin < 0.0);
    }

    #[test]
    fn test_global_efficiency() {
        assert_eq!(global_efficiency(50.0, 200.0), 25.0);
        assert_eq!(global_efficiency(-50.0, 0.0), 0.0);
    }

    proptest! {
        #[test]
        fn prop_margin_formula(spend in 0.01f64..1e6, revenue in 0.0f64..1e6, rate in 0.0f64..=1.0) {
            let m = calculate_profit_aware_metrics(spend, revenue, rate);
            prop_assert_eq!(m.margin, revenue - revenue * rate - spend);
            prop_assert_eq!(m.roas, revenue / spend);
        }

        #[test]
        fn prop_zero_spend_roas(revenue in 0.0f64..1e6, rate in 0.0f64..=1.0) {
            let m = calculate_profit_aware_metrics(0.0, revenue, rate);
            prop_assert_eq!(m.roas, 0.0);
        }
    }
}
