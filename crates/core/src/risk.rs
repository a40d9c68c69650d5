//! Rule-based risk classification.
//!
//! Rules are evaluated top to bottom and the first match wins. The
//! thresholds deliberately mix an absolute currency amount (100) with a
//! ratio (4x); they are not scaled by campaign size.

use crate::metrics::ProfitMetrics;
use crate::types::RiskLevel;

pub struct RiskRule {
    pub name: &'static str,
    pub matches: fn(&ProfitMetrics) -> bool,
    pub level: RiskLevel,
    pub recommendation: &'static str,
}

fn negative_margin(m: &ProfitMetrics) -> bool {
    m.margin < 0.0
}

fn high_efficiency(m: &ProfitMetrics) -> bool {
    m.roas > 4.0
}

fn thin_margin(m: &ProfitMetrics) -> bool {
    m.margin < 100.0
}

pub const RISK_RULES: &[RiskRule] = &[
    RiskRule {
        name: "negative_margin",
        matches: negative_margin,
        level: RiskLevel::High,
        recommendation: "CRITICAL: Negative Margin detected. High ROAS is deceptive.",
    },
    RiskRule {
        name: "high_efficiency",
        matches: high_efficiency,
        level: RiskLevel::Low,
        recommendation: "High efficiency. Scaling recommended.",
    },
    RiskRule {
        name: "thin_margin",
        matches: thin_margin,
        level: RiskLevel::Medium,
        recommendation: "Thin margins. Monitor conversion costs.",
    },
];

pub const DEFAULT_LEVEL: RiskLevel = RiskLevel::Low;
pub const DEFAULT_RECOMMENDATION: &str = "Maintain spend levels.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub level: RiskLevel,
    pub recommendation: &'static str,
}

pub fn classify(metrics: &ProfitMetrics) -> Classification {
    RISK_RULES
        .iter()
        .find(|rule| (rule.matches)(metrics))
        .map(|rule| Classification {
            level: rule.level,
            recommendation: rule.recommendation,
        })
        .unwrap_or(Classification {
            level: DEFAULT_LEVEL,
            recommendation: DEFAULT_RECOMMENDATION,
        })
}
