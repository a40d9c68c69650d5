//! Demo data used when no CSV has been imported.

use crate::models::{KeywordOpportunity, LedgerCategory, LedgerEntry};
use chrono::{DateTime, NaiveDate, Utc};
use profitguard_core::{Campaign, CostRate};

/// (id, name, spend, revenue)
const DEMO_CAMPAIGNS: &[(&str, &str, f64, f64)] = &[
    ("c1", "Competitor_Search", 1250.0, 2800.0),
    ("c2", "Brand_Keywords_Alpha", 450.0, 4200.0),
    ("c3", "PMax_Global_Scale", 3200.0, 8500.0),
    ("c4", "Display_Retargeting", 800.0, 1600.0),
];

pub fn demo_campaigns(cost_rate: CostRate) -> Vec<Campaign> {
    DEMO_CAMPAIGNS
        .iter()
        .map(|(id, name, spend, revenue)| Campaign::new(*id, *name, *spend, *revenue, cost_rate))
        .collect()
}

fn seed_time(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(hour, minute, 0))
        .map(|dt| dt.and_utc())
        .unwrap_or_default()
}

fn seed_entry(
    id: &str,
    at: DateTime<Utc>,
    campaign: &str,
    category: LedgerCategory,
    impact: &str,
) -> LedgerEntry {
    let (action, agent) = match category {
        LedgerCategory::Protection => ("Stopped Loss", "Safety Net"),
        LedgerCategory::Growth => ("Boosted Budget", "Opportunity Scout"),
    };
    LedgerEntry {
        id: id.to_string(),
        recorded_at: at,
        campaign: campaign.to_string(),
        action: action.to_string(),
        agent: agent.to_string(),
        impact: impact.to_string(),
        category,
    }
}

/// Historical ledger rows, newest first.
pub fn demo_ledger() -> Vec<LedgerEntry> {
    use LedgerCategory::{Growth, Protection};
    vec![
        seed_entry("l1", seed_time(2026, 1, 18, 14, 22), "Competitor_Search", Protection, "+$130 Saved"),
        seed_entry("l2", seed_time(2026, 1, 18, 9, 5), "Brand_Keywords_Alpha", Growth, "+$450 Revenue"),
        seed_entry("l3", seed_time(2026, 1, 17, 18, 12), "Display_Retargeting", Protection, "+$45 Saved"),
        seed_entry("l4", seed_time(2026, 1, 17, 10, 45), "PMax_Global_Scale", Growth, "+$820 Revenue"),
        seed_entry("l5", seed_time(2026, 1, 16, 22, 30), "Keyword_Expansion_v2", Protection, "+$210 Saved"),
    ]
}

pub fn demo_keywords() -> Vec<KeywordOpportunity> {
    [
        ("k1", "buy luxury widgets", "Low Cost"),
        ("k2", "best widget 2026", "High Intent"),
        ("k3", "premium widget review", "Untapped"),
    ]
    .into_iter()
    .map(|(id, term, status)| KeywordOpportunity {
        id: id.to_string(),
        term: term.to_string(),
        status: status.to_string(),
        added: false,
    })
    .collect()
}
