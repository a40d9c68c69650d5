//! Dashboard application state and its reducer.
//!
//! [`DashboardState::apply`] is the only way to change state. Every
//! transition reports whether it took effect and an optional user-facing
//! notice. Any change to the cost rate re-derives metrics and risk for
//! every campaign.

use crate::ledger::SavingsLedger;
use crate::models::{
    cogs_from_unit_economics, CostPreset, DataSource, KeywordOpportunity, LedgerEntry,
    LedgerFilter, SafetyGuards, MAX_MIN_MARGIN,
};
use crate::seed;
use chrono::{DateTime, Utc};
use profitguard_core::format::round_half_up;
use profitguard_core::{AppConfig, Campaign, CampaignStatus, CostRate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardAction {
    CampaignsLoaded(Vec<Campaign>),
    SetCostRate(CostRate),
    ApplyCostPreset(CostPreset),
    ApplyCogsCalculator { price: String, cost: String },
    CsvImported(Vec<Campaign>),
    PauseRequested { campaign_id: String },
    PauseCompleted { campaign_id: String, at: DateTime<Utc> },
    UndoRequested { ledger_id: String },
    UndoCompleted { ledger_id: String },
    StrategyRequested,
    StrategyCompleted,
    BoostBudget { campaign: String, margin: f64 },
    AddKeyword { keyword_id: String },
    SetLedgerFilter(LedgerFilter),
    SetMinMargin(u8),
    ToggleAutoPause,
}

impl DashboardAction {
    pub fn kind(&self) -> &'static str {
        match self {
            DashboardAction::CampaignsLoaded(_) => "campaigns_loaded",
            DashboardAction::SetCostRate(_) => "set_cost_rate",
            DashboardAction::ApplyCostPreset(_) => "apply_cost_preset",
            DashboardAction::ApplyCogsCalculator { .. } => "apply_cogs_calculator",
            DashboardAction::CsvImported(_) => "csv_imported",
            DashboardAction::PauseRequested { .. } => "pause_requested",
            DashboardAction::PauseCompleted { .. } => "pause_completed",
            DashboardAction::UndoRequested { .. } => "undo_requested",
            DashboardAction::UndoCompleted { .. } => "undo_completed",
            DashboardAction::StrategyRequested => "strategy_requested",
            DashboardAction::StrategyCompleted => "strategy_completed",
            DashboardAction::BoostBudget { .. } => "boost_budget",
            DashboardAction::AddKeyword { .. } => "add_keyword",
            DashboardAction::SetLedgerFilter(_) => "set_ledger_filter",
            DashboardAction::SetMinMargin(_) => "set_min_margin",
            DashboardAction::ToggleAutoPause => "toggle_auto_pause",
        }
    }
}

/// Result of applying one action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transition {
    pub applied: bool,
    pub notice: Option<String>,
}

impl Transition {
    pub fn ignored() -> Self {
        Self::default()
    }

    pub fn applied() -> Self {
        Self {
            applied: true,
            notice: None,
        }
    }

    pub fn with_notice(notice: impl Into<String>) -> Self {
        Self {
            applied: true,
            notice: Some(notice.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardState {
    pub campaigns: Vec<Campaign>,
    pub cost_rate: CostRate,
    pub data_source: DataSource,
    pub loading: bool,
    pub ledger: SavingsLedger,
    pub ledger_filter: LedgerFilter,
    pub keywords: Vec<KeywordOpportunity>,
    pub guards: SafetyGuards,
    pub pausing: BTreeSet<String>,
    pub reverting: BTreeSet<String>,
    pub scaling: bool,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new(CostRate::default())
    }
}

impl DashboardState {
    /// Fresh state: no campaigns yet, demo ledger and keywords in place.
    pub fn new(cost_rate: CostRate) -> Self {
        Self {
            campaigns: Vec::new(),
            cost_rate,
            data_source: DataSource::Default,
            loading: true,
            ledger: SavingsLedger::from_entries(seed::demo_ledger()),
            ledger_filter: LedgerFilter::All,
            keywords: seed::demo_keywords(),
            guards: SafetyGuards::default(),
            pausing: BTreeSet::new(),
            reverting: BTreeSet::new(),
            scaling: false,
        }
    }

    pub fn from_config(config: &AppConfig) -> profitguard_core::ProfitGuardResult<Self> {
        let mut state = Self::new(CostRate::new(config.cost_rate)?);
        state.guards = SafetyGuards {
            min_margin: config.guards.min_margin.min(MAX_MIN_MARGIN),
            auto_pause: config.guards.auto_pause,
        };
        Ok(state)
    }

    /// After a CSV import the simulated live actions are locked.
    pub fn is_offline(&self) -> bool {
        self.data_source == DataSource::Csv
    }

    pub fn campaign(&self, id: &str) -> Option<&Campaign> {
        self.campaigns.iter().find(|c| c.id == id)
    }

    pub fn filtered_ledger(&self) -> Vec<&LedgerEntry> {
        self.ledger.filtered(self.ledger_filter)
    }

    pub fn is_pausing(&self, id: &str) -> bool {
        self.pausing.contains(id)
    }

    pub fn is_reverting(&self, ledger_id: &str) -> bool {
        self.reverting.contains(ledger_id)
    }

    pub fn apply(&mut self, action: DashboardAction) -> Transition {
        let kind = action.kind();
        let transition = self.reduce(action);
        debug!(
            action = kind,
            applied = transition.applied,
            notice = transition.notice.as_deref().unwrap_or(""),
            "Dashboard action"
        );
        transition
    }

    fn reduce(&mut self, action: DashboardAction) -> Transition {
        match action {
            DashboardAction::CampaignsLoaded(campaigns) => {
                self.campaigns = campaigns;
                self.loading = false;
                self.recompute();
                Transition::applied()
            }
            DashboardAction::SetCostRate(rate) => {
                self.set_cost_rate(rate);
                Transition::with_notice("Business Model Updated")
            }
            DashboardAction::ApplyCostPreset(preset) => match CostRate::new(preset.rate()) {
                Ok(rate) => {
                    self.set_cost_rate(rate);
                    Transition::applied()
                }
                Err(_) => Transition::ignored(),
            },
            DashboardAction::ApplyCogsCalculator { price, cost } => {
                let Some(rate) = cogs_from_unit_economics(&price, &cost)
                    .and_then(|ratio| CostRate::new(ratio).ok())
                else {
                    return Transition::ignored();
                };
                self.set_cost_rate(rate);
                Transition::with_notice(format!(
                    "COGS set to {}% based on product math.",
                    round_half_up(rate.value() * 100.0)
                ))
            }
            DashboardAction::CsvImported(campaigns) => {
                let count = campaigns.len();
                self.campaigns = campaigns;
                self.data_source = DataSource::Csv;
                self.loading = false;
                self.pausing.clear();
                info!(campaigns = count, "Dashboard switched to CSV data (offline mode)");
                Transition::with_notice(format!(
                    "✅ Data Loaded: Updated dashboard with {count} campaigns from CSV."
                ))
            }
            DashboardAction::PauseRequested { campaign_id } => {
                if self.is_offline()
                    || self.pausing.contains(&campaign_id)
                    || self.campaign(&campaign_id).is_none()
                {
                    return Transition::ignored();
                }
                self.pausing.insert(campaign_id);
                Transition::applied()
            }
            DashboardAction::PauseCompleted { campaign_id, at } => {
                if !self.pausing.remove(&campaign_id) {
                    return Transition::ignored();
                }
                let Some(campaign) = self.campaigns.iter_mut().find(|c| c.id == campaign_id) else {
                    return Transition::ignored();
                };
                campaign.status = CampaignStatus::Paused;
                let (name, margin) = (campaign.name.clone(), campaign.margin);
                self.ledger.record_stop_loss(&name, margin, at);
                Transition::with_notice(format!("{name} protected successfully."))
            }
            DashboardAction::UndoRequested { ledger_id } => {
                if self.reverting.contains(&ledger_id) || self.ledger.get(&ledger_id).is_none() {
                    return Transition::ignored();
                }
                self.reverting.insert(ledger_id);
                Transition::applied()
            }
            DashboardAction::UndoCompleted { ledger_id } => {
                if !self.reverting.remove(&ledger_id) {
                    return Transition::ignored();
                }
                Transition::with_notice("Action reverted. Campaign resumed in Simulation Mode.")
            }
            DashboardAction::StrategyRequested => {
                if self.is_offline() || self.scaling {
                    return Transition::ignored();
                }
                self.scaling = true;
                Transition::applied()
            }
            DashboardAction::StrategyCompleted => {
                if !self.scaling {
                    return Transition::ignored();
                }
                self.scaling = false;
                Transition::with_notice("Optimization Strategy Active")
            }
            DashboardAction::BoostBudget { campaign, margin } => {
                if self.is_offline() {
                    return Transition::ignored();
                }
                info!(campaign = %campaign, margin, "Budget boost simulated");
                Transition::with_notice(format!(
                    "Budget increased. Projected profit +${}/week.",
                    round_half_up(margin * 0.2)
                ))
            }
            DashboardAction::AddKeyword { keyword_id } => {
                let Some(keyword) = self.keywords.iter_mut().find(|k| k.id == keyword_id) else {
                    return Transition::ignored();
                };
                keyword.added = true;
                Transition::with_notice(format!("Keyword \"{}\" added to tracking.", keyword.term))
            }
            DashboardAction::SetLedgerFilter(filter) => {
                self.ledger_filter = filter;
                Transition::applied()
            }
            DashboardAction::SetMinMargin(min_margin) => {
                if min_margin > MAX_MIN_MARGIN {
                    return Transition::ignored();
                }
                self.guards.min_margin = min_margin;
                Transition::with_notice("Rules Saved")
            }
            DashboardAction::ToggleAutoPause => {
                self.guards.auto_pause = !self.guards.auto_pause;
                Transition::applied()
            }
        }
    }

    fn set_cost_rate(&mut self, rate: CostRate) {
        self.cost_rate = rate;
        self.recompute();
        info!(cost_rate = rate.value(), campaigns = self.campaigns.len(), "Cost rate updated");
    }

    fn recompute(&mut self) {
        let rate = self.cost_rate;
        for campaign in &mut self.campaigns {
            campaign.recompute(rate);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use profitguard_core::RiskLevel;

    fn loaded() -> DashboardState {
        let mut state = DashboardState::default();
        state.apply(DashboardAction::CampaignsLoaded(seed::demo_campaigns(state.cost_rate)));
        state
    }

    fn rate(r: f64) -> CostRate {
        CostRate::new(r).unwrap()
    }

    #[test]
    fn test_initial_state() {
        let state = DashboardState::default();
        assert!(state.loading);
        assert!(state.campaigns.is_empty());
        assert_eq!(state.ledger.len(), 5);
        assert_eq!(state.cost_rate.value(), 0.6);
        assert!(!state.is_offline());
    }

    #[test]
    fn test_cost_rate_change_recomputes_all_campaigns() {
        let mut state = loaded();
        assert!(!state.loading);
        let t = state.apply(DashboardAction::SetCostRate(rate(0.15)));
        assert_eq!(t.notice.as_deref(), Some("Business Model Updated"));
        for c in &state.campaigns {
            assert_eq!(c.margin, c.revenue - c.revenue * 0.15 - c.spend);
        }
        assert!(state.campaigns.iter().all(|c| c.risk_level != RiskLevel::High));

        state.apply(DashboardAction::ApplyCostPreset(CostPreset::Dropshipping));
        assert_eq!(state.cost_rate.value(), 0.80);
        assert_eq!(state.campaign("c2").unwrap().risk_level, RiskLevel::Low);
        assert_eq!(state.campaign("c3").unwrap().risk_level, RiskLevel::High);
    }

    #[test]
    fn test_loaded_campaigns_are_priced_at_current_rate() {
        let mut state = DashboardState::new(rate(0.0));
        let stale = seed::demo_campaigns(rate(1.0));
        state.apply(DashboardAction::CampaignsLoaded(stale));
        assert_eq!(state.campaign("c1").unwrap().margin, 2800.0 - 1250.0);
    }

    #[test]
    fn test_cogs_calculator() {
        let mut state = loaded();
        let t = state.apply(DashboardAction::ApplyCogsCalculator {
            price: "100".into(),
            cost: "40".into(),
        });
        assert_eq!(t.notice.as_deref(), Some("COGS set to 40% based on product math."));
        assert_eq!(state.cost_rate.value(), 0.4);

        let t = state.apply(DashboardAction::ApplyCogsCalculator {
            price: "0".into(),
            cost: "40".into(),
        });
        assert!(!t.applied);
        let t = state.apply(DashboardAction::ApplyCogsCalculator {
            price: "10".into(),
            cost: "40".into(),
        });
        assert!(!t.applied);
        assert_eq!(state.cost_rate.value(), 0.4);
    }

    #[test]
    fn test_pause_flow() {
        let mut state = loaded();
        let id = "c1".to_string();
        assert!(state.apply(DashboardAction::PauseRequested { campaign_id: id.clone() }).applied);
        assert!(state.is_pausing(&id));
        // Duplicate trigger while in flight.
        assert!(!state.apply(DashboardAction::PauseRequested { campaign_id: id.clone() }).applied);

        let t = state.apply(DashboardAction::PauseCompleted {
            campaign_id: id.clone(),
            at: Utc::now(),
        });
        assert_eq!(t.notice.as_deref(), Some("Competitor_Search protected successfully."));
        assert!(!state.is_pausing(&id));
        assert!(state.campaign(&id).unwrap().is_paused());
        assert_eq!(state.ledger.len(), 6);
        let newest = state.ledger.iter().next().unwrap();
        assert_eq!(newest.campaign, "Competitor_Search");
        assert_eq!(newest.impact, "+$130 Saved");
    }

    #[test]
    fn test_pause_unknown_campaign_ignored() {
        let mut state = loaded();
        let t = state.apply(DashboardAction::PauseRequested { campaign_id: "nope".into() });
        assert!(!t.applied);
        let t = state.apply(DashboardAction::PauseCompleted {
            campaign_id: "c1".into(),
            at: Utc::now(),
        });
        assert!(!t.applied);
        assert_eq!(state.ledger.len(), 5);
    }

    #[test]
    fn test_offline_mode_locks_live_actions() {
        let mut state = loaded();
        let imported = vec![Campaign::new("csv-0", "A", 10.0, 20.0, state.cost_rate)];
        let t = state.apply(DashboardAction::CsvImported(imported));
        assert_eq!(
            t.notice.as_deref(),
            Some("✅ Data Loaded: Updated dashboard with 1 campaigns from CSV.")
        );
        assert!(state.is_offline());
        assert!(!state.apply(DashboardAction::PauseRequested { campaign_id: "csv-0".into() }).applied);
        assert!(!state.apply(DashboardAction::StrategyRequested).applied);
        assert!(!state
            .apply(DashboardAction::BoostBudget { campaign: "A".into(), margin: 100.0 })
            .applied);
        // Cost-rate changes still work offline.
        state.apply(DashboardAction::SetCostRate(rate(0.0)));
        assert_eq!(state.campaigns[0].margin, 10.0);
    }

    #[test]
    fn test_undo_flow() {
        let mut state = loaded();
        assert!(state.apply(DashboardAction::UndoRequested { ledger_id: "l1".into() }).applied);
        assert!(state.is_reverting("l1"));
        assert!(!state.apply(DashboardAction::UndoRequested { ledger_id: "l1".into() }).applied);
        let t = state.apply(DashboardAction::UndoCompleted { ledger_id: "l1".into() });
        assert_eq!(
            t.notice.as_deref(),
            Some("Action reverted. Campaign resumed in Simulation Mode.")
        );
        assert!(!state.is_reverting("l1"));
        assert!(!state.apply(DashboardAction::UndoRequested { ledger_id: "zz".into() }).applied);
    }

    #[test]
    fn test_strategy_flow() {
        let mut state = loaded();
        assert!(state.apply(DashboardAction::StrategyRequested).applied);
        assert!(!state.apply(DashboardAction::StrategyRequested).applied);
        let t = state.apply(DashboardAction::StrategyCompleted);
        assert_eq!(t.notice.as_deref(), Some("Optimization Strategy Active"));
        assert!(!state.scaling);
    }

    #[test]
    fn test_boost_budget_projection() {
        let mut state = loaded();
        let t = state.apply(DashboardAction::BoostBudget {
            campaign: "Brand_Keywords_Alpha".into(),
            margin: 1230.0,
        });
        assert_eq!(t.notice.as_deref(), Some("Budget increased. Projected profit +$246/week."));
    }

    #[test]
    fn test_keywords_and_guards() {
        let mut state = loaded();
        let t = state.apply(DashboardAction::AddKeyword { keyword_id: "k2".into() });
        assert_eq!(t.notice.as_deref(), Some("Keyword \"best widget 2026\" added to tracking."));
        assert!(state.keywords.iter().find(|k| k.id == "k2").unwrap().added);
        assert!(!state.apply(DashboardAction::AddKeyword { keyword_id: "k9".into() }).applied);

        assert_eq!(
            state.apply(DashboardAction::SetMinMargin(25)).notice.as_deref(),
            Some("Rules Saved")
        );
        assert_eq!(state.guards.profit_floor_label(), "Strict (Profit Mode)");
        assert!(!state.apply(DashboardAction::SetMinMargin(51)).applied);
        state.apply(DashboardAction::ToggleAutoPause);
        assert!(!state.guards.auto_pause);
    }

    #[test]
    fn test_ledger_filter() {
        let mut state = loaded();
        state.apply(DashboardAction::SetLedgerFilter(LedgerFilter::Growth));
        let growth = state.filtered_ledger();
        assert_eq!(growth.len(), 2);
        assert!(growth.iter().all(|e| e.action == "Boosted Budget"));
    }

    #[test]
    fn test_from_config() {
        let mut config = AppConfig::default();
        config.cost_rate = 0.25;
        config.guards.min_margin = 99;
        let state = DashboardState::from_config(&config).unwrap();
        assert_eq!(state.cost_rate.value(), 0.25);
        assert_eq!(state.guards.min_margin, MAX_MIN_MARGIN);

        config.cost_rate = 2.0;
        assert!(DashboardState::from_config(&config).is_err());
    }
}
