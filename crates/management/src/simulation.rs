//! Simulated protection and growth actions.
//!
//! Nothing here talks to an ad platform. Each handler marks its target as
//! in flight, waits a fixed artificial delay, then applies the outcome to
//! the dashboard state. The in-flight flag is the only guard against a
//! duplicate trigger; the state lock is never held across a delay.

use crate::scheduler::Scheduler;
use crate::seed;
use crate::state::{DashboardAction, DashboardState, Transition};
use parking_lot::Mutex;
use profitguard_core::config::SimulationConfig;
use profitguard_reporting::star_performer;
use std::sync::Arc;
use tracing::{debug, info};

pub struct SimulationRunner<S: Scheduler> {
    state: Arc<Mutex<DashboardState>>,
    scheduler: Arc<S>,
    config: SimulationConfig,
}

impl<S: Scheduler> Clone for SimulationRunner<S> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            scheduler: self.scheduler.clone(),
            config: self.config.clone(),
        }
    }
}

impl<S: Scheduler> SimulationRunner<S> {
    pub fn new(state: DashboardState, scheduler: Arc<S>, config: SimulationConfig) -> Self {
        Self {
            state: Arc::new(Mutex::new(state)),
            scheduler,
            config,
        }
    }

    /// Apply a single action synchronously.
    pub fn dispatch(&self, action: DashboardAction) -> Transition {
        self.state.lock().apply(action)
    }

    /// A copy of the current state.
    pub fn snapshot(&self) -> DashboardState {
        self.state.lock().clone()
    }

    pub fn with_state<R>(&self, f: impl FnOnce(&DashboardState) -> R) -> R {
        f(&self.state.lock())
    }

    /// Simulated initial fetch of the demo campaigns.
    pub async fn load_initial(&self) -> Transition {
        self.scheduler.sleep(self.config.initial_load_delay()).await;
        let mut state = self.state.lock();
        let campaigns = seed::demo_campaigns(state.cost_rate);
        info!(campaigns = campaigns.len(), "Demo campaigns loaded");
        state.apply(DashboardAction::CampaignsLoaded(campaigns))
    }

    /// Stop-loss: pause a campaign and credit its margin to the ledger.
    pub async fn pause(&self, campaign_id: &str) -> Transition {
        let requested = self.dispatch(DashboardAction::PauseRequested {
            campaign_id: campaign_id.to_string(),
        });
        if !requested.applied {
            debug!(campaign_id, "Pause ignored");
            return Transition::ignored();
        }
        metrics::counter!("profitguard_simulated_actions_total", "action" => "pause").increment(1);

        self.scheduler.sleep(self.config.pause_delay()).await;

        let at = self.scheduler.now();
        self.dispatch(DashboardAction::PauseCompleted {
            campaign_id: campaign_id.to_string(),
            at,
        })
    }

    pub async fn undo(&self, ledger_id: &str) -> Transition {
        let requested = self.dispatch(DashboardAction::UndoRequested {
            ledger_id: ledger_id.to_string(),
        });
        if !requested.applied {
            debug!(ledger_id, "Undo ignored");
            return Transition::ignored();
        }
        metrics::counter!("profitguard_simulated_actions_total", "action" => "undo").increment(1);

        self.scheduler.sleep(self.config.undo_delay()).await;

        self.dispatch(DashboardAction::UndoCompleted {
            ledger_id: ledger_id.to_string(),
        })
    }

    pub async fn apply_strategy(&self) -> Transition {
        if !self.dispatch(DashboardAction::StrategyRequested).applied {
            debug!("Strategy ignored");
            return Transition::ignored();
        }
        metrics::counter!("profitguard_simulated_actions_total", "action" => "strategy").increment(1);

        self.scheduler.sleep(self.config.strategy_delay()).await;

        self.dispatch(DashboardAction::StrategyCompleted)
    }

    /// Boost the budget of the campaign with the highest margin. There is no
    /// artificial delay for this one.
    pub fn boost_star_performer(&self) -> Transition {
        let star = self.with_state(|state| {
            star_performer(&state.campaigns).map(|c| (c.name.clone(), c.margin))
        });
        let Some((campaign, margin)) = star else {
            return Transition::ignored();
        };
        let transition = self.dispatch(DashboardAction::BoostBudget { campaign, margin });
        if transition.applied {
            metrics::counter!("profitguard_simulated_actions_total", "action" => "boost").increment(1);
        }
        transition
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::ManualScheduler;
    use std::time::Duration;

    async fn loaded_runner() -> (SimulationRunner<ManualScheduler>, Arc<ManualScheduler>) {
        let scheduler = Arc::new(ManualScheduler::default());
        let runner = SimulationRunner::new(
            DashboardState::default(),
            scheduler.clone(),
            SimulationConfig::default(),
        );
        runner.load_initial().await;
        (runner, scheduler)
    }

    #[tokio::test]
    async fn test_load_initial_waits_then_seeds() {
        let (runner, scheduler) = loaded_runner().await;
        assert_eq!(scheduler.sleeps(), vec![Duration::from_millis(1200)]);
        let state = runner.snapshot();
        assert!(!state.loading);
        assert_eq!(state.campaigns.len(), 4);
    }

    #[tokio::test]
    async fn test_pause_uses_delay_and_scheduler_clock() {
        let (runner, scheduler) = loaded_runner().await;
        let before = scheduler.now();
        let t = runner.pause("c4").await;
        assert_eq!(t.notice.as_deref(), Some("Display_Retargeting protected successfully."));
        assert_eq!(scheduler.sleeps().last(), Some(&Duration::from_millis(1200)));

        let state = runner.snapshot();
        assert!(state.campaign("c4").unwrap().is_paused());
        let entry = state.ledger.iter().next().unwrap();
        assert_eq!(entry.impact, "+$160 Saved");
        assert_eq!(entry.recorded_at - before, chrono::Duration::milliseconds(1200));
    }

    #[tokio::test]
    async fn test_concurrent_duplicate_pause_runs_once() {
        let (runner, _) = loaded_runner().await;
        let (a, b) = tokio::join!(runner.pause("c1"), runner.pause("c1"));
        assert!(a.applied);
        assert!(!b.applied);
        assert_eq!(runner.snapshot().ledger.len(), 6);
    }

    #[tokio::test]
    async fn test_undo_and_strategy_delays() {
        let (runner, scheduler) = loaded_runner().await;
        let t = runner.undo("l2").await;
        assert!(t.applied);
        let t = runner.apply_strategy().await;
        assert_eq!(t.notice.as_deref(), Some("Optimization Strategy Active"));
        assert_eq!(
            scheduler.sleeps()[1..],
            [Duration::from_millis(1000), Duration::from_millis(1500)]
        );
    }

    #[tokio::test]
    async fn test_boost_star_performer() {
        let (runner, _) = loaded_runner().await;
        let t = runner.boost_star_performer();
        // Brand_Keywords_Alpha: 4200 - 2520 - 450 = 1230 margin.
        assert_eq!(t.notice.as_deref(), Some("Budget increased. Projected profit +$246/week."));
    }

    #[tokio::test]
    async fn test_boost_without_campaigns_ignored() {
        let runner = SimulationRunner::new(
            DashboardState::default(),
            Arc::new(ManualScheduler::default()),
            SimulationConfig::instant(),
        );
        assert!(!runner.boost_star_performer().applied);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tokio_scheduler_pause() {
        use crate::scheduler::TokioScheduler;
        let runner = SimulationRunner::new(
            DashboardState::default(),
            Arc::new(TokioScheduler),
            SimulationConfig::default(),
        );
        runner.load_initial().await;
        let started = tokio::time::Instant::now();
        assert!(runner.pause("c1").await.applied);
        assert!(started.elapsed() >= Duration::from_millis(1200));
    }
}
