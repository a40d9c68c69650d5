//! ProfitGuard — profit-aware audit of advertising campaigns.
//!
//! Loads campaigns from the demo seed or an ad-platform CSV export, prices
//! them at the configured cost of goods, and prints insights, the audit
//! report, or the savings ledger. The `simulate` command runs the
//! simulated stop-loss and growth actions.

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use profitguard_core::config::SimulationConfig;
use profitguard_core::AppConfig;
use profitguard_ingest::import_csv_file;
use profitguard_management::{
    DashboardAction, DashboardState, LedgerFilter, SimulationRunner, TokioScheduler, Transition,
};
use profitguard_reporting::{
    build_report, deliver_report, generate_insights, overview, FileSink, ReportDelivery,
};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "profitguard")]
#[command(about = "Profit-aware advertising audit and simulated campaign protection")]
#[command(version)]
struct Cli {
    /// Optional TOML configuration file
    #[arg(long, global = true, env = "PROFITGUARD_CONFIG")]
    config: Option<String>,

    /// Cost of goods as a fraction of revenue (overrides config)
    #[arg(long, global = true)]
    cost_rate: Option<f64>,

    /// Campaign CSV export to analyse instead of the demo data
    #[arg(long, global = true)]
    csv: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the plain-text audit report
    Audit {
        /// Report date, YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Also write the report to this file
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Print campaigns and portfolio totals as JSON
    Campaigns,

    /// Print action-plan insights as JSON
    Insights,

    /// Print the savings ledger as JSON
    Ledger {
        /// all, protection or growth
        #[arg(long, default_value = "all")]
        filter: LedgerFilter,
    },

    /// Run simulated actions against the loaded campaigns
    Simulate {
        /// Campaign ids to stop-loss
        #[arg(long)]
        pause: Vec<String>,

        /// Ledger ids to revert
        #[arg(long)]
        undo: Vec<String>,

        /// Apply the optimisation strategy
        #[arg(long, default_value_t = false)]
        strategy: bool,

        /// Boost the budget of the most profitable campaign
        #[arg(long, default_value_t = false)]
        boost: bool,
    },
}

#[derive(Serialize)]
struct CampaignsView<'a> {
    overview: profitguard_reporting::DashboardOverview,
    campaigns: &'a [profitguard_core::Campaign],
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "profitguard=info".into()),
        )
        .json()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(rate) = cli.cost_rate {
        config.cost_rate = rate;
    }
    if config.live_api {
        warn!("Live API mode requested but no live integration exists; using simulation");
    }

    info!(
        cost_rate = config.cost_rate,
        csv = ?cli.csv,
        "Configuration loaded"
    );

    // Only `simulate` pays the artificial latencies.
    let simulation = if matches!(cli.command, Commands::Simulate { .. }) {
        config.simulation.clone()
    } else {
        SimulationConfig::instant()
    };
    let state = DashboardState::from_config(&config).context("invalid configuration")?;
    let runner = SimulationRunner::new(state, Arc::new(TokioScheduler), simulation);
    runner.load_initial().await;

    if let Some(path) = &cli.csv {
        let rate = runner.with_state(|s| s.cost_rate);
        let summary = import_csv_file(path, rate)
            .with_context(|| format!("failed to import {}", path.display()))?;
        print_notice(&runner.dispatch(DashboardAction::CsvImported(summary.campaigns)));
    }

    match cli.command {
        Commands::Audit { date, out } => {
            let date = date.unwrap_or_else(|| chrono::Local::now().date_naive());
            let report = runner.with_state(|s| {
                build_report(&generate_insights(&s.campaigns, s.cost_rate), date)
            });
            println!("{report}");
            if let Some(out) = out {
                match deliver_report(&FileSink::new(out), &report) {
                    ReportDelivery::Copied { notice } => eprintln!("{notice}"),
                    ReportDelivery::Preview(_) => {
                        eprintln!("Could not write the report file; copy it from the output above.")
                    }
                }
            }
        }
        Commands::Campaigns => {
            let json = runner.with_state(|s| {
                serde_json::to_string_pretty(&CampaignsView {
                    overview: overview(&s.campaigns, s.cost_rate),
                    campaigns: &s.campaigns,
                })
            })?;
            println!("{json}");
        }
        Commands::Insights => {
            let json = runner.with_state(|s| {
                serde_json::to_string_pretty(&generate_insights(&s.campaigns, s.cost_rate))
            })?;
            println!("{json}");
        }
        Commands::Ledger { filter } => {
            runner.dispatch(DashboardAction::SetLedgerFilter(filter));
            let json = runner.with_state(|s| serde_json::to_string_pretty(&s.filtered_ledger()))?;
            println!("{json}");
        }
        Commands::Simulate {
            pause,
            undo,
            strategy,
            boost,
        } => {
            for id in &pause {
                report_outcome("pause", id, runner.pause(id).await);
            }
            for id in &undo {
                report_outcome("undo", id, runner.undo(id).await);
            }
            if strategy {
                report_outcome("strategy", "portfolio", runner.apply_strategy().await);
            }
            if boost {
                report_outcome("boost", "star performer", runner.boost_star_performer());
            }
            let snapshot = runner.snapshot();
            let summary = overview(&snapshot.campaigns, snapshot.cost_rate);
            info!(
                total_margin = summary.total_margin,
                high_risk_active = summary.high_risk_active,
                ledger_entries = snapshot.ledger.len(),
                "Simulation finished"
            );
        }
    }

    Ok(())
}

/// A named config file must load; without one, environment-only loading
/// falls back to defaults.
fn load_config(path: Option<&str>) -> anyhow::Result<AppConfig> {
    match path {
        Some(path) => AppConfig::load_from(Some(path))
            .with_context(|| format!("failed to load config from {path}")),
        None => Ok(AppConfig::load_from(None).unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load config, using defaults");
            AppConfig::default()
        })),
    }
}

fn print_notice(transition: &Transition) {
    if let Some(notice) = &transition.notice {
        eprintln!("{notice}");
    }
}

fn report_outcome(action: &str, target: &str, transition: Transition) {
    if transition.applied {
        print_notice(&transition);
    } else {
        eprintln!("{action} skipped for {target}: locked, unknown, or already in progress");
    }
}
