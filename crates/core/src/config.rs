use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Root application configuration. Loaded from an optional TOML file and
/// environment variables with the prefix `PROFITGUARD__`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Fraction of revenue consumed by cost of goods, in [0, 1].
    #[serde(default = "default_cost_rate")]
    pub cost_rate: f64,
    /// Toggles live Google Ads access. No live integration exists, so the
    /// simulated layer is used either way.
    #[serde(default)]
    pub live_api: bool,
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub guards: GuardConfig,
}

/// Artificial latencies applied by the simulated action handlers.
#[derive(Debug, Clone, Deserialize)]
pub struct SimulationConfig {
    #[serde(default = "default_initial_load_delay_ms")]
    pub initial_load_delay_ms: u64,
    #[serde(default = "default_pause_delay_ms")]
    pub pause_delay_ms: u64,
    #[serde(default = "default_undo_delay_ms")]
    pub undo_delay_ms: u64,
    #[serde(default = "default_strategy_delay_ms")]
    pub strategy_delay_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GuardConfig {
    /// Minimum acceptable margin, in percent (0-50).
    #[serde(default = "default_min_margin")]
    pub min_margin: u8,
    #[serde(default = "default_auto_pause")]
    pub auto_pause: bool,
}

fn default_cost_rate() -> f64 {
    0.60
}
fn default_initial_load_delay_ms() -> u64 {
    1200
}
fn default_pause_delay_ms() -> u64 {
    1200
}
fn default_undo_delay_ms() -> u64 {
    1000
}
fn default_strategy_delay_ms() -> u64 {
    1500
}
fn default_min_margin() -> u8 {
    15
}
fn default_auto_pause() -> bool {
    true
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            initial_load_delay_ms: default_initial_load_delay_ms(),
            pause_delay_ms: default_pause_delay_ms(),
            undo_delay_ms: default_undo_delay_ms(),
            strategy_delay_ms: default_strategy_delay_ms(),
        }
    }
}

impl SimulationConfig {
    pub fn initial_load_delay(&self) -> Duration {
        Duration::from_millis(self.initial_load_delay_ms)
    }

    pub fn pause_delay(&self) -> Duration {
        Duration::from_millis(self.pause_delay_ms)
    }

    pub fn undo_delay(&self) -> Duration {
        Duration::from_millis(self.undo_delay_ms)
    }

    pub fn strategy_delay(&self) -> Duration {
        Duration::from_millis(self.strategy_delay_ms)
    }

    /// All delays zeroed; handy for tests and batch CLI runs.
    pub fn instant() -> Self {
        Self {
            initial_load_delay_ms: 0,
            pause_delay_ms: 0,
            undo_delay_ms: 0,
            strategy_delay_ms: 0,
        }
    }
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            min_margin: default_min_margin(),
            auto_pause: default_auto_pause(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cost_rate: default_cost_rate(),
            live_api: false,
            simulation: SimulationConfig::default(),
            guards: GuardConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables only.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration from an optional TOML file, then environment
    /// variables, which take precedence.
    pub fn load_from(path: Option<&str>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(
                config::File::with_name(path)
                    .format(config::FileFormat::Toml)
                    .required(true),
            );
        }
        let builder = builder.add_source(
            config::Environment::with_prefix("PROFITGUARD")
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = builder.build()?.try_deserialize()?;
        debug!(
            file = ?path,
            cost_rate = config.cost_rate,
            live_api = config.live_api,
            "Configuration resolved"
        );
        Ok(config)
    }
}
