/// Campaign configuration: how many walks, how long, from where, and when to stop.
use serde::{Deserialize, Serialize};
use statewalk_explore::engine::DEFAULT_STEP_LIMIT;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Campaign needs a start state")]
    MissingStartState,

    #[error("Campaign must run at least one walk")]
    NoWalks,

    #[error("Coverage target {target} is outside 0..=100")]
    TargetOutOfRange { target: f64 },
}

/// Configuration for a campaign of random walks over one model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CampaignConfig {
    /// State every walk starts from.
    pub start_state: String,
    /// Maximum number of walks to run.
    pub walks: u32,
    /// Max steps per walk (must be greater than 2).
    pub step_limit: usize,
    /// Base RNG seed. Walk `n` is seeded with `seed + n`.
    pub seed: u64,
    /// Stop early once combined transition coverage reaches this percentage.
    pub coverage_target: Option<f64>,
}

impl Default for CampaignConfig {
    fn default() -> Self {
        Self {
            start_state: String::new(),
            walks: 10,
            step_limit: DEFAULT_STEP_LIMIT,
            seed: 42,
            coverage_target: None,
        }
    }
}

impl CampaignConfig {
    pub fn new(start_state: impl Into<String>) -> Self {
        Self {
            start_state: start_state.into(),
            ..Default::default()
        }
    }

    /// Parse and validate a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// The step limit is left to the walk engine, which owns that rule.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.start_state.is_empty() {
            return Err(ConfigError::MissingStartState);
        }
        if self.walks == 0 {
            return Err(ConfigError::NoWalks);
        }
        if let Some(target) = self.coverage_target {
            if !(0.0..=100.0).contains(&target) {
                return Err(ConfigError::TargetOutOfRange { target });
            }
        }
        Ok(())
    }
}
