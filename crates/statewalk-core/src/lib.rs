pub mod campaign;
pub mod config;
pub mod logging;

pub use campaign::{
    drive_campaign, run_campaign, CampaignError, CampaignReport, StopReason, WalkSummary,
};
pub use config::{CampaignConfig, ConfigError};
pub use logging::init_tracing;
