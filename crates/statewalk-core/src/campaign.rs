use serde::Serialize;
use statewalk_explore::rng::walk_rng;
use statewalk_explore::{
    CoverageError, CoverageTracker, DriverError, PseudoRandomChoice, SutDriver, Termination, Walk,
    WalkEngine, WalkError,
};
use statewalk_model::StateMachine;

use crate::config::{CampaignConfig, ConfigError};

#[derive(Debug, thiserror::Error)]
pub enum CampaignError {
    #[error("Invalid campaign config: {0}")]
    Config(#[from] ConfigError),

    #[error("Walk {index} failed: {source}")]
    Walk { index: u32, source: WalkError },

    #[error("Coverage error: {0}")]
    Coverage(#[from] CoverageError),

    #[error("Driving walk {index} failed: {source}")]
    Drive { index: u32, source: DriverError },
}

/// Why a campaign stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Every configured walk ran.
    WalksExhausted,
    /// Combined transition coverage reached the configured target.
    CoverageTargetReached,
}

/// What one walk of a campaign did.
#[derive(Debug, Clone, Serialize)]
pub struct WalkSummary {
    pub index: u32,
    pub seed: u64,
    pub steps: usize,
    pub end_state: String,
    pub termination: Termination,
    pub state_coverage: f64,
    pub transition_coverage: f64,
}

impl WalkSummary {
    fn from_walk(index: u32, seed: u64, walk: &Walk) -> Self {
        Self {
            index,
            seed,
            steps: walk.len(),
            end_state: walk.end_state().to_string(),
            termination: walk.termination(),
            state_coverage: walk.state_coverage(),
            transition_coverage: walk.transition_coverage(),
        }
    }
}

/// Result of a complete campaign run.
#[derive(Debug, Clone, Serialize)]
pub struct CampaignReport {
    pub start_state: String,
    pub seed: u64,
    /// Per-walk summaries in run order.
    pub walks: Vec<WalkSummary>,
    /// Total steps across all walks.
    pub total_steps: usize,
    pub unique_states: usize,
    pub unique_transitions: usize,
    /// Union of every walk's states over the states store.
    pub state_coverage: f64,
    /// Union of every walk's transitions over the valid transitions.
    pub transition_coverage: f64,
    pub stop_reason: StopReason,
}

impl CampaignReport {
    pub fn walks_completed(&self) -> usize {
        self.walks.len()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Run a campaign: one engine per walk, coverage accumulated across walks.
pub fn run_campaign<C>(
    machine: &mut StateMachine<C>,
    ctx: &mut C,
    config: &CampaignConfig,
) -> Result<CampaignReport, CampaignError> {
    run(machine, ctx, config, |_, _| Ok(()))
}

/// Like [`run_campaign`], but replays every walk against `driver` as soon as
/// it is generated. The first driver failure ends the campaign.
pub fn drive_campaign<C, D>(
    machine: &mut StateMachine<C>,
    ctx: &mut C,
    config: &CampaignConfig,
    driver: &mut D,
) -> Result<CampaignReport, CampaignError>
where
    D: SutDriver + ?Sized,
{
    run(machine, ctx, config, |index, walk| {
        walk.drive_using(&mut *driver)
            .map_err(|source| CampaignError::Drive { index, source })
    })
}

fn run<C, F>(
    machine: &mut StateMachine<C>,
    ctx: &mut C,
    config: &CampaignConfig,
    mut on_walk: F,
) -> Result<CampaignReport, CampaignError>
where
    F: FnMut(u32, &Walk) -> Result<(), CampaignError>,
{
    config.validate()?;
    tracing::info!(
        start = %config.start_state,
        walks = config.walks,
        step_limit = config.step_limit,
        seed = config.seed,
        "campaign started"
    );

    let mut tracker = CoverageTracker::new();
    let mut summaries = Vec::new();
    let mut total_steps = 0;
    let mut stop_reason = StopReason::WalksExhausted;

    for index in 0..config.walks {
        let mut chooser = PseudoRandomChoice::new(walk_rng(config.seed, u64::from(index)));
        let walk = WalkEngine::new(machine, &mut chooser)
            .random_walk(&config.start_state, config.step_limit, ctx)
            .map_err(|source| CampaignError::Walk { index, source })?;

        on_walk(index, &walk)?;

        tracker.record(walk.steps());
        total_steps += walk.len();
        summaries.push(WalkSummary::from_walk(
            index,
            config.seed.wrapping_add(u64::from(index)),
            &walk,
        ));

        if let Some(target) = config.coverage_target {
            let combined = tracker.transition_coverage(machine.adjacency())?;
            if combined >= target {
                tracing::debug!(walk = index, combined, target, "coverage target reached");
                stop_reason = StopReason::CoverageTargetReached;
                break;
            }
        }
    }

    let report = CampaignReport {
        start_state: config.start_state.clone(),
        seed: config.seed,
        walks: summaries,
        total_steps,
        unique_states: tracker.unique_states(),
        unique_transitions: tracker.unique_transitions(),
        state_coverage: tracker.state_coverage(machine.states_store())?,
        transition_coverage: tracker.transition_coverage(machine.adjacency())?,
        stop_reason,
    };

    tracing::info!(
        walks = report.walks_completed(),
        total_steps = report.total_steps,
        state_coverage = report.state_coverage,
        transition_coverage = report.transition_coverage,
        ?stop_reason,
        "campaign finished"
    );
    Ok(report)
}
