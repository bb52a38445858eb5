//! Bounded simulation loop wrapping the single-tick engine.
//!
//! One world advances on one logical timeline: the loop drains the action
//! source, runs a tick to completion, and only then sleeps until the next
//! interval. There is no overlap between ticks of the same world -- the
//! serialization the core requires is provided here.

use tracing::info;

use crate::actions::{ActionSource, ActionSourceError};
use crate::config::SimulationBoundsConfig;
use crate::hooks::TickHooks;
use crate::tick::{self, TickError, TickSummary};
use cytos_types::SimulationState;

/// Errors that can occur during the simulation run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// A tick execution failed.
    #[error("tick error: {source}")]
    Tick {
        /// The underlying tick error.
        #[from]
        source: TickError,
    },

    /// The action source failed.
    #[error("action source error: {source}")]
    Actions {
        /// The underlying action source error.
        #[from]
        source: ActionSourceError,
    },
}

/// Result of a completed simulation run.
#[derive(Debug)]
pub struct RunSummary {
    /// Total number of ticks executed.
    pub total_ticks: u64,
    /// The summary of the tick that hit the bound, if the run was bounded.
    pub final_summary: Option<TickSummary>,
}

/// Run the simulation loop until the tick bound is reached.
///
/// Each iteration drains the action source into the world's pending queue,
/// executes one tick, and sleeps for `tick_interval_ms` (0 disables the
/// sleep). A `max_ticks` of 0 runs unbounded.
///
/// # Errors
///
/// Returns [`RunnerError`] if a tick execution or the action source fails
/// unrecoverably.
pub async fn run_simulation(
    state: &mut SimulationState,
    source: &mut dyn ActionSource,
    hooks: &mut TickHooks,
    bounds: &SimulationBoundsConfig,
    tick_interval_ms: u64,
) -> Result<RunSummary, RunnerError> {
    let mut total_ticks: u64 = 0;

    info!(
        max_ticks = bounds.max_ticks,
        tick_interval_ms, "Simulation starting"
    );

    let final_summary = loop {
        // --- Ingest actions from the session layer ---
        for action in source.collect_actions(state.tick)? {
            state.push_action(action);
        }

        // --- Execute tick ---
        let summary = tick::run_tick(state, hooks)?;
        total_ticks = total_ticks.saturating_add(1);

        // --- Check tick limit ---
        if bounds.max_ticks > 0 && total_ticks >= bounds.max_ticks {
            info!(total_ticks, max_ticks = bounds.max_ticks, "Tick limit reached");
            break Some(summary);
        }

        // --- Sleep for tick interval ---
        if tick_interval_ms > 0 {
            tokio::time::sleep(tokio::time::Duration::from_millis(tick_interval_ms)).await;
        }
    };

    Ok(RunSummary {
        total_ticks,
        final_summary,
    })
}

/// Log the end-of-run summary.
pub fn log_simulation_end(result: &RunSummary) {
    info!(
        total_ticks = result.total_ticks,
        final_tick = result.final_summary.as_ref().map(|s| s.tick),
        final_tier = result.final_summary.as_ref().map(|s| s.tier),
        "Simulation ended"
    );
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use std::collections::BTreeMap;

    use cytos_types::{OrganelleId, OrganelleState, PlayerAction, PlayerId, Resources};

    use super::*;
    use crate::actions::StubActionSource;

    fn make_state() -> SimulationState {
        let mut organelles = BTreeMap::new();
        organelles.insert(OrganelleId::new(), OrganelleState::new(10.0, 1.0));
        SimulationState {
            organelles,
            resources: Resources {
                energy: 10.0,
                nutrients: 10.0,
            },
            ..SimulationState::default()
        }
    }

    /// An action source that emits one harmony action per tick.
    struct HarmonySource {
        harmony: f64,
    }

    impl ActionSource for HarmonySource {
        fn collect_actions(
            &mut self,
            _tick: u64,
        ) -> Result<Vec<PlayerAction>, ActionSourceError> {
            let mut action = PlayerAction::empty(PlayerId::new());
            action.harmony = Some(self.harmony);
            Ok(vec![action])
        }
    }

    /// An action source that always fails.
    struct BrokenSource;

    impl ActionSource for BrokenSource {
        fn collect_actions(
            &mut self,
            _tick: u64,
        ) -> Result<Vec<PlayerAction>, ActionSourceError> {
            Err(ActionSourceError::Internal {
                message: String::from("session layer down"),
            })
        }
    }

    #[tokio::test]
    async fn bounded_by_max_ticks() {
        let mut state = make_state();
        let mut source = StubActionSource::new();
        let bounds = SimulationBoundsConfig { max_ticks: 5 };

        let result = run_simulation(&mut state, &mut source, &mut TickHooks::none(), &bounds, 0)
            .await
            .unwrap();

        assert_eq!(result.total_ticks, 5);
        assert_eq!(state.tick, 5);
        assert_eq!(result.final_summary.unwrap().tick, 4);
    }

    #[tokio::test]
    async fn source_actions_reach_the_tick() {
        let mut state = make_state();
        let mut source = HarmonySource { harmony: 0.9 };
        let bounds = SimulationBoundsConfig { max_ticks: 1 };

        let result = run_simulation(&mut state, &mut source, &mut TickHooks::none(), &bounds, 0)
            .await
            .unwrap();

        let summary = result.final_summary.unwrap();
        assert_eq!(summary.actions_processed, 1);
        assert_eq!(summary.metrics.coherence, 0.9);
    }

    #[tokio::test]
    async fn source_failure_stops_the_run() {
        let mut state = make_state();
        let mut source = BrokenSource;
        let bounds = SimulationBoundsConfig { max_ticks: 3 };

        let result =
            run_simulation(&mut state, &mut source, &mut TickHooks::none(), &bounds, 0).await;
        assert!(matches!(result, Err(RunnerError::Actions { .. })));
        assert_eq!(state.tick, 0);
    }
}
