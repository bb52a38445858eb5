//! The tick engine: one discrete simulation step for a world.
//!
//! Each call to [`run_tick`] advances a [`SimulationState`] by exactly one
//! tick, in a strictly linear pipeline:
//!
//! 1. Drain pending actions
//! 2. Apply allocations to organelle utilization
//! 3. Compute resource flows
//! 4. Compute strain (against the projected, pre-clamp nutrient balance)
//! 5. Consume flows into the resource pools (clamped to 0)
//! 6. Derive gain/cost and warmth
//! 7. Spawn candidate events (strain fresh, coherence from last tick)
//! 8. Compute coherence (including same-tick event bonuses)
//! 9. Update stability
//! 10. Smooth the composite score
//! 11. Apply event impacts and replace `active_events`
//! 12. Maybe progress the tier
//! 13. Increment the tick counter and invoke the persist/broadcast hooks
//!
//! No step depends on another except through this order. There is no I/O
//! inside the pipeline besides the two end-of-tick hooks, and no error
//! signaling beyond tick-counter overflow: the engine degrades silently
//! (unknown organelles ignored, missing fields defaulted, out-of-domain
//! metrics clamped) per the game's design.

use cytos_types::{Metrics, Resources, SimulationEvent, SimulationState};
use tracing::info;

use crate::hooks::TickHooks;
use crate::{events, flows, metrics};

/// Stability a world must exceed for tier progression.
const TIER_STABILITY_THRESHOLD: f64 = 0.75;

/// Warmth a world must exceed for tier progression.
const TIER_WARMTH_THRESHOLD: f64 = 0.5;

/// Errors that can occur during tick execution.
#[derive(Debug, thiserror::Error)]
pub enum TickError {
    /// Tick counter would overflow.
    #[error("tick counter overflow: cannot advance beyond u64::MAX")]
    TickOverflow,
}

/// Summary of a single tick's execution.
///
/// `tick` is the number of the tick that just ran; the state's counter has
/// already advanced past it when the summary is returned.
#[derive(Debug, Clone, PartialEq)]
pub struct TickSummary {
    /// The tick number that was executed.
    pub tick: u64,
    /// The tier after this tick.
    pub tier: u64,
    /// The derived metrics after this tick.
    pub metrics: Metrics,
    /// The resource pools after this tick.
    pub resources: Resources,
    /// The strain accumulator after this tick.
    pub strain: f64,
    /// The smoothed composite score after this tick.
    pub blah: f64,
    /// Number of player actions processed.
    pub actions_processed: u32,
    /// The events spawned and applied during this tick.
    pub events: Vec<SimulationEvent>,
}

/// Execute one complete tick of the simulation.
///
/// The state is mutated in place and must be exclusively owned by the
/// caller for the duration of the call; the surrounding harness is
/// responsible for serializing tick invocations per world. On return,
/// `pending_actions` is empty, `active_events` holds exactly this tick's
/// events, and the tick counter has advanced by one.
///
/// The configured hooks receive the final state, persist before broadcast.
/// Hook failures are owned by the hook implementations.
///
/// # Errors
///
/// Returns [`TickError::TickOverflow`] if the tick counter would exceed
/// `u64::MAX`. No other condition is fatal.
pub fn run_tick(
    state: &mut SimulationState,
    hooks: &mut TickHooks,
) -> Result<TickSummary, TickError> {
    let tick = state.tick;
    let actions = core::mem::take(&mut state.pending_actions);

    info!(tick, pending_actions = actions.len(), "Tick started");

    // --- Allocations, flows, strain, consumption ---
    flows::apply_allocations(&mut state.organelles, &actions);
    let tick_flows = flows::compute_flows(&state.organelles);
    state.strain = flows::compute_strain(
        state.strain,
        &state.resources,
        tick_flows,
        &state.organelles,
    );
    flows::consume_flows(&mut state.resources, tick_flows);

    // --- Warmth ---
    let gain = metrics::gain(tick_flows);
    let cost = metrics::cost(tick_flows, state.strain);
    state.metrics.warmth = metrics::calculate_warmth(gain, cost);

    // --- Event spawning: coherence trigger reads last tick's value ---
    let spawned = events::spawn_events(
        tick,
        state.strain,
        state.metrics.coherence,
        state.resources.nutrients,
    );

    // --- Coherence, stability, composite ---
    state.metrics.coherence = metrics::calculate_coherence(&actions, &spawned);
    state.metrics.stability = metrics::update_stability(
        state.metrics.stability,
        state.metrics.coherence,
        state.strain,
    );
    state.blah = metrics::smooth_composite(state.blah, &state.metrics);

    // --- Event impacts ---
    events::apply_events(&mut state.resources, &mut state.metrics, &spawned);
    state.active_events = spawned;

    // --- Tier progression ---
    if tier_qualifies(&state.metrics) {
        state.tier = state.tier.saturating_add(1);
        info!(tick, tier = state.tier, "Tier advanced");
    }

    state.tick = state.tick.checked_add(1).ok_or(TickError::TickOverflow)?;

    let summary = TickSummary {
        tick,
        tier: state.tier,
        metrics: state.metrics,
        resources: state.resources,
        strain: state.strain,
        blah: state.blah,
        actions_processed: u32::try_from(actions.len()).unwrap_or(u32::MAX),
        events: state.active_events.clone(),
    };

    hooks.dispatch(state);

    info!(
        tick,
        warmth = state.metrics.warmth,
        coherence = state.metrics.coherence,
        stability = state.metrics.stability,
        strain = state.strain,
        events = summary.events.len(),
        "Tick complete"
    );

    Ok(summary)
}

/// Whether the freshly computed metrics clear the tier thresholds.
///
/// Both comparisons are strict: sitting exactly on a threshold does not
/// qualify. Evaluated after event application, so event stability deltas
/// count.
fn tier_qualifies(metrics: &Metrics) -> bool {
    metrics.stability > TIER_STABILITY_THRESHOLD && metrics.warmth > TIER_WARMTH_THRESHOLD
}
