//! Derived-metric formulas: gain/cost, warmth, coherence, stability, and
//! the smoothed composite score.
//!
//! Warmth, strain, and the composite score are intentionally unbounded;
//! coherence and stability are clamped to `[0, 1]` at every update. The
//! tick orchestrator owns the evaluation order -- in particular, coherence
//! is computed *after* events are spawned so that festival bonuses land in
//! the tick that triggered them.

use cytos_types::{Metrics, PlayerAction, ResourceFlows, SimulationEvent};

/// Guard term preventing division by zero and `ln(0)` when gain or cost
/// is exactly zero.
const EPSILON: f64 = 1e-4;

/// Fixed calibration offset shifting warmth's neutral point. A gain/cost
/// ratio below `e^0.1` yields negative warmth.
const WARMTH_OFFSET: f64 = 0.1;

/// Fraction of current strain charged into the per-tick cost.
const STRAIN_COST_WEIGHT: f64 = 0.5;

/// Weight of fresh coherence in the stability update.
const COHERENCE_STABILITY_WEIGHT: f64 = 0.4;

/// Weight of fresh strain against stability.
const STRAIN_STABILITY_WEIGHT: f64 = 0.3;

/// Smoothing factor pulling the composite score toward the metric mean.
const COMPOSITE_SMOOTHING: f64 = 0.2;

/// This tick's energy gain: the positive part of the energy flow.
pub fn gain(flows: ResourceFlows) -> f64 {
    flows.energy.max(0.0)
}

/// This tick's cost: the nutrient drain plus a strain surcharge.
pub fn cost(flows: ResourceFlows, strain: f64) -> f64 {
    (-flows.nutrients).max(0.0) + strain * STRAIN_COST_WEIGHT
}

/// Warmth: `ln((gain + eps) / (cost + eps)) - 0.1`.
///
/// Monotonically increasing in gain, decreasing in cost, unbounded in both
/// directions. `calculate_warmth(0.0, 0.0)` is `ln(1) - 0.1 = -0.1`.
pub fn calculate_warmth(gain: f64, cost: f64) -> f64 {
    ((gain + EPSILON) / (cost + EPSILON)).ln() - WARMTH_OFFSET
}

/// Coherence: mean player harmony plus event bonuses, clamped to `[0, 1]`.
///
/// The mean is taken over *all* actions processed this tick, with absent
/// harmony values counting as 0; zero actions yield a mean of 0. Events
/// spawned this same tick contribute their coherence impacts immediately.
pub fn calculate_coherence(actions: &[PlayerAction], events: &[SimulationEvent]) -> f64 {
    let mean_harmony = if actions.is_empty() {
        0.0
    } else {
        let total: f64 = actions.iter().map(PlayerAction::harmony_or_default).sum();
        #[allow(clippy::cast_precision_loss)]
        let count = actions.len() as f64;
        total / count
    };

    let event_bonus: f64 = events
        .iter()
        .filter_map(|event| event.impact.coherence)
        .sum();

    (mean_harmony + event_bonus).clamp(0.0, 1.0)
}

/// Stability: previous value plus coherence gains minus strain penalties,
/// clamped to `[0, 1]`.
///
/// Uses the *already-updated* coherence and the strain value computed this
/// tick.
pub fn update_stability(stability_prev: f64, coherence: f64, strain: f64) -> f64 {
    (stability_prev + coherence * COHERENCE_STABILITY_WEIGHT - strain * STRAIN_STABILITY_WEIGHT)
        .clamp(0.0, 1.0)
}

/// Composite score: exponential smoothing toward the mean of the three
/// metrics. Unbounded, because warmth is unbounded.
pub fn smooth_composite(previous: f64, metrics: &Metrics) -> f64 {
    let mean = (metrics.warmth + metrics.stability + metrics.coherence) / 3.0;
    previous + (mean - previous) * COMPOSITE_SMOOTHING
}
