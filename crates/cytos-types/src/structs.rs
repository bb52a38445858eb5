//! Core entity structs for the Cytos simulation.
//!
//! Covers the authoritative per-world [`SimulationState`] snapshot and the
//! value types it is composed of. The state is created once at world
//! initialization and mutated in place, tick by tick, for the lifetime of
//! the world.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::actions::PlayerAction;
use crate::enums::EventKind;
use crate::ids::OrganelleId;

// ---------------------------------------------------------------------------
// Derived metrics
// ---------------------------------------------------------------------------

/// The three derived world metrics, recomputed every tick.
///
/// Coherence and stability are conventionally bounded to `[0, 1]`; warmth is
/// an unbounded logarithmic score (the primary "health" signal).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    /// Logarithmic score of energy gain relative to cost. Unbounded in both
    /// directions; negative when the gain/cost ratio drops below the
    /// calibration point.
    pub warmth: f64,
    /// Player-action alignment plus event bonuses, clamped to `[0, 1]`.
    pub coherence: f64,
    /// Blend of coherence gains against strain penalties, clamped to `[0, 1]`.
    pub stability: f64,
}

// ---------------------------------------------------------------------------
// Resources and flows
// ---------------------------------------------------------------------------

/// The world's resource pools.
///
/// Both pools are non-negative after flow consumption each tick; event
/// impacts are applied on top without re-clamping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Resources {
    /// Stored energy, fed by organelle output.
    pub energy: f64,
    /// Stored nutrients, drained as a fixed fraction of energy output.
    pub nutrients: f64,
}

/// Per-tick resource deltas computed from organelle state.
///
/// Ephemeral: recomputed every tick from scratch and never persisted on the
/// [`SimulationState`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceFlows {
    /// Energy delta for this tick (sum of organelle outputs).
    pub energy: f64,
    /// Nutrient delta for this tick (negative: nutrient cost of output).
    pub nutrients: f64,
}

// ---------------------------------------------------------------------------
// Organelles
// ---------------------------------------------------------------------------

/// A named resource-producing unit within a world.
///
/// Capacity and efficiency are fixed at world creation; only utilization is
/// mutated by the core, in response to player allocations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrganelleState {
    /// Maximum output of this organelle, set at world creation.
    pub capacity: f64,
    /// Fixed output multiplier, set at world creation.
    pub efficiency: f64,
    /// Player-controlled duty fraction, always within `[0, 1]`.
    pub utilization: f64,
}

impl OrganelleState {
    /// Create an organelle with the given capacity and efficiency, idle.
    pub const fn new(capacity: f64, efficiency: f64) -> Self {
        Self {
            capacity,
            efficiency,
            utilization: 0.0,
        }
    }

    /// Add a utilization delta and clamp the result to `[0, 1]`.
    ///
    /// Because this is a clamped commutative sum, the final utilization is
    /// independent of application order except when intermediate values hit
    /// a clamp boundary. That interaction is deterministic and accepted.
    pub fn apply_delta(&mut self, delta: f64) {
        self.utilization = (self.utilization + delta).clamp(0.0, 1.0);
    }

    /// This organelle's contribution to the energy flow:
    /// `capacity * efficiency * utilization`.
    pub fn output(&self) -> f64 {
        self.capacity * self.efficiency * self.utilization
    }
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// The partial set of state deltas carried by a [`SimulationEvent`].
///
/// Absent fields mean no effect on that dimension. Energy and nutrient
/// deltas are applied directly without clamping; coherence and stability
/// deltas are clamped to `[0, 1]` on application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EventImpact {
    /// Delta applied to `resources.energy`, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy: Option<f64>,
    /// Delta applied to `resources.nutrients`, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutrients: Option<f64>,
    /// Delta applied to `metrics.coherence`, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coherence: Option<f64>,
    /// Delta applied to `metrics.stability`, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stability: Option<f64>,
}

/// A world event spawned by a trigger condition during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationEvent {
    /// Deterministic identifier, `"<kind>-<tick>"`. Unique within a tick
    /// because each kind fires at most once per tick.
    pub id: String,
    /// Which trigger produced this event.
    pub kind: EventKind,
    /// The state deltas this event applies.
    pub impact: EventImpact,
}

impl SimulationEvent {
    /// Construct an event for the given tick with a deterministic ID.
    pub fn new(kind: EventKind, tick: u64, impact: EventImpact) -> Self {
        Self {
            id: format!("{}-{tick}", kind.as_str()),
            kind,
            impact,
        }
    }
}

// ---------------------------------------------------------------------------
// SimulationState
// ---------------------------------------------------------------------------

/// The authoritative per-world snapshot.
///
/// Exclusively owned and mutated by a single tick-execution context; the
/// calling harness must serialize tick invocations per world. The full
/// struct is what the persist and broadcast hooks receive at the end of
/// each tick, so it round-trips through serde.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SimulationState {
    /// Monotonic tick counter, incremented at the end of every tick.
    pub tick: u64,
    /// Monotonic progression level. Never decreases, no upper bound.
    pub tier: u64,
    /// The derived metrics as of the most recent tick.
    pub metrics: Metrics,
    /// The resource pools.
    pub resources: Resources,
    /// All organelles keyed by ID. Keys are stable across ticks.
    pub organelles: BTreeMap<OrganelleId, OrganelleState>,
    /// Smoothed accumulator of resource/utilization pressure. Non-negative,
    /// decays every tick; unbounded above.
    pub strain: f64,
    /// Smoothed composite score: exponential moving average of the three
    /// metrics. Unbounded because warmth is unbounded. The name is
    /// historical and baked into persisted snapshots.
    pub blah: f64,
    /// Actions awaiting the next tick, in arrival order. Emptied by every
    /// tick before it completes.
    #[serde(default)]
    pub pending_actions: Vec<PlayerAction>,
    /// The events applied during the most recent tick. Replaced wholesale
    /// each tick, never accumulated.
    #[serde(default)]
    pub active_events: Vec<SimulationEvent>,
}

impl SimulationState {
    /// Append an action to the pending queue.
    ///
    /// Called by the session/request layer between ticks. Arrival order is
    /// preserved and determines allocation application order.
    pub fn push_action(&mut self, action: PlayerAction) {
        self.pending_actions.push(action);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn apply_delta_clamps_high() {
        let mut org = OrganelleState::new(10.0, 1.0);
        org.apply_delta(0.7);
        org.apply_delta(0.7);
        assert_eq!(org.utilization, 1.0);
    }

    #[test]
    fn apply_delta_clamps_low() {
        let mut org = OrganelleState::new(10.0, 1.0);
        org.apply_delta(-0.5);
        assert_eq!(org.utilization, 0.0);
    }

    #[test]
    fn output_scales_with_utilization() {
        let mut org = OrganelleState::new(4.0, 0.5);
        assert_eq!(org.output(), 0.0);
        org.apply_delta(0.5);
        assert_eq!(org.output(), 1.0);
    }

    #[test]
    fn event_id_is_deterministic() {
        let event = SimulationEvent::new(EventKind::Anomaly, 42, EventImpact::default());
        assert_eq!(event.id, "anomaly-42");
    }

    #[test]
    fn state_roundtrips_through_serde() {
        let mut state = SimulationState::default();
        state.tick = 7;
        state.strain = 0.25;
        state
            .organelles
            .insert(OrganelleId::new(), OrganelleState::new(5.0, 1.2));
        state
            .active_events
            .push(SimulationEvent::new(EventKind::Repair, 7, EventImpact {
                nutrients: Some(2.0),
                stability: Some(0.1),
                ..EventImpact::default()
            }));

        let json = serde_json::to_string(&state).unwrap();
        let restored: SimulationState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, restored);
    }

    #[test]
    fn absent_impact_fields_are_omitted() {
        let impact = EventImpact {
            energy: Some(1.0),
            ..EventImpact::default()
        };
        let json = serde_json::to_string(&impact).unwrap();
        assert!(json.contains("energy"));
        assert!(!json.contains("nutrients"));
    }
}
