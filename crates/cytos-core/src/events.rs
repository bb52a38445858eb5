//! World-event spawning and impact application.
//!
//! Three independent trigger conditions are evaluated each tick; none are
//! mutually exclusive, so a single tick can spawn up to three events. The
//! triggers deliberately mix value freshness: strain uses the value just
//! computed this tick, coherence uses the previous tick's value (spawning
//! runs before coherence is recomputed), and nutrients use the
//! post-consumption pool. Preserve this asymmetry exactly -- changing it
//! alters game balance, not correctness.

use cytos_types::{EventImpact, EventKind, Metrics, Resources, SimulationEvent};
use tracing::debug;

/// Strain level above which an anomaly fires.
const ANOMALY_STRAIN_THRESHOLD: f64 = 1.5;

/// Coherence level (previous tick) above which a festival fires.
const FESTIVAL_COHERENCE_THRESHOLD: f64 = 0.7;

/// Nutrient level below which a repair fires.
const REPAIR_NUTRIENT_THRESHOLD: f64 = 1.0;

/// Evaluate the trigger conditions and build this tick's events.
///
/// `tick` is the number of the tick currently executing (pre-increment);
/// it seeds the deterministic event IDs. `prev_coherence` must be the
/// coherence carried over from the previous tick.
pub fn spawn_events(
    tick: u64,
    strain: f64,
    prev_coherence: f64,
    nutrients: f64,
) -> Vec<SimulationEvent> {
    let mut events = Vec::new();

    if strain > ANOMALY_STRAIN_THRESHOLD {
        events.push(SimulationEvent::new(EventKind::Anomaly, tick, EventImpact {
            stability: Some(-0.2),
            energy: Some(-2.0),
            ..EventImpact::default()
        }));
    }

    if prev_coherence > FESTIVAL_COHERENCE_THRESHOLD {
        events.push(SimulationEvent::new(EventKind::Festival, tick, EventImpact {
            coherence: Some(0.1),
            energy: Some(1.0),
            ..EventImpact::default()
        }));
    }

    if nutrients < REPAIR_NUTRIENT_THRESHOLD {
        events.push(SimulationEvent::new(EventKind::Repair, tick, EventImpact {
            nutrients: Some(2.0),
            stability: Some(0.1),
            ..EventImpact::default()
        }));
    }

    if !events.is_empty() {
        debug!(tick, count = events.len(), "Events spawned");
    }

    events
}

/// Apply each event's impact to the resource pools and metrics.
///
/// Energy and nutrient deltas are added directly, without clamping.
/// Coherence and stability deltas are clamped to `[0, 1]` on each
/// addition. Absent impact fields have no effect.
pub fn apply_events(resources: &mut Resources, metrics: &mut Metrics, events: &[SimulationEvent]) {
    for event in events {
        if let Some(delta) = event.impact.energy {
            resources.energy += delta;
        }
        if let Some(delta) = event.impact.nutrients {
            resources.nutrients += delta;
        }
        if let Some(delta) = event.impact.coherence {
            metrics.coherence = (metrics.coherence + delta).clamp(0.0, 1.0);
        }
        if let Some(delta) = event.impact.stability {
            metrics.stability = (metrics.stability + delta).clamp(0.0, 1.0);
        }
    }
}
