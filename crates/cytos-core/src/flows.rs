//! Allocation application, resource-flow computation, strain, and flow
//! consumption -- the resource half of the tick pipeline.
//!
//! Order matters across these functions and is owned by the tick
//! orchestrator: allocations mutate utilization first, flows are computed
//! from the adjusted organelles, strain is derived against the *projected*
//! nutrient balance, and only then are the flows committed (and clamped)
//! into the resource pools. Strain therefore sees the true deficit even
//! when the pools are clamped away afterwards.

use std::collections::BTreeMap;

use cytos_types::{OrganelleId, OrganelleState, PlayerAction, ResourceFlows, Resources};
use tracing::debug;

/// Fraction of total energy output charged as nutrient cost each tick.
///
/// A design simplification, not a physically derived constant.
const NUTRIENT_COST_FRACTION: f64 = 0.6;

/// Per-tick decay factor applied to accumulated strain.
const STRAIN_CARRYOVER: f64 = 0.6;

/// Weight of the projected nutrient shortfall in the strain update.
const NUTRIENT_DEBT_WEIGHT: f64 = 0.4;

/// Weight of total organelle utilization in the strain update.
const UTILIZATION_LOAD_WEIGHT: f64 = 0.2;

/// Apply every allocation from every pending action to the organelle map.
///
/// Actions are processed in arrival order, allocations in list order.
/// Each delta is added to the organelle's utilization and clamped to
/// `[0, 1]`; unknown organelle IDs are silently ignored. Because the
/// operation is a clamped commutative sum per organelle, the final
/// utilization is order-independent except for clamping interaction at
/// the boundaries -- a deterministic, accepted quirk.
pub fn apply_allocations(
    organelles: &mut BTreeMap<OrganelleId, OrganelleState>,
    actions: &[PlayerAction],
) {
    for action in actions {
        for allocation in &action.allocations {
            if let Some(organelle) = organelles.get_mut(&allocation.organelle_id) {
                organelle.apply_delta(allocation.delta);
            } else {
                debug!(
                    player_id = %action.player_id,
                    organelle_id = %allocation.organelle_id,
                    "Allocation for unknown organelle ignored"
                );
            }
        }
    }
}

/// Compute this tick's resource flows from the current organelle state.
///
/// Each organelle contributes `capacity * efficiency * utilization` to the
/// energy flow; the nutrient flow is a fixed negative fraction of the total
/// energy output. Pure function, no mutation.
pub fn compute_flows(organelles: &BTreeMap<OrganelleId, OrganelleState>) -> ResourceFlows {
    let total_output: f64 = organelles.values().map(OrganelleState::output).sum();
    ResourceFlows {
        energy: total_output,
        nutrients: -NUTRIENT_COST_FRACTION * total_output,
    }
}

/// Advance the strain accumulator by one tick.
///
/// `strain' = strain * 0.6 + nutrient_debt * 0.4 + utilization_load * 0.2`
/// where `nutrient_debt` is the projected nutrient shortfall before
/// consumption is committed and `utilization_load` is the sum of all
/// organelle utilizations. The load term is unbounded and grows with
/// organelle count -- a scaling property to preserve, not normalize.
/// Strain itself is never clamped; only its consumers clamp.
pub fn compute_strain(
    strain_prev: f64,
    resources: &Resources,
    flows: ResourceFlows,
    organelles: &BTreeMap<OrganelleId, OrganelleState>,
) -> f64 {
    let nutrient_debt = (-(resources.nutrients + flows.nutrients)).max(0.0);
    let utilization_load: f64 = organelles.values().map(|o| o.utilization).sum();
    strain_prev * STRAIN_CARRYOVER
        + nutrient_debt * NUTRIENT_DEBT_WEIGHT
        + utilization_load * UTILIZATION_LOAD_WEIGHT
}

/// Commit the computed flows into the resource pools.
///
/// Both pools are clamped to a minimum of 0 after the addition. This runs
/// after strain has been computed against the projected (pre-clamp) value.
pub fn consume_flows(resources: &mut Resources, flows: ResourceFlows) {
    resources.energy = (resources.energy + flows.energy).max(0.0);
    resources.nutrients = (resources.nutrients + flows.nutrients).max(0.0);
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use cytos_types::{Allocation, PlayerId};

    use super::*;

    fn make_organelles(specs: &[(f64, f64, f64)]) -> BTreeMap<OrganelleId, OrganelleState> {
        specs
            .iter()
            .map(|&(capacity, efficiency, utilization)| {
                (OrganelleId::new(), OrganelleState {
                    capacity,
                    efficiency,
                    utilization,
                })
            })
            .collect()
    }

    fn make_action(organelle_id: OrganelleId, deltas: &[f64]) -> PlayerAction {
        let mut action = PlayerAction::empty(PlayerId::new());
        action.allocations = deltas
            .iter()
            .map(|&delta| Allocation {
                organelle_id,
                delta,
            })
            .collect();
        action
    }

    #[test]
    fn allocations_accumulate_without_clamping() {
        let mut organelles = make_organelles(&[(10.0, 1.0, 0.0)]);
        let id = *organelles.keys().next().unwrap();

        apply_allocations(&mut organelles, &[make_action(id, &[0.3, 0.3])]);
        assert_eq!(organelles.get(&id).unwrap().utilization, 0.6);
    }

    #[test]
    fn allocations_clamp_identically_in_either_order() {
        for deltas in [[0.8, 0.4], [0.4, 0.8]] {
            let mut organelles = make_organelles(&[(10.0, 1.0, 0.0)]);
            let id = *organelles.keys().next().unwrap();
            apply_allocations(&mut organelles, &[make_action(id, &deltas)]);
            assert_eq!(organelles.get(&id).unwrap().utilization, 1.0);
        }
    }

    #[test]
    fn saturating_allocations_clamp_to_full() {
        let mut organelles = make_organelles(&[(10.0, 1.0, 0.0)]);
        let id = *organelles.keys().next().unwrap();
        apply_allocations(&mut organelles, &[make_action(id, &[0.7, 0.7])]);
        assert_eq!(organelles.get(&id).unwrap().utilization, 1.0);
    }

    #[test]
    fn unknown_organelle_is_ignored() {
        let mut organelles = make_organelles(&[(10.0, 1.0, 0.5)]);
        let known = *organelles.keys().next().unwrap();

        apply_allocations(&mut organelles, &[make_action(OrganelleId::new(), &[0.4])]);
        assert_eq!(organelles.get(&known).unwrap().utilization, 0.5);
    }

    #[test]
    fn flows_sum_organelle_outputs() {
        let organelles = make_organelles(&[(10.0, 1.0, 0.5), (4.0, 0.5, 1.0)]);
        let flows = compute_flows(&organelles);
        // 10*1.0*0.5 + 4*0.5*1.0 = 7
        assert_eq!(flows.energy, 7.0);
        assert_eq!(flows.nutrients, -0.6 * 7.0);
    }

    #[test]
    fn idle_organelles_produce_no_flow() {
        let organelles = make_organelles(&[(10.0, 1.0, 0.0)]);
        let flows = compute_flows(&organelles);
        assert_eq!(flows.energy, 0.0);
        assert_eq!(flows.nutrients, 0.0);
    }

    #[test]
    fn strain_decays_when_no_pressure() {
        let organelles = make_organelles(&[]);
        let resources = Resources {
            energy: 5.0,
            nutrients: 5.0,
        };
        let strain = compute_strain(1.0, &resources, ResourceFlows::default(), &organelles);
        assert_eq!(strain, 0.6);
    }

    #[test]
    fn strain_sees_projected_nutrient_debt() {
        let organelles = make_organelles(&[]);
        let resources = Resources {
            energy: 0.0,
            nutrients: 1.0,
        };
        let flows = ResourceFlows {
            energy: 5.0,
            nutrients: -3.0,
        };
        // Projected balance: 1 - 3 = -2, so debt = 2.
        let strain = compute_strain(0.0, &resources, flows, &organelles);
        assert_eq!(strain, 2.0 * 0.4);
    }

    #[test]
    fn strain_load_term_scales_with_utilization() {
        let organelles = make_organelles(&[(1.0, 1.0, 1.0), (1.0, 1.0, 0.5)]);
        let resources = Resources {
            energy: 10.0,
            nutrients: 10.0,
        };
        let strain = compute_strain(0.0, &resources, ResourceFlows::default(), &organelles);
        assert_eq!(strain, 1.5 * 0.2);
    }

    #[test]
    fn consume_clamps_to_zero() {
        let mut resources = Resources {
            energy: 1.0,
            nutrients: 1.0,
        };
        let flows = ResourceFlows {
            energy: 2.0,
            nutrients: -3.0,
        };
        consume_flows(&mut resources, flows);
        assert_eq!(resources.energy, 3.0);
        assert_eq!(resources.nutrients, 0.0);
    }
}
