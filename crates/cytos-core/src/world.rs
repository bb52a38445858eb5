//! World initialization: provisioning a fresh [`SimulationState`] from
//! configuration.
//!
//! Worlds are created once, outside the tick engine, and then mutated in
//! place for their lifetime. Organelles are minted here and never removed
//! by the core; the returned name map lets the surrounding server layer
//! translate player-facing organelle names into stable IDs.

use std::collections::BTreeMap;

use cytos_types::{OrganelleId, OrganelleState, Resources, SimulationState};
use tracing::info;

use crate::config::SimulationConfig;

/// Errors that can occur during world creation.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// The configuration provisions no organelles.
    #[error("a world needs at least one organelle")]
    NoOrganelles,

    /// An organelle spec is out of domain.
    #[error("invalid organelle {name}: {reason}")]
    InvalidOrganelle {
        /// The offending organelle's configured name.
        name: String,
        /// Explanation of what is wrong with the spec.
        reason: String,
    },
}

/// Create a fresh world from the given configuration.
///
/// Returns the initial state (tick 0, tier 0, zeroed metrics, idle
/// organelles) together with a map from configured organelle names to the
/// IDs minted for them.
///
/// # Errors
///
/// Returns [`WorldError::NoOrganelles`] if the organelle roster is empty,
/// or [`WorldError::InvalidOrganelle`] if a spec has a negative capacity
/// or efficiency.
pub fn create_world(
    config: &SimulationConfig,
) -> Result<(SimulationState, BTreeMap<String, OrganelleId>), WorldError> {
    if config.organelles.is_empty() {
        return Err(WorldError::NoOrganelles);
    }

    let mut organelles = BTreeMap::new();
    let mut names = BTreeMap::new();

    for (name, spec) in &config.organelles {
        if spec.capacity < 0.0 {
            return Err(WorldError::InvalidOrganelle {
                name: name.clone(),
                reason: format!("capacity {} is negative", spec.capacity),
            });
        }
        if spec.efficiency < 0.0 {
            return Err(WorldError::InvalidOrganelle {
                name: name.clone(),
                reason: format!("efficiency {} is negative", spec.efficiency),
            });
        }

        let id = OrganelleId::new();
        organelles.insert(id, OrganelleState::new(spec.capacity, spec.efficiency));
        names.insert(name.clone(), id);
    }

    let state = SimulationState {
        resources: Resources {
            energy: config.resources.starting_energy,
            nutrients: config.resources.starting_nutrients,
        },
        organelles,
        ..SimulationState::default()
    };

    info!(
        world = config.world.name,
        organelles = state.organelles.len(),
        starting_energy = state.resources.energy,
        starting_nutrients = state.resources.nutrients,
        "World created"
    );

    Ok((state, names))
}
