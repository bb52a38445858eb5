//! Shared type definitions for the Cytos simulation.
//!
//! This crate is the single source of truth for all types used across the
//! Cytos workspace: the per-world state snapshot, player actions, and the
//! transient world events produced by the tick engine.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for entity identifiers
//! - [`enums`] -- Enumeration types (event kinds)
//! - [`structs`] -- Core entity structs (state, metrics, organelles, events)
//! - [`actions`] -- Player action types for session-engine communication

pub mod actions;
pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use actions::{Allocation, PlayerAction};
pub use enums::EventKind;
pub use ids::{OrganelleId, PlayerId};
pub use structs::{
    EventImpact, Metrics, OrganelleState, ResourceFlows, Resources, SimulationEvent,
    SimulationState,
};
