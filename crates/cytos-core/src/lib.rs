//! Tick engine and orchestration for the Cytos simulation.
//!
//! This crate owns the per-tick state transition that drives a world:
//! action ingestion, allocation application, resource flows, strain,
//! the derived metrics, event spawning/application, and tier progression.
//!
//! # Modules
//!
//! - [`actions`] -- [`ActionSource`] trait and [`StubActionSource`].
//! - [`config`] -- Configuration loading from `cytos-config.yaml` into
//!   strongly-typed structs.
//! - [`events`] -- World-event spawning and impact application.
//! - [`flows`] -- Allocations, resource flows, strain, flow consumption.
//! - [`hooks`] -- Injected persist/broadcast capabilities.
//! - [`metrics`] -- Warmth, coherence, stability, and composite-score
//!   formulas.
//! - [`runner`] -- Bounded async simulation loop.
//! - [`tick`] -- The orchestrated tick pipeline.
//! - [`world`] -- World creation from configuration.
//!
//! [`ActionSource`]: actions::ActionSource
//! [`StubActionSource`]: actions::StubActionSource

pub mod actions;
pub mod config;
pub mod events;
pub mod flows;
pub mod hooks;
pub mod metrics;
pub mod runner;
pub mod tick;
pub mod world;
