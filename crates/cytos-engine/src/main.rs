//! World engine binary for the Cytos simulation.
//!
//! Wires the tick engine to its external collaborators and runs the
//! bounded simulation loop. The action source is a stub (no session layer
//! is bundled with this binary); persistence and broadcast are served by
//! the reference sinks in [`sinks`].
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from `cytos-config.yaml`
//! 3. Create the starting world from the organelle roster
//! 4. Open the JSON-lines persist sink and the log broadcast sink
//! 5. Run the simulation loop
//! 6. Log the result

mod error;
mod sinks;

use std::path::Path;

use cytos_core::actions::StubActionSource;
use cytos_core::config::SimulationConfig;
use cytos_core::hooks::TickHooks;
use cytos_core::{runner, world};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;
use crate::sinks::{JsonlPersistSink, LogBroadcastSink};

/// Path of the canonical configuration file, relative to the working
/// directory.
const CONFIG_PATH: &str = "cytos-config.yaml";

/// Path of the JSON-lines snapshot file written by the persist sink.
const SNAPSHOT_PATH: &str = "cytos-ticks.jsonl";

/// Application entry point for the world engine.
///
/// # Errors
///
/// Returns an error if any initialization step or the simulation itself
/// fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("cytos-engine starting");

    // 2. Load configuration.
    let config = load_config()?;
    info!(
        world_name = config.world.name,
        tick_interval_ms = config.world.tick_interval_ms,
        max_ticks = config.simulation.max_ticks,
        organelles = config.organelles.len(),
        "Configuration loaded"
    );

    // 3. Create the starting world.
    let (mut state, organelle_names) = world::create_world(&config).map_err(EngineError::from)?;
    info!(
        organelles = organelle_names.len(),
        "Starting world created"
    );

    // 4. Wire the persist/broadcast hooks.
    let persist = JsonlPersistSink::open(Path::new(SNAPSHOT_PATH)).map_err(EngineError::from)?;
    let mut hooks = TickHooks {
        persist: Some(Box::new(persist)),
        broadcast: Some(Box::new(LogBroadcastSink::new())),
    };
    info!(snapshot_path = SNAPSHOT_PATH, "Hooks wired");

    // 5. Run the simulation.
    let mut action_source = StubActionSource::new();
    let result = runner::run_simulation(
        &mut state,
        &mut action_source,
        &mut hooks,
        &config.simulation,
        config.world.tick_interval_ms,
    )
    .await
    .map_err(EngineError::from)?;

    // 6. Log results.
    runner::log_simulation_end(&result);

    info!(
        total_ticks = result.total_ticks,
        final_tier = state.tier,
        "cytos-engine shutdown complete"
    );

    Ok(())
}

/// Load the simulation configuration from `cytos-config.yaml`.
///
/// Looks for the config file relative to the current working directory
/// and falls back to defaults when it does not exist.
fn load_config() -> Result<SimulationConfig, EngineError> {
    let config_path = Path::new(CONFIG_PATH);
    if config_path.exists() {
        let config = SimulationConfig::from_file(config_path)?;
        Ok(config)
    } else {
        info!("Config file not found, using defaults");
        Ok(SimulationConfig::default())
    }
}
