//! Error types for the world engine binary.
//!
//! [`EngineError`] is the top-level error type that wraps all possible
//! failure modes during engine startup and simulation execution.

/// Top-level error for the world engine binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: cytos_core::config::ConfigError,
    },

    /// World creation failed.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: cytos_core::world::WorldError,
    },

    /// Simulation runner failed.
    #[error("runner error: {source}")]
    Runner {
        /// The underlying runner error.
        #[from]
        source: cytos_core::runner::RunnerError,
    },

    /// Opening the persistence target failed.
    #[error("persist sink error: {source}")]
    Persist {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}
