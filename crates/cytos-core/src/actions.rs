//! Action source trait and stub implementation.
//!
//! Between ticks, the session/request layer collects [`PlayerAction`]
//! submissions from connected players. The [`ActionSource`] trait abstracts
//! that layer so the simulation loop can be driven by a real server, a
//! scripted bot, or a test stub. The engine drains the source once per tick
//! and appends everything it returns to the world's pending queue.

use cytos_types::PlayerAction;

/// Errors that can occur while collecting player actions.
#[derive(Debug, thiserror::Error)]
pub enum ActionSourceError {
    /// An internal error in the action source.
    #[error("action source error: {message}")]
    Internal {
        /// Description of the error.
        message: String,
    },
}

/// A source of player actions for the tick loop.
///
/// Implementations return the actions that arrived since the previous
/// drain, in arrival order. The engine calls [`collect_actions`] once per
/// tick, immediately before running it.
///
/// [`collect_actions`]: ActionSource::collect_actions
pub trait ActionSource {
    /// Drain the actions that should be processed by the given tick.
    ///
    /// # Errors
    ///
    /// Returns [`ActionSourceError`] if the source fails entirely.
    /// Individual malformed submissions should be dropped by the
    /// implementation, not surfaced here.
    fn collect_actions(&mut self, tick: u64) -> Result<Vec<PlayerAction>, ActionSourceError>;
}

/// A stub action source that never produces actions.
///
/// Lets the tick loop be exercised end-to-end without a session layer:
/// every tick runs against an empty queue.
#[derive(Debug, Clone, Default)]
pub struct StubActionSource;

impl StubActionSource {
    /// Create a new stub action source.
    pub const fn new() -> Self {
        Self
    }
}

impl ActionSource for StubActionSource {
    fn collect_actions(&mut self, _tick: u64) -> Result<Vec<PlayerAction>, ActionSourceError> {
        Ok(Vec::new())
    }
}
