//! Persist and broadcast capability hooks.
//!
//! The tick engine performs no I/O of its own. At the end of every tick it
//! hands the final state to two optional, injected capabilities: a
//! [`PersistSink`] for durable storage and a [`BroadcastSink`] for delivery
//! to connected observers. Both are fire-and-forget from the engine's
//! perspective -- their failures are owned by the implementing collaborator,
//! not caught or retried here. The only ordering guarantee is persist
//! before broadcast; the two calls are not atomic with respect to each
//! other.

use cytos_types::SimulationState;

/// Durable-storage capability invoked once per tick with the final state.
///
/// Implementations typically serialize the whole [`SimulationState`] to a
/// database or append-only log. Asynchrony, batching, and error recovery
/// are the implementation's concern.
pub trait PersistSink: Send {
    /// Persist the final state of a completed tick.
    fn persist(&mut self, state: &SimulationState);
}

/// Observer-delivery capability invoked once per tick with the final state.
///
/// Implementations typically fan the state out to connected clients over
/// whatever transport the server layer uses.
pub trait BroadcastSink: Send {
    /// Broadcast the final state of a completed tick.
    fn broadcast(&mut self, state: &SimulationState);
}

/// The optional hook bundle handed to the tick engine.
///
/// Either or both hooks may be absent; an absent hook is simply skipped.
#[derive(Default)]
pub struct TickHooks {
    /// Durable-storage hook, if configured.
    pub persist: Option<Box<dyn PersistSink>>,
    /// Observer-delivery hook, if configured.
    pub broadcast: Option<Box<dyn BroadcastSink>>,
}

impl TickHooks {
    /// A hook bundle with neither capability configured.
    pub const fn none() -> Self {
        Self {
            persist: None,
            broadcast: None,
        }
    }

    /// Invoke the configured hooks with the final tick state,
    /// persist first, then broadcast.
    pub fn dispatch(&mut self, state: &SimulationState) {
        if let Some(persist) = self.persist.as_mut() {
            persist.persist(state);
        }
        if let Some(broadcast) = self.broadcast.as_mut() {
            broadcast.broadcast(state);
        }
    }
}

impl core::fmt::Debug for TickHooks {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TickHooks")
            .field("persist", &self.persist.is_some())
            .field("broadcast", &self.broadcast.is_some())
            .finish()
    }
}
