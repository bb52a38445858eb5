//! Reference persist and broadcast sinks for the engine binary.
//!
//! These are the "external collaborators" the tick engine only knows as
//! opaque hooks: a JSON-lines file writer standing in for a durable store,
//! and a structured-log broadcaster standing in for delivery to connected
//! clients. Failures are handled (logged and dropped) here -- the core
//! never sees them.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write as _};
use std::path::Path;

use cytos_core::hooks::{BroadcastSink, PersistSink};
use cytos_types::SimulationState;
use tracing::{info, warn};

/// Persist sink appending one JSON document per tick to a file.
#[derive(Debug)]
pub struct JsonlPersistSink {
    writer: BufWriter<File>,
}

impl JsonlPersistSink {
    /// Open (or create) the snapshot file in append mode.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the file cannot be opened.
    pub fn open(path: &Path) -> Result<Self, std::io::Error> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }
}

impl PersistSink for JsonlPersistSink {
    fn persist(&mut self, state: &SimulationState) {
        let line = match serde_json::to_string(state) {
            Ok(line) => line,
            Err(error) => {
                warn!(%error, tick = state.tick, "Failed to serialize state, snapshot dropped");
                return;
            }
        };
        if let Err(error) = writeln!(self.writer, "{line}").and_then(|()| self.writer.flush()) {
            warn!(%error, tick = state.tick, "Failed to write snapshot, snapshot dropped");
        }
    }
}

/// Broadcast sink emitting one structured log record per tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogBroadcastSink;

impl LogBroadcastSink {
    /// Create a new log broadcast sink.
    pub const fn new() -> Self {
        Self
    }
}

impl BroadcastSink for LogBroadcastSink {
    fn broadcast(&mut self, state: &SimulationState) {
        info!(
            tick = state.tick,
            tier = state.tier,
            warmth = state.metrics.warmth,
            coherence = state.metrics.coherence,
            stability = state.metrics.stability,
            energy = state.resources.energy,
            nutrients = state.resources.nutrients,
            strain = state.strain,
            blah = state.blah,
            events = state.active_events.len(),
            "World state"
        );
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn persist_appends_one_line_per_tick() {
        let dir = std::env::temp_dir().join(format!("cytos-sink-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("ticks.jsonl");
        let _ = std::fs::remove_file(&path);

        let mut sink = JsonlPersistSink::open(&path).unwrap();
        let mut state = SimulationState::default();
        sink.persist(&state);
        state.tick = 1;
        sink.persist(&state);
        drop(sink);

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(lines.len(), 2);

        let restored: SimulationState =
            serde_json::from_str(lines.last().unwrap()).unwrap();
        assert_eq!(restored.tick, 1);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn log_broadcast_does_not_panic() {
        let mut sink = LogBroadcastSink::new();
        sink.broadcast(&SimulationState::default());
    }
}
