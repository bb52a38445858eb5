//! Enumeration types for the Cytos simulation.

use serde::{Deserialize, Serialize};

/// The kind of a world event spawned during a tick.
///
/// Events are transient: they are constructed fresh each tick from trigger
/// conditions, their impacts are applied, and they are discarded when the
/// next tick replaces `active_events`. None of the kinds are mutually
/// exclusive -- several may fire in the same tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Spawned when strain exceeds its threshold. Drains stability and energy.
    Anomaly,
    /// Spawned when coherence is high. Grants bonus coherence and energy.
    Festival,
    /// Spawned when nutrients run low. Restores nutrients and stability.
    Repair,
}

impl EventKind {
    /// Return the lowercase wire name of this kind, as used in event IDs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Anomaly => "anomaly",
            Self::Festival => "festival",
            Self::Repair => "repair",
        }
    }
}

impl core::fmt::Display for EventKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn kind_names_are_lowercase() {
        assert_eq!(EventKind::Anomaly.as_str(), "anomaly");
        assert_eq!(EventKind::Festival.as_str(), "festival");
        assert_eq!(EventKind::Repair.as_str(), "repair");
    }

    #[test]
    fn kind_serializes_snake_case() {
        let json = serde_json::to_string(&EventKind::Festival).unwrap();
        assert_eq!(json, "\"festival\"");
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(EventKind::Repair.to_string(), "repair");
    }
}
