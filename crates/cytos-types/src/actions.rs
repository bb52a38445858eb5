//! Player action types for session-to-engine communication.
//!
//! The session/request layer collects actions from connected players and
//! appends them to the world's pending queue between ticks. The engine
//! drains the queue at the start of every tick; actions never survive the
//! tick they were processed in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{OrganelleId, PlayerId};

/// A single utilization adjustment requested by a player.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    /// The organelle to adjust. Unknown IDs are silently ignored.
    pub organelle_id: OrganelleId,
    /// Utilization delta. The resulting utilization is clamped to `[0, 1]`.
    pub delta: f64,
}

/// One player's submission for a tick.
///
/// Both payload fields are optional: an action may carry only allocations,
/// only a harmony contribution, or neither (a pure "present" signal, which
/// still counts toward the coherence average).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerAction {
    /// The submitting player.
    pub player_id: PlayerId,
    /// Requested utilization adjustments, applied in list order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allocations: Vec<Allocation>,
    /// This player's harmony contribution to coherence. Absent means 0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub harmony: Option<f64>,
    /// When the session layer accepted this action.
    pub submitted_at: DateTime<Utc>,
}

impl PlayerAction {
    /// Create an empty action for the given player, timestamped now.
    pub fn empty(player_id: PlayerId) -> Self {
        Self {
            player_id,
            allocations: Vec::new(),
            harmony: None,
            submitted_at: Utc::now(),
        }
    }

    /// The harmony contribution of this action, defaulting to 0 if absent.
    pub fn harmony_or_default(&self) -> f64 {
        self.harmony.unwrap_or(0.0)
    }
}
