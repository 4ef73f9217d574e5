//! Signal record and claim types.

use crate::geo::GeoPoint;
use serde::{Deserialize, Serialize};

/// Indication state of a traffic signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalState {
    /// Normal signal cycling
    Normal,
    /// Forced green for an approaching emergency vehicle
    GreenOverride,
}

/// A traffic signal with its current override claim.
///
/// Invariant: `state` is `GreenOverride` iff `owner_mission_id` is set and the
/// claim has not expired. The claim is a tagged (owner, expiry) pair so that
/// conflict resolution between intersecting corridors is explicit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalRecord {
    /// Unique signal identifier
    pub signal_id: String,
    /// Signal location
    pub location: GeoPoint,
    /// Current indication state
    pub state: SignalState,
    /// When the current override lapses (epoch milliseconds)
    pub override_expires_at: Option<u64>,
    /// Mission currently holding the override
    pub owner_mission_id: Option<String>,
}

impl SignalRecord {
    /// Create a signal in the normal state.
    pub fn new(signal_id: impl Into<String>, location: GeoPoint) -> Self {
        Self {
            signal_id: signal_id.into(),
            location,
            state: SignalState::Normal,
            override_expires_at: None,
            owner_mission_id: None,
        }
    }

    /// Whether the override claim has lapsed at `now`.
    pub fn is_expired(&self, now_ms: u64) -> bool {
        matches!(self.override_expires_at, Some(expires) if expires <= now_ms)
    }

    /// Whether this signal holds a live override at `now`.
    pub fn has_live_override(&self, now_ms: u64) -> bool {
        self.state == SignalState::GreenOverride
            && self.owner_mission_id.is_some()
            && !self.is_expired(now_ms)
    }

    /// Revert to the normal state, clearing the claim.
    pub(crate) fn clear_claim(&mut self) {
        self.state = SignalState::Normal;
        self.override_expires_at = None;
        self.owner_mission_id = None;
    }
}

/// Result of attempting to claim a signal for a mission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimOutcome {
    /// The signal was free (or its prior claim had expired) and is now owned.
    Claimed,
    /// The mission already owned the signal; the expiry was extended.
    Refreshed,
    /// Another mission holds a live claim. First claimant wins.
    HeldByOther,
}
