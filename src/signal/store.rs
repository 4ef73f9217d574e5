//! Signal state store.
//!
//! Expired overrides revert lazily on read; a periodic [`SignalStore::sweep`]
//! is an optimization, not a correctness requirement.

use std::collections::HashMap;
use std::sync::RwLock;

use tracing::{debug, info};

use crate::geo::GeoPoint;
use crate::signal::types::{ClaimOutcome, SignalRecord, SignalState};

/// Shared store of per-signal override state.
pub struct SignalStore {
    signals: RwLock<HashMap<String, SignalRecord>>,
}

impl SignalStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            signals: RwLock::new(HashMap::new()),
        }
    }

    /// Register or replace a signal.
    pub fn register(&self, signal: SignalRecord) {
        let mut map = self.signals.write().expect("signal store poisoned");
        map.insert(signal.signal_id.clone(), signal);
    }

    /// Snapshot a signal, reverting its claim first if it has expired.
    pub fn get(&self, signal_id: &str, now_ms: u64) -> Option<SignalRecord> {
        let mut map = self.signals.write().expect("signal store poisoned");
        let signal = map.get_mut(signal_id)?;
        if signal.is_expired(now_ms) {
            debug!(signal_id, "override expired, reverting to normal");
            signal.clear_claim();
        }
        Some(signal.clone())
    }

    /// Snapshot all signals, reverting expired claims.
    pub fn all(&self, now_ms: u64) -> Vec<SignalRecord> {
        let mut map = self.signals.write().expect("signal store poisoned");
        map.values_mut()
            .map(|signal| {
                if signal.is_expired(now_ms) {
                    signal.clear_claim();
                }
                signal.clone()
            })
            .collect()
    }

    /// Signal locations, for corridor geometry.
    pub fn locations(&self) -> Vec<(String, GeoPoint)> {
        let map = self.signals.read().expect("signal store poisoned");
        map.values()
            .map(|s| (s.signal_id.clone(), s.location))
            .collect()
    }

    /// Claim a signal for a mission until `expires_at_ms`.
    ///
    /// First claimant wins: a live claim by another mission is never
    /// overwritten. An expired claim counts as free. Re-claiming an owned
    /// signal extends the expiry.
    pub fn claim(
        &self,
        signal_id: &str,
        mission_id: &str,
        expires_at_ms: u64,
        now_ms: u64,
    ) -> Option<ClaimOutcome> {
        let mut map = self.signals.write().expect("signal store poisoned");
        let signal = map.get_mut(signal_id)?;

        if signal.is_expired(now_ms) {
            signal.clear_claim();
        }

        let outcome = match signal.owner_mission_id.as_deref() {
            Some(owner) if owner == mission_id => {
                signal.override_expires_at = Some(expires_at_ms);
                ClaimOutcome::Refreshed
            }
            Some(_) => ClaimOutcome::HeldByOther,
            None => {
                signal.state = SignalState::GreenOverride;
                signal.owner_mission_id = Some(mission_id.to_string());
                signal.override_expires_at = Some(expires_at_ms);
                info!(signal_id, mission_id, "green override claimed");
                ClaimOutcome::Claimed
            }
        };
        Some(outcome)
    }

    /// Release every signal owned by `mission_id` back to normal.
    ///
    /// Signals re-claimed by a different mission are left untouched. Returns
    /// the number of signals released.
    pub fn release_owned(&self, mission_id: &str) -> usize {
        let mut map = self.signals.write().expect("signal store poisoned");
        let mut released = 0;
        for signal in map.values_mut() {
            if signal.owner_mission_id.as_deref() == Some(mission_id) {
                signal.clear_claim();
                released += 1;
            }
        }
        if released > 0 {
            info!(mission_id, released, "corridor released");
        }
        released
    }

    /// Revert every expired claim. Returns the number reverted.
    pub fn sweep(&self, now_ms: u64) -> usize {
        let mut map = self.signals.write().expect("signal store poisoned");
        let mut reverted = 0;
        for signal in map.values_mut() {
            if signal.is_expired(now_ms) {
                signal.clear_claim();
                reverted += 1;
            }
        }
        if reverted > 0 {
            debug!(reverted, "expired overrides swept");
        }
        reverted
    }

    /// Mission ids currently holding at least one live override.
    pub fn active_missions(&self, now_ms: u64) -> Vec<String> {
        let map = self.signals.read().expect("signal store poisoned");
        let mut ids: Vec<String> = map
            .values()
            .filter(|s| s.has_live_override(now_ms))
            .filter_map(|s| s.owner_mission_id.clone())
            .collect();
        ids.sort();
        ids.dedup();
        ids
    }
}

impl Default for SignalStore {
    fn default() -> Self {
        Self::new()
    }
}
