//! Corridor controller.
//!
//! Derives which signals lie along a mission's route and drives their
//! override claims. The route is the straight line from the ambulance's
//! current position to its destination; the engine does not compute road
//! routing.

use std::sync::Arc;

use tracing::{debug, info};

use crate::geo::{haversine_km, point_segment_distance_km, GeoPoint};
use crate::signal::{ClaimOutcome, SignalStore};

/// Claims and releases signal overrides for mission routes.
pub struct CorridorController {
    signals: Arc<SignalStore>,
    corridor_radius_m: f64,
    override_ttl_ms: u64,
}

/// Summary of one corridor activation or refresh.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CorridorUpdate {
    /// Signals newly claimed for the mission
    pub claimed: usize,
    /// Signals already owned whose expiry was extended
    pub refreshed: usize,
    /// Signals on the route held by another mission's live claim
    pub contested: usize,
}

impl CorridorController {
    /// Create a controller over a shared signal store.
    pub fn new(signals: Arc<SignalStore>, corridor_radius_m: f64, override_ttl_ms: u64) -> Self {
        Self {
            signals,
            corridor_radius_m,
            override_ttl_ms,
        }
    }

    /// Signal ids within the corridor radius of the route `from`→`to`,
    /// ordered by distance from the route start.
    pub fn signals_on_route(&self, from: GeoPoint, to: GeoPoint) -> Vec<String> {
        let radius_km = self.corridor_radius_m / 1000.0;
        let mut on_route: Vec<(String, f64)> = self
            .signals
            .locations()
            .into_iter()
            .filter(|(_, loc)| point_segment_distance_km(*loc, from, to) <= radius_km)
            .map(|(id, loc)| (id, haversine_km(from, loc)))
            .collect();
        on_route.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
        on_route.into_iter().map(|(id, _)| id).collect()
    }

    /// Claim green overrides along the route for `mission_id`.
    ///
    /// Also used as the per-update refresh: owned claims get their TTL
    /// extended, signals newly in range get claimed, and live claims held by
    /// other missions are left alone (first claimant wins). Signals the
    /// ambulance has passed fall out of the route and lapse by TTL.
    pub fn activate(
        &self,
        mission_id: &str,
        from: GeoPoint,
        to: GeoPoint,
        now_ms: u64,
    ) -> CorridorUpdate {
        let expires_at = now_ms + self.override_ttl_ms;
        let mut update = CorridorUpdate::default();

        for signal_id in self.signals_on_route(from, to) {
            match self.signals.claim(&signal_id, mission_id, expires_at, now_ms) {
                Some(ClaimOutcome::Claimed) => update.claimed += 1,
                Some(ClaimOutcome::Refreshed) => update.refreshed += 1,
                Some(ClaimOutcome::HeldByOther) => {
                    debug!(signal_id = %signal_id, mission_id, "signal held by another corridor");
                    update.contested += 1;
                }
                None => {}
            }
        }

        if update.claimed > 0 {
            info!(
                mission_id,
                claimed = update.claimed,
                refreshed = update.refreshed,
                contested = update.contested,
                "corridor activated"
            );
        }
        update
    }

    /// Release every override still owned by `mission_id`.
    pub fn release(&self, mission_id: &str) -> usize {
        self.signals.release_owned(mission_id)
    }
}
