//! Mission and corridor engine.
//!
//! Entry point for every external event: scene reports, ambulance location
//! pings, and hospital routing requests. All operations are in-memory and
//! never block on I/O; timestamps are supplied by the caller so behavior is
//! deterministic under test.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::corridor::CorridorController;
use crate::directory::{HospitalDirectory, NearestQuery};
use crate::error::{CorridorError, CorridorResult};
use crate::geo::{haversine_km, within_threshold, GeoPoint};
use crate::mission::{HospitalAssignment, Mission, MissionPhase, MissionStore};
use crate::signal::{SignalRecord, SignalStore};

/// What a location update did to the mission.
///
/// Stale drops are an expected outcome, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationOutcome {
    /// Update applied; no phase change
    Updated,
    /// Update applied and the mission reached the accident scene
    ArrivedAtScene,
    /// Update applied and the mission reached the assigned hospital
    ArrivedAtHospital,
    /// Update was older than the last recorded one and was dropped
    Stale,
}

/// The green-corridor engine: mission table, hospital directory, signal
/// store, and corridor controller behind one event-driven surface.
pub struct CorridorEngine {
    config: EngineConfig,
    missions: MissionStore,
    directory: Arc<HospitalDirectory>,
    signals: Arc<SignalStore>,
    corridor: CorridorController,
}

impl CorridorEngine {
    /// Build an engine from configuration, seeding demo fixtures if enabled.
    pub fn new(config: EngineConfig) -> Self {
        let directory = Arc::new(HospitalDirectory::new());
        let signals = Arc::new(SignalStore::new());

        if config.seed_demo_data {
            for hospital in crate::directory::seed::demo_hospitals() {
                directory.register(hospital);
            }
            for signal in crate::signal::seed::demo_signals() {
                signals.register(signal);
            }
            info!(
                hospitals = directory.len(),
                "demo fixtures seeded"
            );
        }

        let corridor = CorridorController::new(
            Arc::clone(&signals),
            config.corridor_radius_m,
            config.override_ttl_ms,
        );

        Self {
            config,
            missions: MissionStore::new(),
            directory,
            signals,
            corridor,
        }
    }

    /// The hospital directory, for registration and bed updates.
    pub fn directory(&self) -> &HospitalDirectory {
        &self.directory
    }

    /// Register a traffic signal.
    pub fn register_signal(&self, signal: SignalRecord) {
        self.signals.register(signal);
    }

    /// Initialize (or refine) the corridor for an accident.
    ///
    /// Creates the mission in `EN_ROUTE_TO_SCENE` with the scene location
    /// fixed. Re-invocation is a no-op on phase; the scene location may only
    /// move while the ambulance is still en route to it. Returns whether the
    /// mission was newly created.
    pub fn report_scene(
        &self,
        accident_id: &str,
        scene_location: GeoPoint,
        now_ms: u64,
    ) -> CorridorResult<bool> {
        if accident_id.is_empty() {
            return Err(CorridorError::Validation("accidentId is required".to_string()));
        }
        if !scene_location.is_finite() {
            return Err(CorridorError::Validation(
                "scene location must be finite coordinates".to_string(),
            ));
        }

        let (handle, created) = self.missions.get_or_create(accident_id, scene_location, now_ms);
        if created {
            info!(accident_id, lat = scene_location.lat, lng = scene_location.lng, "corridor initialized");
            return Ok(true);
        }

        let mut mission = handle.lock().expect("mission lock poisoned");
        if mission.phase == MissionPhase::EnRouteToScene {
            mission.scene_location = scene_location;
            debug!(accident_id, "scene location updated");
        } else {
            debug!(accident_id, phase = ?mission.phase, "scene re-report ignored, scene frozen");
        }
        Ok(false)
    }

    /// Process an ambulance location ping.
    ///
    /// Unknown accidents are a lookup miss; callers that prefer to drop them
    /// silently can discard the error. Updates older than the mission's last
    /// accepted timestamp are dropped (`Stale`), never an error. Arrival at
    /// the scene or hospital is detected here, and the corridor for a routing
    /// mission is refreshed or released accordingly.
    pub fn report_location(
        &self,
        accident_id: &str,
        entity_id: &str,
        location: GeoPoint,
        timestamp_ms: u64,
    ) -> CorridorResult<LocationOutcome> {
        if !location.is_finite() {
            return Err(CorridorError::Validation(
                "location must be finite coordinates".to_string(),
            ));
        }

        let handle = self
            .missions
            .get(accident_id)
            .ok_or_else(|| CorridorError::not_found("mission", accident_id))?;
        let mut mission = handle.lock().expect("mission lock poisoned");

        if !mission.accepts_timestamp(timestamp_ms) {
            debug!(
                accident_id,
                entity_id,
                timestamp_ms,
                last = ?mission.last_update_at,
                "stale location update dropped"
            );
            return Ok(LocationOutcome::Stale);
        }

        mission.record_location(entity_id, location, timestamp_ms);

        match mission.phase {
            MissionPhase::EnRouteToScene => {
                if within_threshold(
                    location,
                    mission.scene_location,
                    self.config.scene_arrival_threshold_m,
                ) {
                    mission.mark_at_scene(timestamp_ms)?;
                    info!(accident_id, entity_id, "ambulance arrived at scene");
                    return Ok(LocationOutcome::ArrivedAtScene);
                }
                Ok(LocationOutcome::Updated)
            }
            MissionPhase::RoutingToHospital => {
                // Invariant: a routing mission always carries an assignment
                let hospital = match mission.hospital.clone() {
                    Some(h) => h,
                    None => {
                        return Err(CorridorError::Validation(format!(
                            "mission {accident_id} is routing without a hospital assignment"
                        )))
                    }
                };
                if within_threshold(
                    location,
                    hospital.location,
                    self.config.hospital_arrival_threshold_m,
                ) {
                    mission.mark_arrived(timestamp_ms)?;
                    drop(mission);
                    self.corridor.release(accident_id);
                    info!(accident_id, hospital_id = %hospital.hospital_id, "ambulance arrived at hospital");
                    return Ok(LocationOutcome::ArrivedAtHospital);
                }
                drop(mission);
                self.corridor
                    .activate(accident_id, location, hospital.location, timestamp_ms);
                Ok(LocationOutcome::Updated)
            }
            MissionPhase::AtScene | MissionPhase::Arrived => Ok(LocationOutcome::Updated),
        }
    }

    /// Assign a destination hospital and activate the green corridor.
    ///
    /// Picks the nearest eligible hospital from the mission's current
    /// location, or validates the hinted one. Re-invocation while routing
    /// re-assigns: the previous corridor claims are released before the new
    /// route is activated.
    pub fn start_hospital_routing(
        &self,
        accident_id: &str,
        hospital_id_hint: Option<&str>,
        now_ms: u64,
    ) -> CorridorResult<Mission> {
        let handle = self
            .missions
            .get(accident_id)
            .ok_or_else(|| CorridorError::not_found("mission", accident_id))?;
        let mut mission = handle.lock().expect("mission lock poisoned");

        let current = mission.current_location.ok_or_else(|| {
            CorridorError::not_found("mission location", accident_id)
        })?;

        match mission.phase {
            MissionPhase::AtScene | MissionPhase::RoutingToHospital => {}
            MissionPhase::EnRouteToScene => {
                return Err(CorridorError::Validation(format!(
                    "ambulance for {accident_id} has not reached the scene"
                )))
            }
            MissionPhase::Arrived => {
                return Err(CorridorError::Validation(format!(
                    "mission {accident_id} already arrived at hospital"
                )))
            }
        }

        let assignment = self.resolve_hospital(current, hospital_id_hint)?;

        // Re-assignment drops the old corridor before claiming the new route.
        if mission.hospital.is_some() {
            warn!(accident_id, new_hospital = %assignment.hospital_id, "re-assigning destination hospital");
            self.corridor.release(accident_id);
        }

        mission.assign_hospital(assignment.clone())?;
        let snapshot = mission.clone();
        drop(mission);

        self.corridor
            .activate(accident_id, current, assignment.location, now_ms);
        info!(
            accident_id,
            hospital_id = %assignment.hospital_id,
            distance_km = assignment.distance_km,
            "hospital routing started"
        );
        Ok(snapshot)
    }

    fn resolve_hospital(
        &self,
        from: GeoPoint,
        hint: Option<&str>,
    ) -> CorridorResult<HospitalAssignment> {
        if let Some(hospital_id) = hint {
            let hospital = self
                .directory
                .get(hospital_id)
                .ok_or_else(|| CorridorError::not_found("hospital", hospital_id))?;
            if let Some(reason) = hospital.ineligibility(1) {
                return Err(CorridorError::HospitalNotAvailable {
                    id: hospital_id.to_string(),
                    reason: reason.to_string(),
                });
            }
            return Ok(HospitalAssignment {
                hospital_id: hospital.hospital_id,
                name: hospital.name,
                location: hospital.location,
                phone: hospital.phone,
                distance_km: haversine_km(from, hospital.location),
            });
        }

        let ranked = self.directory.nearest(from, &NearestQuery::default());
        let best = ranked.into_iter().next().ok_or(CorridorError::NoHospitalAvailable {
            lat: from.lat,
            lng: from.lng,
        })?;
        Ok(HospitalAssignment {
            hospital_id: best.hospital.hospital_id,
            name: best.hospital.name,
            location: best.hospital.location,
            phone: best.hospital.phone,
            distance_km: best.distance_km,
        })
    }

    /// Explicitly cancel a mission's corridor, releasing its claims.
    ///
    /// Mission state is untouched; missions are retained for query. Returns
    /// the number of signals released.
    pub fn release_corridor(&self, accident_id: &str) -> CorridorResult<usize> {
        if self.missions.get(accident_id).is_none() {
            return Err(CorridorError::not_found("mission", accident_id));
        }
        Ok(self.corridor.release(accident_id))
    }

    /// Revert expired overrides. Lazy reads make this advisory; cadence is
    /// [`EngineConfig::sweep_interval_ms`].
    pub fn sweep_signals(&self, now_ms: u64) -> usize {
        self.signals.sweep(now_ms)
    }

    /// Snapshot of one mission.
    pub fn mission(&self, accident_id: &str) -> Option<Mission> {
        let handle = self.missions.get(accident_id)?;
        let mission = handle.lock().expect("mission lock poisoned");
        Some(mission.clone())
    }

    /// Snapshots of all missions.
    pub fn all_missions(&self) -> Vec<Mission> {
        self.missions
            .all()
            .into_iter()
            .map(|h| h.lock().expect("mission lock poisoned").clone())
            .collect()
    }

    /// Snapshot of one signal, with lazy expiry applied.
    pub fn signal(&self, signal_id: &str, now_ms: u64) -> Option<SignalRecord> {
        self.signals.get(signal_id, now_ms)
    }

    /// Snapshots of all signals, with lazy expiry applied.
    pub fn all_signals(&self, now_ms: u64) -> Vec<SignalRecord> {
        self.signals.all(now_ms)
    }

    /// Mission ids currently holding live overrides.
    pub fn active_corridors(&self, now_ms: u64) -> Vec<String> {
        self.signals.active_missions(now_ms)
    }
}
