//! Mission record and its phase transitions.

use serde::{Deserialize, Serialize};

use crate::error::{CorridorError, CorridorResult};
use crate::geo::GeoPoint;
use crate::mission::phase::MissionPhase;

/// Destination hospital snapshot, frozen at assignment time.
///
/// Deliberately not live-updated: the crew navigates to the hospital as it
/// was assigned, even if the directory record changes afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HospitalAssignment {
    /// Assigned hospital identifier
    pub hospital_id: String,
    /// Hospital name
    pub name: String,
    /// Hospital location
    pub location: GeoPoint,
    /// Contact phone number
    pub phone: String,
    /// Distance from the ambulance at assignment time, in kilometers
    pub distance_km: f64,
}

/// The tracked lifecycle of one ambulance responding to one accident.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mission {
    /// Accident identifier (unique key)
    pub accident_id: String,
    /// Assigned ambulance, set by the first location update
    pub entity_id: Option<String>,
    /// Current phase
    pub phase: MissionPhase,
    /// Accident scene location
    pub scene_location: GeoPoint,
    /// Last reported ambulance location
    pub current_location: Option<GeoPoint>,
    /// Timestamp of the last accepted location update (epoch milliseconds)
    pub last_update_at: Option<u64>,
    /// Destination hospital, once routing has started
    pub hospital: Option<HospitalAssignment>,
    /// When the ambulance reached the scene (set at most once)
    pub arrived_at_scene_at: Option<u64>,
    /// When the ambulance reached the hospital (set at most once)
    pub arrived_at_hospital_at: Option<u64>,
    /// When the mission was created (epoch milliseconds)
    pub created_at: u64,
}

impl Mission {
    /// Create a mission for a freshly reported accident scene.
    pub fn new(accident_id: impl Into<String>, scene_location: GeoPoint, now_ms: u64) -> Self {
        Self {
            accident_id: accident_id.into(),
            entity_id: None,
            phase: MissionPhase::EnRouteToScene,
            scene_location,
            current_location: None,
            last_update_at: None,
            hospital: None,
            arrived_at_scene_at: None,
            arrived_at_hospital_at: None,
            created_at: now_ms,
        }
    }

    /// Whether an update stamped `timestamp_ms` is at least as new as the
    /// last accepted one. Stale updates are dropped by the engine.
    pub fn accepts_timestamp(&self, timestamp_ms: u64) -> bool {
        match self.last_update_at {
            Some(last) => timestamp_ms >= last,
            None => true,
        }
    }

    /// Record an accepted location update.
    pub fn record_location(&mut self, entity_id: &str, location: GeoPoint, timestamp_ms: u64) {
        self.entity_id = Some(entity_id.to_string());
        self.current_location = Some(location);
        self.last_update_at = Some(timestamp_ms);
    }

    /// Transition `EnRouteToScene → AtScene`, stamping the arrival time.
    pub fn mark_at_scene(&mut self, timestamp_ms: u64) -> CorridorResult<()> {
        self.transition(MissionPhase::AtScene)?;
        if self.arrived_at_scene_at.is_none() {
            self.arrived_at_scene_at = Some(timestamp_ms);
        }
        Ok(())
    }

    /// Assign (or re-assign) the destination hospital.
    ///
    /// Advances `AtScene → RoutingToHospital` on first assignment; while
    /// already routing, overwrites the previous snapshot. Not permitted once
    /// arrived.
    pub fn assign_hospital(&mut self, assignment: HospitalAssignment) -> CorridorResult<()> {
        match self.phase {
            MissionPhase::AtScene => self.transition(MissionPhase::RoutingToHospital)?,
            MissionPhase::RoutingToHospital => {}
            other => {
                return Err(CorridorError::Validation(format!(
                    "cannot assign hospital in phase {other:?}"
                )))
            }
        }
        self.hospital = Some(assignment);
        Ok(())
    }

    /// Transition `RoutingToHospital → Arrived`, stamping the arrival time.
    pub fn mark_arrived(&mut self, timestamp_ms: u64) -> CorridorResult<()> {
        self.transition(MissionPhase::Arrived)?;
        if self.arrived_at_hospital_at.is_none() {
            self.arrived_at_hospital_at = Some(timestamp_ms);
        }
        Ok(())
    }

    fn transition(&mut self, next: MissionPhase) -> CorridorResult<()> {
        if !self.phase.can_transition_to(next) {
            return Err(CorridorError::Validation(format!(
                "invalid phase transition {:?} -> {:?} for {}",
                self.phase, next, self.accident_id
            )));
        }
        self.phase = next;
        Ok(())
    }
}
