//! Hospital directory registry.
//!
//! A multi-reader/single-writer in-memory catalog. Bed counts are advisory,
//! not reservations: readers may observe values a few hundred milliseconds
//! stale, which is acceptable for routing decisions.

use std::collections::HashMap;
use std::sync::RwLock;

use tracing::{debug, info};

use crate::directory::hospital::{HospitalRecord, NearestQuery, RankedHospital};
use crate::error::{CorridorError, CorridorResult};
use crate::geo::{haversine_km, GeoPoint};

/// In-memory hospital catalog supporting constrained nearest-match queries.
pub struct HospitalDirectory {
    hospitals: RwLock<HashMap<String, HospitalRecord>>,
}

impl HospitalDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self {
            hospitals: RwLock::new(HashMap::new()),
        }
    }

    /// Register or replace a hospital record.
    pub fn register(&self, hospital: HospitalRecord) {
        let mut map = self.hospitals.write().expect("hospital directory poisoned");
        info!(hospital_id = %hospital.hospital_id, name = %hospital.name, "hospital registered");
        map.insert(hospital.hospital_id.clone(), hospital);
    }

    /// Look up a hospital by id.
    pub fn get(&self, hospital_id: &str) -> Option<HospitalRecord> {
        let map = self.hospitals.read().expect("hospital directory poisoned");
        map.get(hospital_id).cloned()
    }

    /// Snapshot of all hospital records.
    pub fn all(&self) -> Vec<HospitalRecord> {
        let map = self.hospitals.read().expect("hospital directory poisoned");
        map.values().cloned().collect()
    }

    /// Number of registered hospitals.
    pub fn len(&self) -> usize {
        let map = self.hospitals.read().expect("hospital directory poisoned");
        map.len()
    }

    /// Whether the directory is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Find hospitals nearest to `location`, filtered and ranked.
    ///
    /// Eligibility: `active`, `emergency_capable`, `beds_available >= min_beds`,
    /// and the requested specialty if given. Results are sorted ascending by
    /// haversine distance, ties broken by higher bed count then by hospital id,
    /// and truncated to the query limit. Non-finite query coordinates yield an
    /// empty list.
    pub fn nearest(&self, location: GeoPoint, query: &NearestQuery) -> Vec<RankedHospital> {
        if !location.is_finite() {
            return Vec::new();
        }

        let map = self.hospitals.read().expect("hospital directory poisoned");
        let mut matches: Vec<RankedHospital> = map
            .values()
            .filter(|h| h.ineligibility(query.min_beds).is_none())
            .filter(|h| match &query.specialty {
                Some(s) => h.specialties.contains(s),
                None => true,
            })
            .map(|h| RankedHospital {
                hospital: h.clone(),
                distance_km: haversine_km(location, h.location),
            })
            .collect();

        matches.sort_by(|a, b| {
            a.distance_km
                .total_cmp(&b.distance_km)
                .then_with(|| b.hospital.beds_available.cmp(&a.hospital.beds_available))
                .then_with(|| a.hospital.hospital_id.cmp(&b.hospital.hospital_id))
        });
        matches.truncate(query.limit);
        matches
    }

    /// Update the available bed count for a hospital.
    ///
    /// Rejects negative counts with `Validation` and unknown ids with
    /// `NotFound`; in both cases no state is mutated.
    pub fn update_beds(&self, hospital_id: &str, beds_available: i64) -> CorridorResult<u32> {
        if beds_available < 0 {
            return Err(CorridorError::Validation(format!(
                "bedsAvailable must be non-negative, got {beds_available}"
            )));
        }

        let mut map = self.hospitals.write().expect("hospital directory poisoned");
        let hospital = map
            .get_mut(hospital_id)
            .ok_or_else(|| CorridorError::not_found("hospital", hospital_id))?;

        hospital.beds_available = beds_available as u32;
        debug!(hospital_id, beds_available, "bed count updated");
        Ok(hospital.beds_available)
    }

    /// Set whether a hospital is accepting patients. Idempotent.
    pub fn set_active(&self, hospital_id: &str, active: bool) -> CorridorResult<()> {
        let mut map = self.hospitals.write().expect("hospital directory poisoned");
        let hospital = map
            .get_mut(hospital_id)
            .ok_or_else(|| CorridorError::not_found("hospital", hospital_id))?;

        if hospital.active != active {
            info!(hospital_id, active, "hospital activation changed");
        }
        hospital.active = active;
        Ok(())
    }
}

impl Default for HospitalDirectory {
    fn default() -> Self {
        Self::new()
    }
}
