//! Hospital record and query types.

use crate::geo::GeoPoint;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A hospital known to the directory.
///
/// Records are mutated only through [`super::HospitalDirectory`] operations
/// and are deactivated rather than deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HospitalRecord {
    /// Unique hospital identifier
    pub hospital_id: String,
    /// Display name
    pub name: String,
    /// Hospital location
    pub location: GeoPoint,
    /// Contact phone number
    pub phone: String,
    /// Specialty tags, e.g. "TRAUMA", "BURN", "CARDIAC", "GENERAL"
    pub specialties: BTreeSet<String>,
    /// Currently available beds
    pub beds_available: u32,
    /// Whether the hospital has an emergency department
    pub emergency_capable: bool,
    /// Whether the hospital is accepting patients
    pub active: bool,
}

impl HospitalRecord {
    /// Check eligibility for emergency routing with a minimum bed count.
    ///
    /// Returns the first failing condition as a reason, or `None` if eligible.
    pub fn ineligibility(&self, min_beds: u32) -> Option<&'static str> {
        if !self.active {
            Some("hospital is not accepting patients")
        } else if !self.emergency_capable {
            Some("hospital is not emergency-capable")
        } else if self.beds_available < min_beds {
            Some("no beds available")
        } else {
            None
        }
    }
}

/// A hospital annotated with its distance from a query point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedHospital {
    /// The matched hospital
    #[serde(flatten)]
    pub hospital: HospitalRecord,
    /// Great-circle distance from the query point in kilometers
    pub distance_km: f64,
}

/// Filters for a nearest-hospital query.
#[derive(Debug, Clone)]
pub struct NearestQuery {
    /// Required specialty tag, if any
    pub specialty: Option<String>,
    /// Minimum available beds (default 1)
    pub min_beds: u32,
    /// Maximum number of results (default 1)
    pub limit: usize,
}

impl Default for NearestQuery {
    fn default() -> Self {
        Self {
            specialty: None,
            min_beds: 1,
            limit: 1,
        }
    }
}

impl NearestQuery {
    /// Query with a result limit and otherwise default filters.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit,
            ..Default::default()
        }
    }

    /// Query filtered to a specialty tag.
    pub fn with_specialty(specialty: impl Into<String>) -> Self {
        Self {
            specialty: Some(specialty.into()),
            ..Default::default()
        }
    }
}
