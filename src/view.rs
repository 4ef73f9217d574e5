//! Sanitized response views.
//!
//! Serializable shapes handed to the transport layer, including the derived
//! map and navigation links embedded in hospital and mission payloads.

use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::directory::{HospitalRecord, RankedHospital};
use crate::geo::GeoPoint;
use crate::mission::{Mission, MissionPhase};

/// Google Maps link for a point.
pub fn map_link(location: GeoPoint) -> String {
    format!("https://www.google.com/maps?q={},{}", location.lat, location.lng)
}

/// Google Maps turn-by-turn navigation link to a destination.
pub fn navigation_link(destination: GeoPoint) -> String {
    format!(
        "https://www.google.com/maps/dir/?api=1&destination={},{}",
        destination.lat, destination.lng
    )
}

/// Response envelope metadata.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMeta {
    /// Per-request identifier
    pub request_id: String,
    /// Response timestamp, RFC 3339
    pub timestamp: String,
    /// Payload schema version
    pub version: String,
}

impl ResponseMeta {
    /// Fresh metadata for an outgoing response.
    pub fn new() -> Self {
        Self {
            request_id: format!("REQ-{}", Uuid::new_v4()),
            timestamp: Utc::now().to_rfc3339(),
            version: "1.0".to_string(),
        }
    }
}

impl Default for ResponseMeta {
    fn default() -> Self {
        Self::new()
    }
}

/// Hospital payload with its map link.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HospitalView {
    /// Hospital identifier
    pub hospital_id: String,
    /// Hospital name
    pub name: String,
    /// Hospital location
    pub location: GeoPoint,
    /// Contact phone number
    pub phone: String,
    /// Distance from the query point, if this came from a nearest query
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
    /// Map link for the hospital location
    pub map_link: String,
}

impl From<&HospitalRecord> for HospitalView {
    fn from(h: &HospitalRecord) -> Self {
        Self {
            hospital_id: h.hospital_id.clone(),
            name: h.name.clone(),
            location: h.location,
            phone: h.phone.clone(),
            distance_km: None,
            map_link: map_link(h.location),
        }
    }
}

impl From<&RankedHospital> for HospitalView {
    fn from(r: &RankedHospital) -> Self {
        let mut view = HospitalView::from(&r.hospital);
        view.distance_km = Some(r.distance_km);
        view
    }
}

/// Assigned hospital inside a mission payload, with navigation link.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignedHospitalView {
    /// Hospital identifier
    pub hospital_id: String,
    /// Hospital name
    pub name: String,
    /// Hospital location
    pub location: GeoPoint,
    /// Contact phone number
    pub phone: String,
    /// Distance at assignment time, kilometers
    pub distance_km: f64,
    /// Map link for the hospital location
    pub map_link: String,
    /// Turn-by-turn navigation link
    pub navigation_link: String,
}

/// Sanitized mission payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MissionView {
    /// Accident identifier
    pub accident_id: String,
    /// Assigned ambulance, if one has reported
    pub entity_id: Option<String>,
    /// Current phase (SCREAMING_SNAKE_CASE on the wire)
    pub phase: MissionPhase,
    /// Accident scene location
    pub scene_location: GeoPoint,
    /// Assigned hospital, once routing has started
    pub hospital: Option<AssignedHospitalView>,
    /// Scene arrival timestamp (epoch milliseconds)
    pub arrived_at_scene_at: Option<u64>,
    /// Hospital arrival timestamp (epoch milliseconds)
    pub arrived_at_hospital_at: Option<u64>,
}

impl From<&Mission> for MissionView {
    fn from(m: &Mission) -> Self {
        Self {
            accident_id: m.accident_id.clone(),
            entity_id: m.entity_id.clone(),
            phase: m.phase,
            scene_location: m.scene_location,
            hospital: m.hospital.as_ref().map(|h| AssignedHospitalView {
                hospital_id: h.hospital_id.clone(),
                name: h.name.clone(),
                location: h.location,
                phone: h.phone.clone(),
                distance_km: h.distance_km,
                map_link: map_link(h.location),
                navigation_link: navigation_link(h.location),
            }),
            arrived_at_scene_at: m.arrived_at_scene_at,
            arrived_at_hospital_at: m.arrived_at_hospital_at,
        }
    }
}
