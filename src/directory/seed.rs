//! Demo hospital fixtures.
//!
//! Hospitals around Pune, India — the same demo area as the signal fixtures.
//! Loaded only when [`crate::config::EngineConfig::seed_demo_data`] is set.

use crate::directory::hospital::HospitalRecord;
use crate::geo::GeoPoint;
use std::collections::BTreeSet;

fn tags(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|s| s.to_string()).collect()
}

/// The demo hospital set.
pub fn demo_hospitals() -> Vec<HospitalRecord> {
    vec![
        HospitalRecord {
            hospital_id: "HOSP-RUBY".to_string(),
            name: "Ruby Hall Clinic".to_string(),
            location: GeoPoint::new(18.5308, 73.8774),
            phone: "+912026163391".to_string(),
            specialties: tags(&["TRAUMA", "CARDIAC", "GENERAL"]),
            beds_available: 12,
            emergency_capable: true,
            active: true,
        },
        HospitalRecord {
            hospital_id: "HOSP-KEM".to_string(),
            name: "KEM Hospital Pune".to_string(),
            location: GeoPoint::new(18.5018, 73.8636),
            phone: "+912026126000".to_string(),
            specialties: tags(&["TRAUMA", "BURN", "GENERAL"]),
            beds_available: 8,
            emergency_capable: true,
            active: true,
        },
        HospitalRecord {
            hospital_id: "HOSP-SAHYADRI".to_string(),
            name: "Sahyadri Hospital Deccan".to_string(),
            location: GeoPoint::new(18.5128, 73.8412),
            phone: "+912067215000".to_string(),
            specialties: tags(&["TRAUMA", "CARDIAC", "NEURO", "GENERAL"]),
            beds_available: 15,
            emergency_capable: true,
            active: true,
        },
        HospitalRecord {
            hospital_id: "HOSP-JEHANGIR".to_string(),
            name: "Jehangir Hospital".to_string(),
            location: GeoPoint::new(18.5310, 73.8760),
            phone: "+912026053600".to_string(),
            specialties: tags(&["TRAUMA", "CARDIAC", "GENERAL"]),
            beds_available: 10,
            emergency_capable: true,
            active: true,
        },
        HospitalRecord {
            hospital_id: "HOSP-SASSOON".to_string(),
            name: "Sassoon General Hospital".to_string(),
            location: GeoPoint::new(18.5165, 73.8721),
            phone: "+912026128000".to_string(),
            specialties: tags(&["TRAUMA", "BURN", "GENERAL"]),
            beds_available: 20,
            emergency_capable: true,
            active: true,
        },
        HospitalRecord {
            hospital_id: "HOSP-ADITYA-BIRLA".to_string(),
            name: "Aditya Birla Memorial Hospital".to_string(),
            location: GeoPoint::new(18.6298, 73.7997),
            phone: "+912030717171".to_string(),
            specialties: tags(&["TRAUMA", "CARDIAC", "NEURO", "GENERAL"]),
            beds_available: 18,
            emergency_capable: true,
            active: true,
        },
    ]
}
