//! Demo signal fixtures.
//!
//! Intersections around central Pune, the same demo area as the hospital
//! fixtures, so a seeded engine produces visible corridors.

use crate::geo::GeoPoint;
use crate::signal::types::SignalRecord;

/// The demo signal set.
pub fn demo_signals() -> Vec<SignalRecord> {
    [
        ("SIG-JM-ROAD", 18.5204, 73.8567),
        ("SIG-FC-ROAD", 18.5246, 73.8416),
        ("SIG-DECCAN", 18.5158, 73.8413),
        ("SIG-SHIVAJINAGAR", 18.5314, 73.8446),
        ("SIG-BUND-GARDEN", 18.5362, 73.8840),
        ("SIG-KOREGAON-PARK", 18.5362, 73.8939),
        ("SIG-CAMP", 18.5158, 73.8787),
        ("SIG-SWARGATE", 18.5018, 73.8586),
    ]
    .into_iter()
    .map(|(id, lat, lng)| SignalRecord::new(id, GeoPoint::new(lat, lng)))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::types::SignalState;

    #[test]
    fn test_demo_signals_start_normal() {
        let signals = demo_signals();
        assert_eq!(signals.len(), 8);
        for s in &signals {
            assert_eq!(s.state, SignalState::Normal);
            assert!(s.owner_mission_id.is_none());
        }
    }
}
