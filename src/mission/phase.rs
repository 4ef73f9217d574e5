//! Mission phase lifecycle.

use serde::{Deserialize, Serialize};

/// Phase of an ambulance mission.
///
/// Phases advance strictly forward, one step at a time:
/// `EnRouteToScene → AtScene → RoutingToHospital → Arrived`.
/// There are no reverse transitions and `Arrived` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MissionPhase {
    /// Ambulance dispatched, heading to the accident scene
    EnRouteToScene,
    /// Ambulance at the accident scene
    AtScene,
    /// Ambulance carrying the patient to the assigned hospital
    RoutingToHospital,
    /// Ambulance arrived at the hospital (terminal)
    Arrived,
}

impl MissionPhase {
    /// Whether this phase is terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, MissionPhase::Arrived)
    }

    /// Check that `next` is the immediate successor of this phase.
    pub fn can_transition_to(&self, next: MissionPhase) -> bool {
        matches!(
            (self, next),
            (MissionPhase::EnRouteToScene, MissionPhase::AtScene)
                | (MissionPhase::AtScene, MissionPhase::RoutingToHospital)
                | (MissionPhase::RoutingToHospital, MissionPhase::Arrived)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_transitions_only() {
        assert!(MissionPhase::EnRouteToScene.can_transition_to(MissionPhase::AtScene));
        assert!(MissionPhase::AtScene.can_transition_to(MissionPhase::RoutingToHospital));
        assert!(MissionPhase::RoutingToHospital.can_transition_to(MissionPhase::Arrived));
    }

    #[test]
    fn test_no_skipping_or_reversal() {
        assert!(!MissionPhase::EnRouteToScene.can_transition_to(MissionPhase::RoutingToHospital));
        assert!(!MissionPhase::EnRouteToScene.can_transition_to(MissionPhase::Arrived));
        assert!(!MissionPhase::AtScene.can_transition_to(MissionPhase::EnRouteToScene));
        assert!(!MissionPhase::Arrived.can_transition_to(MissionPhase::RoutingToHospital));
    }

    #[test]
    fn test_terminal_phase() {
        assert!(MissionPhase::Arrived.is_terminal());
        assert!(!MissionPhase::RoutingToHospital.is_terminal());
    }

    #[test]
    fn test_phase_ordering() {
        assert!(MissionPhase::EnRouteToScene < MissionPhase::AtScene);
        assert!(MissionPhase::AtScene < MissionPhase::RoutingToHospital);
        assert!(MissionPhase::RoutingToHospital < MissionPhase::Arrived);
    }

    #[test]
    fn test_wire_format() {
        let json = serde_json::to_string(&MissionPhase::EnRouteToScene).unwrap();
        assert_eq!(json, "\"EN_ROUTE_TO_SCENE\"");
        let json = serde_json::to_string(&MissionPhase::RoutingToHospital).unwrap();
        assert_eq!(json, "\"ROUTING_TO_HOSPITAL\"");
    }
}
