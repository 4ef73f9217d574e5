//! End-to-end scenarios for the mission and corridor engine.

use std::sync::Arc;
use std::thread;

use rand::seq::SliceRandom;
use rand::SeedableRng;

use corridor_engine::config::EngineConfig;
use corridor_engine::engine::{CorridorEngine, LocationOutcome};
use corridor_engine::error::CorridorError;
use corridor_engine::geo::GeoPoint;
use corridor_engine::mission::MissionPhase;
use corridor_engine::signal::{SignalRecord, SignalState};

const SCENE: GeoPoint = GeoPoint {
    lat: 18.53,
    lng: 73.87,
};

fn demo_engine() -> CorridorEngine {
    CorridorEngine::new(EngineConfig {
        seed_demo_data: true,
        ..Default::default()
    })
}

#[test]
fn ambulance_reaches_scene_then_hospital() {
    let engine = demo_engine();

    engine.report_scene("ACC-1", SCENE, 1_000).unwrap();

    // ~15 m from the scene crosses the arrival threshold
    let outcome = engine
        .report_location("ACC-1", "AMB-1", GeoPoint::new(18.5301, 73.8701), 2_000)
        .unwrap();
    assert_eq!(outcome, LocationOutcome::ArrivedAtScene);

    let mission = engine.mission("ACC-1").unwrap();
    assert_eq!(mission.phase, MissionPhase::AtScene);
    assert!(mission.arrived_at_scene_at.is_some());

    // Route to the nearest demo hospital (Jehangir, a few hundred meters away)
    let mission = engine.start_hospital_routing("ACC-1", None, 3_000).unwrap();
    let hospital = mission.hospital.clone().unwrap();
    assert_eq!(mission.phase, MissionPhase::RoutingToHospital);
    assert_eq!(hospital.hospital_id, "HOSP-JEHANGIR");

    // Arrive at the hospital door
    let outcome = engine
        .report_location("ACC-1", "AMB-1", hospital.location, 4_000)
        .unwrap();
    assert_eq!(outcome, LocationOutcome::ArrivedAtHospital);

    let mission = engine.mission("ACC-1").unwrap();
    assert_eq!(mission.phase, MissionPhase::Arrived);
    assert!(mission.arrived_at_hospital_at.is_some());
    assert!(engine.active_corridors(5_000).is_empty());
}

#[test]
fn phase_sequence_never_regresses() {
    let engine = demo_engine();
    engine.report_scene("ACC-1", SCENE, 1_000).unwrap();

    let phases = |engine: &CorridorEngine| engine.mission("ACC-1").unwrap().phase;
    let mut observed = vec![phases(&engine)];

    engine
        .report_location("ACC-1", "AMB-1", GeoPoint::new(18.5301, 73.8701), 2_000)
        .unwrap();
    observed.push(phases(&engine));

    // A late ping from before scene arrival must not move anything backwards
    engine
        .report_location("ACC-1", "AMB-1", GeoPoint::new(18.50, 73.85), 1_500)
        .unwrap();
    observed.push(phases(&engine));

    engine.start_hospital_routing("ACC-1", None, 3_000).unwrap();
    observed.push(phases(&engine));

    for pair in observed.windows(2) {
        assert!(pair[0] <= pair[1], "phase regressed: {observed:?}");
    }
}

#[test]
fn routing_without_any_location_update_fails() {
    let engine = demo_engine();
    engine.report_scene("ACC-1", SCENE, 1_000).unwrap();

    let err = engine
        .start_hospital_routing("ACC-1", None, 2_000)
        .unwrap_err();
    assert!(matches!(err, CorridorError::NotFound { .. }));
    assert_eq!(
        engine.mission("ACC-1").unwrap().phase,
        MissionPhase::EnRouteToScene
    );
}

#[test]
fn negative_bed_update_rejected() {
    let engine = demo_engine();
    let before = engine.directory().get("HOSP-KEM").unwrap().beds_available;

    let err = engine.directory().update_beds("HOSP-KEM", -1).unwrap_err();
    assert!(matches!(err, CorridorError::Validation(_)));
    assert_eq!(
        engine.directory().get("HOSP-KEM").unwrap().beds_available,
        before
    );
}

#[test]
fn out_of_order_updates_converge_to_newest() {
    let engine = demo_engine();
    engine.report_scene("ACC-1", SCENE, 0).unwrap();

    // Pings walking away from the scene, delivered shuffled
    let mut pings: Vec<(u64, GeoPoint)> = (0..20)
        .map(|i| {
            (
                1_000 + i * 1_000,
                GeoPoint::new(18.50 - i as f64 * 0.001, 73.85),
            )
        })
        .collect();
    let newest = *pings.last().unwrap();

    let mut rng = rand::rngs::StdRng::seed_from_u64(7);
    pings.shuffle(&mut rng);

    for (ts, loc) in pings {
        engine.report_location("ACC-1", "AMB-1", loc, ts).unwrap();
    }

    let mission = engine.mission("ACC-1").unwrap();
    assert_eq!(mission.last_update_at, Some(newest.0));
    assert_eq!(mission.current_location, Some(newest.1));
}

#[test]
fn concurrent_streams_for_independent_accidents() {
    let engine = Arc::new(demo_engine());

    // One scene per vehicle, spread around the demo area, all far from any
    // arrival threshold.
    for v in 0..8 {
        let scene = GeoPoint::new(18.6 + v as f64 * 0.01, 73.95);
        engine
            .report_scene(&format!("ACC-{v}"), scene, 0)
            .unwrap();
    }

    let threads: Vec<_> = (0..8)
        .map(|v| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                let accident_id = format!("ACC-{v}");
                let entity_id = format!("AMB-{v}");
                for i in 0..100u64 {
                    let loc = GeoPoint::new(18.50 + i as f64 * 0.0001, 73.92);
                    engine
                        .report_location(&accident_id, &entity_id, loc, 1_000 + i)
                        .unwrap();
                }
            })
        })
        .collect();
    for t in threads {
        t.join().unwrap();
    }

    let missions = engine.all_missions();
    assert_eq!(missions.len(), 8);
    for mission in missions {
        // Every stream fully applied, in timestamp order
        assert_eq!(mission.last_update_at, Some(1_099));
        assert_eq!(mission.phase, MissionPhase::EnRouteToScene);
    }
}

#[test]
fn concurrent_updates_for_one_accident_serialize() {
    let engine = Arc::new(demo_engine());
    engine.report_scene("ACC-1", SCENE, 0).unwrap();

    let threads: Vec<_> = (0..4)
        .map(|t| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                for i in 0..50u64 {
                    let ts = 1_000 + t * 50 + i;
                    let loc = GeoPoint::new(18.50, 73.92 + ts as f64 * 1e-6);
                    let _ = engine.report_location("ACC-1", "AMB-1", loc, ts);
                }
            })
        })
        .collect();
    for t in threads {
        t.join().unwrap();
    }

    // The winning update is the newest timestamp ever accepted
    let mission = engine.mission("ACC-1").unwrap();
    assert_eq!(mission.last_update_at, Some(1_199));
}

#[test]
fn intersecting_corridors_keep_first_claim() {
    let engine = CorridorEngine::new(EngineConfig::default());

    // Two hospitals on opposite sides of a shared intersection
    for seed in corridor_engine::directory::seed::demo_hospitals() {
        engine.directory().register(seed);
    }
    let shared = SignalRecord::new("SIG-SHARED", GeoPoint::new(18.525, 73.874));
    engine.register_signal(shared);

    // Mission A arrives at its scene and starts routing through the intersection
    engine.report_scene("ACC-A", GeoPoint::new(18.52, 73.872), 0).unwrap();
    engine
        .report_location("ACC-A", "AMB-A", GeoPoint::new(18.5201, 73.8721), 1_000)
        .unwrap();
    engine
        .start_hospital_routing("ACC-A", Some("HOSP-JEHANGIR"), 1_500)
        .unwrap();

    let signal = engine.signal("SIG-SHARED", 1_500).unwrap();
    assert_eq!(signal.owner_mission_id.as_deref(), Some("ACC-A"));

    // Mission B crosses the same intersection; it must not steal the claim
    engine.report_scene("ACC-B", GeoPoint::new(18.529, 73.876), 0).unwrap();
    engine
        .report_location("ACC-B", "AMB-B", GeoPoint::new(18.5291, 73.8761), 2_000)
        .unwrap();
    engine
        .start_hospital_routing("ACC-B", Some("HOSP-SASSOON"), 2_500)
        .unwrap();

    let signal = engine.signal("SIG-SHARED", 2_500).unwrap();
    assert_eq!(signal.owner_mission_id.as_deref(), Some("ACC-A"));

    // B releasing is a no-op for A's signal; A releasing clears it
    engine.release_corridor("ACC-B").unwrap();
    assert_eq!(
        engine.signal("SIG-SHARED", 3_000).unwrap().owner_mission_id.as_deref(),
        Some("ACC-A")
    );
    engine.release_corridor("ACC-A").unwrap();
    assert_eq!(
        engine.signal("SIG-SHARED", 3_000).unwrap().state,
        SignalState::Normal
    );
}

#[test]
fn override_ttl_lapses_without_refresh() {
    let engine = CorridorEngine::new(EngineConfig {
        override_ttl_ms: 5_000,
        ..Default::default()
    });
    for seed in corridor_engine::directory::seed::demo_hospitals() {
        engine.directory().register(seed);
    }
    engine.register_signal(SignalRecord::new(
        "SIG-1",
        GeoPoint::new(18.525, 73.874),
    ));

    engine.report_scene("ACC-1", GeoPoint::new(18.52, 73.872), 0).unwrap();
    engine
        .report_location("ACC-1", "AMB-1", GeoPoint::new(18.5201, 73.8721), 1_000)
        .unwrap();
    engine
        .start_hospital_routing("ACC-1", Some("HOSP-JEHANGIR"), 1_000)
        .unwrap();
    assert_eq!(
        engine.signal("SIG-1", 2_000).unwrap().state,
        SignalState::GreenOverride
    );

    // No refresh for longer than the TTL: the sweep reverts it
    assert_eq!(engine.sweep_signals(10_000), 1);
    assert_eq!(engine.signal("SIG-1", 10_000).unwrap().state, SignalState::Normal);
    assert!(engine.active_corridors(10_000).is_empty());
}

#[test]
fn nearest_query_with_specialty_and_limit() {
    use corridor_engine::directory::NearestQuery;

    let engine = demo_engine();
    let point = GeoPoint::new(18.5158, 73.8413); // Deccan area

    let query = NearestQuery {
        specialty: Some("NEURO".to_string()),
        min_beds: 1,
        limit: 2,
    };
    let results = engine.directory().nearest(point, &query);

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].hospital.hospital_id, "HOSP-SAHYADRI");
    assert!(results[0].distance_km <= results[1].distance_km);
    for r in &results {
        assert!(r.hospital.specialties.contains("NEURO"));
        assert!(r.hospital.active && r.hospital.emergency_capable);
    }
}
