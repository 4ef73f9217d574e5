//! Corridor Engine
//!
//! Coordinates an emergency-vehicle green corridor: as an ambulance travels
//! from an accident scene to a hospital, the engine tracks the mission phase,
//! selects a destination hospital under capacity and specialty constraints,
//! and drives traffic-signal overrides along the route.
//!
//! This crate provides:
//! - Per-accident mission state machine with arrival detection
//! - Concurrent location-update ingestion with per-mission serialization
//! - Nearest-hospital matching under capacity/specialty filters
//! - Owner-tagged signal override claims with TTL expiry
//!
//! # Architecture
//!
//! External events flow through [`engine::CorridorEngine`]:
//! 1. A scene report creates the mission (`EN_ROUTE_TO_SCENE`)
//! 2. Location pings drive arrival detection and corridor refresh
//! 3. A routing request consults the [`directory::HospitalDirectory`] and
//!    activates the corridor via [`corridor::CorridorController`]
//! 4. Arrival at the hospital releases the mission's overrides
//!
//! Everything is in-memory and synchronous; transport, persistence, and
//! notification delivery live outside this crate.
//!
//! # Example
//!
//! ```
//! use corridor_engine::config::EngineConfig;
//! use corridor_engine::engine::CorridorEngine;
//! use corridor_engine::geo::GeoPoint;
//!
//! let engine = CorridorEngine::new(EngineConfig {
//!     seed_demo_data: true,
//!     ..Default::default()
//! });
//!
//! engine.report_scene("ACC-1", GeoPoint::new(18.53, 73.87), 1_000).unwrap();
//! engine
//!     .report_location("ACC-1", "AMB-1", GeoPoint::new(18.5301, 73.8701), 2_000)
//!     .unwrap();
//! let mission = engine.start_hospital_routing("ACC-1", None, 3_000).unwrap();
//! assert!(mission.hospital.is_some());
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod corridor;
pub mod directory;
pub mod engine;
pub mod error;
pub mod geo;
pub mod logging;
pub mod mission;
pub mod signal;
pub mod time;
pub mod view;

// Re-export commonly used types
pub use config::EngineConfig;
pub use corridor::{CorridorController, CorridorUpdate};
pub use directory::{HospitalDirectory, HospitalRecord, NearestQuery, RankedHospital};
pub use engine::{CorridorEngine, LocationOutcome};
pub use error::{CorridorError, CorridorResult};
pub use geo::{haversine_km, within_threshold, GeoPoint};
pub use mission::{HospitalAssignment, Mission, MissionPhase, MissionStore};
pub use signal::{ClaimOutcome, SignalRecord, SignalState, SignalStore};
pub use view::{HospitalView, MissionView, ResponseMeta};
