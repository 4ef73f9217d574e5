//! Hospital directory
//!
//! In-memory catalog of hospitals with constrained nearest-neighbor queries,
//! used by the mission engine to pick a destination hospital.

pub mod hospital;
pub mod registry;
pub mod seed;

pub use hospital::{HospitalRecord, NearestQuery, RankedHospital};
pub use registry::HospitalDirectory;
