//! Mission state machine
//!
//! One record per accident: phase lifecycle, location tracking with
//! monotonic timestamps, and the hospital assignment snapshot.

pub mod phase;
pub mod record;
pub mod store;

pub use phase::MissionPhase;
pub use record::{HospitalAssignment, Mission};
pub use store::MissionStore;
