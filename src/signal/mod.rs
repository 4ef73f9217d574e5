//! Traffic signal state store
//!
//! Per-signal override state with owner-tagged claims and TTL expiry,
//! queried and mutated by the corridor controller.

pub mod seed;
pub mod store;
pub mod types;

pub use store::SignalStore;
pub use types::{ClaimOutcome, SignalRecord, SignalState};
