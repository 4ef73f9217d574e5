//! Engine error taxonomy.
//!
//! Every error is per-request recoverable; nothing here is fatal to the
//! process. Stale location updates are deliberately *not* errors (see
//! [`crate::engine::LocationOutcome`]).

use thiserror::Error;

/// Errors surfaced by the mission and corridor engine.
#[derive(Debug, Error)]
pub enum CorridorError {
    /// Malformed or out-of-range input; no state was mutated.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Unknown accident, hospital, or signal identifier.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Entity kind ("mission", "hospital", "signal")
        kind: &'static str,
        /// Identifier that missed
        id: String,
    },

    /// A hinted hospital exists but fails eligibility (inactive, not
    /// emergency-capable, or no beds). Distinct from `NotFound`: the
    /// mission and the hospital both exist.
    #[error("Hospital {id} not available: {reason}")]
    HospitalNotAvailable {
        /// Hospital identifier
        id: String,
        /// Why the hospital was rejected
        reason: String,
    },

    /// The directory query returned no eligible hospital.
    #[error("No available hospital found near {lat},{lng}")]
    NoHospitalAvailable {
        /// Query latitude
        lat: f64,
        /// Query longitude
        lng: f64,
    },
}

impl CorridorError {
    /// Lookup-miss constructor.
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        CorridorError::NotFound {
            kind,
            id: id.into(),
        }
    }
}

/// Result alias for engine operations.
pub type CorridorResult<T> = Result<T, CorridorError>;
