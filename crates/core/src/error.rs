//! Argument errors raised while building the ride-share object graph.

use thiserror::Error;

use crate::models::Passenger;

/// Convenience alias used across the domain model.
pub type Result<T, E = RideShareError> = std::result::Result<T, E>;

/// Validation failures raised by constructors and association methods.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RideShareError {
    /// Ids must be strictly positive.
    #[error("{entity} id must be a positive integer, got {id}")]
    InvalidId {
        /// Kind of record carrying the id.
        entity: &'static str,
        /// Rejected value.
        id: i64,
    },
    /// Vehicle ids must be 17 alphanumeric characters.
    #[error("vehicle id must be 17 alphanumeric characters, got {0:?}")]
    InvalidVin(String),
    /// Status outside the known set.
    #[error("unknown driver status {0}")]
    InvalidStatus(String),
    /// Ratings are whole stars between 1 and 5.
    #[error("trip rating must be between 1 and 5, got {0}")]
    InvalidRating(i64),
    /// Costs must be finite and non-negative.
    #[error("trip cost must be a non-negative amount, got {0}")]
    InvalidCost(f64),
    /// A completed trip must not end before it started.
    #[error("trip {trip_id} ends before it starts")]
    EndBeforeStart {
        /// Offending trip.
        trip_id: i64,
    },
    /// A trip can only be finished once.
    #[error("trip {trip_id} has already finished")]
    AlreadyFinished {
        /// Offending trip.
        trip_id: i64,
    },
    /// A driver was handed a trip someone else drove.
    #[error("trip {trip_id} was driven by driver {actual}, not driver {expected}")]
    ForeignDrivenTrip {
        /// Offending trip.
        trip_id: i64,
        /// Driver the trip was offered to.
        expected: i64,
        /// Driver recorded on the trip.
        actual: i64,
    },
    /// A rider was handed a trip they were not the passenger of.
    #[error("trip {trip_id} was not taken by {expected}")]
    ForeignTakenTrip {
        /// Offending trip.
        trip_id: i64,
        /// Rider the trip was offered to.
        expected: Passenger,
    },
    /// Two records of the same kind share an id.
    #[error("duplicate {entity} id {id}")]
    DuplicateId {
        /// Kind of record carrying the id.
        entity: &'static str,
        /// Repeated value.
        id: i64,
    },
    /// A trip names a driver or rider that does not exist.
    #[error("trip {trip_id} references unknown {entity} {id}")]
    UnknownReference {
        /// Offending trip.
        trip_id: i64,
        /// Kind of record that could not be found.
        entity: &'static str,
        /// Missing id.
        id: i64,
    },
}

/// Reject zero and negative ids.
pub(crate) fn ensure_positive_id(entity: &'static str, id: i64) -> Result<()> {
    if id > 0 {
        Ok(())
    } else {
        Err(RideShareError::InvalidId { entity, id })
    }
}
