use serde::Serialize;

use super::{
    rider::Rider,
    trip::{Passenger, Trip},
};
use crate::error::{ensure_positive_id, Result, RideShareError};

/// A rider who requests trips.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    id: i64,
    name: String,
    phone: String,
    requested_trips: Vec<Trip>,
}

impl User {
    /// Build a user with no trips.
    pub fn new(id: i64, name: impl Into<String>, phone: impl Into<String>) -> Result<Self> {
        ensure_positive_id("user", id)?;
        Ok(Self {
            id,
            name: name.into(),
            phone: phone.into(),
            requested_trips: Vec::new(),
        })
    }

    /// Identifier of the user.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Contact number as provided.
    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// Trips requested by this user.
    pub fn requested_trips(&self) -> &[Trip] {
        &self.requested_trips
    }

    /// Record a trip this user took. The trip must name this user as its passenger.
    pub fn add_trip(&mut self, trip: Trip) -> Result<()> {
        let expected = Passenger::User(self.id);
        if trip.passenger() != Some(expected) {
            return Err(RideShareError::ForeignTakenTrip {
                trip_id: trip.id(),
                expected,
            });
        }
        self.requested_trips.push(trip);
        Ok(())
    }
}

impl Rider for User {
    fn taken_trips(&self) -> &[Trip] {
        &self.requested_trips
    }
}
