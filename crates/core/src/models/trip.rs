#![allow(missing_docs)]

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ensure_positive_id, Result, RideShareError};

/// Who rode along on a trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Passenger {
    /// A registered rider.
    User(i64),
    /// A driver riding in someone else's vehicle.
    Driver(i64),
}

impl Passenger {
    /// Id of the referenced rider.
    pub fn id(&self) -> i64 {
        match self {
            Passenger::User(id) | Passenger::Driver(id) => *id,
        }
    }
}

impl fmt::Display for Passenger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Passenger::User(id) => write!(f, "user {id}"),
            Passenger::Driver(id) => write!(f, "driver {id}"),
        }
    }
}

/// A single ride. Trips without an end time are still in progress and carry
/// neither cost nor rating.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trip {
    id: i64,
    driver_id: i64,
    passenger: Option<Passenger>,
    cost: Option<f64>,
    rating: Option<u8>,
    start_time: DateTime<Utc>,
    end_time: Option<DateTime<Utc>>,
}

impl Trip {
    /// Start a trip. The returned value is in progress until [`Trip::finish`].
    pub fn new(
        id: i64,
        driver_id: i64,
        passenger: Option<Passenger>,
        start_time: DateTime<Utc>,
    ) -> Result<Self> {
        ensure_positive_id("trip", id)?;
        ensure_positive_id("driver", driver_id)?;
        if let Some(passenger) = passenger {
            ensure_positive_id("passenger", passenger.id())?;
        }

        Ok(Self {
            id,
            driver_id,
            passenger,
            cost: None,
            rating: None,
            start_time,
            end_time: None,
        })
    }

    /// Close the trip with its end time, fare and optional rating.
    pub fn finish(
        self,
        end_time: DateTime<Utc>,
        cost: Option<f64>,
        rating: Option<i64>,
    ) -> Result<Self> {
        if self.is_completed() {
            return Err(RideShareError::AlreadyFinished { trip_id: self.id });
        }
        if end_time < self.start_time {
            return Err(RideShareError::EndBeforeStart { trip_id: self.id });
        }
        if let Some(cost) = cost {
            if !cost.is_finite() || cost < 0.0 {
                return Err(RideShareError::InvalidCost(cost));
            }
        }
        let rating = rating
            .map(|value| match u8::try_from(value) {
                Ok(stars @ 1..=5) => Ok(stars),
                _ => Err(RideShareError::InvalidRating(value)),
            })
            .transpose()?;

        Ok(Self {
            cost,
            rating,
            end_time: Some(end_time),
            ..self
        })
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn driver_id(&self) -> i64 {
        self.driver_id
    }

    pub fn passenger(&self) -> Option<Passenger> {
        self.passenger
    }

    pub fn cost(&self) -> Option<f64> {
        self.cost
    }

    pub fn rating(&self) -> Option<u8> {
        self.rating
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    pub fn end_time(&self) -> Option<DateTime<Utc>> {
        self.end_time
    }

    /// Whether the trip has an end time recorded.
    pub fn is_completed(&self) -> bool {
        self.end_time.is_some()
    }

    /// Elapsed time of a completed trip.
    pub fn duration(&self) -> Option<Duration> {
        self.end_time.map(|end| end - self.start_time)
    }
}

/// Iterate over the trips that have finished.
pub fn completed(trips: &[Trip]) -> impl Iterator<Item = &Trip> {
    trips.iter().filter(|trip| trip.is_completed())
}

/// Round a currency amount to whole cents.
pub(crate) fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2016, 8, day, 0, 0, 0).unwrap()
    }

    #[test]
    fn new_trip_is_in_progress() -> anyhow::Result<()> {
        let trip = Trip::new(8, 3, Some(Passenger::User(1)), at(8))?;
        assert!(!trip.is_completed());
        assert_eq!(trip.cost(), None);
        assert_eq!(trip.rating(), None);
        assert_eq!(trip.duration(), None);
        Ok(())
    }

    #[test]
    fn finishing_records_fare_and_rating() -> anyhow::Result<()> {
        let trip = Trip::new(8, 3, None, at(8))?.finish(at(10), Some(15.0), Some(5))?;
        assert!(trip.is_completed());
        assert_eq!(trip.cost(), Some(15.0));
        assert_eq!(trip.rating(), Some(5));
        assert_eq!(trip.duration(), Some(Duration::days(2)));
        Ok(())
    }

    #[test]
    fn rejects_bad_ids() {
        assert!(matches!(
            Trip::new(0, 3, None, at(8)),
            Err(RideShareError::InvalidId { entity: "trip", .. })
        ));
        assert!(matches!(
            Trip::new(1, -3, None, at(8)),
            Err(RideShareError::InvalidId { entity: "driver", .. })
        ));
        assert!(matches!(
            Trip::new(1, 3, Some(Passenger::User(0)), at(8)),
            Err(RideShareError::InvalidId {
                entity: "passenger",
                ..
            })
        ));
    }

    #[test]
    fn rejects_ratings_outside_one_to_five() -> anyhow::Result<()> {
        for rating in [0, 6, -1, 300] {
            let result = Trip::new(1, 3, None, at(8))?.finish(at(9), Some(5.0), Some(rating));
            assert_eq!(result, Err(RideShareError::InvalidRating(rating)));
        }
        Ok(())
    }

    #[test]
    fn rejects_negative_or_non_finite_cost() -> anyhow::Result<()> {
        let negative = Trip::new(1, 3, None, at(8))?.finish(at(9), Some(-2.0), None);
        assert_eq!(negative, Err(RideShareError::InvalidCost(-2.0)));
        let nan = Trip::new(1, 3, None, at(8))?.finish(at(9), Some(f64::NAN), None);
        assert!(matches!(nan, Err(RideShareError::InvalidCost(_))));
        Ok(())
    }

    #[test]
    fn rejects_end_before_start() -> anyhow::Result<()> {
        let result = Trip::new(4, 3, None, at(10))?.finish(at(8), Some(5.0), Some(3));
        assert_eq!(result, Err(RideShareError::EndBeforeStart { trip_id: 4 }));
        Ok(())
    }

    #[test]
    fn finished_trips_cannot_be_finished_again() -> anyhow::Result<()> {
        let trip = Trip::new(4, 3, None, at(8))?.finish(at(9), Some(15.0), Some(5))?;
        let again = trip.clone().finish(at(10), Some(1.0), Some(1));
        assert_eq!(again, Err(RideShareError::AlreadyFinished { trip_id: 4 }));
        assert_eq!(trip.cost(), Some(15.0));
        assert_eq!(trip.end_time(), Some(at(9)));
        Ok(())
    }

    #[test]
    fn completed_skips_in_progress_trips() -> anyhow::Result<()> {
        let trips = vec![
            Trip::new(1, 3, None, at(8))?.finish(at(9), Some(5.0), Some(4))?,
            Trip::new(2, 3, None, at(8))?,
            Trip::new(3, 3, None, at(8))?.finish(at(8), None, None)?,
        ];
        let ids: Vec<i64> = completed(&trips).map(Trip::id).collect();
        assert_eq!(ids, vec![1, 3]);
        Ok(())
    }

    #[test]
    fn rounds_to_cents() {
        assert_eq!(round_cents(20.044999), 20.04);
        assert_eq!(round_cents(-4.039999999999999), -4.04);
        assert_eq!(round_cents(0.0), 0.0);
    }

    #[test]
    fn passenger_serializes_with_kind_tag() -> anyhow::Result<()> {
        let json = serde_json::to_value(Passenger::Driver(5))?;
        assert_eq!(json, serde_json::json!({"kind": "driver", "id": 5}));
        let parsed: Passenger = serde_json::from_value(serde_json::json!({"kind": "user", "id": 2}))?;
        assert_eq!(parsed, Passenger::User(2));
        Ok(())
    }
}
