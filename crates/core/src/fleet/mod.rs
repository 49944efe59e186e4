//! Fleet documents: the full set of users, drivers and trips loaded together.

/// Reading fleet documents from disk.
pub mod loader;
mod records;
/// Reloading fleet documents when they change.
pub mod watch;

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    error::{Result, RideShareError},
    models::{Driver, DriverStatus, Passenger, Trip, User},
};

pub use loader::FleetLoader;
pub use records::{DriverRecord, FleetDocument, TripRecord, UserRecord};
pub use watch::{FleetEvent, FleetWatcher};

/// Validated object graph with every trip attached to its driver and passenger.
#[derive(Debug, Clone, Default)]
pub struct Fleet {
    users: BTreeMap<i64, User>,
    drivers: BTreeMap<i64, Driver>,
    trip_count: usize,
}

impl Fleet {
    /// Validate a parsed document and wire up trip associations.
    pub fn from_document(document: FleetDocument) -> Result<Self> {
        let mut users = BTreeMap::new();
        for record in document.users {
            let id = record.id;
            let user = User::new(id, record.name, record.phone)?;
            if users.insert(id, user).is_some() {
                return Err(RideShareError::DuplicateId { entity: "user", id });
            }
        }

        let mut drivers = BTreeMap::new();
        for record in document.drivers {
            let id = record.id;
            let status = parse_status(record.status)?;
            let mut driver = Driver::with_status(id, record.name, &record.vin, status)?;
            if let Some(phone) = record.phone {
                driver = driver.with_phone(phone);
            }
            if drivers.insert(id, driver).is_some() {
                return Err(RideShareError::DuplicateId {
                    entity: "driver",
                    id,
                });
            }
        }

        let mut trip_ids = HashSet::new();
        for record in document.trips {
            if !trip_ids.insert(record.id) {
                return Err(RideShareError::DuplicateId {
                    entity: "trip",
                    id: record.id,
                });
            }
            let trip = build_trip(record)?;
            attach_trip(&mut users, &mut drivers, trip)?;
        }

        debug!(
            users = users.len(),
            drivers = drivers.len(),
            trips = trip_ids.len(),
            "fleet assembled"
        );

        Ok(Self {
            users,
            drivers,
            trip_count: trip_ids.len(),
        })
    }

    /// Look up a user by id.
    pub fn user(&self, id: i64) -> Option<&User> {
        self.users.get(&id)
    }

    /// Look up a driver by id.
    pub fn driver(&self, id: i64) -> Option<&Driver> {
        self.drivers.get(&id)
    }

    /// Users ordered by id.
    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    /// Drivers ordered by id.
    pub fn drivers(&self) -> impl Iterator<Item = &Driver> {
        self.drivers.values()
    }

    /// Number of distinct trips in the document.
    pub fn trip_count(&self) -> usize {
        self.trip_count
    }

    /// Trips currently under way.
    pub fn in_progress_count(&self) -> usize {
        self.drivers
            .values()
            .flat_map(|driver| driver.driven_trips())
            .filter(|trip| !trip.is_completed())
            .count()
    }

    /// Derived figures for every driver, ordered by id.
    pub fn summaries(&self) -> Vec<DriverSummary> {
        self.drivers().map(DriverSummary::from_driver).collect()
    }
}

/// Snapshot of one driver's bookkeeping.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DriverSummary {
    pub id: i64,
    pub name: String,
    pub vehicle_id: String,
    pub status: DriverStatus,
    pub completed_trips: usize,
    pub in_progress_trips: usize,
    pub average_rating: f64,
    pub total_revenue: f64,
    pub net_expenditures: f64,
}

impl DriverSummary {
    /// Compute the summary for `driver`.
    pub fn from_driver(driver: &Driver) -> Self {
        let completed_trips = driver
            .driven_trips()
            .iter()
            .filter(|trip| trip.is_completed())
            .count();
        Self {
            id: driver.id(),
            name: driver.name().to_string(),
            vehicle_id: driver.vehicle_id().to_string(),
            status: driver.status(),
            completed_trips,
            in_progress_trips: driver.driven_trips().len() - completed_trips,
            average_rating: driver.average_rating(),
            total_revenue: driver.total_revenue(),
            net_expenditures: driver.net_expenditures(),
        }
    }
}

fn parse_status(raw: Option<Value>) -> Result<DriverStatus> {
    match raw {
        None | Some(Value::Null) => Ok(DriverStatus::default()),
        Some(Value::String(label)) => label.parse(),
        Some(other) => Err(RideShareError::InvalidStatus(other.to_string())),
    }
}

fn build_trip(record: TripRecord) -> Result<Trip> {
    let trip = Trip::new(
        record.id,
        record.driver_id,
        record.passenger,
        record.start_time,
    )?;
    match record.end_time {
        Some(end_time) => trip.finish(end_time, record.cost, record.rating),
        None => {
            if record.cost.is_some() || record.rating.is_some() {
                warn!(
                    trip_id = record.id,
                    "ignoring cost and rating on a trip that is still in progress"
                );
            }
            Ok(trip)
        }
    }
}

fn attach_trip(
    users: &mut BTreeMap<i64, User>,
    drivers: &mut BTreeMap<i64, Driver>,
    trip: Trip,
) -> Result<()> {
    let trip_id = trip.id();
    let unknown = |entity, id| RideShareError::UnknownReference {
        trip_id,
        entity,
        id,
    };

    let driver_id = trip.driver_id();
    drivers
        .get_mut(&driver_id)
        .ok_or_else(|| unknown("driver", driver_id))?
        .add_driven_trip(trip.clone())?;

    match trip.passenger() {
        Some(Passenger::User(id)) => users
            .get_mut(&id)
            .ok_or_else(|| unknown("user", id))?
            .add_trip(trip),
        Some(Passenger::Driver(id)) => drivers
            .get_mut(&id)
            .ok_or_else(|| unknown("driver", id))?
            .add_trip(trip),
        None => Ok(()),
    }
}
