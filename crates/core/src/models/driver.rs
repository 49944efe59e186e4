#![allow(missing_docs)]

use std::{fmt, str::FromStr};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use super::{
    rider::Rider,
    trip::{completed, round_cents, Passenger, Trip},
};
use crate::error::{ensure_positive_id, Result, RideShareError};

/// Flat fee withheld from every fare before the driver's share is applied.
pub const TRIP_FEE: f64 = 1.65;
/// Portion of the remaining fare paid out to the driver.
pub const DRIVER_SHARE: f64 = 0.8;

static VIN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9]{17}$").expect("failed to compile VIN regex"));

/// Vehicle identification number: exactly 17 ASCII letters or digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Vin(String);

impl Vin {
    /// Validate and wrap a raw VIN.
    pub fn parse(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        if VIN_RE.is_match(&raw) {
            Ok(Self(raw))
        } else {
            Err(RideShareError::InvalidVin(raw))
        }
    }

    /// Borrow the VIN as text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Vin {
    type Err = RideShareError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Vin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether a driver can currently be dispatched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DriverStatus {
    /// Free to take a ride.
    #[default]
    Available,
    /// Off shift or already busy.
    Unavailable,
}

impl DriverStatus {
    /// Canonical upper-case label.
    pub fn as_str(&self) -> &'static str {
        match self {
            DriverStatus::Available => "AVAILABLE",
            DriverStatus::Unavailable => "UNAVAILABLE",
        }
    }
}

impl FromStr for DriverStatus {
    type Err = RideShareError;

    /// Accepts either case and an optional leading `:`.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let label = trimmed.trim_start_matches(':');
        if label.eq_ignore_ascii_case("available") {
            Ok(DriverStatus::Available)
        } else if label.eq_ignore_ascii_case("unavailable") {
            Ok(DriverStatus::Unavailable)
        } else {
            Err(RideShareError::InvalidStatus(format!("{trimmed:?}")))
        }
    }
}

impl fmt::Display for DriverStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A driver, the vehicle they drive, and the trips on both sides of the wheel.
#[derive(Debug, Clone, Serialize)]
pub struct Driver {
    id: i64,
    name: String,
    vehicle_id: Vin,
    status: DriverStatus,
    phone: Option<String>,
    driven_trips: Vec<Trip>,
    trips: Vec<Trip>,
}

impl Driver {
    /// Build an available driver with no trips.
    pub fn new(id: i64, name: impl Into<String>, vin: &str) -> Result<Self> {
        Self::with_status(id, name, vin, DriverStatus::default())
    }

    /// Build a driver with an explicit status.
    pub fn with_status(
        id: i64,
        name: impl Into<String>,
        vin: &str,
        status: DriverStatus,
    ) -> Result<Self> {
        ensure_positive_id("driver", id)?;
        let vehicle_id = Vin::parse(vin)?;
        Ok(Self {
            id,
            name: name.into(),
            vehicle_id,
            status,
            phone: None,
            driven_trips: Vec::new(),
            trips: Vec::new(),
        })
    }

    /// Attach a contact number.
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vehicle_id(&self) -> &Vin {
        &self.vehicle_id
    }

    pub fn status(&self) -> DriverStatus {
        self.status
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    /// Trips this driver drove, in the order they were added.
    pub fn driven_trips(&self) -> &[Trip] {
        &self.driven_trips
    }

    /// Trips this driver took as a passenger.
    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    /// Record a trip this driver drove.
    pub fn add_driven_trip(&mut self, trip: Trip) -> Result<()> {
        if trip.driver_id() != self.id {
            return Err(RideShareError::ForeignDrivenTrip {
                trip_id: trip.id(),
                expected: self.id,
                actual: trip.driver_id(),
            });
        }
        self.driven_trips.push(trip);
        Ok(())
    }

    /// Record a trip this driver rode in as a passenger.
    pub fn add_trip(&mut self, trip: Trip) -> Result<()> {
        let expected = Passenger::Driver(self.id);
        if trip.passenger() != Some(expected) {
            return Err(RideShareError::ForeignTakenTrip {
                trip_id: trip.id(),
                expected,
            });
        }
        self.trips.push(trip);
        Ok(())
    }

    /// Mean rating over completed driven trips; `0.0` when none are rated.
    pub fn average_rating(&self) -> f64 {
        let (sum, count) = completed(&self.driven_trips)
            .filter_map(Trip::rating)
            .fold((0u32, 0u32), |(sum, count), stars| {
                (sum + u32::from(stars), count + 1)
            });
        if count == 0 {
            0.0
        } else {
            f64::from(sum) / f64::from(count)
        }
    }

    /// Driver's cut of completed fares after the flat fee, rounded to cents.
    pub fn total_revenue(&self) -> f64 {
        let revenue: f64 = completed(&self.driven_trips)
            .filter_map(Trip::cost)
            .map(|cost| (cost - TRIP_FEE) * DRIVER_SHARE)
            .sum();
        round_cents(revenue)
    }

    /// Fares paid as a passenger minus revenue earned as a driver.
    ///
    /// Only the revenue side is rounded; the difference is returned as is.
    pub fn net_expenditures(&self) -> f64 {
        self.total_spent() - self.total_revenue()
    }
}

impl Rider for Driver {
    fn taken_trips(&self) -> &[Trip] {
        &self.trips
    }
}
