#![allow(missing_docs)]

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::models::Passenger;

/// On-disk layout of a fleet document.
#[derive(Debug, Default, Deserialize)]
pub struct FleetDocument {
    #[serde(default)]
    pub users: Vec<UserRecord>,
    #[serde(default)]
    pub drivers: Vec<DriverRecord>,
    #[serde(default)]
    pub trips: Vec<TripRecord>,
}

#[derive(Debug, Deserialize)]
pub struct UserRecord {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub phone: String,
}

#[derive(Debug, Deserialize)]
pub struct DriverRecord {
    pub id: i64,
    pub name: String,
    #[serde(alias = "vehicle_id")]
    pub vin: String,
    #[serde(default)]
    pub phone: Option<String>,
    /// Kept loose so numbers and other non-string values surface as status errors.
    #[serde(default)]
    pub status: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct TripRecord {
    pub id: i64,
    pub driver_id: i64,
    #[serde(default)]
    pub passenger: Option<Passenger>,
    pub start_time: DateTime<Utc>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub cost: Option<f64>,
    #[serde(default)]
    pub rating: Option<i64>,
}
