#![warn(clippy::all, missing_docs)]

//! Core domain logic for the RideShare dashboard.
//!
//! This crate hosts the driver, rider and trip models with their
//! bookkeeping, configuration handling, and the loading and watching
//! of fleet documents used by the terminal UI.

pub mod config;
pub mod error;
pub mod fleet;
pub mod models;

pub use crate::config::AppConfig;
pub use error::{Result, RideShareError};
pub use fleet::{DriverSummary, Fleet, FleetEvent, FleetLoader, FleetWatcher};
pub use models::{Driver, DriverStatus, Passenger, Rider, Trip, User, Vin};
