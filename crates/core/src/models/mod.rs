//! Shared domain models.
//!
//! Entities are built once from validated fields and only ever grow through
//! their `add_*` association methods. Trips refer to drivers and riders by id,
//! and each list a trip belongs to holds its own copy.

mod driver;
mod rider;
mod trip;
mod user;

pub use driver::{Driver, DriverStatus, Vin, DRIVER_SHARE, TRIP_FEE};
pub use rider::Rider;
pub use trip::{completed, Passenger, Trip};
pub use user::User;
