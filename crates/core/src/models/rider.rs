use chrono::Duration;

use super::trip::{completed, Trip};

/// Passenger-side bookkeeping shared by users and drivers.
pub trait Rider {
    /// Trips this rider took as a passenger, in the order they were added.
    fn taken_trips(&self) -> &[Trip];

    /// Fares paid for completed trips.
    fn total_spent(&self) -> f64 {
        completed(self.taken_trips()).filter_map(Trip::cost).sum()
    }

    /// Time spent riding in completed trips.
    fn total_time_spent(&self) -> Duration {
        completed(self.taken_trips())
            .filter_map(Trip::duration)
            .fold(Duration::zero(), |total, elapsed| total + elapsed)
    }
}
