use std::{
    fs, io,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use tracing::info;

use super::{Fleet, FleetDocument};

/// Reads fleet documents from a fixed path.
#[derive(Debug, Clone)]
pub struct FleetLoader {
    path: PathBuf,
}

impl FleetLoader {
    /// Create a loader for the document at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the fleet document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the document, returning `None` if it does not exist.
    pub fn load(&self) -> Result<Option<Fleet>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read fleet {}", self.path.display()))?;
        self.parse(&contents).map(Some)
    }

    /// Load the document without blocking the runtime, returning `None` if it
    /// does not exist.
    pub async fn load_async(&self) -> Result<Option<Fleet>> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("failed to read fleet {}", self.path.display()))
            }
        };
        self.parse(&contents).map(Some)
    }

    fn parse(&self, contents: &str) -> Result<Fleet> {
        let fleet = parse_fleet(contents)
            .with_context(|| format!("failed to load fleet {}", self.path.display()))?;
        info!(
            path = %self.path.display(),
            drivers = fleet.drivers().count(),
            trips = fleet.trip_count(),
            "fleet loaded"
        );
        Ok(fleet)
    }
}

/// Parse and validate a fleet document held in memory.
pub fn parse_fleet(contents: &str) -> Result<Fleet> {
    let document: FleetDocument =
        serde_json::from_str(contents).context("failed to parse fleet document")?;
    let fleet = Fleet::from_document(document).context("invalid fleet document")?;
    Ok(fleet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RideShareError;
    use tempfile::tempdir;

    const FLEET: &str = r#"{
        "users": [{"id": 1, "name": "Ada", "phone": "412-432-7640"}],
        "drivers": [{"id": 3, "name": "Lovelace", "vin": "12345678912345678"}],
        "trips": [
            {"id": 8, "driver_id": 3, "passenger": {"kind": "user", "id": 1},
             "start_time": "2016-08-08T00:00:00Z", "end_time": "2016-08-09T00:00:00Z",
             "cost": 20.0, "rating": 5}
        ]
    }"#;

    #[test]
    fn missing_file_is_none() -> Result<()> {
        let dir = tempdir()?;
        let loader = FleetLoader::new(dir.path().join("fleet.json"));
        assert!(loader.load()?.is_none());
        Ok(())
    }

    #[test]
    fn loads_fleet_from_disk() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("fleet.json");
        fs::write(&path, FLEET)?;

        let fleet = FleetLoader::new(&path).load()?.expect("fleet present");
        let driver = fleet.driver(3).expect("driver 3");
        assert_eq!(driver.driven_trips().len(), 1);
        assert_eq!(driver.total_revenue(), 14.68);
        Ok(())
    }

    #[tokio::test]
    async fn async_load_reads_the_same_document() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("fleet.json");
        let loader = FleetLoader::new(&path);
        assert!(loader.load_async().await?.is_none());

        fs::write(&path, FLEET)?;
        let fleet = loader.load_async().await?.expect("fleet present");
        assert_eq!(fleet.trip_count(), 1);
        assert_eq!(fleet.user(1).map(|user| user.requested_trips().len()), Some(1));

        fs::write(&path, "{ not json")?;
        let err = loader.load_async().await.expect_err("parse failure");
        assert!(format!("{err:#}").contains("fleet.json"));
        Ok(())
    }

    #[test]
    fn errors_name_the_file() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json")?;

        let err = FleetLoader::new(&path).load().expect_err("parse failure");
        assert!(format!("{err:#}").contains("broken.json"));
        Ok(())
    }

    #[test]
    fn demo_fleet_is_valid() -> Result<()> {
        let fleet = parse_fleet(include_str!("../../../../demos/fleet.json"))?;
        assert_eq!(fleet.drivers().count(), 3);
        assert_eq!(fleet.users().count(), 2);
        assert_eq!(fleet.trip_count(), 6);
        assert_eq!(fleet.in_progress_count(), 1);
        Ok(())
    }

    #[test]
    fn validation_errors_keep_their_cause() {
        let err = parse_fleet(
            r#"{"drivers": [{"id": 0, "name": "George", "vin": "33133313331333133"}]}"#,
        )
        .expect_err("invalid id");
        assert_eq!(
            err.downcast_ref::<RideShareError>(),
            Some(&RideShareError::InvalidId {
                entity: "driver",
                id: 0,
            })
        );
    }
}
