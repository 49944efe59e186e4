use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use notify::{Event, EventKind, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{debug, info};

use super::{Fleet, FleetLoader};

/// Outcome of reloading the fleet document after a change on disk.
#[derive(Debug)]
pub enum FleetEvent {
    /// The document was read and validated.
    Reloaded(Fleet),
    /// The document was removed.
    Missing,
    /// Reading or validating the document failed.
    Error(anyhow::Error),
}

/// Watches a fleet document and reloads it whenever it changes.
pub struct FleetWatcher {
    loader: FleetLoader,
}

impl FleetWatcher {
    /// Watch the document at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            loader: FleetLoader::new(path),
        }
    }

    /// Run until the receiving side of `sender` is dropped.
    ///
    /// The parent directory is watched rather than the file itself so editors
    /// that save by replacing the file are still picked up.
    pub async fn run(self, sender: mpsc::Sender<FleetEvent>) -> Result<()> {
        let (raw_tx, mut raw_rx) = mpsc::channel::<notify::Result<Event>>(32);
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            let _ = raw_tx.blocking_send(res);
        })
        .context("failed to create fleet watcher")?;

        let directory = self.watch_directory();
        watcher
            .watch(&directory, RecursiveMode::NonRecursive)
            .with_context(|| format!("failed to watch {}", directory.display()))?;
        info!(path = %self.loader.path().display(), "watching fleet document");

        loop {
            let res = tokio::select! {
                _ = sender.closed() => break,
                res = raw_rx.recv() => match res {
                    Some(res) => res,
                    None => break,
                },
            };
            let event = match res {
                Ok(event) if self.is_relevant(&event) => {
                    debug!(kind = ?event.kind, "fleet document changed");
                    match self.loader.load_async().await {
                        Ok(Some(fleet)) => FleetEvent::Reloaded(fleet),
                        Ok(None) => FleetEvent::Missing,
                        Err(err) => FleetEvent::Error(err),
                    }
                }
                Ok(_) => continue,
                Err(err) => FleetEvent::Error(err.into()),
            };
            if sender.send(event).await.is_err() {
                break;
            }
        }

        debug!(path = %self.loader.path().display(), "fleet watcher stopped");
        Ok(())
    }

    fn watch_directory(&self) -> PathBuf {
        match self.loader.path().parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    fn is_relevant(&self, event: &Event) -> bool {
        matches!(
            event.kind,
            EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
        ) && event
            .paths
            .iter()
            .any(|path| same_file_name(path, self.loader.path()))
    }
}

fn same_file_name(a: &Path, b: &Path) -> bool {
    a.file_name().is_some() && a.file_name() == b.file_name()
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{AccessKind, CreateKind, ModifyKind};
    use std::{fs, time::Duration};
    use tempfile::tempdir;
    use tokio::time::timeout;

    #[test]
    fn only_changes_to_the_document_are_relevant() {
        let watcher = FleetWatcher::new("/data/fleet.json");
        let modify = Event::new(EventKind::Modify(ModifyKind::Any))
            .add_path(PathBuf::from("/data/fleet.json"));
        assert!(watcher.is_relevant(&modify));

        let other = Event::new(EventKind::Create(CreateKind::File))
            .add_path(PathBuf::from("/data/notes.txt"));
        assert!(!watcher.is_relevant(&other));

        let access = Event::new(EventKind::Access(AccessKind::Any))
            .add_path(PathBuf::from("/data/fleet.json"));
        assert!(!watcher.is_relevant(&access));
    }

    #[test]
    fn bare_file_names_watch_the_current_directory() {
        let watcher = FleetWatcher::new("fleet.json");
        assert_eq!(watcher.watch_directory(), PathBuf::from("."));
        let nested = FleetWatcher::new("/data/fleet.json");
        assert_eq!(nested.watch_directory(), PathBuf::from("/data"));
    }

    #[tokio::test]
    async fn reloads_after_write() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("fleet.json");
        let (tx, mut rx) = mpsc::channel(8);
        let handle = tokio::spawn(FleetWatcher::new(&path).run(tx));
        tokio::time::sleep(Duration::from_millis(200)).await;

        fs::write(
            &path,
            r#"{"drivers": [{"id": 3, "name": "Lovelace", "vin": "12345678912345678"}]}"#,
        )?;

        let fleet = loop {
            match timeout(Duration::from_secs(5), rx.recv()).await? {
                Some(FleetEvent::Reloaded(fleet)) => break fleet,
                Some(_) => continue,
                None => anyhow::bail!("watcher stopped"),
            }
        };
        assert!(fleet.driver(3).is_some());

        drop(rx);
        timeout(Duration::from_secs(5), handle).await???;
        Ok(())
    }

    #[tokio::test]
    async fn stops_once_the_receiver_is_gone() -> Result<()> {
        let dir = tempdir()?;
        let (tx, rx) = mpsc::channel(8);
        let handle = tokio::spawn(FleetWatcher::new(dir.path().join("fleet.json")).run(tx));
        tokio::time::sleep(Duration::from_millis(200)).await;

        drop(rx);
        timeout(Duration::from_secs(3), handle)
            .await
            .context("watcher kept running after its receiver was dropped")???;
        Ok(())
    }
}
