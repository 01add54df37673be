//! Community snapshot stored as a single pretty-printed JSON file.

use leap_application::ports::snapshot_repository::{SnapshotRepository, StoreError};
use leap_domain::CommunitySnapshot;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// [`SnapshotRepository`] over one JSON document on disk.
///
/// Writes go to a sibling temp file which is then renamed over the target,
/// so a crash mid-write leaves the previous snapshot intact.
pub struct JsonFileSnapshotRepository {
    path: PathBuf,
}

impl JsonFileSnapshotRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, e: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.display().to_string(),
            message: e.to_string(),
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "community.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl SnapshotRepository for JsonFileSnapshotRepository {
    fn load(&self) -> Result<Option<CommunitySnapshot>, StoreError> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error(e)),
        };

        if text.trim().is_empty() {
            return Ok(None);
        }

        let snapshot = serde_json::from_str(&text)
            .map_err(|e| StoreError::Corrupt(format!("{}: {}", self.path.display(), e)))?;
        debug!("Loaded community snapshot from {}", self.path.display());
        Ok(Some(snapshot))
    }

    fn save(&self, snapshot: &CommunitySnapshot) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let json = serde_json::to_string_pretty(snapshot)
            .map_err(|e| StoreError::Corrupt(e.to_string()))?;

        let temp = self.temp_path();
        std::fs::write(&temp, json).map_err(|e| self.io_error(e))?;
        std::fs::rename(&temp, &self.path).map_err(|e| self.io_error(e))?;

        debug!("Saved community snapshot to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_loads_none() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileSnapshotRepository::new(dir.path().join("community.json"));
        assert!(repo.load().unwrap().is_none());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileSnapshotRepository::new(dir.path().join("nested").join("community.json"));

        let snapshot = CommunitySnapshot::seed();
        repo.save(&snapshot).unwrap();

        let loaded = repo.load().unwrap().unwrap();
        assert_eq!(loaded, snapshot);
        assert!(!repo.temp_path().exists());
    }

    #[test]
    fn test_save_replaces_previous_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileSnapshotRepository::new(dir.path().join("community.json"));

        repo.save(&CommunitySnapshot::seed()).unwrap();
        repo.save(&CommunitySnapshot::default()).unwrap();

        let loaded = repo.load().unwrap().unwrap();
        assert!(loaded.users.is_empty());
    }

    #[test]
    fn test_garbage_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("community.json");
        std::fs::write(&path, "{ not json").unwrap();

        let repo = JsonFileSnapshotRepository::new(&path);
        assert!(matches!(repo.load(), Err(StoreError::Corrupt(_))));
    }
}
