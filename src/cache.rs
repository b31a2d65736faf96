// 🗄️ Dataset Cache - Explicit, invalidated by the source file's fingerprint
//
// Held by the presentation layer (one per dataset). Readers share the
// loaded records through an Arc; a reload swaps the Arc under the lock.

use crate::loader::{load_records, LoaderConfig};
use crate::record::Record;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use std::time::SystemTime;
use tracing::{debug, info};

/// What identifies one version of the source file on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Fingerprint {
    modified: SystemTime,
    len: u64,
}

impl Fingerprint {
    fn of(path: &Path) -> Result<Self> {
        let meta = std::fs::metadata(path)
            .with_context(|| format!("Failed to stat dataset: {:?}", path))?;
        Ok(Fingerprint {
            modified: meta.modified().context("Filesystem does not report mtime")?,
            len: meta.len(),
        })
    }
}

struct Snapshot {
    fingerprint: Fingerprint,
    records: Arc<Vec<Record>>,
    rows_dropped: usize,
    loaded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SnapshotInfo {
    pub path: String,
    pub record_count: usize,
    pub rows_dropped: usize,
    pub loaded_at: DateTime<Utc>,
}

pub struct DatasetCache {
    path: PathBuf,
    config: LoaderConfig,
    snapshot: RwLock<Option<Snapshot>>,
}

impl DatasetCache {
    pub fn new(path: impl Into<PathBuf>, config: LoaderConfig) -> Self {
        DatasetCache {
            path: path.into(),
            config,
            snapshot: RwLock::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current records, reloading if the file changed since the last load
    pub fn records(&self) -> Result<Arc<Vec<Record>>> {
        let current = Fingerprint::of(&self.path)?;

        {
            let guard = self
                .snapshot
                .read()
                .map_err(|_| anyhow::anyhow!("dataset cache lock poisoned"))?;
            if let Some(snapshot) = guard.as_ref() {
                if snapshot.fingerprint == current {
                    return Ok(Arc::clone(&snapshot.records));
                }
                debug!(path = %self.path.display(), "dataset changed on disk");
            }
        }

        let mut guard = self
            .snapshot
            .write()
            .map_err(|_| anyhow::anyhow!("dataset cache lock poisoned"))?;

        // Another caller may have reloaded while we waited for the write lock
        if let Some(snapshot) = guard.as_ref() {
            if snapshot.fingerprint == current {
                return Ok(Arc::clone(&snapshot.records));
            }
        }

        let report = load_records(&self.path, &self.config)?;
        let records = Arc::new(report.records);
        info!(
            path = %self.path.display(),
            records = records.len(),
            "dataset cache refreshed"
        );

        *guard = Some(Snapshot {
            fingerprint: current,
            records: Arc::clone(&records),
            rows_dropped: report.rows_dropped,
            loaded_at: Utc::now(),
        });

        Ok(records)
    }

    /// Drop the cached snapshot; the next `records()` call reloads
    pub fn invalidate(&self) {
        // A poisoned lock still holds a usable Option; clear it regardless
        let mut guard = self
            .snapshot
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = None;
    }

    pub fn is_loaded(&self) -> bool {
        self.snapshot
            .read()
            .map(|guard| guard.is_some())
            .unwrap_or(false)
    }

    pub fn snapshot_info(&self) -> Option<SnapshotInfo> {
        let guard = self.snapshot.read().ok()?;
        guard.as_ref().map(|s| SnapshotInfo {
            path: self.path.display().to_string(),
            record_count: s.records.len(),
            rows_dropped: s.rows_dropped,
            loaded_at: s.loaded_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str = "Name,NetWorth,Age,Country\n";

    fn write_csv(path: &Path, rows: &[&str]) {
        let mut file = std::fs::File::create(path).unwrap();
        file.write_all(HEADER.as_bytes()).unwrap();
        for row in rows {
            writeln!(file, "{}", row).unwrap();
        }
    }

    #[test]
    fn test_loads_lazily_and_reuses_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("billionaires.csv");
        write_csv(&path, &["A,$10 B,40,Peru", "B,$5 B,55,Chile"]);

        let cache = DatasetCache::new(&path, LoaderConfig::default());
        assert!(!cache.is_loaded());

        let first = cache.records().unwrap();
        let second = cache.records().unwrap();

        assert_eq!(first.len(), 2);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.snapshot_info().unwrap().record_count, 2);
    }

    #[test]
    fn test_reloads_when_file_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("billionaires.csv");
        write_csv(&path, &["A,$10 B,40,Peru"]);

        let cache = DatasetCache::new(&path, LoaderConfig::default());
        assert_eq!(cache.records().unwrap().len(), 1);

        // Length changes even if the mtime granularity hides the rewrite
        write_csv(&path, &["A,$10 B,40,Peru", "B,$5 B,55,Chile", "C,$1 B,,Chile"]);

        let reloaded = cache.records().unwrap();
        assert_eq!(reloaded.len(), 2);
        assert_eq!(cache.snapshot_info().unwrap().rows_dropped, 1);
    }

    #[test]
    fn test_invalidate_forces_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("billionaires.csv");
        write_csv(&path, &["A,$10 B,40,Peru"]);

        let cache = DatasetCache::new(&path, LoaderConfig::default());
        let first = cache.records().unwrap();

        cache.invalidate();
        assert!(!cache.is_loaded());

        let second = cache.records().unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_invalidate_recovers_poisoned_lock() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("billionaires.csv");
        write_csv(&path, &["A,$10 B,40,Peru"]);

        let cache = Arc::new(DatasetCache::new(&path, LoaderConfig::default()));
        cache.records().unwrap();

        let poisoner = Arc::clone(&cache);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.snapshot.write().unwrap();
            panic!("poison the snapshot lock");
        })
        .join();
        assert!(cache.snapshot.is_poisoned());

        cache.invalidate();

        let guard = cache.snapshot.read().unwrap_or_else(|p| p.into_inner());
        assert!(guard.is_none());
    }

    #[test]
    fn test_missing_file_is_error() {
        let cache = DatasetCache::new("/nonexistent/billionaires.csv", LoaderConfig::default());
        assert!(cache.records().is_err());
        assert!(cache.snapshot_info().is_none());
    }
}
