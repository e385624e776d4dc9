//! Local snapshot of the regional dataset
//!
//! Provides a `DataStore` that keeps the raw JSON payload and a fetch stamp
//! side by side in the data directory, refreshing both together.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;

use chrono::NaiveDateTime;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use super::gate::{is_stale, CacheStamp};
use crate::config::{PathConfig, SourceConfig};
use crate::data::{parse_dataset, Dataset, Fetcher};
use crate::error::{Error, Result};

/// Manages downloading, persisting, and loading the cached dataset
pub struct DataStore {
    /// Where the dataset and stamp live
    paths: PathConfig,
    /// Remote location of the dataset
    url: String,
    /// Strategy used to download the dataset
    fetcher: Box<dyn Fetcher>,
}

impl DataStore {
    /// Creates a store using the fetch strategy named in `source`
    pub fn new(paths: PathConfig, source: &SourceConfig) -> Self {
        Self::with_fetcher(paths, source.url.clone(), source.fetcher.build())
    }

    /// Creates a store with an explicit fetch strategy
    pub fn with_fetcher(paths: PathConfig, url: impl Into<String>, fetcher: Box<dyn Fetcher>) -> Self {
        Self {
            paths,
            url: url.into(),
            fetcher,
        }
    }

    pub fn paths(&self) -> &PathConfig {
        &self.paths
    }

    /// Reads the last fetch stamp
    ///
    /// Returns `None` if the stamp is missing or unreadable; a corrupt stamp
    /// simply makes the cache stale.
    pub fn read_stamp(&self) -> Option<CacheStamp> {
        let path = self.paths.stamp_path();
        let content = fs::read_to_string(&path).ok()?;
        match content.parse() {
            Ok(stamp) => Some(stamp),
            Err(e) => {
                warn!(path = %path.display(), "ignoring unreadable cache stamp: {}", e);
                None
            }
        }
    }

    /// Decides whether a download is needed before the dataset can be loaded
    pub fn needs_refresh(&self, now: NaiveDateTime, force: bool) -> bool {
        if !self.paths.dataset_path().exists() {
            debug!("no cached dataset on disk");
            return true;
        }
        let stamp = self.read_stamp();
        let stale = is_stale(stamp, now, force);
        debug!(?stamp, force, stale, "cache freshness decided");
        stale
    }

    /// Downloads and stores a new snapshot when `stale` is set
    ///
    /// The payload must parse as a dataset before anything is written. The
    /// dataset and the stamp are staged in uniquely named temporary files
    /// and only renamed into place once both were written. If the stamp
    /// cannot be replaced the previous dataset is put back, so a failed
    /// refresh leaves the previous snapshot untouched.
    ///
    /// # Returns
    /// * `Ok(true)` if a new snapshot was stored
    /// * `Ok(false)` if the cache was fresh and nothing was done
    pub async fn ensure_fresh(&self, stale: bool, now: NaiveDateTime) -> Result<bool> {
        if !stale {
            return Ok(false);
        }

        info!(url = %self.url, fetcher = self.fetcher.name(), "refreshing dataset");
        let body = self.fetcher.fetch(&self.url).await?;
        let records = parse_dataset(&body).map_err(|e| Error::InvalidPayload(e.to_string()))?;

        self.commit(&body, CacheStamp::from_datetime(now))?;
        info!(records = records.len(), "stored dataset snapshot");
        Ok(true)
    }

    /// Reads and parses the cached dataset
    pub fn load(&self) -> Result<Dataset> {
        let path = self.paths.dataset_path();
        let bytes = fs::read(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => Error::NotFound(path.clone()),
            _ => Error::io(format!("reading {}", path.display()), e),
        })?;
        parse_dataset(&bytes).map_err(|e| Error::CorruptCache {
            path,
            reason: e.to_string(),
        })
    }

    fn commit(&self, body: &[u8], stamp: CacheStamp) -> Result<()> {
        let data_dir = self.paths.data_dir();
        fs::create_dir_all(data_dir)
            .map_err(|e| Error::io(format!("creating {}", data_dir.display()), e))?;

        let dataset_path = self.paths.dataset_path();
        let stamp_path = self.paths.stamp_path();

        let staged_dataset = stage(data_dir, body)?;
        let staged_stamp = stage(data_dir, stamp.to_string().as_bytes())?;
        let previous = keep_previous(data_dir, &dataset_path)?;

        staged_dataset
            .persist(&dataset_path)
            .map_err(|e| Error::io(format!("replacing {}", dataset_path.display()), e.error))?;

        if let Err(e) = staged_stamp.persist(&stamp_path) {
            warn!(path = %stamp_path.display(), "stamp not replaced, restoring previous dataset");
            restore_previous(previous, &dataset_path);
            return Err(Error::io(format!("replacing {}", stamp_path.display()), e.error));
        }

        debug!(stamp = %stamp, "cache stamp updated");
        Ok(())
    }
}

/// Writes `contents` to a fresh temporary file next to its destination
fn stage(dir: &Path, contents: &[u8]) -> Result<NamedTempFile> {
    let context = || format!("staging in {}", dir.display());
    let mut file = NamedTempFile::new_in(dir).map_err(|e| Error::io(context(), e))?;
    file.write_all(contents)
        .and_then(|_| file.flush())
        .map_err(|e| Error::io(context(), e))?;
    Ok(file)
}

/// Copies the current dataset aside so it can be put back on failure
fn keep_previous(dir: &Path, dataset_path: &Path) -> Result<Option<NamedTempFile>> {
    if !dataset_path.exists() {
        return Ok(None);
    }
    let backup = NamedTempFile::new_in(dir)
        .map_err(|e| Error::io(format!("staging in {}", dir.display()), e))?;
    fs::copy(dataset_path, backup.path())
        .map_err(|e| Error::io(format!("backing up {}", dataset_path.display()), e))?;
    Ok(Some(backup))
}

fn restore_previous(previous: Option<NamedTempFile>, dataset_path: &Path) {
    let restored = match previous {
        Some(backup) => backup.persist(dataset_path).map(|_| ()).map_err(|e| e.error),
        None => fs::remove_file(dataset_path),
    };
    if let Err(e) = restored {
        warn!(path = %dataset_path.display(), "could not roll back dataset: {}", e);
    }
}
