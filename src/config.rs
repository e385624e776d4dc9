//! Runtime configuration
//!
//! Everything that used to be a fixed location is resolved once at startup
//! and handed to the components that need it.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::data::{FetcherKind, DEFAULT_SOURCE_URL};

/// Name of the cached dataset file
pub const DATASET_FILE: &str = "dati-regioni.json";

/// Name of the file holding the last fetch stamp
pub const STAMP_FILE: &str = "last_update";

/// Name of the directory saved charts go into
pub const IMAGES_DIR: &str = "imgs";

/// Filesystem locations used by the store and the image writer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathConfig {
    /// Directory holding the dataset, the stamp, and saved images
    data_dir: PathBuf,
}

impl PathConfig {
    /// Uses the XDG-compliant data directory for coronagraph
    ///
    /// `~/.local/share/coronagraph/` on Linux. Returns `None` when no home
    /// directory can be determined.
    pub fn new() -> Option<Self> {
        let project_dirs = ProjectDirs::from("", "", "coronagraph")?;
        Some(Self::with_dir(project_dirs.data_dir().to_path_buf()))
    }

    /// Uses a custom data directory
    pub fn with_dir(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn dataset_path(&self) -> PathBuf {
        self.data_dir.join(DATASET_FILE)
    }

    pub fn stamp_path(&self) -> PathBuf {
        self.data_dir.join(STAMP_FILE)
    }

    pub fn images_dir(&self) -> PathBuf {
        self.data_dir.join(IMAGES_DIR)
    }
}

/// Where and how the dataset is downloaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    pub url: String,
    pub fetcher: FetcherKind,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SOURCE_URL.to_string(),
            fetcher: FetcherKind::Http,
        }
    }
}
