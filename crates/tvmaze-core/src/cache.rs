//! Local show cache
//!
//! Previously viewed shows are kept as whole `ShowBundle` records so that
//! selecting them again needs no network round-trip. The cache is an
//! injected abstraction: `MemoryCache` lives for the process, while
//! `JsonFileCache` persists every record in a single JSON file.
//!
//! There is no expiry and no eviction; the store grows with every show
//! viewed.

use std::collections::{BTreeMap, HashMap};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::error::{Result, TvMazeError};
use crate::types::ShowBundle;

/// Default file name of the persistent cache slot
pub const DEFAULT_CACHE_FILE: &str = "tvmaze-cache.json";

/// Key-value store of show bundles keyed by show id.
///
/// Records are written whole: a reader never observes a bundle that is
/// only partly updated.
pub trait ShowCache: Send + Sync {
    /// Whether a record exists for `id`.
    fn has(&self, id: u32) -> bool;

    /// The record stored for `id`, if any.
    fn get(&self, id: u32) -> Option<ShowBundle>;

    /// Store `bundle` under `id`, replacing any previous record.
    ///
    /// File-backed caches write to disk before returning; async callers
    /// should run this on a blocking thread (`tokio::task::spawn_blocking`).
    fn put(&self, id: u32, bundle: ShowBundle) -> Result<()>;
}

/// In-process cache, lost when the process exits
#[derive(Debug, Default)]
pub struct MemoryCache {
    records: RwLock<HashMap<u32, ShowBundle>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ShowCache for MemoryCache {
    fn has(&self, id: u32) -> bool {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&id)
    }

    fn get(&self, id: u32) -> Option<ShowBundle> {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
    }

    fn put(&self, id: u32, bundle: ShowBundle) -> Result<()> {
        self.records
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, bundle);
        Ok(())
    }
}

/// Cache persisted as one JSON object in a single file.
///
/// The file holds `{"<show id>": {"show": …, "episodes": […], "cast": […]}}`.
/// It is read once when the cache is opened; every `put` rewrites the whole
/// file through a temporary file that is renamed into place.
#[derive(Debug)]
pub struct JsonFileCache {
    path: PathBuf,
    records: RwLock<BTreeMap<String, ShowBundle>>,
}

impl JsonFileCache {
    /// Open the cache stored at `path`.
    ///
    /// A missing file yields an empty cache. An unreadable or malformed
    /// file is logged and also treated as empty; it is overwritten by the
    /// next `put`.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let records = load_records(&path);

        debug!(path = %path.display(), records = records.len(), "opened show cache");
        Self {
            path,
            records: RwLock::new(records),
        }
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of cached shows
    pub fn len(&self) -> usize {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn write_file(&self, records: &BTreeMap<String, ShowBundle>) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir).map_err(cache_error)?;

        let json = serde_json::to_vec(records)?;
        let mut file = NamedTempFile::new_in(dir).map_err(cache_error)?;
        file.write_all(&json).map_err(cache_error)?;
        file.as_file().sync_all().map_err(cache_error)?;
        file.persist(&self.path).map_err(|e| cache_error(e.error))?;

        Ok(())
    }
}

impl ShowCache for JsonFileCache {
    fn has(&self, id: u32) -> bool {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&id.to_string())
    }

    fn get(&self, id: u32) -> Option<ShowBundle> {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id.to_string())
            .cloned()
    }

    fn put(&self, id: u32, bundle: ShowBundle) -> Result<()> {
        // Held for the whole write so concurrent puts cannot interleave files.
        let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);

        let mut updated = records.clone();
        updated.insert(id.to_string(), bundle);
        self.write_file(&updated)?;

        *records = updated;
        debug!(id, path = %self.path.display(), "cached show");
        Ok(())
    }
}

fn load_records(path: &Path) -> BTreeMap<String, ShowBundle> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return BTreeMap::new(),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "could not read show cache, starting empty");
            return BTreeMap::new();
        }
    };

    serde_json::from_str(&contents).unwrap_or_else(|e| {
        warn!(path = %path.display(), error = %e, "malformed show cache, starting empty");
        BTreeMap::new()
    })
}

fn cache_error(err: std::io::Error) -> TvMazeError {
    TvMazeError::Cache(err.to_string())
}
