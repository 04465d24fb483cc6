//! Filesystem-backed cache store.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::CacheResult;
use crate::key::CacheKey;

/// Envelope written to disk around every cached value.
#[derive(Debug, Serialize, Deserialize)]
pub struct Entry<T> {
    pub key: String,
    pub namespace: String,
    pub created_at: DateTime<Utc>,
    pub value: T,
}

/// Per-namespace entry counts plus total size on disk.
#[derive(Debug, Default, Serialize)]
pub struct CacheStats {
    pub namespaces: Vec<(String, usize)>,
    pub total_entries: usize,
    pub total_bytes: u64,
}

/// Cache rooted at a directory, one subdirectory per namespace.
///
/// `get` treats missing, unreadable, or corrupt entries as misses. `set`
/// logs failures and returns, so callers never have to handle cache errors
/// on their hot path.
#[derive(Debug, Clone)]
pub struct CacheStore {
    root: PathBuf,
    enabled: bool,
}

impl CacheStore {
    pub fn new(root: impl Into<PathBuf>, enabled: bool) -> Self {
        Self {
            root: root.into(),
            enabled,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn entry_path(&self, namespace: &str, key: &CacheKey) -> PathBuf {
        self.root.join(namespace).join(format!("{key}.json"))
    }

    /// Fetch a cached value, or `None` on miss.
    pub fn get<T: DeserializeOwned>(&self, namespace: &str, key: &CacheKey) -> Option<T> {
        if !self.enabled {
            return None;
        }
        let path = self.entry_path(namespace, key);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    debug!(namespace, key = %key.short(), error = %e, "cache read failed");
                }
                return None;
            }
        };
        match serde_json::from_str::<Entry<T>>(&raw) {
            Ok(entry) => {
                debug!(namespace, key = %key.short(), "cache hit");
                Some(entry.value)
            }
            Err(e) => {
                debug!(namespace, key = %key.short(), error = %e, "corrupt cache entry, treating as miss");
                None
            }
        }
    }

    /// Store a value. Failures are logged, never propagated.
    pub fn set<T: Serialize>(&self, namespace: &str, key: &CacheKey, value: &T) {
        if !self.enabled {
            return;
        }
        if let Err(e) = self.try_set(namespace, key, value) {
            warn!(namespace, key = %key.short(), error = %e, "cache write failed");
        }
    }

    fn try_set<T: Serialize>(&self, namespace: &str, key: &CacheKey, value: &T) -> CacheResult<()> {
        let dir = self.root.join(namespace);
        fs::create_dir_all(&dir)?;
        let entry = Entry {
            key: key.to_string(),
            namespace: namespace.to_string(),
            created_at: Utc::now(),
            value,
        };
        let path = self.entry_path(namespace, key);
        fs::write(&path, serde_json::to_string_pretty(&entry)?)?;
        debug!(namespace, key = %key.short(), "cache write");
        Ok(())
    }

    /// Delete one namespace, or everything when `namespace` is `None`.
    /// Returns the number of entries removed. Missing directories count as
    /// zero rather than an error, so clearing is idempotent.
    pub fn clear(&self, namespace: Option<&str>) -> CacheResult<usize> {
        let mut removed = 0;
        let dirs: Vec<PathBuf> = match namespace {
            Some(ns) => vec![self.root.join(ns)],
            None => match fs::read_dir(&self.root) {
                Ok(read) => read
                    .filter_map(|e| e.ok())
                    .map(|e| e.path())
                    .filter(|p| p.is_dir())
                    .collect(),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
                Err(e) => return Err(e.into()),
            },
        };
        for dir in dirs {
            match fs::read_dir(&dir) {
                Ok(read) => {
                    for entry in read.filter_map(|e| e.ok()) {
                        if entry.path().is_file() {
                            fs::remove_file(entry.path())?;
                            removed += 1;
                        }
                    }
                    let _ = fs::remove_dir(&dir);
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        debug!(removed, "cache cleared");
        Ok(removed)
    }

    /// Walk the cache root and report entry counts and total size.
    pub fn stats(&self) -> CacheResult<CacheStats> {
        let mut stats = CacheStats::default();
        let read = match fs::read_dir(&self.root) {
            Ok(read) => read,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(stats),
            Err(e) => return Err(e.into()),
        };
        for ns_entry in read.filter_map(|e| e.ok()) {
            if !ns_entry.path().is_dir() {
                continue;
            }
            let ns = ns_entry.file_name().to_string_lossy().into_owned();
            let mut count = 0;
            for file in fs::read_dir(ns_entry.path())?.filter_map(|e| e.ok()) {
                if file.path().is_file() {
                    count += 1;
                    stats.total_bytes += file.metadata()?.len();
                }
            }
            stats.total_entries += count;
            stats.namespaces.push((ns, count));
        }
        stats.namespaces.sort();
        Ok(stats)
    }

    /// Path for a binary sidecar artifact (e.g. rendered audio) keyed the
    /// same way as JSON entries but kept with its native extension. The
    /// target directory is created so callers can write to the returned
    /// path directly; creation failures are logged, matching `set`.
    pub fn audio_path_for(&self, key: &CacheKey, ext: &str) -> PathBuf {
        let dir = self.root.join("tts");
        if let Err(e) = fs::create_dir_all(&dir) {
            warn!(error = %e, "failed to create audio cache directory");
        }
        dir.join(format!("{key}.{ext}"))
    }

    pub fn has_audio(&self, key: &CacheKey, ext: &str) -> bool {
        self.enabled && self.audio_path_for(key, ext).is_file()
    }
}
