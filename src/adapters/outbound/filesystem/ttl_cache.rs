use crate::shared::{InventoryError, Result};
use owo_colors::OwoColorize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Storage partition for a cache entry. Unrecognized endpoint types fall
/// back to [`CacheScope::General`] rather than erroring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheScope {
    Locations,
    Departments,
    Assets,
    Requesters,
    General,
}

impl CacheScope {
    pub const ALL: [CacheScope; 5] = [
        CacheScope::Locations,
        CacheScope::Departments,
        CacheScope::Assets,
        CacheScope::Requesters,
        CacheScope::General,
    ];

    /// Derives the partition from an endpoint's first path segment.
    pub fn from_endpoint(endpoint: &str) -> Self {
        let segment = endpoint
            .trim_start_matches('/')
            .split(['/', '?'])
            .next()
            .unwrap_or("");
        match segment {
            "locations" => CacheScope::Locations,
            "departments" => CacheScope::Departments,
            "assets" => CacheScope::Assets,
            "requesters" => CacheScope::Requesters,
            _ => CacheScope::General,
        }
    }

    pub fn dir_name(self) -> &'static str {
        match self {
            CacheScope::Locations => "locations",
            CacheScope::Departments => "departments",
            CacheScope::Assets => "assets",
            CacheScope::Requesters => "requesters",
            CacheScope::General => "general",
        }
    }
}

impl std::str::FromStr for CacheScope {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "locations" => Ok(CacheScope::Locations),
            "departments" => Ok(CacheScope::Departments),
            "assets" => Ok(CacheScope::Assets),
            "requesters" => Ok(CacheScope::Requesters),
            "general" => Ok(CacheScope::General),
            _ => Err(format!(
                "Invalid cache scope: {}. Valid scopes are locations, departments, assets, requesters, general",
                s
            )),
        }
    }
}

/// On-disk TTL cache: one directory per scope, one JSON file per sanitized
/// key, file modification time as the sole expiry signal.
///
/// Every read path fails soft: I/O errors, missing entries, expired entries
/// and corrupted payloads all report a miss. Expired and corrupted entries
/// are deleted on detection so the next lookup starts clean. Writes are
/// best-effort; a failed write is logged to stderr and the caller proceeds
/// as if nothing was cached.
pub struct TtlCache {
    root: PathBuf,
    max_age: Duration,
}

impl TtlCache {
    /// Creates the cache root and one subdirectory per scope.
    ///
    /// # Errors
    /// Directory creation failure is the one fatal cache condition; the
    /// process cannot run without a writable cache root.
    pub fn new(root: impl Into<PathBuf>, max_age: Duration) -> Result<Self> {
        let root = root.into();
        for scope in CacheScope::ALL {
            let dir = root.join(scope.dir_name());
            fs::create_dir_all(&dir).map_err(|e| InventoryError::CacheInit {
                path: dir,
                details: e.to_string(),
            })?;
        }
        Ok(Self { root, max_age })
    }

    /// Looks up a cached payload, honoring the configured max age.
    ///
    /// # Returns
    /// The cached JSON document, or `None` on miss, expiry, corruption or
    /// any I/O error.
    pub fn get(&self, key: &str, scope: CacheScope) -> Option<Value> {
        let path = self.entry_path(key, scope);
        let metadata = fs::metadata(&path).ok()?;

        let age = metadata.modified().ok()?.elapsed().unwrap_or_default();
        if age > self.max_age {
            let _ = fs::remove_file(&path);
            return None;
        }

        let raw = fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(_) => {
                // corrupted entry: self-heal by deleting it
                eprintln!(
                    "{}",
                    format!("Warning: removing corrupted cache entry '{key}'").yellow()
                );
                let _ = fs::remove_file(&path);
                None
            }
        }
    }

    /// Writes a payload to the cache. Best-effort: failures are logged and
    /// never propagated.
    pub fn set(&self, key: &str, payload: &Value, scope: CacheScope) {
        let path = self.entry_path(key, scope);
        let serialized = match serde_json::to_string(payload) {
            Ok(s) => s,
            Err(e) => {
                eprintln!(
                    "{}",
                    format!("Warning: could not serialize cache entry '{key}': {e}").yellow()
                );
                return;
            }
        };
        if let Err(e) = fs::write(&path, serialized) {
            eprintln!(
                "{}",
                format!("Warning: could not write cache entry '{key}': {e}").yellow()
            );
        }
    }

    /// Deletes every entry in the given scope, or in all scopes when `None`.
    pub fn clear(&self, scope: Option<CacheScope>) {
        match scope {
            Some(scope) => self.clear_dir(&self.root.join(scope.dir_name())),
            None => {
                for scope in CacheScope::ALL {
                    self.clear_dir(&self.root.join(scope.dir_name()));
                }
            }
        }
    }

    fn clear_dir(&self, dir: &Path) {
        let Ok(entries) = fs::read_dir(dir) else {
            return;
        };
        for entry in entries.flatten() {
            if entry.path().is_file() {
                let _ = fs::remove_file(entry.path());
            }
        }
    }

    fn entry_path(&self, key: &str, scope: CacheScope) -> PathBuf {
        self.root
            .join(scope.dir_name())
            .join(format!("{}.json", sanitize_key(key)))
    }
}

/// Replaces path separators so a key is always a single file name and never
/// escapes its partition directory.
fn sanitize_key(key: &str) -> String {
    key.replace(['/', '\\'], "_")
}
