//! On-disk response cache keyed by request URL.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

/// Cached response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Full request URL; compared on lookup so hash collisions read as misses.
    pub url: String,
    pub body: Value,
    pub cached_at: String,
}

/// File-backed response cache, one JSON file per URL.
///
/// Reference documents are static rules text, so entries never expire.
/// Delete the directory to force a refetch.
#[derive(Debug, Clone)]
pub struct ResponseCache {
    cache_dir: PathBuf,
}

impl ResponseCache {
    pub fn new(cache_dir: PathBuf) -> Self {
        Self { cache_dir }
    }

    /// Default cache directory (~/.cache/monster-fighter/).
    pub fn default_dir() -> PathBuf {
        dirs_cache_dir().join("monster-fighter")
    }

    pub fn dir(&self) -> &PathBuf {
        &self.cache_dir
    }

    /// Looks up the body cached for `url`.
    pub fn get(&self, url: &str) -> Option<Value> {
        let path = self.entry_path(url);
        let raw = fs::read_to_string(&path).ok()?;
        let entry: CacheEntry = serde_json::from_str(&raw).ok()?;
        if entry.url == url {
            debug!(url, "Response cache hit");
            Some(entry.body)
        } else {
            None
        }
    }

    /// Stores a response body. Failures are logged and otherwise ignored.
    pub fn put(&self, url: &str, body: &Value) {
        if let Err(err) = fs::create_dir_all(&self.cache_dir) {
            warn!(dir = %self.cache_dir.display(), error = %err, "Cannot create cache directory");
            return;
        }

        let entry = CacheEntry {
            url: url.to_string(),
            body: body.clone(),
            cached_at: chrono::Utc::now().to_rfc3339(),
        };

        let path = self.entry_path(url);
        match serde_json::to_string(&entry) {
            Ok(json) => {
                if let Err(err) = fs::write(&path, json) {
                    warn!(path = %path.display(), error = %err, "Cannot write cache entry");
                }
            }
            Err(err) => warn!(url, error = %err, "Cannot serialize cache entry"),
        }
    }

    fn entry_path(&self, url: &str) -> PathBuf {
        let digest = Sha256::digest(url.as_bytes());
        let name: String = digest.iter().map(|byte| format!("{byte:02x}")).collect();
        self.cache_dir.join(format!("{name}.json"))
    }
}

fn dirs_cache_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CACHE_HOME") {
        return PathBuf::from(xdg);
    }
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".cache");
    }
    std::env::temp_dir()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cache_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ResponseCache::new(dir.path().join("responses"));
        let url = "https://www.dnd5eapi.co/api/2014/races/elf";
        let body = json!({ "index": "elf", "name": "Elf" });

        assert!(cache.get(url).is_none());
        cache.put(url, &body);
        assert_eq!(cache.get(url), Some(body));
    }

    #[test]
    fn test_distinct_urls_use_distinct_files() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ResponseCache::new(dir.path().to_path_buf());
        cache.put("https://example.test/a", &json!(1));
        cache.put("https://example.test/b", &json!(2));

        assert_eq!(cache.get("https://example.test/a"), Some(json!(1)));
        assert_eq!(cache.get("https://example.test/b"), Some(json!(2)));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[test]
    fn test_url_mismatch_reads_as_miss() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ResponseCache::new(dir.path().to_path_buf());
        let url = "https://example.test/races";
        cache.put(url, &json!({ "count": 0 }));

        // Overwrite the entry with a body recorded for another URL.
        let path = cache.entry_path(url);
        let forged = CacheEntry {
            url: "https://example.test/other".into(),
            body: json!({ "count": 9 }),
            cached_at: "2024-01-01T00:00:00Z".into(),
        };
        fs::write(&path, serde_json::to_string(&forged).unwrap()).unwrap();

        assert!(cache.get(url).is_none());
    }

    #[test]
    fn test_corrupt_entry_reads_as_miss() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ResponseCache::new(dir.path().to_path_buf());
        let url = "https://example.test/broken";
        fs::write(cache.entry_path(url), "{ not json").unwrap();
        assert!(cache.get(url).is_none());
    }
}
