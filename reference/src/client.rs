//! Reference-data access.
//!
//! [`ReferenceSource`] is the seam between the application and the D&D 5e
//! REST service: everything above it works on `serde_json::Value` documents
//! and can be driven by an in-memory source in tests.
//! [`HttpReferenceClient`] is the production implementation.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::cache::ResponseCache;
use crate::config::FighterConfig;
use crate::error::{ReferenceError, Result};

/// Entry of a list endpoint's `results` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiReference {
    pub index: String,
    pub name: String,
    #[serde(default)]
    pub url: String,
}

/// Converts a display name into the service's index form.
///
/// # Examples
///
/// ```
/// use monster_fighter_reference::index_for_name;
///
/// assert_eq!(index_for_name("Half-Elf"), "half-elf");
/// assert_eq!(index_for_name("Adult Red Dragon"), "adult-red-dragon");
/// ```
pub fn index_for_name(name: &str) -> String {
    name.trim()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
}

/// Read access to reference documents.
///
/// Implementors only provide [`get_json`](ReferenceSource::get_json); the
/// typed helpers build the service's paths on top of it.
pub trait ReferenceSource: Send + Sync {
    /// Fetches the document at `path` relative to the API root
    /// (e.g. `"classes/fighter"`).
    fn get_json(&self, path: &str) -> Result<Value>;

    fn list(&self, path: &str) -> Result<Vec<ApiReference>> {
        let document = self.get_json(path)?;
        let results = document
            .get("results")
            .cloned()
            .ok_or_else(|| ReferenceError::MissingField {
                context: path.to_string(),
                field: "results",
            })?;
        Ok(serde_json::from_value(results)?)
    }

    fn list_races(&self) -> Result<Vec<ApiReference>> {
        self.list("races")
    }

    fn list_classes(&self) -> Result<Vec<ApiReference>> {
        self.list("classes")
    }

    fn list_monsters(&self) -> Result<Vec<ApiReference>> {
        self.list("monsters")
    }

    fn race(&self, index: &str) -> Result<Value> {
        self.get_json(&format!("races/{index}"))
    }

    fn subrace(&self, index: &str) -> Result<Value> {
        self.get_json(&format!("subraces/{index}"))
    }

    fn class(&self, index: &str) -> Result<Value> {
        self.get_json(&format!("classes/{index}"))
    }

    fn subclass(&self, index: &str) -> Result<Value> {
        self.get_json(&format!("subclasses/{index}"))
    }

    fn monster(&self, index: &str) -> Result<Value> {
        self.get_json(&format!("monsters/{index}"))
    }

    fn spell(&self, index: &str) -> Result<Value> {
        self.get_json(&format!("spells/{index}"))
    }
}

/// Blocking HTTP client for the reference service.
///
/// Successful responses are memoized for the lifetime of the client and,
/// when a [`ResponseCache`] is attached, persisted across runs.
pub struct HttpReferenceClient {
    http: reqwest::blocking::Client,
    base_url: String,
    memo: Mutex<HashMap<String, Value>>,
    cache: Option<ResponseCache>,
}

impl HttpReferenceClient {
    /// Creates a client for `base_url` with a per-request timeout.
    pub fn new(base_url: &str, timeout: Duration, cache: Option<ResponseCache>) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("monster-fighter/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            memo: Mutex::new(HashMap::new()),
            cache,
        })
    }

    /// Creates a client from the `reference` and `cache` config sections.
    pub fn from_config(config: &FighterConfig) -> Result<Self> {
        let cache = config
            .cache
            .enabled
            .then(|| ResponseCache::new(config.cache_dir()));
        Self::new(
            &config.reference.base_url,
            Duration::from_secs(config.reference.timeout_secs),
            cache,
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn remember(&self, url: &str, body: &Value) {
        self.memo
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(url.to_string(), body.clone());
    }
}

impl ReferenceSource for HttpReferenceClient {
    fn get_json(&self, path: &str) -> Result<Value> {
        let url = self.url(path);

        if let Some(body) = self
            .memo
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&url)
        {
            return Ok(body.clone());
        }

        if let Some(body) = self.cache.as_ref().and_then(|cache| cache.get(&url)) {
            self.remember(&url, &body);
            return Ok(body);
        }

        debug!(url = %url, "Fetching reference document");
        let response = self.http.get(&url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(ReferenceError::StatusError {
                url,
                status: status.as_u16(),
            });
        }

        let body: Value = response.json()?;
        if let Some(cache) = &self.cache {
            cache.put(&url, &body);
        }
        self.remember(&url, &body);
        Ok(body)
    }
}
