//! Durable anonymous visitor identity.
//!
//! The identity is one opaque string persisted to a small file under the
//! platform data directory (the browser-profile analogue). It is created on
//! first use and never mutated or deleted by the widget. If the file cannot
//! be written (storage disabled, read-only profile) the store degrades to an
//! in-memory id for the life of the process; identity persistence is never
//! fatal to the widget.

use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use rand::RngExt;
use tracing::{debug, warn};

const IDENTITY_FILE: &str = "visitor_id";

/// Resolves and persists the visitor identifier.
pub struct IdentityStore {
    path: PathBuf,
    /// Set once; repeated calls return the cached value.
    cached: Mutex<Option<String>>,
}

impl IdentityStore {
    /// Store backed by the platform data directory
    /// (`<data_dir>/hearth/visitor_id`). Falls back to the current
    /// directory when no data directory is available.
    pub fn new() -> Self {
        let base = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::at(base.join("hearth").join(IDENTITY_FILE))
    }

    /// Store backed by a specific file path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cached: Mutex::new(None),
        }
    }

    /// Return the stored visitor id, creating and persisting one if absent.
    ///
    /// Idempotent: repeated calls against the same store path return the
    /// same value, whether it was read back or freshly generated.
    pub fn get_or_create(&self) -> String {
        let mut cached = self.cached.lock().expect("identity cache lock poisoned");
        if let Some(id) = cached.as_ref() {
            return id.clone();
        }

        let id = match self.read_existing() {
            Some(existing) => existing,
            None => {
                let fresh = generate_visitor_id();
                self.persist(&fresh);
                fresh
            }
        };

        *cached = Some(id.clone());
        id
    }

    fn read_existing(&self) -> Option<String> {
        let contents = fs::read_to_string(&self.path).ok()?;
        let id = contents.trim();
        if id.is_empty() {
            None
        } else {
            Some(id.to_string())
        }
    }

    fn persist(&self, id: &str) {
        if let Some(parent) = self.path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                warn!(path = %self.path.display(), error = %e, "visitor id not persisted; using in-memory identity");
                return;
            }
        }
        match fs::write(&self.path, id) {
            Ok(()) => debug!(path = %self.path.display(), "created visitor identity"),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "visitor id not persisted; using in-memory identity");
            }
        }
    }
}

impl Default for IdentityStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Millisecond timestamp plus a random suffix; enough entropy that two
/// first-time visitors landing in the same millisecond will not collide.
fn generate_visitor_id() -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let suffix: u32 = rand::rng().random();
    format!("guest-{millis}-{suffix:08x}")
}
