//! Durable cart persistence.
//!
//! Stands in for the browser's origin-scoped local storage: one serialized
//! value under one fixed key. The legacy record is a bare JSON array of
//! lines; new writes wrap it in a `{ "version": 1, "lines": [...] }`
//! envelope, and reads accept both shapes.

use std::cell::{Cell, RefCell};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::line::CartLine;

/// Fixed storage key, inherited from the legacy web storefront.
pub const CART_STORAGE_KEY: &str = "digitalStoreCart";

/// Version written in the storage envelope.
const STORAGE_VERSION: u32 = 1;

/// Errors that can occur while loading or saving the cart record.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing store failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] io::Error),

    /// The persisted record is not a readable cart.
    #[error("corrupt cart record: {0}")]
    Corrupt(#[from] serde_json::Error),

    /// The backing store refused the operation.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Durable key-value persistence for the cart.
///
/// There is exactly one record per store; `save` replaces it wholesale.
pub trait CartStorage {
    /// Read the persisted line sequence. A missing record is an empty
    /// cart, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Corrupt`] when a record exists but cannot be
    /// decoded, or [`StorageError::Io`] when the store cannot be read.
    fn load(&self) -> Result<Vec<CartLine>, StorageError>;

    /// Replace the persisted record with `lines`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] or [`StorageError::Unavailable`] when
    /// the store cannot be written.
    fn save(&self, lines: &[CartLine]) -> Result<(), StorageError>;
}

#[derive(Serialize)]
struct Envelope<'a> {
    version: u32,
    lines: &'a [CartLine],
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredCart {
    Versioned { version: u32, lines: Vec<CartLine> },
    Legacy(Vec<CartLine>),
}

fn encode(lines: &[CartLine]) -> Result<String, StorageError> {
    Ok(serde_json::to_string(&Envelope {
        version: STORAGE_VERSION,
        lines,
    })?)
}

fn decode(raw: &str) -> Result<Vec<CartLine>, StorageError> {
    match serde_json::from_str::<StoredCart>(raw)? {
        StoredCart::Versioned { version, lines } => {
            if version > STORAGE_VERSION {
                warn!(version, "cart record written by a newer version, reading anyway");
            }
            Ok(lines)
        }
        StoredCart::Legacy(lines) => Ok(lines),
    }
}

// =============================================================================
// File-backed storage
// =============================================================================

/// File-backed storage: one JSON document per key inside a directory.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    /// Storage for `key` inside `dir`. The directory is created on first
    /// save.
    #[must_use]
    pub fn new(dir: impl AsRef<Path>, key: &str) -> Self {
        Self {
            path: dir.as_ref().join(format!("{key}.json")),
        }
    }

    /// Storage under the storefront's fixed cart key.
    #[must_use]
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir, CART_STORAGE_KEY)
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CartStorage for JsonFileStorage {
    fn load(&self) -> Result<Vec<CartLine>, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StorageError::Io(e)),
        };
        decode(&raw)
    }

    fn save(&self, lines: &[CartLine]) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let body = encode(lines)?;
        // Write-then-rename so a crash mid-write cannot corrupt the record
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, body)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

// =============================================================================
// In-memory storage (tests)
// =============================================================================

/// In-memory storage for tests.
///
/// Holds the raw serialized record, like the real key-value store would,
/// and can be told to fail saves to exercise degraded-write behavior.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    record: RefCell<Option<String>>,
    fail_saves: Cell<bool>,
}

impl MemoryStorage {
    /// Create empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed the raw record, e.g. a legacy unversioned payload.
    pub fn set_record(&self, raw: impl Into<String>) {
        *self.record.borrow_mut() = Some(raw.into());
    }

    /// Make every subsequent `save` fail.
    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.set(fail);
    }

    /// The raw record as last saved, if any.
    #[must_use]
    pub fn record(&self) -> Option<String> {
        self.record.borrow().clone()
    }
}

impl CartStorage for MemoryStorage {
    fn load(&self) -> Result<Vec<CartLine>, StorageError> {
        match &*self.record.borrow() {
            None => Ok(Vec::new()),
            Some(raw) => decode(raw),
        }
    }

    fn save(&self, lines: &[CartLine]) -> Result<(), StorageError> {
        if self.fail_saves.get() {
            return Err(StorageError::Unavailable(
                "simulated save failure".to_string(),
            ));
        }
        *self.record.borrow_mut() = Some(encode(lines)?);
        Ok(())
    }
}
