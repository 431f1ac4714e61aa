//! The identifier remap store (§4.11): allocates and persists a
//! deterministic, bidirectional mapping from original DICOM unique
//! identifiers to synthetic replacements.
//!
//! Two backings are provided behind the same [`RemapStore`] trait: an
//! in-memory pair of lock-protected hash maps, and an embedded SQL store
//! (via `rusqlite`, write-ahead-log mode) for mappings that must survive
//! across a batch or process restart. Both serialise writes behind a
//! single lock, matching §5's "remap store is shared across workers"
//! resource model.

use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{SecondsFormat, Utc};
use rand::RngCore;
use snafu::ResultExt;

use crate::error::{ExportIoSnafu, GenerationSnafu, RemapError, StoreIoSnafu};

const STANDARD_PREFIX: &str = "1.2.840.10008.";
const SYNTHETIC_PREFIX: &str = "2.25.";
const MAX_SYNTHETIC_LEN: usize = 64;

/// A single allocated mapping, as recorded by a [`RemapStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mapping {
    pub original: String,
    pub synthetic: String,
    pub scope: String,
    pub created_at: String,
}

/// Interface implemented by both remap store backings.
///
/// All operations take `&self`: concurrent callers serialise on an
/// internal lock rather than requiring external synchronisation.
pub trait RemapStore {
    /// Return the existing synthetic identifier for `original`, or
    /// allocate and record a new one under `scope` if this is the first
    /// time it has been seen. Idempotent on `original`; `scope` is only
    /// recorded on the first call.
    ///
    /// Identifiers beginning with the DICOM standard prefix
    /// (`"1.2.840.10008."`) or present in the caller's preservation set
    /// are returned unchanged and never recorded.
    fn get_or_create(&self, original: &str, scope: &str) -> Result<String, RemapError>;

    /// Look up the synthetic identifier already allocated for
    /// `original`, without allocating one.
    fn try_get_synthetic(&self, original: &str) -> Result<Option<String>, RemapError>;

    /// Reverse lookup: the original identifier behind `synthetic`.
    fn try_get_original(&self, synthetic: &str) -> Result<Option<String>, RemapError>;

    /// The number of allocated mappings.
    fn count(&self) -> Result<usize, RemapError>;

    /// Remove every allocated mapping.
    fn clear(&self) -> Result<(), RemapError>;

    /// Insert mappings directly, bypassing allocation (used to seed a
    /// store from a previously exported document).
    fn bulk_insert(&self, rows: &[Mapping]) -> Result<(), RemapError>;

    /// Write a deterministic JSON export of every mapping, ordered by
    /// creation time, per §6's export format.
    fn export(&self, writer: &mut dyn Write) -> Result<(), RemapError>;
}

/// Whether `original` must be returned unchanged rather than remapped.
fn is_preserved(original: &str, extra: &[String]) -> bool {
    original.starts_with(STANDARD_PREFIX) || extra.iter().any(|p| p == original)
}

fn generate_synthetic(original: &str) -> Result<String, RemapError> {
    let mut bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut bytes);
    let value = u128::from_be_bytes(bytes);
    let synthetic = format!("{SYNTHETIC_PREFIX}{value}");
    if synthetic.len() > MAX_SYNTHETIC_LEN {
        return GenerationSnafu {
            original: original.to_string(),
        }
        .fail();
    }
    Ok(synthetic)
}

fn now_iso8601() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// An in-memory remap store backed by a lock-protected pair of hash maps.
#[derive(Debug, Default)]
pub struct MemoryRemapStore {
    inner: Mutex<MemoryInner>,
    preserve: Vec<String>,
}

#[derive(Debug, Default)]
struct MemoryInner {
    by_original: HashMap<String, Mapping>,
    by_synthetic: HashMap<String, String>,
}

impl MemoryRemapStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add literal identifiers that must never be remapped, in addition
    /// to the standard `"1.2.840.10008."` prefix.
    pub fn with_preserved(mut self, preserved: impl IntoIterator<Item = String>) -> Self {
        self.preserve.extend(preserved);
        self
    }
}

impl RemapStore for MemoryRemapStore {
    fn get_or_create(&self, original: &str, scope: &str) -> Result<String, RemapError> {
        if is_preserved(original, &self.preserve) {
            return Ok(original.to_string());
        }
        let mut inner = self.inner.lock().expect("remap store lock poisoned");
        if let Some(existing) = inner.by_original.get(original) {
            return Ok(existing.synthetic.clone());
        }
        let synthetic = loop {
            let candidate = generate_synthetic(original)?;
            if !inner.by_synthetic.contains_key(&candidate) {
                break candidate;
            }
        };
        let mapping = Mapping {
            original: original.to_string(),
            synthetic: synthetic.clone(),
            scope: scope.to_string(),
            created_at: now_iso8601(),
        };
        inner.by_synthetic.insert(synthetic.clone(), original.to_string());
        inner.by_original.insert(original.to_string(), mapping);
        Ok(synthetic)
    }

    fn try_get_synthetic(&self, original: &str) -> Result<Option<String>, RemapError> {
        let inner = self.inner.lock().expect("remap store lock poisoned");
        Ok(inner.by_original.get(original).map(|m| m.synthetic.clone()))
    }

    fn try_get_original(&self, synthetic: &str) -> Result<Option<String>, RemapError> {
        let inner = self.inner.lock().expect("remap store lock poisoned");
        Ok(inner.by_synthetic.get(synthetic).cloned())
    }

    fn count(&self) -> Result<usize, RemapError> {
        let inner = self.inner.lock().expect("remap store lock poisoned");
        Ok(inner.by_original.len())
    }

    fn clear(&self) -> Result<(), RemapError> {
        let mut inner = self.inner.lock().expect("remap store lock poisoned");
        inner.by_original.clear();
        inner.by_synthetic.clear();
        Ok(())
    }

    fn bulk_insert(&self, rows: &[Mapping]) -> Result<(), RemapError> {
        let mut inner = self.inner.lock().expect("remap store lock poisoned");
        for row in rows {
            inner
                .by_synthetic
                .insert(row.synthetic.clone(), row.original.clone());
            inner.by_original.insert(row.original.clone(), row.clone());
        }
        Ok(())
    }

    fn export(&self, writer: &mut dyn Write) -> Result<(), RemapError> {
        let inner = self.inner.lock().expect("remap store lock poisoned");
        let mut mappings: Vec<&Mapping> = inner.by_original.values().collect();
        mappings.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        write_export(writer, &mappings)
    }
}

fn write_export(writer: &mut dyn Write, mappings: &[&Mapping]) -> Result<(), RemapError> {
    #[derive(serde::Serialize)]
    struct ExportedMapping<'a> {
        #[serde(rename = "originalUid")]
        original_uid: &'a str,
        #[serde(rename = "remappedUid")]
        remapped_uid: &'a str,
        scope: &'a str,
        #[serde(rename = "createdAt")]
        created_at: &'a str,
    }

    #[derive(serde::Serialize)]
    struct Export<'a> {
        #[serde(rename = "exportedAt")]
        exported_at: String,
        #[serde(rename = "mappingCount")]
        mapping_count: usize,
        mappings: Vec<ExportedMapping<'a>>,
    }

    let export = Export {
        exported_at: now_iso8601(),
        mapping_count: mappings.len(),
        mappings: mappings
            .iter()
            .map(|m| ExportedMapping {
                original_uid: &m.original,
                remapped_uid: &m.synthetic,
                scope: &m.scope,
                created_at: &m.created_at,
            })
            .collect(),
    };

    let json = serde_json::to_vec_pretty(&export).expect("export is always serializable");
    writer.write_all(&json).context(ExportIoSnafu)?;
    Ok(())
}

/// A persistent remap store backed by an embedded SQL database in
/// write-ahead-log mode.
///
/// Per §4.11's concurrency model, no connection is held open across
/// calls: each operation opens a short-lived connection to `path`,
/// serialised by a process-wide lock.
pub struct SqliteRemapStore {
    path: PathBuf,
    lock: Mutex<()>,
    preserve: Vec<String>,
}

impl SqliteRemapStore {
    /// Open (creating if necessary) the remap store at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, RemapError> {
        let path = path.as_ref().to_path_buf();
        let store = SqliteRemapStore {
            path,
            lock: Mutex::new(()),
            preserve: Vec::new(),
        };
        store.with_connection(|conn| {
            conn.execute_batch(
                "PRAGMA journal_mode=WAL;
                 CREATE TABLE IF NOT EXISTS remap (
                     original_uid TEXT PRIMARY KEY,
                     remapped_uid TEXT NOT NULL UNIQUE,
                     scope TEXT NOT NULL,
                     created_at TEXT NOT NULL
                 );
                 CREATE INDEX IF NOT EXISTS idx_remap_remapped_uid ON remap(remapped_uid);
                 CREATE INDEX IF NOT EXISTS idx_remap_scope_created_at ON remap(scope, created_at);",
            )
        })?;
        Ok(store)
    }

    pub fn with_preserved(mut self, preserved: impl IntoIterator<Item = String>) -> Self {
        self.preserve.extend(preserved);
        self
    }

    fn with_connection<T>(
        &self,
        f: impl FnOnce(&rusqlite::Connection) -> rusqlite::Result<T>,
    ) -> Result<T, RemapError> {
        let _guard = self.lock.lock().expect("remap store lock poisoned");
        let conn = rusqlite::Connection::open(&self.path).context(StoreIoSnafu)?;
        f(&conn).context(StoreIoSnafu)
    }
}

impl RemapStore for SqliteRemapStore {
    fn get_or_create(&self, original: &str, scope: &str) -> Result<String, RemapError> {
        if is_preserved(original, &self.preserve) {
            return Ok(original.to_string());
        }
        if let Some(existing) = self.try_get_synthetic(original)? {
            return Ok(existing);
        }
        let synthetic = generate_synthetic(original)?;
        let created_at = now_iso8601();
        self.with_connection(|conn| {
            conn.execute(
                "INSERT OR IGNORE INTO remap (original_uid, remapped_uid, scope, created_at)
                 VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![original, synthetic, scope, created_at],
            )
        })?;
        // another worker may have won the race; read back the row that
        // actually won so both return the same synthetic identifier.
        self.try_get_synthetic(original)
            .map(|opt| opt.unwrap_or(synthetic))
    }

    fn try_get_synthetic(&self, original: &str) -> Result<Option<String>, RemapError> {
        self.with_connection(|conn| {
            conn.query_row(
                "SELECT remapped_uid FROM remap WHERE original_uid = ?1",
                [original],
                |row| row.get(0),
            )
            .map(Some)
            .or_else(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => Ok(None),
                e => Err(e),
            })
        })
    }

    fn try_get_original(&self, synthetic: &str) -> Result<Option<String>, RemapError> {
        self.with_connection(|conn| {
            conn.query_row(
                "SELECT original_uid FROM remap WHERE remapped_uid = ?1",
                [synthetic],
                |row| row.get(0),
            )
            .map(Some)
            .or_else(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => Ok(None),
                e => Err(e),
            })
        })
    }

    fn count(&self) -> Result<usize, RemapError> {
        self.with_connection(|conn| {
            conn.query_row("SELECT COUNT(*) FROM remap", [], |row| {
                row.get::<_, i64>(0)
            })
        })
        .map(|n| n as usize)
    }

    fn clear(&self) -> Result<(), RemapError> {
        self.with_connection(|conn| conn.execute("DELETE FROM remap", []).map(|_| ()))
    }

    fn bulk_insert(&self, rows: &[Mapping]) -> Result<(), RemapError> {
        self.with_connection(|conn| {
            for row in rows {
                conn.execute(
                    "INSERT OR REPLACE INTO remap (original_uid, remapped_uid, scope, created_at)
                     VALUES (?1, ?2, ?3, ?4)",
                    rusqlite::params![row.original, row.synthetic, row.scope, row.created_at],
                )?;
            }
            Ok(())
        })
    }

    fn export(&self, writer: &mut dyn Write) -> Result<(), RemapError> {
        let mappings = self.with_connection(|conn| {
            conn.prepare(
                "SELECT original_uid, remapped_uid, scope, created_at FROM remap ORDER BY created_at",
            )?
            .query_map([], |row| {
                Ok(Mapping {
                    original: row.get(0)?,
                    synthetic: row.get(1)?,
                    scope: row.get(2)?,
                    created_at: row.get(3)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()
        })?;
        let refs: Vec<&Mapping> = mappings.iter().collect();
        write_export(writer, &refs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idempotent_on_original_regardless_of_scope() {
        let store = MemoryRemapStore::new();
        let a = store.get_or_create("1.2.3.4.5", "subject-1").unwrap();
        let b = store.get_or_create("1.2.3.4.5", "subject-2").unwrap();
        assert_eq!(a, b);
        assert!(a.starts_with("2.25."));
    }

    #[test]
    fn reverse_lookup_round_trips() {
        let store = MemoryRemapStore::new();
        let synthetic = store.get_or_create("1.2.3.4.6", "s").unwrap();
        assert_eq!(
            store.try_get_original(&synthetic).unwrap(),
            Some("1.2.3.4.6".to_string())
        );
    }

    #[test]
    fn standard_prefix_is_preserved() {
        let store = MemoryRemapStore::new();
        let out = store
            .get_or_create("1.2.840.10008.5.1.4.1.1.7", "s")
            .unwrap();
        assert_eq!(out, "1.2.840.10008.5.1.4.1.1.7");
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn explicit_preservation_set_is_honoured() {
        let store = MemoryRemapStore::new().with_preserved(["9.9.9.9".to_string()]);
        assert_eq!(store.get_or_create("9.9.9.9", "s").unwrap(), "9.9.9.9");
    }

    #[test]
    fn export_is_ordered_by_created_at() {
        let store = MemoryRemapStore::new();
        store.get_or_create("1.2.3.4.7", "s").unwrap();
        store.get_or_create("1.2.3.4.8", "s").unwrap();
        let mut buf = Vec::new();
        store.export(&mut buf).unwrap();
        let doc: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(doc["mappingCount"], 2);
        assert_eq!(doc["mappings"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn sqlite_store_persists_across_handles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("remap.sqlite");
        let synthetic = {
            let store = SqliteRemapStore::open(&path).unwrap();
            store.get_or_create("1.2.3.4.9", "subject-x").unwrap()
        };
        let store = SqliteRemapStore::open(&path).unwrap();
        assert_eq!(store.try_get_synthetic("1.2.3.4.9").unwrap(), Some(synthetic));
    }
}
