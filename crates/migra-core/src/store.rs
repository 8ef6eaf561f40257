//! Key-value persistence for client records.
//!
//! Records are stored as JSON under [`CLIENT_PREFIX`]`<id>`. [`MemoryKv`] is
//! the in-process backend; any other backend only has to provide the three
//! [`KeyValueStore`] operations.

use std::collections::BTreeMap;

use migra_model::ClientRecord;
use thiserror::Error;
use tracing::debug;

use crate::dedup::{ExistingRecords, InMemoryStore};

/// Key prefix for client records.
pub const CLIENT_PREFIX: &str = "client:";

/// Store operation error.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Value under a key is not a valid record.
    #[error("invalid record under {key}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Record could not be encoded.
    #[error("failed to encode record {id}")]
    Encode {
        id: String,
        #[source]
        source: serde_json::Error,
    },

    /// The backend itself failed.
    #[error("store backend error: {0}")]
    Backend(String),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Minimal key-value capability.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn put(&mut self, key: &str, value: String) -> Result<()>;

    /// All entries whose key starts with `prefix`, in key order.
    fn list_by_prefix(&self, prefix: &str) -> Result<Vec<(String, String)>>;
}

/// In-memory [`KeyValueStore`].
#[derive(Debug, Clone, Default)]
pub struct MemoryKv {
    entries: BTreeMap<String, String>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryKv {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: String) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn list_by_prefix(&self, prefix: &str) -> Result<Vec<(String, String)>> {
        Ok(self
            .entries
            .range(prefix.to_string()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect())
    }
}

/// Client records backed by a [`KeyValueStore`], indexed for duplicate
/// lookups.
#[derive(Debug)]
pub struct KvRecordStore<K> {
    kv: K,
    index: InMemoryStore,
}

impl<K: KeyValueStore> KvRecordStore<K> {
    /// Load every record under [`CLIENT_PREFIX`].
    pub fn load(kv: K) -> Result<Self> {
        let mut index = InMemoryStore::new();
        for (key, value) in kv.list_by_prefix(CLIENT_PREFIX)? {
            let record: ClientRecord = serde_json::from_str(&value)
                .map_err(|source| StoreError::Decode { key, source })?;
            index.insert(record);
        }
        debug!(records = index.len(), "loaded client records");
        Ok(Self { kv, index })
    }

    /// Write a record, replacing any stored record with the same id.
    pub fn insert(&mut self, record: ClientRecord) -> Result<()> {
        let json = serde_json::to_string(&record).map_err(|source| StoreError::Encode {
            id: record.id.clone(),
            source,
        })?;
        self.kv.put(&record_key(&record.id), json)?;
        self.index.upsert(record);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Result<Option<ClientRecord>> {
        let key = record_key(id);
        match self.kv.get(&key)? {
            Some(value) => serde_json::from_str(&value)
                .map(Some)
                .map_err(|source| StoreError::Decode { key, source }),
            None => Ok(None),
        }
    }

    pub fn records(&self) -> &[ClientRecord] {
        self.index.records()
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn into_inner(self) -> K {
        self.kv
    }
}

impl<K> ExistingRecords for KvRecordStore<K> {
    fn find_by_cpf(&self, cpf: &str) -> Option<&ClientRecord> {
        self.index.find_by_cpf(cpf)
    }

    fn find_by_email(&self, email: &str) -> Option<&ClientRecord> {
        self.index.find_by_email(email)
    }
}

fn record_key(id: &str) -> String {
    format!("{CLIENT_PREFIX}{id}")
}
