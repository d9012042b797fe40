// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Record persistence: a string key/value store and the append-only record
//! collections serialized into it.

use rusqlite::{Connection, OptionalExtension, params};
use serde::{Serialize, de::DeserializeOwned};
use std::marker::PhantomData;
use thiserror::Error;
use tracing::info;

use crate::models::{FishStock, FishType, StockMovement, Transaction};

pub const TRANSACTIONS_KEY: &str = "imported_transactions";
pub const STOCK_MOVEMENTS_KEY: &str = "imported_stock_movements";

pub fn fish_key(fish_type: FishType) -> String {
    format!("imported_fish_{}", fish_type)
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend error")]
    Backend(#[from] rusqlite::Error),
    #[error("stored collection '{key}' is corrupt")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("could not serialize collection '{key}'")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

pub trait KvStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Key/value store over the `kv` table.
pub struct SqliteStore<'c> {
    conn: &'c Connection,
}

impl<'c> SqliteStore<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }
}

impl KvStore for SqliteStore<'_> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let v = self
            .conn
            .query_row("SELECT value FROM kv WHERE key=?1", params![key], |r| {
                r.get(0)
            })
            .optional()?;
        Ok(v)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO kv(key, value) VALUES(?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value=excluded.value, updated_at=datetime('now')",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.conn
            .execute("DELETE FROM kv WHERE key=?1", params![key])?;
        Ok(())
    }
}

/// A typed record list stored as one JSON array under `key`.
pub struct Repository<'s, T> {
    store: &'s dyn KvStore,
    key: String,
    _marker: PhantomData<T>,
}

impl<'s, T: Serialize + DeserializeOwned + Clone> Repository<'s, T> {
    pub fn new(store: &'s dyn KvStore, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            _marker: PhantomData,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// The whole collection; an absent key is an empty list.
    pub fn load(&self) -> Result<Vec<T>, StoreError> {
        match self.store.get(&self.key)? {
            None => Ok(Vec::new()),
            Some(s) => serde_json::from_str(&s).map_err(|source| StoreError::Corrupt {
                key: self.key.clone(),
                source,
            }),
        }
    }

    /// Re-reads the collection; the store is the only source of truth.
    pub fn refresh(&self) -> Result<Vec<T>, StoreError> {
        self.load()
    }

    /// Reads the existing list, appends `records` and writes the full list back.
    pub fn append(&self, records: &[T]) -> Result<usize, StoreError> {
        let mut all = self.load()?;
        let existing = all.len();
        all.extend_from_slice(records);
        let s = serde_json::to_string(&all).map_err(|source| StoreError::Serialize {
            key: self.key.clone(),
            source,
        })?;
        self.store.set(&self.key, &s)?;
        info!(key = %self.key, added = records.len(), existing, "collection updated");
        Ok(all.len())
    }

    pub fn clear(&self) -> Result<(), StoreError> {
        self.store.remove(&self.key)?;
        info!(key = %self.key, "collection cleared");
        Ok(())
    }
}

pub fn transactions<'s>(store: &'s dyn KvStore) -> Repository<'s, Transaction> {
    Repository::new(store, TRANSACTIONS_KEY)
}

pub fn stock_movements<'s>(store: &'s dyn KvStore) -> Repository<'s, StockMovement> {
    Repository::new(store, STOCK_MOVEMENTS_KEY)
}

pub fn fish_stock<'s>(store: &'s dyn KvStore, fish_type: FishType) -> Repository<'s, FishStock> {
    Repository::new(store, fish_key(fish_type))
}
