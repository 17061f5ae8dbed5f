use chrono::Utc;
use diesel::prelude::*;
use log::debug;
use std::sync::Arc;

use super::model::LocalStorageEntryDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::local_storage;
use goaltrack_core::errors::Result;

/// Reads and writes whole values in named slots.
///
/// Reads use the pool directly; writes go through the single writer.
#[derive(Clone)]
pub struct LocalStorageRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl LocalStorageRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        LocalStorageRepository { pool, writer }
    }

    /// Returns the value stored under `key`, or `None` if the slot is empty.
    pub fn get_item(&self, key: &str) -> Result<Option<String>> {
        let mut conn = get_connection(&self.pool)?;
        local_storage::table
            .find(key)
            .select(local_storage::storage_value)
            .first::<String>(&mut conn)
            .optional()
            .into_core()
    }

    /// Replaces the value stored under `key`.
    pub async fn set_item(&self, key: &str, value: String) -> Result<()> {
        debug!("Writing {} bytes to slot '{}'", value.len(), key);
        let entry = LocalStorageEntryDB {
            storage_key: key.to_string(),
            storage_value: value,
            updated_at: Utc::now().naive_utc(),
        };
        self.writer
            .exec(move |conn| {
                diesel::replace_into(local_storage::table)
                    .values(&entry)
                    .execute(conn)
                    .into_core()?;
                Ok(())
            })
            .await
    }

    /// Clears the slot. Returns whether anything was stored there.
    pub async fn remove_item(&self, key: &str) -> Result<bool> {
        let key = key.to_string();
        self.writer
            .exec(move |conn| {
                let deleted = diesel::delete(local_storage::table.find(key))
                    .execute(conn)
                    .into_core()?;
                Ok(deleted > 0)
            })
            .await
    }

    /// Lists the names of all occupied slots.
    pub fn keys(&self) -> Result<Vec<String>> {
        let mut conn = get_connection(&self.pool)?;
        local_storage::table
            .select(local_storage::storage_key)
            .order(local_storage::storage_key.asc())
            .load::<String>(&mut conn)
            .into_core()
    }
}
