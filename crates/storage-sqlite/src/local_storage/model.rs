//! Database model for local storage slots.

use chrono::NaiveDateTime;
use diesel::prelude::*;

/// One named slot and its serialized value
#[derive(Queryable, Insertable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::local_storage)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct LocalStorageEntryDB {
    pub storage_key: String,
    pub storage_value: String,
    pub updated_at: NaiveDateTime,
}
