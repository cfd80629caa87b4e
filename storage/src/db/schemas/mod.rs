#![allow(clippy::module_name_repetitions)]
use std::future::Future;

use surrealdb::{Connection, RecordId, Surreal};

pub mod artwork;
pub mod exhibition;
pub mod post;
pub mod process;
pub mod series;
pub mod subscriber;
pub mod user;

/// A table in the database, and the statements needed to define its schema.
pub trait Table {
    const TABLE_NAME: &'static str;
    const TABLE_SCHEMA_QUERY: &'static str;

    /// Run the schema definition for this table.
    ///
    /// All statements use `OVERWRITE`, so this is safe to call on every start.
    fn init_table<C: Connection>(
        db: &Surreal<C>,
    ) -> impl Future<Output = surrealdb::Result<()>> + Send {
        async {
            db.query(Self::TABLE_SCHEMA_QUERY).await?.check()?;
            Ok(())
        }
    }
}

/// Generate a new record id for the given table, keyed by a fresh ulid.
#[must_use]
#[inline]
pub fn generate_id(table: &str) -> RecordId {
    RecordId::from_table_key(table, ulid::Ulid::new().to_string())
}

/// Build a record id for `table` from a key supplied by a client.
///
/// Returns `None` unless the key is a well-formed ulid, which is the only kind of key we hand out.
#[must_use]
#[inline]
pub fn parse_id(table: &str, key: &str) -> Option<RecordId> {
    ulid::Ulid::from_string(key)
        .ok()
        .map(|ulid| RecordId::from_table_key(table, ulid.to_string()))
}

/// The key portion of a record id, as handed out to clients.
#[must_use]
#[inline]
pub fn record_key(id: &RecordId) -> String {
    match id.key().clone().into_inner() {
        surrealdb::sql::Id::String(s) => s,
        other => other.to_raw(),
    }
}

/// Render an optional store timestamp for clients.
#[must_use]
#[inline]
pub fn datetime_to_string(dt: Option<&surrealdb::sql::Datetime>) -> Option<String> {
    dt.map(surrealdb::sql::Datetime::to_raw)
}
