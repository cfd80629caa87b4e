//! API request handlers.

pub mod artworks;
pub mod auth;
pub mod blog;
pub mod exhibitions;
pub mod newsletter;
pub mod process;
pub mod series;
pub mod stats;

use axum::Json;
use surrealdb::{Connection, RecordId, Surreal};

use folio_storage::db::crud::Document;

use super::{ApiError, Envelope, Message, data, message, record_id};

/// The names a table goes by in responses, and the plain CRUD every table shares.
#[derive(Debug, Clone, Copy)]
pub struct Resource {
    pub table: &'static str,
    /// e.g. "artwork"
    pub singular: &'static str,
    /// e.g. "Artwork"
    pub label: &'static str,
    /// e.g. "artworks"
    pub plural: &'static str,
}

impl Resource {
    /// # Errors
    ///
    /// 400 if `key` isn't a valid id.
    #[inline]
    pub fn id(&self, key: &str) -> Result<RecordId, ApiError> {
        record_id(self.table, key, self.singular)
    }

    #[must_use]
    pub fn not_found(&self) -> ApiError {
        ApiError::NotFound(format!("{} not found", self.label))
    }

    #[must_use]
    pub fn failed(&self, action: &str) -> String {
        format!("Failed to {action} {}", self.singular)
    }

    /// # Errors
    ///
    /// 500 if the table can't be read.
    pub async fn list<C, D, V>(&self, db: &Surreal<C>) -> Result<Json<Envelope<Vec<V>>>, ApiError>
    where
        C: Connection,
        D: Document,
        V: From<D> + serde::Serialize,
    {
        let documents = D::read_all(db)
            .await
            .map_err(ApiError::internal(format!("Failed to fetch {}", self.plural)))?;
        Ok(data(documents.into_iter().map(V::from).collect()))
    }

    /// # Errors
    ///
    /// 400 on a malformed id, 404 if there's no such record, 500 on store errors.
    pub async fn read<C, D, V>(
        &self,
        db: &Surreal<C>,
        key: &str,
    ) -> Result<Json<Envelope<V>>, ApiError>
    where
        C: Connection,
        D: Document,
        V: From<D> + serde::Serialize,
    {
        let id = self.id(key)?;
        D::read(db, id)
            .await
            .map_err(ApiError::internal(self.failed("fetch")))?
            .map(|document| data(V::from(document)))
            .ok_or_else(|| self.not_found())
    }

    /// # Errors
    ///
    /// 500 if the record couldn't be stored.
    pub async fn create<C, D, V>(
        &self,
        db: &Surreal<C>,
        document: D,
    ) -> Result<Json<Envelope<V>>, ApiError>
    where
        C: Connection,
        D: Document,
        V: From<D> + serde::Serialize,
    {
        let context = self.failed("create");
        let created = D::create(db, document)
            .await
            .map_err(ApiError::internal(context.clone()))?
            .ok_or(ApiError::Internal(context))?;
        log::info!("Created {} {}", self.singular, created.id());
        Ok(data(V::from(created)))
    }

    /// # Errors
    ///
    /// 400 on a malformed id, 404 if there's no such record, 500 on store errors.
    pub async fn update<C, D, V>(
        &self,
        db: &Surreal<C>,
        key: &str,
        changes: D::ChangeSet,
    ) -> Result<Json<Envelope<V>>, ApiError>
    where
        C: Connection,
        D: Document,
        V: From<D> + serde::Serialize,
    {
        let id = self.id(key)?;
        D::update(db, id, changes)
            .await
            .map_err(ApiError::internal(self.failed("update")))?
            .map(|document| data(V::from(document)))
            .ok_or_else(|| self.not_found())
    }

    /// # Errors
    ///
    /// 400 on a malformed id, 404 if there's no such record, 500 on store errors.
    pub async fn delete<C, D>(&self, db: &Surreal<C>, key: &str) -> Result<Json<Message>, ApiError>
    where
        C: Connection,
        D: Document,
    {
        let id = self.id(key)?;
        let deleted = D::delete(db, id)
            .await
            .map_err(ApiError::internal(self.failed("delete")))?
            .ok_or_else(|| self.not_found())?;
        log::info!("Deleted {} {}", self.singular, deleted.id());
        Ok(message(format!("{} deleted successfully", self.label)))
    }
}

/// Reject a blank required field with a 400.
///
/// # Errors
///
/// `"{label} is required"` when `value` is blank.
#[inline]
pub fn require(value: &str, label: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        Err(ApiError::BadRequest(format!("{label} is required")))
    } else {
        Ok(())
    }
}
