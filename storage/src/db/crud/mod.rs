//! CRUD operations for the tables of the portfolio.
//!
//! Every table gets create/read/update/delete through [`Document`], the tables with extra
//! behaviour (artworks, series, ...) add their own operations in their submodule.

use std::{fmt::Debug, future::Future};

use serde::{Serialize, de::DeserializeOwned};
use surrealdb::{Connection, RecordId, Surreal};
use tracing::Instrument;

use crate::{db::schemas::Table, errors::Error};

pub mod artwork;
pub mod exhibition;
pub mod post;
pub mod process;
pub mod series;
pub mod subscriber;
pub mod user;

/// A record type stored in its own table.
pub trait Document:
    Table + Serialize + DeserializeOwned + Debug + Send + Sync + Sized + 'static
{
    /// The partial update accepted by [`Document::update`].
    type ChangeSet: Serialize + Debug + Send + Sync + 'static;

    fn id(&self) -> &RecordId;

    /// Insert a new record, returns the stored record.
    fn create<C: Connection>(
        db: &Surreal<C>,
        document: Self,
    ) -> impl Future<Output = Result<Option<Self>, Error>> + Send {
        let span = tracing::debug_span!("create", table = Self::TABLE_NAME);
        async move {
            let id = document.id().clone();
            Ok(db.create(id).content(document).await?)
        }
        .instrument(span)
    }

    fn read_all<C: Connection>(
        db: &Surreal<C>,
    ) -> impl Future<Output = Result<Vec<Self>, Error>> + Send {
        let span = tracing::debug_span!("read_all", table = Self::TABLE_NAME);
        async move { Ok(db.select(Self::TABLE_NAME).await?) }.instrument(span)
    }

    fn read<C: Connection>(
        db: &Surreal<C>,
        id: RecordId,
    ) -> impl Future<Output = Result<Option<Self>, Error>> + Send {
        let span = tracing::debug_span!("read", table = Self::TABLE_NAME, ?id);
        async move { Ok(db.select(id).await?) }.instrument(span)
    }

    /// Merge `changes` into an existing record, returns `None` if there is no such record.
    fn update<C: Connection>(
        db: &Surreal<C>,
        id: RecordId,
        changes: Self::ChangeSet,
    ) -> impl Future<Output = Result<Option<Self>, Error>> + Send {
        let span = tracing::debug_span!("update", table = Self::TABLE_NAME, ?id, ?changes);
        async move { Ok(db.update(id).merge(changes).await?) }.instrument(span)
    }

    /// Delete a record, returns the deleted record or `None` if there was no such record.
    fn delete<C: Connection>(
        db: &Surreal<C>,
        id: RecordId,
    ) -> impl Future<Output = Result<Option<Self>, Error>> + Send {
        let span = tracing::debug_span!("delete", table = Self::TABLE_NAME, ?id);
        async move { Ok(db.delete(id).await?) }.instrument(span)
    }
}
