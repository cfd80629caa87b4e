//! Table counts, used by the site statistics and to check the database is reachable.

use surrealdb::{Connection, Surreal};
use tracing::instrument;

use crate::{
    db::{
        queries::generic::Count,
        schemas::{
            Table, artwork::Artwork, exhibition::Exhibition, post::Post, series::Series,
            subscriber::Subscriber,
        },
    },
    errors::Error,
};

/// Count the number of artworks in the database
///
/// # Errors
///
/// see [`Count::count`]
#[instrument]
pub async fn count_artworks<C: Connection>(db: &Surreal<C>) -> Result<u64, Error> {
    Count::count(db, Artwork::TABLE_NAME).await
}

/// Count the number of series in the database
///
/// # Errors
///
/// see [`Count::count`]
#[instrument]
pub async fn count_series<C: Connection>(db: &Surreal<C>) -> Result<u64, Error> {
    Count::count(db, Series::TABLE_NAME).await
}

/// Count the number of exhibitions in the database
///
/// # Errors
///
/// see [`Count::count`]
#[instrument]
pub async fn count_exhibitions<C: Connection>(db: &Surreal<C>) -> Result<u64, Error> {
    Count::count(db, Exhibition::TABLE_NAME).await
}

/// Count the number of journal posts in the database
///
/// # Errors
///
/// see [`Count::count`]
#[instrument]
pub async fn count_posts<C: Connection>(db: &Surreal<C>) -> Result<u64, Error> {
    Count::count(db, Post::TABLE_NAME).await
}

/// Count the number of active newsletter subscribers
///
/// # Errors
///
/// see [`Count::count_where`]
#[instrument]
pub async fn count_subscribers<C: Connection>(db: &Surreal<C>) -> Result<u64, Error> {
    Count::count_where(db, Subscriber::TABLE_NAME, "active", true).await
}
