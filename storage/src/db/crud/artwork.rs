//! CRUD operations for the artwork table
use surrealdb::{Connection, RecordId, Surreal};
use tracing::instrument;

use crate::{
    db::{
        crud::Document,
        queries::artwork::{list, read_by_series, read_featured, read_random},
        schemas::artwork::{Artwork, ArtworkChangeSet, ArtworkFilter},
    },
    errors::Error,
};

/// How many artworks the home page shows.
pub const FEATURED_LIMIT: usize = 3;

impl Document for Artwork {
    type ChangeSet = ArtworkChangeSet;

    #[inline]
    fn id(&self) -> &RecordId {
        &self.id
    }
}

impl Artwork {
    /// Read every artwork whose `series` is exactly `series`, in natural order.
    #[instrument]
    pub async fn read_by_series<C: Connection>(
        db: &Surreal<C>,
        series: &str,
    ) -> Result<Vec<Self>, Error> {
        Ok(db
            .query(read_by_series())
            .bind(("series", series.to_owned()))
            .await?
            .take(0)?)
    }

    /// List artworks, newest first.
    #[instrument]
    pub async fn list<C: Connection>(
        db: &Surreal<C>,
        filter: &ArtworkFilter,
    ) -> Result<Vec<Self>, Error> {
        let mut query = db.query(list(filter));
        if let Some(year) = filter.year {
            query = query.bind(("year", year));
        }
        if let Some(medium) = &filter.medium {
            query = query.bind(("medium", medium.clone()));
        }
        if let Some(series) = &filter.series {
            query = query.bind(("series", series.clone()));
        }
        let artworks: Vec<Self> = query.await?.take(0)?;

        Ok(match filter.search.as_deref() {
            Some(needle) => artworks
                .into_iter()
                .filter(|artwork| artwork.matches_search(needle))
                .collect(),
            None => artworks,
        })
    }

    /// Up to `limit` random featured artworks, or `limit` random artworks if none are featured.
    #[instrument]
    pub async fn read_featured<C: Connection>(
        db: &Surreal<C>,
        limit: usize,
    ) -> Result<Vec<Self>, Error> {
        let featured: Vec<Self> = db
            .query(read_featured())
            .bind(("limit", limit))
            .await?
            .take(0)?;
        if !featured.is_empty() {
            return Ok(featured);
        }

        Ok(db
            .query(read_random())
            .bind(("limit", limit))
            .await?
            .take(0)?)
    }
}
