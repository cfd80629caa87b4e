//! CRUD operations for the series table, and the primitives used to keep series in sync with
//! their artworks.
use std::collections::HashMap;

use log::debug;
use surrealdb::{Connection, RecordId, Surreal, error::Db};
use tracing::instrument;

use crate::{
    db::{
        crud::Document,
        queries::series::{
            insert_or_count_artwork, insert_or_set_derived, read_by_title, set_cover_by_title,
            set_images_by_title,
        },
        schemas::{
            artwork::{Artwork, is_series_title},
            series::{Series, SeriesChangeSet, SeriesDerived},
        },
    },
    errors::Error,
};

impl Document for Series {
    type ChangeSet = SeriesChangeSet;

    #[inline]
    fn id(&self) -> &RecordId {
        &self.id
    }
}

/// What [`Series::reconcile`] did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reconciliation {
    /// The title doesn't name a series (blank or "n/a").
    NotASeries,
    /// No artworks reference the title, nothing was written.
    NoMembers,
    /// An existing series was brought in line with its artworks.
    Updated(SeriesDerived),
    /// The series didn't exist and was created from its artworks.
    Created(SeriesDerived),
}

impl Series {
    #[instrument]
    pub async fn read_by_title<C: Connection>(
        db: &Surreal<C>,
        title: &str,
    ) -> Result<Option<Self>, Error> {
        Ok(db
            .query(read_by_title())
            .bind(("title", title.to_owned()))
            .await?
            .take(0)?)
    }

    /// Insert `series`, or if a series with the same title exists, increment its `artworkCount`
    /// and leave everything else alone.
    ///
    /// Retried when it loses a race against a concurrent write to the same title.
    #[instrument]
    pub async fn insert_or_count_artwork<C: Connection>(
        db: &Surreal<C>,
        series: Self,
    ) -> Result<(), Error> {
        write_by_title(db, insert_or_count_artwork(), series).await
    }

    /// Insert `series`, or if a series with the same title exists, overwrite its derived
    /// fields with those of `series`.
    ///
    /// Retried when it loses a race against a concurrent write to the same title.
    #[instrument]
    pub async fn insert_or_set_derived<C: Connection>(
        db: &Surreal<C>,
        series: Self,
    ) -> Result<(), Error> {
        write_by_title(db, insert_or_set_derived(), series).await
    }

    /// Overwrite `images` of whichever series has this title, if any.
    #[instrument]
    pub async fn set_images_by_title<C: Connection>(
        db: &Surreal<C>,
        title: &str,
        images: Vec<String>,
    ) -> Result<(), Error> {
        db.query(set_images_by_title())
            .bind(("title", title.to_owned()))
            .bind(("images", images))
            .await?
            .check()?;
        Ok(())
    }

    /// Overwrite `coverImage` of whichever series has this title, if any.
    #[instrument]
    pub async fn set_cover_by_title<C: Connection>(
        db: &Surreal<C>,
        title: &str,
        cover: String,
    ) -> Result<(), Error> {
        db.query(set_cover_by_title())
            .bind(("title", title.to_owned()))
            .bind(("cover", cover))
            .await?
            .check()?;
        Ok(())
    }

    /// Recompute the derived fields of `series` from the artworks currently referencing its title.
    ///
    /// # Returns
    ///
    /// * `None` if no artworks reference the series, in which case it is left untouched.
    /// * the newly written derived values otherwise.
    ///
    /// # Errors
    ///
    /// Fails if the store fails, or with [`Error::NotFound`] if the series disappeared meanwhile.
    #[instrument]
    pub async fn resync<C: Connection>(
        db: &Surreal<C>,
        series: &Self,
    ) -> Result<Option<SeriesDerived>, Error> {
        let artworks = Artwork::read_by_series(db, &series.title).await?;
        if artworks.is_empty() {
            return Ok(None);
        }

        let derived = SeriesDerived::from_artworks(&artworks, &series.cover_image);
        if !derived.matches(series) {
            Self::update(db, series.id.clone(), derived.clone().into())
                .await?
                .ok_or(Error::NotFound)?;
        }
        Ok(Some(derived))
    }

    /// Make the series named `title` agree with the artworks referencing it,
    /// creating the series if artworks reference it but it doesn't exist yet.
    ///
    /// Series that no artwork references are left as they are.
    #[instrument]
    pub async fn reconcile<C: Connection>(
        db: &Surreal<C>,
        title: &str,
    ) -> Result<Reconciliation, Error> {
        if !is_series_title(title) {
            return Ok(Reconciliation::NotASeries);
        }

        if let Some(series) = Self::read_by_title(db, title).await? {
            return Ok(Self::resync(db, &series)
                .await?
                .map_or(Reconciliation::NoMembers, Reconciliation::Updated));
        }

        let artworks = Artwork::read_by_series(db, title).await?;
        if artworks.is_empty() {
            return Ok(Reconciliation::NoMembers);
        }

        let series = Self::from_members(title, &artworks);
        let derived = SeriesDerived {
            images: series.images.clone(),
            cover_image: series.cover_image.clone(),
            artwork_count: series.artwork_count,
        };
        // a concurrent writer may have created it since we looked
        Self::insert_or_set_derived(db, series).await?;
        Ok(Reconciliation::Created(derived))
    }
}

/// How many times a title-keyed write is attempted before a write conflict is given up on.
const MAX_WRITE_ATTEMPTS: usize = 16;

/// Run one of the title-keyed transactions for `series`, retrying on write conflicts.
async fn write_by_title<C: Connection>(
    db: &Surreal<C>,
    query: &'static str,
    series: Series,
) -> Result<(), Error> {
    let mut attempt = 1;
    loop {
        let failure = match db.query(query).bind(("series", series.clone())).await {
            Ok(mut response) => statement_error(response.take_errors()),
            Err(e) => Some(e),
        };
        match failure {
            None => return Ok(()),
            Some(e) if attempt < MAX_WRITE_ATTEMPTS && is_write_conflict(&e) => {
                debug!(
                    "Write to series \"{}\" conflicted (attempt {attempt}), retrying: {e}",
                    series.title
                );
                attempt += 1;
            }
            Some(e) => return Err(e.into()),
        }
    }
}

/// The error that actually failed a transaction.
///
/// Every other statement of a failed transaction reports that it wasn't executed.
fn statement_error(mut errors: HashMap<usize, surrealdb::Error>) -> Option<surrealdb::Error> {
    let mut keys: Vec<usize> = errors.keys().copied().collect();
    keys.sort_unstable();
    let cause = keys
        .iter()
        .copied()
        .find(|key| {
            !matches!(
                errors.get(key),
                Some(surrealdb::Error::Db(Db::QueryNotExecuted))
            )
        })
        .or_else(|| keys.first().copied())?;
    errors.remove(&cause)
}

/// Whether `error` means another writer got to the same series first, so trying again can succeed.
fn is_write_conflict(error: &surrealdb::Error) -> bool {
    match error {
        surrealdb::Error::Db(Db::TxRetryable | Db::IndexExists { .. }) => true,
        // a conflict at commit time is reported on every statement of the transaction
        surrealdb::Error::Db(Db::QueryNotExecutedDetail { message }) => {
            *message == Db::TxRetryable.to_string()
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::schemas::series::NewSeries,
        test_utils::{create_artwork, init_test_database},
    };

    use anyhow::{Result, anyhow};
    use pretty_assertions::assert_eq;

    async fn read_title<C: Connection>(db: &Surreal<C>, title: &str) -> Result<Series> {
        Series::read_by_title(db, title)
            .await?
            .ok_or_else(|| anyhow!("series {title} not found"))
    }

    #[tokio::test]
    async fn test_crud() -> Result<()> {
        let db = init_test_database().await?;
        let series = Series::from(NewSeries {
            title: "Ocean".into(),
            description: "Water studies".into(),
            ..Default::default()
        });

        let created = Series::create(&db, series.clone())
            .await?
            .ok_or_else(|| anyhow!("Series not created"))?;
        assert_eq!(created.title, "Ocean");
        assert_eq!(Series::read(&db, series.id.clone()).await?, Some(created.clone()));
        assert_eq!(read_title(&db, "Ocean").await?, created);
        assert_eq!(Series::read_by_title(&db, "ocean").await?, None);

        let updated = Series::update(
            &db,
            series.id.clone(),
            SeriesChangeSet {
                featured: Some(true),
                ..Default::default()
            },
        )
        .await?
        .ok_or_else(|| anyhow!("Series not found"))?;
        assert!(updated.featured);
        assert_eq!(updated.description, "Water studies");

        assert!(Series::delete(&db, series.id.clone()).await?.is_some());
        assert_eq!(Series::read_all(&db).await?, vec![]);
        Ok(())
    }

    #[tokio::test]
    async fn test_title_is_unique() -> Result<()> {
        let db = init_test_database().await?;
        let first = Series::from(NewSeries {
            title: "Ocean".into(),
            ..Default::default()
        });
        let second = Series::from(NewSeries {
            title: "Ocean".into(),
            ..Default::default()
        });

        Series::create(&db, first).await?;
        assert!(Series::create(&db, second).await.is_err());
        assert_eq!(Series::read_all(&db).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_insert_or_count_artwork() -> Result<()> {
        let db = init_test_database().await?;
        let first = create_artwork(&db, "One", "Ocean", "u1").await?;
        let second = create_artwork(&db, "Two", "Ocean", "u2").await?;

        Series::insert_or_count_artwork(&db, Series::for_artwork(&first)).await?;
        let series = read_title(&db, "Ocean").await?;
        assert_eq!(series.artwork_count, 1);
        assert_eq!(series.images, vec!["u1".to_owned()]);

        let counted = Series::insert_or_count_artwork(&db, Series::for_artwork(&second)).await;
        assert!(counted.is_ok(), "counting onto an existing series failed: {counted:?}");
        let series = read_title(&db, "Ocean").await?;
        assert_eq!(series.artwork_count, 2);
        assert_eq!(series.images, vec!["u1".to_owned()]);
        assert_eq!(series.cover_image, "u1");
        assert_eq!(Series::read_all(&db).await?.len(), 1);
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_counts_share_one_series() -> Result<()> {
        const WRITERS: u64 = 8;
        let db = init_test_database().await?;
        let mut artworks = Vec::new();
        for i in 0..WRITERS {
            artworks.push(create_artwork(&db, &format!("A{i}"), "Ocean", &format!("u{i}")).await?);
        }

        let mut writers = tokio::task::JoinSet::new();
        for artwork in artworks {
            let db = db.clone();
            writers.spawn(async move {
                Series::insert_or_count_artwork(&db, Series::for_artwork(&artwork)).await
            });
        }
        while let Some(written) = writers.join_next().await {
            written??;
        }

        let all = Series::read_all(&db).await?;
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].artwork_count, WRITERS);
        Ok(())
    }

    #[tokio::test]
    async fn test_insert_or_set_derived_overwrites_existing_title() -> Result<()> {
        let db = init_test_database().await?;
        let first = create_artwork(&db, "One", "Ocean", "u1").await?;
        Series::insert_or_count_artwork(&db, Series::for_artwork(&first)).await?;
        let existing = read_title(&db, "Ocean").await?;
        let second = create_artwork(&db, "Two", "Ocean", "u2").await?;

        // a fresh id for a title that is already taken, as a racing reconcile would build it
        let rebuilt = Series::from_members("Ocean", &[first, second]);
        assert_ne!(rebuilt.id, existing.id);
        Series::insert_or_set_derived(&db, rebuilt).await?;

        let series = read_title(&db, "Ocean").await?;
        assert_eq!(series.id, existing.id);
        assert_eq!(series.images, vec!["u1".to_owned(), "u2".to_owned()]);
        assert_eq!(series.artwork_count, 2);
        assert_eq!(Series::read_all(&db).await?.len(), 1);
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates_share_one_series() -> Result<()> {
        let db = init_test_database().await?;
        let members = vec![
            create_artwork(&db, "One", "Ocean", "u1").await?,
            create_artwork(&db, "Two", "Ocean", "u2").await?,
        ];

        let mut writers = tokio::task::JoinSet::new();
        for _ in 0..8 {
            let db = db.clone();
            let series = Series::from_members("Ocean", &members);
            writers.spawn(async move { Series::insert_or_set_derived(&db, series).await });
        }
        while let Some(written) = writers.join_next().await {
            written??;
        }

        let all = Series::read_all(&db).await?;
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].images, vec!["u1".to_owned(), "u2".to_owned()]);
        assert_eq!(all[0].artwork_count, 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_set_by_title() -> Result<()> {
        let db = init_test_database().await?;
        let artwork = create_artwork(&db, "One", "Ocean", "u1").await?;
        Series::insert_or_count_artwork(&db, Series::for_artwork(&artwork)).await?;

        Series::set_images_by_title(&db, "Ocean", vec!["a".into(), "b".into()]).await?;
        Series::set_cover_by_title(&db, "Ocean", "b".into()).await?;
        // no such series, nothing happens
        Series::set_cover_by_title(&db, "Desert", "c".into()).await?;

        let series = read_title(&db, "Ocean").await?;
        assert_eq!(series.images, vec!["a".to_owned(), "b".to_owned()]);
        assert_eq!(series.cover_image, "b");
        assert_eq!(Series::read_all(&db).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_resync() -> Result<()> {
        let db = init_test_database().await?;
        let artwork = create_artwork(&db, "One", "Ocean", "u1").await?;
        Series::insert_or_count_artwork(&db, Series::for_artwork(&artwork)).await?;
        Series::insert_or_count_artwork(&db, Series::for_artwork(&artwork)).await?;
        create_artwork(&db, "Two", "Ocean", "").await?;
        create_artwork(&db, "Three", "Ocean", "u3").await?;

        let series = read_title(&db, "Ocean").await?;
        let derived = Series::resync(&db, &series).await?;

        let expected = SeriesDerived {
            images: vec!["u1".into(), "u3".into()],
            cover_image: "u1".into(),
            artwork_count: 3,
        };
        assert_eq!(derived, Some(expected.clone()));
        assert!(expected.matches(&read_title(&db, "Ocean").await?));
        Ok(())
    }

    #[tokio::test]
    async fn test_resync_without_members_is_untouched() -> Result<()> {
        let db = init_test_database().await?;
        let series = Series::create(
            &db,
            Series::from(NewSeries {
                title: "Empty".into(),
                cover_image: "keep".into(),
                images: vec!["keep".into()],
                ..Default::default()
            }),
        )
        .await?
        .ok_or_else(|| anyhow!("Series not created"))?;

        assert_eq!(Series::resync(&db, &series).await?, None);
        assert_eq!(read_title(&db, "Empty").await?, series);
        Ok(())
    }

    #[tokio::test]
    async fn test_reconcile() -> Result<()> {
        let db = init_test_database().await?;

        assert_eq!(
            Series::reconcile(&db, "N/A").await?,
            Reconciliation::NotASeries
        );
        assert_eq!(
            Series::reconcile(&db, "Ocean").await?,
            Reconciliation::NoMembers
        );
        assert!(Series::read_all(&db).await?.is_empty());

        let mut first = crate::test_utils::artwork("One", "Ocean", "u1");
        first.year = 2019;
        Artwork::create(&db, first).await?;
        create_artwork(&db, "Two", "Ocean", "u2").await?;

        let expected = SeriesDerived {
            images: vec!["u1".into(), "u2".into()],
            cover_image: "u1".into(),
            artwork_count: 2,
        };
        assert_eq!(
            Series::reconcile(&db, "Ocean").await?,
            Reconciliation::Created(expected.clone())
        );
        let series = read_title(&db, "Ocean").await?;
        assert_eq!(series.year, "2019");
        assert_eq!(
            series.description,
            "A collection of artworks from the Ocean series"
        );

        create_artwork(&db, "Three", "Ocean", "u3").await?;
        let expected = SeriesDerived {
            images: vec!["u1".into(), "u2".into(), "u3".into()],
            cover_image: "u1".into(),
            artwork_count: 3,
        };
        assert_eq!(
            Series::reconcile(&db, "Ocean").await?,
            Reconciliation::Updated(expected)
        );
        assert_eq!(Series::read_all(&db).await?.len(), 1);
        Ok(())
    }
}
