use surrealdb::{Connection, Surreal};
use tracing::instrument;

use folio_core::{
    config::StatsSettings,
    state::{ContentCounts, StatEntry},
};
use folio_storage::{
    db::health::{count_artworks, count_exhibitions, count_posts, count_series},
    errors::Error,
};

/// Count the content tables.
///
/// # Errors
///
/// Returns the store error if any of the counts fail.
#[instrument]
pub async fn content_counts<C: Connection>(db: &Surreal<C>) -> Result<ContentCounts, Error> {
    Ok(ContentCounts {
        artworks: count_artworks(db).await?,
        exhibitions: count_exhibitions(db).await?,
        series: count_series(db).await?,
        posts: count_posts(db).await?,
    })
}

/// The site statistics, computed fresh from the database on every call.
///
/// # Errors
///
/// Returns the store error if any of the counts fail.
#[instrument]
pub async fn site_stats<C: Connection>(
    db: &Surreal<C>,
    settings: &StatsSettings,
) -> Result<Vec<StatEntry>, Error> {
    Ok(content_counts(db).await?.into_entries(settings))
}

#[cfg(test)]
mod tests {
    use super::*;

    use anyhow::Result;
    use folio_storage::{
        db::{crud::Document, schemas::series::Series},
        test_utils::{create_artwork, init_test_database},
    };
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_counts_are_fresh() -> Result<()> {
        let db = init_test_database().await?;
        assert_eq!(content_counts(&db).await?, ContentCounts::default());

        let artwork = create_artwork(&db, "A1", "Ocean", "u1").await?;
        create_artwork(&db, "A2", "", "u2").await?;
        Series::create(&db, Series::for_artwork(&artwork)).await?;

        assert_eq!(
            content_counts(&db).await?,
            ContentCounts {
                artworks: 2,
                series: 1,
                ..Default::default()
            }
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_site_stats_include_configured_figures() -> Result<()> {
        let db = init_test_database().await?;
        create_artwork(&db, "A1", "", "u1").await?;

        let stats = site_stats(
            &db,
            &StatsSettings {
                years_active: 12,
                awards_won: 4,
            },
        )
        .await?;

        assert_eq!(stats[0], StatEntry::new("Artworks Created", 1, "+"));
        assert!(stats.contains(&StatEntry::new("Years Active", 12, "")));
        assert!(stats.contains(&StatEntry::new("Awards Won", 4, "")));
        Ok(())
    }
}
