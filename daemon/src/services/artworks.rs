//! Artwork writes, with the series maintenance that follows each of them.
//!
//! Which maintenance runs is chosen by [`SyncMode`].

use log::{error, info};
use surrealdb::{Connection, Surreal};
use tracing::instrument;

use folio_core::config::SyncMode;
use folio_storage::{
    db::{
        crud::Document,
        schemas::artwork::{Artwork, ArtworkChangeSet, ArtworkId, NewArtwork},
    },
    errors::Error,
};

use super::series::{ensure_series_for_artwork, reconcile_series, update_artwork_and_repair_series};

/// Reconcile `title`, logging instead of returning failures.
async fn reconcile_quietly<C: Connection>(db: &Surreal<C>, title: &str, artwork: &ArtworkId) {
    if let Err(e) = reconcile_series(db, title).await {
        error!("Failed to reconcile series \"{title}\" after a change to artwork {artwork}: {e}");
    }
}

/// Store a new artwork.
///
/// # Errors
///
/// Returns the store error if the artwork couldn't be saved. Series maintenance never fails the
/// call.
#[instrument]
pub async fn create_artwork<C: Connection>(
    db: &Surreal<C>,
    mode: SyncMode,
    new: NewArtwork,
) -> Result<Artwork, Error> {
    let artwork = Artwork::create(db, new.into())
        .await?
        .ok_or(Error::NotFound)?;
    info!("Created artwork {} \"{}\"", artwork.id, artwork.title);

    match mode {
        SyncMode::Legacy => ensure_series_for_artwork(db, &artwork).await,
        SyncMode::Reconcile => reconcile_quietly(db, &artwork.series, &artwork.id).await,
    }

    Ok(artwork)
}

/// Apply a partial update to an artwork.
///
/// In legacy mode this is the edit-then-save sequence of the admin panel: the old series gets its
/// images repaired, then the (possibly new) series is registered. In reconcile mode both the old and
/// the new series are recomputed.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if there is no such artwork, or the store error if it couldn't be
/// updated.
#[instrument]
pub async fn update_artwork<C: Connection>(
    db: &Surreal<C>,
    mode: SyncMode,
    id: ArtworkId,
    changes: ArtworkChangeSet,
) -> Result<Artwork, Error> {
    match mode {
        SyncMode::Legacy => {
            let updated = update_artwork_and_repair_series(db, id, changes).await?;
            ensure_series_for_artwork(db, &updated).await;
            Ok(updated)
        }
        SyncMode::Reconcile => {
            let previous = Artwork::read(db, id.clone())
                .await?
                .ok_or(Error::NotFound)?;
            let updated = Artwork::update(db, id, changes.normalized())
                .await?
                .ok_or(Error::NotFound)?;

            reconcile_quietly(db, &previous.series, &updated.id).await;
            if updated.series != previous.series {
                reconcile_quietly(db, &updated.series, &updated.id).await;
            }
            Ok(updated)
        }
    }
}

/// Delete an artwork, returning what was deleted.
///
/// Only reconcile mode updates the series the artwork belonged to.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if there is no such artwork, or the store error if it couldn't be
/// deleted.
#[instrument]
pub async fn delete_artwork<C: Connection>(
    db: &Surreal<C>,
    mode: SyncMode,
    id: ArtworkId,
) -> Result<Artwork, Error> {
    let deleted = Artwork::delete(db, id).await?.ok_or(Error::NotFound)?;
    info!("Deleted artwork {} \"{}\"", deleted.id, deleted.title);

    if mode == SyncMode::Reconcile {
        reconcile_quietly(db, &deleted.series, &deleted.id).await;
    }

    Ok(deleted)
}

#[cfg(test)]
mod tests {
    use super::*;

    use anyhow::{Result, anyhow};
    use folio_storage::{
        db::schemas::series::{Series, SeriesDerived},
        test_utils::init_test_database,
    };
    use pretty_assertions::assert_eq;
    use surrealdb::engine::local::Db;

    fn new_artwork(title: &str, series: &str, image: &str) -> NewArtwork {
        NewArtwork {
            title: title.into(),
            year: 2024,
            medium: "Acrylic".into(),
            series: series.into(),
            image: image.into(),
            ..Default::default()
        }
    }

    /// Every series with artworks holds exactly the values derived from them.
    async fn assert_consistent(db: &Surreal<Db>) -> Result<()> {
        for series in Series::read_all(db).await? {
            let members = Artwork::read_by_series(db, &series.title).await?;
            if members.is_empty() {
                continue;
            }
            let derived = SeriesDerived::from_artworks(&members, &series.cover_image);
            assert!(
                derived.matches(&series),
                "series {} drifted: {series:?} vs {derived:?}",
                series.title
            );
        }
        Ok(())
    }

    async fn series(db: &Surreal<Db>, title: &str) -> Result<Series> {
        Series::read_by_title(db, title)
            .await?
            .ok_or_else(|| anyhow!("series {title} not found"))
    }

    #[tokio::test]
    async fn test_reconcile_mode_keeps_series_consistent() -> Result<()> {
        let db = init_test_database().await?;
        let mode = SyncMode::Reconcile;

        let a1 = create_artwork(&db, mode, new_artwork("A1", "Ocean", "u1")).await?;
        create_artwork(&db, mode, new_artwork("A2", "Ocean", "u2")).await?;
        create_artwork(&db, mode, new_artwork("D1", "Dunes", "d1")).await?;
        assert_consistent(&db).await?;
        assert_eq!(series(&db, "Ocean").await?.images, vec!["u1", "u2"]);
        assert_eq!(series(&db, "Ocean").await?.year, "2024");

        // move the first Ocean artwork into Dunes
        update_artwork(
            &db,
            mode,
            a1.id.clone(),
            ArtworkChangeSet {
                series: Some("Dunes".into()),
                ..Default::default()
            },
        )
        .await?;
        assert_consistent(&db).await?;
        let ocean = series(&db, "Ocean").await?;
        assert_eq!(ocean.images, vec!["u2"]);
        assert_eq!(ocean.cover_image, "u2");
        assert_eq!(ocean.artwork_count, 1);
        assert_eq!(series(&db, "Dunes").await?.artwork_count, 2);

        let a2 = Artwork::read_by_series(&db, "Ocean").await?.remove(0);
        delete_artwork(&db, mode, a2.id).await?;
        assert_consistent(&db).await?;
        // the last artwork left, so Ocean keeps what it had
        let ocean = series(&db, "Ocean").await?;
        assert_eq!(ocean.images, vec!["u2"]);
        assert_eq!(ocean.artwork_count, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_reconcile_mode_ignores_unseriesed_artworks() -> Result<()> {
        let db = init_test_database().await?;
        let loose =
            create_artwork(&db, SyncMode::Reconcile, new_artwork("Loose", "n/a", "x")).await?;
        update_artwork(
            &db,
            SyncMode::Reconcile,
            loose.id.clone(),
            ArtworkChangeSet {
                series: Some(String::new()),
                ..Default::default()
            },
        )
        .await?;
        delete_artwork(&db, SyncMode::Reconcile, loose.id).await?;

        assert!(Series::read_all(&db).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_legacy_mode_repeats_admin_panel_behaviour() -> Result<()> {
        let db = init_test_database().await?;
        let mode = SyncMode::Legacy;

        let a1 = create_artwork(&db, mode, new_artwork("A1", "Ocean", "u1")).await?;
        create_artwork(&db, mode, new_artwork("A2", "Ocean", "u2")).await?;
        let ocean = series(&db, "Ocean").await?;
        assert_eq!(ocean.artwork_count, 2);
        assert_eq!(ocean.images, vec!["u1"]);

        // an edit repairs the images, then registers the artwork again
        update_artwork(
            &db,
            mode,
            a1.id.clone(),
            ArtworkChangeSet {
                image: Some("u1-new".into()),
                ..Default::default()
            },
        )
        .await?;
        let ocean = series(&db, "Ocean").await?;
        assert_eq!(ocean.images, vec!["u1-new", "u2"]);
        assert_eq!(ocean.cover_image, "u1-new");
        assert_eq!(ocean.artwork_count, 3);

        // deletes leave the series alone
        delete_artwork(&db, mode, a1.id).await?;
        assert_eq!(series(&db, "Ocean").await?, ocean);
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_artwork_is_not_found() -> Result<()> {
        let db = init_test_database().await?;
        for mode in [SyncMode::Legacy, SyncMode::Reconcile] {
            let update =
                update_artwork(&db, mode, Artwork::generate_id(), ArtworkChangeSet::default())
                    .await;
            assert!(matches!(update, Err(Error::NotFound)));
            let delete = delete_artwork(&db, mode, Artwork::generate_id()).await;
            assert!(matches!(delete, Err(Error::NotFound)));
        }
        Ok(())
    }
}
