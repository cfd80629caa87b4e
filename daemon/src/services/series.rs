//! Keeps the derived fields of each series (`images`, `coverImage`, `artworkCount`) in step with the
//! artworks that reference the series by title.
//!
//! There are three entry points, matching the moments the admin panel touches artworks:
//!
//! - [`ensure_series_for_artwork`] runs after an artwork is saved, and registers its series.
//! - [`update_artwork_and_repair_series`] applies an edit to an artwork and patches the images of
//!   the series it belonged to.
//! - [`resync_all_series`] recomputes every series from scratch.
//!
//! [`reconcile_series`] recomputes (or creates) a single series, and is what the artwork service
//! uses in [`SyncMode::Reconcile`](folio_core::config::SyncMode::Reconcile).

use futures::future::join_all;
use log::{debug, error, warn};
use surrealdb::{Connection, Surreal};
use tracing::instrument;

use folio_core::state::SyncOutcome;
use folio_storage::{
    db::{
        crud::{Document, series::Reconciliation},
        schemas::{
            artwork::{Artwork, ArtworkChangeSet, ArtworkId},
            series::Series,
        },
    },
    errors::Error,
};

/// Make sure the series named by `artwork` exists.
///
/// A novel title creates the series, seeded from this artwork. An existing series only has its
/// `artworkCount` bumped, its images and cover are left alone.
///
/// Failures are logged, never returned: the artwork has already been saved.
#[instrument]
pub async fn ensure_series_for_artwork<C: Connection>(db: &Surreal<C>, artwork: &Artwork) {
    if !artwork.has_series() {
        return;
    }

    if let Err(e) = Series::insert_or_count_artwork(db, Series::for_artwork(artwork)).await {
        error!(
            "Failed to register series \"{}\" for artwork {}: {e}",
            artwork.series, artwork.id
        );
    }
}

/// Apply `changes` to an artwork, then rewrite the images of the series it belonged to before the
/// edit.
///
/// The series is patched in place: its `images` are rebuilt from the artworks that still carry its
/// title, and its cover is replaced only when the edited artwork comes first.
/// Any non-empty title is repaired, including ones [`ensure_series_for_artwork`] would not register,
/// such as a series titled "N/A" that was created by hand.
/// A series the artwork moves into is not touched here.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if there is no such artwork, or the store error if the artwork
/// couldn't be updated. Failures while repairing the series are logged and swallowed.
#[instrument]
pub async fn update_artwork_and_repair_series<C: Connection>(
    db: &Surreal<C>,
    id: ArtworkId,
    changes: ArtworkChangeSet,
) -> Result<Artwork, Error> {
    let series_title = Artwork::read(db, id.clone())
        .await?
        .ok_or(Error::NotFound)?
        .series;

    let new_image = changes.image.clone().filter(|image| !image.is_empty());
    let updated = Artwork::update(db, id, changes.normalized())
        .await?
        .ok_or(Error::NotFound)?;

    if !series_title.is_empty() {
        if let Err(e) = repair_series_images(db, &series_title, &updated.id, new_image).await {
            error!(
                "Failed to repair series \"{series_title}\" after editing artwork {}: {e}",
                updated.id
            );
        }
    }

    Ok(updated)
}

async fn repair_series_images<C: Connection>(
    db: &Surreal<C>,
    series_title: &str,
    edited: &ArtworkId,
    new_image: Option<String>,
) -> Result<(), Error> {
    let artworks = Artwork::read_by_series(db, series_title).await?;

    let images: Vec<String> = artworks
        .iter()
        .map(|artwork| match &new_image {
            Some(image) if &artwork.id == edited => image.clone(),
            _ => artwork.image.clone(),
        })
        .filter(|image| !image.is_empty())
        .collect();

    debug!(
        "Writing {} images onto series \"{series_title}\"",
        images.len()
    );
    Series::set_images_by_title(db, series_title, images.clone()).await?;

    let edited_is_first = artworks.first().is_some_and(|first| &first.id == edited);
    if edited_is_first {
        if let Some(cover) = images.into_iter().next() {
            Series::set_cover_by_title(db, series_title, cover).await?;
        }
    }

    Ok(())
}

/// Recompute the derived fields of every series from the artworks that reference it.
///
/// The series are processed concurrently and independently: a failure is reported in the outcome
/// of that series only. A series that no artwork references is left untouched.
///
/// # Errors
///
/// Fails only if the series themselves can't be listed.
#[instrument]
pub async fn resync_all_series<C: Connection>(db: &Surreal<C>) -> Result<Vec<SyncOutcome>, Error> {
    let series = Series::read_all(db).await?;

    Ok(join_all(series.iter().map(|series| resync_one(db, series))).await)
}

async fn resync_one<C: Connection>(db: &Surreal<C>, series: &Series) -> SyncOutcome {
    match Series::resync(db, series).await {
        Ok(Some(derived)) => SyncOutcome::updated(series.title.clone(), derived.images.len()),
        Ok(None) => {
            warn!("Series \"{}\" has no artworks, leaving it as is", series.title);
            SyncOutcome::untouched(series.title.clone())
        }
        Err(e) => {
            error!("Failed to resync series \"{}\": {e}", series.title);
            SyncOutcome::failed(series.title.clone(), e.to_string())
        }
    }
}

/// Bring the series titled `title` in line with its artworks, creating it if needed.
///
/// # Errors
///
/// Returns the store error if the artworks or the series couldn't be read or written.
#[instrument]
pub async fn reconcile_series<C: Connection>(
    db: &Surreal<C>,
    title: &str,
) -> Result<Reconciliation, Error> {
    let reconciliation = Series::reconcile(db, title).await?;
    debug!("Reconciled series \"{title}\": {reconciliation:?}");
    Ok(reconciliation)
}
