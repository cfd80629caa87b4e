use anyhow::Result;
use surrealdb::{
    Surreal,
    engine::local::{Db, Mem},
};

use crate::db::{crud::Document, register_tables, schemas::artwork::Artwork};

/// Initialize a fresh in-memory database with every table defined.
///
/// # Errors
///
/// Fails if the in-memory engine can't be started or the schema can't be applied.
pub async fn init_test_database() -> Result<Surreal<Db>> {
    let db = Surreal::new::<Mem>(()).await?;
    db.use_ns("test").use_db("test").await?;
    register_tables(&db).await?;
    Ok(db)
}

/// An artwork with the given title, series and image, and plausible values for everything else.
#[must_use]
pub fn artwork(title: &str, series: &str, image: &str) -> Artwork {
    Artwork {
        id: Artwork::generate_id(),
        title: title.to_owned(),
        year: 2023,
        medium: "Oil on canvas".to_owned(),
        dimensions: "60 x 80 cm".to_owned(),
        series: series.to_owned(),
        image: image.to_owned(),
        description: String::new(),
        featured: false,
        tags: vec!["seascape".to_owned()],
        created_at: None,
        updated_at: None,
    }
}

/// Store [`artwork`] and return what the database stored.
///
/// # Errors
///
/// Fails if the artwork can't be stored.
pub async fn create_artwork(
    db: &Surreal<Db>,
    title: &str,
    series: &str,
    image: &str,
) -> Result<Artwork> {
    Artwork::create(db, artwork(title, series, image))
        .await?
        .ok_or_else(|| anyhow::anyhow!("artwork {title} was not created"))
}
