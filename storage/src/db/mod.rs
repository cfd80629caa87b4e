pub mod crud;
pub mod health;
pub mod queries;
pub mod schemas;

use std::path::PathBuf;

use log::info;
use once_cell::sync::OnceCell;
use surrealdb::{
    Connection, Surreal,
    engine::local::{Db, SurrealKv},
};

use crate::{
    db::schemas::{
        Table,
        artwork::Artwork,
        exhibition::Exhibition,
        post::Post,
        process::{Material, ProcessStep, StudioImage, TimelapseVideo},
        series::Series,
        subscriber::Subscriber,
        user::User,
    },
    errors::Error,
};

static DB_DIR: OnceCell<PathBuf> = OnceCell::new();

/// Set the path to the database.
///
/// # Errors
///
/// This function will return an error if the path cannot be set.
#[inline]
pub fn set_database_path(path: PathBuf) -> Result<(), Error> {
    DB_DIR
        .set(path)
        .map_err(Error::DbPathSetError)?;
    info!("Primed database path");
    Ok(())
}

/// Open the on-disk database and make sure every table is defined.
///
/// # Errors
///
/// Fails if [`set_database_path`] hasn't been called, or if the database can't be opened.
#[inline]
pub async fn init_database() -> Result<Surreal<Db>, Error> {
    let path = DB_DIR.get().ok_or(Error::DbNotInitialized)?;
    let db = Surreal::new::<SurrealKv>(path.clone()).await?;

    db.use_ns("folio").use_db("portfolio").await?;
    register_tables(&db).await?;

    info!("Connected to portfolio database at {}", path.display());
    Ok(db)
}

/// Define (or redefine) the schema of every table.
///
/// # Errors
///
/// Fails if any of the schema queries fail.
#[inline]
pub async fn register_tables<C: Connection>(db: &Surreal<C>) -> Result<(), Error> {
    Artwork::init_table(db).await?;
    Series::init_table(db).await?;
    Exhibition::init_table(db).await?;
    Post::init_table(db).await?;
    Material::init_table(db).await?;
    ProcessStep::init_table(db).await?;
    StudioImage::init_table(db).await?;
    TimelapseVideo::init_table(db).await?;
    Subscriber::init_table(db).await?;
    User::init_table(db).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use anyhow::Result;
    use surrealdb::engine::local::Mem;

    #[tokio::test]
    async fn test_register_tables_is_repeatable() -> Result<()> {
        let db = Surreal::new::<Mem>(()).await?;
        db.use_ns("test").use_db("test").await?;

        register_tables(&db).await?;
        register_tables(&db).await?;
        Ok(())
    }
}
