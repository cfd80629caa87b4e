//----------------------------------------------------------------------------------------- std lib
use std::sync::Arc;
//--------------------------------------------------------------------------------- other libraries
use log::{error, info, warn};
//-------------------------------------------------------------------------------- FOLIO libraries
use folio_core::{
    config::Settings,
    logger::{init_logger, init_tracing},
};
use folio_storage::db::{
    health::{count_artworks, count_exhibitions, count_posts, count_series, count_subscribers},
    init_database, set_database_path,
};

pub mod api;
pub mod services;
pub mod termination;
#[cfg(test)]
pub mod test_utils;

use crate::api::ApiState;

/// Run the daemon
///
/// also initializes the logger, database, and tracing.
///
/// # Arguments
///
/// * `settings` - The settings to use.
/// * `db_dir` - The directory where the database is stored.
///   If the directory does not exist, it will be created.
///
/// # Errors
///
/// If the daemon cannot be started, an error is returned.
#[inline]
pub async fn start_daemon(settings: Settings, db_dir: std::path::PathBuf) -> anyhow::Result<()> {
    let settings = Arc::new(settings);

    // Initialize the logger, database, and tracing.
    init_logger(settings.server.log_level);
    set_database_path(db_dir)?;
    let db = Arc::new(init_database().await?);
    tracing::subscriber::set_global_default(init_tracing())?;

    log_content_summary(&db).await;
    warn_about_default_secret(&settings);

    // initialize the termination handler
    let (_terminator, interrupt_rx) = termination::create_termination()?;

    let bind_addr = format!("{}:{}", settings.server.bind_address, settings.server.port);
    let state = Arc::new(ApiState::new(db, settings.clone()));

    if let Err(e) = api::serve(state, &bind_addr, interrupt_rx).await {
        error!("Server stopped unexpectedly: {e}");
        return Err(e);
    }

    info!("Cleanup complete, exiting...");
    Ok(())
}

async fn log_content_summary(db: &surrealdb::Surreal<surrealdb::engine::local::Db>) {
    let counts = async {
        Ok::<_, folio_storage::errors::Error>((
            count_artworks(db).await?,
            count_series(db).await?,
            count_exhibitions(db).await?,
            count_posts(db).await?,
            count_subscribers(db).await?,
        ))
    };
    match counts.await {
        Ok((artworks, series, exhibitions, posts, subscribers)) => info!(
            "Serving {artworks} artworks in {series} series, {exhibitions} exhibitions, \
             {posts} journal posts, {subscribers} newsletter subscribers"
        ),
        Err(e) => error!("Failed to count content: {e}"),
    }
}

fn warn_about_default_secret(settings: &Settings) {
    if settings.auth.has_default_secret() {
        warn!(
            "Session tokens are signed with the default secret, anyone can forge an admin token. \
             Set auth.token_secret in the config file or FOLIO_AUTH__TOKEN_SECRET."
        );
    }
}

/// Bootstrap the first admin account in the database under `db_dir`.
///
/// # Errors
///
/// Fails if the database can't be opened, or if an admin already exists.
#[inline]
pub async fn create_admin(
    settings: &Settings,
    db_dir: std::path::PathBuf,
    name: &str,
    email: &str,
    password: &str,
) -> anyhow::Result<()> {
    init_logger(settings.server.log_level);
    set_database_path(db_dir)?;
    let db = init_database().await?;

    let user = services::auth::create_admin(&db, name, email, password).await?;
    info!("Admin account {} is ready", user.email);
    Ok(())
}
