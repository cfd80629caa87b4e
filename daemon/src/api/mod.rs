//! REST API of the portfolio.
//!
//! Reads are public, every mutation goes through the [`AdminUser`](session::AdminUser) extractor.
//! Bodies are wrapped in the envelope the site's front end expects: `{success: true, data}` or
//! `{success: false, error}`.

pub mod error;
pub mod handlers;
pub mod session;

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::FromRequest,
    routing::{get, post},
};
use serde::Serialize;
use surrealdb::{Surreal, engine::local::Db};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use folio_core::config::Settings;
use folio_storage::db::schemas::parse_id;

use crate::termination::InterruptReceiver;

pub use error::ApiError;

/// Shared state for API handlers.
#[derive(Debug)]
pub struct ApiState {
    pub db: Arc<Surreal<Db>>,
    pub settings: Arc<Settings>,
}

impl ApiState {
    #[must_use]
    #[inline]
    pub const fn new(db: Arc<Surreal<Db>>, settings: Arc<Settings>) -> Self {
        Self { db, settings }
    }
}

/// A JSON body whose rejections are rendered in the API's error envelope.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// `{success: true, data}`
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: T,
}

#[inline]
pub fn data<T: Serialize>(data: T) -> Json<Envelope<T>> {
    Json(Envelope {
        success: true,
        data,
    })
}

/// `{success: true, message}`
#[derive(Debug, Serialize)]
pub struct Message {
    pub success: bool,
    pub message: String,
}

#[inline]
pub fn message(message: impl Into<String>) -> Json<Message> {
    Json(Message {
        success: true,
        message: message.into(),
    })
}

/// Parse the id segment of a path into a record id of `table`.
///
/// # Errors
///
/// [`ApiError::BadRequest`] naming `what` when the key isn't one we could have handed out.
#[inline]
pub fn record_id(table: &str, key: &str, what: &str) -> Result<surrealdb::RecordId, ApiError> {
    parse_id(table, key).ok_or_else(|| ApiError::BadRequest(format!("Invalid {what} ID format")))
}

/// Query values of `"all"` (any case) or blank mean "don't filter".
#[must_use]
#[inline]
pub fn filter_value(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty() && !v.eq_ignore_ascii_case("all"))
}

/// Build the API router with all routes.
pub fn router(state: Arc<ApiState>) -> Router {
    use handlers::{artworks, auth, blog, exhibitions, newsletter, process, series, stats};

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Artworks
        .route(
            "/api/artworks",
            get(artworks::list_artworks).post(artworks::create_artwork),
        )
        .route("/api/artworks/featured", get(artworks::featured_artworks))
        .route(
            "/api/artworks/:id",
            get(artworks::get_artwork)
                .put(artworks::update_artwork)
                .delete(artworks::delete_artwork),
        )
        // Series, the static segments take priority over /:id
        .route(
            "/api/series",
            get(series::list_series).post(series::create_series),
        )
        .route("/api/series/sync", post(series::sync_series))
        .route(
            "/api/series/update-from-artwork",
            post(series::update_from_artwork),
        )
        .route(
            "/api/series/:id",
            get(series::get_series)
                .put(series::update_series)
                .delete(series::delete_series),
        )
        // Exhibitions
        .route(
            "/api/exhibitions",
            get(exhibitions::list_exhibitions).post(exhibitions::create_exhibition),
        )
        .route(
            "/api/exhibitions/:id",
            get(exhibitions::get_exhibition)
                .put(exhibitions::update_exhibition)
                .delete(exhibitions::delete_exhibition),
        )
        // Journal
        .route("/api/blog", get(blog::list_posts).post(blog::create_post))
        .route(
            "/api/blog/:id",
            get(blog::get_post)
                .put(blog::update_post)
                .delete(blog::delete_post),
        )
        // Process and studio
        .route(
            "/api/process/materials",
            get(process::list_materials).post(process::create_material),
        )
        .route(
            "/api/process/materials/:id",
            get(process::get_material)
                .put(process::update_material)
                .delete(process::delete_material),
        )
        .route(
            "/api/process/steps",
            get(process::list_steps).post(process::create_step),
        )
        .route(
            "/api/process/steps/:id",
            get(process::get_step)
                .put(process::update_step)
                .delete(process::delete_step),
        )
        .route(
            "/api/process/studio",
            get(process::list_studio_images).post(process::create_studio_image),
        )
        .route(
            "/api/process/studio/:id",
            get(process::get_studio_image)
                .put(process::update_studio_image)
                .delete(process::delete_studio_image),
        )
        .route(
            "/api/process/videos",
            get(process::list_videos).post(process::create_video),
        )
        .route(
            "/api/process/videos/:id",
            get(process::get_video)
                .put(process::update_video)
                .delete(process::delete_video),
        )
        // Newsletter, stats and auth
        .route("/api/newsletter", post(newsletter::subscribe))
        .route("/api/stats", get(stats::get_stats))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/me", get(auth::me))
        // Middleware
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "request",
                        method = %request.method(),
                        uri = %request.uri(),
                    )
                })
                .on_request(())
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     _span: &tracing::Span| {
                        let status = response.status();
                        if !status.is_success() {
                            tracing::warn!(
                                status = %status,
                                latency_ms = latency.as_millis(),
                                "request failed"
                            );
                        }
                    },
                ),
        )
        .with_state(state)
}

/// Serve the API on `bind_addr` until `interrupt` fires.
///
/// # Errors
///
/// Fails if the address can't be bound or the server stops with an io error.
pub async fn serve(
    state: Arc<ApiState>,
    bind_addr: &str,
    interrupt: InterruptReceiver,
) -> anyhow::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;

    log::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(interrupt.shutdown_signal())
        .await?;

    Ok(())
}
