//! Journal handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use surrealdb::sql::Datetime;

use folio_storage::db::schemas::post::{NewPost, Post, PostChangeSet, PostView, TABLE_NAME};

use super::{Resource, require};
use crate::api::{
    ApiError, ApiJson, ApiState, Envelope, Message, data, filter_value, session::AdminUser,
};

const POSTS: Resource = Resource {
    table: TABLE_NAME,
    singular: "blog post",
    label: "Blog post",
    plural: "blog posts",
};

#[derive(Debug, Default, Deserialize)]
pub struct PostQuery {
    pub search: Option<String>,
    pub tag: Option<String>,
}

/// List posts, newest first.
pub async fn list_posts(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<PostQuery>,
) -> Result<Json<Envelope<Vec<PostView>>>, ApiError> {
    let search = filter_value(query.search);
    let tag = filter_value(query.tag);
    let posts = Post::list(&state.db, search.as_deref(), tag.as_deref())
        .await
        .map_err(ApiError::internal("Failed to fetch blog posts"))?;
    Ok(data(posts.into_iter().map(PostView::from).collect()))
}

pub async fn get_post(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<PostView>>, ApiError> {
    POSTS.read::<_, Post, _>(&state.db, &id).await
}

/// Publish a post, dated now.
pub async fn create_post(
    AdminUser(_): AdminUser,
    State(state): State<Arc<ApiState>>,
    ApiJson(new): ApiJson<NewPost>,
) -> Result<Json<Envelope<PostView>>, ApiError> {
    require(&new.title, "Title")?;
    let post = new.into_post(Datetime::default().to_raw());
    POSTS.create::<_, Post, _>(&state.db, post).await
}

pub async fn update_post(
    AdminUser(_): AdminUser,
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
    ApiJson(changes): ApiJson<PostChangeSet>,
) -> Result<Json<Envelope<PostView>>, ApiError> {
    POSTS.update::<_, Post, _>(&state.db, &id, changes).await
}

pub async fn delete_post(
    AdminUser(_): AdminUser,
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<Json<Message>, ApiError> {
    POSTS.delete::<_, Post>(&state.db, &id).await
}
