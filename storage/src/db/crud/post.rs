//! CRUD operations for the journal
use surrealdb::{Connection, RecordId, Surreal};
use tracing::instrument;

use crate::{
    db::{
        crud::Document,
        queries::post::list,
        schemas::post::{Post, PostChangeSet},
    },
    errors::Error,
};

impl Document for Post {
    type ChangeSet = PostChangeSet;

    #[inline]
    fn id(&self) -> &RecordId {
        &self.id
    }
}

impl Post {
    /// List posts, newest first, keeping those that match `search` and carry `tag` when given.
    #[instrument]
    pub async fn list<C: Connection>(
        db: &Surreal<C>,
        search: Option<&str>,
        tag: Option<&str>,
    ) -> Result<Vec<Self>, Error> {
        let posts: Vec<Self> = db.query(list()).await?.take(0)?;
        Ok(posts
            .into_iter()
            .filter(|post| search.is_none_or(|needle| post.matches_search(needle)))
            .filter(|post| tag.is_none_or(|tag| post.has_tag(tag)))
            .collect())
    }
}
