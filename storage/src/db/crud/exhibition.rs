//! CRUD operations for the exhibitions table
use surrealdb::{Connection, RecordId, Surreal};
use tracing::instrument;

use crate::{
    db::{
        crud::Document,
        queries::exhibition::list,
        schemas::exhibition::{Exhibition, ExhibitionChangeSet},
    },
    errors::Error,
};

impl Document for Exhibition {
    type ChangeSet = ExhibitionChangeSet;

    #[inline]
    fn id(&self) -> &RecordId {
        &self.id
    }
}

impl Exhibition {
    /// List exhibitions, latest start date first, optionally only those with the given status.
    #[instrument]
    pub async fn list<C: Connection>(
        db: &Surreal<C>,
        status: Option<String>,
    ) -> Result<Vec<Self>, Error> {
        let query = db.query(list(status.is_some()));
        let query = match status {
            Some(status) => query.bind(("status", status)),
            None => query,
        };
        Ok(query.await?.take(0)?)
    }
}
