//! CRUD operations for the newsletter subscribers
use surrealdb::{Connection, RecordId, Surreal};
use tracing::instrument;

use crate::{
    db::{
        crud::Document,
        queries::subscriber::read_by_email,
        schemas::subscriber::{Subscriber, SubscriberChangeSet, normalize_email},
    },
    errors::Error,
};

impl Document for Subscriber {
    type ChangeSet = SubscriberChangeSet;

    #[inline]
    fn id(&self) -> &RecordId {
        &self.id
    }
}

impl Subscriber {
    /// Look a subscriber up by email, the address is normalized first.
    #[instrument]
    pub async fn read_by_email<C: Connection>(
        db: &Surreal<C>,
        email: &str,
    ) -> Result<Option<Self>, Error> {
        Ok(db
            .query(read_by_email())
            .bind(("email", normalize_email(email)))
            .await?
            .take(0)?)
    }
}
