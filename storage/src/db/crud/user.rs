//! CRUD operations for admin accounts
use surrealdb::{Connection, RecordId, Surreal};
use tracing::instrument;

use crate::{
    db::{
        crud::Document,
        queries::{generic::Count, user::read_by_email},
        schemas::{
            Table,
            subscriber::normalize_email,
            user::{ADMIN_ROLE, User, UserChangeSet},
        },
    },
    errors::Error,
};

impl Document for User {
    type ChangeSet = UserChangeSet;

    #[inline]
    fn id(&self) -> &RecordId {
        &self.id
    }
}

impl User {
    /// Look a user up by email, the address is normalized first.
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

    #[instrument]
    pub async fn count_admins<C: Connection>(db: &Surreal<C>) -> Result<u64, Error> {
        Count::count_where(db, Self::TABLE_NAME, "role", ADMIN_ROLE.to_owned()).await
    }
}
