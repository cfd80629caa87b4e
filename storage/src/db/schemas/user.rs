//! Accounts that can sign in to the admin panel.

use serde::{Deserialize, Serialize};
use surrealdb::{RecordId, sql::Datetime};

use super::{Table, generate_id, record_key, subscriber::normalize_email};

pub type UserId = RecordId;

pub const TABLE_NAME: &str = "users";

pub const ADMIN_ROLE: &str = "admin";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    /// Trimmed, lowercased address. Unique.
    pub email: String,
    /// PHC-formatted password hash.
    pub password_hash: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Datetime>,
}

impl Table for User {
    const TABLE_NAME: &'static str = TABLE_NAME;
    const TABLE_SCHEMA_QUERY: &'static str = r"
        DEFINE TABLE OVERWRITE users SCHEMAFULL;
        DEFINE FIELD OVERWRITE name ON users TYPE string;
        DEFINE FIELD OVERWRITE email ON users TYPE string;
        DEFINE FIELD OVERWRITE passwordHash ON users TYPE string;
        DEFINE FIELD OVERWRITE role ON users TYPE string DEFAULT 'admin';
        DEFINE FIELD OVERWRITE createdAt ON users TYPE datetime DEFAULT time::now() READONLY;
        DEFINE INDEX OVERWRITE users_email_idx ON users FIELDS email UNIQUE;
    ";
}

impl User {
    #[must_use]
    #[inline]
    pub fn generate_id() -> UserId {
        generate_id(TABLE_NAME)
    }

    /// A new admin account. `password_hash` must already be hashed.
    #[must_use]
    pub fn new_admin(name: &str, email: &str, password_hash: String) -> Self {
        Self {
            id: Self::generate_id(),
            name: name.to_owned(),
            email: normalize_email(email),
            password_hash,
            role: ADMIN_ROLE.to_owned(),
            created_at: None,
        }
    }

    #[must_use]
    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }
}

/// The public part of a user, never includes the password hash.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserBrief {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
}

impl From<User> for UserBrief {
    #[inline]
    fn from(user: User) -> Self {
        Self {
            id: record_key(&user.id),
            name: user.name,
            email: user.email,
            role: user.role,
        }
    }
}

impl From<&User> for UserBrief {
    #[inline]
    fn from(user: &User) -> Self {
        Self {
            id: record_key(&user.id),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role.clone(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserChangeSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    #[fixture]
    fn user() -> User {
        User::new_admin("Ada", " Ada@Example.com", "$argon2id$hash".into())
    }

    #[rstest]
    #[case(user())]
    fn test_brief_from_user(#[case] user: User) {
        let brief = UserBrief::from(&user);
        assert_eq!(brief, UserBrief::from(user.clone()));
        assert_eq!(brief.email, "ada@example.com");
        assert_eq!(brief.role, ADMIN_ROLE);
        assert!(user.is_admin());
    }

    #[rstest]
    fn test_brief_never_serializes_hash(user: User) {
        let json = serde_json::to_string(&UserBrief::from(user)).unwrap();
        assert!(!json.contains("argon2"));
    }
}
