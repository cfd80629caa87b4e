//! Newsletter subscribers.

use serde::{Deserialize, Serialize};
use surrealdb::{RecordId, sql::Datetime};

use super::{Table, generate_id};

pub type SubscriberId = RecordId;

pub const TABLE_NAME: &str = "newsletter_subscribers";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscriber {
    pub id: SubscriberId,
    /// Trimmed, lowercased address. Unique.
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscribed_at: Option<Datetime>,
    #[serde(default = "default_active")]
    pub active: bool,
}

const fn default_active() -> bool {
    true
}

impl Table for Subscriber {
    const TABLE_NAME: &'static str = TABLE_NAME;
    const TABLE_SCHEMA_QUERY: &'static str = r"
        DEFINE TABLE OVERWRITE newsletter_subscribers SCHEMAFULL;
        DEFINE FIELD OVERWRITE email ON newsletter_subscribers TYPE string;
        DEFINE FIELD OVERWRITE subscribedAt ON newsletter_subscribers TYPE datetime DEFAULT time::now() READONLY;
        DEFINE FIELD OVERWRITE active ON newsletter_subscribers TYPE bool DEFAULT true;
        DEFINE INDEX OVERWRITE newsletter_subscribers_email_idx ON newsletter_subscribers FIELDS email UNIQUE;
    ";
}

/// Normalize an email address for storage and lookup.
#[must_use]
#[inline]
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl Subscriber {
    #[must_use]
    #[inline]
    pub fn generate_id() -> SubscriberId {
        generate_id(TABLE_NAME)
    }

    #[must_use]
    #[inline]
    pub fn new(email: &str) -> Self {
        Self {
            id: Self::generate_id(),
            email: normalize_email(email),
            subscribed_at: None,
            active: true,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriberChangeSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}
