//! Journal (blog) posts.

use serde::{Deserialize, Serialize};
use surrealdb::{RecordId, sql::Datetime};

use super::{Table, generate_id, record_key};

pub type PostId = RecordId;

pub const TABLE_NAME: &str = "blog_posts";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub author: String,
    /// RFC 3339 publication date, set when the post is created.
    pub date: String,
    /// e.g. "5 min read".
    #[serde(default)]
    pub read_time: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Datetime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Datetime>,
}

impl Table for Post {
    const TABLE_NAME: &'static str = TABLE_NAME;
    const TABLE_SCHEMA_QUERY: &'static str = r"
        DEFINE TABLE OVERWRITE blog_posts SCHEMAFULL;
        DEFINE FIELD OVERWRITE title ON blog_posts TYPE string;
        DEFINE FIELD OVERWRITE excerpt ON blog_posts TYPE string DEFAULT '';
        DEFINE FIELD OVERWRITE `content` ON blog_posts TYPE string DEFAULT '';
        DEFINE FIELD OVERWRITE author ON blog_posts TYPE string DEFAULT '';
        DEFINE FIELD OVERWRITE `date` ON blog_posts TYPE string;
        DEFINE FIELD OVERWRITE readTime ON blog_posts TYPE string DEFAULT '';
        DEFINE FIELD OVERWRITE image ON blog_posts TYPE string DEFAULT '';
        DEFINE FIELD OVERWRITE tags ON blog_posts TYPE array<string> DEFAULT [];
        DEFINE FIELD OVERWRITE featured ON blog_posts TYPE bool DEFAULT false;
        DEFINE FIELD OVERWRITE createdAt ON blog_posts TYPE datetime DEFAULT time::now() READONLY;
        DEFINE FIELD OVERWRITE updatedAt ON blog_posts TYPE datetime VALUE time::now();
    ";
}

impl Post {
    #[must_use]
    #[inline]
    pub fn generate_id() -> PostId {
        generate_id(TABLE_NAME)
    }

    /// Case-insensitive match of `needle` against the title, excerpt and tags.
    #[must_use]
    pub fn matches_search(&self, needle: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        needle.is_empty()
            || self.title.to_lowercase().contains(&needle)
            || self.excerpt.to_lowercase().contains(&needle)
            || self
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(&needle))
    }

    #[must_use]
    #[inline]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewPost {
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub author: String,
    pub read_time: String,
    pub image: String,
    pub tags: Vec<String>,
    pub featured: bool,
}

impl NewPost {
    /// Turn the submitted fields into a post published at `date`.
    #[must_use]
    pub fn into_post(self, date: String) -> Post {
        Post {
            id: Post::generate_id(),
            title: self.title,
            excerpt: self.excerpt,
            content: self.content,
            author: self.author,
            date,
            read_time: self.read_time,
            image: self.image,
            tags: self.tags,
            featured: self.featured,
            created_at: None,
            updated_at: None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostChangeSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostView {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub author: String,
    pub date: String,
    pub read_time: String,
    pub image: String,
    pub tags: Vec<String>,
    pub featured: bool,
}

impl From<Post> for PostView {
    #[inline]
    fn from(post: Post) -> Self {
        Self {
            id: record_key(&post.id),
            title: post.title,
            excerpt: post.excerpt,
            content: post.content,
            author: post.author,
            date: post.date,
            read_time: post.read_time,
            image: post.image,
            tags: post.tags,
            featured: post.featured,
        }
    }
}
