use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Author, AuthorId, Record, RecordId};

/// Post entity - a blog article, always loaded together with its author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: RecordId,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub author: Author,
}

impl Post {
    pub const TITLE_MAX_LEN: usize = 250;
    pub const SLUG_MAX_LEN: usize = 250;

    pub fn author_id(&self) -> AuthorId {
        self.author.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub slug: String,
    pub description: String,
    pub author_id: AuthorId,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostChanges {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub author_id: Option<AuthorId>,
}

impl Record for Post {
    type Key = String;
    type Draft = NewPost;
    type Changes = PostChanges;

    const ENTITY: &'static str = "Post";
    const LOOKUP_FIELD: &'static str = "slug";

    fn id(&self) -> RecordId {
        self.id
    }

    fn lookup_key(&self) -> String {
        self.slug.clone()
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// A slug is a non-empty run of ASCII letters, digits, underscores or hyphens.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
