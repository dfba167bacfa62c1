use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Record, RecordId};

pub type AuthorId = RecordId;

/// Author entity - a person who writes posts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: AuthorId,
    pub fullname: String,
    pub description: String,
    /// Reference to the profile image held by external storage.
    pub thumbnail: String,
    pub created_at: DateTime<Utc>,
}

impl Author {
    pub const FULLNAME_MAX_LEN: usize = 200;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAuthor {
    pub fullname: String,
    pub description: String,
    pub thumbnail: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorChanges {
    pub fullname: Option<String>,
    pub description: Option<String>,
    pub thumbnail: Option<String>,
}

impl AuthorChanges {
    pub fn apply_to(self, author: &mut Author) {
        if let Some(fullname) = self.fullname {
            author.fullname = fullname;
        }
        if let Some(description) = self.description {
            author.description = description;
        }
        if let Some(thumbnail) = self.thumbnail {
            author.thumbnail = thumbnail;
        }
    }
}

impl Record for Author {
    type Key = AuthorId;
    type Draft = NewAuthor;
    type Changes = AuthorChanges;

    const ENTITY: &'static str = "Author";
    const LOOKUP_FIELD: &'static str = "id";

    fn id(&self) -> RecordId {
        self.id
    }

    fn lookup_key(&self) -> AuthorId {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
