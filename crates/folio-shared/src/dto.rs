//! Data Transfer Objects - response bodies for the content API.
//!
//! Response types mirror the stored records. Request bodies are read field by
//! field on the server so that every problem can be reported at once.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An author as rendered by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorResponse {
    pub id: i32,
    pub fullname: String,
    pub description: String,
    pub thumbnail: String,
    pub timestamp: DateTime<Utc>,
}

/// A post with its author nested in full.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub timestamp: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
    pub author: AuthorResponse,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureResponse {
    pub id: i32,
    pub name: String,
    pub title: String,
    pub url: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectResponse {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub timestamp: DateTime<Utc>,
    pub thumbnail: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AboutResponse {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub mission: String,
    pub timestamp: DateTime<Utc>,
    pub thumbnail: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_response_nests_author() {
        let now = Utc::now();
        let post = PostResponse {
            id: 1,
            title: "T".to_string(),
            slug: "t".to_string(),
            description: "x".to_string(),
            timestamp: now,
            last_updated: now,
            author: AuthorResponse {
                id: 1,
                fullname: "A".to_string(),
                description: "d".to_string(),
                thumbnail: "authors/thumbnails/a.png".to_string(),
                timestamp: now,
            },
        };
        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["author"]["fullname"], "A");
        assert!(json.get("author_id").is_none());
    }
}
