use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Record, RecordId};

/// Project entity - a portfolio item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: RecordId,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub thumbnail: String,
}

impl Project {
    pub const TITLE_MAX_LEN: usize = 250;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    pub title: String,
    pub description: String,
    pub thumbnail: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub thumbnail: Option<String>,
}

impl ProjectChanges {
    pub fn apply_to(self, project: &mut Project) {
        if let Some(title) = self.title {
            project.title = title;
        }
        if let Some(description) = self.description {
            project.description = description;
        }
        if let Some(thumbnail) = self.thumbnail {
            project.thumbnail = thumbnail;
        }
    }
}

impl Record for Project {
    type Key = RecordId;
    type Draft = NewProject;
    type Changes = ProjectChanges;

    const ENTITY: &'static str = "Project";
    const LOOKUP_FIELD: &'static str = "id";

    fn id(&self) -> RecordId {
        self.id
    }

    fn lookup_key(&self) -> RecordId {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
