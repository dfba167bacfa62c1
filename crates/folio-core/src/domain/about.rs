use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Record, RecordId};

/// About entity - an "about us" section with a mission statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct About {
    pub id: RecordId,
    pub title: String,
    pub description: String,
    pub mission: String,
    pub created_at: DateTime<Utc>,
    pub thumbnail: String,
}

impl About {
    pub const TITLE_MAX_LEN: usize = 250;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAbout {
    pub title: String,
    pub description: String,
    pub mission: String,
    pub thumbnail: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AboutChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub mission: Option<String>,
    pub thumbnail: Option<String>,
}

impl AboutChanges {
    pub fn apply_to(self, about: &mut About) {
        if let Some(title) = self.title {
            about.title = title;
        }
        if let Some(description) = self.description {
            about.description = description;
        }
        if let Some(mission) = self.mission {
            about.mission = mission;
        }
        if let Some(thumbnail) = self.thumbnail {
            about.thumbnail = thumbnail;
        }
    }
}

impl Record for About {
    type Key = RecordId;
    type Draft = NewAbout;
    type Changes = AboutChanges;

    const ENTITY: &'static str = "About";
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
