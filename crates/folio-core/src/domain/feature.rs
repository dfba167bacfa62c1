use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Record, RecordId};

/// Feature entity - a service or highlight linking to more information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    pub id: RecordId,
    pub name: String,
    pub title: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

impl Feature {
    pub const NAME_MAX_LEN: usize = 200;
    pub const TITLE_MAX_LEN: usize = 250;
    pub const URL_MAX_LEN: usize = 500;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFeature {
    pub name: String,
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureChanges {
    pub name: Option<String>,
    pub title: Option<String>,
    pub url: Option<String>,
}

impl FeatureChanges {
    pub fn apply_to(self, feature: &mut Feature) {
        if let Some(name) = self.name {
            feature.name = name;
        }
        if let Some(title) = self.title {
            feature.title = title;
        }
        if let Some(url) = self.url {
            feature.url = url;
        }
    }
}

impl Record for Feature {
    type Key = RecordId;
    type Draft = NewFeature;
    type Changes = FeatureChanges;

    const ENTITY: &'static str = "Feature";
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
