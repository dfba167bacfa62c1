//! About entity for SeaORM.

use chrono::Utc;
use sea_orm::Set;
use sea_orm::entity::prelude::*;

use folio_core::domain::{About, AboutChanges, NewAbout};

use crate::database::postgres_base::{ApplyChanges, RecordEntity};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "about")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(column_type = "Text")]
    pub mission: String,
    pub created_at: DateTimeWithTimeZone,
    pub thumbnail: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl RecordEntity for Entity {
    type Record = About;

    fn id_column() -> Column {
        Column::Id
    }

    fn created_at_column() -> Column {
        Column::CreatedAt
    }
}

impl From<Model> for About {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            mission: model.mission,
            created_at: model.created_at.into(),
            thumbnail: model.thumbnail,
        }
    }
}

impl From<NewAbout> for ActiveModel {
    fn from(about: NewAbout) -> Self {
        Self {
            title: Set(about.title),
            description: Set(about.description),
            mission: Set(about.mission),
            created_at: Set(Utc::now().into()),
            thumbnail: Set(about.thumbnail),
            ..Default::default()
        }
    }
}

impl ApplyChanges<AboutChanges> for ActiveModel {
    fn apply_changes(&mut self, changes: AboutChanges) {
        if let Some(title) = changes.title {
            self.title = Set(title);
        }
        if let Some(description) = changes.description {
            self.description = Set(description);
        }
        if let Some(mission) = changes.mission {
            self.mission = Set(mission);
        }
        if let Some(thumbnail) = changes.thumbnail {
            self.thumbnail = Set(thumbnail);
        }
    }
}
