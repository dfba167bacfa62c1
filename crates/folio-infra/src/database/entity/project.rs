//! Project entity for SeaORM.

use chrono::Utc;
use sea_orm::Set;
use sea_orm::entity::prelude::*;

use folio_core::domain::{NewProject, Project, ProjectChanges};

use crate::database::postgres_base::{ApplyChanges, RecordEntity};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub created_at: DateTimeWithTimeZone,
    pub thumbnail: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl RecordEntity for Entity {
    type Record = Project;

    fn id_column() -> Column {
        Column::Id
    }

    fn created_at_column() -> Column {
        Column::CreatedAt
    }
}

impl From<Model> for Project {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            created_at: model.created_at.into(),
            thumbnail: model.thumbnail,
        }
    }
}

impl From<NewProject> for ActiveModel {
    fn from(project: NewProject) -> Self {
        Self {
            title: Set(project.title),
            description: Set(project.description),
            created_at: Set(Utc::now().into()),
            thumbnail: Set(project.thumbnail),
            ..Default::default()
        }
    }
}

impl ApplyChanges<ProjectChanges> for ActiveModel {
    fn apply_changes(&mut self, changes: ProjectChanges) {
        if let Some(title) = changes.title {
            self.title = Set(title);
        }
        if let Some(description) = changes.description {
            self.description = Set(description);
        }
        if let Some(thumbnail) = changes.thumbnail {
            self.thumbnail = Set(thumbnail);
        }
    }
}
