//! Author entity for SeaORM.

use chrono::Utc;
use sea_orm::Set;
use sea_orm::entity::prelude::*;

use folio_core::domain::{Author, AuthorChanges, NewAuthor};

use crate::database::postgres_base::{ApplyChanges, RecordEntity};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "authors")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub fullname: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub thumbnail: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::post::Entity")]
    Post,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl RecordEntity for Entity {
    type Record = Author;

    fn id_column() -> Column {
        Column::Id
    }

    fn created_at_column() -> Column {
        Column::CreatedAt
    }
}

impl From<Model> for Author {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            fullname: model.fullname,
            description: model.description,
            thumbnail: model.thumbnail,
            created_at: model.created_at.into(),
        }
    }
}

impl From<NewAuthor> for ActiveModel {
    fn from(author: NewAuthor) -> Self {
        Self {
            fullname: Set(author.fullname),
            description: Set(author.description),
            thumbnail: Set(author.thumbnail),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        }
    }
}

impl ApplyChanges<AuthorChanges> for ActiveModel {
    fn apply_changes(&mut self, changes: AuthorChanges) {
        if let Some(fullname) = changes.fullname {
            self.fullname = Set(fullname);
        }
        if let Some(description) = changes.description {
            self.description = Set(description);
        }
        if let Some(thumbnail) = changes.thumbnail {
            self.thumbnail = Set(thumbnail);
        }
    }
}
