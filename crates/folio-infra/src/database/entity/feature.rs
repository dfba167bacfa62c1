//! Feature entity for SeaORM.

use chrono::Utc;
use sea_orm::Set;
use sea_orm::entity::prelude::*;

use folio_core::domain::{Feature, FeatureChanges, NewFeature};

use crate::database::postgres_base::{ApplyChanges, RecordEntity};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "features")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub title: String,
    pub url: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl RecordEntity for Entity {
    type Record = Feature;

    fn id_column() -> Column {
        Column::Id
    }

    fn created_at_column() -> Column {
        Column::CreatedAt
    }
}

impl From<Model> for Feature {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            title: model.title,
            url: model.url,
            created_at: model.created_at.into(),
        }
    }
}

impl From<NewFeature> for ActiveModel {
    fn from(feature: NewFeature) -> Self {
        Self {
            name: Set(feature.name),
            title: Set(feature.title),
            url: Set(feature.url),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        }
    }
}

impl ApplyChanges<FeatureChanges> for ActiveModel {
    fn apply_changes(&mut self, changes: FeatureChanges) {
        if let Some(name) = changes.name {
            self.name = Set(name);
        }
        if let Some(title) = changes.title {
            self.title = Set(title);
        }
        if let Some(url) = changes.url {
            self.url = Set(url);
        }
    }
}
