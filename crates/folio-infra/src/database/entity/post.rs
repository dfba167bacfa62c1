//! Post entity for SeaORM.

use chrono::Utc;
use sea_orm::Set;
use sea_orm::entity::prelude::*;

use folio_core::domain::{self, NewPost, PostChanges};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(unique)]
    pub slug: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub author_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::author::Entity",
        from = "Column::AuthorId",
        to = "super::author::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Author,
}

impl Related<super::author::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Combine a post row with its author row into the domain record.
    pub fn with_author(self, author: super::author::Model) -> domain::Post {
        domain::Post {
            id: self.id,
            title: self.title,
            slug: self.slug,
            description: self.description,
            created_at: self.created_at.into(),
            updated_at: self.updated_at.into(),
            author: author.into(),
        }
    }
}

impl From<NewPost> for ActiveModel {
    fn from(post: NewPost) -> Self {
        let now: DateTimeWithTimeZone = Utc::now().into();
        Self {
            title: Set(post.title),
            slug: Set(post.slug),
            description: Set(post.description),
            created_at: Set(now),
            updated_at: Set(now),
            author_id: Set(post.author_id),
            ..Default::default()
        }
    }
}

impl ActiveModel {
    /// Apply changes and stamp `updated_at`.
    pub fn apply_post_changes(&mut self, changes: PostChanges) {
        if let Some(title) = changes.title {
            self.title = Set(title);
        }
        if let Some(slug) = changes.slug {
            self.slug = Set(slug);
        }
        if let Some(description) = changes.description {
            self.description = Set(description);
        }
        if let Some(author_id) = changes.author_id {
            self.author_id = Set(author_id);
        }
        self.updated_at = Set(Utc::now().into());
    }
}
