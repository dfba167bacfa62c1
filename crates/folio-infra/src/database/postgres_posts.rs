//! PostgreSQL post repository. Posts are addressed by slug and always
//! loaded together with their author.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder,
};

use folio_core::RepoError;
use folio_core::domain::{NewPost, Post, PostChanges};
use folio_core::ports::Repository;

use super::entity::author::{self, Entity as AuthorEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::postgres_base::map_db_err;

pub struct PostgresPostRepository {
    db: Arc<DbConn>,
}

impl PostgresPostRepository {
    pub fn new(db: Arc<DbConn>) -> Self {
        Self { db }
    }

    async fn find_row(&self, slug: &str) -> Result<Option<post::Model>, RepoError> {
        PostEntity::find()
            .filter(post::Column::Slug.eq(slug))
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)
    }

    async fn attach_author(&self, row: post::Model) -> Result<Post, RepoError> {
        let author = AuthorEntity::find_by_id(row.author_id)
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)?
            .ok_or_else(|| missing_author(&row))?;

        Ok(row.with_author(author))
    }
}

fn missing_author(row: &post::Model) -> RepoError {
    RepoError::Query(format!(
        "post {} references missing author {}",
        row.id, row.author_id
    ))
}

fn joined((row, author): (post::Model, Option<author::Model>)) -> Result<Post, RepoError> {
    match author {
        Some(author) => Ok(row.with_author(author)),
        None => Err(missing_author(&row)),
    }
}

#[async_trait]
impl Repository<Post> for PostgresPostRepository {
    async fn list(&self) -> Result<Vec<Post>, RepoError> {
        let rows = PostEntity::find()
            .find_also_related(AuthorEntity)
            .order_by_desc(post::Column::CreatedAt)
            .order_by_desc(post::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        rows.into_iter().map(joined).collect()
    }

    async fn get(&self, slug: &String) -> Result<Option<Post>, RepoError> {
        tracing::debug!(slug = %slug, "Finding post by slug");

        let row = PostEntity::find()
            .filter(post::Column::Slug.eq(slug.as_str()))
            .find_also_related(AuthorEntity)
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        row.map(joined).transpose()
    }

    async fn create(&self, draft: NewPost) -> Result<Post, RepoError> {
        let active: post::ActiveModel = draft.into();
        let row = active.insert(self.db.as_ref()).await.map_err(map_db_err)?;

        self.attach_author(row).await
    }

    async fn update(&self, slug: &String, changes: PostChanges) -> Result<Post, RepoError> {
        let row = self.find_row(slug).await?.ok_or(RepoError::NotFound)?;

        let mut active = row.into_active_model();
        active.apply_post_changes(changes);
        let row = active.update(self.db.as_ref()).await.map_err(map_db_err)?;

        self.attach_author(row).await
    }

    async fn delete(&self, slug: &String) -> Result<(), RepoError> {
        let result = PostEntity::delete_many()
            .filter(post::Column::Slug.eq(slug.as_str()))
            .exec(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}
