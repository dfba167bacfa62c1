use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, DbConn, DbErr, EntityTrait, IntoActiveModel,
    PrimaryKeyTrait, QueryOrder, SqlErr,
};

use folio_core::RepoError;
use folio_core::domain::{Record, RecordId};
use folio_core::ports::Repository;

/// A SeaORM entity backing an id-keyed domain record.
pub trait RecordEntity: EntityTrait {
    type Record: Record<Key = RecordId> + From<Self::Model>;

    fn id_column() -> Self::Column;

    fn created_at_column() -> Self::Column;
}

/// Copy the set fields of a change set onto an active model.
pub trait ApplyChanges<C> {
    fn apply_changes(&mut self, changes: C);
}

pub(crate) fn map_db_err(err: DbErr) -> RepoError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg))
        | Some(SqlErr::ForeignKeyConstraintViolation(msg)) => RepoError::Constraint(msg),
        _ => match err {
            DbErr::Conn(e) => RepoError::Connection(e.to_string()),
            DbErr::ConnectionAcquire(e) => RepoError::Connection(e.to_string()),
            other => RepoError::Query(other.to_string()),
        },
    }
}

/// Generic PostgreSQL repository for id-keyed records.
pub struct PostgresBaseRepository<E>
where
    E: EntityTrait,
{
    pub(crate) db: Arc<DbConn>,
    _entity: PhantomData<E>,
}

impl<E> PostgresBaseRepository<E>
where
    E: EntityTrait,
{
    pub fn new(db: Arc<DbConn>) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }
}

#[async_trait]
impl<E> Repository<E::Record> for PostgresBaseRepository<E>
where
    E: RecordEntity + Send + Sync,
    E::Model: IntoActiveModel<E::ActiveModel> + Send + Sync,
    E::ActiveModel: ActiveModelTrait<Entity = E>
        + ActiveModelBehavior
        + From<<E::Record as Record>::Draft>
        + ApplyChanges<<E::Record as Record>::Changes>
        + Send
        + Sync,
    E::PrimaryKey: PrimaryKeyTrait<ValueType = RecordId>,
{
    async fn list(&self) -> Result<Vec<E::Record>, RepoError> {
        let models = E::find()
            .order_by_desc(E::created_at_column())
            .order_by_desc(E::id_column())
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn get(&self, key: &RecordId) -> Result<Option<E::Record>, RepoError> {
        let model = E::find_by_id(*key)
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(model.map(Into::into))
    }

    async fn create(&self, draft: <E::Record as Record>::Draft) -> Result<E::Record, RepoError> {
        let active: E::ActiveModel = draft.into();
        let model = active.insert(self.db.as_ref()).await.map_err(map_db_err)?;

        tracing::debug!(entity = <E::Record as Record>::ENTITY, "Inserted record");
        Ok(model.into())
    }

    async fn update(
        &self,
        key: &RecordId,
        changes: <E::Record as Record>::Changes,
    ) -> Result<E::Record, RepoError> {
        let model = E::find_by_id(*key)
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)?
            .ok_or(RepoError::NotFound)?;

        let mut active = model.clone().into_active_model();
        active.apply_changes(changes);
        if !active.is_changed() {
            return Ok(model.into());
        }

        let model = active.update(self.db.as_ref()).await.map_err(map_db_err)?;
        Ok(model.into())
    }

    async fn delete(&self, key: &RecordId) -> Result<(), RepoError> {
        let result = E::delete_by_id(*key)
            .exec(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}
