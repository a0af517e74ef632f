use async_trait::async_trait;
use migration::MigratorTrait;
use models::malaria::{self, MalariaPatch, NewMalaria};
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction, DbBackend,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Statement, TransactionTrait,
};
use tracing::{debug, info};

use super::filter::MalariaFilter;
use crate::errors::ServiceError;
use crate::pagination::Pagination;

/// Rows per `INSERT` during bulk loads; keeps SQLite under its bind limit.
const IMPORT_BATCH: usize = 50;

/// Access to the Record Store. Mutations run in their own transaction and
/// leave nothing committed on failure.
#[async_trait]
pub trait MalariaRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<malaria::Model>, ServiceError>;
    /// One page of filtered records plus the unpaginated match count.
    async fn page(&self, filter: &MalariaFilter, pagination: Pagination) -> Result<(Vec<malaria::Model>, u64), ServiceError>;
    async fn get(&self, id: i32) -> Result<Option<malaria::Model>, ServiceError>;
    async fn first_by_iso(&self, iso: &str) -> Result<Option<malaria::Model>, ServiceError>;
    async fn distinct_isos(&self) -> Result<Vec<String>, ServiceError>;
    async fn count(&self) -> Result<u64, ServiceError>;
    async fn create(&self, input: NewMalaria) -> Result<malaria::Model, ServiceError>;
    async fn update(&self, id: i32, patch: MalariaPatch) -> Result<malaria::Model, ServiceError>;
    async fn delete(&self, id: i32) -> Result<(), ServiceError>;
    /// Load rows with ids `0..n` into an empty table.
    async fn load(&self, rows: Vec<NewMalaria>) -> Result<u64, ServiceError>;
    /// Drop and recreate the schema, then load rows.
    async fn replace_all(&self, rows: Vec<NewMalaria>) -> Result<u64, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmMalariaRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmMalariaRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl MalariaRepository for SeaOrmMalariaRepository {
    async fn list(&self) -> Result<Vec<malaria::Model>, ServiceError> {
        Ok(malaria::Entity::find()
            .order_by_asc(malaria::Column::Id)
            .all(&self.db)
            .await?)
    }

    async fn page(&self, filter: &MalariaFilter, pagination: Pagination) -> Result<(Vec<malaria::Model>, u64), ServiceError> {
        let (page_idx, per_page) = pagination.normalize();
        let paginator = filter.select().paginate(&self.db, per_page);
        let total = paginator.num_items().await?;
        // past the last page: skip the fetch, the page is empty by definition
        let rows = if page_idx.saturating_mul(per_page) >= total {
            Vec::new()
        } else {
            paginator.fetch_page(page_idx).await?
        };
        debug!(page = page_idx + 1, per_page, total, returned = rows.len(), "malaria page fetched");
        Ok((rows, total))
    }

    async fn get(&self, id: i32) -> Result<Option<malaria::Model>, ServiceError> {
        Ok(malaria::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn first_by_iso(&self, iso: &str) -> Result<Option<malaria::Model>, ServiceError> {
        Ok(malaria::Entity::find()
            .filter(Expr::expr(Func::lower(Expr::col(malaria::Column::Iso))).eq(iso.trim().to_lowercase()))
            .order_by_asc(malaria::Column::Id)
            .one(&self.db)
            .await?)
    }

    async fn distinct_isos(&self) -> Result<Vec<String>, ServiceError> {
        Ok(malaria::Entity::find()
            .select_only()
            .column(malaria::Column::Iso)
            .filter(malaria::Column::Iso.is_not_null())
            .distinct()
            .order_by_asc(malaria::Column::Iso)
            .into_tuple::<String>()
            .all(&self.db)
            .await?)
    }

    async fn count(&self) -> Result<u64, ServiceError> {
        Ok(malaria::Entity::find().count(&self.db).await?)
    }

    async fn create(&self, input: NewMalaria) -> Result<malaria::Model, ServiceError> {
        let created = self
            .db
            .transaction::<_, malaria::Model, ServiceError>(|txn| {
                Box::pin(async move { Ok(input.into_active_model().insert(txn).await?) })
            })
            .await?;
        Ok(created)
    }

    async fn update(&self, id: i32, patch: MalariaPatch) -> Result<malaria::Model, ServiceError> {
        if patch.is_empty() {
            // 空补丁无需开启事务
            return self.get(id).await?.ok_or_else(|| ServiceError::not_found("malaria data"));
        }
        let updated = self
            .db
            .transaction::<_, malaria::Model, ServiceError>(|txn| {
                Box::pin(async move {
                    let found = malaria::Entity::find_by_id(id)
                        .one(txn)
                        .await?
                        .ok_or_else(|| ServiceError::not_found("malaria data"))?;
                    let mut am: malaria::ActiveModel = found.clone().into();
                    patch.apply(&mut am);
                    if !am.is_changed() {
                        return Ok(found);
                    }
                    Ok(am.update(txn).await?)
                })
            })
            .await?;
        Ok(updated)
    }

    async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        self.db
            .transaction::<_, (), ServiceError>(|txn| {
                Box::pin(async move {
                    let res = malaria::Entity::delete_by_id(id).exec(txn).await?;
                    if res.rows_affected == 0 {
                        return Err(ServiceError::not_found("malaria data"));
                    }
                    Ok(())
                })
            })
            .await?;
        Ok(())
    }

    async fn load(&self, rows: Vec<NewMalaria>) -> Result<u64, ServiceError> {
        let loaded = self
            .db
            .transaction::<_, u64, ServiceError>(|txn| Box::pin(async move { insert_sequential(txn, rows).await }))
            .await?;
        info!(rows = loaded, "malaria rows loaded");
        Ok(loaded)
    }

    async fn replace_all(&self, rows: Vec<NewMalaria>) -> Result<u64, ServiceError> {
        migration::Migrator::fresh(&self.db).await?;
        info!("malaria schema recreated");
        self.load(rows).await
    }
}

async fn insert_sequential(txn: &DatabaseTransaction, rows: Vec<NewMalaria>) -> Result<u64, ServiceError> {
    let mut models = Vec::with_capacity(rows.len());
    for (idx, row) in rows.into_iter().enumerate() {
        let id = i32::try_from(idx).map_err(|_| ServiceError::Import("too many rows for i32 ids".into()))?;
        models.push(row.into_active_model_with_id(id));
    }
    let total = models.len() as u64;
    let mut iter = models.into_iter();
    loop {
        let batch: Vec<malaria::ActiveModel> = iter.by_ref().take(IMPORT_BATCH).collect();
        if batch.is_empty() {
            break;
        }
        malaria::Entity::insert_many(batch).exec(txn).await?;
    }
    sync_id_sequence(txn).await?;
    Ok(total)
}

/// Move the id generator past the explicitly inserted ids.
///
/// SQLite's AUTOINCREMENT already tracks the highest explicit rowid; Postgres
/// sequences do not, so later creates would collide with imported rows.
async fn sync_id_sequence(txn: &DatabaseTransaction) -> Result<(), ServiceError> {
    if txn.get_database_backend() != DbBackend::Postgres {
        return Ok(());
    }
    txn.execute(Statement::from_string(
        DbBackend::Postgres,
        "SELECT setval(pg_get_serial_sequence('malaria', 'id'), GREATEST(COALESCE(MAX(id) + 1, 1), 1), false) FROM malaria",
    ))
    .await?;
    Ok(())
}
