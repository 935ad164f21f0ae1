use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use core_types::{BaseEntity, Student, StudentPayload};
use sqlx::postgres::{PgArguments, PgPool, PgRow, Postgres};
use sqlx::query::QueryAs;
use sqlx::FromRow;

use crate::DbError;

/// Generic CRUD access to one kind of entity.
///
/// Handlers hold this as `Arc<dyn Repository<T>>`, so the storage backend is
/// chosen once at startup.
#[async_trait]
pub trait Repository<T: BaseEntity>: Send + Sync {
    /// Every stored entity, ordered by id.
    async fn get_all(&self) -> Result<Vec<T>, DbError>;

    async fn get_by_id(&self, id: i64) -> Result<Option<T>, DbError>;

    /// Stores a new entity and returns it with its generated id.
    async fn create(&self, payload: T::Payload) -> Result<T, DbError>;

    /// Replaces every field of an existing entity. Returns `None` if `id` is unknown.
    async fn update(&self, id: i64, payload: T::Payload) -> Result<Option<T>, DbError>;

    /// Returns `true` when a row was removed.
    async fn delete(&self, id: i64) -> Result<bool, DbError>;
}

pub type PgQueryAs<'q, T> = QueryAs<'q, Postgres, T, PgArguments>;

/// Table metadata that lets `PgRepository` generate SQL for an entity.
///
/// The table must have a generated `id BIGINT` primary key plus the listed
/// columns, and rows must map back onto the entity with `FromRow`.
pub trait PgEntity: BaseEntity + for<'r> FromRow<'r, PgRow> {
    const TABLE: &'static str;
    /// Every column except `id`, in the order `bind_payload` binds them.
    const COLUMNS: &'static [&'static str];

    fn bind_payload<'q>(payload: &'q Self::Payload, query: PgQueryAs<'q, Self>)
    -> PgQueryAs<'q, Self>;
}

impl PgEntity for Student {
    const TABLE: &'static str = "students";
    const COLUMNS: &'static [&'static str] = &[
        "full_name",
        "birth_date",
        "document",
        "phone_number",
        "full_address",
    ];

    fn bind_payload<'q>(payload: &'q StudentPayload, query: PgQueryAs<'q, Self>) -> PgQueryAs<'q, Self> {
        query
            .bind(&payload.full_name)
            .bind(payload.birth_date)
            .bind(&payload.document)
            .bind(&payload.phone_number)
            .bind(&payload.full_address)
    }
}

/// SQL for one entity, generated once when the repository is created.
#[derive(Debug)]
struct Statements {
    select_all: String,
    select_one: String,
    insert: String,
    update: String,
    delete: String,
}

impl Statements {
    fn for_entity<T: PgEntity>() -> Self {
        let table = T::TABLE;
        let columns = T::COLUMNS.join(", ");
        let placeholders = (1..=T::COLUMNS.len())
            .map(|i| format!("${i}"))
            .collect::<Vec<_>>()
            .join(", ");
        let assignments = T::COLUMNS
            .iter()
            .enumerate()
            .map(|(i, column)| format!("{column} = ${}", i + 1))
            .collect::<Vec<_>>()
            .join(", ");
        let id_param = T::COLUMNS.len() + 1;

        Self {
            select_all: format!("SELECT * FROM {table} ORDER BY id"),
            select_one: format!("SELECT * FROM {table} WHERE id = $1"),
            insert: format!("INSERT INTO {table} ({columns}) VALUES ({placeholders}) RETURNING *"),
            update: format!("UPDATE {table} SET {assignments} WHERE id = ${id_param} RETURNING *"),
            delete: format!("DELETE FROM {table} WHERE id = $1"),
        }
    }
}

/// The PostgreSQL-backed `Repository`. Cheap to clone; clones share the pool.
#[derive(Debug)]
pub struct PgRepository<T> {
    pool: PgPool,
    statements: Arc<Statements>,
    _entity: PhantomData<fn() -> T>,
}

impl<T: PgEntity> PgRepository<T> {
    /// Creates a new repository with a shared database connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            statements: Arc::new(Statements::for_entity::<T>()),
            _entity: PhantomData,
        }
    }
}

impl<T> Clone for PgRepository<T> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            statements: Arc::clone(&self.statements),
            _entity: PhantomData,
        }
    }
}

#[async_trait]
impl<T: PgEntity> Repository<T> for PgRepository<T> {
    async fn get_all(&self) -> Result<Vec<T>, DbError> {
        let rows = sqlx::query_as::<_, T>(&self.statements.select_all)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<T>, DbError> {
        let row = sqlx::query_as::<_, T>(&self.statements.select_one)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn create(&self, payload: T::Payload) -> Result<T, DbError> {
        let query = sqlx::query_as::<_, T>(&self.statements.insert);
        let created = T::bind_payload(&payload, query)
            .fetch_one(&self.pool)
            .await?;
        tracing::debug!(table = T::TABLE, id = created.id(), "Row inserted.");
        Ok(created)
    }

    async fn update(&self, id: i64, payload: T::Payload) -> Result<Option<T>, DbError> {
        let query = sqlx::query_as::<_, T>(&self.statements.update);
        let updated = T::bind_payload(&payload, query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        if updated.is_some() {
            tracing::debug!(table = T::TABLE, id, "Row updated.");
        }
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> Result<bool, DbError> {
        let result = sqlx::query(&self.statements.delete)
            .bind(id)
            .execute(&self.pool)
            .await?;
        let removed = result.rows_affected() > 0;
        if removed {
            tracing::debug!(table = T::TABLE, id, "Row deleted.");
        }
        Ok(removed)
    }
}
