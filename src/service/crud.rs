//! Transactional CRUD execution against SQLite. Every mutation runs in a
//! transaction scoped to the request: commit on success, rollback (on drop)
//! on every error path.

use crate::error::AppError;
use crate::model::{Customer, CustomerCreate, CustomerReplace};
use crate::sql::{self, ListParams};
use sqlx::SqlitePool;

const EMAIL_CONFLICT: &str = "email already registered";

pub struct CustomerService;

impl CustomerService {
    /// Insert one customer; the store assigns the id. Duplicate email
    /// surfaces as a conflict with no partial write.
    pub async fn create(pool: &SqlitePool, payload: &CustomerCreate) -> Result<Customer, AppError> {
        let mut tx = pool.begin().await?;
        tracing::debug!(sql = sql::INSERT, "create customer");
        let row = sqlx::query_as::<_, Customer>(sql::INSERT)
            .bind(&payload.name)
            .bind(payload.phone.as_deref())
            .bind(payload.email.as_deref())
            .bind(payload.address.as_deref())
            .bind(payload.district.as_deref())
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| AppError::from_unique(e, EMAIL_CONFLICT))?;
        tx.commit().await?;
        Ok(row)
    }

    /// One page of the filtered, sorted result set plus the pre-pagination
    /// total. Invalid sort/order fails before any query executes.
    pub async fn list(
        pool: &SqlitePool,
        params: &ListParams,
    ) -> Result<(Vec<Customer>, i64), AppError> {
        let page = sql::select_page(params)?;
        tracing::debug!(sql = %page.sql, "list customers");
        let mut query = sqlx::query_as::<_, Customer>(&page.sql);
        for p in &page.params {
            query = query.bind(p.as_deref());
        }
        let rows = query.fetch_all(pool).await?;

        let count = sql::select_count(params);
        let mut count_query = sqlx::query_scalar::<_, i64>(&count.sql);
        for p in &count.params {
            count_query = count_query.bind(p.as_deref());
        }
        let total = count_query.fetch_one(pool).await?;
        Ok((rows, total))
    }

    pub async fn get(pool: &SqlitePool, id: i64) -> Result<Customer, AppError> {
        sqlx::query_as::<_, Customer>(sql::SELECT_BY_ID)
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| AppError::NotFound("customer".into()))
    }

    /// Full update: every writable column overwritten, absent fields set to
    /// NULL. The payload is validated to carry a non-empty name.
    pub async fn replace(
        pool: &SqlitePool,
        id: i64,
        payload: &CustomerReplace,
    ) -> Result<Customer, AppError> {
        let mut tx = pool.begin().await?;
        Self::fetch_existing(&mut tx, id).await?;
        tracing::debug!(sql = sql::REPLACE, id, "replace customer");
        let row = sqlx::query_as::<_, Customer>(sql::REPLACE)
            .bind(payload.name.as_deref())
            .bind(payload.phone.as_deref())
            .bind(payload.email.as_deref())
            .bind(payload.address.as_deref())
            .bind(payload.district.as_deref())
            .bind(id)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| AppError::from_unique(e, EMAIL_CONFLICT))?;
        tx.commit().await?;
        Ok(row)
    }

    /// Partial update: only the given (column, value) pairs overwrite. An
    /// empty field set leaves the record untouched.
    pub async fn patch(
        pool: &SqlitePool,
        id: i64,
        fields: &[(String, Option<String>)],
    ) -> Result<Customer, AppError> {
        let mut tx = pool.begin().await?;
        let current = Self::fetch_existing(&mut tx, id).await?;
        if fields.is_empty() {
            tx.commit().await?;
            return Ok(current);
        }
        let q = sql::update_partial(fields);
        tracing::debug!(sql = %q.sql, id, "patch customer");
        let mut query = sqlx::query_as::<_, Customer>(&q.sql);
        for p in &q.params {
            query = query.bind(p.as_deref());
        }
        let row = query
            .bind(id)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| AppError::from_unique(e, EMAIL_CONFLICT))?;
        tx.commit().await?;
        Ok(row)
    }

    pub async fn delete(pool: &SqlitePool, id: i64) -> Result<(), AppError> {
        let mut tx = pool.begin().await?;
        Self::fetch_existing(&mut tx, id).await?;
        tracing::debug!(sql = sql::DELETE, id, "delete customer");
        sqlx::query(sql::DELETE).bind(id).execute(&mut *tx).await?;
        tx.commit().await?;
        Ok(())
    }

    /// Not-found is checked explicitly before any mutation attempt.
    async fn fetch_existing(
        tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
        id: i64,
    ) -> Result<Customer, AppError> {
        sqlx::query_as::<_, Customer>(sql::SELECT_BY_ID)
            .bind(id)
            .fetch_optional(&mut **tx)
            .await?
            .ok_or_else(|| AppError::NotFound("customer".into()))
    }
}
