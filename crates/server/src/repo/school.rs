use shared_types::{AppError, SchoolRow, SchoolStatus, SchoolsFilter, SortField, SortOrder};
use sqlx::{Pool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::error_convert::SqlxErrorExt;

/// Projection shared by every read. Counts are derived from the child tables.
const SELECT_SCHOOL: &str = r#"
    SELECT s.id, s.name, s.email, s.phone, s.address, s.logo, s.status,
           (SELECT COUNT(*) FROM classes c WHERE c.school_id = s.id) AS classes_count,
           (SELECT COUNT(*) FROM school_admins a WHERE a.school_id = s.id) AS admins_count,
           s.created_by, s.created_at, s.updated_at
    FROM schools s
"#;

/// Client-writable columns for insert and update.
#[derive(Debug, Clone)]
pub struct SchoolFields {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: String,
    pub status: SchoolStatus,
}

/// Escape LIKE metacharacters so the search text is matched literally.
pub fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// ORDER BY clause for a sort choice. `id` breaks ties so paging is stable.
pub fn order_by_clause(field: SortField, order: SortOrder) -> String {
    let column = match field {
        SortField::Name => "LOWER(s.name)",
        SortField::CreatedAt => "s.created_at",
        SortField::UpdatedAt => "s.updated_at",
        SortField::ClassesCount => "classes_count",
    };
    let direction = match order {
        SortOrder::Asc => "ASC",
        SortOrder::Desc => "DESC",
    };
    format!(" ORDER BY {} {}, s.id ASC", column, direction)
}

/// List schools matching the search and status predicates, in filter order.
pub async fn list(
    pool: &Pool<Postgres>,
    filter: &SchoolsFilter,
) -> Result<Vec<SchoolRow>, AppError> {
    let mut qb = QueryBuilder::<Postgres>::new(SELECT_SCHOOL);
    qb.push(" WHERE TRUE");

    if let Some(term) = filter.search_term() {
        let pattern = format!("%{}%", escape_like(term));
        qb.push(" AND (s.name ILIKE ");
        qb.push_bind(pattern.clone());
        qb.push(" OR s.email ILIKE ");
        qb.push_bind(pattern.clone());
        qb.push(" OR s.phone ILIKE ");
        qb.push_bind(pattern);
        qb.push(")");
    }

    if let Some(status) = filter.status.status() {
        qb.push(" AND s.status = ");
        qb.push_bind(status.as_str());
    }

    qb.push(order_by_clause(filter.sort_field, filter.sort_order));

    qb.build_query_as::<SchoolRow>()
        .fetch_all(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

/// Find a school by ID.
pub async fn find_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<SchoolRow>, AppError> {
    sqlx::query_as::<_, SchoolRow>(&format!("{SELECT_SCHOOL} WHERE s.id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

/// Insert a school owned by `created_by` and return the stored row.
pub async fn create(
    pool: &Pool<Postgres>,
    fields: SchoolFields,
    logo: Option<String>,
    created_by: i64,
) -> Result<SchoolRow, AppError> {
    let id: Uuid = sqlx::query_scalar(
        r#"
        INSERT INTO schools (name, email, phone, address, logo, status, created_by)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id
        "#,
    )
    .bind(&fields.name)
    .bind(&fields.email)
    .bind(&fields.phone)
    .bind(&fields.address)
    .bind(&logo)
    .bind(fields.status.as_str())
    .bind(created_by)
    .fetch_one(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::internal("Inserted school could not be read back"))
}

/// Overwrite the writable columns. A `None` logo keeps the stored one.
/// Returns `None` when no school has this ID.
pub async fn update(
    pool: &Pool<Postgres>,
    id: Uuid,
    fields: SchoolFields,
    logo: Option<String>,
) -> Result<Option<SchoolRow>, AppError> {
    let updated: Option<Uuid> = sqlx::query_scalar(
        r#"
        UPDATE schools
        SET name = $2,
            email = $3,
            phone = $4,
            address = $5,
            status = $6,
            logo = COALESCE($7, logo),
            updated_at = NOW()
        WHERE id = $1
        RETURNING id
        "#,
    )
    .bind(id)
    .bind(&fields.name)
    .bind(&fields.email)
    .bind(&fields.phone)
    .bind(&fields.address)
    .bind(fields.status.as_str())
    .bind(&logo)
    .fetch_optional(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    match updated {
        Some(id) => find_by_id(pool, id).await,
        None => Ok(None),
    }
}

/// Hard-delete a school. Classes and admin links cascade.
/// Returns true if a row was removed.
pub async fn delete(pool: &Pool<Postgres>, id: Uuid) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM schools WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;

    Ok(result.rows_affected() > 0)
}
