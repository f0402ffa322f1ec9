// Database access for bicycles

use sqlx::PgPool;

use crate::bicycles::models::{
    Bicycle, BicycleListParams, BicycleWithOwner, CreateBicycle, UpdateBicycle,
};
use crate::error::ApiError;
use crate::query::{pagination_or, Paginated, SqlQueryBuilder};

const BICYCLE_WITH_OWNER: &str = "SELECT b.id, b.customer_id, c.name AS customer_name, b.brand, \
     b.model, b.bicycle_type, b.color, b.serial_number, b.notes, b.created_at, b.updated_at \
     FROM bicycles b JOIN customers c ON c.id = b.customer_id";

async fn customer_exists(pool: &PgPool, customer_id: i32) -> Result<bool, ApiError> {
    let exists: Option<bool> =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM customers WHERE id = $1)")
            .bind(customer_id)
            .fetch_one(pool)
            .await?;
    Ok(exists.unwrap_or(false))
}

/// List bicycles, newest first, optionally scoped to one customer
pub async fn list_bicycles(
    pool: &PgPool,
    params: BicycleListParams,
) -> Result<Paginated<BicycleWithOwner>, ApiError> {
    let (limit, offset) = pagination_or(params.limit, params.offset, 10);

    let mut builder = SqlQueryBuilder::new("bicycles");
    if let Some(customer_id) = params.customer_id {
        builder.add_eq_int("customer_id", customer_id);
    }

    let (count_sql, count_params) = builder.build_count();
    let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
    for param in &count_params {
        count_query = count_query.bind(param);
    }
    let total = count_query.fetch_one(pool).await?;

    // The list query joins the owner name, so it is built by hand instead of
    // through the generic builder.
    let mut sql = BICYCLE_WITH_OWNER.to_string();
    if params.customer_id.is_some() {
        sql.push_str(" WHERE b.customer_id = $1");
    }
    sql.push_str(&format!(
        " ORDER BY b.created_at DESC LIMIT {} OFFSET {}",
        limit, offset
    ));

    let mut query = sqlx::query_as::<_, BicycleWithOwner>(&sql);
    if let Some(customer_id) = params.customer_id {
        query = query.bind(customer_id);
    }
    let items = query.fetch_all(pool).await?;

    Ok(Paginated {
        total,
        items,
        limit,
        offset,
    })
}

/// Fetch a bicycle by id with the owner's name
pub async fn get_bicycle(pool: &PgPool, id: i32) -> Result<BicycleWithOwner, ApiError> {
    let sql = format!("{} WHERE b.id = $1", BICYCLE_WITH_OWNER);
    sqlx::query_as::<_, BicycleWithOwner>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Bicycle", id))
}

/// Register a bicycle for an existing customer
pub async fn create_bicycle(pool: &PgPool, payload: CreateBicycle) -> Result<Bicycle, ApiError> {
    if !customer_exists(pool, payload.customer_id).await? {
        return Err(ApiError::not_found("Customer", payload.customer_id));
    }

    let bicycle = sqlx::query_as::<_, Bicycle>(
        r#"
        INSERT INTO bicycles (customer_id, brand, model, bicycle_type, color, serial_number, notes)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(payload.customer_id)
    .bind(&payload.brand)
    .bind(&payload.model)
    .bind(payload.bicycle_type)
    .bind(&payload.color)
    .bind(&payload.serial_number)
    .bind(&payload.notes)
    .fetch_one(pool)
    .await?;

    Ok(bicycle)
}

/// Apply a partial update; a changed customer_id must reference an existing
/// customer
pub async fn update_bicycle(
    pool: &PgPool,
    id: i32,
    payload: UpdateBicycle,
) -> Result<Bicycle, ApiError> {
    let existing = sqlx::query_as::<_, Bicycle>("SELECT * FROM bicycles WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Bicycle", id))?;

    if let Some(customer_id) = payload.customer_id {
        if !customer_exists(pool, customer_id).await? {
            return Err(ApiError::not_found("Customer", customer_id));
        }
    }

    let bicycle = sqlx::query_as::<_, Bicycle>(
        r#"
        UPDATE bicycles
        SET customer_id = $1, brand = $2, model = $3, bicycle_type = $4,
            color = $5, serial_number = $6, notes = $7, updated_at = NOW()
        WHERE id = $8
        RETURNING *
        "#,
    )
    .bind(payload.customer_id.unwrap_or(existing.customer_id))
    .bind(payload.brand.unwrap_or(existing.brand))
    .bind(payload.model.unwrap_or(existing.model))
    .bind(payload.bicycle_type.unwrap_or(existing.bicycle_type))
    .bind(payload.color.unwrap_or(existing.color))
    .bind(payload.serial_number.unwrap_or(existing.serial_number))
    .bind(payload.notes.unwrap_or(existing.notes))
    .bind(id)
    .fetch_one(pool)
    .await?;

    Ok(bicycle)
}

/// Delete a bicycle; its repair orders cascade at the database level
pub async fn delete_bicycle(pool: &PgPool, id: i32) -> Result<(), ApiError> {
    let result = sqlx::query("DELETE FROM bicycles WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::not_found("Bicycle", id));
    }

    Ok(())
}
