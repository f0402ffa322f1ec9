// Database access for the workshop operation catalog

use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::error::ApiError;
use crate::pricing::PriceCalculator;
use crate::query::{pagination_or, Paginated, SqlQueryBuilder};
use crate::workshop::models::{
    CreateWorkshopOperation, UpdateWorkshopOperation, WorkshopListParams, WorkshopOperation,
};

/// Default margin percentage for new catalog entries
pub const DEFAULT_MARGIN: Decimal = Decimal::from_parts(30, 0, 0, false, 0);

/// List catalog operations sorted by name
///
/// The catalog is small, so the default page is generous (100 entries).
pub async fn list_operations(
    pool: &PgPool,
    params: WorkshopListParams,
) -> Result<Paginated<WorkshopOperation>, ApiError> {
    let (limit, offset) = pagination_or(params.limit, params.offset, 100);

    let mut builder = SqlQueryBuilder::new("workshop_operations");
    if let Some(active) = params.active {
        builder.add_eq_bool("active", active);
    }
    if let Some(search) = params.search.as_deref().filter(|s| !s.trim().is_empty()) {
        builder.add_search(&["name", "description"], search.trim());
    }
    builder.set_order("name ASC");
    builder.set_pagination(limit, offset);

    let (count_sql, count_params) = builder.build_count();
    let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
    for param in &count_params {
        count_query = count_query.bind(param);
    }
    let total = count_query.fetch_one(pool).await?;

    let (sql, query_params) = builder.build();
    let mut query = sqlx::query_as::<_, WorkshopOperation>(&sql);
    for param in &query_params {
        query = query.bind(param);
    }
    let items = query.fetch_all(pool).await?;

    Ok(Paginated {
        total,
        items,
        limit,
        offset,
    })
}

/// Fetch a catalog operation by id
pub async fn get_operation(pool: &PgPool, id: i32) -> Result<WorkshopOperation, ApiError> {
    sqlx::query_as::<_, WorkshopOperation>("SELECT * FROM workshop_operations WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Workshop operation", id))
}

/// Insert a catalog operation, deriving final_price from cost and margin
pub async fn create_operation(
    pool: &PgPool,
    payload: CreateWorkshopOperation,
) -> Result<WorkshopOperation, ApiError> {
    let margin = payload.margin.unwrap_or(DEFAULT_MARGIN);
    let final_price = PriceCalculator::final_price(payload.cost, margin);

    let operation = sqlx::query_as::<_, WorkshopOperation>(
        r#"
        INSERT INTO workshop_operations
            (name, estimated_time, estimated_minutes, cost, margin, final_price, description, active)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        "#,
    )
    .bind(&payload.name)
    .bind(&payload.estimated_time)
    .bind(payload.estimated_minutes)
    .bind(payload.cost)
    .bind(margin)
    .bind(final_price)
    .bind(&payload.description)
    .bind(payload.active.unwrap_or(true))
    .fetch_one(pool)
    .await?;

    Ok(operation)
}

/// Apply a partial update, recomputing final_price whenever cost or margin
/// changes
pub async fn update_operation(
    pool: &PgPool,
    id: i32,
    payload: UpdateWorkshopOperation,
) -> Result<WorkshopOperation, ApiError> {
    let existing = get_operation(pool, id).await?;

    let cost = payload.cost.unwrap_or(existing.cost);
    let margin = payload.margin.unwrap_or(existing.margin);
    let final_price = PriceCalculator::final_price(cost, margin);

    let operation = sqlx::query_as::<_, WorkshopOperation>(
        r#"
        UPDATE workshop_operations
        SET name = $1, estimated_time = $2, estimated_minutes = $3, cost = $4,
            margin = $5, final_price = $6, description = $7, active = $8, updated_at = NOW()
        WHERE id = $9
        RETURNING *
        "#,
    )
    .bind(payload.name.unwrap_or(existing.name))
    .bind(payload.estimated_time.unwrap_or(existing.estimated_time))
    .bind(payload.estimated_minutes.unwrap_or(existing.estimated_minutes))
    .bind(cost)
    .bind(margin)
    .bind(final_price)
    .bind(payload.description.unwrap_or(existing.description))
    .bind(payload.active.unwrap_or(existing.active))
    .bind(id)
    .fetch_one(pool)
    .await?;

    Ok(operation)
}

/// Delete a catalog operation
///
/// Repair order items keep their copied price, so history is unaffected.
pub async fn delete_operation(pool: &PgPool, id: i32) -> Result<(), ApiError> {
    let result = sqlx::query("DELETE FROM workshop_operations WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::not_found("Workshop operation", id));
    }

    Ok(())
}
