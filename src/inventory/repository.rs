// Database access for inventory

use sqlx::PgPool;

use crate::error::ApiError;
use crate::inventory::models::{
    CreateInventoryItem, InventoryItem, InventoryListParams, QuantityChange, UpdateInventoryItem,
};
use crate::query::{pagination_or, Paginated, SqlQueryBuilder};

/// List inventory items sorted by name with search and stock filters
pub async fn list_items(
    pool: &PgPool,
    params: InventoryListParams,
) -> Result<Paginated<InventoryItem>, ApiError> {
    let (limit, offset) = pagination_or(params.limit, params.offset, 10);

    let mut builder = SqlQueryBuilder::new("inventory");
    if let Some(search) = params.search.as_deref().filter(|s| !s.trim().is_empty()) {
        builder.add_search(&["name", "sku", "supplier"], search.trim());
    }
    if let Some(category) = params.category.as_deref().filter(|c| !c.is_empty()) {
        builder.add_eq_text("category", category);
    }
    if params.low_stock == Some(true) {
        builder.add_raw("quantity <= low_stock_alert");
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
    let mut query = sqlx::query_as::<_, InventoryItem>(&sql);
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

/// Fetch an inventory item by id
pub async fn get_item(pool: &PgPool, id: i32) -> Result<InventoryItem, ApiError> {
    sqlx::query_as::<_, InventoryItem>("SELECT * FROM inventory WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Inventory item", id))
}

/// Insert a new inventory item
pub async fn create_item(
    pool: &PgPool,
    payload: CreateInventoryItem,
) -> Result<InventoryItem, ApiError> {
    let item = sqlx::query_as::<_, InventoryItem>(
        r#"
        INSERT INTO inventory
            (name, category, quantity, low_stock_alert, price, cost, supplier, location, sku, description)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING *
        "#,
    )
    .bind(&payload.name)
    .bind(&payload.category)
    .bind(payload.quantity.unwrap_or(0))
    .bind(payload.low_stock_alert.unwrap_or(5))
    .bind(payload.price)
    .bind(payload.cost)
    .bind(&payload.supplier)
    .bind(&payload.location)
    .bind(&payload.sku)
    .bind(&payload.description)
    .fetch_one(pool)
    .await?;

    Ok(item)
}

/// Apply a partial update; omitted fields keep their prior values and
/// explicit nulls clear nullable fields
pub async fn update_item(
    pool: &PgPool,
    id: i32,
    payload: UpdateInventoryItem,
) -> Result<InventoryItem, ApiError> {
    let existing = get_item(pool, id).await?;

    let item = sqlx::query_as::<_, InventoryItem>(
        r#"
        UPDATE inventory
        SET name = $1, category = $2, quantity = $3, low_stock_alert = $4, price = $5,
            cost = $6, supplier = $7, location = $8, sku = $9, description = $10,
            updated_at = NOW()
        WHERE id = $11
        RETURNING *
        "#,
    )
    .bind(payload.name.unwrap_or(existing.name))
    .bind(payload.category.unwrap_or(existing.category))
    .bind(payload.quantity.unwrap_or(existing.quantity))
    .bind(payload.low_stock_alert.unwrap_or(existing.low_stock_alert))
    .bind(payload.price.unwrap_or(existing.price))
    .bind(payload.cost.unwrap_or(existing.cost))
    .bind(payload.supplier.unwrap_or(existing.supplier))
    .bind(payload.location.unwrap_or(existing.location))
    .bind(payload.sku.unwrap_or(existing.sku))
    .bind(payload.description.unwrap_or(existing.description))
    .bind(id)
    .fetch_one(pool)
    .await?;

    Ok(item)
}

/// Compute the new stock level for a quantity change
///
/// A relative adjustment wins over an absolute quantity when both are
/// present. Any result below zero clamps to zero instead of failing.
fn resolve_quantity(current: i32, change: &QuantityChange) -> Result<i32, ApiError> {
    let new_quantity = match (change.adjustment, change.quantity) {
        (Some(adjustment), _) => current + adjustment,
        (None, Some(quantity)) => quantity,
        (None, None) => {
            return Err(ApiError::BadRequest(
                "Either quantity or adjustment is required".to_string(),
            ))
        }
    };

    Ok(new_quantity.max(0))
}

/// Set or adjust the stock level of an item
pub async fn change_quantity(
    pool: &PgPool,
    id: i32,
    change: QuantityChange,
) -> Result<InventoryItem, ApiError> {
    let existing = get_item(pool, id).await?;
    let new_quantity = resolve_quantity(existing.quantity, &change)?;

    let item = sqlx::query_as::<_, InventoryItem>(
        "UPDATE inventory SET quantity = $1, updated_at = NOW() WHERE id = $2 RETURNING *",
    )
    .bind(new_quantity)
    .bind(id)
    .fetch_one(pool)
    .await?;

    if item.quantity <= item.low_stock_alert {
        tracing::warn!(
            "Inventory item {} ('{}') is at low stock: {} remaining",
            item.id,
            item.name,
            item.quantity
        );
    }

    Ok(item)
}

/// Delete an inventory item
pub async fn delete_item(pool: &PgPool, id: i32) -> Result<(), ApiError> {
    let result = sqlx::query("DELETE FROM inventory WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::not_found("Inventory item", id));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn change(quantity: Option<i32>, adjustment: Option<i32>) -> QuantityChange {
        QuantityChange {
            quantity,
            adjustment,
        }
    }

    #[test]
    fn test_absolute_quantity_replaces_stock() {
        assert_eq!(resolve_quantity(7, &change(Some(12), None)).unwrap(), 12);
    }

    #[test]
    fn test_adjustment_is_relative_to_current_stock() {
        assert_eq!(resolve_quantity(7, &change(None, Some(-3))).unwrap(), 4);
        assert_eq!(resolve_quantity(7, &change(None, Some(5))).unwrap(), 12);
    }

    #[test]
    fn test_adjustment_wins_when_both_fields_are_present() {
        assert_eq!(
            resolve_quantity(3, &change(Some(100), Some(-1))).unwrap(),
            2
        );
    }

    #[test]
    fn test_oversized_negative_adjustment_clamps_at_zero() {
        assert_eq!(resolve_quantity(3, &change(None, Some(-5))).unwrap(), 0);
    }

    #[test]
    fn test_negative_absolute_quantity_clamps_at_zero() {
        assert_eq!(resolve_quantity(3, &change(Some(-5), None)).unwrap(), 0);
    }

    #[test]
    fn test_empty_change_is_rejected() {
        let result = resolve_quantity(3, &change(None, None));
        assert!(matches!(result, Err(ApiError::BadRequest(_))));
    }
}
