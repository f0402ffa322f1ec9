// Database repository for repair orders and their line items
// Multi-row writes (order + items) run inside a single transaction

use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};

use crate::pricing::PriceCalculator;
use crate::query::{pagination_or, Paginated, SqlQueryBuilder};
use crate::repairs::error::RepairError;
use crate::repairs::models::{
    CreateRepairRequest, RepairItemRequest, RepairListParams, RepairOrder, RepairOrderItem,
    RepairOrderSummary, RepairStatus, UpdateRepairRequest,
};

const SUMMARY_QUERY: &str = "SELECT r.id, r.customer_id, c.name AS customer_name, r.bicycle_id, \
     b.brand AS bicycle_brand, b.model AS bicycle_model, r.assigned_technician_id, \
     u.name AS technician_name, r.issue_description, r.status, r.priority, \
     r.estimated_completion_date, r.completed_date, r.total_price, r.customer_notified, \
     r.created_at \
     FROM repair_orders r \
     JOIN customers c ON c.id = r.customer_id \
     JOIN bicycles b ON b.id = r.bicycle_id \
     LEFT JOIN users u ON u.id = r.assigned_technician_id";

/// Repository for repair order persistence
#[derive(Clone)]
pub struct RepairRepository {
    pool: PgPool,
}

impl RepairRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List repair orders with filters, newest first
    pub async fn list(
        &self,
        params: RepairListParams,
    ) -> Result<Paginated<RepairOrderSummary>, RepairError> {
        let (limit, offset) = pagination_or(params.limit, params.offset, 10);

        // The builder produces the filter clauses; the SELECT itself carries
        // the joins, so the table prefix appears in every column name.
        let mut builder = SqlQueryBuilder::new("repair_orders r");
        if let Some(status) = params.status {
            builder.add_eq_text("r.status", status.as_str());
        }
        if let Some(customer_id) = params.customer_id {
            builder.add_eq_int("r.customer_id", customer_id);
        }
        if let Some(technician_id) = params.technician_id {
            builder.add_eq_int("r.assigned_technician_id", technician_id);
        }
        if let Some(from) = params.date_from.as_deref() {
            builder.add_date_from("r.created_at", from);
        }
        if let Some(to) = params.date_to.as_deref() {
            builder.add_date_to("r.created_at", to);
        }
        builder.set_pagination(limit, offset);

        let (count_sql, count_params) = builder.build_count();
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        for param in &count_params {
            count_query = count_query.bind(param);
        }
        let total = count_query.fetch_one(&self.pool).await?;

        // Reuse the WHERE clause of the plain build against the joined SELECT
        let (built, query_params) = builder.build();
        let where_and_tail = built
            .split_once("FROM repair_orders r")
            .map(|(_, tail)| tail.to_string())
            .unwrap_or_default();
        let sql = format!(
            "{}{}",
            SUMMARY_QUERY,
            where_and_tail.replace(" LIMIT", " ORDER BY r.created_at DESC LIMIT")
        );

        let mut query = sqlx::query_as::<_, RepairOrderSummary>(&sql);
        for param in &query_params {
            query = query.bind(param);
        }
        let items = query.fetch_all(&self.pool).await?;

        Ok(Paginated {
            total,
            items,
            limit,
            offset,
        })
    }

    /// Fetch a repair order by id
    pub async fn get_order(&self, id: i32) -> Result<RepairOrder, RepairError> {
        sqlx::query_as::<_, RepairOrder>("SELECT * FROM repair_orders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(RepairError::NotFound(id))
    }

    /// Fetch the line items of an order, oldest first
    pub async fn get_items(&self, order_id: i32) -> Result<Vec<RepairOrderItem>, RepairError> {
        let items = sqlx::query_as::<_, RepairOrderItem>(
            "SELECT * FROM repair_order_items WHERE repair_order_id = $1 ORDER BY id",
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    /// Create an order and its items atomically
    ///
    /// Any missing reference (customer, bicycle, technician, operation) rolls
    /// the whole transaction back.
    pub async fn create_with_items(
        &self,
        request: CreateRepairRequest,
    ) -> Result<RepairOrder, RepairError> {
        let mut tx = self.pool.begin().await?;

        check_customer(&mut tx, request.customer_id).await?;
        check_bicycle(&mut tx, request.bicycle_id).await?;
        if let Some(technician_id) = request.assigned_technician_id {
            check_technician(&mut tx, technician_id).await?;
        }

        let order = sqlx::query_as::<_, RepairOrder>(
            r#"
            INSERT INTO repair_orders
                (customer_id, bicycle_id, assigned_technician_id, issue_description,
                 priority, estimated_completion_date, notes)
            VALUES ($1, $2, $3, $4, COALESCE($5, 'medium'), $6, $7)
            RETURNING *
            "#,
        )
        .bind(request.customer_id)
        .bind(request.bicycle_id)
        .bind(request.assigned_technician_id)
        .bind(&request.issue_description)
        .bind(request.priority)
        .bind(request.estimated_completion_date)
        .bind(&request.notes)
        .fetch_one(&mut *tx)
        .await?;

        let total = insert_items(&mut tx, order.id, request.items.unwrap_or_default()).await?;
        let order = persist_total(&mut tx, order.id, total).await?;

        tx.commit().await?;
        Ok(order)
    }

    /// Apply a partial update; when items is present the existing items are
    /// replaced and the total recomputed, all in one transaction
    pub async fn update_with_items(
        &self,
        id: i32,
        request: UpdateRepairRequest,
    ) -> Result<RepairOrder, RepairError> {
        let mut tx = self.pool.begin().await?;

        let existing =
            sqlx::query_as::<_, RepairOrder>("SELECT * FROM repair_orders WHERE id = $1")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or(RepairError::NotFound(id))?;

        if let Some(customer_id) = request.customer_id {
            check_customer(&mut tx, customer_id).await?;
        }
        if let Some(bicycle_id) = request.bicycle_id {
            check_bicycle(&mut tx, bicycle_id).await?;
        }
        if let Some(Some(technician_id)) = request.assigned_technician_id {
            check_technician(&mut tx, technician_id).await?;
        }

        sqlx::query(
            r#"
            UPDATE repair_orders
            SET customer_id = $1, bicycle_id = $2, assigned_technician_id = $3,
                issue_description = $4, priority = $5, estimated_completion_date = $6,
                notes = $7, updated_at = NOW()
            WHERE id = $8
            "#,
        )
        .bind(request.customer_id.unwrap_or(existing.customer_id))
        .bind(request.bicycle_id.unwrap_or(existing.bicycle_id))
        .bind(
            request
                .assigned_technician_id
                .unwrap_or(existing.assigned_technician_id),
        )
        .bind(
            request
                .issue_description
                .unwrap_or(existing.issue_description),
        )
        .bind(request.priority.unwrap_or(existing.priority))
        .bind(
            request
                .estimated_completion_date
                .unwrap_or(existing.estimated_completion_date),
        )
        .bind(request.notes.unwrap_or(existing.notes))
        .bind(id)
        .execute(&mut *tx)
        .await?;

        if let Some(items) = request.items {
            sqlx::query("DELETE FROM repair_order_items WHERE repair_order_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;

            let total = insert_items(&mut tx, id, items).await?;
            persist_total(&mut tx, id, total).await?;
        }

        let order = sqlx::query_as::<_, RepairOrder>("SELECT * FROM repair_orders WHERE id = $1")
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(order)
    }

    /// Persist a status change
    pub async fn set_status(
        &self,
        id: i32,
        status: RepairStatus,
        completed_date: Option<chrono::DateTime<chrono::Utc>>,
    ) -> Result<RepairOrder, RepairError> {
        let order = sqlx::query_as::<_, RepairOrder>(
            r#"
            UPDATE repair_orders
            SET status = $1, completed_date = COALESCE(completed_date, $2), updated_at = NOW()
            WHERE id = $3
            RETURNING *
            "#,
        )
        .bind(status)
        .bind(completed_date)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(RepairError::NotFound(id))?;

        Ok(order)
    }

    /// Mark the customer as notified about this order
    pub async fn mark_customer_notified(&self, id: i32) -> Result<(), RepairError> {
        sqlx::query(
            "UPDATE repair_orders SET customer_notified = TRUE, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Delete a repair order; its items cascade at the database level
    ///
    /// Invoiced orders cannot be deleted; the invoice foreign key blocks it.
    pub async fn delete(&self, id: i32) -> Result<(), RepairError> {
        let result = sqlx::query("DELETE FROM repair_orders WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.is_foreign_key_violation() {
                        return RepairError::ValidationError(format!(
                            "Repair order {} has an invoice and cannot be deleted",
                            id
                        ));
                    }
                }
                RepairError::from(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(RepairError::NotFound(id));
        }
        Ok(())
    }
}

async fn check_customer(
    tx: &mut Transaction<'_, Postgres>,
    customer_id: i32,
) -> Result<(), RepairError> {
    let exists: Option<bool> =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM customers WHERE id = $1)")
            .bind(customer_id)
            .fetch_one(&mut **tx)
            .await?;
    if exists.unwrap_or(false) {
        Ok(())
    } else {
        Err(RepairError::CustomerNotFound(customer_id))
    }
}

async fn check_bicycle(
    tx: &mut Transaction<'_, Postgres>,
    bicycle_id: i32,
) -> Result<(), RepairError> {
    let exists: Option<bool> =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM bicycles WHERE id = $1)")
            .bind(bicycle_id)
            .fetch_one(&mut **tx)
            .await?;
    if exists.unwrap_or(false) {
        Ok(())
    } else {
        Err(RepairError::BicycleNotFound(bicycle_id))
    }
}

/// The assignee must be an active user with the technician role
async fn check_technician(
    tx: &mut Transaction<'_, Postgres>,
    technician_id: i32,
) -> Result<(), RepairError> {
    let exists: Option<bool> = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM users WHERE id = $1 AND role = 'technician' AND active = TRUE)",
    )
    .bind(technician_id)
    .fetch_one(&mut **tx)
    .await?;
    if exists.unwrap_or(false) {
        Ok(())
    } else {
        Err(RepairError::TechnicianNotFound(technician_id))
    }
}

/// Insert the requested items for an order and return the resulting total
///
/// A missing price defaults to the referenced operation's final_price.
async fn insert_items(
    tx: &mut Transaction<'_, Postgres>,
    order_id: i32,
    items: Vec<RepairItemRequest>,
) -> Result<Decimal, RepairError> {
    let mut line_totals = Vec::with_capacity(items.len());

    for item in items {
        let operation_price = match item.operation_id {
            Some(operation_id) => {
                let price: Option<Decimal> = sqlx::query_scalar(
                    "SELECT final_price FROM workshop_operations WHERE id = $1",
                )
                .bind(operation_id)
                .fetch_optional(&mut **tx)
                .await?;
                Some(price.ok_or(RepairError::OperationNotFound(operation_id))?)
            }
            None => None,
        };

        if item.operation_id.is_none() && item.custom_description.is_none() {
            return Err(RepairError::ValidationError(
                "Each item needs an operation_id or a custom_description".to_string(),
            ));
        }

        let price = match item.price.or(operation_price) {
            Some(price) => price,
            None => {
                return Err(RepairError::ValidationError(
                    "Custom items must specify a price".to_string(),
                ))
            }
        };
        let quantity = item.quantity.unwrap_or(1);
        let total_price = PriceCalculator::line_total(price, quantity);

        sqlx::query(
            r#"
            INSERT INTO repair_order_items
                (repair_order_id, operation_id, custom_description, price, quantity, total_price)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(order_id)
        .bind(item.operation_id)
        .bind(&item.custom_description)
        .bind(price)
        .bind(quantity)
        .bind(total_price)
        .execute(&mut **tx)
        .await?;

        line_totals.push(total_price);
    }

    Ok(PriceCalculator::order_total(&line_totals))
}

async fn persist_total(
    tx: &mut Transaction<'_, Postgres>,
    order_id: i32,
    total: Decimal,
) -> Result<RepairOrder, RepairError> {
    let order = sqlx::query_as::<_, RepairOrder>(
        "UPDATE repair_orders SET total_price = $1, updated_at = NOW() WHERE id = $2 RETURNING *",
    )
    .bind(total)
    .bind(order_id)
    .fetch_one(&mut **tx)
    .await?;
    Ok(order)
}
