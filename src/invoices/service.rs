// Invoice generation and queries

use chrono::Utc;
use rand::Rng;
use sqlx::PgPool;

use crate::error::ApiError;
use crate::invoices::models::{
    GenerateInvoiceRequest, Invoice, InvoiceListParams, InvoiceStatus, UpdateInvoiceStatusRequest,
};
use crate::pricing::PriceCalculator;
use crate::query::{pagination_or, Paginated, SqlQueryBuilder};
use crate::repairs::models::{RepairOrder, RepairStatus};

/// Service that turns completed repair orders into invoices
#[derive(Clone)]
pub struct InvoiceService {
    pool: PgPool,
}

impl InvoiceService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Generate an invoice for a completed repair order
    ///
    /// At most one invoice exists per order; the amount is the order total
    /// at generation time and tax is the fixed 21% VAT rate.
    pub async fn generate(&self, request: GenerateInvoiceRequest) -> Result<Invoice, ApiError> {
        let order = sqlx::query_as::<_, RepairOrder>("SELECT * FROM repair_orders WHERE id = $1")
            .bind(request.repair_order_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| ApiError::not_found("Repair order", request.repair_order_id))?;

        if order.status != RepairStatus::Completed {
            return Err(ApiError::InvalidState {
                message: format!(
                    "Cannot generate invoice for repair order in status '{}'",
                    order.status
                ),
            });
        }

        let already_invoiced: Option<bool> =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM invoices WHERE repair_order_id = $1)")
                .bind(order.id)
                .fetch_one(&self.pool)
                .await?;
        if already_invoiced.unwrap_or(false) {
            return Err(ApiError::Conflict {
                message: format!("Invoice already exists for repair order {}", order.id),
            });
        }

        let invoice_number = generate_invoice_number();
        let amount = order.total_price;
        let tax = PriceCalculator::tax(amount);
        let total_amount = PriceCalculator::round2(amount + tax);

        let invoice = sqlx::query_as::<_, Invoice>(
            r#"
            INSERT INTO invoices
                (invoice_number, customer_id, repair_order_id, amount, tax, total_amount,
                 due_date, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(&invoice_number)
        .bind(order.customer_id)
        .bind(order.id)
        .bind(amount)
        .bind(tax)
        .bind(total_amount)
        .bind(request.due_date)
        .bind(&request.notes)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            // The unique constraint on repair_order_id backstops the
            // existence check under concurrent generation.
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return ApiError::Conflict {
                        message: format!("Invoice already exists for repair order {}", order.id),
                    };
                }
            }
            ApiError::DatabaseError(e)
        })?;

        tracing::info!(
            "Generated invoice {} for repair order {} at total {}",
            invoice.invoice_number,
            order.id,
            invoice.total_amount
        );
        Ok(invoice)
    }

    /// List invoices, newest first
    pub async fn list(&self, params: InvoiceListParams) -> Result<Paginated<Invoice>, ApiError> {
        let (limit, offset) = pagination_or(params.limit, params.offset, 10);

        let mut builder = SqlQueryBuilder::new("invoices");
        if let Some(status) = params.status {
            builder.add_eq_text("status", status.as_str());
        }
        if let Some(customer_id) = params.customer_id {
            builder.add_eq_int("customer_id", customer_id);
        }
        builder.set_order("created_at DESC");
        builder.set_pagination(limit, offset);

        let (count_sql, count_params) = builder.build_count();
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        for param in &count_params {
            count_query = count_query.bind(param);
        }
        let total = count_query.fetch_one(&self.pool).await?;

        let (sql, query_params) = builder.build();
        let mut query = sqlx::query_as::<_, Invoice>(&sql);
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

    /// Fetch an invoice by id
    pub async fn get(&self, id: i32) -> Result<Invoice, ApiError> {
        sqlx::query_as::<_, Invoice>("SELECT * FROM invoices WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| ApiError::not_found("Invoice", id))
    }

    /// Change the payment status; marking paid stamps paid_at once
    pub async fn update_status(
        &self,
        id: i32,
        request: UpdateInvoiceStatusRequest,
    ) -> Result<Invoice, ApiError> {
        let paid_at = match request.status {
            InvoiceStatus::Paid => Some(Utc::now()),
            _ => None,
        };

        let invoice = sqlx::query_as::<_, Invoice>(
            r#"
            UPDATE invoices
            SET status = $1, paid_at = COALESCE(paid_at, $2), updated_at = NOW()
            WHERE id = $3
            RETURNING *
            "#,
        )
        .bind(request.status)
        .bind(paid_at)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Invoice", id))?;

        Ok(invoice)
    }
}

/// Build an invoice number: INV-YYYYMMDD-NNNN with a random 4-digit suffix
///
/// Collisions within a day are possible but rare; the unique constraint on
/// invoice_number rejects them rather than silently reusing a number.
fn generate_invoice_number() -> String {
    let date = Utc::now().format("%Y%m%d");
    let suffix: u32 = rand::thread_rng().gen_range(1000..=9999);
    format!("INV-{}-{}", date, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invoice_number_format() {
        let number = generate_invoice_number();
        let parts: Vec<&str> = number.split('-').collect();

        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "INV");
        assert_eq!(parts[1].len(), 8);
        assert!(parts[1].chars().all(|c| c.is_ascii_digit()));
        assert_eq!(parts[2].len(), 4);
        let suffix: u32 = parts[2].parse().unwrap();
        assert!((1000..=9999).contains(&suffix));
    }

    #[test]
    fn test_invoice_number_uses_current_date() {
        let number = generate_invoice_number();
        let today = Utc::now().format("%Y%m%d").to_string();
        assert!(number.starts_with(&format!("INV-{}-", today)));
    }
}
