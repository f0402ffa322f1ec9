// Invoice data models and DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Invoice payment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Pending,
    Paid,
    Cancelled,
}

/// Invoice database model
///
/// amount is the repair order total at generation time; total_amount is
/// amount plus tax.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Invoice {
    pub id: i32,
    /// Format INV-YYYYMMDD-NNNN
    pub invoice_number: String,
    pub customer_id: i32,
    pub repair_order_id: i32,
    pub amount: Decimal,
    pub tax: Decimal,
    pub total_amount: Decimal,
    pub status: InvoiceStatus,
    pub paid_at: Option<DateTime<Utc>>,
    pub due_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub pdf_path: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for generating an invoice from a completed repair order
#[derive(Debug, Deserialize)]
pub struct GenerateInvoiceRequest {
    pub repair_order_id: i32,
    pub due_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

/// Request payload for changing an invoice's payment status
#[derive(Debug, Deserialize)]
pub struct UpdateInvoiceStatusRequest {
    pub status: InvoiceStatus,
}

/// Query parameters for listing invoices
#[derive(Debug, Deserialize)]
pub struct InvoiceListParams {
    pub status: Option<InvoiceStatus>,
    pub customer_id: Option<i32>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Cancelled => "cancelled",
        }
    }
}
