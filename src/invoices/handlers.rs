// HTTP handlers for invoice endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::auth::middleware::RequireTechnician;
use crate::error::ApiError;
use crate::invoices::models::{
    GenerateInvoiceRequest, Invoice, InvoiceListParams, UpdateInvoiceStatusRequest,
};
use crate::query::Paginated;
use crate::AppState;

/// Generate an invoice from a completed repair order
/// POST /api/invoices/generate
pub async fn generate_invoice_handler(
    State(state): State<AppState>,
    RequireTechnician(_user): RequireTechnician,
    Json(request): Json<GenerateInvoiceRequest>,
) -> Result<(StatusCode, Json<Invoice>), ApiError> {
    let invoice = state.invoice_service.generate(request).await?;
    Ok((StatusCode::CREATED, Json(invoice)))
}

/// List invoices
/// GET /api/invoices
pub async fn list_invoices_handler(
    State(state): State<AppState>,
    RequireTechnician(_user): RequireTechnician,
    Query(params): Query<InvoiceListParams>,
) -> Result<Json<Paginated<Invoice>>, ApiError> {
    let page = state.invoice_service.list(params).await?;
    Ok(Json(page))
}

/// Get an invoice by id
/// GET /api/invoices/{id}
pub async fn get_invoice_handler(
    State(state): State<AppState>,
    RequireTechnician(_user): RequireTechnician,
    Path(id): Path<i32>,
) -> Result<Json<Invoice>, ApiError> {
    let invoice = state.invoice_service.get(id).await?;
    Ok(Json(invoice))
}

/// Update an invoice's payment status
/// PATCH /api/invoices/{id}/status
pub async fn update_invoice_status_handler(
    State(state): State<AppState>,
    RequireTechnician(_user): RequireTechnician,
    Path(id): Path<i32>,
    Json(request): Json<UpdateInvoiceStatusRequest>,
) -> Result<Json<Invoice>, ApiError> {
    let invoice = state.invoice_service.update_status(id, request).await?;
    Ok(Json(invoice))
}
