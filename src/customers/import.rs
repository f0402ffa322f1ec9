// CSV bulk import for customers

use axum::extract::{Multipart, State};
use axum::Json;
use serde::Deserialize;

use crate::auth::middleware::RequireTechnician;
use crate::customers::models::{CreateCustomer, ImportResult};
use crate::customers::repository;
use crate::error::ApiError;
use crate::validation::validate_phone;
use crate::AppState;

/// Expected CSV columns; headers beyond these are ignored
#[derive(Debug, Deserialize)]
struct CustomerCsvRow {
    name: Option<String>,
    phone: Option<String>,
    email: Option<String>,
    address: Option<String>,
    notes: Option<String>,
}

/// Import customers from an uploaded CSV file
///
/// Rows are processed independently: a bad row is reported and skipped while
/// the rest of the file continues to import.
/// POST /api/customers/import
pub async fn import_customers_handler(
    State(state): State<AppState>,
    RequireTechnician(_user): RequireTechnician,
    mut multipart: Multipart,
) -> Result<Json<ImportResult>, ApiError> {
    let mut file_bytes: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Invalid multipart payload: {}", e)))?
    {
        if field.name() == Some("file") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::BadRequest(format!("Failed to read file: {}", e)))?;
            file_bytes = Some(bytes.to_vec());
            break;
        }
    }

    let file_bytes =
        file_bytes.ok_or_else(|| ApiError::BadRequest("No file field in upload".to_string()))?;

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(file_bytes.as_slice());

    let mut imported = 0usize;
    let mut errors = Vec::new();

    for (index, record) in reader.deserialize::<CustomerCsvRow>().enumerate() {
        // CSV line numbers are 1-based and line 1 is the header
        let line = index + 2;

        let row = match record {
            Ok(row) => row,
            Err(e) => {
                errors.push(format!("Line {}: unreadable row ({})", line, e));
                continue;
            }
        };

        let name = match row.name.filter(|n| !n.is_empty()) {
            Some(name) => name,
            None => {
                errors.push(format!("Line {}: missing name", line));
                continue;
            }
        };
        let phone = match row.phone.filter(|p| !p.is_empty()) {
            Some(phone) => phone,
            None => {
                errors.push(format!("Line {}: missing phone", line));
                continue;
            }
        };
        if validate_phone(&phone).is_err() {
            errors.push(format!("Line {}: invalid phone '{}'", line, phone));
            continue;
        }

        let payload = CreateCustomer {
            name,
            phone: phone.clone(),
            email: row.email.filter(|e| !e.is_empty()),
            address: row.address.filter(|a| !a.is_empty()),
            notes: row.notes.filter(|n| !n.is_empty()),
        };

        match repository::create_customer(&state.db, payload).await {
            Ok(_) => imported += 1,
            Err(ApiError::Conflict { .. }) => {
                errors.push(format!("Line {}: phone '{}' already exists", line, phone));
            }
            Err(e) => return Err(e),
        }
    }

    tracing::info!(
        "Customer import finished: {} imported, {} errors",
        imported,
        errors.len()
    );

    Ok(Json(ImportResult {
        message: format!("Imported {} customers", imported),
        imported,
        errors,
    }))
}
