pub mod auth;
pub mod bicycles;
pub mod customers;
pub mod db;
pub mod error;
pub mod inventory;
pub mod invoices;
pub mod notifications;
pub mod pricing;
pub mod query;
pub mod repairs;
pub mod serde_util;
pub mod validation;
pub mod workshop;

use std::sync::Arc;

use axum::{
    routing::{delete, get, patch, post, put},
    Json, Router,
};
use sqlx::PgPool;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use auth::{AuthService, TokenService, UserRepository};
use invoices::InvoiceService;
use notifications::{LogDeliveryProvider, NotificationService};
use repairs::{RepairRepository, RepairService};

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        customers::handlers::list_customers_handler,
        customers::handlers::get_customer_handler,
        customers::handlers::create_customer_handler,
        customers::handlers::update_customer_handler,
        customers::handlers::delete_customer_handler,
    ),
    components(
        schemas(customers::Customer, customers::CreateCustomer, customers::UpdateCustomer)
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "customers", description = "Customer registry endpoints")
    ),
    info(
        title = "Bike Shop API",
        version = "1.0.0",
        description = "RESTful API for bicycle repair shop management"
    )
)]
struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub token_service: TokenService,
    pub auth_service: AuthService,
    pub repair_service: RepairService,
    pub invoice_service: InvoiceService,
    pub notification_service: NotificationService,
}

impl AppState {
    /// Wire up all services over one connection pool
    pub fn new(db: PgPool, jwt_secret: String, jwt_expiry_seconds: i64) -> Self {
        let token_service = TokenService::new(jwt_secret, jwt_expiry_seconds);
        let auth_service = AuthService::new(UserRepository::new(db.clone()), token_service.clone());
        let repair_service = RepairService::new(RepairRepository::new(db.clone()));
        let invoice_service = InvoiceService::new(db.clone());
        let notification_service =
            NotificationService::new(db.clone(), Arc::new(LogDeliveryProvider));

        Self {
            db,
            token_service,
            auth_service,
            repair_service,
            invoice_service,
            notification_service,
        }
    }
}

/// Liveness endpoint for container orchestration
async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Creates and configures the application router
/// Maps all API endpoints to their handlers and adds CORS middleware
pub fn create_router(state: AppState) -> Router {
    use tower_http::cors::{Any, CorsLayer};

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(health_handler))
        // Authentication
        .route("/api/auth/register", post(auth::register_handler))
        .route("/api/auth/login", post(auth::login_handler))
        .route("/api/auth/me", get(auth::me_handler))
        // User management (admin)
        .route("/api/users", get(auth::list_users_handler))
        .route("/api/users/:id", get(auth::get_user_handler))
        .route("/api/users/:id", put(auth::update_user_handler))
        .route("/api/users/:id", delete(auth::deactivate_user_handler))
        // Customers
        .route("/api/customers", get(customers::list_customers_handler))
        .route("/api/customers", post(customers::create_customer_handler))
        .route("/api/customers/import", post(customers::import_customers_handler))
        .route("/api/customers/:id", get(customers::get_customer_handler))
        .route("/api/customers/:id", put(customers::update_customer_handler))
        .route("/api/customers/:id", delete(customers::delete_customer_handler))
        // Bicycles
        .route("/api/bicycles", get(bicycles::list_bicycles_handler))
        .route("/api/bicycles", post(bicycles::create_bicycle_handler))
        .route("/api/bicycles/:id", get(bicycles::get_bicycle_handler))
        .route("/api/bicycles/:id", put(bicycles::update_bicycle_handler))
        .route("/api/bicycles/:id", delete(bicycles::delete_bicycle_handler))
        // Workshop catalog
        .route("/api/workshop/operations", get(workshop::list_operations_handler))
        .route("/api/workshop/operations", post(workshop::create_operation_handler))
        .route("/api/workshop/operations/:id", get(workshop::get_operation_handler))
        .route("/api/workshop/operations/:id", put(workshop::update_operation_handler))
        .route("/api/workshop/operations/:id", delete(workshop::delete_operation_handler))
        // Inventory
        .route("/api/inventory", get(inventory::list_items_handler))
        .route("/api/inventory", post(inventory::create_item_handler))
        .route("/api/inventory/:id", get(inventory::get_item_handler))
        .route("/api/inventory/:id", put(inventory::update_item_handler))
        .route("/api/inventory/:id", delete(inventory::delete_item_handler))
        .route("/api/inventory/:id/quantity", patch(inventory::change_quantity_handler))
        // Repair orders
        .route("/api/repairs", get(repairs::list_repairs_handler))
        .route("/api/repairs", post(repairs::create_repair_handler))
        .route("/api/repairs/:id", get(repairs::get_repair_handler))
        .route("/api/repairs/:id", put(repairs::update_repair_handler))
        .route("/api/repairs/:id", delete(repairs::delete_repair_handler))
        .route("/api/repairs/:id/status", patch(repairs::update_status_handler))
        // Notifications
        .route("/api/notifications", get(notifications::list_notifications_handler))
        .route("/api/notifications/email", post(notifications::send_email_handler))
        .route("/api/notifications/whatsapp", post(notifications::send_whatsapp_handler))
        // Invoices
        .route("/api/invoices", get(invoices::list_invoices_handler))
        .route("/api/invoices/generate", post(invoices::generate_invoice_handler))
        .route("/api/invoices/:id", get(invoices::get_invoice_handler))
        .route("/api/invoices/:id/status", patch(invoices::update_invoice_status_handler))
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    tracing::info!("Bike Shop API - Starting...");

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let jwt_secret = std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in environment");
    let jwt_expiry_seconds: i64 = std::env::var("JWT_EXPIRES_IN")
        .unwrap_or_else(|_| "86400".to_string())
        .parse()
        .expect("JWT_EXPIRES_IN must be a number of seconds");

    tracing::info!("Connecting to database...");
    let db_pool = db::create_pool(&database_url)
        .await
        .expect("Failed to create database pool");

    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Migrations completed successfully");

    let state = AppState::new(db_pool, jwt_secret, jwt_expiry_seconds);
    let app = create_router(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Bike Shop API is running on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    axum::serve(listener, app).await.expect("Server error");
}

#[cfg(test)]
mod tests;
