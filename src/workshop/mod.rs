// Workshop catalog module
// Priced service catalog with cost/margin based pricing

pub mod handlers;
pub mod models;
pub mod repository;

pub use handlers::{
    create_operation_handler, delete_operation_handler, get_operation_handler,
    list_operations_handler, update_operation_handler,
};
pub use models::{CreateWorkshopOperation, UpdateWorkshopOperation, WorkshopOperation};
