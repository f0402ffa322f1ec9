// Repair order module
// Orders move through a fixed status lifecycle and carry priced line items

pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;
pub mod status_machine;

pub use error::RepairError;
pub use handlers::{
    create_repair_handler, delete_repair_handler, get_repair_handler, list_repairs_handler,
    update_repair_handler, update_status_handler,
};
pub use models::{
    CreateRepairRequest, Priority, RepairOrder, RepairOrderItem, RepairStatus,
    UpdateRepairRequest, UpdateStatusRequest,
};
pub use repository::RepairRepository;
pub use service::RepairService;
pub use status_machine::StatusMachine;
