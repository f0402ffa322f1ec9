// Bicycle registry module
// Each bicycle belongs to a customer and is the subject of repair orders

pub mod handlers;
pub mod models;
pub mod repository;

pub use handlers::{
    create_bicycle_handler, delete_bicycle_handler, get_bicycle_handler, list_bicycles_handler,
    update_bicycle_handler,
};
pub use models::{Bicycle, BicycleType, BicycleWithOwner, CreateBicycle, UpdateBicycle};
