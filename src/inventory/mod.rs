// Inventory module
// Parts stock with low-stock tracking and quantity adjustments

pub mod handlers;
pub mod models;
pub mod repository;

pub use handlers::{
    change_quantity_handler, create_item_handler, delete_item_handler, get_item_handler,
    list_items_handler, update_item_handler,
};
pub use models::{CreateInventoryItem, InventoryItem, QuantityChange, UpdateInventoryItem};
