// Customer management module
// CRUD over the shop's customer registry plus CSV bulk import

pub mod handlers;
pub mod import;
pub mod models;
pub mod repository;

pub use handlers::{
    create_customer_handler, delete_customer_handler, get_customer_handler,
    list_customers_handler, update_customer_handler,
};
pub use import::import_customers_handler;
pub use models::{CreateCustomer, Customer, CustomerWithBicycles, UpdateCustomer};
