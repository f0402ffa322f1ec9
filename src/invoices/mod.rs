// Invoice module
// One invoice per completed repair order, with fixed-rate VAT

pub mod handlers;
pub mod models;
pub mod service;

pub use handlers::{
    generate_invoice_handler, get_invoice_handler, list_invoices_handler,
    update_invoice_status_handler,
};
pub use models::{GenerateInvoiceRequest, Invoice, InvoiceStatus};
pub use service::InvoiceService;
