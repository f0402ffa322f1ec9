// Notification module
// Customer-facing messages with a persisted audit trail per attempt

pub mod delivery;
pub mod handlers;
pub mod models;
pub mod service;

pub use delivery::{DeliveryProvider, LogDeliveryProvider};
pub use handlers::{list_notifications_handler, send_email_handler, send_whatsapp_handler};
pub use models::{Notification, NotificationStatus, NotificationType};
pub use service::NotificationService;
