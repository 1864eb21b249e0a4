//! Business logic services for the Vyapaar backend

pub mod auth;
pub mod invoice;
pub mod items;
pub mod stock;

pub use auth::AuthService;
pub use invoice::InvoiceService;
pub use items::ItemService;
pub use stock::StockService;
