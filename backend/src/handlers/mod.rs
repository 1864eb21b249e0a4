//! HTTP handlers for the Vyapaar backend

pub mod auth;
pub mod health;
pub mod invoice;
pub mod items;
pub mod stock;

pub use auth::*;
pub use health::*;
pub use invoice::*;
pub use items::*;
pub use stock::*;
