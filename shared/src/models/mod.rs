//! Wire models for the Vyapaar platform

pub mod invoice;
pub mod item;
pub mod transaction;

pub use invoice::*;
pub use item::*;
pub use transaction::*;
