//! Shared types and domain logic for the Vyapaar inventory & billing platform
//!
//! This crate contains the pure business logic (unit conversion, bulk
//! transaction planning, invoice assembly) and the wire models shared
//! between the backend and other components. It has no I/O dependencies.

pub mod convert;
pub mod invoice;
pub mod ledger;
pub mod models;
pub mod types;
pub mod validation;
pub mod words;

pub use convert::*;
pub use models::*;
pub use types::*;
