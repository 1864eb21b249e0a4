//! Middleware for the Vyapaar backend

pub mod auth;

pub use auth::{auth_middleware, AuthUser, CurrentUser};
