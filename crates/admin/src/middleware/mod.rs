//! Middleware for the admin: session management and the access guard.

pub mod auth;
pub mod session;
