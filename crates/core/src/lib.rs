//! Ctrl Alt Crew Core - Shared types and content sanitization.
//!
//! This crate provides common types used across both Ctrl Alt Crew binaries:
//! - `site` - Public-facing marketing site and blog
//! - `admin` - Content-management admin panel
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no session handling. This keeps it lightweight and allows it to
//! be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, slugs, and statuses
//! - [`sanitize`] - Allow-list HTML sanitization for user-supplied rich text

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod sanitize;
pub mod types;

pub use sanitize::sanitize;
pub use types::*;
