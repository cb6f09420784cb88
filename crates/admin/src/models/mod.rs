//! Domain models for the admin.

mod session;

pub use session::{CurrentAdmin, session_keys};
