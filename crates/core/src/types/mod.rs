//! Shared domain types.
//!
//! Newtype wrappers that make invalid states unrepresentable:
//! - [`id`] - Type-safe UUID wrappers for entity references
//! - [`email`] - Validated email addresses
//! - [`slug`] - URL-safe post identifiers
//! - [`status`] - Service request lifecycle status

pub mod email;
pub mod id;
pub mod slug;
pub mod status;

pub use email::{Email, EmailError};
pub use id::{PostId, RequestId, UserId};
pub use slug::{Slug, SlugError};
pub use status::RequestStatus;
