//! Content domain module.
//!
//! Paid media items, the file types they may be uploaded as, and the
//! entitlement rule that decides who may read them.
//!
//! # Module Structure
//!
//! - `aggregate` - Content entity
//! - `content_type` - Image/video kinds and allowed extensions
//! - `access` - Owner-or-subscriber entitlement rule
//! - `errors` - ContentError

mod access;
mod aggregate;
mod content_type;
mod errors;

pub use access::{evaluate_access, AccessDeniedReason, AccessGrant};
pub use aggregate::Content;
pub use content_type::ContentType;
pub use errors::ContentError;
