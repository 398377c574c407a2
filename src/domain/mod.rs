//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (ids, timestamps, errors, identity claim)
//! - `subscription` - Subscription entity, status machine, sweep report
//! - `content` - Paid content items and the entitlement rule
//! - `user` - Registered accounts

pub mod content;
pub mod foundation;
pub mod subscription;
pub mod user;
