//! Kimiyomi - entitlement and token authority for a paid content platform.
//!
//! Issues and validates identity tokens, keeps the subscription ledger,
//! sweeps expired subscriptions, and decides who may read which content.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
