//! Application layer - use cases over the domain and ports.

mod access;
mod expiry_sweeper;
pub mod handlers;
mod services;

pub use access::AccessAuthorizer;
pub use expiry_sweeper::{ExpirySweeper, ExpirySweeperConfig};
pub use services::{Ports, Services};
