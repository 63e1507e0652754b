//! Record store implementations

/// Shared utilities used by store implementations.
pub mod common;

#[cfg(feature = "cloudflare")]
mod cloudflare;

#[cfg(feature = "cloudflare")]
pub use cloudflare::{CloudflareConfig, CloudflareStore};
