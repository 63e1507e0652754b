//! # cf-dns-edit-provider
//!
//! Remote record store for the DNS record editor: the [`RecordStore`] trait,
//! the shared record model, and a Cloudflare v4 API implementation.
//!
//! ## Feature Flags
//!
//! - **`cloudflare`** *(default)*: Enable [`CloudflareStore`].
//! - **`rustls`** *(default)*: Use rustls for TLS.
//! - **`native-tls`**: Use the platform's native TLS implementation.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use cf_dns_edit_provider::{CloudflareConfig, CloudflareStore, RecordStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = CloudflareStore::new(CloudflareConfig::new("your-token"))?;
//!
//!     if !store.verify_token().await? {
//!         return Err("token rejected".into());
//!     }
//!
//!     for zone in store.list_zones().await? {
//!         for record in store.list_records(&zone.id).await? {
//!             println!("{} | {} | {} | TTL: {}", record.record_type, record.name, record.content, record.ttl);
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every operation returns [`Result<T, ProviderError>`](ProviderError).
//! Stores make exactly one attempt per call; transient failures
//! (`NetworkError`, `Timeout`, `RateLimited`) are reported to the caller,
//! which decides whether to resubmit.

mod error;
#[cfg(feature = "cloudflare")]
mod http_client;
mod providers;
mod traits;
mod types;
mod utils;

pub use error::{ProviderError, Result};

pub use traits::RecordStore;

pub use types::{
    CredentialValidationError, DnsRecord, RecordPayload, RecordType, Ttl, UnsupportedRecordType,
    Zone, ZoneStatus,
};

pub use providers::common::{full_name_to_relative, pluralize, relative_to_full_name};

pub use utils::{datetime, log_sanitizer};

#[cfg(feature = "cloudflare")]
pub use providers::{CloudflareConfig, CloudflareStore};
