//! # cloudns-provider
//!
//! A typed async client for the [ClouDNS](https://www.cloudns.net/) HTTP/JSON API:
//! zones, records of every type the provider supports, and record failover.
//!
//! ## Feature Flags
//!
//! ### TLS Backend
//!
//! - **`native-tls`** *(default)* — Use the platform's native TLS implementation.
//! - **`rustls`** — Use rustls. Recommended for cross-compilation and Android targets.
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! cloudns-provider = "0.1"
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use cloudns_provider::{Apiaccess, ClouDnsClient, Record, RecordType};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ClouDnsClient::new()?;
//!     let auth = Apiaccess::new(1234, "api-password");
//!
//!     // 1. Check the credentials
//!     client.login_check(&auth).await?;
//!
//!     // 2. Look up a zone
//!     let zone = client.read_zone(&auth, "example.com").await?;
//!
//!     // 3. Add an MX record
//!     let mx = Record {
//!         priority: 10,
//!         ..Record::new(&zone.domain, "", RecordType::Mx, "mail.example.com", 3600)
//!     };
//!     let created = client.create_record(&auth, &mx).await?;
//!     println!("created record {}", created.id);
//!
//!     Ok(())
//! }
//! ```
//!
//! Credentials are passed to every call; one client can serve many accounts
//! concurrently.
//!
//! ## Record Attributes
//!
//! [`Record`] holds every extended attribute the API knows (priority, web
//! redirect frame settings, CAA tag, LOC coordinates, ...). Requests only carry
//! the attributes registered for the record's type, see
//! [`RecordField::for_type`].
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, ProviderError>`](ProviderError):
//!
//! - [`ProviderError::Api`] — the API answered with a failure status; the
//!   message is the provider's own description
//! - [`ProviderError::Transport`] — no response body could be obtained
//! - [`ProviderError::Decode`] — the response did not have the expected shape
//! - [`ProviderError::NotFound`] — a zone lookup found no exact match
//! - [`ProviderError::Unsupported`] — the API has no such operation
//!
//! Nothing is retried.

mod client;
mod endpoint;
mod envelope;
mod error;
mod operations;
mod port;
mod projection;
mod transport;
mod types;
mod utils;

#[cfg(test)]
mod testing;

pub use client::{ClouDnsClient, ClouDnsClientBuilder, DEFAULT_BASE_URL};
pub use endpoint::Endpoint;
pub use envelope::{SUCCESS_STATUS, failure_message};
pub use error::{ProviderError, Result};
pub use port::{CustomPort, PortDecodeError};
pub use projection::{RecordField, outbound_fields, reconstruct};
pub use transport::{HttpResponse, HttpTransport, Transport};
pub use types::{
    Apiaccess, CheckSettings, Failover, MAX_BACKUP_IPS, Nameserver, Record, RecordType, Zone,
    ZoneQuery, ZoneType,
};

pub use utils::log_sanitizer;
