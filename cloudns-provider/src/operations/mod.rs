//! Public operations, grouped by resource.
//!
//! Each operation is one `async fn` on [`ClouDnsClient`](crate::ClouDnsClient)
//! that performs exactly one request, except [`update_zone`] which performs
//! none.
//!
//! [`update_zone`]: crate::ClouDnsClient::update_zone

mod account;
mod failover;
mod record;
mod zone;
