//! DNS-over-HTTPS resolution of MX records.

/// Binary DNS queries over HTTPS GET, with randomized resolver selection.
pub mod doh;

/// Transport and protocol failures of a DoH exchange.
pub mod error;

/// Local IPv6 capability, used to pick the resolver address family.
pub mod ipv6;

/// MX lookups and their interpretation into a [`mx::ResolverResult`].
pub mod mx;

pub use doh::{DohResolver, ResolverPool};
pub use error::{DohError, DohResult};
pub use ipv6::{FixedIpv6, Ipv6Capability, SystemIpv6};
pub use mx::{MxLookup, MxResolver, ResolverResult, interpret_mx_response};

#[cfg(test)]
pub(crate) mod fixtures;
