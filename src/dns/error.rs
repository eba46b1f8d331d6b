//! DNS-over-HTTPS transport errors.

use thiserror::Error;
use trust_dns_resolver::proto::error::ProtoError;

/// Reasons a DoH exchange can fail.
///
/// These stay inside the `dns` module: the MX lookup folds every variant into
/// an indeterminate result.
#[derive(Error, Debug)]
pub enum DohError {
    /// The domain cannot be turned into a DNS query name.
    #[error("invalid query name {name}: {source}")]
    InvalidName {
        name: String,
        #[source]
        source: ProtoError,
    },

    /// The query message could not be serialized to wire format.
    #[error("failed to encode DNS query: {0}")]
    Encode(#[source] ProtoError),

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Neither resolver pool has an entry.
    #[error("no DoH resolver configured")]
    NoResolver,

    /// The HTTPS request failed before a response arrived.
    #[error("DoH request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// The resolver answered with a non-success HTTP status.
    #[error("DoH resolver {endpoint} answered with HTTP {status}")]
    HttpStatus {
        endpoint: String,
        status: reqwest::StatusCode,
    },

    /// The response carried no body.
    #[error("DoH resolver {endpoint} returned an empty body")]
    EmptyBody { endpoint: String },

    /// The body is not a DNS message.
    #[error("failed to decode DNS response: {0}")]
    Decode(#[source] ProtoError),
}

/// Result type for DoH operations.
pub type DohResult<T> = Result<T, DohError>;
