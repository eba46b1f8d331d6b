use crate::dns::doh::DohResolver;
use async_trait::async_trait;
use tracing::{debug, warn};
use trust_dns_resolver::proto::op::{Message, ResponseCode};
use trust_dns_resolver::proto::rr::{RData, RecordType};

/// Interpreted outcome of an MX lookup.
///
/// `result_count` is the number of usable MX records when the domain exists,
/// or `-1` when the lookup could not be completed. `not_found` is set only
/// for NXDOMAIN answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolverResult {
    pub result_count: i32,
    pub not_found: bool,
}

impl ResolverResult {
    /// The domain does not exist.
    pub const fn not_found() -> Self {
        Self {
            result_count: 0,
            not_found: true,
        }
    }

    /// The domain exists and has `count` usable MX records.
    pub const fn found(count: i32) -> Self {
        Self {
            result_count: count,
            not_found: false,
        }
    }

    /// The lookup failed; nothing is known about the domain.
    pub const fn indeterminate() -> Self {
        Self {
            result_count: -1,
            not_found: false,
        }
    }

    pub const fn is_indeterminate(&self) -> bool {
        !self.not_found && self.result_count < 0
    }
}

/// Anything that can answer "does this domain accept mail".
///
/// Implementations never fail: transport problems are reported as
/// [`ResolverResult::indeterminate`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MxLookup: Send + Sync {
    async fn lookup_mx(&self, domain: &str) -> ResolverResult;
}

/// MX lookups over DNS-over-HTTPS.
#[derive(Debug, Clone)]
pub struct MxResolver {
    doh: DohResolver,
}

impl MxResolver {
    pub fn new(doh: DohResolver) -> Self {
        Self { doh }
    }
}

#[async_trait]
impl MxLookup for MxResolver {
    async fn lookup_mx(&self, domain: &str) -> ResolverResult {
        match self.doh.query(domain, RecordType::MX).await {
            Ok(response) => {
                let result = interpret_mx_response(&response);
                debug!(domain, ?result, "MX lookup finished");
                result
            }
            Err(err) => {
                warn!(domain, error = %err, "MX lookup failed");
                ResolverResult::indeterminate()
            }
        }
    }
}

/// Maps a DNS response to a [`ResolverResult`].
///
/// NXDOMAIN means not found, NOERROR counts the MX answers whose exchange is
/// not `localhost`, and any other response code is indeterminate.
pub fn interpret_mx_response(response: &Message) -> ResolverResult {
    match response.response_code() {
        ResponseCode::NXDomain => ResolverResult::not_found(),
        ResponseCode::NoError => {
            let usable = response
                .answers()
                .iter()
                .filter_map(|record| match record.data() {
                    Some(RData::MX(mx)) => Some(mx.exchange()),
                    _ => None,
                })
                .filter(|exchange| !is_localhost(&exchange.to_ascii()))
                .count();
            ResolverResult::found(i32::try_from(usable).unwrap_or(i32::MAX))
        }
        _ => ResolverResult::indeterminate(),
    }
}

fn is_localhost(exchange: &str) -> bool {
    exchange.trim_end_matches('.').eq_ignore_ascii_case("localhost")
}
