use crate::dns::error::{DohError, DohResult};
use crate::dns::ipv6::{Ipv6Capability, SystemIpv6};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::seq::SliceRandom;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use trust_dns_resolver::proto::op::{Message, MessageType, OpCode, Query};
use trust_dns_resolver::proto::rr::{Name, RecordType};

/// Media type of binary DNS messages carried over HTTPS.
pub const DNS_MESSAGE_MEDIA_TYPE: &str = "application/dns-message";

/// Public IPv4 DoH resolvers (Cloudflare, Google, Quad9).
pub const DEFAULT_IPV4_SERVERS: [&str; 6] = [
    "1.1.1.1",
    "1.0.0.1",
    "8.8.8.8",
    "8.8.4.4",
    "9.9.9.9",
    "149.112.112.112",
];

/// Public IPv6 DoH resolvers, same providers as [`DEFAULT_IPV4_SERVERS`].
pub const DEFAULT_IPV6_SERVERS: [&str; 6] = [
    "2606:4700:4700::1111",
    "2606:4700:4700::1001",
    "2001:4860:4860::8888",
    "2001:4860:4860::8844",
    "2620:fe::fe",
    "2620:fe::9",
];

/// DoH endpoints grouped by address family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverPool {
    ipv4: Vec<String>,
    ipv6: Vec<String>,
}

impl ResolverPool {
    /// Builds `https://<host>/dns-query` endpoints from bare host literals.
    ///
    /// IPv6 literals are wrapped in brackets unless they already are.
    pub fn from_hosts<V4, V6>(ipv4: V4, ipv6: V6) -> Self
    where
        V4: IntoIterator,
        V4::Item: AsRef<str>,
        V6: IntoIterator,
        V6::Item: AsRef<str>,
    {
        Self {
            ipv4: ipv4
                .into_iter()
                .map(|host| format!("https://{}/dns-query", host.as_ref().trim()))
                .collect(),
            ipv6: ipv6
                .into_iter()
                .map(|host| format!("https://{}/dns-query", bracket_ipv6(host.as_ref().trim())))
                .collect(),
        }
    }

    /// Uses complete endpoint URLs as given.
    pub fn from_endpoints(ipv4: Vec<String>, ipv6: Vec<String>) -> Self {
        Self { ipv4, ipv6 }
    }

    /// Endpoints eligible for a host with or without IPv6.
    ///
    /// A host with IPv6 but an empty IPv6 pool falls back to IPv4.
    pub fn endpoints(&self, ipv6: bool) -> &[String] {
        if ipv6 && !self.ipv6.is_empty() {
            &self.ipv6
        } else {
            &self.ipv4
        }
    }

    /// Picks an endpoint uniformly at random.
    pub fn choose(&self, ipv6: bool) -> Option<&str> {
        self.endpoints(ipv6)
            .choose(&mut rand::thread_rng())
            .map(String::as_str)
    }
}

impl Default for ResolverPool {
    fn default() -> Self {
        Self::from_hosts(DEFAULT_IPV4_SERVERS, DEFAULT_IPV6_SERVERS)
    }
}

fn bracket_ipv6(host: &str) -> String {
    if host.starts_with('[') {
        host.to_string()
    } else {
        format!("[{host}]")
    }
}

/// Resolves DNS questions by sending wire-format messages over HTTPS GET.
///
/// Each call picks a resolver at random from the pool matching the host's
/// current IPv6 capability. There is no retry across resolvers: a failed
/// exchange is returned to the caller as a [`DohError`].
#[derive(Clone)]
pub struct DohResolver {
    client: reqwest::Client,
    pool: ResolverPool,
    ipv6: Arc<dyn Ipv6Capability>,
}

impl fmt::Debug for DohResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DohResolver")
            .field("pool", &self.pool)
            .finish_non_exhaustive()
    }
}

impl DohResolver {
    pub fn new(client: reqwest::Client, pool: ResolverPool, ipv6: Arc<dyn Ipv6Capability>) -> Self {
        Self { client, pool, ipv6 }
    }

    /// Default public resolvers, the system IPv6 check and the given transport timeout.
    pub fn with_defaults(timeout: Option<Duration>) -> DohResult<Self> {
        Ok(Self::new(
            Self::http_client(timeout)?,
            ResolverPool::default(),
            Arc::new(SystemIpv6),
        ))
    }

    /// HTTP client for DoH requests. `timeout` bounds a whole exchange.
    pub fn http_client(timeout: Option<Duration>) -> DohResult<reqwest::Client> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        builder.build().map_err(DohError::Client)
    }

    pub fn pool(&self) -> &ResolverPool {
        &self.pool
    }

    /// Builds a recursive query for `domain` with transaction ID zero.
    pub fn build_query(domain: &str, record_type: RecordType) -> DohResult<Message> {
        let mut name = Name::from_ascii(domain).map_err(|source| DohError::InvalidName {
            name: domain.to_string(),
            source,
        })?;
        name.set_fqdn(true);

        let mut message = Message::new();
        message
            .set_id(0)
            .set_message_type(MessageType::Query)
            .set_op_code(OpCode::Query)
            .set_recursion_desired(true);
        message.add_query(Query::query(name, record_type));
        Ok(message)
    }

    /// Serializes a message and encodes it as unpadded base64url.
    pub fn encode_query(message: &Message) -> DohResult<String> {
        let wire = message.to_vec().map_err(DohError::Encode)?;
        Ok(URL_SAFE_NO_PAD.encode(wire))
    }

    /// Chooses the endpoint for the next request.
    pub fn select_endpoint(&self) -> DohResult<String> {
        let ipv6 = self.ipv6.has_ipv6();
        self.pool
            .choose(ipv6)
            .map(str::to_string)
            .ok_or(DohError::NoResolver)
    }

    /// Looks up `record_type` records for `domain`.
    pub async fn query(&self, domain: &str, record_type: RecordType) -> DohResult<Message> {
        let message = Self::build_query(domain, record_type)?;
        self.resolve(&message).await
    }

    /// Sends a prepared query message and decodes the answer.
    pub async fn resolve(&self, message: &Message) -> DohResult<Message> {
        let encoded = Self::encode_query(message)?;
        let endpoint = self.select_endpoint()?;
        debug!(%endpoint, "sending DoH query");

        let response = self
            .client
            .get(&endpoint)
            .query(&[("dns", encoded.as_str())])
            .header(CONTENT_TYPE, DNS_MESSAGE_MEDIA_TYPE)
            .header(ACCEPT, DNS_MESSAGE_MEDIA_TYPE)
            .send()
            .await
            .map_err(|source| DohError::Transport {
                endpoint: endpoint.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DohError::HttpStatus { endpoint, status });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| DohError::Transport {
                endpoint: endpoint.clone(),
                source,
            })?;
        if body.is_empty() {
            return Err(DohError::EmptyBody { endpoint });
        }

        Message::from_vec(&body).map_err(DohError::Decode)
    }
}
