use crate::dns::doh::{DEFAULT_IPV4_SERVERS, DEFAULT_IPV6_SERVERS, ResolverPool};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("environment variable {name} has invalid value {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Service configuration read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub ipv4_servers: Vec<String>,
    pub ipv6_servers: Vec<String>,
    /// Bound on a whole DoH exchange, enforced by the HTTP client.
    pub doh_timeout: Duration,
    /// Added to the shared registry at startup.
    pub custom_domains: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            ipv4_servers: DEFAULT_IPV4_SERVERS.iter().map(|s| s.to_string()).collect(),
            ipv6_servers: DEFAULT_IPV6_SERVERS.iter().map(|s| s.to_string()).collect(),
            doh_timeout: Duration::from_secs(10),
            custom_domains: Vec::new(),
        }
    }
}

impl Config {
    /// Reads the configuration from the process environment.
    ///
    /// A `.env` file in the working directory is loaded first, if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from any variable source.
    ///
    /// Unset or blank variables keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        Ok(Self {
            host: get("HOST").map_or(defaults.host, |host| host.trim().to_string()),
            port: parse(&get, "PORT")?.unwrap_or(defaults.port),
            ipv4_servers: get("DOH_IPV4_SERVERS").map_or(defaults.ipv4_servers, |v| split_list(&v)),
            ipv6_servers: get("DOH_IPV6_SERVERS").map_or(defaults.ipv6_servers, |v| split_list(&v)),
            doh_timeout: parse(&get, "DOH_TIMEOUT_SECS")?
                .map_or(defaults.doh_timeout, Duration::from_secs),
            custom_domains: get("CUSTOM_DOMAINS").map_or_else(Vec::new, |v| split_list(&v)),
        })
    }

    /// DoH endpoints built from the configured hosts.
    pub fn resolver_pool(&self) -> ResolverPool {
        ResolverPool::from_hosts(&self.ipv4_servers, &self.ipv6_servers)
    }
}

fn parse<T, G>(get: &G, name: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    G: Fn(&str) -> Option<String>,
{
    get(name)
        .map(|value| {
            value.trim().parse().map_err(|_| ConfigError::Invalid {
                name,
                value: value.clone(),
            })
        })
        .transpose()
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
