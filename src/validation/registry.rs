use crate::validation::domain::normalize_domain;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::sync::Arc;

/// Common mail provider domains, checked before any network lookup.
///
/// The order matters: typo suggestions walk this list front to back and the
/// first entry at edit distance one wins.
pub const WELL_KNOWN_DOMAINS: [&str; 100] = [
    "gmail.com", "yahoo.com", "hotmail.com", "aol.com", "hotmail.co.uk", "hotmail.fr",
    "msn.com", "yahoo.fr", "wanadoo.fr", "orange.fr", "comcast.net", "yahoo.co.uk",
    "yahoo.com.br", "yahoo.co.in", "live.com", "rediffmail.com", "free.fr", "gmx.de",
    "web.de", "yandex.ru", "ymail.com", "libero.it", "outlook.com", "uol.com.br",
    "bol.com.br", "mail.ru", "cox.net", "hotmail.it", "sbcglobal.net", "sfr.fr", "live.fr",
    "verizon.net", "live.co.uk", "googlemail.com", "yahoo.es", "ig.com.br", "live.nl",
    "bigpond.com", "terra.com.br", "yahoo.it", "neuf.fr", "yahoo.de", "alice.it",
    "rocketmail.com", "att.net", "laposte.net", "facebook.com", "bellsouth.net", "yahoo.in",
    "hotmail.es", "charter.net", "yahoo.ca", "yahoo.com.au", "rambler.ru", "hotmail.de",
    "tiscali.it", "shaw.ca", "yahoo.co.jp", "sky.com", "earthlink.net", "optonline.net",
    "freenet.de", "t-online.de", "aliceadsl.fr", "virgilio.it", "home.nl", "qq.com",
    "telenet.be", "me.com", "yahoo.com.ar", "tiscali.co.uk", "yahoo.com.mx", "voila.fr",
    "gmx.net", "mail.com", "planet.nl", "tin.it", "live.it", "ntlworld.com", "arcor.de",
    "yahoo.co.id", "frontiernet.net", "hetnet.nl", "live.com.au", "yahoo.com.sg",
    "zonnet.nl", "club-internet.fr", "juno.com", "optusnet.com.au", "blueyonder.co.uk",
    "bluewin.ch", "skynet.be", "sympatico.ca", "windstream.net", "mac.com",
    "centurytel.net", "chello.nl", "live.ca", "aim.com", "bigpond.net.au",
];

static SHARED: Lazy<DomainRegistry> = Lazy::new(DomainRegistry::new);

/// The set of domains trusted without a DNS lookup.
///
/// Combines [`WELL_KNOWN_DOMAINS`] with an append-only list of custom domains.
/// Clones share the same custom list, so a domain added through any handle
/// is visible to every pipeline holding a clone.
#[derive(Debug, Clone, Default)]
pub struct DomainRegistry {
    custom: Arc<RwLock<Vec<String>>>,
}

impl DomainRegistry {
    /// Creates a registry with its own, empty custom list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a handle to the process-wide registry.
    pub fn shared() -> Self {
        SHARED.clone()
    }

    /// True if `domain` is built in or was added as a custom domain.
    ///
    /// `domain` is expected in normalized form (see
    /// [`normalize_domain`](crate::validation::domain::normalize_domain)).
    pub fn is_well_known(&self, domain: &str) -> bool {
        WELL_KNOWN_DOMAINS.contains(&domain) || self.custom.read().iter().any(|d| d == domain)
    }

    /// Adds a domain to the custom list.
    ///
    /// The domain is normalized first. Returns `true` if it was not present
    /// before; adding the same domain again changes nothing.
    pub fn add_custom_domain(&self, domain: &str) -> bool {
        let Some(normalized) = normalize_domain(domain.trim()) else {
            tracing::warn!(domain, "ignoring custom domain that is not a valid domain name");
            return false;
        };

        let mut custom = self.custom.write();
        if custom.contains(&normalized) {
            return false;
        }
        tracing::info!(domain = %normalized, "registered custom domain");
        custom.push(normalized);
        true
    }

    /// Snapshot of the custom domains in insertion order.
    pub fn custom_domains(&self) -> Vec<String> {
        self.custom.read().clone()
    }

    /// Snapshot of every known domain: built-in list first, then custom ones.
    pub fn all_domains(&self) -> Vec<String> {
        WELL_KNOWN_DOMAINS
            .iter()
            .map(|d| (*d).to_string())
            .chain(self.custom_domains())
            .collect()
    }
}
