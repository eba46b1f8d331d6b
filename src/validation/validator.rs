use crate::dns::mx::{MxLookup, ResolverResult};
use crate::validation::domain::extract_domain;
use crate::validation::registry::DomainRegistry;
use crate::validation::status::ValidationStatus;
use crate::validation::typo::TypoDetector;
use std::fmt;
use std::sync::Arc;

/// What can be decided about an input without touching the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Precheck {
    /// Blank input.
    Empty,
    /// Non-blank input without a usable domain.
    Malformed,
    /// Domain is in the registry.
    WellKnown,
    /// Domain must be looked up.
    NeedsLookup(String),
}

impl Precheck {
    /// The final status, unless a lookup is still needed.
    pub fn status(&self) -> Option<ValidationStatus> {
        match self {
            Self::Empty => Some(ValidationStatus::Unknown),
            Self::Malformed => Some(ValidationStatus::WrongSchema),
            Self::WellKnown => Some(ValidationStatus::Valid),
            Self::NeedsLookup(_) => None,
        }
    }
}

/// Validates the domain of a single address: registry fast path, MX
/// lookup, and typo detection on negative answers.
#[derive(Clone)]
pub struct DomainValidator {
    lookup: Arc<dyn MxLookup>,
    registry: DomainRegistry,
    typos: TypoDetector,
}

impl fmt::Debug for DomainValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DomainValidator")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

impl DomainValidator {
    pub fn new(lookup: Arc<dyn MxLookup>, registry: DomainRegistry) -> Self {
        let typos = TypoDetector::new(registry.clone());
        Self {
            lookup,
            registry,
            typos,
        }
    }

    pub fn registry(&self) -> &DomainRegistry {
        &self.registry
    }

    pub fn typo_detector(&self) -> &TypoDetector {
        &self.typos
    }

    pub(crate) fn lookup(&self) -> Arc<dyn MxLookup> {
        Arc::clone(&self.lookup)
    }

    /// True if the address has a domain that needs no lookup.
    pub fn has_well_known_domain(&self, address: &str) -> bool {
        extract_domain(address).is_some_and(|domain| self.registry.is_well_known(&domain))
    }

    /// Classifies an address using only local information.
    pub fn precheck(&self, address: &str) -> Precheck {
        match extract_domain(address) {
            None if address.trim().is_empty() => Precheck::Empty,
            None => Precheck::Malformed,
            Some(domain) if self.registry.is_well_known(&domain) => Precheck::WellKnown,
            Some(domain) => Precheck::NeedsLookup(domain),
        }
    }

    /// Turns a lookup result for `domain` into a status.
    ///
    /// Negative answers are redirected to [`ValidationStatus::TypoDetected`]
    /// when a known domain is one edit away.
    pub fn classify(&self, domain: &str, result: ResolverResult) -> ValidationStatus {
        if result.not_found {
            self.typo_or(domain, ValidationStatus::NotRegistered)
        } else if result.result_count == 0 {
            self.typo_or(domain, ValidationStatus::NoMxRecord)
        } else if result.result_count > 0 {
            ValidationStatus::Valid
        } else {
            ValidationStatus::Unknown
        }
    }

    fn typo_or(&self, domain: &str, fallback: ValidationStatus) -> ValidationStatus {
        self.typos
            .suggest(domain)
            .map_or(fallback, ValidationStatus::TypoDetected)
    }

    /// Validates `address` immediately, performing a lookup when needed.
    pub async fn validate(&self, address: &str) -> ValidationStatus {
        match self.precheck(address) {
            Precheck::NeedsLookup(domain) => {
                let result = self.lookup.lookup_mx(&domain).await;
                self.classify(&domain, result)
            }
            decided => decided.status().unwrap_or(ValidationStatus::Unknown),
        }
    }
}
