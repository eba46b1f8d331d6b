/// Extracts and normalizes the domain part of an email address.
///
/// Splitting happens at the first `@`; both sides must be non-empty. The
/// domain is lowercased and converted to its ASCII-compatible (punycode)
/// form, so `user@München.de` yields `xn--mnchen-3ya.de`.
///
/// # Examples
/// ```
/// use email_doh_validator::validation::domain::extract_domain;
///
/// assert_eq!(extract_domain("user@GMail.com").as_deref(), Some("gmail.com"));
/// assert_eq!(extract_domain("user@"), None);
/// ```
pub mod domain;

/// Built-in and custom domains that are accepted without any DNS lookup.
///
/// The custom set is append-only and shared by every clone of a
/// [`registry::DomainRegistry`]; [`registry::DomainRegistry::shared`]
/// returns the process-wide instance.
pub mod registry;

/// Outcome of a validation, with the stable codes exposed over HTTP.
pub mod status;

/// Suggests a known domain one Damerau–Levenshtein edit away from a typo.
///
/// # Examples
/// ```
/// use email_doh_validator::validation::registry::DomainRegistry;
/// use email_doh_validator::validation::typo::TypoDetector;
///
/// let detector = TypoDetector::new(DomainRegistry::new());
/// assert_eq!(detector.suggest("gnail.com").as_deref(), Some("gmail.com"));
/// assert_eq!(detector.suggest("example.com"), None);
/// ```
pub mod typo;

/// Single-shot domain validation: registry fast path, MX lookup and typo
/// redirect on negative answers.
pub mod validator;

pub use domain::{EmailParts, extract_domain, normalize_domain, replace_domain, split_address};
pub use registry::{DomainRegistry, WELL_KNOWN_DOMAINS};
pub use status::ValidationStatus;
pub use typo::{TypoDetector, damerau_levenshtein_distance};
pub use validator::{DomainValidator, Precheck};
