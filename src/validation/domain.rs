/// An email address split at its first `@`.
///
/// `domain` is already normalized: IDN labels are converted to their
/// ASCII-compatible encoding and everything is lowercase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailParts<'a> {
    pub local: &'a str,
    pub domain: String,
}

/// Splits an email address into local part and normalized domain.
///
/// Returns `None` when the address has no `@` after at least one character,
/// when nothing follows the `@`, or when the remainder is not a valid
/// domain name. All of these are treated as a malformed address by callers.
///
/// # Examples
/// ```
/// use email_doh_validator::validation::domain::split_address;
///
/// let parts = split_address("Jane@Example.COM").unwrap();
/// assert_eq!(parts.local, "Jane");
/// assert_eq!(parts.domain, "example.com");
///
/// assert!(split_address("@example.com").is_none());
/// assert!(split_address("jane@").is_none());
/// ```
pub fn split_address(address: &str) -> Option<EmailParts<'_>> {
    let (local, remainder) = address.split_once('@')?;
    if local.is_empty() || remainder.is_empty() {
        return None;
    }

    let domain = normalize_domain(remainder)?;
    Some(EmailParts { local, domain })
}

/// Returns the normalized domain of an email address, see [`split_address`].
pub fn extract_domain(address: &str) -> Option<String> {
    split_address(address).map(|parts| parts.domain)
}

/// Lowercases a domain and converts it to its ASCII-compatible encoding.
///
/// Surrounding whitespace is ignored. Labels must follow STD3 host rules
/// (letters, digits and hyphens) and DNS length limits. Fails closed: a
/// label that cannot be encoded yields `None`.
pub fn normalize_domain(domain: &str) -> Option<String> {
    let lowered = domain.trim().to_lowercase();
    match idna::domain_to_ascii_strict(&lowered) {
        Ok(ascii) if !ascii.is_empty() => Some(ascii),
        _ => None,
    }
}

/// Replaces everything after the first `@` with `domain`.
///
/// Input without an `@` keeps its whole text as local part.
pub fn replace_domain(address: &str, domain: &str) -> String {
    let local = address
        .split_once('@')
        .map_or(address, |(local, _)| local);
    format!("{local}@{domain}")
}
