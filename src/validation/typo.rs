use crate::validation::registry::DomainRegistry;

/// Alphabet bound for domain names after IDN normalization (7-bit ASCII).
pub const DOMAIN_ALPHABET: usize = 128;

/// Edit distance at which a known domain is offered as a correction.
const SUGGESTION_DISTANCE: usize = 1;

/// Damerau-Levenshtein distance between `a` and `b`.
///
/// Insertions, deletions, substitutions and transpositions of adjacent
/// characters each cost one. Works on bytes; every byte of both inputs must
/// be below `alphabet_len`, otherwise `None` is returned.
///
/// # Examples
/// ```
/// use email_doh_validator::validation::typo::{damerau_levenshtein_distance, DOMAIN_ALPHABET};
///
/// assert_eq!(damerau_levenshtein_distance("gnail.com", "gmail.com", DOMAIN_ALPHABET), Some(1));
/// assert_eq!(damerau_levenshtein_distance("gmial.com", "gmail.com", DOMAIN_ALPHABET), Some(1));
/// assert_eq!(damerau_levenshtein_distance("exämple", "example", DOMAIN_ALPHABET), None);
/// ```
pub fn damerau_levenshtein_distance(a: &str, b: &str, alphabet_len: usize) -> Option<usize> {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a.iter().chain(b).any(|&c| usize::from(c) >= alphabet_len) {
        return None;
    }

    let infinity = a.len() + b.len();
    let width = b.len() + 2;
    let at = |i: usize, j: usize| i * width + j;

    // (a.len() + 2) x (b.len() + 2) matrix with a sentinel row and column
    let mut h = vec![0usize; (a.len() + 2) * width];
    h[0] = infinity;
    for i in 0..=a.len() {
        h[at(i + 1, 1)] = i;
        h[at(i + 1, 0)] = infinity;
    }
    for j in 0..=b.len() {
        h[at(1, j + 1)] = j;
        h[at(0, j + 1)] = infinity;
    }

    // last row of `a` in which each character was seen
    let mut last_row = vec![0usize; alphabet_len];

    for i in 1..=a.len() {
        let mut last_match_col = 0;
        for j in 1..=b.len() {
            let i1 = last_row[usize::from(b[j - 1])];
            let j1 = last_match_col;
            let cost = if a[i - 1] == b[j - 1] {
                last_match_col = j;
                0
            } else {
                1
            };

            h[at(i + 1, j + 1)] = (h[at(i, j)] + cost)
                .min(h[at(i + 1, j)] + 1)
                .min(h[at(i, j + 1)] + 1)
                .min(h[at(i1, j1)] + (i - i1 - 1) + 1 + (j - j1 - 1));
        }
        last_row[usize::from(a[i - 1])] = i;
    }

    Some(h[at(a.len() + 1, b.len() + 1)])
}

/// Suggests a known domain for a domain that is one edit away from it.
#[derive(Debug, Clone)]
pub struct TypoDetector {
    registry: DomainRegistry,
}

impl TypoDetector {
    pub fn new(registry: DomainRegistry) -> Self {
        Self { registry }
    }

    /// Returns the first known domain at distance exactly one from `domain`.
    ///
    /// Built-in domains are checked before custom ones. An exact match
    /// (distance zero) or anything further away yields `None`, as does input
    /// outside the ASCII alphabet.
    pub fn suggest(&self, domain: &str) -> Option<String> {
        if !domain.is_ascii() {
            return None;
        }

        self.registry.all_domains().into_iter().find(|known| {
            damerau_levenshtein_distance(domain, known, DOMAIN_ALPHABET)
                == Some(SUGGESTION_DISTANCE)
        })
    }
}
