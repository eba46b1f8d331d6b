use std::fmt;

/// Outcome of validating the domain of an email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValidationStatus {
    /// Input changed, a result is not available yet.
    Pending,
    /// Domain is well known or has at least one usable MX record.
    Valid,
    /// Domain does not exist (NXDOMAIN) and no correction was found.
    NotRegistered,
    /// Domain exists but cannot receive mail.
    NoMxRecord,
    /// Domain is one edit away from the carried known domain.
    TypoDetected(String),
    /// Address is malformed or incomplete.
    WrongSchema,
    /// Nothing to report: empty input or the lookup could not be completed.
    Unknown,
}

impl ValidationStatus {
    /// Stable code used by the HTTP and GraphQL surfaces.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Valid => "VALID",
            Self::NotRegistered => "NOT_REGISTERED",
            Self::NoMxRecord => "NO_MX_RECORD",
            Self::TypoDetected(_) => "TYPO_DETECTED",
            Self::WrongSchema => "WRONG_SCHEMA",
            Self::Unknown => "UNKNOWN",
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// The suggested domain, if this is a [`ValidationStatus::TypoDetected`].
    pub fn suggestion(&self) -> Option<&str> {
        match self {
            Self::TypoDetected(domain) => Some(domain),
            _ => None,
        }
    }
}

impl fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TypoDetected(domain) => write!(f, "{} ({domain})", self.code()),
            _ => f.write_str(self.code()),
        }
    }
}
