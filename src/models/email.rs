use crate::pipeline::sink::{INCOMPLETE_MESSAGE, status_message};
use crate::validation::status::ValidationStatus;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Deserialize, Serialize, ToSchema)]
pub struct EmailRequest {
    pub email: String,
}

#[derive(Deserialize, Serialize, ToSchema)]
pub struct BulkEmailRequest {
    pub emails: Vec<String>,
}

/// Result of validating one address.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct EmailValidationResponse {
    pub email: String,
    /// One of `VALID`, `NOT_REGISTERED`, `NO_MX_RECORD`, `TYPO_DETECTED`,
    /// `WRONG_SCHEMA` or `UNKNOWN`.
    pub status: String,
    pub is_valid: bool,
    /// Suggested domain when `status` is `TYPO_DETECTED`.
    pub suggestion: Option<String>,
    pub message: Option<String>,
}

impl EmailValidationResponse {
    pub fn new(email: impl Into<String>, status: &ValidationStatus) -> Self {
        Self {
            email: email.into(),
            status: status.code().to_string(),
            is_valid: status.is_valid(),
            suggestion: status.suggestion().map(str::to_string),
            message: response_message(status),
        }
    }
}

/// Message for a one-shot validation. Malformed addresses get the
/// "incomplete" hint right away since there is no staging here.
pub fn response_message(status: &ValidationStatus) -> Option<String> {
    match status {
        ValidationStatus::WrongSchema => Some(INCOMPLETE_MESSAGE.to_string()),
        other => status_message(other),
    }
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct BulkEmailValidationResponse {
    pub results: Vec<EmailValidationResponse>,
    pub valid_count: i32,
    pub invalid_count: i32,
}

impl BulkEmailValidationResponse {
    pub fn from_results(results: Vec<EmailValidationResponse>) -> Self {
        let valid_count = results.iter().filter(|r| r.is_valid).count() as i32;
        let invalid_count = results.len() as i32 - valid_count;
        Self {
            results,
            valid_count,
            invalid_count,
        }
    }
}
