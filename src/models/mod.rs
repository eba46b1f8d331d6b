/// # Health Status Response
///
/// Represents the operational status of the service with a timestamp.
/// Used as the response format for health check endpoints.
///
/// ## Example JSON
/// ```json
/// {
///   "status": "UP",
///   "timestamp": "2024-03-10T15:30:45.123456789Z"
/// }
/// ```
pub mod health;

/// # Email Validation Payloads
///
/// Request and response bodies of the validation endpoints. A response
/// carries the status code, whether the address is valid, the suggested
/// domain for typos and the message a user would be shown.
///
/// ## Example JSON
/// ```json
/// {
///   "email": "jane@gnail.com",
///   "status": "TYPO_DETECTED",
///   "is_valid": false,
///   "suggestion": "gmail.com",
///   "message": "Did you mean gmail.com?"
/// }
/// ```
pub mod email;

/// # Custom Domain Payloads
///
/// Bodies of the endpoints that list and extend the custom domains.
pub mod domain;

pub use domain::{CustomDomainRequest, CustomDomainResponse, CustomDomainsResponse};
pub use email::{BulkEmailRequest, BulkEmailValidationResponse, EmailRequest, EmailValidationResponse};
pub use health::HealthResponse;
