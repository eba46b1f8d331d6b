use crate::models::email::{
    BulkEmailRequest, BulkEmailValidationResponse, EmailRequest, EmailValidationResponse,
};
use crate::validation::validator::DomainValidator;
use actix_web::{HttpResponse, Responder, post, web};
use futures::future::join_all;
use serde_json::json;

/// Largest batch accepted by the bulk endpoint.
pub const MAX_BULK_EMAILS: usize = 100;

/// Validates a single address and renders the result.
pub async fn validate_single_email(
    validator: &DomainValidator,
    email: &str,
) -> EmailValidationResponse {
    let email = email.trim();
    let status = validator.validate(email).await;
    EmailValidationResponse::new(email, &status)
}

/// # Email Validation Endpoint
///
/// Checks the domain of an email address right away:
/// 1. Built-in and custom domains are valid without a lookup
/// 2. Other domains are resolved over DNS-over-HTTPS for MX records
/// 3. Missing domains and domains without mail servers are matched
///    against known domains to suggest a correction
///
/// The endpoint always answers 200 with the status in the body; a failed
/// lookup is reported as `UNKNOWN`.
///
/// ## Example Request
/// ```json
/// { "email": "jane@gnail.com" }
/// ```
#[utoipa::path(
    post,
    path = "/api/v1/validate-email",
    request_body = EmailRequest,
    responses(
        (status = 200, description = "Validation result", body = EmailValidationResponse),
        (status = 400, description = "Malformed request body")
    ),
    tag = "Email Validation"
)]
#[post("/validate-email")]
pub async fn validate_email(
    req: web::Json<EmailRequest>,
    validator: web::Data<DomainValidator>,
) -> impl Responder {
    HttpResponse::Ok().json(validate_single_email(&validator, &req.email).await)
}

/// # Bulk Email Validation Endpoint
///
/// Validates up to [`MAX_BULK_EMAILS`] addresses concurrently.
///
/// ## Example Request
/// ```json
/// { "emails": ["user1@example.com", "user2@example.com"] }
/// ```
#[utoipa::path(
    post,
    path = "/api/v1/validate-emails-bulk",
    request_body = BulkEmailRequest,
    responses(
        (status = 200, description = "Bulk validation results", body = BulkEmailValidationResponse),
        (status = 400, description = "Too many addresses")
    ),
    tag = "Email Validation"
)]
#[post("/validate-emails-bulk")]
pub async fn validate_emails_bulk(
    req: web::Json<BulkEmailRequest>,
    validator: web::Data<DomainValidator>,
) -> impl Responder {
    if req.emails.len() > MAX_BULK_EMAILS {
        return HttpResponse::BadRequest().json(json!({
            "error": "TOO_MANY_EMAILS",
            "message": format!("At most {MAX_BULK_EMAILS} addresses can be validated at once")
        }));
    }

    let validations = req
        .emails
        .iter()
        .map(|email| validate_single_email(&validator, email));
    let results = join_all(validations).await;

    HttpResponse::Ok().json(BulkEmailValidationResponse::from_results(results))
}

/// Configures email validation routes under /api/v1
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(validate_email).service(validate_emails_bulk);
}
