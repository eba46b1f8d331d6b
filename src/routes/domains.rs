use crate::models::domain::{CustomDomainRequest, CustomDomainResponse, CustomDomainsResponse};
use crate::validation::domain::normalize_domain;
use crate::validation::validator::DomainValidator;
use actix_web::{HttpResponse, Responder, get, post, web};
use serde_json::json;

/// Registers a custom domain that is accepted without a DNS lookup.
///
/// The domain is visible to every validation immediately and stays
/// registered for the lifetime of the process.
#[utoipa::path(
    post,
    path = "/api/v1/custom-domains",
    request_body = CustomDomainRequest,
    responses(
        (status = 200, description = "Domain registered", body = CustomDomainResponse),
        (status = 400, description = "Not a valid domain name")
    ),
    tag = "Custom Domains"
)]
#[post("/custom-domains")]
pub async fn add_custom_domain(
    req: web::Json<CustomDomainRequest>,
    validator: web::Data<DomainValidator>,
) -> impl Responder {
    let Some(domain) = normalize_domain(req.domain.trim()) else {
        return HttpResponse::BadRequest().json(json!({
            "error": "INVALID_DOMAIN",
            "message": "The value is not a valid domain name"
        }));
    };

    let added = validator.registry().add_custom_domain(&domain);
    HttpResponse::Ok().json(CustomDomainResponse { domain, added })
}

/// Lists the custom domains in registration order.
#[utoipa::path(
    get,
    path = "/api/v1/custom-domains",
    responses(
        (status = 200, description = "Registered custom domains", body = CustomDomainsResponse)
    ),
    tag = "Custom Domains"
)]
#[get("/custom-domains")]
pub async fn list_custom_domains(validator: web::Data<DomainValidator>) -> impl Responder {
    HttpResponse::Ok().json(CustomDomainsResponse {
        domains: validator.registry().custom_domains(),
    })
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(add_custom_domain).service(list_custom_domains);
}
