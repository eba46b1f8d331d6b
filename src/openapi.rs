use utoipa::OpenApi;

/// OpenAPI Specification Documentation
///
/// Defines the REST contract with utoipa procedural macros. GraphQL is
/// described by its own schema and only listed here as a tag.
///
/// # Endpoints
/// - Health Check: `GET /api/v1/health`
/// - Email Validation: `POST /api/v1/validate-email`, `POST /api/v1/validate-emails-bulk`
/// - Custom Domains: `GET /api/v1/custom-domains`, `POST /api/v1/custom-domains`
///
/// # Tags
/// 1. **Health Check**: Service monitoring endpoints
/// 2. **Email Validation**: Domain checks over DNS-over-HTTPS
/// 3. **Custom Domains**: Domains accepted without a lookup
/// 4. **GraphQL**: Unified query interface
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health::health,
        crate::routes::email::validate_email,
        crate::routes::email::validate_emails_bulk,
        crate::routes::domains::add_custom_domain,
        crate::routes::domains::list_custom_domains,
    ),
    components(
        schemas(
            crate::models::health::HealthResponse,
            crate::models::email::EmailRequest,
            crate::models::email::BulkEmailRequest,
            crate::models::email::EmailValidationResponse,
            crate::models::email::BulkEmailValidationResponse,
            crate::models::domain::CustomDomainRequest,
            crate::models::domain::CustomDomainResponse,
            crate::models::domain::CustomDomainsResponse,
        )
    ),
    tags(
        (name = "Health Check", description = "Service health monitoring endpoints"),
        (name = "Email Validation", description = "Email domain validation over DNS-over-HTTPS"),
        (name = "Custom Domains", description = "Domains trusted without a DNS lookup"),
        (name = "GraphQL", description = "GraphQL API for interacting with all service features")
    ),
    info(
        description = "Checks that the domain of an email address can receive mail, with typo suggestions",
        title = "Email DoH Validator API",
        version = "0.1.0",
    )
)]
pub struct ApiDoc;
