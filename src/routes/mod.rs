use actix_web::web;

/// # Health Check Endpoint
///
/// Returns the current health status of the service along with a timestamp.
///
/// ## Response
///
/// - **200 OK**: Service is healthy
///   - Body: JSON object with `status` ("UP") and `timestamp` in ISO 8601 format
///
/// ## Example Response
///
/// ```json
/// {
///   "status": "UP",
///   "timestamp": "2023-10-05T12:34:56.789Z"
/// }
/// ```
pub mod health;

/// # Email Validation Endpoints
///
/// Validates the domain of one address, or of a batch of addresses:
/// 1. Built-in and custom domains are accepted without a lookup
/// 2. Other domains are resolved over DNS-over-HTTPS for MX records
/// 3. Unknown domains and domains without mail servers get a suggested
///    correction when a known domain is one typo away
///
/// ## Request
/// - Method: POST
/// - Body: JSON object with `email` field (or `emails` for the bulk variant)
///
/// ## Responses
/// - **200 OK**: Validation result with a status code such as `VALID`,
///   `TYPO_DETECTED` or `UNKNOWN`
/// - **400 Bad Request**: Body is not valid JSON or the batch is too large
///
/// ## Example Request
/// ```json
/// { "email": "user@example.com" }
/// ```
pub mod email;

/// # Custom Domain Endpoints
///
/// Lists and extends the domains accepted without a DNS lookup.
pub mod domains;

/// # GraphQL Endpoints
///
/// The GraphQL API and its playground.
pub mod graphql;

/// # API Route Configuration
///
/// Sets up versioned API endpoints under the `/api/v1` base path.
///
/// ## Mounted Services
/// - Health check endpoints (see [`health::configure_routes`] for details)
/// - Email validation endpoints (see [`email::configure_routes`] for details)
/// - Custom domain endpoints (see [`domains::configure_routes`] for details)
/// - GraphQL endpoints (see [`graphql::configure_routes`] for details)
///
/// ## Example Endpoints
///
/// ```text
/// GET  /api/v1/health               - Service health status
/// POST /api/v1/validate-email       - Email validation endpoint
/// POST /api/v1/validate-emails-bulk - Bulk email validation endpoint
/// GET  /api/v1/custom-domains       - Registered custom domains
/// POST /api/v1/custom-domains       - Register a custom domain
/// POST /api/v1/graphql              - GraphQL endpoint
/// GET  /api/v1/playground           - GraphQL playground
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(health::configure_routes)
            .configure(email::configure_routes)
            .configure(domains::configure_routes)
            .configure(graphql::configure_routes),
    );
}
