use actix_web::{App, HttpServer, web::Data};
use email_doh_validator::config::Config;
use email_doh_validator::dns::{DohResolver, MxResolver, SystemIpv6};
use email_doh_validator::graphql::schema::create_schema;
use email_doh_validator::openapi::ApiDoc;
use email_doh_validator::telemetry;
use email_doh_validator::validation::{DomainRegistry, DomainValidator};
use std::io;
use std::sync::Arc;
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Email DoH Validator Service Entry Point
///
/// Configures and launches the Actix-web HTTP server with:
/// - REST and GraphQL email validation backed by DNS-over-HTTPS MX lookups
/// - Swagger UI for API documentation
/// - Environment configuration via `.env` file
///
/// # Endpoints
/// - REST and GraphQL: `/api/v1/...` (configured in routes)
/// - Swagger UI: `/swagger-ui/`
/// - OpenAPI spec: `/api-docs/openapi.json`
///
/// # Configuration
/// - Server binds to `HOST:PORT`, `127.0.0.1:8080` by default
/// - Resolvers, timeouts and custom domains come from `DOH_*` and
///   `CUSTOM_DOMAINS` variables
#[actix_web::main]
async fn main() -> io::Result<()> {
    let config = Config::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    telemetry::init();

    let registry = DomainRegistry::shared();
    for domain in &config.custom_domains {
        registry.add_custom_domain(domain);
    }

    let client = DohResolver::http_client(Some(config.doh_timeout)).map_err(io::Error::other)?;
    let doh = DohResolver::new(client, config.resolver_pool(), Arc::new(SystemIpv6));
    let validator = DomainValidator::new(Arc::new(MxResolver::new(doh)), registry);
    let schema = create_schema(validator.clone());

    info!(
        host = %config.host,
        port = config.port,
        custom_domains = config.custom_domains.len(),
        "Starting email validation service"
    );

    HttpServer::new(move || {
        let openapi = ApiDoc::openapi();

        App::new()
            .app_data(Data::new(openapi.clone()))
            .app_data(Data::new(validator.clone()))
            .app_data(Data::new(schema.clone()))
            .configure(email_doh_validator::routes::configure)
            .service(SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
