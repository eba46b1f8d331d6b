use crate::graphql::handlers;
use actix_web::web;

/// GraphQL Route Configuration
///
/// Defines the GraphQL endpoint and its playground. Both handlers read the
/// schema from `web::Data<AppSchema>`, so the app must register the schema
/// built by `create_schema` before configuring these routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/graphql").route(web::post().to(handlers::graphql_handler)))
        .service(web::resource("/playground").route(web::get().to(handlers::graphql_playground)));
}
