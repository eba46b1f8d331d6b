pub mod config;
pub mod dns;
pub mod graphql;
pub mod models;
pub mod openapi;
pub mod pipeline;
pub mod routes;
pub mod telemetry;
pub mod validation;
