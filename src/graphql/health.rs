use crate::models::health::HealthResponse;
use crate::validation::registry::WELL_KNOWN_DOMAINS;
use crate::validation::validator::DomainValidator;
use async_graphql::{Context, Object, SimpleObject};

/// Service health plus the size of the domain registry it validates against
#[derive(SimpleObject, Debug)]
pub struct Health {
    /// "UP" while the service answers queries
    pub status: String,
    /// RFC 3339 time of the check
    pub timestamp: String,
    pub well_known_domains: i32,
    /// Domains registered at startup or through `addCustomDomain`
    pub custom_domains: i32,
}

#[derive(Default)]
pub struct HealthQuery;

#[Object]
impl HealthQuery {
    async fn health(&self, ctx: &Context<'_>) -> Health {
        let HealthResponse { status, timestamp } = HealthResponse::up();
        let custom_domains = ctx
            .data_opt::<DomainValidator>()
            .map_or(0, |validator| validator.registry().custom_domains().len());

        Health {
            status,
            timestamp,
            well_known_domains: WELL_KNOWN_DOMAINS.len() as i32,
            custom_domains: custom_domains as i32,
        }
    }
}
