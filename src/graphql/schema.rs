use super::email::{DomainMutation, EmailQuery};
use super::health::HealthQuery;
use crate::validation::validator::DomainValidator;
use async_graphql::{EmptySubscription, MergedObject, Schema};

/// Root query type: health plus email validation queries.
#[derive(MergedObject, Default)]
pub struct QueryRoot(HealthQuery, EmailQuery);

/// Root mutation type.
#[derive(MergedObject, Default)]
pub struct MutationRoot(DomainMutation);

/// Main GraphQL Schema Definition
///
/// Combines the merged query and mutation roots. Subscriptions are not used.
pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Creates the GraphQL schema.
///
/// The validator is stored as schema data and shared by all resolvers, so
/// custom domains added through the API are visible to every query.
///
/// # Example
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use email_doh_validator::dns::{DohResolver, MxResolver};
/// use email_doh_validator::graphql::schema::create_schema;
/// use email_doh_validator::validation::{DomainRegistry, DomainValidator};
///
/// let lookup = Arc::new(MxResolver::new(DohResolver::with_defaults(None).unwrap()));
/// let schema = create_schema(DomainValidator::new(lookup, DomainRegistry::shared()));
/// ```
pub fn create_schema(validator: DomainValidator) -> AppSchema {
    Schema::build(
        QueryRoot::default(),
        MutationRoot::default(),
        EmptySubscription,
    )
    .data(validator)
    .finish()
}
