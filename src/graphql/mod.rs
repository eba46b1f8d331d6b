/// Email validation queries and the custom domain mutation.
pub mod email;

/// Actix handlers for GraphQL requests and the playground page.
pub mod handlers;

/// Health check query.
pub mod health;

/// Schema assembly.
pub mod schema;
