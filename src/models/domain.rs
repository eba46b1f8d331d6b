use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Deserialize, Serialize, ToSchema)]
pub struct CustomDomainRequest {
    pub domain: String,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, ToSchema)]
pub struct CustomDomainResponse {
    /// The domain as stored: lowercase, ASCII-compatible encoding.
    pub domain: String,
    /// False if the domain was already registered.
    pub added: bool,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, ToSchema)]
pub struct CustomDomainsResponse {
    pub domains: Vec<String>,
}
