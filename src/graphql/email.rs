use crate::models::email::{BulkEmailValidationResponse, EmailValidationResponse};
use crate::routes::email::{MAX_BULK_EMAILS, validate_single_email};
use crate::validation::domain::normalize_domain;
use crate::validation::validator::DomainValidator;
use async_graphql::{Context, Error, Object, Result, SimpleObject};
use futures::future::join_all;

/// Result of validating one address
#[derive(SimpleObject, Clone, Debug, PartialEq)]
pub struct EmailValidation {
    /// The validated address, trimmed
    pub email: String,
    /// VALID, NOT_REGISTERED, NO_MX_RECORD, TYPO_DETECTED, WRONG_SCHEMA or UNKNOWN
    pub status: String,
    pub is_valid: bool,
    /// Suggested domain for TYPO_DETECTED
    pub suggestion: Option<String>,
    /// Message a user would be shown, if any
    pub message: Option<String>,
}

impl From<EmailValidationResponse> for EmailValidation {
    fn from(response: EmailValidationResponse) -> Self {
        Self {
            email: response.email,
            status: response.status,
            is_valid: response.is_valid,
            suggestion: response.suggestion,
            message: response.message,
        }
    }
}

/// Results of a bulk validation
#[derive(SimpleObject)]
pub struct BulkEmailValidation {
    pub results: Vec<EmailValidation>,
    pub valid_count: i32,
    pub invalid_count: i32,
}

impl From<BulkEmailValidationResponse> for BulkEmailValidation {
    fn from(response: BulkEmailValidationResponse) -> Self {
        Self {
            results: response.results.into_iter().map(Into::into).collect(),
            valid_count: response.valid_count,
            invalid_count: response.invalid_count,
        }
    }
}

/// Outcome of registering a custom domain
#[derive(SimpleObject)]
pub struct CustomDomain {
    /// The domain as stored
    pub domain: String,
    /// False if it was already registered
    pub added: bool,
}

/// Email validation query operations
#[derive(Default)]
pub struct EmailQuery;

#[Object]
impl EmailQuery {
    async fn validate_email(&self, ctx: &Context<'_>, email: String) -> Result<EmailValidation> {
        let validator = ctx.data::<DomainValidator>()?;
        Ok(validate_single_email(validator, &email).await.into())
    }

    async fn validate_emails_bulk(
        &self,
        ctx: &Context<'_>,
        emails: Vec<String>,
    ) -> Result<BulkEmailValidation> {
        if emails.len() > MAX_BULK_EMAILS {
            return Err(Error::new(format!(
                "At most {MAX_BULK_EMAILS} addresses can be validated at once"
            )));
        }

        let validator = ctx.data::<DomainValidator>()?;
        let results = join_all(emails.iter().map(|email| validate_single_email(validator, email))).await;
        Ok(BulkEmailValidationResponse::from_results(results).into())
    }

    /// True if the domain is accepted without a DNS lookup
    async fn is_well_known(&self, ctx: &Context<'_>, domain: String) -> Result<bool> {
        let validator = ctx.data::<DomainValidator>()?;
        Ok(normalize_domain(domain.trim())
            .is_some_and(|domain| validator.registry().is_well_known(&domain)))
    }

    /// Known domain one typo away from `domain`, if any.
    /// Null when `domain` is itself registered.
    async fn suggest_domain(&self, ctx: &Context<'_>, domain: String) -> Result<Option<String>> {
        let validator = ctx.data::<DomainValidator>()?;
        Ok(normalize_domain(domain.trim())
            .filter(|domain| !validator.registry().is_well_known(domain))
            .and_then(|domain| validator.typo_detector().suggest(&domain)))
    }
}

/// Custom domain mutations
#[derive(Default)]
pub struct DomainMutation;

#[Object]
impl DomainMutation {
    /// Registers a domain that is accepted without a DNS lookup
    async fn add_custom_domain(&self, ctx: &Context<'_>, domain: String) -> Result<CustomDomain> {
        let validator = ctx.data::<DomainValidator>()?;
        let domain = normalize_domain(domain.trim())
            .ok_or_else(|| Error::new("The value is not a valid domain name"))?;
        let added = validator.registry().add_custom_domain(&domain);
        Ok(CustomDomain { domain, added })
    }
}
