use crate::domain::{entities::*, errors::DomainResult};
use async_trait::async_trait;

/// Which user store a listing reads from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserScope {
    /// Users of the root tenant
    Tenant,
    /// Users of the organization the bearer token was switched into
    Organization,
}

/// Identity server management API
///
/// Every call is made on behalf of the signed-in user; the bearer token is
/// passed explicitly.
#[async_trait]
pub trait IdentityServerRepository: Send + Sync {
    // Identity provider operations
    async fn create_identity_provider(
        &self,
        payload: &ProviderPayload,
        bearer: &str,
    ) -> DomainResult<IdentityProviderSummary>;

    async fn list_identity_providers(
        &self,
        bearer: &str,
    ) -> DomainResult<Vec<IdentityProviderSummary>>;

    // User operations
    async fn list_users(&self, scope: UserScope, bearer: &str) -> DomainResult<Vec<ScimUser>>;
}
