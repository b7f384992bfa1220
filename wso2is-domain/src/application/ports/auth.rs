use crate::domain::entities::{OAuthAccount, OrganizationToken};
use crate::domain::errors::AuthError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Identifier under which the identity server is registered as OAuth provider
pub const PROVIDER_ID: &str = "wso2is";

/// Endpoints published by the identity server's discovery document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderMetadata {
    pub issuer: Option<String>,
    pub authorization_endpoint: String,
    pub token_endpoint: String,
    #[serde(default)]
    pub userinfo_endpoint: Option<String>,
    #[serde(default)]
    pub end_session_endpoint: Option<String>,
}

/// Profile of the signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub user_name: Option<String>,
}

/// OAuth 2.0 / OIDC authorization code flow against the identity server
#[async_trait]
pub trait OAuthProvider: Send + Sync {
    /// Resolve provider endpoints (discovery)
    async fn metadata(&self) -> Result<ProviderMetadata, AuthError>;

    /// URL the browser is sent to for sign-in
    async fn authorization_url(&self, state: &str) -> Result<String, AuthError>;

    /// Exchange an authorization code for the account tokens
    async fn exchange_code(&self, code: &str) -> Result<OAuthAccount, AuthError>;

    /// Fetch the profile behind an access token
    async fn user_info(&self, access_token: &str) -> Result<UserProfile, AuthError>;
}

/// Re-scopes an access token to the configured organization
#[async_trait]
pub trait OrganizationSwitcher: Send + Sync {
    async fn switch_organization(&self, access_token: &str)
        -> Result<OrganizationToken, AuthError>;
}
