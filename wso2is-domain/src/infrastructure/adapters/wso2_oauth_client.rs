use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::application::ports::auth::*;
use crate::application::ports::config::Wso2Config;
use crate::domain::entities::{OAuthAccount, OrganizationToken, TenantEndpoints};
use crate::domain::errors::*;

const ORGANIZATION_SWITCH_GRANT: &str = "organization_switch";
const DEFAULT_EXPIRES_IN: i64 = 3600;

/// Raw token response of the organization switch grant
#[derive(Debug, Clone, Deserialize)]
struct RawTokenResponse {
    access_token: String,
    expires_in: Option<i64>,
    scope: Option<String>,
}

/// OAuth client for the identity server: sign-in, profile and
/// organization switch
pub struct Wso2OAuthClient {
    config: Wso2Config,
    endpoints: TenantEndpoints,
    client: reqwest::Client,
    metadata: RwLock<Option<ProviderMetadata>>,
}

impl Wso2OAuthClient {
    pub fn new(config: Wso2Config) -> Self {
        Self::new_with_client(config, reqwest::Client::new())
    }

    pub fn new_with_client(config: Wso2Config, client: reqwest::Client) -> Self {
        let endpoints = config.endpoints();
        Self {
            config,
            endpoints,
            client,
            metadata: RwLock::new(None),
        }
    }

    /// Conventional endpoint layout, used when discovery is unreachable
    fn fallback_metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            issuer: None,
            authorization_endpoint: self.endpoints.authorize_url(),
            token_endpoint: self.endpoints.token_url(),
            userinfo_endpoint: Some(self.endpoints.userinfo_url()),
            end_session_endpoint: None,
        }
    }

    async fn discover(&self) -> Result<ProviderMetadata, AuthError> {
        let url = self.endpoints.well_known_url();
        debug!("Fetching discovery document from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AuthError::DiscoveryFailed {
                reason: format!("HTTP request failed: {e}"),
            })?;

        if !response.status().is_success() {
            return Err(AuthError::DiscoveryFailed {
                reason: format!("HTTP error: {}", response.status()),
            });
        }

        response
            .json::<ProviderMetadata>()
            .await
            .map_err(|e| AuthError::DiscoveryFailed {
                reason: format!("Failed to parse discovery document: {e}"),
            })
    }
}

#[async_trait]
impl OAuthProvider for Wso2OAuthClient {
    async fn metadata(&self) -> Result<ProviderMetadata, AuthError> {
        if let Some(metadata) = self.metadata.read().await.as_ref() {
            return Ok(metadata.clone());
        }

        match self.discover().await {
            Ok(metadata) => {
                info!("Discovered {} endpoints", PROVIDER_ID);
                *self.metadata.write().await = Some(metadata.clone());
                Ok(metadata)
            }
            Err(e) => {
                warn!("Discovery failed, using default endpoints: {}", e);
                Ok(self.fallback_metadata())
            }
        }
    }

    async fn authorization_url(&self, state: &str) -> Result<String, AuthError> {
        let metadata = self.metadata().await?;

        let url = url::Url::parse_with_params(
            &metadata.authorization_endpoint,
            &[
                ("response_type", "code"),
                ("client_id", self.config.client_id.as_str()),
                ("redirect_uri", self.config.redirect_uri.as_str()),
                ("scope", self.config.scopes.as_str()),
                ("state", state),
            ],
        )
        .map_err(|e| AuthError::DiscoveryFailed {
            reason: format!("Invalid authorization endpoint: {e}"),
        })?;

        Ok(url.into())
    }

    async fn exchange_code(&self, code: &str) -> Result<OAuthAccount, AuthError> {
        let metadata = self.metadata().await?;

        let response = self
            .client
            .post(&metadata.token_endpoint)
            .basic_auth(&self.config.client_id, Some(&self.config.client_secret))
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", self.config.redirect_uri.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AuthError::TokenAcquisitionFailed {
                reason: format!("HTTP request failed: {e}"),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AuthError::TokenAcquisitionFailed {
                reason: format!("HTTP error {status}: {error_text}"),
            });
        }

        response
            .json::<OAuthAccount>()
            .await
            .map_err(|e| AuthError::TokenAcquisitionFailed {
                reason: format!("Failed to parse token response: {e}"),
            })
    }

    async fn user_info(&self, access_token: &str) -> Result<UserProfile, AuthError> {
        let response = self
            .client
            .get(self.endpoints.userinfo_url())
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AuthError::UserInfoFailed {
                reason: format!("HTTP request failed: {e}"),
            })?;

        if !response.status().is_success() {
            return Err(AuthError::UserInfoFailed {
                reason: format!("HTTP error: {}", response.status()),
            });
        }

        let profile: serde_json::Value =
            response.json().await.map_err(|e| AuthError::UserInfoFailed {
                reason: format!("Failed to parse response: {e}"),
            })?;

        let id = ["sub", "id"]
            .iter()
            .find_map(|key| profile.get(*key).and_then(|v| v.as_str()))
            .ok_or_else(|| AuthError::UserInfoFailed {
                reason: "Profile has neither 'sub' nor 'id'".to_string(),
            })?;

        Ok(UserProfile {
            id: id.to_string(),
            user_name: ["userName", "username"]
                .iter()
                .find_map(|key| profile.get(*key).and_then(|v| v.as_str()))
                .map(|s| s.to_string()),
        })
    }
}

#[async_trait]
impl OrganizationSwitcher for Wso2OAuthClient {
    async fn switch_organization(
        &self,
        access_token: &str,
    ) -> Result<OrganizationToken, AuthError> {
        let metadata = self.metadata().await?;
        let organization = self.config.organization_id.as_str();

        let response = self
            .client
            .post(&metadata.token_endpoint)
            .basic_auth(&self.config.client_id, Some(&self.config.client_secret))
            .form(&[
                ("grant_type", ORGANIZATION_SWITCH_GRANT),
                ("token", access_token),
                ("scope", self.config.scopes.as_str()),
                ("switching_organization", organization),
            ])
            .send()
            .await
            .map_err(|e| AuthError::SwitchUnavailable {
                reason: format!("HTTP request failed: {e}"),
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AuthError::SwitchRejected {
                status,
                reason: error_text,
            });
        }

        let raw_token: RawTokenResponse =
            response
                .json()
                .await
                .map_err(|e| AuthError::TokenAcquisitionFailed {
                    reason: format!("Failed to parse organization token: {e}"),
                })?;

        debug!("Switched access token into organization {}", organization);

        Ok(OrganizationToken::new(
            organization.to_string(),
            raw_token.access_token,
            raw_token.expires_in.unwrap_or(DEFAULT_EXPIRES_IN),
            raw_token.scope,
        ))
    }
}
