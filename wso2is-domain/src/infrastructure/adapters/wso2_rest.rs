use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::application::ports::repository::*;
use crate::domain::{entities::*, errors::*};

/// Identity server REST API adapter implementing the repository port
pub struct Wso2RestAdapter {
    endpoints: TenantEndpoints,
    client: reqwest::Client,
}

impl Wso2RestAdapter {
    pub fn new(endpoints: TenantEndpoints) -> Self {
        Self::new_with_client(endpoints, reqwest::Client::new())
    }

    pub fn new_with_client(endpoints: TenantEndpoints, client: reqwest::Client) -> Self {
        Self { endpoints, client }
    }

    async fn read_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        response: reqwest::Response,
    ) -> Result<T, RepositoryError> {
        let status = response.status();
        if status == StatusCode::CONFLICT {
            let message = response.text().await.unwrap_or_default();
            return Err(RepositoryError::Conflict {
                endpoint: endpoint.to_string(),
                message,
            });
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(RepositoryError::RequestFailed {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| RepositoryError::SerializationFailed {
                message: format!("Invalid response from {endpoint}: {e}"),
            })
    }
}

fn send_error(endpoint: &str, err: reqwest::Error) -> RepositoryError {
    if err.is_timeout() {
        RepositoryError::Timeout {
            endpoint: endpoint.to_string(),
        }
    } else {
        RepositoryError::ConnectionFailed {
            message: format!("Request to {endpoint} failed: {err}"),
        }
    }
}

#[async_trait]
impl IdentityServerRepository for Wso2RestAdapter {
    // Identity provider operations
    async fn create_identity_provider(
        &self,
        payload: &ProviderPayload,
        bearer: &str,
    ) -> DomainResult<IdentityProviderSummary> {
        let url = self.endpoints.identity_providers_url();
        debug!("Creating identity provider '{}'", payload.name());

        let response = self
            .client
            .post(&url)
            .bearer_auth(bearer)
            .json(payload)
            .send()
            .await
            .map_err(|e| send_error(&url, e))?;

        let created: IdentityProviderSummary = self.read_json(&url, response).await?;
        info!("Identity provider '{}' created with id {}", created.name, created.id);
        Ok(created)
    }

    async fn list_identity_providers(
        &self,
        bearer: &str,
    ) -> DomainResult<Vec<IdentityProviderSummary>> {
        let url = self.endpoints.identity_providers_url();

        let response = self
            .client
            .get(&url)
            .bearer_auth(bearer)
            .send()
            .await
            .map_err(|e| send_error(&url, e))?;

        let list: IdentityProviderList = self.read_json(&url, response).await?;
        Ok(list.identity_providers)
    }

    // User operations
    async fn list_users(&self, scope: UserScope, bearer: &str) -> DomainResult<Vec<ScimUser>> {
        let url = match scope {
            UserScope::Tenant => self.endpoints.scim_users_url(),
            UserScope::Organization => self.endpoints.organization_scim_users_url(),
        };

        let response = self
            .client
            .get(&url)
            .bearer_auth(bearer)
            .header(reqwest::header::ACCEPT, "application/scim+json")
            .send()
            .await
            .map_err(|e| send_error(&url, e))?;

        let list: ScimListResponse = self.read_json(&url, response).await?;
        debug!(
            "SCIM returned {} of {} users",
            list.resources.len(),
            list.total_results
        );
        Ok(list.resources)
    }
}
