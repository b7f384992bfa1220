#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use wso2is_domain::{
    AuthError, DomainResult, IdentityProviderSummary, IdentityServerRepository, OAuthAccount,
    OAuthProvider, OrganizationSwitcher, OrganizationToken, ProviderMetadata, ProviderPayload,
    ScimEmail, ScimName, ScimUser, UserProfile, UserScope,
};

/// Mock identity server keeping created providers in memory
pub struct MockIdentityServerRepository {
    pub providers: Arc<Mutex<Vec<IdentityProviderSummary>>>,
    pub users: Arc<Mutex<Vec<ScimUser>>>,
    pub user_scopes: Arc<Mutex<Vec<UserScope>>>,
}

impl MockIdentityServerRepository {
    pub fn new() -> Self {
        Self {
            providers: Arc::new(Mutex::new(Vec::new())),
            users: Arc::new(Mutex::new(vec![ScimUser {
                id: "u-1".to_string(),
                user_name: "alice".to_string(),
                name: Some(ScimName {
                    given_name: Some("Alice".to_string()),
                    family_name: Some("Smith".to_string()),
                    formatted: None,
                }),
                emails: vec![ScimEmail::Typed {
                    value: "alice@example.com".to_string(),
                    primary: true,
                }],
            }])),
            user_scopes: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[async_trait]
impl IdentityServerRepository for MockIdentityServerRepository {
    async fn create_identity_provider(
        &self,
        payload: &ProviderPayload,
        _bearer: &str,
    ) -> DomainResult<IdentityProviderSummary> {
        let mut providers = self.providers.lock().unwrap();
        let summary = IdentityProviderSummary {
            id: format!("idp-{}", providers.len() + 1),
            name: payload.name().to_string(),
            description: None,
            is_enabled: true,
            image: None,
        };
        providers.push(summary.clone());
        Ok(summary)
    }

    async fn list_identity_providers(
        &self,
        _bearer: &str,
    ) -> DomainResult<Vec<IdentityProviderSummary>> {
        Ok(self.providers.lock().unwrap().clone())
    }

    async fn list_users(&self, scope: UserScope, _bearer: &str) -> DomainResult<Vec<ScimUser>> {
        self.user_scopes.lock().unwrap().push(scope);
        Ok(self.users.lock().unwrap().clone())
    }
}

/// Mock OAuth provider; the switch can be told to reject
pub struct MockWso2 {
    pub switch_calls: Arc<Mutex<Vec<String>>>,
    pub reject_switch: Arc<Mutex<bool>>,
}

impl MockWso2 {
    pub fn new() -> Self {
        Self {
            switch_calls: Arc::new(Mutex::new(Vec::new())),
            reject_switch: Arc::new(Mutex::new(false)),
        }
    }

    pub fn set_reject_switch(&self, reject: bool) {
        *self.reject_switch.lock().unwrap() = reject;
    }

    pub fn switch_count(&self) -> usize {
        self.switch_calls.lock().unwrap().len()
    }
}

#[async_trait]
impl OAuthProvider for MockWso2 {
    async fn metadata(&self) -> Result<ProviderMetadata, AuthError> {
        Ok(ProviderMetadata {
            issuer: None,
            authorization_endpoint: "https://is.example.com/oauth2/authorize".to_string(),
            token_endpoint: "https://is.example.com/oauth2/token".to_string(),
            userinfo_endpoint: None,
            end_session_endpoint: None,
        })
    }

    async fn authorization_url(&self, state: &str) -> Result<String, AuthError> {
        Ok(format!(
            "https://is.example.com/oauth2/authorize?response_type=code&state={}",
            state
        ))
    }

    async fn exchange_code(&self, code: &str) -> Result<OAuthAccount, AuthError> {
        if code == "bad-code" {
            return Err(AuthError::TokenAcquisitionFailed {
                reason: "invalid_grant".to_string(),
            });
        }
        Ok(OAuthAccount {
            access_token: format!("token-for-{}", code),
            id_token: Some("id-token".to_string()),
            scope: Some("openid internal_login".to_string()),
            refresh_token: None,
            expires_in: Some(3600),
            token_type: "Bearer".to_string(),
        })
    }

    async fn user_info(&self, _access_token: &str) -> Result<UserProfile, AuthError> {
        Ok(UserProfile {
            id: "u-1".to_string(),
            user_name: Some("admin".to_string()),
        })
    }
}

#[async_trait]
impl OrganizationSwitcher for MockWso2 {
    async fn switch_organization(
        &self,
        access_token: &str,
    ) -> Result<OrganizationToken, AuthError> {
        self.switch_calls.lock().unwrap().push(access_token.to_string());

        if *self.reject_switch.lock().unwrap() {
            return Err(AuthError::SwitchRejected {
                status: 400,
                reason: "invalid_grant".to_string(),
            });
        }

        Ok(OrganizationToken::new(
            "org-1".to_string(),
            "org-token".to_string(),
            3600,
            None,
        ))
    }
}
