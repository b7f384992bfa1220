#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use wso2is_domain::{
    application::ports::{
        auth::{OAuthProvider, OrganizationSwitcher, ProviderMetadata, UserProfile},
        repository::{IdentityServerRepository, UserScope},
    },
    domain::{
        entities::*,
        errors::{AuthError, DomainError, DomainResult},
    },
};

/// Mock identity server recording every call it receives
pub struct MockIdentityServerRepository {
    pub providers: Arc<Mutex<Vec<IdentityProviderSummary>>>,
    pub created_payloads: Arc<Mutex<Vec<ProviderPayload>>>,
    pub tenant_users: Arc<Mutex<Vec<ScimUser>>>,
    pub organization_users: Arc<Mutex<Vec<ScimUser>>>,
    pub bearers: Arc<Mutex<Vec<String>>>,
    pub user_scopes: Arc<Mutex<Vec<UserScope>>>,
    pub provider_counter: Arc<Mutex<u32>>,
    pub should_fail: Arc<Mutex<bool>>, // For testing error scenarios
}

impl MockIdentityServerRepository {
    pub fn new() -> Self {
        Self {
            providers: Arc::new(Mutex::new(Vec::new())),
            created_payloads: Arc::new(Mutex::new(Vec::new())),
            tenant_users: Arc::new(Mutex::new(Vec::new())),
            organization_users: Arc::new(Mutex::new(Vec::new())),
            bearers: Arc::new(Mutex::new(Vec::new())),
            user_scopes: Arc::new(Mutex::new(Vec::new())),
            provider_counter: Arc::new(Mutex::new(0)),
            should_fail: Arc::new(Mutex::new(false)),
        }
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        *self.should_fail.lock().unwrap() = should_fail;
    }

    pub fn add_tenant_user(&self, user: ScimUser) {
        self.tenant_users.lock().unwrap().push(user);
    }

    pub fn add_organization_user(&self, user: ScimUser) {
        self.organization_users.lock().unwrap().push(user);
    }

    pub fn last_bearer(&self) -> Option<String> {
        self.bearers.lock().unwrap().last().cloned()
    }

    fn check_should_fail(&self) -> DomainResult<()> {
        if *self.should_fail.lock().unwrap() {
            Err(DomainError::ExternalService {
                service: "mock-wso2is".to_string(),
                message: "Mock failure enabled".to_string(),
            })
        } else {
            Ok(())
        }
    }

    fn record_bearer(&self, bearer: &str) {
        self.bearers.lock().unwrap().push(bearer.to_string());
    }

    fn generate_provider_id(&self) -> String {
        let mut counter = self.provider_counter.lock().unwrap();
        *counter += 1;
        format!("idp-{}", counter)
    }
}

#[async_trait]
impl IdentityServerRepository for MockIdentityServerRepository {
    async fn create_identity_provider(
        &self,
        payload: &ProviderPayload,
        bearer: &str,
    ) -> DomainResult<IdentityProviderSummary> {
        self.check_should_fail()?;
        self.record_bearer(bearer);

        let mut providers = self.providers.lock().unwrap();
        if providers.iter().any(|p| p.name == payload.name()) {
            return Err(DomainError::AlreadyExists {
                entity_type: "Identity provider".to_string(),
                identifier: payload.name().to_string(),
            });
        }

        let summary = IdentityProviderSummary {
            id: self.generate_provider_id(),
            name: payload.name().to_string(),
            description: None,
            is_enabled: payload
                .model()
                .first_authenticator()
                .map(|a| a.is_enabled)
                .unwrap_or(false),
            image: None,
        };

        providers.push(summary.clone());
        self.created_payloads.lock().unwrap().push(payload.clone());
        Ok(summary)
    }

    async fn list_identity_providers(
        &self,
        bearer: &str,
    ) -> DomainResult<Vec<IdentityProviderSummary>> {
        self.check_should_fail()?;
        self.record_bearer(bearer);
        Ok(self.providers.lock().unwrap().clone())
    }

    async fn list_users(&self, scope: UserScope, bearer: &str) -> DomainResult<Vec<ScimUser>> {
        self.check_should_fail()?;
        self.record_bearer(bearer);
        self.user_scopes.lock().unwrap().push(scope);

        let users = match scope {
            UserScope::Tenant => self.tenant_users.lock().unwrap().clone(),
            UserScope::Organization => self.organization_users.lock().unwrap().clone(),
        };
        Ok(users)
    }
}

/// Mock organization switcher replaying scripted failures before succeeding
pub struct MockOrganizationSwitcher {
    pub organization_id: String,
    pub calls: Arc<Mutex<Vec<String>>>,
    pub failures: Arc<Mutex<VecDeque<AuthError>>>,
}

impl MockOrganizationSwitcher {
    pub fn new(organization_id: &str) -> Self {
        Self {
            organization_id: organization_id.to_string(),
            calls: Arc::new(Mutex::new(Vec::new())),
            failures: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    /// Queue an error returned by the next call
    pub fn fail_next(&self, error: AuthError) {
        self.failures.lock().unwrap().push_back(error);
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn received_tokens(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl OrganizationSwitcher for MockOrganizationSwitcher {
    async fn switch_organization(
        &self,
        access_token: &str,
    ) -> Result<OrganizationToken, AuthError> {
        self.calls.lock().unwrap().push(access_token.to_string());

        if let Some(error) = self.failures.lock().unwrap().pop_front() {
            return Err(error);
        }

        Ok(OrganizationToken::new(
            self.organization_id.clone(),
            format!("org-{}", access_token),
            3600,
            Some("internal_login".to_string()),
        ))
    }
}

/// Mock OAuth provider issuing a fixed account for any code
pub struct MockOAuthProvider {
    pub account: OAuthAccount,
    pub exchanged_codes: Arc<Mutex<Vec<String>>>,
    pub reject_codes: Arc<Mutex<bool>>,
}

impl MockOAuthProvider {
    pub fn new() -> Self {
        Self {
            account: OAuthAccount {
                access_token: "access-token".to_string(),
                id_token: Some("id-token".to_string()),
                scope: Some("openid internal_login".to_string()),
                refresh_token: None,
                expires_in: Some(3600),
                token_type: "Bearer".to_string(),
            },
            exchanged_codes: Arc::new(Mutex::new(Vec::new())),
            reject_codes: Arc::new(Mutex::new(false)),
        }
    }

    pub fn set_reject_codes(&self, reject: bool) {
        *self.reject_codes.lock().unwrap() = reject;
    }
}

#[async_trait]
impl OAuthProvider for MockOAuthProvider {
    async fn metadata(&self) -> Result<ProviderMetadata, AuthError> {
        Ok(ProviderMetadata {
            issuer: Some("https://is.example.com/oauth2/token".to_string()),
            authorization_endpoint: "https://is.example.com/oauth2/authorize".to_string(),
            token_endpoint: "https://is.example.com/oauth2/token".to_string(),
            userinfo_endpoint: None,
            end_session_endpoint: None,
        })
    }

    async fn authorization_url(&self, state: &str) -> Result<String, AuthError> {
        let metadata = self.metadata().await?;
        Ok(format!(
            "{}?response_type=code&client_id=console&state={}",
            metadata.authorization_endpoint, state
        ))
    }

    async fn exchange_code(&self, code: &str) -> Result<OAuthAccount, AuthError> {
        if *self.reject_codes.lock().unwrap() {
            return Err(AuthError::TokenAcquisitionFailed {
                reason: "invalid_grant".to_string(),
            });
        }
        self.exchanged_codes.lock().unwrap().push(code.to_string());
        Ok(self.account.clone())
    }

    async fn user_info(&self, _access_token: &str) -> Result<UserProfile, AuthError> {
        Ok(UserProfile {
            id: "user-1".to_string(),
            user_name: Some("admin".to_string()),
        })
    }
}

/// SCIM user fixture
pub fn scim_user(id: &str, user_name: &str, given: &str, family: &str, email: &str) -> ScimUser {
    ScimUser {
        id: id.to_string(),
        user_name: user_name.to_string(),
        name: Some(ScimName {
            given_name: Some(given.to_string()),
            family_name: Some(family.to_string()),
            formatted: None,
        }),
        emails: vec![ScimEmail::Plain(email.to_string())],
    }
}

pub fn token_record(access_token: &str) -> TokenRecord {
    TokenRecord {
        access_token: access_token.to_string(),
        id_token: Some("id-token".to_string()),
        scope: Some("openid internal_login".to_string()),
    }
}
