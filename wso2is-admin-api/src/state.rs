use crate::{config::Config, error::AppError, session_store::SessionStore};
use std::sync::Arc;
use wso2is_domain::{
    application::{
        ports::{IdentityServerRepository, OAuthProvider, OrganizationSwitcher},
        services::{
            AuthenticationService, IdentityProviderService, RetryPolicy, SessionShapingService,
            UserDirectoryService,
        },
    },
    domain::entities::TemplateCatalog,
    infrastructure::adapters::{Wso2OAuthClient, Wso2RestAdapter},
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub sessions: Arc<SessionStore>,
    // Domain services
    pub auth_service: Arc<AuthenticationService>,
    pub session_shaping: Arc<SessionShapingService>,
    pub identity_provider_service: Arc<IdentityProviderService>,
    pub user_directory: Arc<UserDirectoryService>,
}

impl AppState {
    /// Wire the identity server adapters from configuration
    pub fn new(config: Config) -> Result<Self, AppError> {
        let client = config.app.http.build_client()?;
        let endpoints = config.app.wso2.endpoints();

        let oauth_client = Arc::new(Wso2OAuthClient::new_with_client(
            config.app.wso2.clone(),
            client.clone(),
        ));
        let repository = Arc::new(Wso2RestAdapter::new_with_client(endpoints, client));
        let catalog = TemplateCatalog::builtin()?;

        Ok(Self::from_parts(
            config,
            oauth_client.clone(),
            oauth_client,
            repository,
            catalog,
        ))
    }

    /// Assemble the state from already-built ports
    pub fn from_parts(
        config: Config,
        provider: Arc<dyn OAuthProvider>,
        switcher: Arc<dyn OrganizationSwitcher>,
        repository: Arc<dyn IdentityServerRepository>,
        catalog: TemplateCatalog,
    ) -> Self {
        let session_shaping = Arc::new(SessionShapingService::new(
            switcher,
            RetryPolicy::from(&config.app.http),
            config.app.wso2.organization_id.clone(),
        ));
        let auth_service = Arc::new(AuthenticationService::new(
            provider,
            session_shaping.clone(),
        ));
        let identity_provider_service = Arc::new(IdentityProviderService::new(
            Arc::new(catalog),
            repository.clone(),
            config.app.wso2.endpoints(),
        ));
        let user_directory = Arc::new(UserDirectoryService::new(repository));
        let sessions = Arc::new(SessionStore::new(config.app.auth.get_session_ttl()));

        Self {
            config: Arc::new(config),
            sessions,
            auth_service,
            session_shaping,
            identity_provider_service,
            user_directory,
        }
    }
}
