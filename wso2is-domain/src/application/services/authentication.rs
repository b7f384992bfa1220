use crate::{
    application::{ports::*, services::SessionShapingService},
    domain::{entities::*, errors::DomainResult},
};
use std::sync::Arc;
use tracing::{error, info, instrument};
use uuid::Uuid;

/// Authorization redirect handed to the browser
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignInRedirect {
    pub url: String,
    pub state: String,
}

/// Authentication service driving the authorization code flow
pub struct AuthenticationService {
    provider: Arc<dyn OAuthProvider>,
    session_shaping: Arc<SessionShapingService>,
}

impl AuthenticationService {
    pub fn new(
        provider: Arc<dyn OAuthProvider>,
        session_shaping: Arc<SessionShapingService>,
    ) -> Self {
        Self {
            provider,
            session_shaping,
        }
    }

    /// Start a sign-in with a fresh anti-forgery state
    #[instrument(skip(self))]
    pub async fn begin_sign_in(&self) -> DomainResult<SignInRedirect> {
        let state = Uuid::new_v4().simple().to_string();
        let url = self.provider.authorization_url(&state).await?;

        info!("Redirecting to {} for sign-in", PROVIDER_ID);
        Ok(SignInRedirect { url, state })
    }

    /// Exchange the authorization code and build the token record to store
    #[instrument(skip(self, code))]
    pub async fn complete_sign_in(&self, code: &str) -> DomainResult<TokenRecord> {
        let account = self.provider.exchange_code(code).await.map_err(|e| {
            error!("Code exchange failed: {}", e);
            e
        })?;

        let profile = self.provider.user_info(&account.access_token).await?;
        info!(
            "Signed in user '{}'",
            profile.user_name.as_deref().unwrap_or(&profile.id)
        );

        self.session_shaping.materialize_token(None, Some(&account))
    }
}
