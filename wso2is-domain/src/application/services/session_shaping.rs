use crate::{
    application::{
        ports::*,
        services::retry::{retry, RetryPolicy},
    },
    domain::{
        entities::*,
        errors::{DomainError, DomainResult},
    },
};
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

/// Shapes stored token state and the per-request session view
///
/// Token materialization runs when a sign-in completes or a stored record is
/// refreshed. Session materialization runs on every authenticated request and
/// re-scopes the access token into the configured organization.
pub struct SessionShapingService {
    switcher: Arc<dyn OrganizationSwitcher>,
    retry_policy: RetryPolicy,
    organization_id: String,
}

impl SessionShapingService {
    pub fn new(
        switcher: Arc<dyn OrganizationSwitcher>,
        retry_policy: RetryPolicy,
        organization_id: impl Into<String>,
    ) -> Self {
        Self {
            switcher,
            retry_policy,
            organization_id: organization_id.into(),
        }
    }

    /// Produce the token record to persist
    ///
    /// A fresh account overwrites the previous record; without one the
    /// previous record passes through unchanged.
    pub fn materialize_token(
        &self,
        previous: Option<TokenRecord>,
        account: Option<&OAuthAccount>,
    ) -> DomainResult<TokenRecord> {
        match (account, previous) {
            (Some(account), _) => {
                debug!("Materializing token record from new account");
                Ok(TokenRecord::from(account))
            }
            (None, Some(previous)) => Ok(previous),
            (None, None) => Err(DomainError::AuthenticationFailed {
                reason: "No account or stored token to build a session from".to_string(),
            }),
        }
    }

    /// Build the immutable session snapshot for one request
    #[instrument(skip(self, record), fields(organization = %self.organization_id))]
    pub async fn materialize_session(&self, record: &TokenRecord) -> DomainResult<Session> {
        let session = Session::from_record(record);

        let token = retry(&self.retry_policy, || {
            self.switcher.switch_organization(&record.access_token)
        })
        .await
        .map_err(|e| {
            error!("Organization switch failed: {}", e);
            DomainError::OrganizationSwitchFailed {
                organization: self.organization_id.clone(),
                reason: e.to_string(),
            }
        })?;

        info!("Session scoped to organization '{}'", token.organization_id);
        Ok(session.with_organization(token))
    }
}
