use crate::{
    application::ports::*,
    domain::{entities::*, errors::DomainResult},
};
use std::sync::Arc;
use tracing::{info, instrument};

/// Read-only view over the SCIM user store
pub struct UserDirectoryService {
    repository: Arc<dyn IdentityServerRepository>,
}

impl UserDirectoryService {
    pub fn new(repository: Arc<dyn IdentityServerRepository>) -> Self {
        Self { repository }
    }

    /// List users as table rows
    ///
    /// Uses the organization listing when the session holds a live
    /// organization token, the tenant listing otherwise.
    #[instrument(skip(self, session))]
    pub async fn list_users(&self, session: &Session) -> DomainResult<Vec<UserSummary>> {
        let (scope, bearer) = match session.organization_access_token() {
            Some(token) => (UserScope::Organization, token),
            None => (UserScope::Tenant, session.access_token.as_str()),
        };

        let users = self.repository.list_users(scope, bearer).await?;

        info!("Found {} users ({:?} scope)", users.len(), scope);
        Ok(users.into_iter().map(UserSummary::from).collect())
    }
}
