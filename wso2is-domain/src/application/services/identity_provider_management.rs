use crate::{
    application::ports::*,
    domain::{
        entities::*,
        errors::DomainResult,
    },
};
use std::sync::Arc;
use tracing::{info, instrument};

/// Identity provider management service: template catalog and provider creation
pub struct IdentityProviderService {
    catalog: Arc<TemplateCatalog>,
    repository: Arc<dyn IdentityServerRepository>,
    endpoints: TenantEndpoints,
}

impl IdentityProviderService {
    pub fn new(
        catalog: Arc<TemplateCatalog>,
        repository: Arc<dyn IdentityServerRepository>,
        endpoints: TenantEndpoints,
    ) -> Self {
        Self {
            catalog,
            repository,
            endpoints,
        }
    }

    /// Templates offered for creating a provider
    pub fn list_templates(&self) -> &[Template] {
        self.catalog.templates()
    }

    /// Create a provider from a template and the values the user filled in
    #[instrument(skip(self, values, session), fields(template_id = %template_id))]
    pub async fn create_identity_provider(
        &self,
        template_id: &str,
        values: &FormValues,
        session: &Session,
    ) -> DomainResult<IdentityProviderSummary> {
        let template = self.catalog.find(template_id)?;
        let form = ProviderForm::from_values(template.kind()?, values)?;

        info!(
            "Creating {} identity provider '{}'",
            form.kind(),
            form.application_name()
        );

        let payload = build_payload(template, &form, &self.endpoints)?;
        let created = self
            .repository
            .create_identity_provider(&payload, &session.access_token)
            .await?;

        info!("Created identity provider '{}' ({})", created.name, created.id);
        Ok(created)
    }

    /// Identity providers registered in the tenant
    #[instrument(skip(self, session))]
    pub async fn list_identity_providers(
        &self,
        session: &Session,
    ) -> DomainResult<Vec<IdentityProviderSummary>> {
        let providers = self
            .repository
            .list_identity_providers(&session.access_token)
            .await?;

        info!("Found {} identity providers", providers.len());
        Ok(providers)
    }
}
