use serde::Serialize;

use super::common::TenantEndpoints;
use super::provider_form::ProviderForm;
use super::template::{IdpModel, Template};
use crate::domain::errors::{DomainError, DomainResult};

const FIRST_ENTRY: usize = 0;

/// Provider-creation request body derived from a template and a form
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ProviderPayload(IdpModel);

impl ProviderPayload {
    pub fn model(&self) -> &IdpModel {
        &self.0
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }
}

/// Overlay the form onto a copy of the template's default model.
///
/// Only the first authenticator is touched: its properties are replaced when
/// the kind defines a mapping and it is always enabled. The template itself is
/// never modified.
pub fn build_payload(
    template: &Template,
    form: &ProviderForm,
    endpoints: &TenantEndpoints,
) -> DomainResult<ProviderPayload> {
    let template_kind = template.kind()?;
    if template_kind != form.kind() {
        return Err(DomainError::Validation {
            field: "templateId".to_string(),
            message: format!(
                "form for '{}' cannot be applied to template '{}'",
                form.kind(),
                template.template_id
            ),
        });
    }

    let mut model = template.idp.clone();
    model.name = form.application_name().to_string();

    let authenticator = model
        .federated_authenticators
        .authenticators
        .get_mut(FIRST_ENTRY)
        .ok_or_else(|| DomainError::BusinessRule {
            rule: "template_has_authenticator".to_string(),
            context: format!("template '{}' defines no authenticators", template.template_id),
        })?;

    if let Some(properties) = form.authenticator_properties(endpoints) {
        authenticator.properties = properties;
    }
    authenticator.is_enabled = true;

    Ok(ProviderPayload(model))
}
