use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;

use crate::domain::errors::{DomainError, DomainResult};

pub const ENTERPRISE_TEMPLATE_ID: &str = "enterprise-idp";
pub const GOOGLE_TEMPLATE_ID: &str = "google-idp";
pub const FACEBOOK_TEMPLATE_ID: &str = "facebook-idp";

const ENTERPRISE_TEMPLATE: &str =
    include_str!("../../../data/templates/enterprise-identity-provider.json");
const GOOGLE_TEMPLATE: &str = include_str!("../../../data/templates/google.json");
const FACEBOOK_TEMPLATE: &str = include_str!("../../../data/templates/facebook.json");

/// Supported federated identity provider kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Enterprise,
    Google,
    Facebook,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 3] = [
        ProviderKind::Enterprise,
        ProviderKind::Google,
        ProviderKind::Facebook,
    ];

    pub fn from_template_id(template_id: &str) -> DomainResult<Self> {
        match template_id {
            ENTERPRISE_TEMPLATE_ID => Ok(ProviderKind::Enterprise),
            GOOGLE_TEMPLATE_ID => Ok(ProviderKind::Google),
            FACEBOOK_TEMPLATE_ID => Ok(ProviderKind::Facebook),
            other => Err(DomainError::UnsupportedProviderKind {
                template_id: other.to_string(),
            }),
        }
    }

    pub fn template_id(&self) -> &'static str {
        match self {
            ProviderKind::Enterprise => ENTERPRISE_TEMPLATE_ID,
            ProviderKind::Google => GOOGLE_TEMPLATE_ID,
            ProviderKind::Facebook => FACEBOOK_TEMPLATE_ID,
        }
    }

    /// Icon file served by the console for this kind
    pub fn icon(&self) -> &'static str {
        match self {
            ProviderKind::Enterprise => "enterprise.svg",
            ProviderKind::Google => "google.svg",
            ProviderKind::Facebook => "facebook.svg",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.template_id())
    }
}

/// Key/value pair of a federated authenticator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub key: String,
    pub value: String,
}

impl Property {
    pub fn new(key: &str, value: impl Into<String>) -> Self {
        Self {
            key: key.to_string(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Authenticator {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authenticator_id: Option<String>,
    #[serde(default)]
    pub is_enabled: bool,
    #[serde(default)]
    pub properties: Vec<Property>,
    /// Fields we don't interpret, sent back as-is
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Authenticator {
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|p| p.key == key)
            .map(|p| p.value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FederatedAuthenticators {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_authenticator_id: Option<String>,
    #[serde(default)]
    pub authenticators: Vec<Authenticator>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Identity provider model as accepted by the identity server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdpModel {
    #[serde(default)]
    pub name: String,
    pub federated_authenticators: FederatedAuthenticators,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl IdpModel {
    pub fn first_authenticator(&self) -> Option<&Authenticator> {
        self.federated_authenticators.authenticators.first()
    }
}

/// Static descriptor of a supported identity provider kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: String,
    pub template_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
    pub idp: IdpModel,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Template {
    pub fn kind(&self) -> DomainResult<ProviderKind> {
        ProviderKind::from_template_id(&self.template_id)
    }
}

/// Immutable set of templates loaded at startup
#[derive(Debug, Clone)]
pub struct TemplateCatalog {
    templates: Vec<Template>,
}

impl TemplateCatalog {
    /// Templates bundled with the crate: enterprise, Google, Facebook
    pub fn builtin() -> DomainResult<Self> {
        let templates = [ENTERPRISE_TEMPLATE, GOOGLE_TEMPLATE, FACEBOOK_TEMPLATE]
            .iter()
            .map(|raw| {
                serde_json::from_str::<Template>(raw).map_err(|e| DomainError::Serialization {
                    message: format!("Invalid bundled template: {e}"),
                })
            })
            .collect::<DomainResult<Vec<_>>>()?;

        Self::from_templates(templates)
    }

    pub fn from_templates(templates: Vec<Template>) -> DomainResult<Self> {
        let mut seen = HashSet::new();
        for template in &templates {
            template.kind()?;
            if !seen.insert(template.template_id.clone()) {
                return Err(DomainError::BusinessRule {
                    rule: "unique_template_id".to_string(),
                    context: format!("duplicate template '{}'", template.template_id),
                });
            }
        }
        Ok(Self { templates })
    }

    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    pub fn find(&self, template_id: &str) -> DomainResult<&Template> {
        self.templates
            .iter()
            .find(|t| t.template_id == template_id)
            .ok_or_else(|| DomainError::TemplateNotFound {
                template_id: template_id.to_string(),
            })
    }

    pub fn find_by_kind(&self, kind: ProviderKind) -> Option<&Template> {
        self.templates
            .iter()
            .find(|t| t.template_id == kind.template_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_has_all_kinds_in_order() {
        let catalog = TemplateCatalog::builtin().unwrap();
        let ids: Vec<_> = catalog
            .templates()
            .iter()
            .map(|t| t.template_id.as_str())
            .collect();
        assert_eq!(ids, vec![ENTERPRISE_TEMPLATE_ID, GOOGLE_TEMPLATE_ID, FACEBOOK_TEMPLATE_ID]);

        for kind in ProviderKind::ALL {
            let template = catalog.find_by_kind(kind).unwrap();
            assert!(template.idp.first_authenticator().is_some());
        }
    }

    #[test]
    fn unknown_template_id_is_rejected() {
        assert!(matches!(
            ProviderKind::from_template_id("github-idp"),
            Err(DomainError::UnsupportedProviderKind { .. })
        ));

        let catalog = TemplateCatalog::builtin().unwrap();
        assert!(matches!(
            catalog.find("github-idp"),
            Err(DomainError::TemplateNotFound { .. })
        ));
    }

    #[test]
    fn unknown_fields_survive_round_trip() {
        let catalog = TemplateCatalog::builtin().unwrap();
        let google = catalog.find(GOOGLE_TEMPLATE_ID).unwrap();
        let value = serde_json::to_value(&google.idp).unwrap();
        assert_eq!(value["provisioning"]["jit"]["scheme"], "PROVISION_SILENTLY");
        assert_eq!(
            value["federatedAuthenticators"]["defaultAuthenticatorId"],
            "R29vZ2xlT0lEQ0F1dGhlbnRpY2F0b3I"
        );
    }

    #[test]
    fn duplicate_templates_are_rejected() {
        let catalog = TemplateCatalog::builtin().unwrap();
        let google = catalog.find(GOOGLE_TEMPLATE_ID).unwrap().clone();
        let result = TemplateCatalog::from_templates(vec![google.clone(), google]);
        assert!(matches!(result, Err(DomainError::BusinessRule { .. })));
    }
}
