use serde::{Deserialize, Serialize};
use wso2is_domain::domain::entities::{FormValues, Template};

/// Template descriptor offered to the console
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateDto {
    pub id: String,
    pub template_id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
}

impl From<&Template> for TemplateDto {
    fn from(template: &Template) -> Self {
        let icon = template
            .image
            .clone()
            .or_else(|| template.kind().ok().map(|kind| kind.icon().to_string()))
            .unwrap_or_default();

        Self {
            id: template.id.clone(),
            template_id: template.template_id.clone(),
            name: template.name.clone(),
            description: template.description.clone(),
            icon,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIdentityProviderRequest {
    pub template_id: String,
    #[serde(default)]
    pub form_values: FormValues,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}
