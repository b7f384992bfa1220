use serde::{Deserialize, Serialize};

/// Identity provider as listed by the identity server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityProviderSummary {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_enabled: bool,
    #[serde(default)]
    pub image: Option<String>,
}

/// Envelope of `GET /api/server/v1/identity-providers`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityProviderList {
    #[serde(default)]
    pub total_results: u64,
    #[serde(default)]
    pub identity_providers: Vec<IdentityProviderSummary>,
}
