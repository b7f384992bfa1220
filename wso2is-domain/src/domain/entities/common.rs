use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque identifier of a browser session
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn from_string(id: String) -> Self {
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Host and tenant of the identity server, from which every URL is derived
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantEndpoints {
    pub host: String,
    pub tenant: String,
}

impl TenantEndpoints {
    pub fn new(host: impl Into<String>, tenant: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            tenant: tenant.into(),
        }
    }

    /// `{host}/t/{tenant}`
    pub fn tenant_url(&self) -> String {
        format!("{}/t/{}", self.host.trim_end_matches('/'), self.tenant)
    }

    pub fn commonauth_url(&self) -> String {
        format!("{}/commonauth", self.tenant_url())
    }

    pub fn well_known_url(&self) -> String {
        format!(
            "{}/oauth2/token/.well-known/openid-configuration",
            self.tenant_url()
        )
    }

    pub fn authorize_url(&self) -> String {
        format!("{}/oauth2/authorize", self.tenant_url())
    }

    pub fn token_url(&self) -> String {
        format!("{}/oauth2/token", self.tenant_url())
    }

    pub fn userinfo_url(&self) -> String {
        format!("{}/scim2/Me", self.tenant_url())
    }

    pub fn identity_providers_url(&self) -> String {
        format!("{}/api/server/v1/identity-providers", self.tenant_url())
    }

    pub fn scim_users_url(&self) -> String {
        format!("{}/scim2/Users", self.tenant_url())
    }

    /// Users of the organization the access token was switched into
    pub fn organization_scim_users_url(&self) -> String {
        format!("{}/o/scim2/Users", self.tenant_url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_ignore_trailing_slash_on_host() {
        let endpoints = TenantEndpoints::new("https://localhost:9443/", "carbon.super");
        assert_eq!(
            endpoints.commonauth_url(),
            "https://localhost:9443/t/carbon.super/commonauth"
        );
        assert_eq!(
            endpoints.well_known_url(),
            "https://localhost:9443/t/carbon.super/oauth2/token/.well-known/openid-configuration"
        );
        assert_eq!(
            endpoints.organization_scim_users_url(),
            "https://localhost:9443/t/carbon.super/o/scim2/Users"
        );
    }
}
