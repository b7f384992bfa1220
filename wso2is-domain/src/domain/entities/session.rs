use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Account object returned by the token endpoint on sign-in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuthAccount {
    pub access_token: String,
    #[serde(default)]
    pub id_token: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

/// Durable token state kept between requests of one browser session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenRecord {
    pub access_token: String,
    pub id_token: Option<String>,
    pub scope: Option<String>,
}

impl From<&OAuthAccount> for TokenRecord {
    fn from(account: &OAuthAccount) -> Self {
        Self {
            access_token: account.access_token.clone(),
            id_token: account.id_token.clone(),
            scope: account.scope.clone(),
        }
    }
}

/// Access token re-scoped to an organization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationToken {
    pub organization_id: String,
    pub access_token: String,
    pub scope: Option<String>,
    pub expires_at: DateTime<Utc>,
}

impl OrganizationToken {
    pub fn new(
        organization_id: String,
        access_token: String,
        expires_in: i64,
        scope: Option<String>,
    ) -> Self {
        Self {
            organization_id,
            access_token,
            scope,
            expires_at: expiry_after(Utc::now(), expires_in),
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

/// Instant `expires_in` seconds after `now`, saturating at the ends of the
/// representable range
fn expiry_after(now: DateTime<Utc>, expires_in: i64) -> DateTime<Utc> {
    Duration::try_seconds(expires_in)
        .and_then(|offset| now.checked_add_signed(offset))
        .unwrap_or(if expires_in > 0 {
            DateTime::<Utc>::MAX_UTC
        } else {
            DateTime::<Utc>::MIN_UTC
        })
}

/// Per-request view of the signed-in user's tokens
///
/// Serializes to `{accessToken, idToken, scope}`; the organization token stays
/// server side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub access_token: String,
    pub id_token: Option<String>,
    pub scope: Option<String>,
    #[serde(skip)]
    pub organization: Option<OrganizationToken>,
}

impl Session {
    pub fn from_record(record: &TokenRecord) -> Self {
        Self {
            access_token: record.access_token.clone(),
            id_token: record.id_token.clone(),
            scope: record.scope.clone(),
            organization: None,
        }
    }

    pub fn with_organization(mut self, token: OrganizationToken) -> Self {
        self.organization = Some(token);
        self
    }

    /// Token to use for calls scoped to the switched organization, if any
    pub fn organization_access_token(&self) -> Option<&str> {
        self.organization
            .as_ref()
            .filter(|token| !token.is_expired())
            .map(|token| token.access_token.as_str())
    }
}
