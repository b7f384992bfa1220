use serde::{Deserialize, Serialize};

/// SCIM2 user resource, reduced to the attributes the console reads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScimUser {
    pub id: String,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub name: Option<ScimName>,
    #[serde(default)]
    pub emails: Vec<ScimEmail>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScimName {
    #[serde(default)]
    pub given_name: Option<String>,
    #[serde(default)]
    pub family_name: Option<String>,
    #[serde(default)]
    pub formatted: Option<String>,
}

/// SCIM emails come either as plain strings or as `{value, primary}` objects
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScimEmail {
    Plain(String),
    Typed {
        value: String,
        #[serde(default)]
        primary: bool,
    },
}

impl ScimEmail {
    pub fn value(&self) -> &str {
        match self {
            ScimEmail::Plain(value) | ScimEmail::Typed { value, .. } => value,
        }
    }

    fn is_primary(&self) -> bool {
        matches!(self, ScimEmail::Typed { primary: true, .. })
    }
}

/// SCIM list response envelope
#[derive(Debug, Clone, Deserialize)]
pub struct ScimListResponse {
    #[serde(rename = "totalResults", default)]
    pub total_results: u64,
    #[serde(rename = "Resources", default)]
    pub resources: Vec<ScimUser>,
}

/// Row of the user table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: String,
    pub user_name: String,
    pub name: String,
    pub email: String,
}

impl From<ScimUser> for UserSummary {
    fn from(user: ScimUser) -> Self {
        let name = user
            .name
            .as_ref()
            .map(display_name)
            .unwrap_or_default();

        let email = user
            .emails
            .iter()
            .find(|e| e.is_primary())
            .or_else(|| user.emails.first())
            .map(|e| e.value().to_string())
            .unwrap_or_default();

        Self {
            id: user.id,
            user_name: user.user_name,
            name,
            email,
        }
    }
}

fn display_name(name: &ScimName) -> String {
    let joined = [name.given_name.as_deref(), name.family_name.as_deref()]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ");
    let joined = joined.trim();

    if joined.is_empty() {
        name.formatted.clone().unwrap_or_default()
    } else {
        joined.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_scim_list_into_rows() {
        let body = serde_json::json!({
            "totalResults": 2,
            "Resources": [
                {
                    "id": "u-1",
                    "userName": "DEFAULT/alice",
                    "name": { "givenName": "Alice", "familyName": "Smith" },
                    "emails": [
                        { "value": "work@example.com" },
                        { "value": "alice@example.com", "primary": true }
                    ]
                },
                {
                    "id": "u-2",
                    "userName": "bob",
                    "name": { "formatted": "Robert B." },
                    "emails": ["bob@example.com"]
                }
            ]
        });

        let list: ScimListResponse = serde_json::from_value(body).unwrap();
        let rows: Vec<UserSummary> = list.resources.into_iter().map(Into::into).collect();

        assert_eq!(rows[0].name, "Alice Smith");
        assert_eq!(rows[0].email, "alice@example.com");
        assert_eq!(rows[1].name, "Robert B.");
        assert_eq!(rows[1].email, "bob@example.com");
    }

    #[test]
    fn user_without_name_or_email_gets_empty_cells() {
        let user: ScimUser = serde_json::from_str(r#"{"id":"u-3","userName":"svc"}"#).unwrap();
        let row = UserSummary::from(user);
        assert_eq!(row.name, "");
        assert_eq!(row.email, "");
        assert_eq!(
            serde_json::to_value(&row).unwrap()["userName"],
            serde_json::json!("svc")
        );
    }
}
