use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use super::common::TenantEndpoints;
use super::template::{ProviderKind, Property};
use crate::domain::errors::{DomainError, DomainResult};

pub mod fields {
    pub const APPLICATION_NAME: &str = "application_name";
    pub const APPLICATION_ID: &str = "application_id";
    pub const APPLICATION_SECRET: &str = "application_secret";
    pub const CLIENT_ID: &str = "client_id";
    pub const CLIENT_SECRET: &str = "client_secret";
}

pub mod property_keys {
    pub const CLIENT_ID: &str = "ClientId";
    pub const CLIENT_SECRET: &str = "ClientSecret";
    pub const CALLBACK_URL: &str = "callBackUrl";
    pub const ADDITIONAL_QUERY_PARAMETERS: &str = "AdditionalQueryParameters";
}

pub const GOOGLE_QUERY_PARAMETERS: &str = "scope=email openid profile";

/// Raw field values entered by the user
///
/// Scalars are accepted and stringified; `null` counts as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "HashMap<String, Value>")]
pub struct FormValues(HashMap<String, String>);

impl From<HashMap<String, Value>> for FormValues {
    fn from(raw: HashMap<String, Value>) -> Self {
        let values = raw
            .into_iter()
            .filter_map(|(key, value)| {
                let value = match value {
                    Value::Null => return None,
                    Value::String(s) => s,
                    other => other.to_string(),
                };
                Some((key, value))
            })
            .collect();
        Self(values)
    }
}

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: &str, value: impl Into<String>) -> Self {
        self.0.insert(field.to_string(), value.into());
        self
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Value of a required field, rejecting missing or blank input
    ///
    /// The value is returned exactly as entered.
    pub fn require(&self, field: &str) -> DomainResult<String> {
        match self.get(field) {
            Some(value) if !value.trim().is_empty() => Ok(value.to_string()),
            Some(_) => Err(DomainError::validation(field, "must not be blank")),
            None => Err(DomainError::validation(field, "is required")),
        }
    }
}

/// Typed form for each provider kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderForm {
    Enterprise {
        application_name: String,
    },
    Google {
        application_name: String,
        client_id: String,
        client_secret: String,
    },
    Facebook {
        application_name: String,
        application_id: String,
        application_secret: String,
    },
}

impl ProviderForm {
    pub fn from_values(kind: ProviderKind, values: &FormValues) -> DomainResult<Self> {
        let application_name = values.require(fields::APPLICATION_NAME)?;

        Ok(match kind {
            ProviderKind::Enterprise => ProviderForm::Enterprise { application_name },
            ProviderKind::Google => ProviderForm::Google {
                application_name,
                client_id: values.require(fields::CLIENT_ID)?,
                client_secret: values.require(fields::CLIENT_SECRET)?,
            },
            ProviderKind::Facebook => ProviderForm::Facebook {
                application_name,
                application_id: values.require(fields::APPLICATION_ID)?,
                application_secret: values.require(fields::APPLICATION_SECRET)?,
            },
        })
    }

    pub fn kind(&self) -> ProviderKind {
        match self {
            ProviderForm::Enterprise { .. } => ProviderKind::Enterprise,
            ProviderForm::Google { .. } => ProviderKind::Google,
            ProviderForm::Facebook { .. } => ProviderKind::Facebook,
        }
    }

    pub fn application_name(&self) -> &str {
        match self {
            ProviderForm::Enterprise { application_name }
            | ProviderForm::Google {
                application_name, ..
            }
            | ProviderForm::Facebook {
                application_name, ..
            } => application_name,
        }
    }

    /// Properties for the first authenticator, or `None` to keep the
    /// template defaults.
    pub fn authenticator_properties(&self, endpoints: &TenantEndpoints) -> Option<Vec<Property>> {
        match self {
            // The enterprise form collects no endpoints; template defaults stay.
            ProviderForm::Enterprise { .. } => None,
            ProviderForm::Google {
                client_id,
                client_secret,
                ..
            } => Some(vec![
                Property::new(property_keys::CLIENT_ID, client_id.as_str()),
                Property::new(property_keys::CLIENT_SECRET, client_secret.as_str()),
                Property::new(property_keys::CALLBACK_URL, endpoints.commonauth_url()),
                Property::new(
                    property_keys::ADDITIONAL_QUERY_PARAMETERS,
                    GOOGLE_QUERY_PARAMETERS,
                ),
            ]),
            ProviderForm::Facebook {
                application_id,
                application_secret,
                ..
            } => Some(vec![
                Property::new(property_keys::CLIENT_ID, application_id.as_str()),
                Property::new(property_keys::CLIENT_SECRET, application_secret.as_str()),
                Property::new(property_keys::CALLBACK_URL, endpoints.commonauth_url()),
            ]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_is_named_in_error() {
        let values = FormValues::new()
            .with(fields::APPLICATION_NAME, "Acme")
            .with(fields::CLIENT_ID, "abc");

        let err = ProviderForm::from_values(ProviderKind::Google, &values).unwrap_err();
        match err {
            DomainError::Validation { field, .. } => assert_eq!(field, fields::CLIENT_SECRET),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn blank_values_are_rejected() {
        let values = FormValues::new().with(fields::APPLICATION_NAME, "   ");
        assert!(ProviderForm::from_values(ProviderKind::Enterprise, &values).is_err());
    }

    #[test]
    fn credentials_keep_surrounding_whitespace() {
        let values = FormValues::new()
            .with(fields::APPLICATION_NAME, "Acme")
            .with(fields::CLIENT_ID, " abc ")
            .with(fields::CLIENT_SECRET, "s3cret\t");

        let form = ProviderForm::from_values(ProviderKind::Google, &values).unwrap();
        match form {
            ProviderForm::Google {
                client_id,
                client_secret,
                ..
            } => {
                assert_eq!(client_id, " abc ");
                assert_eq!(client_secret, "s3cret\t");
            }
            other => panic!("unexpected form: {other:?}"),
        }
    }

    #[test]
    fn scalar_json_values_are_stringified() {
        let values: FormValues = serde_json::from_value(serde_json::json!({
            "application_name": "Acme",
            "application_id": 1234567890,
            "application_secret": true,
            "ignored": null
        }))
        .unwrap();

        assert_eq!(values.get(fields::APPLICATION_ID), Some("1234567890"));
        assert_eq!(values.get(fields::APPLICATION_SECRET), Some("true"));
        assert_eq!(values.get("ignored"), None);

        let form = ProviderForm::from_values(ProviderKind::Facebook, &values).unwrap();
        assert_eq!(form.kind(), ProviderKind::Facebook);
        assert_eq!(form.application_name(), "Acme");
    }
}
