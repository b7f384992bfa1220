use std::env;
use wso2is_domain::{AppConfig, DomainResult};

/// HTTP server configuration, on top of the domain configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Mark cookies `Secure`; defaults to whether the redirect URI is https
    pub cookie_secure: bool,
    pub app: AppConfig,
}

impl Config {
    pub fn from_env() -> DomainResult<Self> {
        let app = AppConfig::from_env()?;
        Ok(Self::from_app_config(
            app,
            env::var("PORT").ok(),
            env::var("COOKIE_SECURE").ok(),
        ))
    }

    pub fn from_app_config(
        app: AppConfig,
        port: Option<String>,
        cookie_secure: Option<String>,
    ) -> Self {
        let port = port.and_then(|p| p.trim().parse().ok()).unwrap_or(3000);
        let cookie_secure = cookie_secure
            .as_deref()
            .and_then(parse_bool)
            .unwrap_or_else(|| app.wso2.redirect_uri.starts_with("https://"));

        Self {
            port,
            cookie_secure,
            app,
        }
    }

    /// `EnvFilter` directives used when `RUST_LOG` is unset
    pub fn log_directives(&self) -> String {
        let level = &self.app.logging.level;
        format!("wso2is_admin_api={level},wso2is_domain={level},tower_http={level}")
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn app_config(extra: &[(&str, &str)]) -> AppConfig {
        let mut settings: HashMap<&str, &str> = HashMap::from([
            ("WSO2IS_HOST", "https://is.example.com"),
            ("WSO2IS_CLIENT_ID", "console"),
            ("WSO2IS_CLIENT_SECRET", "secret"),
            ("WSO2IS_ORG_ID", "org-1"),
        ]);
        settings.extend(extra.iter().copied());
        AppConfig::from_lookup(|key| settings.get(key).map(|v| v.to_string())).unwrap()
    }

    #[test]
    fn log_level_drives_default_directives() {
        let config = Config::from_app_config(app_config(&[("LOG_LEVEL", "warn")]), None, None);

        assert_eq!(
            config.log_directives(),
            "wso2is_admin_api=warn,wso2is_domain=warn,tower_http=warn"
        );
    }

    #[test]
    fn server_settings_fall_back_to_defaults() {
        let config = Config::from_app_config(app_config(&[]), Some("x".to_string()), None);

        assert_eq!(config.port, 3000);
        assert!(!config.cookie_secure);
        assert!(config.log_directives().starts_with("wso2is_admin_api=info"));
    }
}
