use config::{Config, Environment, File, FileFormat};
use error_stack::{Report, ResultExt};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::constants::{DEFAULT_ENDPOINT, DEFAULT_USER_ID_COOKIE, DEFAULT_USER_SYNC_URL};
use crate::error::AdapterError;

/// Prefix for environment overrides, e.g. `CLICKAGY__BIDDER__ENDPOINT`.
pub const ENVIRONMENT_VARIABLE_PREFIX: &str = "CLICKAGY";
pub const ENVIRONMENT_VARIABLE_SEPARATOR: &str = "__";

/// Exchange-facing settings for the Clickagy bidder.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct BidderSettings {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// `OpenRTB` bid endpoint the host POSTs to.
    #[serde(default = "default_endpoint")]
    #[validate(url)]
    pub endpoint: String,
    /// Image pixel handed out for user syncing.
    #[serde(default = "default_user_sync_url")]
    #[validate(url)]
    pub user_sync_url: String,
    /// First-party cookie holding the exchange's user id.
    #[serde(default = "default_user_id_cookie")]
    #[validate(length(min = 1))]
    pub user_id_cookie: String,
}

fn default_enabled() -> bool {
    true
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_user_sync_url() -> String {
    DEFAULT_USER_SYNC_URL.to_string()
}

fn default_user_id_cookie() -> String {
    DEFAULT_USER_ID_COOKIE.to_string()
}

impl Default for BidderSettings {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            endpoint: default_endpoint(),
            user_sync_url: default_user_sync_url(),
            user_id_cookie: default_user_id_cookie(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct Settings {
    #[serde(default)]
    #[validate(nested)]
    pub bidder: BidderSettings,
    /// Publisher-configured page URL. Wins over the detected referer when set.
    #[serde(default)]
    pub page_url: Option<String>,
}

impl Settings {
    /// Load settings from a TOML string, applying `CLICKAGY__*` environment
    /// overrides on top.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::Configuration`] if the TOML is malformed, a value
    /// has the wrong type, or validation fails.
    pub fn from_toml(toml_str: &str) -> Result<Self, Report<AdapterError>> {
        let environment = Environment::default()
            .prefix(ENVIRONMENT_VARIABLE_PREFIX)
            .separator(ENVIRONMENT_VARIABLE_SEPARATOR);

        let toml = File::from_str(toml_str, FileFormat::Toml);
        let config = Config::builder()
            .add_source(toml)
            .add_source(environment)
            .build()
            .change_context(AdapterError::Configuration {
                message: "Failed to build configuration".to_string(),
            })?;

        let settings: Self =
            config
                .try_deserialize()
                .change_context(AdapterError::Configuration {
                    message: "Failed to deserialize settings".to_string(),
                })?;

        settings
            .validate()
            .change_context(AdapterError::Configuration {
                message: "Settings validation failed".to_string(),
            })?;

        Ok(settings)
    }

    /// Page URL override, ignoring blank values.
    #[must_use]
    pub fn page_url_override(&self) -> Option<&str> {
        self.page_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::tests::crate_test_settings_str;

    #[test]
    fn test_settings_default_matches_production_constants() {
        let settings = Settings::default();
        assert!(settings.bidder.enabled);
        assert_eq!(settings.bidder.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(settings.bidder.user_sync_url, DEFAULT_USER_SYNC_URL);
        assert_eq!(settings.bidder.user_id_cookie, "cb");
        assert!(settings.page_url.is_none());
    }

    #[test]
    fn test_settings_from_valid_toml() {
        let settings =
            Settings::from_toml(&crate_test_settings_str()).expect("should parse settings");

        assert_eq!(
            settings.bidder.endpoint,
            "https://rtb.test-exchange.com/openrtb/bid"
        );
        assert_eq!(
            settings.bidder.user_sync_url,
            "https://rtb.test-exchange.com/pixel.gif"
        );
        assert_eq!(settings.bidder.user_id_cookie, "uid");
        assert_eq!(
            settings.page_url_override(),
            Some("https://www.test-publisher.com/article")
        );
    }

    #[test]
    fn test_settings_empty_toml_uses_defaults() {
        let settings = Settings::from_toml("").expect("empty TOML should fall back to defaults");
        assert_eq!(settings.bidder.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(settings.bidder.user_id_cookie, DEFAULT_USER_ID_COOKIE);
    }

    #[test]
    fn test_settings_partial_bidder_section() {
        let toml_str = r#"
            [bidder]
            endpoint = "https://example-exchange.com/bid"
            "#;

        let settings = Settings::from_toml(toml_str).expect("should parse partial section");
        assert_eq!(settings.bidder.endpoint, "https://example-exchange.com/bid");
        assert_eq!(settings.bidder.user_sync_url, DEFAULT_USER_SYNC_URL);
    }

    #[test]
    fn test_settings_invalid_toml_syntax() {
        let toml_str = r#"
            [bidder
            endpoint = "https://example-exchange.com/bid"
            "#;

        let settings = Settings::from_toml(toml_str);
        assert!(settings.is_err(), "Should fail with invalid TOML syntax");
    }

    #[test]
    fn test_settings_rejects_invalid_endpoint() {
        let toml_str = r#"
            [bidder]
            endpoint = "not a url"
            "#;

        let err = Settings::from_toml(toml_str).expect_err("should reject malformed endpoint");
        assert!(matches!(
            err.current_context(),
            AdapterError::Configuration { .. }
        ));
    }

    #[test]
    fn test_settings_rejects_empty_cookie_name() {
        let toml_str = r#"
            [bidder]
            user_id_cookie = ""
            "#;

        assert!(Settings::from_toml(toml_str).is_err());
    }

    #[test]
    fn test_page_url_override_ignores_blank() {
        let settings = Settings {
            page_url: Some("   ".to_string()),
            ..Settings::default()
        };
        assert_eq!(settings.page_url_override(), None);
    }

    #[test]
    fn test_override_env() {
        // Only `enabled` is overridden so parallel tests reading other keys are unaffected.
        temp_env::with_var("CLICKAGY__BIDDER__ENABLED", Some("false"), || {
            let settings = Settings::from_toml(&crate_test_settings_str())
                .expect("should load settings with env override");
            assert!(!settings.bidder.enabled);
        });
    }
}
