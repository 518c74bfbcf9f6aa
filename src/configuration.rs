use std::path::Path;

use secrecy::{ExposeSecret, Secret};

#[derive(serde::Deserialize, Clone, Debug)]
pub struct Settings {
    pub server: ServerSettings,
    pub mailchimp: MailchimpSettings,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct ServerSettings {
    /// `host:port` the listener binds.
    pub address: String,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct MailchimpSettings {
    #[serde(rename = "api-key")]
    pub api_key: Secret<String>,
    /// Overrides the datacenter-derived API root. Used by the test suite to
    /// point the client at a local mock.
    #[serde(rename = "base-url", default)]
    pub base_url: Option<String>,
}

impl MailchimpSettings {
    /// Root URL of the Mailchimp API for this key.
    ///
    /// Mailchimp keys end in a datacenter suffix (`…-us14`) that selects the
    /// API host. Keys without a suffix fall back to `us1`.
    pub fn api_url(&self) -> String {
        if let Some(base_url) = &self.base_url {
            return base_url.trim_end_matches('/').to_owned();
        }

        let datacenter = self
            .api_key
            .expose_secret()
            .rsplit_once('-')
            .map(|(_, datacenter)| datacenter)
            .unwrap_or("us1");

        format!("https://{datacenter}.api.mailchimp.com")
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigurationError {
    #[error("configuration file not found")]
    NotFound,
    #[error("failed to read configuration file")]
    Read(#[source] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[source] config::ConfigError),
}

pub fn get_configuration(path: &Path) -> Result<Settings, ConfigurationError> {
    if path.as_os_str().is_empty() {
        return Err(ConfigurationError::NotFound);
    }

    let contents = std::fs::read_to_string(path).map_err(ConfigurationError::Read)?;

    settings_from_toml(&contents)
}

fn settings_from_toml(contents: &str) -> Result<Settings, ConfigurationError> {
    config::Config::builder()
        .add_source(config::File::from_str(contents, config::FileFormat::Toml))
        .build()
        .and_then(|settings| settings.try_deserialize())
        .map_err(ConfigurationError::Parse)
}
