use crate::domain::Credentials;
use secrecy::Secret;

/// Deployment exercised when no override is given.
pub const DEFAULT_BASE_URL: &str = "https://d5wfqm7y6yb3q.cloudfront.net";
pub const DEFAULT_USERNAME: &str = "petia";
pub const DEFAULT_PASSWORD: &str = "123456";

#[derive(serde::Deserialize, Clone, Debug)]
pub struct Settings {
    pub api: ApiSettings,
    pub credentials: CredentialSettings,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct ApiSettings {
    pub base_url: String,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct CredentialSettings {
    pub username: String,
    pub password: Secret<String>,
}

impl CredentialSettings {
    pub fn credentials(&self) -> Credentials {
        Credentials {
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }
}

/// Builds the run settings from the fixed defaults.
///
/// Any value can be overridden through the environment, e.g.
/// `APP_API__BASE_URL=http://127.0.0.1:8080` would set `Settings.api.base_url`.
/// A plain run needs no variable at all.
pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let settings = config::Config::builder()
        .set_default("api.base_url", DEFAULT_BASE_URL)?
        .set_default("credentials.username", DEFAULT_USERNAME)?
        .set_default("credentials.password", DEFAULT_PASSWORD)?
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}
