use crate::config::AppConfig;
use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Json, Serialized, Toml},
    Figment,
};
use std::path::Path;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads application configuration by merging defaults, TOML, environment variables, and JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration files cannot be parsed or the result is invalid.
    pub fn load() -> Result<AppConfig> {
        let config: AppConfig = Self::base()
            .merge(Toml::file("config/Config.toml"))
            .merge(Env::prefixed("APP_").split("__"))
            .join(Json::file("config/Config.json"))
            .extract()?;

        config.validate()?;
        Ok(config)
    }

    /// Loads application configuration with a specific profile.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration files cannot be parsed or the result is invalid.
    pub fn load_with_profile(profile: &str) -> Result<AppConfig> {
        let config: AppConfig = Self::base()
            .merge(Toml::file("config/Config.toml"))
            .merge(Toml::file(format!("config/Config.{profile}.toml")))
            .merge(Env::prefixed("APP_").split("__"))
            .join(Json::file("config/Config.json"))
            .extract()?;

        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from an explicit TOML file layered over the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, cannot be parsed, or is invalid.
    pub fn load_from(path: impl AsRef<Path>) -> Result<AppConfig> {
        let path = path.as_ref();
        if !path.exists() {
            anyhow::bail!("Config file not found: {}", path.display());
        }

        let config: AppConfig = Self::base()
            .merge(Toml::file(path))
            .extract()
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config.validate()?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    fn base() -> Figment {
        Figment::from(Serialized::defaults(AppConfig::default()))
    }
}
