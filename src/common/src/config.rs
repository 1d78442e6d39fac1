//! Layered configuration: defaults, then `deploy-sweeper.toml`, then
//! environment variables prefixed with `DEPLOY_SWEEPER__`.

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Configuration {
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Region used when the AWS environment variables do not provide one.
    ///
    /// Env: DEPLOY_SWEEPER__STORAGE__REGION
    pub region: String,

    /// Default S3-compatible endpoint. An endpoint given on the command
    /// line takes precedence.
    ///
    /// Env: DEPLOY_SWEEPER__STORAGE__ENDPOINT
    #[serde(default)]
    pub endpoint: Option<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            region: String::from("us-east-1"),
            endpoint: None,
        }
    }
}

impl Configuration {
    pub fn load() -> Result<Self, Box<figment::Error>> {
        Figment::from(Serialized::defaults(Configuration::default()))
            .merge(Toml::file("deploy-sweeper.toml"))
            .merge(Env::prefixed("DEPLOY_SWEEPER__").split("__"))
            .extract()
            .map_err(Box::new)
    }

    pub fn load_from_path(path: &Path) -> Result<Self, Box<figment::Error>> {
        Figment::from(Serialized::defaults(Configuration::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("DEPLOY_SWEEPER__").split("__"))
            .extract()
            .map_err(Box::new)
    }
}
