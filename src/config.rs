//! Configuration management for lakepath
//!
//! Describes the lake being addressed and the listing request to run. Values
//! come from `config.toml` with `LAKEPATH__*` environment overrides, e.g.
//! `LAKEPATH__LAKE__CONTAINER=raw`.

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

use crate::listing::{FilterSpec, ListingRequest};
use crate::utils::paths::combine_url;

const DFS_HOST_SUFFIX: &str = "dfs.core.windows.net";

/// Complete application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub lake: LakeConfig,

    #[serde(default)]
    pub request: RequestConfig,
}

/// The container being listed
#[derive(Debug, Deserialize, Clone)]
pub struct LakeConfig {
    /// Storage account name, or a full account URI
    pub account_uri: String,

    pub container: String,

    /// Local directory served in place of the container
    pub store_root: String,
}

/// A listing request as written in configuration
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct RequestConfig {
    pub directory: Option<String>,
    pub recursive: bool,
    pub ignore_directory_case: bool,
    pub filters: Vec<FilterConfig>,
    pub order_by: Option<String>,
    pub order_by_descending: bool,
    pub limit: i64,
}

/// One filter of a configured request
#[derive(Debug, Deserialize, Clone)]
pub struct FilterConfig {
    pub column: String,
    pub operator: String,
    pub value: String,
}

impl AppConfig {
    /// Load configuration from config.toml with environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        let config_paths = ["lakepath/config", "config"];

        let mut last_error = None;
        for config_path in config_paths {
            let builder = Config::builder().add_source(File::with_name(config_path));
            match Self::build(builder) {
                Ok(config) => return Ok(config),
                Err(e) => last_error = Some(e),
            }
        }

        Err(last_error.unwrap_or_else(|| ConfigError::Message("no configuration found".into())))
    }

    /// Load configuration from TOML text with environment overrides
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        Self::build(Config::builder().add_source(File::from_str(toml, FileFormat::Toml)))
    }

    fn build(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, ConfigError> {
        let settings = builder
            .add_source(
                Environment::with_prefix("LAKEPATH")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        let config: AppConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values
    fn validate(&self) -> Result<(), ConfigError> {
        if self.lake.account_uri.trim().is_empty() {
            return Err(ConfigError::Message("account_uri cannot be empty".into()));
        }

        if self.lake.container.trim().is_empty() {
            return Err(ConfigError::Message("container cannot be empty".into()));
        }

        if self.lake.store_root.trim().is_empty() {
            return Err(ConfigError::Message("store_root cannot be empty".into()));
        }

        Ok(())
    }
}

impl LakeConfig {
    /// URL of the container, used as the prefix of item URLs
    pub fn base_url(&self) -> String {
        let account = self.account_uri.trim();
        let account_url = if account.contains("://") {
            account.to_string()
        } else {
            format!("https://{account}.{DFS_HOST_SUFFIX}")
        };
        combine_url(&account_url, self.container.trim().trim_matches('/'))
    }
}

impl RequestConfig {
    pub fn to_request(&self) -> ListingRequest {
        ListingRequest {
            directory: self.directory.clone(),
            recursive: self.recursive,
            ignore_directory_case: self.ignore_directory_case,
            filters: self
                .filters
                .iter()
                .map(|f| FilterSpec::new(&f.column, &f.operator, &f.value))
                .collect(),
            order_by: self.order_by.clone(),
            order_by_descending: self.order_by_descending,
            limit: self.limit,
        }
    }
}
