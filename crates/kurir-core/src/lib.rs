//! Shared configuration and reference data for the kurir reporting toolkit.
//!
//! Holds the env-driven [`AppConfig`], the location-code → hub mapping
//! loaded from `config/hubs.yaml`, and the driver reference store backed
//! by a JSON file maintained by the `sync-drivers` command.

mod app_config;
mod config;
mod drivers;
mod hubs;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use drivers::{DriverRecord, DriverStore};
pub use hubs::{load_hubs, HubConfig, HubMap, HubsFile};

use thiserror::Error;

/// Errors raised while loading configuration or reference data.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read hubs file at {path}: {source}")]
    HubsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse hubs file: {0}")]
    HubsFileParse(#[from] serde_yaml::Error),

    #[error("failed to access driver store at {path}: {source}")]
    DriverStoreIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse driver store: {0}")]
    DriverStoreParse(#[from] serde_json::Error),

    #[error("no hub mapping for location code '{0}'")]
    UnknownLocation(String),

    #[error("validation error: {0}")]
    Validation(String),
}
