use std::env;

use crate::{error::ConfigError, repositories::MongoDbInitializationInfo};

pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug)]
pub enum RepositoryBackend {
    MongoDb(MongoDbInitializationInfo),
    InMemory { seed_path: Option<String> },
}

#[derive(Debug)]
pub struct AppConfig {
    pub port: u16,
    pub log_path: Option<String>,
    pub backend: RepositoryBackend,
}

impl AppConfig {
    /// Reads the service configuration from the process environment.
    pub fn from_env() -> Result<AppConfig, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<AppConfig, ConfigError> {
        let required = |name: &'static str| lookup(name).ok_or(ConfigError::Missing(name));

        let port = match lookup("AXUM_PORT") {
            Some(value) => value
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid { name: "AXUM_PORT", value })?,
            None => DEFAULT_PORT,
        };

        let backend = match lookup("CATALOG_REPOSITORY").as_deref() {
            None | Some("mongodb") => RepositoryBackend::MongoDb(MongoDbInitializationInfo {
                uri: required("MONGODB_URI")?,
                database: required("MONGODB_DB")?,
                collection: required("MONGODB_COLLECTION")?,
            }),
            Some("in_memory") => RepositoryBackend::InMemory {
                seed_path: lookup("CATALOG_SEED_PATH"),
            },
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name: "CATALOG_REPOSITORY",
                    value: other.to_string(),
                })
            }
        };

        Ok(AppConfig {
            port,
            log_path: lookup("LOG_PATH"),
            backend,
        })
    }
}
