//! Loading of YAML configuration into an object model.
mod graphql;
mod server;

use std::fs;
use std::path::Path;
use std::str::FromStr;

use displaydoc::Display;
use schemars::schema::RootSchema;
use schemars::JsonSchema;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

pub use self::graphql::GraphQL;
pub use self::server::Server;

/// Configuration error.
#[derive(Debug, Error, Display)]
#[non_exhaustive]
pub enum ConfigurationError {
    /// could not read configuration file '{path}': {error}
    CannotReadFile { path: String, error: std::io::Error },

    /// {message}: {error}
    InvalidConfiguration {
        message: &'static str,
        error: String,
    },
}

/// The configuration for the library graph.
///
/// Can be created through `serde::Deserialize` from various formats,
/// or inline in Rust code with `serde_json::json!` and `serde_json::from_value`.
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct Configuration {
    /// Configuration options pertaining to the http server component.
    #[serde(default)]
    pub server: Server,

    /// Configuration options pertaining to GraphQL execution.
    #[serde(default)]
    pub graphql: GraphQL,
}

#[buildstructor::buildstructor]
impl Configuration {
    #[builder]
    pub fn new(server: Option<Server>, graphql: Option<GraphQL>) -> Self {
        Self {
            server: server.unwrap_or_default(),
            graphql: graphql.unwrap_or_default(),
        }
    }

    /// Reads and validates a YAML configuration file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigurationError> {
        let raw_yaml =
            fs::read_to_string(path).map_err(|error| ConfigurationError::CannotReadFile {
                path: path.display().to_string(),
                error,
            })?;
        tracing::debug!(path = %path.display(), "loaded configuration file");
        validate_configuration(&raw_yaml)
    }

    fn validate(self) -> Result<Self, ConfigurationError> {
        self.server.validate()?;
        Ok(self)
    }
}

impl FromStr for Configuration {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate_configuration(s)
    }
}

/// Generate a JSON schema for the configuration.
pub fn generate_config_schema() -> RootSchema {
    schemars::schema_for!(Configuration)
}

/// Parses YAML configuration. An empty document yields the defaults.
pub fn validate_configuration(raw_yaml: &str) -> Result<Configuration, ConfigurationError> {
    if raw_yaml.trim().is_empty() {
        return Ok(Configuration::default());
    }

    let configuration: Configuration =
        serde_yaml::from_str(raw_yaml).map_err(|e| ConfigurationError::InvalidConfiguration {
            message: "failed to parse yaml",
            error: e.to_string(),
        })?;
    configuration.validate()
}

#[cfg(test)]
mod tests;
