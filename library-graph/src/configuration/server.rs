use std::net::SocketAddr;

use schemars::JsonSchema;
use serde::Deserialize;
use serde::Serialize;

use super::ConfigurationError;

const DEFAULT_LISTEN: ([u8; 4], u16) = ([127, 0, 0, 1], 4000);
const DEFAULT_PATH: &str = "/";

fn default_listen() -> SocketAddr {
    SocketAddr::from(DEFAULT_LISTEN)
}

fn default_path() -> String {
    DEFAULT_PATH.to_string()
}

fn default_landing_page() -> bool {
    true
}

/// Configuration for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(deny_unknown_fields, default)]
pub struct Server {
    /// The socket address to listen on; defaults to 127.0.0.1:4000
    #[serde(default = "default_listen")]
    #[schemars(with = "String", default = "default_listen")]
    pub listen: SocketAddr,

    /// The path GraphQL requests are served on; defaults to /
    #[serde(default = "default_path")]
    pub path: String,

    /// Serve a GraphiQL explorer on GET requests to the GraphQL path.
    #[serde(default = "default_landing_page")]
    pub landing_page: bool,
}

#[buildstructor::buildstructor]
impl Server {
    #[builder]
    pub fn new(
        listen: Option<SocketAddr>,
        path: Option<String>,
        landing_page: Option<bool>,
    ) -> Self {
        Self {
            listen: listen.unwrap_or_else(default_listen),
            path: path.unwrap_or_else(default_path),
            landing_page: landing_page.unwrap_or_else(default_landing_page),
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigurationError> {
        if !self.path.starts_with('/') {
            return Err(ConfigurationError::InvalidConfiguration {
                message: "invalid 'server.path' attribute",
                error: format!("'{}' must start with '/'", self.path),
            });
        }
        Ok(())
    }
}

impl Default for Server {
    fn default() -> Self {
        Self::builder().build()
    }
}
