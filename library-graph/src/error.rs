//! Library graph errors.
use std::net::SocketAddr;

use displaydoc::Display;
use thiserror::Error;

pub use crate::configuration::ConfigurationError;

/// Errors raised while assembling the GraphQL schema.
///
/// These all surface at startup. Once a schema is built, executing requests
/// against it never fails because of the schema itself.
#[derive(Error, Display, Debug, Clone, Eq, PartialEq)]
#[ignore_extra_doc_attributes]
#[non_exhaustive]
pub enum SchemaError {
    /// invalid type reference '{0}'
    InvalidTypeReference(String),

    /// no resolver registered for '{type_name}.{field_name}'
    MissingResolver {
        /// The object type declaring the field.
        type_name: String,

        /// The field left without a resolver.
        field_name: String,
    },

    /// the GraphQL engine rejected the schema: {0}
    Rejected(String),
}

/// Errors raised by the HTTP server.
#[derive(Error, Display, Debug)]
#[non_exhaustive]
pub enum ServerError {
    /// {0}
    InvalidConfiguration(#[from] ConfigurationError),

    /// could not bind to {address}: {error}
    CannotBind {
        address: SocketAddr,
        error: std::io::Error,
    },

    /// could not read the listener address: {0}
    LocalAddress(std::io::Error),

    /// http server failed: {0}
    Serve(std::io::Error),
}
