//! A GraphQL server over an in-memory library of books and authors.
//!
//! Books list their authors by name and authors list their books by title.
//! The relation fields resolve those strings against the other collection,
//! keeping every match and skipping every miss.

#![warn(unreachable_pub)]

pub mod configuration;
pub mod context;
pub mod cross_reference;
pub mod error;
mod executable;
pub mod query;
pub mod schema;
pub mod server;
pub mod store;

pub use configuration::Configuration;
pub use context::RequestContext;
pub use executable::main;
pub use schema::LibrarySchema;
pub use server::HttpServer;
pub use store::AuthorRecord;
pub use store::BookRecord;
pub use store::DataStore;
