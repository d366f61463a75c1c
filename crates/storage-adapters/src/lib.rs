//! # storage-adapters
//!
//! Implementations of the `domains::DocumentStore` port.

#[cfg(feature = "db-json")]
pub mod json_file;
#[cfg(feature = "db-json")]
mod format;

#[cfg(feature = "db-json")]
pub use json_file::JsonFileStore;
