//! # services
//!
//! Request lifecycle and post operations over a `DocumentStore`.

pub mod posts;
pub mod scope;

pub use posts::Outcome;
pub use scope::RequestScope;
