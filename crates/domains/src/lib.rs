//! # domains
//!
//! Entities, errors and the persistence port of the blog core.
//! Nothing in this crate performs I/O.

pub mod error;
pub mod models;
pub mod ports;
pub mod timestamp;

pub use error::*;
pub use models::*;
pub use ports::*;
pub use timestamp::Timestamp;
