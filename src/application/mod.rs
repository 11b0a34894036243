//! Application layer: input coercion and use cases
//!
//! This layer turns user text into typed sequences and drives the domain builders.

pub mod error;
pub mod input;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
pub use input::{parse_keys, parse_values};
