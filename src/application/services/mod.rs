//! Application services

pub mod visualize;

pub use visualize::{OutputFormat, VisualizeService};
