//! treeviz: the structural tree-building engine behind a data-structure visualizer.
//!
//! Two builders turn a flat sequence into a linked binary tree:
//! - [`domain::build_level_order`] rebuilds the exact shape encoded breadth-first,
//!   with `None` marking absent nodes
//! - [`domain::build_balanced`] inserts keys one at a time into an AVL tree
//!
//! Rendering consumes the result read-only through [`domain::BinaryNode`].

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;
