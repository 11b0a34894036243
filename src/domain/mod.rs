//! Domain layer: node shapes, the two builders and read-only views
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod balanced;
pub mod display;
pub mod layout;
pub mod level_order;
pub mod node;
pub mod traversal;

pub use balanced::{build_balanced, insert, is_avl_balanced, left_rotate, right_rotate};
pub use display::{render_tree, TreeDisplay};
pub use layout::{LayoutNode, TreeLayout};
pub use level_order::{build_level_order, encode_level_order, to_level_order};
pub use node::{balance_factor, height, is_present, BalancedNode, BinaryNode, PlainNode};
pub use traversal::{in_order, level_order, node_count, tree_height};
