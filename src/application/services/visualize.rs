//! Visualization service
//!
//! Parses user text, runs the matching builder once and renders the result
//! for the terminal.

use std::fmt::{Display, Write};

use clap::ValueEnum;
use itertools::Itertools;
use tracing::instrument;

use crate::application::{parse_keys, parse_values, ApplicationResult};
use crate::config::{BuildMode, KeyKind, Settings};
use crate::domain::{
    build_balanced, build_level_order, encode_level_order, render_tree, to_level_order,
    BalancedNode, BinaryNode, PlainNode, TreeLayout,
};

/// How a built tree is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Indented tree drawing
    #[default]
    Tree,
    /// Node positions followed by the edge list
    Layout,
    /// Level-order encoding with explicit absence markers
    Levels,
}

/// Service turning input text into a rendered tree.
pub struct VisualizeService {
    settings: Settings,
}

impl VisualizeService {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Build a tree from `text` with the given builder and render it.
    #[instrument(level = "debug", skip(self))]
    pub fn render(
        &self,
        mode: BuildMode,
        text: &str,
        format: OutputFormat,
    ) -> ApplicationResult<String> {
        let absent = self.settings.absent_token.as_str();
        match mode {
            BuildMode::LevelOrder => {
                let values = parse_values(text, absent)?;
                let root = build_level_order(values);
                Ok(self.render_plain(root.as_deref(), format))
            }
            BuildMode::Balanced => match self.settings.key_kind {
                KeyKind::Int => {
                    let keys = parse_keys::<i64>(text, absent)?;
                    let root = build_balanced(keys);
                    Ok(self.render_balanced(root.as_deref(), format))
                }
                KeyKind::Text => {
                    let keys = parse_keys::<String>(text, absent)?;
                    let root = build_balanced(keys);
                    Ok(self.render_balanced(root.as_deref(), format))
                }
            },
        }
    }

    fn render_plain(&self, root: Option<&PlainNode<String>>, format: OutputFormat) -> String {
        match format {
            OutputFormat::Levels => self.format_levels(&to_level_order(root)),
            _ => self.render_shape(root, format, |n| n.payload().clone()),
        }
    }

    fn render_balanced<K>(&self, root: Option<&BalancedNode<K>>, format: OutputFormat) -> String
    where
        K: Display,
    {
        let label = |n: &BalancedNode<K>| {
            if self.settings.show_heights {
                format!("{} (h={})", n.key(), n.height())
            } else {
                n.key().to_string()
            }
        };
        match format {
            OutputFormat::Levels => {
                let labels = encode_level_order(root, label);
                self.format_levels(&labels)
            }
            _ => self.render_shape(root, format, label),
        }
    }

    fn render_shape<N, F>(&self, root: Option<&N>, format: OutputFormat, label: F) -> String
    where
        N: BinaryNode,
        F: Fn(&N) -> String,
    {
        match format {
            OutputFormat::Layout => {
                let layout = TreeLayout::from_root(root, label, &self.settings.layout);
                format_layout(&layout)
            }
            _ => render_tree(root, label).to_string(),
        }
    }

    fn format_levels(&self, slots: &[Option<String>]) -> String {
        let absent = display_absent(&self.settings.absent_token);
        format!(
            "[{}]",
            slots
                .iter()
                .map(|s| s.as_deref().unwrap_or(absent.as_str()))
                .join(", ")
        )
    }
}

/// `none` -> `None`, matching how absence is typed in.
fn display_absent(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn format_layout(layout: &TreeLayout) -> String {
    let mut out = String::new();
    if layout.is_empty() {
        out.push_str("Empty tree\n");
        return out;
    }
    let _ = writeln!(
        out,
        "{} nodes, {} levels, {} columns",
        layout.len(),
        layout.depth(),
        layout.width()
    );
    for (_, node) in layout.iter() {
        let _ = writeln!(
            out,
            "{:>6}  depth={} column={} x={} y={}",
            node.label, node.depth, node.column, node.x, node.y
        );
    }
    for (parent, child) in layout.edges() {
        if let (Some(p), Some(c)) = (layout.get_node(parent), layout.get_node(child)) {
            let _ = writeln!(out, "{} -> {}", p.label, c.label);
        }
    }
    out
}
