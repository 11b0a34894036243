use generational_arena::{Arena, Index};
use tracing::{debug, instrument};

use crate::config::LayoutConfig;
use crate::domain::node::BinaryNode;

/// Positioned copy of one tree node, ready for drawing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutNode {
    /// Text drawn inside the node
    pub label: String,
    /// Distance from the root, root = 0
    pub depth: usize,
    /// In-order rank, so keys of a search tree read left to right
    pub column: usize,
    pub x: u32,
    pub y: u32,
    /// Index of parent node in the arena, None for the root
    pub parent: Option<Index>,
    pub left: Option<Index>,
    pub right: Option<Index>,
}

/// Arena of positioned nodes computed from a built tree.
///
/// The source tree is only read; the layout owns its own copies of the labels.
#[derive(Debug)]
pub struct TreeLayout {
    arena: Arena<LayoutNode>,
    root: Option<Index>,
    columns: usize,
}

impl Default for TreeLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeLayout {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
            columns: 0,
        }
    }

    /// Assign depth, column and pixel position to every node below `root`.
    #[instrument(level = "debug", skip_all)]
    pub fn from_root<N, F>(root: Option<&N>, label: F, config: &LayoutConfig) -> Self
    where
        N: BinaryNode,
        F: Fn(&N) -> String,
    {
        let mut layout = Self::new();
        let Some(root) = root else {
            return layout;
        };

        // Pre-order copy: (node, depth, (parent, is_left_child)).
        let mut stack: Vec<(&N, usize, Option<(Index, bool)>)> = vec![(root, 0, None)];
        while let Some((node, depth, parent)) = stack.pop() {
            let idx = layout.arena.insert(LayoutNode {
                label: label(node),
                depth,
                column: 0,
                x: 0,
                y: 0,
                parent: parent.map(|(p, _)| p),
                left: None,
                right: None,
            });
            match parent {
                Some((p, true)) => layout.arena[p].left = Some(idx),
                Some((p, false)) => layout.arena[p].right = Some(idx),
                None => layout.root = Some(idx),
            }
            if let Some(right) = node.right() {
                stack.push((right, depth + 1, Some((idx, false))));
            }
            if let Some(left) = node.left() {
                stack.push((left, depth + 1, Some((idx, true))));
            }
        }

        layout.assign_columns(config);
        debug!(nodes = layout.len(), columns = layout.columns, "layout computed");
        layout
    }

    /// In-order walk over the arena; each node's column is its visit rank.
    fn assign_columns(&mut self, config: &LayoutConfig) {
        let mut stack = Vec::new();
        let mut current = self.root;
        let mut column = 0;
        loop {
            while let Some(idx) = current {
                stack.push(idx);
                current = self.arena[idx].left;
            }
            let Some(idx) = stack.pop() else {
                break;
            };
            let node = &mut self.arena[idx];
            node.column = column;
            node.x = pixel(config.margin, column, config.horizontal_spacing);
            node.y = pixel(config.margin, node.depth, config.vertical_spacing);
            column += 1;
            current = node.right;
        }
        self.columns = column;
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn get_node(&self, idx: Index) -> Option<&LayoutNode> {
        self.arena.get(idx)
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Number of levels.
    pub fn depth(&self) -> usize {
        self.arena
            .iter()
            .map(|(_, n)| n.depth + 1)
            .max()
            .unwrap_or(0)
    }

    /// Number of columns, equal to the node count.
    pub fn width(&self) -> usize {
        self.columns
    }

    /// Pre-order walk from the root.
    pub fn iter(&self) -> LayoutIterator<'_> {
        LayoutIterator::new(self)
    }

    /// Parent to child pairs, in pre-order, left child before right.
    pub fn edges(&self) -> Vec<(Index, Index)> {
        self.iter()
            .flat_map(|(idx, node)| {
                node.left
                    .into_iter()
                    .chain(node.right)
                    .map(move |child| (idx, child))
            })
            .collect()
    }

    /// Labels of childless nodes, left to right.
    pub fn leaf_labels(&self) -> Vec<String> {
        let mut leaves: Vec<&LayoutNode> = self
            .arena
            .iter()
            .map(|(_, n)| n)
            .filter(|n| n.left.is_none() && n.right.is_none())
            .collect();
        leaves.sort_by_key(|n| n.column);
        leaves.into_iter().map(|n| n.label.clone()).collect()
    }
}

pub struct LayoutIterator<'a> {
    layout: &'a TreeLayout,
    stack: Vec<Index>,
}

impl<'a> LayoutIterator<'a> {
    fn new(layout: &'a TreeLayout) -> Self {
        Self {
            layout,
            stack: layout.root().into_iter().collect(),
        }
    }
}

impl<'a> Iterator for LayoutIterator<'a> {
    type Item = (Index, &'a LayoutNode);

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.stack.pop()?;
        let node = self.layout.get_node(idx)?;
        // Push right first so the left subtree comes out first
        self.stack.extend(node.right);
        self.stack.extend(node.left);
        Some((idx, node))
    }
}
/// `margin + slot * spacing`, clamped at `u32::MAX` for oversized settings.
fn pixel(margin: u32, slot: usize, spacing: u32) -> u32 {
    let slot = u32::try_from(slot).unwrap_or(u32::MAX);
    margin.saturating_add(slot.saturating_mul(spacing))
}

