// Copyright 2025 the Faber Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The layout tree.
//!
//! The same [`LayoutNode`] type is used for input and output: callers build a tree with
//! `layout: None` everywhere, and [`crate::compute_layout`] returns an independent copy with
//! `layout` filled in on every node.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use crate::geometry::{ComputedBox, Size};
use crate::measure::NodeContent;
use crate::style::Style;

/// A node of the layout tree.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayoutNode {
    /// Optional name, used for lookup and diagnostics.
    pub name: Option<String>,
    /// Layout style.
    pub style: Style,
    /// Leaf content, measured when the node has no children.
    pub content: NodeContent,
    /// Children, in placement order.
    pub children: Vec<LayoutNode>,
    /// Set on the root of a laid-out tree.
    pub root: bool,
    /// The computed box, relative to the parent's origin.
    pub layout: Option<ComputedBox>,
}

impl LayoutNode {
    /// An empty passthrough node.
    pub fn new() -> Self {
        Self::default()
    }

    /// A grid container with the given `grid-template`.
    pub fn grid(template: &str) -> Self {
        Self::new()
            .with_style(Style::DISPLAY, "grid")
            .with_style(Style::GRID_TEMPLATE, template)
    }

    /// A text leaf.
    pub fn text(text: impl Into<String>, font_size: f64) -> Self {
        Self {
            content: NodeContent::Text {
                text: text.into(),
                font_size,
            },
            ..Self::default()
        }
    }

    /// A leaf with a fixed intrinsic size.
    pub fn fixed(width: f64, height: f64) -> Self {
        Self {
            content: NodeContent::Fixed(Size::new(width, height)),
            ..Self::default()
        }
    }

    /// Sets the node name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets one style key.
    #[must_use]
    pub fn with_style(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.style.set(key, value);
        self
    }

    /// Sets the `grid-area` of this node.
    #[must_use]
    pub fn with_area(self, area: &str) -> Self {
        self.with_style(Style::GRID_AREA, area)
    }

    /// Appends a child.
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Appends children.
    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = Self>) -> Self {
        self.children.extend(children);
        self
    }

    /// Finds the first node named `name`, in pre-order.
    pub fn find(&self, name: &str) -> Option<&Self> {
        if self.name.as_deref() == Some(name) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(name))
    }

    /// Returns the node at `path` (child indices from this node).
    pub fn descendant(&self, path: &[usize]) -> Option<&Self> {
        path.iter()
            .try_fold(self, |node, &i| node.children.get(i))
    }

    /// Returns the box of the node at `path` in this node's coordinate space.
    ///
    /// This node's own offset is not included. Returns `None` if the path does not exist
    /// or the tree has not been laid out.
    pub fn absolute_box(&self, path: &[usize]) -> Option<ComputedBox> {
        let mut node = self;
        let mut origin = (0.0, 0.0);
        let mut out = None;
        for &i in path {
            node = node.children.get(i)?;
            let b = node.layout?;
            let abs = b.translate(origin.0, origin.1);
            origin = (abs.x, abs.y);
            out = Some(abs);
        }
        out.or_else(|| self.layout.map(|b| ComputedBox::new(0.0, 0.0, b.width, b.height)))
    }

    /// Visits every laid-out node in pre-order with its box in root coordinates.
    ///
    /// Nodes without a layout are skipped together with their subtree.
    pub fn walk<'a>(&'a self, mut visit: impl FnMut(&'a Self, ComputedBox, usize)) {
        fn go<'a>(
            node: &'a LayoutNode,
            origin: (f64, f64),
            depth: usize,
            visit: &mut impl FnMut(&'a LayoutNode, ComputedBox, usize),
        ) {
            let Some(b) = node.layout else {
                return;
            };
            let abs = b.translate(origin.0, origin.1);
            visit(node, abs, depth);
            for child in &node.children {
                go(child, (abs.x, abs.y), depth + 1, visit);
            }
        }
        go(self, (0.0, 0.0), 0, &mut visit);
    }

    /// Counts this node and all descendants.
    pub fn len(&self) -> usize {
        1 + self.children.iter().map(Self::len).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn laid_out() -> LayoutNode {
        let mut leaf = LayoutNode::new().with_name("leaf");
        leaf.layout = Some(ComputedBox::new(1.0, 2.0, 3.0, 4.0));
        let mut mid = LayoutNode::new().with_name("mid").with_child(leaf);
        mid.layout = Some(ComputedBox::new(10.0, 20.0, 30.0, 40.0));
        let mut root = LayoutNode::new().with_child(mid);
        root.layout = Some(ComputedBox::new(0.0, 0.0, 100.0, 100.0));
        root
    }

    #[test]
    fn absolute_box_accumulates_offsets() {
        let root = laid_out();
        assert_eq!(
            root.absolute_box(&[0, 0]),
            Some(ComputedBox::new(11.0, 22.0, 3.0, 4.0))
        );
        assert_eq!(root.absolute_box(&[0, 5]), None);
    }

    #[test]
    fn walk_visits_in_pre_order() {
        let root = laid_out();
        let mut seen = Vec::new();
        root.walk(|node, b, depth| seen.push((node.name.clone(), b.x, depth)));
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[2], (Some("leaf".into()), 11.0, 2));
        assert_eq!(root.len(), 3);
    }

    #[test]
    fn find_and_descendant() {
        let root = laid_out();
        assert!(root.find("leaf").is_some());
        assert_eq!(root.descendant(&[0]).and_then(|n| n.name.as_deref()), Some("mid"));
        assert!(root.find("missing").is_none());
    }
}
