// Copyright 2025 the Faber Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Faber: a small CSS-grid-like layout engine for chart trees.
//!
//! Faber takes a tree of [`LayoutNode`]s annotated with grid properties
//! (`grid-template`, `grid-area`, `place-self`, explicit `width`/`height`) and computes a
//! [`ComputedBox`] for every node, in the coordinate space of its parent.
//!
//! Layout runs in two passes:
//! - **Measure**: bottom-up, every node's natural and min-content size is computed from its
//!   content and its children's contributions.
//! - **Arrange**: top-down, every grid container resolves its tracks against the space it
//!   was allotted, places its children and recurses into them with their final boxes.
//!
//! The supported grid vocabulary is deliberately small: fixed, `auto`, `min-content` and
//! `fr` tracks, explicit or row-major auto placement, and `start`/`center`/`end`/`stretch`
//! self-alignment. Gaps, named lines and areas, `minmax()`, `repeat()` and flexbox are not
//! supported; `display: flex` is routed to the grid algorithm.
//!
//! ```
//! use faber::{LayoutNode, Size, compute_layout};
//!
//! let tree = LayoutNode::grid("auto / 1fr 2fr")
//!     .with_child(LayoutNode::new())
//!     .with_child(LayoutNode::new());
//! let laid_out = compute_layout(&tree, Size::new(90.0, 20.0));
//! let second = laid_out.children[1].layout.unwrap();
//! assert_eq!((second.x, second.width), (30.0, 60.0));
//! ```

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod align;
#[cfg(not(feature = "std"))]
mod float;
mod geometry;
mod layout;
#[cfg(test)]
mod layout_tests;
mod measure;
mod node;
mod placement;
mod style;
mod track;

pub use align::{align_box, allotted_box};
pub use geometry::{Circle, ComputedBox, Point, Rect, Size};
pub use layout::{
    GridTracks, LayoutConfig, compute_layout, compute_layout_with, grid_tracks, measure_tree,
};
pub use measure::{HeuristicMeasure, IntrinsicSize, Measure, NodeContent};
pub use node::LayoutNode;
pub use placement::{GridArea, Placement, place_items};
pub use style::{
    Display, GridLineEnd, GridPlacement, GridTemplate, PlaceSelf, ResolvedStyle, SelfAlign, Style,
    StyleError, TrackSizing,
};
pub use track::{Axis, ResolvedTracks, Track, TrackItem, ZeroFlex, size_tracks};
