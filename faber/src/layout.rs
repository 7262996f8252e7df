// Copyright 2025 the Faber Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The layout driver.
//!
//! Layout is a two-pass process over the whole tree:
//! - **Measure** walks bottom-up and caches, for every node, its resolved style, its grid
//!   plan (track sizing functions and child areas) and its [`IntrinsicSize`].
//! - **Arrange** walks top-down. Every container resolves its tracks against the box its
//!   parent allotted to it, aligns each child inside the child's allotment and recurses.
//!
//! Passthrough nodes behave like a grid with a single `1fr` track per axis: content-sized
//! while measuring, and handing their whole box to every child while arranging.

extern crate alloc;

use alloc::vec;
use alloc::vec::Vec;

use crate::align::{align_box, allotted_box};
use crate::geometry::{ComputedBox, Size};
use crate::measure::{HeuristicMeasure, IntrinsicSize, Measure};
use crate::node::LayoutNode;
use crate::placement::{GridArea, place_items};
use crate::style::{ResolvedStyle, TrackSizing};
use crate::track::{ResolvedTracks, TrackItem, ZeroFlex, size_tracks};

/// Engine-wide knobs. The defaults follow CSS wherever CSS has an answer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutConfig {
    /// Policy for leftover space when every `fr` weight is zero.
    pub zero_flex: ZeroFlex,
    /// Sizing function of tracks created by placement beyond the declared template.
    pub implicit_track: TrackSizing,
    /// Round every computed box edge to whole pixels.
    pub snap_to_pixels: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            zero_flex: ZeroFlex::Unallocated,
            implicit_track: TrackSizing::Auto,
            snap_to_pixels: false,
        }
    }
}

impl LayoutConfig {
    /// Sets the zero-weight `fr` policy.
    #[must_use]
    pub fn with_zero_flex(mut self, zero_flex: ZeroFlex) -> Self {
        self.zero_flex = zero_flex;
        self
    }

    /// Sets the sizing function of implicit tracks.
    #[must_use]
    pub fn with_implicit_track(mut self, sizing: TrackSizing) -> Self {
        self.implicit_track = sizing;
        self
    }

    /// Enables or disables pixel snapping.
    #[must_use]
    pub fn with_snap_to_pixels(mut self, snap: bool) -> Self {
        self.snap_to_pixels = snap;
        self
    }
}

/// Resolved tracks of a container, as returned by [`grid_tracks`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GridTracks {
    /// Column tracks, left to right.
    pub columns: ResolvedTracks,
    /// Row tracks, top to bottom.
    pub rows: ResolvedTracks,
}

/// Lays out `tree` in a viewport, with heuristic text metrics and default config.
///
/// Returns a new tree; the input is left untouched.
pub fn compute_layout(tree: &LayoutNode, viewport: Size) -> LayoutNode {
    compute_layout_with(tree, viewport, &HeuristicMeasure, &LayoutConfig::default())
}

/// Lays out `tree` in a viewport.
///
/// The root is sized to the viewport unless it declares an explicit `width` or `height`.
/// Every node of the returned tree has `layout` set, relative to its parent's origin.
pub fn compute_layout_with(
    tree: &LayoutNode,
    viewport: Size,
    measure: &impl Measure,
    config: &LayoutConfig,
) -> LayoutNode {
    let measured = measure_node(tree, measure, config);
    let root_box = ComputedBox::new(
        0.0,
        0.0,
        measured.style.width.unwrap_or(viewport.width),
        measured.style.height.unwrap_or(viewport.height),
    );
    let mut out = arrange(tree, &measured, snap(root_box, config), config);
    out.root = true;
    out
}

/// Returns the intrinsic size of `tree` without arranging it.
pub fn measure_tree(
    tree: &LayoutNode,
    measure: &impl Measure,
    config: &LayoutConfig,
) -> IntrinsicSize {
    measure_node(tree, measure, config).intrinsic
}

/// Resolves the tracks `node` would use when given a box of `size`.
///
/// Leaves resolve to empty track lists.
pub fn grid_tracks(
    node: &LayoutNode,
    size: Size,
    measure: &impl Measure,
    config: &LayoutConfig,
) -> GridTracks {
    let measured = measure_node(node, measure, config);
    match &measured.plan {
        Some(plan) => resolve_tracks(plan, &measured.children, size, config),
        None => GridTracks::default(),
    }
}

/// Track sizing functions and child areas of a container.
#[derive(Debug)]
struct GridPlan {
    columns: Vec<TrackSizing>,
    rows: Vec<TrackSizing>,
    areas: Vec<GridArea>,
}

/// A node after the measure pass.
#[derive(Debug)]
struct Measured {
    style: ResolvedStyle,
    plan: Option<GridPlan>,
    intrinsic: IntrinsicSize,
    children: Vec<Measured>,
}

fn measure_node(node: &LayoutNode, measure: &impl Measure, config: &LayoutConfig) -> Measured {
    let style = ResolvedStyle::resolve(&node.style);
    let children: Vec<Measured> = node
        .children
        .iter()
        .map(|c| measure_node(c, measure, config))
        .collect();

    let (plan, mut intrinsic) = if children.is_empty() && !style.display.is_grid() {
        let intrinsic = measure.measure(&node.content);
        #[cfg(feature = "tracing")]
        tracing::trace!(name = ?node.name, ?intrinsic, "measured content");
        (None, intrinsic)
    } else {
        let plan = plan_grid(&style, &children, config);
        let natural = content_size(&plan, &children, config, |s| s.natural);
        let min_content = content_size(&plan, &children, config, |s| s.min_content);
        (
            Some(plan),
            IntrinsicSize {
                natural,
                min_content,
            },
        )
    };

    if let Some(width) = style.width {
        intrinsic.natural.width = width;
        intrinsic.min_content.width = width;
    }
    if let Some(height) = style.height {
        intrinsic.natural.height = height;
        intrinsic.min_content.height = height;
    }

    Measured {
        style,
        plan,
        intrinsic,
        children,
    }
}

fn plan_grid(style: &ResolvedStyle, children: &[Measured], config: &LayoutConfig) -> GridPlan {
    if !style.display.is_grid() {
        return GridPlan {
            columns: vec![TrackSizing::Flex(1.0)],
            rows: vec![TrackSizing::Flex(1.0)],
            areas: vec![GridArea::ORIGIN; children.len()],
        };
    }

    let explicit: Vec<Option<GridArea>> = children.iter().map(|c| c.style.area).collect();
    let template = &style.template;
    let placement = place_items(&explicit, template.rows.len(), template.columns.len());
    GridPlan {
        columns: with_implicit(&template.columns, placement.col_count, config.implicit_track),
        rows: with_implicit(&template.rows, placement.row_count, config.implicit_track),
        areas: placement.areas,
    }
}

fn with_implicit(
    declared: &[TrackSizing],
    count: usize,
    implicit: TrackSizing,
) -> Vec<TrackSizing> {
    let mut tracks = declared.to_vec();
    if tracks.len() < count {
        tracks.resize(count, implicit);
    }
    tracks
}

/// Per-axis track items, with `pick` choosing which intrinsic size contributes.
fn track_items(
    plan: &GridPlan,
    children: &[Measured],
    pick: impl Fn(&IntrinsicSize) -> Size,
) -> (Vec<TrackItem>, Vec<TrackItem>) {
    plan.areas
        .iter()
        .zip(children)
        .map(|(area, child)| {
            let natural = pick(&child.intrinsic);
            let min = child.intrinsic.min_content;
            let cols = area.columns();
            let rows = area.rows();
            (
                TrackItem {
                    start: cols.start,
                    end: cols.end,
                    natural: natural.width,
                    min_content: min.width,
                },
                TrackItem {
                    start: rows.start,
                    end: rows.end,
                    natural: natural.height,
                    min_content: min.height,
                },
            )
        })
        .unzip()
}

fn content_size(
    plan: &GridPlan,
    children: &[Measured],
    config: &LayoutConfig,
    pick: impl Fn(&IntrinsicSize) -> Size,
) -> Size {
    let (cols, rows) = track_items(plan, children, pick);
    Size::new(
        size_tracks(&plan.columns, &cols, None, config.zero_flex).total(),
        size_tracks(&plan.rows, &rows, None, config.zero_flex).total(),
    )
}

fn resolve_tracks(
    plan: &GridPlan,
    children: &[Measured],
    size: Size,
    config: &LayoutConfig,
) -> GridTracks {
    let (cols, rows) = track_items(plan, children, |s| s.natural);
    GridTracks {
        columns: size_tracks(&plan.columns, &cols, Some(size.width), config.zero_flex),
        rows: size_tracks(&plan.rows, &rows, Some(size.height), config.zero_flex),
    }
}

fn snap(b: ComputedBox, config: &LayoutConfig) -> ComputedBox {
    if config.snap_to_pixels { b.round() } else { b }
}

fn arrange(
    node: &LayoutNode,
    measured: &Measured,
    own: ComputedBox,
    config: &LayoutConfig,
) -> LayoutNode {
    #[cfg(feature = "tracing")]
    tracing::debug!(name = ?node.name, layout = %own, "attached box");

    let children = match &measured.plan {
        Some(plan) => {
            let tracks = resolve_tracks(plan, &measured.children, own.size(), config);
            node.children
                .iter()
                .zip(&measured.children)
                .zip(&plan.areas)
                .map(|((child, m), area)| {
                    let allotted = allotted_box(area, &tracks.columns, &tracks.rows);
                    let placed = align_box(
                        allotted,
                        m.intrinsic.natural,
                        m.style.justify(),
                        m.style.align(),
                    );
                    arrange(child, m, snap(placed, config), config)
                })
                .collect()
        }
        None => Vec::new(),
    };

    LayoutNode {
        name: node.name.clone(),
        style: node.style.clone(),
        content: node.content.clone(),
        children,
        root: false,
        layout: Some(own),
    }
}
