// Copyright 2025 the Faber Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end layout tests over small trees.

extern crate alloc;

use alloc::vec::Vec;

use crate::{
    ComputedBox, HeuristicMeasure, LayoutConfig, LayoutNode, Size, Style, TrackSizing, ZeroFlex,
    compute_layout, compute_layout_with, grid_tracks, measure_tree,
};

fn boxes(node: &LayoutNode) -> Vec<ComputedBox> {
    node.children.iter().filter_map(|c| c.layout).collect()
}

fn layout_of(node: &LayoutNode) -> ComputedBox {
    node.layout.unwrap_or_else(|| panic!("node {:?} was not laid out", node.name))
}

fn chart_like() -> LayoutNode {
    LayoutNode::grid("auto 1fr auto / auto 1fr auto")
        .with_name("chart")
        .with_child(LayoutNode::text("Title", 14.0).with_area("1 / 2"))
        .with_child(LayoutNode::fixed(30.0, 10.0).with_area("2 / 1"))
        .with_child(LayoutNode::new().with_name("plot").with_area("2 / 2"))
        .with_child(LayoutNode::fixed(40.0, 60.0).with_area("2 / 3"))
        .with_child(LayoutNode::fixed(10.0, 20.0).with_area("3 / 2"))
}

#[test]
fn layout_is_deterministic() {
    let tree = chart_like();
    let a = compute_layout(&tree, Size::new(400.0, 300.0));
    let b = compute_layout(&tree, Size::new(400.0, 300.0));
    assert_eq!(a, b);
}

#[test]
fn input_tree_is_not_mutated() {
    let tree = chart_like();
    let before = tree.clone();
    let out = compute_layout(&tree, Size::new(400.0, 300.0));
    assert_eq!(tree, before);
    assert!(tree.layout.is_none() && !tree.root);
    assert!(out.root);
    assert!(!out.children[0].root);
    out.walk(|node, _, _| assert!(node.layout.is_some()));
    assert_eq!(out.len(), tree.len());
}

#[test]
fn auto_columns_conserve_content_width() {
    let tree = LayoutNode::grid("auto / auto auto")
        .with_child(LayoutNode::fixed(40.0, 10.0))
        .with_child(LayoutNode::fixed(60.0, 10.0));
    let measure = HeuristicMeasure;
    let config = LayoutConfig::default();

    let tracks = grid_tracks(&tree, Size::new(300.0, 100.0), &measure, &config);
    let widths: Vec<f64> = tracks.columns.sizes().collect();
    assert_eq!(widths, [40.0, 60.0]);

    let natural = measure_tree(&tree, &measure, &config).natural;
    assert_eq!(tracks.columns.total(), natural.width);
    assert_eq!(natural.height, 10.0);
}

#[test]
fn flexible_columns_split_by_weight() {
    let tree = LayoutNode::grid("auto / 1fr 2fr")
        .with_child(LayoutNode::new())
        .with_child(LayoutNode::new());
    let out = compute_layout(&tree, Size::new(90.0, 20.0));
    let b = boxes(&out);
    assert_eq!((b[0].x, b[0].width), (0.0, 30.0));
    assert_eq!((b[1].x, b[1].width), (30.0, 60.0));
}

#[test]
fn spanning_item_covers_both_columns() {
    let tree = LayoutNode::grid("auto / 1fr 2fr")
        .with_child(LayoutNode::fixed(10.0, 10.0).with_area("1 / 1 / 1 / 3"));
    let out = compute_layout(&tree, Size::new(90.0, 20.0));
    let b = layout_of(&out.children[0]);
    assert_eq!((b.x, b.width), (0.0, 90.0));
    assert_eq!(b.height, 10.0);
}

#[test]
fn centered_item_sits_in_the_middle() {
    let tree = LayoutNode::grid("50px / 50px")
        .with_child(LayoutNode::fixed(10.0, 10.0).with_style(Style::PLACE_SELF, "center"));
    let out = compute_layout(&tree, Size::new(50.0, 50.0));
    assert_eq!(
        layout_of(&out.children[0]),
        ComputedBox::new(20.0, 20.0, 10.0, 10.0)
    );
}

#[test]
fn auto_placement_wraps_onto_implicit_rows() {
    let tree = LayoutNode::grid("auto / 1fr 1fr")
        .with_children((0..4).map(|_| LayoutNode::fixed(10.0, 10.0)));
    let out = compute_layout(&tree, Size::new(100.0, 100.0));
    let origins: Vec<(f64, f64)> = boxes(&out).iter().map(|b| (b.x, b.y)).collect();
    assert_eq!(origins, [(0.0, 0.0), (50.0, 0.0), (0.0, 10.0), (50.0, 10.0)]);
    assert!(boxes(&out).iter().all(|b| b.width == 50.0 && b.height == 10.0));
}

#[test]
fn overflowing_fixed_tracks_leave_flex_at_zero() {
    let tree = LayoutNode::grid("auto / 80px 1fr")
        .with_child(LayoutNode::new())
        .with_child(LayoutNode::new());
    let out = compute_layout(&tree, Size::new(50.0, 20.0));
    let b = boxes(&out);
    assert_eq!((b[1].x, b[1].width), (80.0, 0.0));
}

#[test]
fn malformed_values_fall_back() {
    let tree = LayoutNode::grid("auto / banana 1fr")
        .with_child(LayoutNode::fixed(30.0, 5.0).with_area("nonsense"))
        .with_child(
            LayoutNode::new()
                .with_style(Style::PLACE_SELF, "sideways")
                .with_style(Style::WIDTH, "wide"),
        );
    let out = compute_layout(&tree, Size::new(100.0, 20.0));
    let b = boxes(&out);
    // `banana` sizes as `auto`, the bad area lands on the origin cell.
    assert_eq!(b[0], ComputedBox::new(0.0, 0.0, 30.0, 5.0));
    // The second item skips the taken cell and stretches.
    assert_eq!(b[1], ComputedBox::new(30.0, 0.0, 70.0, 5.0));
}

#[test]
fn missing_style_is_passthrough() {
    let tree = LayoutNode::new()
        .with_child(LayoutNode::fixed(10.0, 10.0))
        .with_child(LayoutNode::fixed(20.0, 5.0).with_style(Style::PLACE_SELF, "end"));
    let out = compute_layout(&tree, Size::new(60.0, 40.0));
    let b = boxes(&out);
    assert_eq!(b[0], ComputedBox::new(0.0, 0.0, 60.0, 40.0));
    assert_eq!(b[1], ComputedBox::new(40.0, 35.0, 20.0, 5.0));
    assert_eq!(
        measure_tree(&tree, &HeuristicMeasure, &LayoutConfig::default()).natural,
        Size::new(20.0, 10.0)
    );
}

#[test]
fn explicit_areas_grow_implicit_tracks() {
    let tree = LayoutNode::grid("auto / auto")
        .with_child(LayoutNode::fixed(4.0, 4.0).with_area("3 / 2"));
    let config = LayoutConfig::default().with_implicit_track(TrackSizing::Fixed(10.0));
    let out = compute_layout_with(&tree, Size::new(100.0, 100.0), &HeuristicMeasure, &config);
    assert_eq!(
        layout_of(&out.children[0]),
        ComputedBox::new(0.0, 10.0, 10.0, 10.0)
    );
}

#[test]
fn min_content_column_uses_longest_word() {
    let tree = LayoutNode::grid("auto / min-content 1fr")
        .with_child(LayoutNode::text("ab cdef", 10.0))
        .with_child(LayoutNode::new());
    let out = compute_layout(&tree, Size::new(200.0, 50.0));
    let b = boxes(&out);
    assert!((b[0].width - 24.0).abs() < 1e-9);
    assert!((b[1].x - 24.0).abs() < 1e-9);
    assert!((b[1].width - 176.0).abs() < 1e-9);
    assert_eq!(b[0].height, 10.0);
}

#[test]
fn nested_grids_measure_then_arrange() {
    let inner = LayoutNode::grid("auto auto / auto")
        .with_name("inner")
        .with_child(LayoutNode::fixed(30.0, 10.0))
        .with_child(LayoutNode::fixed(50.0, 10.0));
    let tree = LayoutNode::grid("auto / auto 1fr")
        .with_child(inner)
        .with_child(LayoutNode::new());
    let out = compute_layout(&tree, Size::new(200.0, 40.0));

    assert_eq!(
        out.find("inner").and_then(|n| n.layout),
        Some(ComputedBox::new(0.0, 0.0, 50.0, 20.0))
    );
    assert_eq!(
        out.absolute_box(&[0, 1]),
        Some(ComputedBox::new(0.0, 10.0, 50.0, 10.0))
    );
    assert_eq!(
        layout_of(&out.children[1]),
        ComputedBox::new(50.0, 0.0, 150.0, 20.0)
    );
}

#[test]
fn explicit_size_still_stretches_by_default() {
    let tree = LayoutNode::grid("100px / 100px 100px")
        .with_child(LayoutNode::new().with_style(Style::WIDTH, "40px"))
        .with_child(
            LayoutNode::new()
                .with_style(Style::WIDTH, "40")
                .with_style(Style::JUSTIFY_SELF, "start"),
        );
    let out = compute_layout(&tree, Size::new(300.0, 300.0));
    let b = boxes(&out);
    assert_eq!(b[0], ComputedBox::new(0.0, 0.0, 100.0, 100.0));
    assert_eq!(b[1], ComputedBox::new(100.0, 0.0, 40.0, 100.0));
}

#[test]
fn root_size_comes_from_viewport_or_style() {
    let out = compute_layout(&LayoutNode::new(), Size::new(320.0, 240.0));
    assert_eq!(layout_of(&out), ComputedBox::new(0.0, 0.0, 320.0, 240.0));

    let sized = LayoutNode::new().with_style(Style::HEIGHT, "100");
    let out = compute_layout(&sized, Size::new(320.0, 240.0));
    assert_eq!(layout_of(&out), ComputedBox::new(0.0, 0.0, 320.0, 100.0));
}

#[test]
fn pixel_snapping_keeps_neighbours_adjacent() {
    let tree = LayoutNode::grid("auto / 1fr 1fr 1fr")
        .with_children((0..3).map(|_| LayoutNode::new()));
    let config = LayoutConfig::default().with_snap_to_pixels(true);
    let out = compute_layout_with(&tree, Size::new(100.0, 10.0), &HeuristicMeasure, &config);
    let b = boxes(&out);
    assert_eq!((b[0].x, b[0].width), (0.0, 33.0));
    assert_eq!((b[1].x, b[1].width), (33.0, 34.0));
    assert_eq!((b[2].x, b[2].width), (67.0, 33.0));
}

#[test]
fn zero_weight_flex_policy_applies_to_layout() {
    let tree = LayoutNode::grid("auto / 0fr 0fr")
        .with_child(LayoutNode::new())
        .with_child(LayoutNode::new());
    let config = LayoutConfig::default().with_zero_flex(ZeroFlex::ShareEqually);
    let out = compute_layout_with(&tree, Size::new(80.0, 10.0), &HeuristicMeasure, &config);
    assert_eq!(boxes(&out)[1].x, 40.0);

    let out = compute_layout(&tree, Size::new(80.0, 10.0));
    assert!(boxes(&out).iter().all(|b| b.width == 0.0));
}

#[test]
fn custom_measure_drives_auto_tracks() {
    let tree = LayoutNode::grid("auto / auto 1fr")
        .with_child(LayoutNode::text("anything", 12.0))
        .with_child(LayoutNode::new());
    let wide = |_: &crate::NodeContent| crate::IntrinsicSize::fixed(Size::new(70.0, 12.0));
    let out = compute_layout_with(&tree, Size::new(100.0, 20.0), &wide, &LayoutConfig::default());
    assert_eq!(boxes(&out)[1], ComputedBox::new(70.0, 0.0, 30.0, 12.0));
}

#[test]
fn out_of_range_lines_land_on_the_origin_cell() {
    let tree = LayoutNode::grid("10px / 10px")
        .with_child(LayoutNode::new().with_area("1 / 1 / 2 / 200000000"))
        .with_child(LayoutNode::new().with_area("1 / 1 / 2 / 4294967295"))
        .with_child(LayoutNode::new().with_area("1 / 2 / span 1000 / span 1000"));
    let out = compute_layout(&tree, Size::new(100.0, 100.0));
    let b = boxes(&out);
    assert_eq!(b[0], ComputedBox::new(0.0, 0.0, 10.0, 10.0));
    assert_eq!(b[1], ComputedBox::new(0.0, 0.0, 10.0, 10.0));
    assert_eq!((b[2].x, b[2].width, b[2].height), (10.0, 0.0, 10.0));

    // The largest accepted span grows the grid to a bounded number of implicit tracks.
    let tracks = grid_tracks(
        &tree,
        Size::new(100.0, 100.0),
        &HeuristicMeasure,
        &LayoutConfig::default(),
    );
    assert_eq!((tracks.rows.len(), tracks.columns.len()), (1000, 1001));
}
