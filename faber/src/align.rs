// Copyright 2025 the Faber Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Allotted boxes and self-alignment.

use crate::geometry::{ComputedBox, Size};
use crate::placement::GridArea;
use crate::style::SelfAlign;
use crate::track::ResolvedTracks;

/// The box covered by `area`, from resolved column and row tracks.
pub fn allotted_box(
    area: &GridArea,
    columns: &ResolvedTracks,
    rows: &ResolvedTracks,
) -> ComputedBox {
    let cols = area.columns();
    let rws = area.rows();
    let (x, width) = columns.span(cols.start, cols.end);
    let (y, height) = rows.span(rws.start, rws.end);
    ComputedBox::new(x, y, width, height)
}

/// Positions an item of `natural` size inside `allotted`.
///
/// `justify` applies along x and `align` along y. `stretch` takes the allotted extent;
/// the other values keep the natural extent, even when it overflows the allotment.
pub fn align_box(
    allotted: ComputedBox,
    natural: Size,
    justify: SelfAlign,
    align: SelfAlign,
) -> ComputedBox {
    let (x, width) = align_axis(justify, allotted.x, allotted.width, natural.width);
    let (y, height) = align_axis(align, allotted.y, allotted.height, natural.height);
    ComputedBox::new(x, y, width, height)
}

fn align_axis(align: SelfAlign, offset: f64, allotted: f64, natural: f64) -> (f64, f64) {
    match align {
        SelfAlign::Stretch => (offset, allotted),
        SelfAlign::Start => (offset, natural),
        SelfAlign::Center => (offset + 0.5 * (allotted - natural), natural),
        SelfAlign::End => (offset + allotted - natural, natural),
    }
}
