// Copyright 2025 the Faber Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry primitives produced by layout.
//!
//! Positions, sizes, rectangles and circles are `kurbo` types; [`ComputedBox`] is the
//! per-node layout result, stored as origin + extent the way SVG attributes want it.

extern crate alloc;

use alloc::format;
use alloc::string::String;
use core::fmt;

pub use kurbo::{Circle, Point, Rect, Size};

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// The box computed for a node: `x`/`y` are relative to the parent's content origin.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ComputedBox {
    /// Left edge, relative to the parent.
    pub x: f64,
    /// Top edge, relative to the parent.
    pub y: f64,
    /// Width in layout units (typically pixels).
    pub width: f64,
    /// Height in layout units (typically pixels).
    pub height: f64,
}

impl ComputedBox {
    /// The empty box at the origin.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Creates a box from its origin and extent.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a box from a `kurbo` origin point and size.
    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    /// Returns the top-left corner.
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Returns the extent.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Returns the box as a `kurbo` rectangle.
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    /// Returns the center point.
    pub fn center(&self) -> Point {
        Point::new(self.x + 0.5 * self.width, self.y + 0.5 * self.height)
    }

    /// Returns the largest circle centered in this box.
    pub fn inscribed_circle(&self) -> Circle {
        Circle::new(self.center(), 0.5 * self.width.min(self.height).max(0.0))
    }

    /// Moves the box by `(dx, dy)`.
    #[must_use]
    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Snaps both edges of each axis to whole units.
    ///
    /// Edges are rounded independently, so adjacent boxes stay adjacent after snapping.
    #[must_use]
    pub fn round(&self) -> Self {
        let x0 = self.x.round();
        let y0 = self.y.round();
        let x1 = (self.x + self.width).round();
        let y1 = (self.y + self.height).round();
        Self::new(x0, y0, x1 - x0, y1 - y0)
    }

    /// Returns `true` if every field differs by at most `epsilon`.
    pub fn approx_eq(&self, other: &Self, epsilon: f64) -> bool {
        (self.x - other.x).abs() <= epsilon
            && (self.y - other.y).abs() <= epsilon
            && (self.width - other.width).abs() <= epsilon
            && (self.height - other.height).abs() <= epsilon
    }

    /// Serializes the box as SVG `x`/`y`/`width`/`height` attributes.
    pub fn svg_attrs(&self) -> String {
        format!(
            r#"x="{}" y="{}" width="{}" height="{}""#,
            self.x, self.y, self.width, self.height
        )
    }
}

impl fmt::Display for ComputedBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{x: {}, y: {}, width: {}, height: {}}}",
            self.x, self.y, self.width, self.height
        )
    }
}

impl From<ComputedBox> for Rect {
    fn from(value: ComputedBox) -> Self {
        value.rect()
    }
}

impl From<Rect> for ComputedBox {
    fn from(value: Rect) -> Self {
        Self::new(value.x0, value.y0, value.width(), value.height())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_keeps_adjacent_boxes_adjacent() {
        let a = ComputedBox::new(0.0, 0.0, 33.4, 10.0);
        let b = ComputedBox::new(33.4, 0.0, 33.4, 10.0);
        let (ra, rb) = (a.round(), b.round());
        assert_eq!(ra.x + ra.width, rb.x);
        assert_eq!(rb.width, 34.0);
    }

    #[test]
    fn rect_round_trips_through_kurbo() {
        let b = ComputedBox::new(5.0, 6.0, 7.0, 8.0);
        let r: Rect = b.into();
        assert_eq!(r, Rect::new(5.0, 6.0, 12.0, 14.0));
        assert_eq!(ComputedBox::from(r), b);
    }

    #[test]
    fn inscribed_circle_uses_shorter_side() {
        let c = ComputedBox::new(0.0, 0.0, 20.0, 10.0).inscribed_circle();
        assert_eq!(c.center, Point::new(10.0, 5.0));
        assert_eq!(c.radius, 5.0);
    }

    #[test]
    fn svg_attrs_lists_geometry() {
        let b = ComputedBox::new(1.0, 2.5, 3.0, 4.0);
        assert_eq!(b.svg_attrs(), r#"x="1" y="2.5" width="3" height="4""#);
    }
}
