// Copyright 2025 the Faber Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Positioned marks, the output of chart rendering.
//!
//! Marks are plain values in scene coordinates. They carry no identity: a [`crate::ChartScene`]
//! is rebuilt from scratch whenever the chart or the viewport changes.

extern crate alloc;

use alloc::string::String;

use kurbo::{Circle, Line, Point, Rect, Shape};
use peniko::Brush;

/// Horizontal text anchor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAnchor {
    /// Text starts at the position.
    #[default]
    Start,
    /// Text is centered on the position.
    Middle,
    /// Text ends at the position.
    End,
}

/// Vertical text baseline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextBaseline {
    /// The position is the vertical middle of the text.
    #[default]
    Middle,
    /// The position is the alphabetic baseline.
    Alphabetic,
    /// The position is the top of the text.
    Hanging,
}

/// A single run of unshaped text.
#[derive(Clone, Debug, PartialEq)]
pub struct TextMark {
    /// Anchor position.
    pub pos: Point,
    /// The text.
    pub text: String,
    /// Font size in scene units.
    pub font_size: f64,
    /// Horizontal anchor.
    pub anchor: TextAnchor,
    /// Vertical baseline.
    pub baseline: TextBaseline,
    /// Fill paint.
    pub fill: Brush,
}

/// What a mark draws.
#[derive(Clone, Debug, PartialEq)]
pub enum MarkPayload {
    /// A filled rectangle.
    Rect {
        /// Geometry.
        rect: Rect,
        /// Fill paint.
        fill: Brush,
    },
    /// A filled circle.
    Circle {
        /// Geometry.
        circle: Circle,
        /// Fill paint.
        fill: Brush,
    },
    /// A stroked line segment.
    Line {
        /// Geometry.
        line: Line,
        /// Stroke paint.
        stroke: Brush,
        /// Stroke width.
        stroke_width: f64,
    },
    /// Text.
    Text(TextMark),
}

/// A positioned, painted mark with a paint order.
#[derive(Clone, Debug, PartialEq)]
pub struct Mark {
    /// Paint order; see [`crate::z_order`].
    pub z_index: i32,
    /// What to draw.
    pub payload: MarkPayload,
}

impl Mark {
    /// A filled rectangle.
    pub fn rect(rect: Rect, fill: impl Into<Brush>, z_index: i32) -> Self {
        Self {
            z_index,
            payload: MarkPayload::Rect {
                rect,
                fill: fill.into(),
            },
        }
    }

    /// A filled circle.
    pub fn circle(circle: Circle, fill: impl Into<Brush>, z_index: i32) -> Self {
        Self {
            z_index,
            payload: MarkPayload::Circle {
                circle,
                fill: fill.into(),
            },
        }
    }

    /// A stroked line segment.
    pub fn line(line: Line, stroke: impl Into<Brush>, stroke_width: f64, z_index: i32) -> Self {
        Self {
            z_index,
            payload: MarkPayload::Line {
                line,
                stroke: stroke.into(),
                stroke_width,
            },
        }
    }

    /// A text mark.
    pub fn text(text: TextMark, z_index: i32) -> Self {
        Self {
            z_index,
            payload: MarkPayload::Text(text),
        }
    }

    /// Geometric bounds, or `None` for text (which has no metrics here).
    pub fn bounds(&self) -> Option<Rect> {
        match &self.payload {
            MarkPayload::Rect { rect, .. } => Some(*rect),
            MarkPayload::Circle { circle, .. } => Some(circle.bounding_box()),
            MarkPayload::Line { line, .. } => Some(line.bounding_box()),
            MarkPayload::Text(_) => None,
        }
    }
}
