// Copyright 2025 the Faber Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Content measurement hooks.
//!
//! Layout needs the unconstrained size of leaf content (text runs, symbols) before it can
//! size `auto` and `min-content` tracks. Shaping and rasterization live downstream, so the
//! engine asks a [`Measure`] implementation instead of measuring anything itself.

extern crate alloc;

use alloc::string::String;

use crate::geometry::Size;

/// What a leaf node draws, as far as layout is concerned.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum NodeContent {
    /// Nothing; sized by style and children only.
    #[default]
    Empty,
    /// A single line of unshaped text.
    Text {
        /// The text to measure.
        text: String,
        /// Font size in layout units.
        font_size: f64,
    },
    /// A shape with a known intrinsic size (a legend swatch, a symbol).
    Fixed(Size),
}

/// A node's size before any space is allotted to it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct IntrinsicSize {
    /// The unconstrained size.
    pub natural: Size,
    /// The smallest size the content can take without overflowing.
    pub min_content: Size,
}

impl IntrinsicSize {
    /// An intrinsic size whose natural and min-content sizes agree.
    pub fn fixed(size: Size) -> Self {
        Self {
            natural: size,
            min_content: size,
        }
    }
}

/// Measures leaf content.
///
/// Implement this to plug real text metrics (e.g. a shaping engine) into layout.
pub trait Measure {
    /// Returns the natural and min-content size of `content`.
    fn measure(&self, content: &NodeContent) -> IntrinsicSize;
}

impl<F: Fn(&NodeContent) -> IntrinsicSize> Measure for F {
    fn measure(&self, content: &NodeContent) -> IntrinsicSize {
        self(content)
    }
}

/// A tiny heuristic measurer suitable for demos and tests.
///
/// Text is assumed to use an average glyph width of 0.6em and a line height of 1em.
/// The min-content box breaks at every space: as wide as the longest word, one line per word.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicMeasure;

impl HeuristicMeasure {
    const GLYPH_WIDTH_EM: f64 = 0.6;
}

impl Measure for HeuristicMeasure {
    fn measure(&self, content: &NodeContent) -> IntrinsicSize {
        match content {
            NodeContent::Empty => IntrinsicSize::default(),
            NodeContent::Fixed(size) => IntrinsicSize::fixed(*size),
            NodeContent::Text { text, font_size } => {
                let glyph = Self::GLYPH_WIDTH_EM * font_size;
                let width = glyph * text.chars().count() as f64;
                let (longest, words) = text
                    .split_whitespace()
                    .fold((0_usize, 0_usize), |(longest, words), w| {
                        (longest.max(w.chars().count()), words + 1)
                    });
                IntrinsicSize {
                    natural: Size::new(width, *font_size),
                    min_content: Size::new(glyph * longest as f64, font_size * words.max(1) as f64),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_breaks_at_spaces_for_min_content() {
        let m = HeuristicMeasure.measure(&NodeContent::Text {
            text: "ab cdef".into(),
            font_size: 10.0,
        });
        assert!((m.natural.width - 42.0).abs() < 1e-9);
        assert_eq!(m.natural.height, 10.0);
        assert!((m.min_content.width - 24.0).abs() < 1e-9);
        assert_eq!(m.min_content.height, 20.0);
    }

    #[test]
    fn closures_measure_too() {
        let m = |_: &NodeContent| IntrinsicSize::fixed(Size::new(3.0, 4.0));
        assert_eq!(m.measure(&NodeContent::Empty).natural, Size::new(3.0, 4.0));
    }
}
