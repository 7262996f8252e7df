// Copyright 2025 the Faber Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart titles.

extern crate alloc;

use alloc::string::String;

use faber::{ComputedBox, LayoutNode, Style};
use peniko::Color;

use crate::component::{ComponentKind, ComponentRegistry};
use crate::mark::{Mark, TextAnchor, TextBaseline, TextMark};
use crate::z_order;

/// A chart-level title.
#[derive(Clone, Debug, PartialEq)]
pub struct TitleSpec {
    /// Title text (unshaped).
    pub text: String,
    /// Font size; the registry's title size when `None`.
    pub font_size: Option<f64>,
    /// Text color; the registry's text color when `None`.
    pub color: Option<Color>,
}

impl TitleSpec {
    /// Layout node name of the title.
    pub const NAME: &'static str = "title";

    /// Creates a title with registry defaults.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font_size: None,
            color: None,
        }
    }

    /// Sets the font size.
    #[must_use]
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = Some(font_size);
        self
    }

    /// Sets the text color.
    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    fn font_size(&self, registry: &ComponentRegistry) -> f64 {
        self.font_size.unwrap_or(registry.title_font_size)
    }

    /// The title's layout node, placed at `area`.
    pub fn node(&self, registry: &ComponentRegistry, area: &str) -> LayoutNode {
        registry
            .text(
                ComponentKind::Title,
                self.text.clone(),
                self.font_size(registry),
                &Style::new().with(Style::GRID_AREA, area),
            )
            .with_name(Self::NAME)
    }

    /// The title mark, given the title's laid-out box.
    pub fn mark(&self, registry: &ComponentRegistry, laid_out: ComputedBox) -> Mark {
        let text = TextMark {
            pos: (laid_out.x, laid_out.center().y).into(),
            text: self.text.clone(),
            font_size: self.font_size(registry),
            anchor: TextAnchor::Start,
            baseline: TextBaseline::Middle,
            fill: self.color.unwrap_or(registry.text_color).into(),
        };
        Mark::text(text, z_order::TITLES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MarkPayload;

    #[test]
    fn node_carries_area_and_font() {
        let registry = ComponentRegistry::new();
        let node = TitleSpec::new("Sales").node(&registry, "1 / 1 / 2 / 4");
        assert_eq!(node.name.as_deref(), Some("title"));
        assert_eq!(node.style.get(Style::GRID_AREA), Some("1 / 1 / 2 / 4"));
        assert_eq!(node.style.get(Style::PLACE_SELF), Some("center"));
    }

    #[test]
    fn mark_sits_on_the_box_midline() {
        let registry = ComponentRegistry::new();
        let title = TitleSpec::new("Sales").with_font_size(20.0);
        let mark = title.mark(&registry, ComputedBox::new(40.0, 0.0, 60.0, 20.0));
        assert_eq!(mark.z_index, z_order::TITLES);
        let MarkPayload::Text(text) = mark.payload else {
            panic!("title should be a text mark");
        };
        assert_eq!((text.pos.x, text.pos.y), (40.0, 10.0));
        assert_eq!(text.font_size, 20.0);
    }
}
