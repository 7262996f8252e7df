// Copyright 2025 the Faber Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Legends.
//!
//! A legend is a two-column grid: every entry contributes a swatch and a label, and
//! auto-placement wraps each pair onto its own row. Marks are read straight off the laid-out
//! swatch and label boxes.

extern crate alloc;

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use faber::{ComputedBox, LayoutNode, NodeContent, Size, Style};
use peniko::Color;

use crate::component::{ComponentKind, ComponentRegistry};
use crate::mark::{Mark, TextAnchor, TextBaseline, TextMark};
use crate::z_order;

/// A legend entry: a label and its solid color.
#[derive(Clone, Debug, PartialEq)]
pub struct LegendItem {
    /// Label text.
    pub label: String,
    /// Swatch color.
    pub color: Color,
}

impl LegendItem {
    /// Creates a solid-color entry.
    pub fn solid(label: impl Into<String>, color: Color) -> Self {
        Self {
            label: label.into(),
            color,
        }
    }
}

/// A swatch legend.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LegendSpec {
    /// Entries in display order.
    pub items: Vec<LegendItem>,
}

impl LegendSpec {
    /// Layout node name of the legend container.
    pub const NAME: &'static str = "legend";

    /// Creates a legend from its entries.
    pub fn new(items: impl IntoIterator<Item = LegendItem>) -> Self {
        Self {
            items: items.into_iter().collect(),
        }
    }

    /// Layout node name of entry `index`'s swatch.
    pub fn swatch_name(index: usize) -> String {
        format!("legend-swatch-{index}")
    }

    /// Layout node name of entry `index`'s label.
    pub fn label_name(index: usize) -> String {
        format!("legend-label-{index}")
    }

    /// The legend layout node, placed at `area`.
    pub fn node(&self, registry: &ComponentRegistry, area: &str) -> LayoutNode {
        let swatch = registry.swatch_size;
        // The swatch column leaves padding on both sides of the swatch.
        let template = format!("auto / {}px auto", swatch + 2.0 * registry.label_padding);
        let overrides = Style::new()
            .with(Style::GRID_AREA, area)
            .with(Style::GRID_TEMPLATE, template);

        let mut legend = registry
            .node(ComponentKind::Legend, &overrides)
            .with_name(Self::NAME);
        for (i, item) in self.items.iter().enumerate() {
            let mut sw = registry
                .node(ComponentKind::LegendSwatch, &Style::new())
                .with_name(Self::swatch_name(i));
            sw.content = NodeContent::Fixed(Size::new(swatch, swatch));
            let label = registry
                .text(
                    ComponentKind::LegendLabel,
                    item.label.clone(),
                    registry.label_font_size,
                    &Style::new(),
                )
                .with_name(Self::label_name(i));
            legend.children.push(sw);
            legend.children.push(label);
        }
        legend
    }

    /// Swatch and label marks, given a lookup from node name to laid-out box.
    pub fn marks(
        &self,
        registry: &ComponentRegistry,
        lookup: impl Fn(&str) -> Option<ComputedBox>,
    ) -> Vec<Mark> {
        let mut out = Vec::with_capacity(2 * self.items.len());
        for (i, item) in self.items.iter().enumerate() {
            if let Some(b) = lookup(&Self::swatch_name(i)) {
                out.push(Mark::rect(b.rect(), item.color, z_order::LEGEND_SWATCHES));
            }
            if let Some(b) = lookup(&Self::label_name(i)) {
                let text = TextMark {
                    pos: (b.x, b.center().y).into(),
                    text: item.label.clone(),
                    font_size: registry.label_font_size,
                    anchor: TextAnchor::Start,
                    baseline: TextBaseline::Middle,
                    fill: registry.text_color.into(),
                };
                out.push(Mark::text(text, z_order::LEGEND_LABELS));
            }
        }
        out
    }
}
