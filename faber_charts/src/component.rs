// Copyright 2025 the Faber Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Component kinds, the style pipeline and the component registry.
//!
//! Every layout node a chart builds is tagged with a [`ComponentKind`]. Its style is produced by
//! running the registry's [`StylePipeline`]: an ordered list of named stages, each contributing
//! a partial [`Style`] for the kind. Stages are merged once, in order, and per-instance
//! overrides are merged last.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use faber::{LayoutNode, NodeContent, Style};
use peniko::Color;
use peniko::color::palette::css;

/// Which side of the plot an axis sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AxisOrient {
    /// Left of the plot; labels right-aligned to the ticks.
    Left,
    /// Right of the plot.
    Right,
    /// Above the plot.
    Top,
    /// Below the plot.
    Bottom,
}

impl AxisOrient {
    /// Returns `true` for top and bottom axes.
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }

    /// Stable lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Top => "top",
            Self::Bottom => "bottom",
        }
    }
}

/// The kind of a chart component.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    /// The chart root grid.
    Chart,
    /// The chart title.
    Title,
    /// An axis container.
    Axis(AxisOrient),
    /// The tick labels of an axis.
    AxisLabels,
    /// The space reserved for an axis' domain line and ticks.
    AxisRule,
    /// The data rectangle.
    Plot,
    /// A legend container.
    Legend,
    /// A legend color swatch.
    LegendSwatch,
    /// A legend entry label.
    LegendLabel,
    /// A generic text label.
    Label,
}

/// One stage of a [`StylePipeline`].
pub type StyleContribution = fn(ComponentKind) -> Style;

/// An explicit, ordered list of named style stages.
#[derive(Clone, Debug, Default)]
pub struct StylePipeline {
    stages: Vec<(&'static str, StyleContribution)>,
}

impl StylePipeline {
    /// An empty pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// The pipeline used by [`ComponentRegistry::default`]: `base`, then `kind-defaults`.
    pub fn standard() -> Self {
        Self::new()
            .with_stage("base", base_style)
            .with_stage("kind-defaults", kind_defaults)
    }

    /// Appends a stage; later stages win on conflicting keys.
    #[must_use]
    pub fn with_stage(mut self, name: &'static str, stage: StyleContribution) -> Self {
        self.stages.push((name, stage));
        self
    }

    /// Stage names, in application order.
    pub fn stage_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.stages.iter().map(|(name, _)| *name)
    }

    /// Runs every stage for `kind`, then applies `overrides`.
    pub fn resolve(&self, kind: ComponentKind, overrides: &Style) -> Style {
        let mut style = Style::new();
        for (_name, stage) in &self.stages {
            style.merge(&stage(kind));
        }
        style.merge(overrides);
        style
    }
}

fn base_style(kind: ComponentKind) -> Style {
    match kind {
        ComponentKind::Chart | ComponentKind::Axis(_) | ComponentKind::Legend => {
            Style::new().with(Style::DISPLAY, "grid")
        }
        _ => Style::new(),
    }
}

fn kind_defaults(kind: ComponentKind) -> Style {
    let style = Style::new();
    match kind {
        ComponentKind::Chart => style.with(Style::GRID_TEMPLATE, "auto 1fr auto / auto 1fr auto"),
        ComponentKind::Title => style.with(Style::PLACE_SELF, "center"),
        ComponentKind::Axis(orient) if orient.is_horizontal() => {
            style.with(Style::GRID_TEMPLATE, "auto auto / 1fr")
        }
        ComponentKind::Axis(_) => style.with(Style::GRID_TEMPLATE, "1fr / auto auto"),
        ComponentKind::Plot => style.with(Style::PLACE_SELF, "stretch"),
        ComponentKind::Legend => style
            .with(Style::GRID_TEMPLATE, "auto / auto auto")
            .with(Style::PLACE_SELF, "start"),
        ComponentKind::LegendSwatch => style.with(Style::PLACE_SELF, "center"),
        ComponentKind::LegendLabel => style.with(Style::PLACE_SELF, "center start"),
        ComponentKind::AxisLabels | ComponentKind::AxisRule | ComponentKind::Label => style,
    }
}

/// Builds styled component nodes and carries chart-wide defaults.
///
/// The registry is passed explicitly to every builder that creates peer components.
#[derive(Clone, Debug)]
pub struct ComponentRegistry {
    pipeline: StylePipeline,
    /// Title font size.
    pub title_font_size: f64,
    /// Axis and legend label font size.
    pub label_font_size: f64,
    /// Length of axis tick marks.
    pub tick_size: f64,
    /// Gap between tick marks and their labels.
    pub label_padding: f64,
    /// Side of a legend swatch.
    pub swatch_size: f64,
    /// Text color.
    pub text_color: Color,
    /// Axis line and tick color.
    pub rule_color: Color,
    /// Plot background fill.
    pub plot_background: Color,
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        Self {
            pipeline: StylePipeline::standard(),
            title_font_size: 16.0,
            label_font_size: 11.0,
            tick_size: 5.0,
            label_padding: 3.0,
            swatch_size: 10.0,
            text_color: css::BLACK,
            rule_color: css::DIM_GRAY,
            plot_background: css::WHITE_SMOKE,
        }
    }
}

impl ComponentRegistry {
    /// A registry with the standard pipeline and default sizes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the style pipeline.
    #[must_use]
    pub fn with_pipeline(mut self, pipeline: StylePipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    /// Sets the title font size.
    #[must_use]
    pub fn with_title_font_size(mut self, size: f64) -> Self {
        self.title_font_size = size;
        self
    }

    /// Sets the label font size.
    #[must_use]
    pub fn with_label_font_size(mut self, size: f64) -> Self {
        self.label_font_size = size;
        self
    }

    /// Sets the tick length.
    #[must_use]
    pub fn with_tick_size(mut self, size: f64) -> Self {
        self.tick_size = size;
        self
    }

    /// Sets the gap between ticks and labels.
    #[must_use]
    pub fn with_label_padding(mut self, padding: f64) -> Self {
        self.label_padding = padding;
        self
    }

    /// Sets the legend swatch size.
    #[must_use]
    pub fn with_swatch_size(mut self, size: f64) -> Self {
        self.swatch_size = size;
        self
    }

    /// The style pipeline.
    pub fn pipeline(&self) -> &StylePipeline {
        &self.pipeline
    }

    /// Resolves the style of `kind` with per-instance `overrides`.
    pub fn style(&self, kind: ComponentKind, overrides: &Style) -> Style {
        self.pipeline.resolve(kind, overrides)
    }

    /// A styled node of `kind`.
    pub fn node(&self, kind: ComponentKind, overrides: &Style) -> LayoutNode {
        LayoutNode {
            style: self.style(kind, overrides),
            ..LayoutNode::default()
        }
    }

    /// A styled text leaf of `kind`.
    pub fn text(
        &self,
        kind: ComponentKind,
        text: impl Into<String>,
        font_size: f64,
        overrides: &Style,
    ) -> LayoutNode {
        LayoutNode {
            content: NodeContent::Text {
                text: text.into(),
                font_size,
            },
            ..self.node(kind, overrides)
        }
    }
}
