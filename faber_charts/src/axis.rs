// Copyright 2025 the Faber Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axes.
//!
//! An axis reserves space in the chart grid through two children: a labels node holding one
//! text leaf per tick (so the axis is as thick as its widest label) and a rule node as thick
//! as a tick plus the label padding. Tick positions themselves come from the scale, not from
//! layout.

extern crate alloc;

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use faber::{ComputedBox, LayoutNode, Style};
use kurbo::{Line, Point, Rect};

use crate::component::{AxisOrient, ComponentKind, ComponentRegistry};
#[cfg(not(feature = "std"))]
use crate::float::FloatExt;
use crate::mark::{Mark, TextAnchor, TextBaseline, TextMark};
use crate::scale::{PlotScale, ScaleBand, ScaleLinear};
use crate::z_order;

/// The data side of an axis.
#[derive(Clone, Debug, PartialEq)]
pub enum AxisScale {
    /// A continuous domain.
    Linear {
        /// Domain in data units.
        domain: (f64, f64),
        /// Extend the domain to round ticks.
        nice: bool,
    },
    /// Named categories, one band each.
    Band {
        /// Category labels, in order.
        labels: Vec<String>,
    },
}

/// An axis on one side of the plot.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisSpec {
    /// Which side of the plot.
    pub orient: AxisOrient,
    /// Domain or categories.
    pub scale: AxisScale,
    /// Approximate number of ticks for linear scales.
    pub tick_count: usize,
    /// Stroke width of the domain line and ticks.
    pub stroke_width: f64,
}

/// One tick: its position along the axis and its label.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisTick {
    /// Position in scene coordinates.
    pub position: f64,
    /// Formatted label.
    pub label: String,
}

impl AxisSpec {
    /// A linear axis with a nice domain and about five ticks.
    pub fn linear(orient: AxisOrient, domain: (f64, f64)) -> Self {
        Self {
            orient,
            scale: AxisScale::Linear { domain, nice: true },
            tick_count: 5,
            stroke_width: 1.0,
        }
    }

    /// A categorical axis.
    pub fn band<S: Into<String>>(orient: AxisOrient, labels: impl IntoIterator<Item = S>) -> Self {
        Self {
            orient,
            scale: AxisScale::Band {
                labels: labels.into_iter().map(Into::into).collect(),
            },
            tick_count: 5,
            stroke_width: 1.0,
        }
    }

    /// Sets the approximate tick count.
    #[must_use]
    pub fn with_tick_count(mut self, count: usize) -> Self {
        self.tick_count = count;
        self
    }

    /// Enables or disables domain niceing for linear axes.
    #[must_use]
    pub fn with_nice(mut self, nice: bool) -> Self {
        if let AxisScale::Linear { nice: n, .. } = &mut self.scale {
            *n = nice;
        }
        self
    }

    /// Layout node name of the axis container.
    pub fn name(&self) -> String {
        format!("axis-{}", self.orient.name())
    }

    /// Layout node name of the rule node.
    pub fn rule_name(&self) -> String {
        format!("axis-{}-rule", self.orient.name())
    }

    /// Instantiates the scale along the plot rectangle.
    ///
    /// Horizontal axes map left to right; vertical axes map bottom to top.
    pub fn plot_scale(&self, plot: Rect) -> PlotScale {
        let range = if self.orient.is_horizontal() {
            (plot.x0, plot.x1)
        } else {
            (plot.y1, plot.y0)
        };
        match &self.scale {
            AxisScale::Linear { domain, nice } => {
                let scale = ScaleLinear::new(*domain, range);
                PlotScale::Linear(if *nice {
                    scale.nice(self.tick_count)
                } else {
                    scale
                })
            }
            AxisScale::Band { labels } => PlotScale::Band(ScaleBand::new(range, labels.len())),
        }
    }

    /// Ticks along the plot rectangle.
    pub fn ticks(&self, plot: Rect) -> Vec<AxisTick> {
        let scale = self.plot_scale(plot);
        match (&self.scale, scale) {
            (AxisScale::Band { labels }, PlotScale::Band(band)) => labels
                .iter()
                .enumerate()
                .map(|(i, label)| AxisTick {
                    position: band.band_center(i),
                    label: label.clone(),
                })
                .collect(),
            (_, PlotScale::Linear(linear)) => {
                let values = linear.ticks(self.tick_count);
                let step = match values.as_slice() {
                    [a, b, ..] => b - a,
                    _ => 0.0,
                };
                values
                    .into_iter()
                    .map(|v| AxisTick {
                        position: linear.map(v),
                        label: format_tick(v, step),
                    })
                    .collect()
            }
            (AxisScale::Linear { .. }, PlotScale::Band(_)) => Vec::new(),
        }
    }

    /// The axis layout node, placed at `area`.
    pub fn node(&self, registry: &ComponentRegistry, area: &str) -> LayoutNode {
        let font_size = registry.label_font_size;
        // Labels do not depend on the range, only on the domain.
        let unit = Rect::new(0.0, 0.0, 1.0, 1.0);
        let labels = registry
            .node(ComponentKind::AxisLabels, &Style::new())
            .with_name(format!("axis-{}-labels", self.orient.name()))
            .with_children(self.ticks(unit).into_iter().map(|tick| {
                registry.text(ComponentKind::Label, tick.label, font_size, &Style::new())
            }));

        let thickness = format!("{}", registry.tick_size + registry.label_padding);
        let key = if self.orient.is_horizontal() {
            Style::HEIGHT
        } else {
            Style::WIDTH
        };
        let rule = registry
            .node(ComponentKind::AxisRule, &Style::new().with(key, thickness))
            .with_name(self.rule_name());

        // Children are auto-placed; the rule always goes next to the plot.
        let children = match self.orient {
            AxisOrient::Left | AxisOrient::Top => [labels, rule],
            AxisOrient::Right | AxisOrient::Bottom => [rule, labels],
        };
        registry
            .node(
                ComponentKind::Axis(self.orient),
                &Style::new().with(Style::GRID_AREA, area),
            )
            .with_name(self.name())
            .with_children(children)
    }

    /// Domain line, ticks and labels, given the plot and the laid-out rule box.
    pub fn marks(
        &self,
        registry: &ComponentRegistry,
        plot: Rect,
        rule: ComputedBox,
    ) -> Vec<Mark> {
        let r = rule.rect();
        let tick = registry.tick_size;
        let stroke = registry.rule_color;

        // Edge shared with the plot, outward direction, and where labels anchor.
        let (edge, outward, label_edge) = match self.orient {
            AxisOrient::Left => (r.x1, -1.0, r.x0),
            AxisOrient::Right => (r.x0, 1.0, r.x1),
            AxisOrient::Top => (r.y1, -1.0, r.y0),
            AxisOrient::Bottom => (r.y0, 1.0, r.y1),
        };
        let (anchor, baseline) = match self.orient {
            AxisOrient::Left => (TextAnchor::End, TextBaseline::Middle),
            AxisOrient::Right => (TextAnchor::Start, TextBaseline::Middle),
            AxisOrient::Top => (TextAnchor::Middle, TextBaseline::Alphabetic),
            AxisOrient::Bottom => (TextAnchor::Middle, TextBaseline::Hanging),
        };
        let horizontal = self.orient.is_horizontal();
        let at = |along: f64, across: f64| -> Point {
            if horizontal {
                Point::new(along, across)
            } else {
                Point::new(across, along)
            }
        };

        let (lo, hi) = if horizontal {
            (plot.x0, plot.x1)
        } else {
            (plot.y0, plot.y1)
        };
        let mut out = Vec::new();
        out.push(Mark::line(
            Line::new(at(lo, edge), at(hi, edge)),
            stroke,
            self.stroke_width,
            z_order::AXIS_RULES,
        ));
        for t in self.ticks(plot) {
            out.push(Mark::line(
                Line::new(at(t.position, edge), at(t.position, edge + outward * tick)),
                stroke,
                self.stroke_width,
                z_order::AXIS_RULES,
            ));
            let label = TextMark {
                pos: at(t.position, label_edge),
                text: t.label,
                font_size: registry.label_font_size,
                anchor,
                baseline,
                fill: registry.text_color.into(),
            };
            out.push(Mark::text(label, z_order::AXIS_LABELS));
        }
        out
    }
}

/// Formats a tick value with as many decimals as the tick step needs.
pub(crate) fn format_tick(value: f64, step: f64) -> String {
    let decimals = if step > 0.0 && step < 1.0 {
        let d = (-step.log10() - 1e-9).ceil().max(0.0);
        #[allow(clippy::cast_possible_truncation, reason = "bounded by the f64 exponent range")]
        {
            d as usize
        }
    } else {
        0
    };
    // Avoid printing `-0`.
    let value = if value.abs() < step.abs() * 1e-9 {
        0.0
    } else {
        value
    };
    format!("{value:.decimals$}")
}
