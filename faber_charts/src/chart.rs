// Copyright 2025 the Faber Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart composition.
//!
//! A [`ChartSpec`] owns the guides (title, axes, legend) and the data series. Rendering is the
//! two-pass process the engine is built for: the chart is lowered to a grid of components,
//! [`faber`] computes every box, and marks are emitted from the boxes and the scales.
//!
//! The chart grid is `auto 1fr auto / auto 1fr auto`: title, plot and bottom-axis rows; left
//! axis, plot and legend columns. A top axis adds a row above the plot and a right axis adds a
//! column after it.

extern crate alloc;

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use faber::{
    ComputedBox, HeuristicMeasure, LayoutConfig, LayoutNode, Measure, Size, Style,
    compute_layout_with,
};
use hashbrown::HashMap;
use kurbo::Rect;

use crate::axis::AxisSpec;
use crate::component::{AxisOrient, ComponentKind, ComponentRegistry};
use crate::legend::LegendSpec;
use crate::mark::Mark;
use crate::scale::{PlotScale, ScaleBand, ScaleLinear, extent};
use crate::series::Series;
use crate::title::TitleSpec;
use crate::z_order;

/// A composed chart description.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChartSpec {
    /// Optional title.
    pub title: Option<TitleSpec>,
    /// Optional left axis.
    pub axis_left: Option<AxisSpec>,
    /// Optional right axis.
    pub axis_right: Option<AxisSpec>,
    /// Optional top axis.
    pub axis_top: Option<AxisSpec>,
    /// Optional bottom axis.
    pub axis_bottom: Option<AxisSpec>,
    /// Optional legend.
    pub legend: Option<LegendSpec>,
    /// Data series, drawn in order.
    pub series: Vec<Series>,
}

/// A rendered chart: the laid-out component tree and the marks to paint.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartScene {
    /// Scene size.
    pub size: Size,
    /// The laid-out component tree.
    pub layout: LayoutNode,
    /// Marks in emission order.
    pub marks: Vec<Mark>,
}

impl ChartScene {
    /// Marks in paint order: by `z_index`, ties in emission order.
    pub fn paint_order(&self) -> Vec<&Mark> {
        let mut marks: Vec<&Mark> = self.marks.iter().collect();
        marks.sort_by_key(|m| m.z_index);
        marks
    }

    /// The absolute box of the first component named `name`.
    pub fn component_box(&self, name: &str) -> Option<ComputedBox> {
        let mut found = None;
        self.layout.walk(|node, b, _| {
            if found.is_none() && node.name.as_deref() == Some(name) {
                found = Some(b);
            }
        });
        found
    }
}

/// Grid lines of every chart slot, for the guides that are present.
#[derive(Clone, Copy, Debug)]
struct ChartGrid {
    top_row: usize,
    plot_row: usize,
    bottom_row: usize,
    plot_col: usize,
    right_col: usize,
    legend_col: usize,
    has_top: bool,
    has_right: bool,
}

impl ChartGrid {
    const LEFT_COL: usize = 1;
    const TITLE_ROW: usize = 1;

    fn new(spec: &ChartSpec) -> Self {
        let has_top = spec.axis_top.is_some();
        let has_right = spec.axis_right.is_some();
        let plot_row = 2 + usize::from(has_top);
        let plot_col = 2;
        let right_col = plot_col + 1;
        Self {
            top_row: 2,
            plot_row,
            bottom_row: plot_row + 1,
            plot_col,
            right_col,
            legend_col: right_col + usize::from(has_right),
            has_top,
            has_right,
        }
    }

    /// The template, when it differs from the chart kind's default.
    fn template(&self) -> Option<String> {
        if !self.has_top && !self.has_right {
            return None;
        }
        let rows = if self.has_top {
            "auto auto 1fr auto"
        } else {
            "auto 1fr auto"
        };
        let columns = if self.has_right {
            "auto 1fr auto auto"
        } else {
            "auto 1fr auto"
        };
        Some(format!("{rows} / {columns}"))
    }

    fn axis_area(&self, orient: AxisOrient) -> String {
        let (row, col) = match orient {
            AxisOrient::Left => (self.plot_row, Self::LEFT_COL),
            AxisOrient::Right => (self.plot_row, self.right_col),
            AxisOrient::Top => (self.top_row, self.plot_col),
            AxisOrient::Bottom => (self.bottom_row, self.plot_col),
        };
        format!("{row} / {col}")
    }

    fn title_area(&self) -> String {
        format!("{} / 1 / {} / {}", Self::TITLE_ROW, Self::TITLE_ROW + 1, self.legend_col + 1)
    }
}

impl ChartSpec {
    /// Layout node name of the plot.
    pub const PLOT: &'static str = "plot";

    /// An empty chart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: TitleSpec) -> Self {
        self.title = Some(title);
        self
    }

    /// Sets the axis on the side named by its orientation.
    #[must_use]
    pub fn with_axis(mut self, axis: AxisSpec) -> Self {
        let slot = match axis.orient {
            AxisOrient::Left => &mut self.axis_left,
            AxisOrient::Right => &mut self.axis_right,
            AxisOrient::Top => &mut self.axis_top,
            AxisOrient::Bottom => &mut self.axis_bottom,
        };
        *slot = Some(axis);
        self
    }

    /// Sets the legend.
    #[must_use]
    pub fn with_legend(mut self, legend: LegendSpec) -> Self {
        self.legend = Some(legend);
        self
    }

    /// Appends a data series.
    #[must_use]
    pub fn with_series(mut self, series: Series) -> Self {
        self.series.push(series);
        self
    }

    /// Present axes, in left, right, top, bottom order.
    pub fn axes(&self) -> impl Iterator<Item = &AxisSpec> {
        [
            &self.axis_left,
            &self.axis_right,
            &self.axis_top,
            &self.axis_bottom,
        ]
        .into_iter()
        .flatten()
    }

    /// Returns the bottom axis if present, otherwise the top axis.
    pub fn x_axis(&self) -> Option<&AxisSpec> {
        self.axis_bottom.as_ref().or(self.axis_top.as_ref())
    }

    /// Returns the left axis if present, otherwise the right axis.
    pub fn y_axis(&self) -> Option<&AxisSpec> {
        self.axis_left.as_ref().or(self.axis_right.as_ref())
    }

    /// Lowers the chart to a layout tree.
    pub fn tree(&self, registry: &ComponentRegistry) -> LayoutNode {
        let grid = ChartGrid::new(self);
        let mut overrides = Style::new();
        if let Some(template) = grid.template() {
            overrides.set(Style::GRID_TEMPLATE, template);
        }
        let mut chart = registry
            .node(ComponentKind::Chart, &overrides)
            .with_name("chart");

        if let Some(title) = &self.title {
            chart.children.push(title.node(registry, &grid.title_area()));
        }
        chart.children.push(
            registry
                .node(
                    ComponentKind::Plot,
                    &Style::new().with(
                        Style::GRID_AREA,
                        format!("{} / {}", grid.plot_row, grid.plot_col),
                    ),
                )
                .with_name(Self::PLOT),
        );
        for axis in self.axes() {
            chart
                .children
                .push(axis.node(registry, &grid.axis_area(axis.orient)));
        }
        if let Some(legend) = &self.legend {
            let area = format!("{} / {}", grid.plot_row, grid.legend_col);
            chart.children.push(legend.node(registry, &area));
        }
        chart
    }

    /// Lays out and renders the chart with heuristic text metrics.
    pub fn render(&self, registry: &ComponentRegistry, viewport: Size) -> ChartScene {
        self.render_with(registry, viewport, &HeuristicMeasure)
    }

    /// Lays out and renders the chart.
    pub fn render_with(
        &self,
        registry: &ComponentRegistry,
        viewport: Size,
        measure: &impl Measure,
    ) -> ChartScene {
        let tree = self.tree(registry);
        let layout = compute_layout_with(&tree, viewport, measure, &LayoutConfig::default());

        let mut boxes: HashMap<&str, ComputedBox> = HashMap::new();
        layout.walk(|node, b, _| {
            if let Some(name) = node.name.as_deref() {
                boxes.entry(name).or_insert(b);
            }
        });
        let lookup = |name: &str| boxes.get(name).copied();
        let plot = lookup(Self::PLOT).map_or(Rect::ZERO, |b| b.rect());

        let mut marks = Vec::new();
        marks.push(Mark::rect(
            plot,
            registry.plot_background,
            z_order::PLOT_BACKGROUND,
        ));

        let (x, y) = self.plot_scales(plot);
        for series in &self.series {
            marks.extend(series.marks(plot, &x, &y));
        }
        for axis in self.axes() {
            if let Some(rule) = lookup(&axis.rule_name()) {
                marks.extend(axis.marks(registry, plot, rule));
            }
        }
        if let (Some(title), Some(b)) = (&self.title, lookup(TitleSpec::NAME)) {
            marks.push(title.mark(registry, b));
        }
        if let Some(legend) = &self.legend {
            marks.extend(legend.marks(registry, lookup));
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            ?plot,
            marks = marks.len(),
            nodes = layout.len(),
            "rendered chart"
        );
        drop(boxes);
        ChartScene {
            size: viewport,
            layout,
            marks,
        }
    }

    /// Scales for series marks: from the axes when present, inferred from the data otherwise.
    pub fn plot_scales(&self, plot: Rect) -> (PlotScale, PlotScale) {
        let x = match self.x_axis() {
            Some(axis) => axis.plot_scale(plot),
            None => self.inferred_x(plot),
        };
        let y = match self.y_axis() {
            Some(axis) => axis.plot_scale(plot),
            None => {
                let domain = extent(
                    self.series
                        .iter()
                        .filter_map(Series::y_extent)
                        .flat_map(|(lo, hi)| [lo, hi]),
                )
                .unwrap_or((0.0, 1.0));
                PlotScale::Linear(ScaleLinear::new(domain, (plot.y1, plot.y0)).nice(5))
            }
        };
        (x, y)
    }

    fn inferred_x(&self, plot: Rect) -> PlotScale {
        let range = (plot.x0, plot.x1);
        let bars = self.series.iter().find_map(|s| match s {
            Series::Bars { values, .. } => Some(values.len()),
            Series::Points { .. } => None,
        });
        if let Some(count) = bars {
            return PlotScale::Band(ScaleBand::new(range, count));
        }
        let domain = extent(
            self.series
                .iter()
                .filter_map(Series::x_extent)
                .flat_map(|(lo, hi)| [lo, hi]),
        )
        .unwrap_or((0.0, 1.0));
        PlotScale::Linear(ScaleLinear::new(domain, range).nice(5))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::legend::LegendItem;
    use crate::mark::MarkPayload;
    use peniko::color::palette::css;

    fn bar_chart() -> ChartSpec {
        ChartSpec::new()
            .with_title(TitleSpec::new("Fruit"))
            .with_axis(AxisSpec::linear(AxisOrient::Left, (0.0, 40.0)))
            .with_axis(AxisSpec::band(AxisOrient::Bottom, ["apple", "pear", "fig"]))
            .with_legend(LegendSpec::new([LegendItem::solid("2024", css::STEEL_BLUE)]))
            .with_series(Series::bars([12.0, 30.0, 7.0], css::STEEL_BLUE))
    }

    #[test]
    fn tree_is_a_three_by_three_grid() {
        let registry = ComponentRegistry::new();
        let tree = bar_chart().tree(&registry);
        assert_eq!(
            tree.style.get(Style::GRID_TEMPLATE),
            Some("auto 1fr auto / auto 1fr auto")
        );
        let area = |name: &str| tree.find(name).and_then(|n| n.style.get(Style::GRID_AREA));
        assert_eq!(area("title"), Some("1 / 1 / 2 / 4"));
        assert_eq!(area("plot"), Some("2 / 2"));
        assert_eq!(area("axis-left"), Some("2 / 1"));
        assert_eq!(area("axis-bottom"), Some("3 / 2"));
        assert_eq!(area("legend"), Some("2 / 3"));
    }

    #[test]
    fn extra_axes_extend_the_grid() {
        let registry = ComponentRegistry::new();
        let tree = bar_chart()
            .with_axis(AxisSpec::linear(AxisOrient::Right, (0.0, 1.0)))
            .with_axis(AxisSpec::linear(AxisOrient::Top, (0.0, 1.0)))
            .tree(&registry);
        assert_eq!(
            tree.style.get(Style::GRID_TEMPLATE),
            Some("auto auto 1fr auto / auto 1fr auto auto")
        );
        let area = |name: &str| tree.find(name).and_then(|n| n.style.get(Style::GRID_AREA));
        assert_eq!(area("plot"), Some("3 / 2"));
        assert_eq!(area("axis-top"), Some("2 / 2"));
        assert_eq!(area("axis-right"), Some("3 / 3"));
        assert_eq!(area("legend"), Some("3 / 4"));
        assert_eq!(area("title"), Some("1 / 1 / 2 / 5"));
    }

    #[test]
    fn guides_surround_the_plot() {
        let registry = ComponentRegistry::new();
        let scene = bar_chart().render(&registry, Size::new(400.0, 300.0));
        let plot = scene.component_box("plot").unwrap();
        let left = scene.component_box("axis-left").unwrap();
        let bottom = scene.component_box("axis-bottom").unwrap();
        let legend = scene.component_box("legend").unwrap();
        let title = scene.component_box("title").unwrap();

        assert_eq!(left.x + left.width, plot.x);
        assert_eq!(bottom.y, plot.y + plot.height);
        assert!((legend.x - (plot.x + plot.width)).abs() < 1e-9);
        assert_eq!(title.y + title.height, plot.y);
        assert_eq!(bottom.y + bottom.height, 300.0);
        // The title is centered across the whole chart.
        assert!((title.center().x - 200.0).abs() < 1e-9);
    }

    #[test]
    fn render_emits_every_mark_kind() {
        let registry = ComponentRegistry::new();
        let scene = bar_chart().render(&registry, Size::new(400.0, 300.0));
        let count = |f: fn(&MarkPayload) -> bool| {
            scene.marks.iter().filter(|m| f(&m.payload)).count()
        };
        // Background, three bars and one legend swatch.
        assert_eq!(count(|p| matches!(p, MarkPayload::Rect { .. })), 5);
        assert!(count(|p| matches!(p, MarkPayload::Line { .. })) > 0);
        assert!(count(|p| matches!(p, MarkPayload::Text(_))) > 0);

        let order: Vec<i32> = scene.paint_order().iter().map(|m| m.z_index).collect();
        assert!(order.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(order[0], z_order::PLOT_BACKGROUND);
    }

    #[test]
    fn bars_stay_inside_the_plot() {
        let registry = ComponentRegistry::new();
        let scene = bar_chart().render(&registry, Size::new(400.0, 300.0));
        let plot = scene.component_box("plot").unwrap().rect();
        for m in &scene.marks {
            if m.z_index == z_order::SERIES_FILL {
                let b = m.bounds().unwrap();
                assert!(b.x0 >= plot.x0 && b.x1 <= plot.x1 + 1e-9);
                assert!(b.y0 >= plot.y0 - 1e-9 && (b.y1 - plot.y1).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn scatter_without_axes_infers_scales() {
        let registry = ComponentRegistry::new();
        let chart = ChartSpec::new()
            .with_series(Series::points([(1.0, 2.0), (3.0, 9.0)], css::CRIMSON));
        let scene = chart.render(&registry, Size::new(100.0, 100.0));
        let circles = scene
            .marks
            .iter()
            .filter(|m| matches!(m.payload, MarkPayload::Circle { .. }))
            .count();
        assert_eq!(circles, 2);
        // No guides: the plot fills the viewport.
        assert_eq!(
            scene.component_box("plot"),
            Some(ComputedBox::new(0.0, 0.0, 100.0, 100.0))
        );
    }
}
