// Copyright 2025 the Faber Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Data series drawn inside the plot.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::{Circle, Rect};
use peniko::Color;

use crate::mark::Mark;
use crate::scale::{PlotScale, ScaleBand, extent};
use crate::z_order;

/// A data series.
#[derive(Clone, Debug, PartialEq)]
pub enum Series {
    /// One bar per value, in band order.
    Bars {
        /// Bar heights in data units.
        values: Vec<f64>,
        /// Bar color.
        color: Color,
    },
    /// Scattered points.
    Points {
        /// `(x, y)` in data units; `x` is a category index on band axes.
        points: Vec<(f64, f64)>,
        /// Point radius.
        radius: f64,
        /// Point color.
        color: Color,
    },
}

impl Series {
    /// A bar series.
    pub fn bars(values: impl IntoIterator<Item = f64>, color: Color) -> Self {
        Self::Bars {
            values: values.into_iter().collect(),
            color,
        }
    }

    /// A point series with a 3px radius.
    pub fn points(points: impl IntoIterator<Item = (f64, f64)>, color: Color) -> Self {
        Self::Points {
            points: points.into_iter().collect(),
            radius: 3.0,
            color,
        }
    }

    /// Sets the point radius; no effect on bars.
    #[must_use]
    pub fn with_radius(mut self, r: f64) -> Self {
        if let Self::Points { radius, .. } = &mut self {
            *radius = r;
        }
        self
    }

    /// Number of data items.
    pub fn len(&self) -> usize {
        match self {
            Self::Bars { values, .. } => values.len(),
            Self::Points { points, .. } => points.len(),
        }
    }

    /// Returns `true` if the series has no data.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Extent of x values; bars span their indices.
    pub fn x_extent(&self) -> Option<(f64, f64)> {
        match self {
            Self::Bars { values, .. } => {
                (!values.is_empty()).then(|| (0.0, (values.len() - 1) as f64))
            }
            Self::Points { points, .. } => extent(points.iter().map(|p| p.0)),
        }
    }

    /// Extent of y values; bars always include zero.
    pub fn y_extent(&self) -> Option<(f64, f64)> {
        match self {
            Self::Bars { values, .. } => {
                extent(values.iter().copied().chain(core::iter::once(0.0)))
            }
            Self::Points { points, .. } => extent(points.iter().map(|p| p.1)),
        }
    }

    /// Marks for this series, given the plot rectangle and both scales.
    ///
    /// Bars use the x scale's bands when it has them, and split the plot width into
    /// equal bands otherwise.
    pub fn marks(&self, plot: Rect, x: &PlotScale, y: &PlotScale) -> Vec<Mark> {
        match self {
            Self::Bars { values, color } => {
                let band = match x {
                    PlotScale::Band(b) => *b,
                    PlotScale::Linear(_) => ScaleBand::new((plot.x0, plot.x1), values.len()),
                };
                let base = y.baseline();
                values
                    .iter()
                    .enumerate()
                    .filter(|(_, v)| v.is_finite())
                    .map(|(i, &v)| {
                        let x0 = band.band_start(i);
                        let top = y.position(v);
                        let x1 = x0 + band.band_width();
                        let rect = Rect::new(x0, top.min(base), x1, top.max(base));
                        Mark::rect(rect, *color, z_order::SERIES_FILL)
                    })
                    .collect()
            }
            Self::Points {
                points,
                radius,
                color,
            } => points
                .iter()
                .filter(|(px, py)| px.is_finite() && py.is_finite())
                .map(|&(px, py)| {
                    let center = (x.position(px), y.position(py));
                    Mark::circle(Circle::new(center, *radius), *color, z_order::SERIES_POINTS)
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale::ScaleLinear;
    use peniko::color::palette::css;

    #[test]
    fn bars_grow_from_the_baseline() {
        let plot = Rect::new(0.0, 0.0, 100.0, 50.0);
        let x = PlotScale::Band(ScaleBand::new((0.0, 100.0), 2).with_padding(0.0, 0.0));
        let y = PlotScale::Linear(ScaleLinear::new((0.0, 10.0), (50.0, 0.0)));
        let marks = Series::bars([5.0, 10.0], css::STEEL_BLUE).marks(plot, &x, &y);
        assert_eq!(marks[0].bounds(), Some(Rect::new(0.0, 25.0, 50.0, 50.0)));
        assert_eq!(marks[1].bounds(), Some(Rect::new(50.0, 0.0, 100.0, 50.0)));
    }

    #[test]
    fn points_map_through_both_scales() {
        let plot = Rect::new(0.0, 0.0, 10.0, 10.0);
        let x = PlotScale::Linear(ScaleLinear::new((0.0, 1.0), (0.0, 10.0)));
        let y = PlotScale::Linear(ScaleLinear::new((0.0, 1.0), (10.0, 0.0)));
        let s = Series::points([(0.5, 0.5), (f64::NAN, 1.0)], css::CRIMSON).with_radius(1.0);
        let marks = s.marks(plot, &x, &y);
        assert_eq!(marks.len(), 1);
        assert_eq!(marks[0].bounds(), Some(Rect::new(4.0, 4.0, 6.0, 6.0)));
        assert_eq!(marks[0].z_index, z_order::SERIES_POINTS);
    }

    #[test]
    fn extents() {
        let bars = Series::bars([3.0, 7.0, 2.0], css::BLACK);
        assert_eq!(bars.y_extent(), Some((0.0, 7.0)));
        assert_eq!(bars.x_extent(), Some((0.0, 2.0)));
        assert!(Series::points(Vec::new(), css::BLACK).x_extent().is_none());
    }
}
