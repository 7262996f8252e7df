// Copyright 2025 the Faber Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart components laid out with [`faber`].
//!
//! A chart is described as a [`ChartSpec`]: a title, up to four axes, a legend and data
//! series. Each guide lowers to a [`faber::LayoutNode`] whose style comes from a
//! [`ComponentRegistry`], so reserving space for labels and ticks is the layout engine's job.
//! After layout, marks are emitted from the computed boxes and the scales, and
//! [`to_svg_string`] writes them out.
//!
//! ```
//! use faber::Size;
//! use faber_charts::{AxisOrient, AxisSpec, ChartSpec, ComponentRegistry, Series, to_svg_string};
//! use peniko::color::palette::css;
//!
//! let chart = ChartSpec::new()
//!     .with_axis(AxisSpec::linear(AxisOrient::Left, (0.0, 10.0)))
//!     .with_axis(AxisSpec::band(AxisOrient::Bottom, ["a", "b"]))
//!     .with_series(Series::bars([4.0, 7.0], css::STEEL_BLUE));
//! let scene = chart.render(&ComponentRegistry::new(), Size::new(320.0, 200.0));
//! assert!(to_svg_string(&scene).contains("<rect"));
//! ```

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod axis;
mod chart;
mod component;
#[cfg(not(feature = "std"))]
mod float;
mod legend;
mod mark;
mod scale;
mod series;
mod svg;
mod title;
pub mod z_order;

pub use axis::{AxisScale, AxisSpec, AxisTick};
pub use chart::{ChartScene, ChartSpec};
pub use component::{
    AxisOrient, ComponentKind, ComponentRegistry, StyleContribution, StylePipeline,
};
pub use legend::{LegendItem, LegendSpec};
pub use mark::{Mark, MarkPayload, TextAnchor, TextBaseline, TextMark};
pub use scale::{PlotScale, ScaleBand, ScaleLinear, extent};
pub use series::Series;
pub use svg::{AttributeWriter, escape_xml, to_svg_string};
pub use title::TitleSpec;
