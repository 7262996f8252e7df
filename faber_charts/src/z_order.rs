// Copyright 2025 the Faber Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paint order of chart-generated marks.
//!
//! Every [`crate::Mark`] carries a `z_index`. Writers sort by it and keep emission order for
//! ties, so marks of the same layer paint in the order the chart produced them.

/// Plot background fill.
pub const PLOT_BACKGROUND: i32 = -100;

/// Filled series marks (bars).
pub const SERIES_FILL: i32 = 0;
/// Point series marks.
pub const SERIES_POINTS: i32 = 20;

/// Axis domain line and tick marks.
pub const AXIS_RULES: i32 = 30;
/// Axis tick labels.
pub const AXIS_LABELS: i32 = 40;

/// Legend swatches.
pub const LEGEND_SWATCHES: i32 = 60;
/// Legend labels.
pub const LEGEND_LABELS: i32 = 70;
/// Chart titles.
pub const TITLES: i32 = 80;
