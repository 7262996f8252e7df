// Copyright 2025 the Faber Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scales map data values into plot coordinates.

extern crate alloc;

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// A linear mapping from a continuous domain to a continuous range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLinear {
    domain: (f64, f64),
    range: (f64, f64),
}

impl ScaleLinear {
    /// Creates a scale mapping `domain` values to `range` values.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Extends the domain outwards to the first and last nice tick.
    #[must_use]
    pub fn nice(mut self, count: usize) -> Self {
        let ticks = nice_ticks(self.domain.0, self.domain.1, count);
        if let (Some(&first), Some(&last)) = (ticks.first(), ticks.last())
            && ticks.len() >= 2
        {
            self.domain = if self.domain.0 <= self.domain.1 {
                (first, last)
            } else {
                (last, first)
            };
        }
        self
    }

    /// Maps a value from domain space into range space.
    ///
    /// A degenerate domain maps everything to the range start.
    pub fn map(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = d1 - d0;
        if denom == 0.0 {
            return r0;
        }
        let t = (x - d0) / denom;
        r0 + t * (r1 - r0)
    }

    /// The domain as configured (after [`ScaleLinear::nice`], if applied).
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// The output range.
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Returns round tick values covering the domain, aiming for about `count` steps.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        nice_ticks(self.domain.0, self.domain.1, count)
    }
}

/// Smallest and largest finite value of `values`, or `None` if there are none.
pub fn extent(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

fn nice_ticks(mut min: f64, mut max: f64, count: usize) -> Vec<f64> {
    if count == 0 || !min.is_finite() || !max.is_finite() {
        return Vec::new();
    }
    if min == max {
        return alloc::vec![min];
    }
    if min > max {
        core::mem::swap(&mut min, &mut max);
    }
    let step = nice_step((max - min) / count as f64);
    if step == 0.0 {
        return alloc::vec![min, max];
    }

    let start = (min / step).floor() * step;
    let stop = (max / step).ceil() * step;
    let n = ((stop - start) / step).round().min(10_000.0);
    #[allow(
        clippy::cast_possible_truncation,
        reason = "finite, non-negative and capped at 10k"
    )]
    let n = n.max(0.0) as usize;
    (0..=n).map(|i| start + step * i as f64).collect()
}

/// Rounds `step` to 1, 2 or 5 times a power of ten.
pub(crate) fn nice_step(step: f64) -> f64 {
    if !step.is_finite() || step <= 0.0 {
        return 0.0;
    }
    let base = 10_f64.powf(step.log10().floor());
    let error = step / base;
    let nice = if error >= 7.5 {
        10.0
    } else if error >= 3.5 {
        5.0
    } else if error >= 1.5 {
        2.0
    } else {
        1.0
    };
    nice * base
}

/// A discrete band scale for categorical axes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleBand {
    range: (f64, f64),
    count: usize,
    padding_inner: f64,
    padding_outer: f64,
}

impl ScaleBand {
    /// Creates a band scale of `count` bands over `range`, with 0.1 band padding.
    pub fn new(range: (f64, f64), count: usize) -> Self {
        Self {
            range,
            count,
            padding_inner: 0.1,
            padding_outer: 0.1,
        }
    }

    /// Sets inner and outer padding in band units.
    #[must_use]
    pub fn with_padding(mut self, inner: f64, outer: f64) -> Self {
        self.padding_inner = inner.max(0.0);
        self.padding_outer = outer.max(0.0);
        self
    }

    /// Number of bands.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Width of one band.
    pub fn band_width(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        let n = self.count as f64;
        let span = (self.range.1 - self.range.0).abs();
        let denom = n + self.padding_inner * (n - 1.0) + 2.0 * self.padding_outer;
        if denom == 0.0 { 0.0 } else { span / denom }
    }

    /// Start position of band `index`, measured from the low end of the range.
    pub fn band_start(&self, index: usize) -> f64 {
        let bw = self.band_width();
        let low = self.range.0.min(self.range.1);
        low + bw * self.padding_outer + bw * (1.0 + self.padding_inner) * index as f64
    }

    /// Center of band `index`.
    pub fn band_center(&self, index: usize) -> f64 {
        self.band_start(index) + 0.5 * self.band_width()
    }
}

/// A scale instantiated for a concrete plot range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PlotScale {
    /// Continuous values.
    Linear(ScaleLinear),
    /// Categories, addressed by index.
    Band(ScaleBand),
}

impl PlotScale {
    /// Position of `value`; band scales read it as a category index and return the band center.
    pub fn position(&self, value: f64) -> f64 {
        match self {
            Self::Linear(s) => s.map(value),
            Self::Band(b) => {
                #[allow(
                    clippy::cast_possible_truncation,
                    reason = "category indices are small non-negative integers"
                )]
                let index = value.round().max(0.0) as usize;
                b.band_center(index)
            }
        }
    }

    /// Position of the zero baseline, clamped into the domain; band scales use the range start.
    pub fn baseline(&self) -> f64 {
        match self {
            Self::Linear(s) => {
                let (d0, d1) = s.domain();
                s.map(0.0_f64.clamp(d0.min(d1), d0.max(d1)))
            }
            Self::Band(b) => b.range.0,
        }
    }
}
