// Copyright 2025 the Faber Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Track sizing for one axis of a grid.
//!
//! Sizing runs in three fixed phases:
//! 1. fixed tracks take their declared length;
//! 2. `auto` / `min-content` tracks grow to fit the items placed in them;
//! 3. `fr` tracks split whatever space is left, by weight.
//!
//! Items that span a flexible track never contribute to phase 2, and phase 3 never
//! shrinks below zero: when the fixed and content-based tracks already overflow the
//! container, every `fr` track resolves to `0`.

extern crate alloc;

use alloc::vec::Vec;

use smallvec::SmallVec;

use crate::style::TrackSizing;

/// A layout axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Column tracks; sizes widths along x.
    Columns,
    /// Row tracks; sizes heights along y.
    Rows,
}

/// What to do with leftover space when every `fr` track has weight zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ZeroFlex {
    /// Leave the space unused; zero-weight tracks resolve to `0`.
    #[default]
    Unallocated,
    /// Split the space equally between the zero-weight tracks.
    ShareEqually,
}

/// A track with its sizing function and resolved size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Track {
    /// The declared (or implicit) sizing function.
    pub sizing: TrackSizing,
    /// The resolved size in pixels.
    pub size: f64,
}

/// An item's footprint on one axis, with its size contributions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackItem {
    /// First spanned track (zero-based).
    pub start: usize,
    /// One past the last spanned track.
    pub end: usize,
    /// Natural size along this axis; used by `auto` and `fr` tracks.
    pub natural: f64,
    /// Min-content size along this axis; used by `min-content` tracks.
    pub min_content: f64,
}

impl TrackItem {
    fn span(&self) -> usize {
        self.end - self.start
    }

    fn contribution(&self, sizing: TrackSizing) -> f64 {
        match sizing {
            TrackSizing::MinContent => self.min_content,
            _ => self.natural,
        }
    }
}

/// Resolved tracks of one axis with their start offsets.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResolvedTracks {
    tracks: Vec<Track>,
    offsets: SmallVec<[f64; 8]>,
}

impl ResolvedTracks {
    fn new(tracks: Vec<Track>) -> Self {
        let mut offsets = SmallVec::with_capacity(tracks.len() + 1);
        let mut acc = 0.0;
        offsets.push(acc);
        for t in &tracks {
            acc += t.size;
            offsets.push(acc);
        }
        Self { tracks, offsets }
    }

    /// The resolved tracks, in order.
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Resolved sizes, in order.
    pub fn sizes(&self) -> impl Iterator<Item = f64> + '_ {
        self.tracks.iter().map(|t| t.size)
    }

    /// Number of tracks.
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Returns `true` if there are no tracks.
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Offset of the start edge of track `index`; `len()` gives the end of the last track.
    pub fn offset(&self, index: usize) -> f64 {
        self.offsets
            .get(index)
            .or(self.offsets.last())
            .copied()
            .unwrap_or(0.0)
    }

    /// Offset and extent of the zero-based track range `start..end`.
    pub fn span(&self, start: usize, end: usize) -> (f64, f64) {
        let from = self.offset(start);
        (from, self.offset(end) - from)
    }

    /// Sum of every track size.
    pub fn total(&self) -> f64 {
        self.offset(self.tracks.len())
    }
}

/// Resolves track sizes for one axis.
///
/// `available` is the container's size along the axis, or `None` while measuring, when
/// `fr` tracks size to their items instead of sharing leftover space.
pub fn size_tracks(
    sizing: &[TrackSizing],
    items: &[TrackItem],
    available: Option<f64>,
    zero_flex: ZeroFlex,
) -> ResolvedTracks {
    let mut tracks: Vec<Track> = sizing
        .iter()
        .map(|&sizing| Track {
            sizing,
            size: match sizing {
                TrackSizing::Fixed(px) => px,
                _ => 0.0,
            },
        })
        .collect();
    let in_range = |item: &&TrackItem| item.start < item.end && item.end <= tracks.len();
    let items: Vec<&TrackItem> = items.iter().filter(in_range).collect();

    size_content_tracks(&mut tracks, &items);
    match available.filter(|a| a.is_finite()) {
        Some(available) => share_free_space(&mut tracks, available, zero_flex),
        None => size_flex_to_content(&mut tracks, &items, zero_flex),
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(
        ?available,
        sizes = ?tracks.iter().map(|t| t.size).collect::<Vec<_>>(),
        "resolved tracks"
    );
    ResolvedTracks::new(tracks)
}

fn spans_flexible(tracks: &[Track], item: &TrackItem) -> bool {
    tracks[item.start..item.end]
        .iter()
        .any(|t| t.sizing.is_flexible())
}

fn size_content_tracks(tracks: &mut [Track], items: &[&TrackItem]) {
    for item in items.iter().filter(|i| i.span() == 1) {
        let track = &mut tracks[item.start];
        if track.sizing.is_content_based() {
            track.size = track.size.max(item.contribution(track.sizing));
        }
    }

    let mut spanning: Vec<&TrackItem> = items
        .iter()
        .copied()
        .filter(|i| i.span() > 1 && !spans_flexible(tracks, i))
        .collect();
    spanning.sort_by_key(|i| i.span());

    for item in spanning {
        let spanned = &mut tracks[item.start..item.end];
        let growable = spanned
            .iter()
            .filter(|t| t.sizing.is_content_based())
            .count();
        if growable == 0 {
            continue;
        }
        let sizing = if spanned.iter().any(|t| t.sizing == TrackSizing::Auto) {
            TrackSizing::Auto
        } else {
            TrackSizing::MinContent
        };
        let covered: f64 = spanned.iter().map(|t| t.size).sum();
        let extra = item.contribution(sizing) - covered;
        if extra <= 0.0 {
            continue;
        }
        let share = extra / growable as f64;
        for t in spanned.iter_mut().filter(|t| t.sizing.is_content_based()) {
            t.size += share;
        }
    }
}

fn share_free_space(tracks: &mut [Track], available: f64, zero_flex: ZeroFlex) {
    let flex_count = tracks.iter().filter(|t| t.sizing.is_flexible()).count();
    if flex_count == 0 {
        return;
    }
    let used: f64 = tracks
        .iter()
        .filter(|t| !t.sizing.is_flexible())
        .map(|t| t.size)
        .sum();
    let remaining = available - used;
    if remaining <= 0.0 {
        return;
    }
    let total_weight: f64 = tracks.iter().map(|t| t.sizing.flex_weight()).sum();
    for t in tracks.iter_mut().filter(|t| t.sizing.is_flexible()) {
        t.size = if total_weight > 0.0 {
            remaining * t.sizing.flex_weight() / total_weight
        } else {
            match zero_flex {
                ZeroFlex::Unallocated => 0.0,
                ZeroFlex::ShareEqually => remaining / flex_count as f64,
            }
        };
    }
}

fn size_flex_to_content(tracks: &mut [Track], items: &[&TrackItem], zero_flex: ZeroFlex) {
    let mut fraction = 0.0_f64;
    for item in items.iter().filter(|i| i.span() == 1) {
        let track = &mut tracks[item.start];
        let TrackSizing::Flex(weight) = track.sizing else {
            continue;
        };
        if weight > 0.0 {
            fraction = fraction.max(item.natural / weight);
        } else if zero_flex == ZeroFlex::ShareEqually {
            track.size = track.size.max(item.natural);
        }
    }
    for t in tracks.iter_mut() {
        if let TrackSizing::Flex(weight) = t.sizing
            && weight > 0.0
        {
            t.size = fraction * weight;
        }
    }
}
