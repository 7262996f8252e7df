// Copyright 2025 the Faber Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Style maps and the grid vocabulary read from them.
//!
//! A [`Style`] is a flat key/value map, close to what a CSS `style` attribute carries.
//! Layout only reads a handful of keys; [`ResolvedStyle::resolve`] turns them into typed
//! values. The individual parsers are strict and report a [`StyleError`]; the resolver
//! recovers from every error with a fixed default, so malformed styles never abort layout.

extern crate alloc;

use alloc::string::{String, ToString};
use core::fmt;
use core::str::FromStr;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::placement::GridArea;

/// A flat map from style keys to unparsed values.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Style {
    entries: HashMap<String, String>,
}

impl Style {
    /// `display`: `grid` (or any non-passthrough value) enables grid layout.
    pub const DISPLAY: &'static str = "display";
    /// `grid-template`: `<row tracks> / <column tracks>`.
    pub const GRID_TEMPLATE: &'static str = "grid-template";
    /// `grid-area`: `<row-start> / <col-start> / <row-end> / <col-end>`.
    pub const GRID_AREA: &'static str = "grid-area";
    /// `place-self`: `<align-self> [<justify-self>]`.
    pub const PLACE_SELF: &'static str = "place-self";
    /// `justify-self`: horizontal self-alignment.
    pub const JUSTIFY_SELF: &'static str = "justify-self";
    /// `align-self`: vertical self-alignment.
    pub const ALIGN_SELF: &'static str = "align-self";
    /// `width`: explicit width.
    pub const WIDTH: &'static str = "width";
    /// `height`: explicit height.
    pub const HEIGHT: &'static str = "height";

    /// Creates an empty style.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`, returning the style for chaining.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Sets `key` to `value`, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Returns the raw value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Removes `key`, returning its previous value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }

    /// Returns `true` if no keys are set.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of keys set.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Copies every entry of `other` into `self`; entries in `other` win.
    pub fn merge(&mut self, other: &Self) {
        for (k, v) in &other.entries {
            self.entries.insert(k.clone(), v.clone());
        }
    }

    /// Iterates over entries in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Style {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut style = Self::new();
        for (k, v) in iter {
            style.set(k, v);
        }
        style
    }
}

/// Errors reported by the strict style parsers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StyleError {
    /// The value was empty or only whitespace.
    Empty,
    /// A track token was not a length, `auto`, `min-content` or `<n>fr`.
    InvalidTrack(String),
    /// A length was not a non-negative number, optionally suffixed with `px`.
    InvalidLength(String),
    /// A grid line was not a positive integer (or `span <n>` in an end position).
    InvalidLine(String),
    /// A grid line or span was larger than [`GridPlacement::MAX_LINE`].
    LineOutOfRange(u32),
    /// A `grid-area` had more than four components.
    TooManyLines(usize),
    /// `span` was used for a start line.
    SpanInStart,
    /// An alignment keyword was not recognized.
    InvalidAlign(String),
}

impl fmt::Display for StyleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("empty style value"),
            Self::InvalidTrack(t) => write!(f, "invalid track sizing function `{t}`"),
            Self::InvalidLength(t) => write!(f, "invalid length `{t}`"),
            Self::InvalidLine(t) => write!(f, "invalid grid line `{t}`"),
            Self::LineOutOfRange(n) => {
                write!(f, "grid line {n} is past {}", GridPlacement::MAX_LINE)
            }
            Self::TooManyLines(n) => write!(f, "grid-area takes at most 4 lines, got {n}"),
            Self::SpanInStart => f.write_str("`span` is only supported for end lines"),
            Self::InvalidAlign(t) => write!(f, "invalid self-alignment `{t}`"),
        }
    }
}

impl core::error::Error for StyleError {}

/// Parses a non-negative length: `12`, `12.5` or `12px`.
pub(crate) fn parse_length(s: &str) -> Result<f64, StyleError> {
    let t = s.trim();
    if t.is_empty() {
        return Err(StyleError::Empty);
    }
    let number = t.strip_suffix("px").unwrap_or(t);
    match number.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
        _ => Err(StyleError::InvalidLength(t.to_string())),
    }
}

/// How a node lays out its children.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Display {
    /// No tracks of its own: content-sized, every child in the single implicit cell.
    #[default]
    Passthrough,
    /// The grid algorithm.
    Grid,
    /// Requested flex layout. There is no flex algorithm; this runs the grid algorithm.
    Flex,
}

impl Display {
    /// Parses a `display` value. Never fails: unknown values select the grid algorithm.
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "" | "none" | "block" | "inline" | "contents" => Self::Passthrough,
            "flex" | "inline-flex" => Self::Flex,
            _ => Self::Grid,
        }
    }

    /// Returns `true` if children are placed by the grid algorithm.
    pub fn is_grid(self) -> bool {
        !matches!(self, Self::Passthrough)
    }
}

/// The sizing function of a single track.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TrackSizing {
    /// A fixed length in pixels.
    Fixed(f64),
    /// Sized to the natural size of its items.
    Auto,
    /// Sized to the min-content size of its items.
    MinContent,
    /// A share of the leftover space, proportional to the weight.
    Flex(f64),
}

impl TrackSizing {
    /// Returns `true` for `auto` and `min-content`.
    pub fn is_content_based(self) -> bool {
        matches!(self, Self::Auto | Self::MinContent)
    }

    /// Returns `true` for `fr` tracks.
    pub fn is_flexible(self) -> bool {
        matches!(self, Self::Flex(_))
    }

    /// Returns the `fr` weight, or `0.0` for non-flexible tracks.
    pub fn flex_weight(self) -> f64 {
        match self {
            Self::Flex(w) => w,
            _ => 0.0,
        }
    }
}

impl FromStr for TrackSizing {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        match t {
            "" => Err(StyleError::Empty),
            "auto" => Ok(Self::Auto),
            "min-content" => Ok(Self::MinContent),
            _ => {
                if let Some(weight) = t.strip_suffix("fr") {
                    return match weight.parse::<f64>() {
                        Ok(w) if w.is_finite() && w >= 0.0 => Ok(Self::Flex(w)),
                        _ => Err(StyleError::InvalidTrack(t.to_string())),
                    };
                }
                parse_length(t)
                    .map(Self::Fixed)
                    .map_err(|_| StyleError::InvalidTrack(t.to_string()))
            }
        }
    }
}

/// Track lists are short; four tracks per axis covers the common chart layouts inline.
pub(crate) type TrackList = SmallVec<[TrackSizing; 4]>;

/// Declared row and column tracks of a grid container.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GridTemplate {
    /// Row tracks, top to bottom.
    pub rows: TrackList,
    /// Column tracks, left to right.
    pub columns: TrackList,
}

impl GridTemplate {
    /// Parses a template, replacing unparsable tokens with `auto`.
    pub fn parse_lenient(value: &str) -> Self {
        let (rows, columns) = split_template(value);
        Self {
            rows: tokens_lenient(rows),
            columns: tokens_lenient(columns),
        }
    }
}

impl FromStr for GridTemplate {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(StyleError::Empty);
        }
        let (rows, columns) = split_template(s);
        Ok(Self {
            rows: tokens_strict(rows)?,
            columns: tokens_strict(columns)?,
        })
    }
}

fn split_template(value: &str) -> (&str, &str) {
    value.split_once('/').unwrap_or((value, "auto"))
}

fn tokens_strict(list: &str) -> Result<TrackList, StyleError> {
    list.split_whitespace()
        .map(str::parse::<TrackSizing>)
        .collect()
}

fn tokens_lenient(list: &str) -> TrackList {
    list.split_whitespace()
        .map(|token| {
            token.parse::<TrackSizing>().unwrap_or_else(|_err| {
                #[cfg(feature = "tracing")]
                tracing::warn!(%token, error = %_err, "treating track as `auto`");
                TrackSizing::Auto
            })
        })
        .collect()
}

/// The end of a grid span.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GridLineEnd {
    /// One track past the start.
    #[default]
    Auto,
    /// An explicit 1-indexed line.
    Line(u32),
    /// A number of tracks past the start.
    Span(u32),
}

/// A parsed `grid-area` value, before normalization into a [`GridArea`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridPlacement {
    /// 1-indexed row start line.
    pub row_start: u32,
    /// 1-indexed column start line.
    pub col_start: u32,
    /// Row end.
    pub row_end: GridLineEnd,
    /// Column end.
    pub col_end: GridLineEnd,
}

impl GridPlacement {
    /// Largest accepted line number or span. Larger values place the item at the origin cell,
    /// so one item never grows the implicit grid past about twice this many tracks.
    pub const MAX_LINE: u32 = 1000;

    /// Resolves ends and enforces `end > start` on both axes.
    pub fn to_area(self) -> GridArea {
        let end = |start: u32, end: GridLineEnd| -> usize {
            let start = start as usize;
            match end {
                GridLineEnd::Auto => start + 1,
                GridLineEnd::Line(l) => (l as usize).max(start + 1),
                GridLineEnd::Span(n) => start + (n as usize).max(1),
            }
        };
        GridArea {
            row_start: self.row_start as usize,
            col_start: self.col_start as usize,
            row_end: end(self.row_start, self.row_end),
            col_end: end(self.col_start, self.col_end),
        }
    }
}

impl FromStr for GridPlacement {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(StyleError::Empty);
        }
        let parts: SmallVec<[&str; 4]> = s.split('/').map(str::trim).collect();
        if parts.len() > 4 {
            return Err(StyleError::TooManyLines(parts.len()));
        }
        let start = |i: usize| -> Result<u32, StyleError> {
            match parts.get(i) {
                None => Ok(1),
                Some(p) if p.starts_with("span") => Err(StyleError::SpanInStart),
                Some(p) => parse_line(p),
            }
        };
        let end = |i: usize| -> Result<GridLineEnd, StyleError> {
            match parts.get(i) {
                None => Ok(GridLineEnd::Auto),
                Some(p) => match p.strip_prefix("span") {
                    Some(n) => parse_line(n).map(GridLineEnd::Span),
                    None => parse_line(p).map(GridLineEnd::Line),
                },
            }
        };
        Ok(Self {
            row_start: start(0)?,
            col_start: start(1)?,
            row_end: end(2)?,
            col_end: end(3)?,
        })
    }
}

fn parse_line(s: &str) -> Result<u32, StyleError> {
    let t = s.trim();
    match t.parse::<u32>() {
        Ok(n) if n > GridPlacement::MAX_LINE => Err(StyleError::LineOutOfRange(n)),
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(StyleError::InvalidLine(t.to_string())),
    }
}

/// Self-alignment of an item inside its grid area, along one axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelfAlign {
    /// Natural size, at the start edge.
    Start,
    /// Natural size, centered.
    Center,
    /// Natural size, at the end edge.
    End,
    /// Fill the whole area.
    #[default]
    Stretch,
}

impl SelfAlign {
    /// Parses a keyword, failing closed to [`SelfAlign::Stretch`].
    pub fn parse_lenient(value: &str) -> Self {
        value.parse().unwrap_or_else(|_err: StyleError| {
            #[cfg(feature = "tracing")]
            tracing::warn!(value, error = %_err, "treating alignment as `stretch`");
            Self::Stretch
        })
    }
}

impl FromStr for SelfAlign {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" => Err(StyleError::Empty),
            "start" | "self-start" | "flex-start" | "left" | "top" => Ok(Self::Start),
            "center" => Ok(Self::Center),
            "end" | "self-end" | "flex-end" | "right" | "bottom" => Ok(Self::End),
            "stretch" | "normal" => Ok(Self::Stretch),
            other => Err(StyleError::InvalidAlign(other.to_string())),
        }
    }
}

/// Per-axis alignment as written; `None` means "not specified".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlaceSelf {
    /// Vertical alignment (`align-self`).
    pub align: Option<SelfAlign>,
    /// Horizontal alignment (`justify-self`).
    pub justify: Option<SelfAlign>,
}

impl PlaceSelf {
    /// Reads `place-self`, then lets `align-self` / `justify-self` override each axis.
    pub fn from_style(style: &Style) -> Self {
        let mut out = Self::default();
        if let Some(v) = style.get(Style::PLACE_SELF) {
            let mut words = v.split_whitespace();
            if let Some(first) = words.next() {
                let align = SelfAlign::parse_lenient(first);
                out.align = Some(align);
                out.justify = Some(words.next().map_or(align, SelfAlign::parse_lenient));
            }
        }
        if let Some(v) = style.get(Style::ALIGN_SELF) {
            out.align = Some(SelfAlign::parse_lenient(v));
        }
        if let Some(v) = style.get(Style::JUSTIFY_SELF) {
            out.justify = Some(SelfAlign::parse_lenient(v));
        }
        out
    }
}

/// The layout-relevant view of a [`Style`], with every default applied.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResolvedStyle {
    /// Layout mode.
    pub display: Display,
    /// Declared tracks; empty for passthrough nodes.
    pub template: GridTemplate,
    /// Explicit placement, or `None` for auto placement.
    pub area: Option<GridArea>,
    /// Self-alignment as written.
    pub place_self: PlaceSelf,
    /// Explicit width.
    pub width: Option<f64>,
    /// Explicit height.
    pub height: Option<f64>,
}

impl ResolvedStyle {
    /// Reads every layout key of `style`, recovering from malformed values.
    pub fn resolve(style: &Style) -> Self {
        let display = style.get(Style::DISPLAY).map_or_else(Display::default, Display::parse);
        #[cfg(feature = "tracing")]
        if display == Display::Flex {
            tracing::debug!("`display: flex` is laid out with the grid algorithm");
        }

        let template = match style.get(Style::GRID_TEMPLATE) {
            Some(t) if display.is_grid() => GridTemplate::parse_lenient(t),
            _ => GridTemplate::default(),
        };

        let area = style.get(Style::GRID_AREA).map(|v| {
            v.parse::<GridPlacement>().map_or_else(
                |_err| {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(value = v, error = %_err, "placing item at the origin cell");
                    GridArea::ORIGIN
                },
                GridPlacement::to_area,
            )
        });

        Self {
            display,
            template,
            area,
            place_self: PlaceSelf::from_style(style),
            width: explicit_length(style, Style::WIDTH),
            height: explicit_length(style, Style::HEIGHT),
        }
    }

    /// Horizontal alignment; unspecified alignment stretches, explicit width or not.
    pub fn justify(&self) -> SelfAlign {
        self.place_self.justify.unwrap_or_default()
    }

    /// Vertical alignment; unspecified alignment stretches.
    pub fn align(&self) -> SelfAlign {
        self.place_self.align.unwrap_or_default()
    }
}

fn explicit_length(style: &Style, key: &str) -> Option<f64> {
    let value = style.get(key)?;
    match parse_length(value) {
        Ok(v) => Some(v),
        Err(_err) => {
            #[cfg(feature = "tracing")]
            tracing::warn!(key, value, error = %_err, "ignoring explicit size");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_parses_every_track_kind() {
        let t: GridTemplate = "auto 20px / min-content 1fr 2.5fr 40".parse().unwrap();
        assert_eq!(t.rows.as_slice(), &[TrackSizing::Auto, TrackSizing::Fixed(20.0)]);
        assert_eq!(
            t.columns.as_slice(),
            &[
                TrackSizing::MinContent,
                TrackSizing::Flex(1.0),
                TrackSizing::Flex(2.5),
                TrackSizing::Fixed(40.0),
            ]
        );
    }

    #[test]
    fn template_without_slash_declares_rows() {
        let t: GridTemplate = "10 20".parse().unwrap();
        assert_eq!(t.rows.len(), 2);
        assert_eq!(t.columns.as_slice(), &[TrackSizing::Auto]);
    }

    #[test]
    fn lenient_template_degrades_bad_tokens_to_auto() {
        assert!("auto / wide".parse::<GridTemplate>().is_err());
        let t = GridTemplate::parse_lenient("auto / wide -3 1fr");
        assert_eq!(
            t.columns.as_slice(),
            &[TrackSizing::Auto, TrackSizing::Auto, TrackSizing::Flex(1.0)]
        );
    }

    #[test]
    fn grid_area_normalizes_ends() {
        let a = "1 / 1 / 1 / 3".parse::<GridPlacement>().unwrap().to_area();
        assert_eq!(a, GridArea::new(1, 1, 2, 3));
        let b = "2 / 3".parse::<GridPlacement>().unwrap().to_area();
        assert_eq!(b, GridArea::new(2, 3, 3, 4));
        let c = "1 / 2 / span 2 / span 3"
            .parse::<GridPlacement>()
            .unwrap()
            .to_area();
        assert_eq!(c, GridArea::new(1, 2, 3, 5));
    }

    #[test]
    fn grid_area_rejects_malformed_values() {
        assert_eq!(
            "a / 1".parse::<GridPlacement>(),
            Err(StyleError::InvalidLine("a".into()))
        );
        assert_eq!(
            "0 / 1".parse::<GridPlacement>(),
            Err(StyleError::InvalidLine("0".into()))
        );
        assert_eq!(
            "1/1/2/2/3".parse::<GridPlacement>(),
            Err(StyleError::TooManyLines(5))
        );
        assert_eq!(
            "span 2 / 1".parse::<GridPlacement>(),
            Err(StyleError::SpanInStart)
        );
    }

    #[test]
    fn grid_lines_are_capped() {
        assert_eq!(
            "1 / 1 / 2 / 200000000".parse::<GridPlacement>(),
            Err(StyleError::LineOutOfRange(200_000_000))
        );
        assert_eq!(
            "1 / 1 / span 1001".parse::<GridPlacement>(),
            Err(StyleError::LineOutOfRange(1001))
        );
        assert!("1 / 1 / 2 / 4294967296".parse::<GridPlacement>().is_err());
        let widest = "1000 / 1 / span 1000".parse::<GridPlacement>().unwrap().to_area();
        assert_eq!(widest, GridArea::new(1000, 1, 2000, 2));

        let style = Style::new().with(Style::GRID_AREA, "1 / 1 / 2 / 4294967295");
        assert_eq!(ResolvedStyle::resolve(&style).area, Some(GridArea::ORIGIN));
    }

    #[test]
    fn resolver_recovers_from_malformed_values() {
        let style = Style::new()
            .with(Style::DISPLAY, "grid")
            .with(Style::GRID_AREA, "nope")
            .with(Style::PLACE_SELF, "sideways")
            .with(Style::WIDTH, "-4");
        let r = ResolvedStyle::resolve(&style);
        assert_eq!(r.area, Some(GridArea::ORIGIN));
        assert_eq!(r.justify(), SelfAlign::Stretch);
        assert_eq!(r.align(), SelfAlign::Stretch);
        assert_eq!(r.width, None);
    }

    #[test]
    fn place_self_splits_into_axes() {
        let style = Style::new()
            .with(Style::PLACE_SELF, "end center")
            .with(Style::JUSTIFY_SELF, "start");
        let p = PlaceSelf::from_style(&style);
        assert_eq!(p.align, Some(SelfAlign::End));
        assert_eq!(p.justify, Some(SelfAlign::Start));

        let single = PlaceSelf::from_style(&Style::new().with(Style::PLACE_SELF, "center"));
        assert_eq!(single.align, Some(SelfAlign::Center));
        assert_eq!(single.justify, Some(SelfAlign::Center));
    }

    #[test]
    fn explicit_size_keeps_stretch_default() {
        let r = ResolvedStyle::resolve(&Style::new().with(Style::WIDTH, "12px"));
        assert_eq!(r.width, Some(12.0));
        assert_eq!(r.justify(), SelfAlign::Stretch);
        assert_eq!(r.align(), SelfAlign::Stretch);

        let start = Style::new()
            .with(Style::WIDTH, "12px")
            .with(Style::JUSTIFY_SELF, "start");
        assert_eq!(ResolvedStyle::resolve(&start).justify(), SelfAlign::Start);
    }

    #[test]
    fn display_routes_unknown_values_to_grid() {
        assert_eq!(Display::parse("grid"), Display::Grid);
        assert_eq!(Display::parse("flex"), Display::Flex);
        assert_eq!(Display::parse("table"), Display::Grid);
        assert_eq!(Display::parse("block"), Display::Passthrough);
        assert!(Display::Flex.is_grid());
    }

    #[test]
    fn passthrough_ignores_template() {
        let r = ResolvedStyle::resolve(&Style::new().with(Style::GRID_TEMPLATE, "1fr / 1fr"));
        assert_eq!(r.display, Display::Passthrough);
        assert!(r.template.rows.is_empty());
    }
}
