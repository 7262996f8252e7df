// Copyright 2025 the Faber Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! SVG output.
//!
//! Geometry reaches the document only as attributes: every mark is written as one element whose
//! position and size come from its layout-derived geometry, through an [`AttributeWriter`].

extern crate alloc;

use alloc::format;
use alloc::string::{String, ToString};
use core::fmt::Display;

use faber::ComputedBox;
use peniko::Brush;

use crate::chart::ChartScene;
use crate::mark::{MarkPayload, TextAnchor, TextBaseline};

/// Appends ` name="value"` attributes to an element being written.
#[derive(Debug)]
pub struct AttributeWriter<'a> {
    out: &'a mut String,
}

impl<'a> AttributeWriter<'a> {
    /// Starts writing attributes into `out`.
    pub fn new(out: &'a mut String) -> Self {
        Self { out }
    }

    /// Writes one attribute; the value is XML-escaped.
    pub fn attr(&mut self, name: &str, value: impl Display) -> &mut Self {
        let value = escape_xml(&value.to_string());
        self.out.push_str(&format!(r#" {name}="{value}""#));
        self
    }

    /// Writes `x`, `y`, `width` and `height` from a computed box.
    pub fn geometry(&mut self, b: &ComputedBox) -> &mut Self {
        self.out.push(' ');
        self.out.push_str(&b.svg_attrs());
        self
    }

    /// Writes a paint attribute (`fill` or `stroke`) and its opacity when not opaque.
    ///
    /// Only solid brushes are supported; anything else is written as `none`.
    pub fn paint(&mut self, name: &str, brush: &Brush) -> &mut Self {
        match brush {
            Brush::Solid(color) => {
                let rgba = color.to_rgba8();
                self.attr(name, format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b));
                if rgba.a != 255 {
                    self.attr(&format!("{name}-opacity"), f64::from(rgba.a) / 255.0);
                }
                self
            }
            _ => self.attr(name, "none"),
        }
    }
}

/// Writes a scene as a standalone SVG document, marks in paint order.
pub fn to_svg_string(scene: &ChartScene) -> String {
    let (w, h) = (scene.size.width, scene.size.height);
    let mut out = String::new();
    out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg""#);
    AttributeWriter::new(&mut out)
        .attr("viewBox", format!("0 0 {w} {h}"))
        .attr("width", w)
        .attr("height", h);
    out.push_str(">\n");

    for mark in scene.paint_order() {
        match &mark.payload {
            MarkPayload::Rect { rect, fill } => {
                out.push_str("<rect");
                AttributeWriter::new(&mut out)
                    .geometry(&ComputedBox::from(*rect))
                    .paint("fill", fill);
                out.push_str("/>\n");
            }
            MarkPayload::Circle { circle, fill } => {
                out.push_str("<circle");
                AttributeWriter::new(&mut out)
                    .attr("cx", circle.center.x)
                    .attr("cy", circle.center.y)
                    .attr("r", circle.radius)
                    .paint("fill", fill);
                out.push_str("/>\n");
            }
            MarkPayload::Line {
                line,
                stroke,
                stroke_width,
            } => {
                out.push_str("<line");
                AttributeWriter::new(&mut out)
                    .attr("x1", line.p0.x)
                    .attr("y1", line.p0.y)
                    .attr("x2", line.p1.x)
                    .attr("y2", line.p1.y)
                    .paint("stroke", stroke)
                    .attr("stroke-width", stroke_width);
                out.push_str("/>\n");
            }
            MarkPayload::Text(t) => {
                let anchor = match t.anchor {
                    TextAnchor::Start => "start",
                    TextAnchor::Middle => "middle",
                    TextAnchor::End => "end",
                };
                let baseline = match t.baseline {
                    TextBaseline::Middle => "middle",
                    TextBaseline::Alphabetic => "alphabetic",
                    TextBaseline::Hanging => "hanging",
                };
                out.push_str("<text");
                AttributeWriter::new(&mut out)
                    .attr("x", t.pos.x)
                    .attr("y", t.pos.y)
                    .attr("font-size", t.font_size)
                    .attr("text-anchor", anchor)
                    .attr("dominant-baseline", baseline)
                    .paint("fill", &t.fill);
                out.push('>');
                out.push_str(&escape_xml(&t.text));
                out.push_str("</text>\n");
            }
        }
    }

    out.push_str("</svg>\n");
    out
}

/// Escapes the five XML special characters.
pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
