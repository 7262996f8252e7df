// Copyright 2025 the Faber Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Writes example charts laid out with `faber` to SVG files.
//!
//! Set `RUST_LOG=faber=trace` to watch the measure and arrange passes.

use std::fs;

use faber::{LayoutNode, NodeContent, Size, Style, compute_layout};
use faber_charts::{
    AxisOrient, AxisSpec, ChartSpec, ComponentRegistry, LegendItem, LegendSpec, Series,
    TitleSpec, escape_xml, to_svg_string,
};
use peniko::color::palette::css;
use tracing_subscriber::EnvFilter;

fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let registry = ComponentRegistry::new();
    let viewport = Size::new(480.0, 320.0);

    write("faber_demo_bars.svg", &to_svg_string(&bar_chart().render(&registry, viewport)))?;
    write(
        "faber_demo_scatter.svg",
        &to_svg_string(&scatter_chart().render(&registry, viewport)),
    )?;
    write("faber_demo_grid.svg", &grid_boxes(viewport))?;
    Ok(())
}

fn write(path: &str, contents: &str) -> std::io::Result<()> {
    fs::write(path, contents)?;
    tracing::info!(path, bytes = contents.len(), "wrote demo");
    println!("wrote {path}");
    Ok(())
}

fn bar_chart() -> ChartSpec {
    let months = ["Jan", "Feb", "Mar", "Apr", "May", "Jun"];
    ChartSpec::new()
        .with_title(TitleSpec::new("Monthly rainfall (mm)"))
        .with_axis(AxisSpec::linear(AxisOrient::Left, (0.0, 95.0)))
        .with_axis(AxisSpec::band(AxisOrient::Bottom, months))
        .with_legend(LegendSpec::new([LegendItem::solid("2025", css::STEEL_BLUE)]))
        .with_series(Series::bars(
            [48.0, 39.5, 61.0, 77.25, 92.0, 55.0],
            css::STEEL_BLUE,
        ))
}

fn scatter_chart() -> ChartSpec {
    let a = [(1.0, 2.3), (2.0, 3.1), (3.5, 4.8), (4.0, 4.1), (6.0, 7.9)];
    let b = [(0.5, 6.2), (2.5, 5.5), (3.0, 3.9), (5.0, 2.2), (6.5, 1.4)];
    ChartSpec::new()
        .with_title(TitleSpec::new("Two samples").with_font_size(18.0))
        .with_axis(AxisSpec::linear(AxisOrient::Left, (0.0, 8.0)))
        .with_axis(AxisSpec::linear(AxisOrient::Bottom, (0.0, 7.0)))
        .with_axis(AxisSpec::linear(AxisOrient::Right, (0.0, 8.0)).with_tick_count(2))
        .with_legend(LegendSpec::new([
            LegendItem::solid("rising", css::CRIMSON),
            LegendItem::solid("falling", css::ORANGE),
        ]))
        .with_series(Series::points(a, css::CRIMSON).with_radius(4.0))
        .with_series(Series::points(b, css::ORANGE).with_radius(4.0))
}

/// A bare layout tree with every computed box outlined and named.
fn grid_boxes(viewport: Size) -> String {
    let tree = LayoutNode::grid("auto 1fr auto / min-content 1fr 2fr")
        .with_name("root")
        .with_child(LayoutNode::text("header", 16.0).with_area("1 / 1 / 2 / 4"))
        .with_child(LayoutNode::text("side bar", 12.0).with_area("2 / 1"))
        .with_child(LayoutNode::new().with_name("one fr"))
        .with_child(
            LayoutNode::fixed(60.0, 30.0)
                .with_name("centered")
                .with_style(Style::PLACE_SELF, "center"),
        )
        .with_child(LayoutNode::text("footer", 12.0).with_area("3 / 1 / 4 / 4"));
    let laid_out = compute_layout(&tree, viewport);

    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}">"#,
        viewport.width, viewport.height
    );
    svg.push('\n');
    laid_out.walk(|node, b, depth| {
        let label = match (&node.name, &node.content) {
            (Some(name), _) => name.as_str(),
            (None, NodeContent::Text { text, .. }) => text.as_str(),
            _ => "",
        };
        svg.push_str(&format!(
            r#"<rect {} fill="none" stroke="{}"/><text x="{}" y="{}" font-size="10">{}</text>"#,
            b.svg_attrs(),
            if depth == 0 { "#333" } else { "#c33" },
            b.x + 2.0,
            b.y + 10.0,
            escape_xml(label),
        ));
        svg.push('\n');
    });
    svg.push_str("</svg>\n");
    svg
}
