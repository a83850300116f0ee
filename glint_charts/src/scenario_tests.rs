// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end passes over the public [`Chart`] API.

extern crate std;

use alloc::format;
use alloc::string::ToString;
use alloc::vec::Vec;

use glint_scene::{NodeKind, Scene};
use kurbo::Rect;

use crate::config::{ChartConfig, ChartKind, Encoding, FieldEncoding};
use crate::data::{DataSet, Row};
use crate::engine::Chart;
use crate::hit::HitShape;
use crate::palette::StaticPalettes;

fn render(config: &ChartConfig, data: &DataSet, width: f64, height: f64) -> (Scene, crate::engine::RenderReport) {
    let palettes = StaticPalettes::default();
    let mut scene = Scene::new(width, height);
    let report = Chart::new(config, data, &palettes).render_scene(&mut scene);
    (scene, report)
}

/// Filled mark geometry, excluding legend swatches and backgrounds.
fn fill_rects(scene: &Scene) -> Vec<Rect> {
    use kurbo::Shape as _;
    scene
        .content()
        .iter()
        .filter(|n| n.z_index == crate::z_order::SERIES_FILL)
        .filter_map(|n| match &n.kind {
            NodeKind::Path(p) if p.fill.is_some() => Some(p.path.bounding_box()),
            _ => None,
        })
        .collect()
}

#[test]
fn simple_bar_chart_scales_bars_with_their_values() {
    let config = ChartConfig::new(
        ChartKind::Bar,
        Encoding::new()
            .with_x(FieldEncoding::nominal("region"))
            .with_y(FieldEncoding::quantitative("sales")),
    );
    let data = DataSet::from_rows([
        Row::new().with("region", "west").with("sales", 10.0),
        Row::new().with("region", "east").with("sales", 20.0),
    ]);
    let (scene, report) = render(&config, &data, 400.0, 300.0);
    let bars = fill_rects(&scene);
    assert_eq!(bars.len(), 2);
    assert!(
        (bars[1].height() / bars[0].height() - 2.0).abs() < 1e-6,
        "twice the value, twice the height"
    );
    assert!((bars[0].y1 - bars[1].y1).abs() < 1e-6, "shared baseline");
    assert_eq!(report.hits.len(), 2);
    // Axis labels name both categories.
    let labels: Vec<_> = scene
        .content()
        .iter()
        .filter_map(|n| match &n.kind {
            NodeKind::Text(t) => Some(t.text.clone()),
            _ => None,
        })
        .collect();
    assert!(labels.iter().any(|l| l == "west"));
    assert!(labels.iter().any(|l| l == "east"));
}

#[test]
fn stacked_bars_stack_in_series_order_and_legend_follows() {
    let config = ChartConfig::new(
        ChartKind::Bar,
        Encoding::new()
            .with_x(FieldEncoding::nominal("q"))
            .with_y(FieldEncoding::quantitative("hw").with_title("Hardware"))
            .with_y(FieldEncoding::quantitative("sw").with_title("Software")),
    );
    let data = DataSet::from_rows([
        Row::new().with("q", "q1").with("hw", 4.0).with("sw", 6.0),
        Row::new().with("q", "q2").with("hw", 2.0).with("sw", 3.0),
    ]);
    let (scene, report) = render(&config, &data, 400.0, 300.0);
    let bars = fill_rects(&scene);
    assert_eq!(bars.len(), 4);

    // Per category: the second segment starts exactly where the first ends.
    for pair in bars.chunks_exact(2) {
        assert_eq!(pair[0].x0, pair[1].x0);
        assert!((pair[1].y1 - pair[0].y0).abs() < 1e-6, "no gap, no overlap");
    }
    // The q1 stack spans the full plot height range for the max total (10).
    let q1_top = bars[1].y0;
    let q2_top = bars[3].y0;
    assert!(q1_top < q2_top, "larger total reaches higher");

    // Legend entries appear in encoding order.
    let legend_texts: Vec<_> = scene
        .content()
        .iter()
        .filter_map(|n| match &n.kind {
            NodeKind::Text(t) => Some(t.text.clone()),
            _ => None,
        })
        .filter(|t| t == "Hardware" || t == "Software")
        .collect();
    assert_eq!(legend_texts, ["Hardware", "Software"]);
    assert_eq!(report.hits.len(), 4);
}

#[test]
fn pie_without_numeric_values_counts_occurrences() {
    let config = ChartConfig::new(
        ChartKind::Pie,
        Encoding::new().with_x(FieldEncoding::nominal("status")),
    );
    let data = DataSet::from_rows([
        Row::new().with("status", "ok"),
        Row::new().with("status", "ok"),
        Row::new().with("status", "ok"),
        Row::new().with("status", "failed"),
    ]);
    let (_, report) = render(&config, &data, 400.0, 400.0);
    assert_eq!(report.hits.len(), 2);
    let sweeps: Vec<f64> = report
        .hits
        .iter()
        .filter_map(|h| match &h.shape {
            HitShape::Sector { start, end, .. } => Some(end - start),
            _ => None,
        })
        .collect();
    assert!((sweeps[0] / sweeps[1] - 3.0).abs() < 1e-9, "3 of 4 vs 1 of 4");
    let ok = report.hits.iter().find(|h| h.label == "ok").unwrap();
    assert!(ok.tooltip.iter().any(|f| f.value == "3"));
}

#[test]
fn overflowing_top_legend_wraps_within_the_band() {
    let mut enc = Encoding::new().with_x(FieldEncoding::nominal("cat"));
    for i in 0..20 {
        enc = enc.with_y(FieldEncoding::quantitative(format!("series-number-{i:02}")));
    }
    let mut config = ChartConfig::new(ChartKind::Bar, enc);
    config.layout.show_legend = Some(true);
    let mut row = Row::new().with("cat", "a");
    for i in 0..20 {
        row = row.with(format!("series-number-{i:02}"), 1.0);
    }
    let data = DataSet::from_rows([row]);
    let (scene, report) = render(&config, &data, 300.0, 400.0);

    // Every legend label stays inside the declared width.
    let legend_labels: Vec<_> = scene
        .content()
        .iter()
        .filter_map(|n| match &n.kind {
            NodeKind::Text(t) if t.text.starts_with("series-number")
                || t.text.ends_with('\u{2026}') =>
            {
                Some(t.pos)
            }
            _ => None,
        })
        .collect();
    assert!(legend_labels.len() >= 20);
    for pos in &legend_labels {
        assert!(pos.x >= 0.0 && pos.x <= 300.0);
    }
    // Wrapped rows: labels occupy more than one distinct y.
    let distinct_rows: std::collections::BTreeSet<i64> =
        legend_labels.iter().map(|p| (p.y * 10.0) as i64).collect();
    assert!(distinct_rows.len() > 1, "items wrapped into rows");
    assert_eq!(report.hits.len(), 20, "one bar per series");
}

#[test]
fn svg_output_contains_marks_and_hover_titles() {
    let mut config = ChartConfig::new(
        ChartKind::Bar,
        Encoding::new()
            .with_x(FieldEncoding::nominal("a-very-long-category-name-that-truncates"))
            .with_y(FieldEncoding::quantitative("v")),
    );
    config.layout.title = Some("Report".to_string());
    let data = DataSet::from_rows([
        Row::new()
            .with(
                "a-very-long-category-name-that-truncates",
                "first-category-with-an-unreasonably-long-label",
            )
            .with("v", 1.0),
        Row::new()
            .with(
                "a-very-long-category-name-that-truncates",
                "second-category-with-an-unreasonably-long-label",
            )
            .with("v", 2.0),
    ]);
    let (scene, _) = render(&config, &data, 320.0, 240.0);
    let svg = scene.to_svg();
    assert!(svg.contains("<svg"));
    assert!(svg.contains("<path"));
    assert!(svg.contains("Report"));
    // Truncated tick labels keep their full text as a hover title.
    assert!(svg.contains("\u{2026}"));
    assert!(svg.contains("<title>"));
}
