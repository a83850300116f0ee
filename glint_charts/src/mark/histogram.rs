// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Histogram marks: equal-width bins of a numeric field.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect, Shape as _};

use crate::axis::Tick;
use crate::config::Channel;
use crate::context::{FillOptions, RenderContext, StrokeOptions};
use crate::data::{DataSet, Value};
use crate::float::FloatExt as _;
use crate::format::format_number;
use crate::hit::{HitRegion, HitShape, Selection};
use crate::mark::{MarkOutput, data_label};
use crate::tooltip::TooltipField;
use crate::z_order;

/// Gap between adjacent histogram bars.
const BAR_GAP: f64 = 1.0;

/// Equal-width bin edges over `[lo, hi]`, `bins + 1` entries.
pub(crate) fn bin_edges(lo: f64, hi: f64, bins: u32) -> Vec<f64> {
    let bins = bins.max(1) as usize;
    let hi = if hi > lo { hi } else { lo + 1.0 };
    let width = (hi - lo) / bins as f64;
    (0..=bins).map(|i| lo + i as f64 * width).collect()
}

/// Per-bin counts of `field`'s finite values. The final edge is inclusive.
pub(crate) fn bin_counts(data: &DataSet, field: &str, edges: &[f64]) -> Vec<usize> {
    let n = edges.len().saturating_sub(1);
    let mut counts = alloc::vec![0_usize; n];
    if n == 0 {
        return counts;
    }
    let lo = edges[0];
    let hi = edges[n];
    let width = (hi - lo) / n as f64;
    for row in data.rows() {
        let Some(v) = row.get(field).and_then(Value::as_f64) else {
            continue;
        };
        if v < lo || v > hi {
            continue;
        }
        let idx = (((v - lo) / width).floor() as usize).min(n - 1);
        counts[idx] += 1;
    }
    counts
}

pub(crate) fn render(ctx: &mut RenderContext<'_>) -> MarkOutput {
    let mut out = MarkOutput::default();
    if !ctx.area.is_valid() || ctx.area.width() <= 0.0 {
        return out;
    }
    let Some(enc) = ctx.config.encoding.x.first().cloned() else {
        return out;
    };
    let Some((lo, hi)) = ctx.data.numeric_extent(&enc.field) else {
        return out;
    };
    let (Some(x), Some(y)) = (
        ctx.scales.get(Channel::X).cloned(),
        ctx.scales.get(Channel::Y).cloned(),
    ) else {
        return out;
    };

    let bins = enc.bin.map_or(ctx.config.mark.bins, |b| b.maxbins);
    let edges = bin_edges(lo, hi, bins);
    let counts = bin_counts(ctx.data, &enc.field, &edges);
    let baseline = ctx.area.bottom;
    let paint = ctx.colors.series(0);

    out.x_ticks = Some(
        edges
            .iter()
            .filter_map(|e| {
                Some(Tick {
                    pos: x.position(&Value::Number(*e))?,
                    label: format_number(*e),
                })
            })
            .collect(),
    );

    for (i, count) in counts.iter().enumerate() {
        if *count == 0 {
            continue;
        }
        let (Some(x0), Some(x1)) = (
            x.position(&Value::Number(edges[i])),
            x.position(&Value::Number(edges[i + 1])),
        ) else {
            continue;
        };
        let Some(top) = y.position(&Value::Number(*count as f64)) else {
            continue;
        };
        let rect = Rect::new(
            x0.min(x1) + BAR_GAP / 2.0,
            top.min(baseline),
            x0.max(x1) - BAR_GAP / 2.0,
            baseline,
        );
        if rect.width() <= 0.0 {
            continue;
        }
        ctx.fill_path(
            &rect.to_path(0.1),
            &paint,
            rect,
            FillOptions {
                opacity: ctx.config.mark.opacity,
                z: z_order::SERIES_FILL,
                title: None,
            },
        );
        if let Some(stroke) = ctx.colors.stroke_override() {
            ctx.stroke_path(&rect.to_path(0.1), stroke, StrokeOptions::default());
        }
        if ctx.config.mark.data_labels {
            data_label(
                ctx,
                Point::new(rect.center().x, rect.y0 - 3.0),
                *count as f64,
                crate::axis::AxisTheme::default().label,
            );
        }

        let mut range = format_number(edges[i]);
        range.push_str(" \u{2013} ");
        range.push_str(&format_number(edges[i + 1]));
        ctx.record_hit(HitRegion {
            shape: HitShape::Rect(rect),
            selection: Selection::Series { id: 0 },
            tooltip: alloc::vec![
                TooltipField::new(enc.field.clone(), range),
                TooltipField::new(String::from("count"), format_number(*count as f64)),
            ],
            label: enc.field.clone(),
        });
    }
    out
}

#[cfg(test)]
mod tests {
    extern crate std;

    use glint_scene::{NodeKind, Scene};
    use glint_text::HeuristicTextMeasurer;

    use super::*;
    use crate::config::{ChartConfig, ChartKind, Encoding, FieldEncoding};
    use crate::context::Backend;
    use crate::data::Row;
    use crate::layout::GraphArea;
    use crate::palette::{ColorResolver, StaticPalettes};
    use crate::scale::infer_scales;

    #[test]
    fn edges_are_equal_width_and_counts_cover_all_values() {
        let edges = bin_edges(0.0, 10.0, 5);
        assert_eq!(edges, std::vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);

        let data = DataSet::from_rows(
            [0.0, 1.9, 2.0, 5.0, 9.9, 10.0]
                .iter()
                .map(|v| Row::new().with("v", *v)),
        );
        let counts = bin_counts(&data, "v", &edges);
        assert_eq!(counts.iter().sum::<usize>(), 6, "every value lands in a bin");
        assert_eq!(counts[0], 2);
        assert_eq!(counts[4], 2, "the last edge is inclusive");
    }

    #[test]
    fn degenerate_extent_still_produces_a_bin() {
        let edges = bin_edges(3.0, 3.0, 10);
        assert_eq!(edges.len(), 11);
        assert!(edges[10] > edges[0]);
    }

    #[test]
    fn bars_rise_from_the_bottom_and_ticks_label_edges() {
        let mut config = ChartConfig::new(
            ChartKind::Histogram,
            Encoding::new().with_x(FieldEncoding::quantitative("v")),
        );
        config.mark.bins = 2;
        let data = DataSet::from_rows(
            [0.0, 1.0, 1.0, 4.0].iter().map(|v| Row::new().with("v", *v)),
        );
        let area = GraphArea::new(40.0, 20.0, 360.0, 260.0);
        let scales = infer_scales(&config, &data, &area);
        let palettes = StaticPalettes::default();
        let measurer = HeuristicTextMeasurer;
        let mut scene = Scene::new(400.0, 300.0);
        let out;
        let hits;
        {
            let mut ctx = RenderContext::new(
                Backend::Scene(&mut scene),
                &data,
                &scales,
                &config,
                area,
                ColorResolver::new(&palettes, &config),
                &measurer,
            );
            out = render(&mut ctx);
            hits = ctx.hits().to_vec();
        }
        let bars: std::vec::Vec<Rect> = scene
            .content()
            .iter()
            .filter_map(|n| match &n.kind {
                NodeKind::Path(p) if p.fill.is_some() => Some(p.path.bounding_box()),
                _ => None,
            })
            .collect();
        assert_eq!(bars.len(), 2);
        assert!(bars.iter().all(|b| (b.y1 - 260.0).abs() < 1e-6));
        // Bin [0, 2) holds three values, bin [2, 4] one.
        assert!(bars[0].height() > bars[1].height());
        assert_eq!(hits.len(), 2);
        let ticks = out.x_ticks.expect("histograms override x ticks");
        assert_eq!(ticks.len(), 3);
        assert_eq!(ticks[0].label, "0");
        assert_eq!(ticks[2].label, "4");
    }
}
