// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scatter marks: one circle per row, optionally size-encoded.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Point;

use crate::config::Channel;
use crate::context::{FillOptions, RenderContext, StrokeOptions};
use crate::data::{Row, Value};
use crate::hit::{HitRegion, HitShape, Selection};
use crate::legend::LegendItem;
use crate::mark::{MarkOutput, circle_path, data_label, push_legend, series_list, series_value};
use crate::tooltip::fields_for_row;
use crate::z_order;

/// Minimum hover target radius.
const HOVER_RADIUS: f64 = 8.0;

pub(crate) fn render(ctx: &mut RenderContext<'_>) -> MarkOutput {
    let out = MarkOutput::default();
    if !ctx.area.is_valid() || ctx.area.width() <= 0.0 {
        return out;
    }
    let xs = ctx.config.encoding.x.clone();
    let ys = ctx.config.encoding.y.clone();
    let (Some(first_x), Some(_)) = (xs.first(), ys.first()) else {
        return out;
    };

    // Several bound fields form the x/y cross product, one independent
    // series per pair.
    if xs.len() > 1 || ys.len() > 1 {
        let mut legend = Vec::new();
        let mut id = 0;
        for xe in &xs {
            for ye in &ys {
                let label = if xs.len() > 1 {
                    alloc::format!("{} / {}", xe.axis_title(), ye.axis_title())
                } else {
                    String::from(ye.axis_title())
                };
                legend.push(LegendItem::new(label.clone(), ctx.colors.series(id)));
                render_points(ctx, id, &label, &xe.field, &|row| {
                    row.get(&ye.field).and_then(Value::as_f64)
                });
                id += 1;
            }
        }
        if ctx.config.legend_visible() {
            ctx.legend_items = legend;
        }
        return out;
    }

    let config = ctx.config;
    let series = series_list(config, ctx.data);
    push_legend(ctx, &series);
    for s in &series {
        render_points(ctx, s.id, &s.label, &first_x.field, &|row| {
            series_value(config, s, row)
        });
    }
    out
}

/// Draws one point series: a circle per row with a usable coordinate pair,
/// plus its hover target and optional data label.
fn render_points(
    ctx: &mut RenderContext<'_>,
    id: usize,
    label: &str,
    x_field: &str,
    value_of: &dyn Fn(&Row) -> Option<f64>,
) {
    let paint = ctx.colors.series(id);
    let size_field = ctx.config.encoding.size.as_ref().map(|f| f.field.clone());

    for row_idx in 0..ctx.data.rows().len() {
        let point = {
            let row = &ctx.data.rows()[row_idx];
            let (Some(x), Some(y)) = (ctx.scales.get(Channel::X), ctx.scales.get(Channel::Y))
            else {
                return;
            };
            let px = row.get(x_field).and_then(|v| x.center(v));
            let v = value_of(row);
            match (px, v) {
                (Some(px), Some(v)) => y
                    .position(&crate::data::Value::Number(v))
                    .map(|py| Point::new(px, py)),
                _ => None,
            }
        };
        let Some(p) = point else { continue };

        let radius = size_field
            .as_deref()
            .and_then(|f| {
                let row = &ctx.data.rows()[row_idx];
                let v = row.get(f)?.clone();
                ctx.scales.get(Channel::Size)?.position(&v)
            })
            .unwrap_or(ctx.config.mark.point_size);

        let marker = circle_path(p, radius);
        ctx.fill_path(
            &marker,
            &paint,
            kurbo::Rect::new(p.x - radius, p.y - radius, p.x + radius, p.y + radius),
            FillOptions {
                opacity: ctx.config.mark.opacity,
                z: z_order::SERIES_POINTS,
                title: None,
            },
        );
        if let Some(stroke) = ctx.colors.stroke_override() {
            ctx.stroke_path(&marker, stroke, StrokeOptions::default());
        }
        if ctx.series_selected(id) {
            ctx.stroke_path(
                &marker,
                paint.color,
                StrokeOptions {
                    width: 1.5,
                    dash: alloc::vec![2.0, 2.0],
                    z: z_order::SERIES_POINTS,
                    ..StrokeOptions::default()
                },
            );
        }
        if ctx.config.mark.data_labels {
            if let Some(v) = value_of(&ctx.data.rows()[row_idx]) {
                data_label(
                    ctx,
                    Point::new(p.x, p.y - radius - 3.0),
                    v,
                    crate::axis::AxisTheme::default().label,
                );
            }
        }
        let tooltip = fields_for_row(&ctx.data.rows()[row_idx], ctx.columns);
        ctx.record_hit(HitRegion {
            shape: HitShape::Circle {
                center: p,
                radius: radius.max(HOVER_RADIUS),
            },
            selection: Selection::Series { id },
            tooltip,
            label: String::from(label),
        });
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use glint_scene::{NodeKind, Scene};
    use glint_text::HeuristicTextMeasurer;
    use kurbo::Shape as _;

    use super::*;
    use crate::config::{ChartConfig, ChartKind, Encoding, FieldEncoding, FieldType};
    use crate::context::Backend;
    use crate::data::{DataSet, Row};
    use crate::layout::GraphArea;
    use crate::palette::{ColorResolver, StaticPalettes};
    use crate::scale::infer_scales;

    fn run(config: &ChartConfig, data: &DataSet) -> (Scene, std::vec::Vec<HitRegion>) {
        let area = GraphArea::new(40.0, 20.0, 360.0, 260.0);
        let scales = infer_scales(config, data, &area);
        let palettes = StaticPalettes::default();
        let measurer = HeuristicTextMeasurer;
        let mut scene = Scene::new(400.0, 300.0);
        let hits;
        {
            let mut ctx = RenderContext::new(
                Backend::Scene(&mut scene),
                data,
                &scales,
                config,
                area,
                ColorResolver::new(&palettes, config),
                &measurer,
            );
            render(&mut ctx);
            hits = ctx.hits().to_vec();
        }
        (scene, hits)
    }

    fn scatter_config() -> ChartConfig {
        ChartConfig::new(
            ChartKind::Scatter,
            Encoding::new()
                .with_x(FieldEncoding::new("x", FieldType::Quantitative))
                .with_y(FieldEncoding::quantitative("y")),
        )
    }

    #[test]
    fn each_row_becomes_a_point_with_a_hover_target() {
        let data = DataSet::from_rows([
            Row::new().with("x", 1.0).with("y", 2.0),
            Row::new().with("x", 3.0).with("y", 4.0),
            Row::new().with("x", 5.0).with("y", 1.0),
        ]);
        let (scene, hits) = run(&scatter_config(), &data);
        let points = scene
            .content()
            .iter()
            .filter(|n| matches!(&n.kind, NodeKind::Path(p) if p.fill.is_some()))
            .count();
        assert_eq!(points, 3);
        assert_eq!(hits.len(), 3);
        assert!(hits.iter().all(|h| matches!(
            h.shape,
            HitShape::Circle { radius, .. } if radius >= 8.0
        )));
    }

    #[test]
    fn size_encoding_scales_the_radius() {
        let mut config = scatter_config();
        config.encoding.size = Some(FieldEncoding::quantitative("n"));
        let data = DataSet::from_rows([
            Row::new().with("x", 1.0).with("y", 1.0).with("n", 0.0),
            Row::new().with("x", 2.0).with("y", 2.0).with("n", 100.0),
        ]);
        let (scene, _) = run(&config, &data);
        let radii: std::vec::Vec<f64> = scene
            .content()
            .iter()
            .filter_map(|n| match &n.kind {
                NodeKind::Path(p) if p.fill.is_some() => {
                    Some(p.path.bounding_box().width() / 2.0)
                }
                _ => None,
            })
            .collect();
        assert_eq!(radii.len(), 2);
        assert!((radii[0] - 2.0).abs() < 0.1, "small value -> 2px radius");
        assert!((radii[1] - 10.0).abs() < 0.1, "large value -> 10px radius");
    }

    #[test]
    fn multiple_bound_fields_form_the_cross_product() {
        let config = ChartConfig::new(
            ChartKind::Scatter,
            Encoding::new()
                .with_x(FieldEncoding::quantitative("x1"))
                .with_x(FieldEncoding::quantitative("x2"))
                .with_y(FieldEncoding::quantitative("y1"))
                .with_y(FieldEncoding::quantitative("y2").with_title("second")),
        );
        let data = DataSet::from_rows([
            Row::new()
                .with("x1", 1.0)
                .with("x2", 2.0)
                .with("y1", 3.0)
                .with("y2", 4.0),
            Row::new()
                .with("x1", 5.0)
                .with("x2", 6.0)
                .with("y1", 7.0)
                .with("y2", 8.0),
        ]);
        let (scene, hits) = run(&config, &data);
        let points = scene
            .content()
            .iter()
            .filter(|n| matches!(&n.kind, NodeKind::Path(p) if p.fill.is_some()))
            .count();
        assert_eq!(points, 8, "two rows times four field pairs");
        assert_eq!(hits.len(), 8);
        let ids: std::collections::BTreeSet<usize> = hits
            .iter()
            .filter_map(|h| match h.selection {
                Selection::Series { id } => Some(id),
                _ => None,
            })
            .collect();
        assert_eq!(ids.len(), 4, "each pair is its own series");
        assert!(hits.iter().any(|h| h.label == "x1 / second"), "pair labels name both fields");
    }

    #[test]
    fn rows_without_coordinates_are_skipped() {
        let data = DataSet::from_rows([
            Row::new().with("x", 1.0).with("y", 2.0),
            Row::new().with("x", 3.0),
        ]);
        let (_, hits) = run(&scatter_config(), &data);
        assert_eq!(hits.len(), 1);
    }
}
