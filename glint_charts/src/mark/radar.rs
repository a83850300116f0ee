// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Radar marks: overlaid polygons on a polar category grid.

use alloc::string::String;
use alloc::vec::Vec;

use core::f64::consts::{FRAC_PI_2, TAU};
use kurbo::{Point, Vec2};

use crate::context::{FillOptions, Label, RenderContext, StrokeOptions};
use crate::float::FloatExt as _;
use crate::format::format_number;
use crate::hit::{HitRegion, HitShape, Selection};
use crate::mark::{MarkOutput, poly_path, push_legend, series_list, series_value};
use crate::tooltip::TooltipField;
use crate::z_order;

/// Number of concentric grid levels.
const LEVELS: usize = 5;

/// Fraction of the half-extent the radar radius uses.
const RADIUS_FRACTION: f64 = 0.85;

/// Series polygon fill opacity.
const FILL_OPACITY: f32 = 0.25;

/// Gap between the rim and a category label.
const LABEL_GAP: f64 = 12.0;

pub(crate) fn render(ctx: &mut RenderContext<'_>) -> MarkOutput {
    let out = MarkOutput::default();
    let area = ctx.area;
    if !area.is_valid() || area.width() <= 0.0 || area.height() <= 0.0 {
        return out;
    }
    let Some(x_field) = ctx.config.encoding.x.first().map(|f| f.field.clone()) else {
        return out;
    };
    let categories = ctx.data.categories(&x_field);
    if categories.is_empty() {
        return out;
    }
    let series = series_list(ctx.config, ctx.data);
    push_legend(ctx, &series);

    let center = area.center();
    let radius = RADIUS_FRACTION * (area.width().min(area.height()) / 2.0);
    let n = categories.len();
    let angle_of = |i: usize| -FRAC_PI_2 + i as f64 * TAU / n as f64;
    let point_at =
        |i: usize, r: f64| center + Vec2::new(angle_of(i).cos(), angle_of(i).sin()) * r;

    // Radial maximum: every series value participates, floor of 1 so an
    // all-zero dataset still draws a grid.
    let mut max_value = 1.0_f64;
    for s in &series {
        for row in ctx.data.rows() {
            if let Some(v) = series_value(ctx.config, s, row) {
                max_value = max_value.max(v);
            }
        }
    }

    render_grid(ctx, &categories, center, radius, max_value, &point_at);

    for s in &series {
        let mut points = Vec::with_capacity(n);
        let mut tooltip = alloc::vec![TooltipField::new("series", s.label.clone())];
        for (i, cat) in categories.iter().enumerate() {
            let v = ctx
                .data
                .rows()
                .iter()
                .find_map(|row| {
                    (row.get(&x_field)?.category() == *cat)
                        .then(|| series_value(ctx.config, s, row))
                        .flatten()
                })
                .unwrap_or(0.0);
            points.push(point_at(i, (v / max_value).clamp(0.0, 1.0) * radius));
            tooltip.push(TooltipField::new(cat.clone(), format_number(v)));
        }
        let mut path = poly_path(&points);
        path.close_path();
        let paint = ctx.colors.series(s.id);
        let bounds = area.rect();
        ctx.fill_path(
            &path,
            &paint,
            bounds,
            FillOptions {
                opacity: FILL_OPACITY * ctx.config.mark.opacity,
                z: z_order::SERIES_FILL,
                title: None,
            },
        );
        let stroke = ctx.colors.stroke_override().unwrap_or(paint.color);
        ctx.stroke_path(
            &path,
            stroke,
            StrokeOptions {
                width: 2.0,
                z: z_order::SERIES_STROKE,
                ..StrokeOptions::default()
            },
        );
        if ctx.series_selected(s.id) {
            ctx.stroke_path(
                &path,
                stroke,
                StrokeOptions {
                    width: 4.0,
                    dash: alloc::vec![2.0, 4.0],
                    opacity: 0.6,
                    z: z_order::SERIES_STROKE,
                },
            );
        }
        ctx.record_hit(HitRegion {
            shape: HitShape::Polygon(points),
            selection: Selection::Series { id: s.id },
            tooltip,
            label: s.label.clone(),
        });
    }
    out
}

fn render_grid(
    ctx: &mut RenderContext<'_>,
    categories: &[String],
    center: Point,
    radius: f64,
    max_value: f64,
    point_at: &impl Fn(usize, f64) -> Point,
) {
    let theme = crate::axis::AxisTheme::default();
    let n = categories.len();

    for level in 1..=LEVELS {
        let r = radius * level as f64 / LEVELS as f64;
        let ring: Vec<Point> = (0..n).map(|i| point_at(i, r)).collect();
        let mut path = poly_path(&ring);
        path.close_path();
        ctx.stroke_path(
            &path,
            theme.grid,
            StrokeOptions {
                z: z_order::GRID_LINES,
                ..StrokeOptions::default()
            },
        );
        // Level values run up the first spoke.
        ctx.draw_text(
            Label::new(
                Point::new(center.x + 3.0, center.y - r),
                format_number(max_value * level as f64 / LEVELS as f64),
                9.0,
                theme.label,
            )
            .baselined(glint_text::TextBaseline::Middle),
            z_order::AXIS_LABELS,
            None,
        );
    }

    for (i, cat) in categories.iter().enumerate() {
        let spoke = poly_path(&[center, point_at(i, radius)]);
        ctx.stroke_path(
            &spoke,
            theme.grid,
            StrokeOptions {
                z: z_order::GRID_LINES,
                ..StrokeOptions::default()
            },
        );
        ctx.draw_text(
            Label::new(
                point_at(i, radius + LABEL_GAP),
                cat.clone(),
                crate::axis::TICK_FONT_SIZE,
                theme.label,
            )
            .anchored(glint_text::TextAnchor::Middle)
            .baselined(glint_text::TextBaseline::Middle),
            z_order::AXIS_LABELS,
            None,
        );
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use glint_scene::{NodeKind, Scene};
    use glint_text::HeuristicTextMeasurer;

    use super::*;
    use crate::config::{ChartConfig, ChartKind, Encoding, FieldEncoding};
    use crate::context::Backend;
    use crate::data::{DataSet, Row};
    use crate::layout::GraphArea;
    use crate::palette::{ColorResolver, StaticPalettes};
    use crate::scale::ScaleSet;

    fn run(config: &ChartConfig, data: &DataSet) -> (Scene, std::vec::Vec<HitRegion>) {
        let scales = ScaleSet::new();
        let palettes = StaticPalettes::default();
        let measurer = HeuristicTextMeasurer;
        let mut scene = Scene::new(400.0, 400.0);
        let hits;
        {
            let mut ctx = RenderContext::new(
                Backend::Scene(&mut scene),
                data,
                &scales,
                config,
                GraphArea::new(20.0, 20.0, 380.0, 380.0),
                ColorResolver::new(&palettes, config),
                &measurer,
            );
            render(&mut ctx);
            hits = ctx.hits().to_vec();
        }
        (scene, hits)
    }

    fn radar_data() -> (ChartConfig, DataSet) {
        let config = ChartConfig::new(
            ChartKind::Radar,
            Encoding::new()
                .with_x(FieldEncoding::nominal("axis"))
                .with_y(FieldEncoding::quantitative("a"))
                .with_y(FieldEncoding::quantitative("b")),
        );
        let data = DataSet::from_rows([
            Row::new().with("axis", "x").with("a", 4.0).with("b", 1.0),
            Row::new().with("axis", "y").with("a", 2.0).with("b", 3.0),
            Row::new().with("axis", "z").with("a", 3.0).with("b", 2.0),
        ]);
        (config, data)
    }

    #[test]
    fn draws_grid_levels_spokes_and_one_polygon_per_series() {
        let (config, data) = radar_data();
        let (scene, hits) = run(&config, &data);
        let strokes = scene
            .content()
            .iter()
            .filter(|n| matches!(&n.kind, NodeKind::Path(p) if p.stroke.is_some()))
            .count();
        // 5 rings + 3 spokes + 2 series outlines.
        assert_eq!(strokes, 10);
        assert_eq!(hits.len(), 2);
        assert!(matches!(&hits[0].shape, HitShape::Polygon(pts) if pts.len() == 3));
    }

    #[test]
    fn vertices_scale_with_the_series_maximum() {
        let (config, data) = radar_data();
        let (_, hits) = run(&config, &data);
        let HitShape::Polygon(pts) = &hits[0].shape else {
            panic!("expected a polygon");
        };
        let center = Point::new(200.0, 200.0);
        // Category "x" holds the maximum (4), so series a's first vertex
        // sits on the rim.
        let rim = RADIUS_FRACTION * 180.0;
        assert!(((pts[0] - center).hypot() - rim).abs() < 1e-6);
        // Series b's tooltip lists every category.
        assert_eq!(hits[1].tooltip.len(), 4);
    }
}
