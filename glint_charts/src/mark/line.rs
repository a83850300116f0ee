// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Line marks: one poly-line (optionally smoothed) per series.

use alloc::vec::Vec;

use kurbo::Point;

use crate::config::{Channel, Interpolation};
use crate::context::{FillOptions, RenderContext, StrokeOptions};
use crate::hit::{HitRegion, HitShape, Selection};
use crate::mark::{
    MarkOutput, Series, circle_path, data_label, poly_path, push_legend, series_list,
    series_owns, series_value, smooth_path,
};
use crate::scale::Scale;
use crate::tooltip::fields_for_row;
use crate::z_order;

/// Stroke width of the series line.
const LINE_WIDTH: f64 = 2.0;

/// Radius of the invisible hover target around each point.
const HOVER_RADIUS: f64 = 8.0;

pub(crate) fn render(ctx: &mut RenderContext<'_>) -> MarkOutput {
    let out = MarkOutput::default();
    if !ctx.area.is_valid() || ctx.area.width() <= 0.0 {
        return out;
    }
    let series = series_list(ctx.config, ctx.data);
    push_legend(ctx, &series);
    for s in &series {
        render_series(ctx, s);
    }
    out
}

/// The sampled points of one series, split into runs at missing values.
///
/// Rows owned by other series are skipped outright, never treated as gaps.
/// On a band x scale the scale domain drives sampling instead of row order:
/// every category yields one point per series, with zero filled in where the
/// series has no value, so every series spans the full domain. The row index
/// is `None` for such synthesized points.
fn series_runs(ctx: &RenderContext<'_>, series: &Series) -> Vec<Vec<(Point, Option<usize>)>> {
    let Some(x_field) = ctx.config.encoding.x.first().map(|f| f.field.clone()) else {
        return Vec::new();
    };
    let (Some(x), Some(y)) = (ctx.scales.get(Channel::X), ctx.scales.get(Channel::Y)) else {
        return Vec::new();
    };

    if let Scale::Band(band) = x {
        let mut run: Vec<(Point, Option<usize>)> = Vec::new();
        for cat in band.domain() {
            let Some(px) = x.center(&crate::data::Value::from(cat.as_str())) else {
                continue;
            };
            let sample = ctx
                .data
                .rows()
                .iter()
                .enumerate()
                .filter(|(_, row)| series_owns(ctx.config, series, row))
                .find(|(_, row)| row.get(&x_field).is_some_and(|v| v.category() == *cat))
                .map(|(row_idx, row)| (row_idx, series_value(ctx.config, series, row)));
            let (row_idx, v) = match sample {
                Some((i, Some(v))) => (Some(i), v),
                Some((_, None)) | None => (None, 0.0),
            };
            if let Some(py) = y.position(&crate::data::Value::Number(v)) {
                run.push((Point::new(px, py), row_idx));
            }
        }
        if run.is_empty() {
            return Vec::new();
        }
        return alloc::vec![run];
    }

    let mut runs = Vec::new();
    let mut run: Vec<(Point, Option<usize>)> = Vec::new();
    for (row_idx, row) in ctx.data.rows().iter().enumerate() {
        if !series_owns(ctx.config, series, row) {
            continue;
        }
        let point = row.get(&x_field).and_then(|xv| {
            let px = x.center(xv)?;
            let v = series_value(ctx.config, series, row)?;
            let py = y.position(&crate::data::Value::Number(v))?;
            Some(Point::new(px, py))
        });
        match point {
            Some(p) => run.push((p, Some(row_idx))),
            // A missing sample breaks the line.
            None => {
                if !run.is_empty() {
                    runs.push(core::mem::take(&mut run));
                }
            }
        }
    }
    if !run.is_empty() {
        runs.push(run);
    }
    runs
}

fn render_series(ctx: &mut RenderContext<'_>, series: &Series) {
    let runs = series_runs(ctx, series);
    let paint = ctx.colors.series(series.id);
    let color = ctx.colors.stroke_override().unwrap_or(paint.color);
    let smooth = ctx.config.mark.interpolation == Interpolation::Monotone;

    for run in &runs {
        let points: Vec<Point> = run.iter().map(|(p, _)| *p).collect();
        if points.len() > 1 {
            let path = if smooth {
                smooth_path(&points)
            } else {
                poly_path(&points)
            };
            ctx.stroke_path(
                &path,
                color,
                StrokeOptions {
                    width: LINE_WIDTH,
                    opacity: ctx.config.mark.opacity,
                    z: z_order::SERIES_STROKE,
                    ..StrokeOptions::default()
                },
            );
            if ctx.series_selected(series.id) {
                ctx.stroke_path(
                    &path,
                    color,
                    StrokeOptions {
                        width: LINE_WIDTH + 2.0,
                        dash: alloc::vec![2.0, 4.0],
                        opacity: 0.6,
                        z: z_order::SERIES_STROKE,
                    },
                );
            }
        }
        for (p, row_idx) in run {
            if ctx.config.mark.points || points.len() == 1 {
                let marker = circle_path(*p, ctx.config.mark.point_size);
                ctx.fill_solid(
                    &marker,
                    color,
                    FillOptions {
                        z: z_order::SERIES_POINTS,
                        ..FillOptions::default()
                    },
                );
            }
            // Zero-filled points have no backing row: no label, no hit.
            let Some(row_idx) = *row_idx else {
                continue;
            };
            if ctx.config.mark.data_labels {
                let v = series_value(ctx.config, series, &ctx.data.rows()[row_idx]);
                if let Some(v) = v {
                    data_label(
                        ctx,
                        Point::new(p.x, p.y - 6.0),
                        v,
                        crate::axis::AxisTheme::default().label,
                    );
                }
            }
            let tooltip = fields_for_row(&ctx.data.rows()[row_idx], ctx.columns);
            ctx.record_hit(HitRegion {
                shape: HitShape::Circle {
                    center: *p,
                    radius: HOVER_RADIUS.max(ctx.config.mark.point_size),
                },
                selection: Selection::Series { id: series.id },
                tooltip,
                label: series.label.clone(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use glint_scene::{NodeKind, Scene};
    use glint_text::HeuristicTextMeasurer;
    use kurbo::{PathEl, Shape as _};

    use super::*;
    use crate::config::{ChartConfig, ChartKind, Encoding, FieldEncoding, FieldType};
    use crate::context::Backend;
    use crate::data::{DataSet, Row, Value};
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

    fn line_config() -> ChartConfig {
        ChartConfig::new(
            ChartKind::Line,
            Encoding::new()
                .with_x(FieldEncoding::new("t", FieldType::Quantitative))
                .with_y(FieldEncoding::quantitative("v")),
        )
    }

    fn rows(values: &[(f64, Value)]) -> DataSet {
        DataSet::from_rows(
            values
                .iter()
                .map(|(t, v)| Row::new().with("t", *t).with("v", v.clone())),
        )
    }

    #[test]
    fn a_line_connects_the_samples_in_row_order() {
        let data = rows(&[
            (0.0, Value::Number(1.0)),
            (1.0, Value::Number(3.0)),
            (2.0, Value::Number(2.0)),
        ]);
        let (scene, hits) = run(&line_config(), &data);
        let strokes: std::vec::Vec<_> = scene
            .content()
            .iter()
            .filter(|n| matches!(&n.kind, NodeKind::Path(p) if p.stroke.is_some()))
            .collect();
        assert_eq!(strokes.len(), 1);
        assert_eq!(hits.len(), 3, "one hover target per sample");
        assert!(matches!(
            hits[0].shape,
            HitShape::Circle { radius, .. } if radius >= 8.0
        ));
    }

    #[test]
    fn missing_samples_split_the_line_into_runs() {
        let data = rows(&[
            (0.0, Value::Number(1.0)),
            (1.0, Value::Null),
            (2.0, Value::Number(2.0)),
            (3.0, Value::Number(3.0)),
        ]);
        let (scene, _) = run(&line_config(), &data);
        // One two-point line plus one isolated point marker.
        let strokes = scene
            .content()
            .iter()
            .filter(|n| matches!(&n.kind, NodeKind::Path(p) if p.stroke.is_some()))
            .count();
        let fills = scene
            .content()
            .iter()
            .filter(|n| matches!(&n.kind, NodeKind::Path(p) if p.fill.is_some()))
            .count();
        assert_eq!(strokes, 1);
        assert_eq!(fills, 1, "singleton run still shows its sample");
    }

    fn region_config() -> ChartConfig {
        ChartConfig::new(
            ChartKind::Line,
            Encoding::new()
                .with_x(FieldEncoding::nominal("month"))
                .with_y(FieldEncoding::quantitative("v"))
                .with_color(FieldEncoding::nominal("region")),
        )
    }

    fn region_row(month: &str, region: &str, v: f64) -> Row {
        Row::new().with("month", month).with("region", region).with("v", v)
    }

    fn series_strokes(scene: &Scene) -> std::vec::Vec<kurbo::BezPath> {
        scene
            .content()
            .iter()
            .filter(|n| n.z_index == z_order::SERIES_STROKE)
            .filter_map(|n| match &n.kind {
                NodeKind::Path(p) if p.stroke.is_some() => Some(p.path.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn interleaved_color_series_draw_one_line_each() {
        let data = DataSet::from_rows([
            region_row("jan", "north", 2.0),
            region_row("jan", "south", 1.0),
            region_row("feb", "north", 3.0),
            region_row("feb", "south", 2.0),
            region_row("mar", "north", 4.0),
            region_row("mar", "south", 1.0),
        ]);
        let (scene, hits) = run(&region_config(), &data);
        let strokes = series_strokes(&scene);
        assert_eq!(strokes.len(), 2, "one unbroken poly-line per region");
        for path in &strokes {
            let segments = path
                .elements()
                .iter()
                .filter(|el| matches!(el, PathEl::LineTo(_)))
                .count();
            assert_eq!(segments, 2, "three samples, two segments");
        }
        assert_eq!(hits.len(), 6);
    }

    #[test]
    fn series_missing_a_category_gets_a_zero_point() {
        let data = DataSet::from_rows([
            region_row("jan", "north", 2.0),
            region_row("jan", "south", 1.0),
            region_row("feb", "north", 3.0),
            region_row("mar", "north", 4.0),
            region_row("mar", "south", 1.0),
        ]);
        let (scene, hits) = run(&region_config(), &data);
        let strokes = series_strokes(&scene);
        assert_eq!(strokes.len(), 2);
        let north = strokes[0].bounding_box();
        let south = strokes[1].bounding_box();
        assert!(
            (north.x0 - south.x0).abs() < 1e-9 && (north.x1 - south.x1).abs() < 1e-9,
            "both series span the full band domain"
        );
        // The y domain is (0, 4) over (260, 20), so zero sits at the bottom.
        assert!(
            (south.y1 - 260.0).abs() < 1e-6,
            "the absent category reads as zero, got {}",
            south.y1
        );
        assert_eq!(hits.len(), 5, "the synthesized point has no hover target");
    }

    #[test]
    fn monotone_interpolation_emits_curves() {
        let mut config = line_config();
        config.mark.interpolation = Interpolation::Monotone;
        let data = rows(&[
            (0.0, Value::Number(1.0)),
            (1.0, Value::Number(3.0)),
            (2.0, Value::Number(2.0)),
        ]);
        let (scene, _) = run(&config, &data);
        let has_curve = scene.content().iter().any(|n| match &n.kind {
            NodeKind::Path(p) => p
                .path
                .elements()
                .iter()
                .any(|el| matches!(el, PathEl::CurveTo(..))),
            _ => false,
        });
        assert!(has_curve);
    }

    #[test]
    fn point_markers_follow_the_option() {
        let mut config = line_config();
        config.mark.points = true;
        let data = rows(&[(0.0, Value::Number(1.0)), (1.0, Value::Number(2.0))]);
        let (scene, _) = run(&config, &data);
        let markers = scene
            .content()
            .iter()
            .filter_map(|n| match &n.kind {
                NodeKind::Path(p) if p.fill.is_some() => Some(p.path.bounding_box()),
                _ => None,
            })
            .count();
        assert_eq!(markers, 2);
    }
}
