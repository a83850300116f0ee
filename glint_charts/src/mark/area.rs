// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Area marks: filled bands between a value curve and the baseline, or
//! between stack layers.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{BezPath, PathEl, Point};

use crate::config::{Channel, Interpolation};
use crate::context::{FillOptions, RenderContext, StrokeOptions};
use crate::data::Value;
use crate::format::format_number;
use crate::hit::{HitRegion, HitShape, Selection};
use crate::mark::{
    MarkOutput, poly_path, push_legend, series_list, series_value, smooth_path, y_baseline,
};
use crate::tooltip::TooltipField;
use crate::z_order;

/// Stroke width of the band's upper edge.
const EDGE_WIDTH: f64 = 1.5;

/// Hover target radius at each sample.
const HOVER_RADIUS: f64 = 8.0;

pub(crate) fn render(ctx: &mut RenderContext<'_>) -> MarkOutput {
    let out = MarkOutput::default();
    if !ctx.area.is_valid() || ctx.area.width() <= 0.0 {
        return out;
    }
    let series = series_list(ctx.config, ctx.data);
    push_legend(ctx, &series);
    let Some(samples) = collect_samples(ctx, series.len()) else {
        return out;
    };
    if samples.is_empty() {
        return out;
    }

    let stacked = series.len() > 1 && ctx.config.stacking_enabled();
    let smooth = ctx.config.mark.interpolation == Interpolation::Monotone;
    let baseline = y_baseline(ctx);
    let y = ctx.scales.get(Channel::Y).cloned();
    let Some(y) = y else { return out };
    let x_field = ctx
        .config
        .encoding
        .x
        .first()
        .map(|f| f.field.clone())
        .unwrap_or_default();

    // Running per-sign stack bases, one pair per sample.
    let mut pos_base = alloc::vec![0.0_f64; samples.len()];
    let mut neg_base = alloc::vec![0.0_f64; samples.len()];

    for s in &series {
        let mut upper = Vec::with_capacity(samples.len());
        let mut lower = Vec::with_capacity(samples.len());
        let mut hover = Vec::new();
        for (j, sample) in samples.iter().enumerate() {
            // Stacks treat a missing sample as zero so layers stay aligned.
            let v = sample.values.get(s.id).copied().flatten().unwrap_or(0.0);
            let (base, top) = if stacked {
                if v >= 0.0 {
                    let base = pos_base[j];
                    pos_base[j] += v;
                    (base, pos_base[j])
                } else {
                    let base = neg_base[j];
                    neg_base[j] += v;
                    (base, neg_base[j])
                }
            } else {
                (0.0, v)
            };
            let y_top = y
                .position(&Value::Number(top))
                .unwrap_or(baseline);
            let y_base = if base == 0.0 {
                baseline
            } else {
                y.position(&Value::Number(base)).unwrap_or(baseline)
            };
            upper.push(Point::new(sample.x_px, y_top));
            lower.push(Point::new(sample.x_px, y_base));
            if sample.values.get(s.id).copied().flatten().is_some() {
                hover.push((Point::new(sample.x_px, y_top), sample.key.clone(), v));
            }
        }
        if upper.len() < 2 {
            continue;
        }

        let path = band_path(&upper, &lower, smooth);
        let paint = ctx.colors.series(s.id);
        let bounds = kurbo::Rect::new(
            upper[0].x,
            upper.iter().map(|p| p.y).fold(f64::INFINITY, f64::min),
            upper[upper.len() - 1].x,
            lower.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max),
        );
        ctx.fill_path(
            &path,
            &paint,
            bounds,
            FillOptions {
                opacity: ctx.config.mark.opacity,
                z: z_order::SERIES_FILL,
                title: None,
            },
        );
        let edge = if smooth {
            smooth_path(&upper)
        } else {
            poly_path(&upper)
        };
        let edge_color = ctx.colors.stroke_override().unwrap_or(paint.color);
        ctx.stroke_path(
            &edge,
            edge_color,
            StrokeOptions {
                width: EDGE_WIDTH,
                z: z_order::SERIES_STROKE,
                ..StrokeOptions::default()
            },
        );
        if ctx.series_selected(s.id) {
            ctx.stroke_path(
                &edge,
                edge_color,
                StrokeOptions {
                    width: EDGE_WIDTH + 2.0,
                    dash: alloc::vec![2.0, 4.0],
                    opacity: 0.6,
                    z: z_order::SERIES_STROKE,
                },
            );
        }
        for (p, key, v) in hover {
            ctx.record_hit(HitRegion {
                shape: HitShape::Circle {
                    center: p,
                    radius: HOVER_RADIUS,
                },
                selection: Selection::Series { id: s.id },
                tooltip: alloc::vec![
                    TooltipField::new(x_field.clone(), key),
                    TooltipField::new(
                        if s.label.is_empty() {
                            String::from("value")
                        } else {
                            s.label.clone()
                        },
                        format_number(v),
                    ),
                ],
                label: s.label.clone(),
            });
        }
    }
    out
}

/// One x slot: its pixel position, display key, and per-series values.
struct Sample {
    x_px: f64,
    key: String,
    values: Vec<Option<f64>>,
}

/// Collects distinct x values in row order, with per-series values from the
/// first matching row.
fn collect_samples(ctx: &RenderContext<'_>, series_count: usize) -> Option<Vec<Sample>> {
    let x_field = &ctx.config.encoding.x.first()?.field;
    let x = ctx.scales.get(Channel::X)?;
    let series = series_list(ctx.config, ctx.data);
    debug_assert_eq!(series.len(), series_count);

    let mut samples: Vec<Sample> = Vec::new();
    let mut seen: Vec<String> = Vec::new();
    for row in ctx.data.rows() {
        let Some(xv) = row.get(x_field) else { continue };
        let key = xv.category();
        let slot = match seen.iter().position(|k| *k == key) {
            Some(i) => i,
            None => {
                let Some(x_px) = x.center(xv) else { continue };
                seen.push(key.clone());
                samples.push(Sample {
                    x_px,
                    key,
                    values: alloc::vec![None; series_count],
                });
                samples.len() - 1
            }
        };
        for s in &series {
            if samples[slot].values[s.id].is_none() {
                samples[slot].values[s.id] = series_value(ctx.config, s, row);
            }
        }
    }
    Some(samples)
}

/// Builds the closed band outline: the upper edge forward, the lower edge
/// backward.
fn band_path(upper: &[Point], lower: &[Point], smooth: bool) -> BezPath {
    let mut path = if smooth {
        smooth_path(upper)
    } else {
        poly_path(upper)
    };
    let reversed: Vec<Point> = lower.iter().rev().copied().collect();
    let back = if smooth {
        smooth_path(&reversed)
    } else {
        poly_path(&reversed)
    };
    for el in back.elements() {
        match *el {
            PathEl::MoveTo(p) => path.line_to(p),
            other => path.push(other),
        }
    }
    path.close_path();
    path
}
