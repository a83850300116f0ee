// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bar marks: stacked or grouped vertical bars on a band scale.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect, RoundedRect, RoundedRectRadii, Shape as _};

use crate::config::Channel;
use crate::context::{FillOptions, RenderContext, StrokeOptions};
use crate::data::Value;
use crate::format::format_value;
use crate::hit::{HitRegion, HitShape, Selection};
use crate::mark::{MarkOutput, Series, data_label, push_legend, series_list, series_value, y_baseline};
use crate::scale::{Scale, ScaleLinear};
use crate::tooltip::TooltipField;
use crate::z_order;

/// One drawable bar segment.
struct Segment {
    series: usize,
    rect: Rect,
    /// Positive segments round their top corners, negative their bottom.
    upward: bool,
    /// Outermost segment of its sign within the category.
    outer: bool,
    value: f64,
}

pub(crate) fn render(ctx: &mut RenderContext<'_>) -> MarkOutput {
    let out = MarkOutput::default();
    if !ctx.area.is_valid() || ctx.area.width() <= 0.0 {
        return out;
    }
    let Some(Scale::Band(x)) = ctx.scales.get(Channel::X).cloned() else {
        return out;
    };
    let Some(Scale::Linear(y)) = ctx.scales.get(Channel::Y).cloned() else {
        return out;
    };
    let Some(x_field) = ctx.config.encoding.x.first().map(|f| f.field.clone()) else {
        return out;
    };

    let series = series_list(ctx.config, ctx.data);
    push_legend(ctx, &series);
    let stacked = series.len() > 1 && ctx.config.stacking_enabled();
    let baseline = y_baseline(ctx);

    for cat in x.domain().to_vec() {
        let Some(x0) = x.position(&cat) else {
            continue;
        };
        let bw = x.bandwidth();
        let values = category_values(ctx, &series, &x_field, &cat);
        let segments = if stacked {
            stack_segments(&values, &y, x0, bw, baseline)
        } else {
            group_segments(&values, &y, x0, bw, baseline)
        };
        for seg in &segments {
            draw_segment(ctx, seg, &series, &x_field, &cat);
        }
        if ctx.config.mark.data_labels {
            emit_data_labels(ctx, &segments, stacked);
        }
    }
    out
}

/// Per-series values for one category, in series order.
fn category_values(
    ctx: &RenderContext<'_>,
    series: &[Series],
    x_field: &str,
    cat: &str,
) -> Vec<(usize, f64)> {
    let mut out = Vec::new();
    for s in series {
        let value = ctx.data.rows().iter().find_map(|row| {
            (row.get(x_field)?.category() == cat)
                .then(|| series_value(ctx.config, s, row))
                .flatten()
        });
        if let Some(v) = value {
            out.push((s.id, v));
        }
    }
    out
}

fn stack_segments(
    values: &[(usize, f64)],
    y: &ScaleLinear,
    x0: f64,
    bw: f64,
    baseline: f64,
) -> Vec<Segment> {
    // Per-sign cumulation: positives stack upward from zero, negatives
    // downward, so mixed-sign categories never overlap.
    let mut cum_pos = 0.0;
    let mut cum_neg = 0.0;
    let last_pos = values.iter().rposition(|(_, v)| *v >= 0.0);
    let last_neg = values.iter().rposition(|(_, v)| *v < 0.0);
    values
        .iter()
        .enumerate()
        .map(|(i, (id, v))| {
            let upward = *v >= 0.0;
            let (base, top) = if upward {
                let base = cum_pos;
                cum_pos += v;
                (base, cum_pos)
            } else {
                let base = cum_neg;
                cum_neg += v;
                (base, cum_neg)
            };
            let y_base = if base == 0.0 { baseline } else { y.position(base) };
            let y_top = y.position(top);
            Segment {
                series: *id,
                rect: Rect::new(x0, y_base.min(y_top), x0 + bw, y_base.max(y_top)),
                upward,
                outer: Some(i) == if upward { last_pos } else { last_neg },
                value: *v,
            }
        })
        .collect()
}

fn group_segments(
    values: &[(usize, f64)],
    y: &ScaleLinear,
    x0: f64,
    bw: f64,
    baseline: f64,
) -> Vec<Segment> {
    let n = values.len().max(1) as f64;
    let sub = bw / n;
    values
        .iter()
        .enumerate()
        .map(|(i, (id, v))| {
            let y_v = y.position(*v);
            let left = x0 + i as f64 * sub;
            Segment {
                series: *id,
                rect: Rect::new(left, baseline.min(y_v), left + sub, baseline.max(y_v)),
                upward: *v >= 0.0,
                outer: true,
                value: *v,
            }
        })
        .collect()
}

fn draw_segment(
    ctx: &mut RenderContext<'_>,
    seg: &Segment,
    series: &[Series],
    x_field: &str,
    cat: &str,
) {
    let corner = ctx.config.mark.corner_radius.min(seg.rect.width() / 2.0);
    let radii = if corner <= 0.0 || !seg.outer {
        RoundedRectRadii::from_single_radius(0.0)
    } else if seg.upward {
        RoundedRectRadii::new(corner, corner, 0.0, 0.0)
    } else {
        RoundedRectRadii::new(0.0, 0.0, corner, corner)
    };
    let path = RoundedRect::from_rect(seg.rect, radii).to_path(0.1);
    let paint = ctx.colors.series(seg.series);
    let label = series
        .iter()
        .find(|s| s.id == seg.series)
        .map(|s| s.label.clone())
        .unwrap_or_default();

    ctx.fill_path(
        &path,
        &paint,
        seg.rect,
        FillOptions {
            opacity: ctx.config.mark.opacity,
            z: z_order::SERIES_FILL,
            title: None,
        },
    );
    if let Some(stroke) = ctx.colors.stroke_override() {
        ctx.stroke_path(&path, stroke, StrokeOptions::default());
    }
    if ctx.series_selected(seg.series) {
        ctx.stroke_path(
            &path,
            paint.color,
            StrokeOptions {
                width: 1.5,
                dash: alloc::vec![4.0, 3.0],
                z: z_order::SERIES_STROKE,
                ..StrokeOptions::default()
            },
        );
    }

    let meta = ctx
        .columns
        .and_then(|t| ctx.config.encoding.y.first().map(|f| t.get(&f.field)))
        .flatten();
    let mut tooltip = alloc::vec![TooltipField::new(x_field, cat)];
    let value_label = if label.is_empty() {
        String::from("value")
    } else {
        label.clone()
    };
    tooltip.push(TooltipField::new(
        value_label,
        format_value(&Value::Number(seg.value), meta),
    ));
    ctx.record_hit(HitRegion {
        shape: HitShape::Rect(seg.rect),
        selection: Selection::Series { id: seg.series },
        tooltip,
        label,
    });
}

fn emit_data_labels(ctx: &mut RenderContext<'_>, segments: &[Segment], stacked: bool) {
    let theme = crate::axis::AxisTheme::default();
    if stacked {
        // One label per sign, at the stack extremity.
        if let Some(top) = segments.iter().filter(|s| s.upward).last() {
            let total: f64 = segments.iter().filter(|s| s.upward).map(|s| s.value).sum();
            data_label(
                ctx,
                Point::new(top.rect.center().x, top.rect.y0 - 3.0),
                total,
                theme.label,
            );
        }
        if let Some(bottom) = segments.iter().filter(|s| !s.upward).last() {
            let total: f64 = segments.iter().filter(|s| !s.upward).map(|s| s.value).sum();
            data_label(
                ctx,
                Point::new(
                    bottom.rect.center().x,
                    bottom.rect.y1 + crate::mark::DATA_LABEL_SIZE,
                ),
                total,
                theme.label,
            );
        }
    } else {
        for seg in segments {
            let y = if seg.upward {
                seg.rect.y0 - 3.0
            } else {
                seg.rect.y1 + crate::mark::DATA_LABEL_SIZE
            };
            data_label(ctx, Point::new(seg.rect.center().x, y), seg.value, theme.label);
        }
    }
}
