// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pie and donut marks.

use alloc::string::String;
use alloc::vec::Vec;

use core::f64::consts::{FRAC_PI_2, TAU};
use kurbo::{Rect, Vec2};

use crate::context::{FillOptions, Label, RenderContext, StrokeOptions};
use crate::float::FloatExt as _;
use crate::format::format_number;
use crate::hit::{HitRegion, HitShape, Selection};
use crate::legend::LegendItem;
use crate::mark::{MarkOutput, annular_sector};
use crate::tooltip::TooltipField;
use crate::z_order;

/// Fraction of the half-extent the pie radius uses.
const RADIUS_FRACTION: f64 = 0.9;

/// Hovered slices shift outward by this fraction of the radius.
const HOVER_OFFSET: f64 = 0.06;

struct Slice {
    index: usize,
    label: String,
    value: f64,
    start: f64,
    end: f64,
}

pub(crate) fn render(ctx: &mut RenderContext<'_>) -> MarkOutput {
    let out = MarkOutput::default();
    let area = ctx.area;
    if !area.is_valid() || area.width() <= 0.0 || area.height() <= 0.0 {
        return out;
    }
    let slices = build_slices(ctx);
    if slices.is_empty() {
        return out;
    }

    if ctx.config.legend_visible() {
        ctx.legend_items = slices
            .iter()
            .map(|s| LegendItem::new(s.label.clone(), ctx.colors.series(s.index)))
            .collect();
    }

    let center = area.center();
    let outer = RADIUS_FRACTION * (area.width().min(area.height()) / 2.0);
    let inner = (ctx.config.mark.inner_radius.clamp(0.0, 0.95)) * outer;
    let total: f64 = slices.iter().map(|s| s.value.abs()).sum();
    let category_field = category_field(ctx).unwrap_or_default();

    for slice in &slices {
        let mid = (slice.start + slice.end) / 2.0;
        let hovered = ctx.hover.is_some_and(|p| {
            HitShape::Sector {
                center,
                inner,
                outer,
                start: slice.start,
                end: slice.end,
            }
            .contains(p)
        });
        let slice_center = if hovered {
            center + Vec2::new(mid.cos(), mid.sin()) * (HOVER_OFFSET * outer)
        } else {
            center
        };

        let path = annular_sector(slice_center, inner, outer, slice.start, slice.end);
        let paint = ctx.colors.series(slice.index);
        let bounds = Rect::new(
            slice_center.x - outer,
            slice_center.y - outer,
            slice_center.x + outer,
            slice_center.y + outer,
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
        if let Some(stroke) = ctx.colors.stroke_override() {
            ctx.stroke_path(&path, stroke, StrokeOptions::default());
        }
        if ctx.series_selected(slice.index) {
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

        let percent = 100.0 * slice.value.abs() / total;
        if ctx.config.mark.data_labels {
            let label_radius = if inner > 0.0 {
                (inner + outer) / 2.0
            } else {
                0.65 * outer
            };
            let pos = center + Vec2::new(mid.cos(), mid.sin()) * label_radius;
            let mut text = format_number(percent);
            text.push('%');
            ctx.draw_text(
                Label::new(pos, text, crate::mark::DATA_LABEL_SIZE, peniko::color::palette::css::WHITE)
                    .anchored(glint_text::TextAnchor::Middle)
                    .baselined(glint_text::TextBaseline::Middle),
                z_order::SERIES_POINTS,
                None,
            );
        }

        let mut percent_text = format_number(percent);
        percent_text.push('%');
        ctx.record_hit(HitRegion {
            shape: HitShape::Sector {
                center,
                inner,
                outer,
                start: slice.start,
                end: slice.end,
            },
            selection: Selection::Series { id: slice.index },
            tooltip: alloc::vec![
                TooltipField::new(category_field.clone(), slice.label.clone()),
                TooltipField::new("value", format_number(slice.value)),
                TooltipField::new("share", percent_text),
            ],
            label: slice.label.clone(),
        });
    }
    out
}

fn category_field(ctx: &RenderContext<'_>) -> Option<String> {
    ctx.config
        .encoding
        .x
        .first()
        .or(ctx.config.encoding.color.as_ref())
        .map(|f| f.field.clone())
}

/// Builds the slice list: one per category, angles clockwise from 12
/// o'clock, sweeps proportional to `|value| / Σ|value|`. Values come from
/// the first y field; with no usable numeric values the slices fall back to
/// occurrence counts.
fn build_slices(ctx: &RenderContext<'_>) -> Vec<Slice> {
    let Some(field) = category_field(ctx) else {
        return Vec::new();
    };
    let categories = ctx.data.categories(&field);
    let y_field = ctx.config.encoding.y.first().map(|f| f.field.clone());

    let mut values: Vec<(String, f64)> = Vec::new();
    let mut any_numeric = false;
    for cat in &categories {
        let value = y_field.as_deref().and_then(|yf| {
            ctx.data.rows().iter().find_map(|row| {
                (row.get(&field)?.category() == *cat)
                    .then(|| row.get(yf)?.as_f64())
                    .flatten()
            })
        });
        if value.is_some() {
            any_numeric = true;
        }
        values.push((cat.clone(), value.unwrap_or(0.0)));
    }
    if !any_numeric {
        // Occurrence counting: each row votes for its category.
        for (cat, value) in &mut values {
            *value = ctx
                .data
                .rows()
                .iter()
                .filter(|row| row.get(&field).is_some_and(|v| v.category() == *cat))
                .count() as f64;
        }
    }

    // Negative values contribute their magnitude, zeros drop out.
    let total: f64 = values.iter().map(|(_, v)| v.abs()).sum();
    if total <= 0.0 {
        return Vec::new();
    }
    let mut angle = -FRAC_PI_2;
    values
        .into_iter()
        .enumerate()
        .filter(|(_, (_, v))| *v != 0.0)
        .map(|(index, (label, value))| {
            let sweep = value.abs() / total * TAU;
            let slice = Slice {
                index,
                label,
                value,
                start: angle,
                end: angle + sweep,
            };
            angle += sweep;
            slice
        })
        .collect()
}
