// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Heatmap marks: a colored cell matrix over two categorical axes.

use alloc::string::String;

use kurbo::{Rect, Shape as _};

use crate::config::Channel;
use crate::context::{FillOptions, RenderContext, StrokeOptions};
use crate::format::format_number;
use crate::hit::{HitRegion, HitShape, Selection};
use crate::mark::MarkOutput;
use crate::palette::scheme_color;
use crate::scale::Scale;
use crate::tooltip::TooltipField;
use crate::z_order;

/// Gap between adjacent cells.
const CELL_GAP: f64 = 1.0;

pub(crate) fn render(ctx: &mut RenderContext<'_>) -> MarkOutput {
    let out = MarkOutput::default();
    if !ctx.area.is_valid() || ctx.area.width() <= 0.0 {
        return out;
    }
    let (Some(x_enc), Some(y_enc)) = (
        ctx.config.encoding.x.first().cloned(),
        ctx.config.encoding.y.first().cloned(),
    ) else {
        return out;
    };
    let (Some(Scale::Band(x)), Some(Scale::Band(y))) = (
        ctx.scales.get(Channel::X).cloned(),
        ctx.scales.get(Channel::Y).cloned(),
    ) else {
        return out;
    };
    let color_field = ctx.config.encoding.color.as_ref().map(|f| f.field.clone());

    // Normalization extent for the color ramp.
    let (lo, hi) = color_field
        .as_deref()
        .and_then(|f| ctx.data.numeric_extent(f))
        .unwrap_or((0.0, 1.0));
    let span = if hi > lo { hi - lo } else { 1.0 };
    let scheme = ctx.config.mark.scheme;

    for x_cat in x.domain().to_vec() {
        for y_cat in y.domain().to_vec() {
            let Some(value) = cell_value(ctx, &x_enc.field, &y_enc.field, &x_cat, &y_cat, color_field.as_deref())
            else {
                continue;
            };
            let (Some(cx), Some(cy)) = (x.position(&x_cat), y.position(&y_cat)) else {
                continue;
            };
            let rect = Rect::new(
                cx + CELL_GAP / 2.0,
                cy + CELL_GAP / 2.0,
                cx + x.bandwidth() - CELL_GAP / 2.0,
                cy + y.bandwidth() - CELL_GAP / 2.0,
            );
            if rect.width() <= 0.0 || rect.height() <= 0.0 {
                continue;
            }
            let t = ((value - lo) / span).clamp(0.0, 1.0);
            let color = scheme_color(scheme, t);
            ctx.fill_rect(
                rect,
                color,
                FillOptions {
                    opacity: ctx.config.mark.opacity,
                    z: z_order::SERIES_FILL,
                    title: None,
                },
            );
            if let Some(stroke) = ctx.colors.stroke_override() {
                ctx.stroke_path(&rect.to_path(0.1), stroke, StrokeOptions::default());
            }

            let mut tooltip = alloc::vec![
                TooltipField::new(x_enc.field.clone(), x_cat.clone()),
                TooltipField::new(y_enc.field.clone(), y_cat.clone()),
            ];
            tooltip.push(TooltipField::new(
                color_field.clone().unwrap_or_else(|| String::from("count")),
                format_number(value),
            ));
            ctx.record_hit(HitRegion {
                shape: HitShape::Rect(rect),
                selection: Selection::Series { id: 0 },
                tooltip,
                label: x_cat.clone(),
            });
        }
    }
    out
}

/// The cell value: the color field of the first matching row, or the
/// matching-row count when no color field is bound.
fn cell_value(
    ctx: &RenderContext<'_>,
    x_field: &str,
    y_field: &str,
    x_cat: &str,
    y_cat: &str,
    color_field: Option<&str>,
) -> Option<f64> {
    let matches = ctx.data.rows().iter().filter(|row| {
        row.get(x_field).is_some_and(|v| v.category() == x_cat)
            && row.get(y_field).is_some_and(|v| v.category() == y_cat)
    });
    match color_field {
        Some(f) => matches
            .filter_map(|row| row.get(f)?.as_f64())
            .next(),
        None => {
            let count = matches.count();
            (count > 0).then_some(count as f64)
        }
    }
}
