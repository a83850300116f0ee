// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The chart title: a centered, selectable text band.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use glint_text::{FontWeight, TextAnchor, TextBaseline, TextStyle};
use kurbo::{Point, Rect, Shape as _};
use peniko::Color;

use crate::context::{Label, RenderContext, StrokeOptions};
use crate::hit::{HitRegion, HitShape, Selection};
use crate::layout::TITLE_FONT_SIZE;
use crate::z_order;

/// Padding around the title text inside its hit rectangle.
const HIT_PADDING: f64 = 4.0;

/// Draws the chart title centered in `band` and records its hit region.
///
/// A selected title gets a dashed outline, the edit-mode affordance.
pub(crate) fn render(ctx: &mut RenderContext<'_>, band: Rect, text: &str, color: Color) {
    if text.is_empty() || band.width() <= 0.0 {
        return;
    }
    let center = Point::new((band.x0 + band.x1) / 2.0, (band.y0 + band.y1) / 2.0);
    let style = TextStyle::new(TITLE_FONT_SIZE).with_weight(FontWeight::BOLD);
    let width = ctx.measurer.measure(text, style).advance_width;

    ctx.draw_text(
        Label::new(center, text.to_string(), TITLE_FONT_SIZE, color)
            .anchored(TextAnchor::Middle)
            .baselined(TextBaseline::Middle)
            .weighted(FontWeight::BOLD),
        z_order::TITLES,
        None,
    );

    let hit = Rect::new(
        center.x - width / 2.0 - HIT_PADDING,
        band.y0,
        center.x + width / 2.0 + HIT_PADDING,
        band.y1,
    );
    ctx.record_hit(HitRegion {
        shape: HitShape::Rect(hit),
        selection: Selection::Title,
        tooltip: Vec::new(),
        label: String::from(text),
    });

    if ctx.selection == Some(Selection::Title) {
        ctx.stroke_path(
            &hit.to_path(0.1),
            color,
            StrokeOptions {
                width: 1.0,
                dash: alloc::vec![4.0, 3.0],
                z: z_order::TITLES,
                ..StrokeOptions::default()
            },
        );
    }
}
