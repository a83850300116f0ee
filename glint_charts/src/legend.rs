// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Legend layout and rendering.
//!
//! Horizontal bands (top/bottom) flow items left to right and wrap greedily
//! into rows; side bands (left/right) stack one item per row. In both cases
//! leftover slack is distributed according to the configured alignment, and
//! labels truncate with an ellipsis the same way axis tick labels do.

use alloc::string::String;
use alloc::vec::Vec;

use glint_text::{TextAnchor, TextBaseline, TextStyle, fit_label};
use kurbo::{Point, Rect, Shape as _};
use peniko::Color;

use crate::config::{LegendAlignment, LegendPosition};
use crate::context::{FillOptions, Label, RenderContext};
use crate::palette::SeriesPaint;
use crate::z_order;

/// Legend label font size.
pub(crate) const FONT_SIZE: f64 = 12.0;

/// Vertical spacing folded into a horizontal legend band.
pub(crate) const BAND_SPACING: f64 = 8.0;

/// Width of a left/right legend band.
pub(crate) const SIDE_WIDTH: f64 = 100.0;

/// Swatch edge length.
pub(crate) const SWATCH_SIZE: f64 = 10.0;

/// Gap between a swatch and its label.
pub(crate) const SWATCH_GAP: f64 = 5.0;

/// Gap between items in a row.
pub(crate) const ITEM_GAP: f64 = 12.0;

/// Height of one legend row.
pub(crate) const ROW_HEIGHT: f64 = FONT_SIZE + 4.0;

/// Gap between wrapped rows.
pub(crate) const ROW_GAP: f64 = 4.0;

/// Upper bound on a label's width in a horizontal band.
const MAX_LABEL_WIDTH: f64 = 120.0;

/// One legend entry, in series order.
#[derive(Clone, Debug, PartialEq)]
pub struct LegendItem {
    /// The series or category label.
    pub label: String,
    /// The resolved series paint (drives the swatch).
    pub paint: SeriesPaint,
}

impl LegendItem {
    /// Creates an entry.
    pub fn new(label: impl Into<String>, paint: SeriesPaint) -> Self {
        Self {
            label: label.into(),
            paint,
        }
    }
}

/// The total height of `rows` wrapped legend rows.
pub(crate) fn wrapped_height(rows: usize) -> f64 {
    if rows == 0 {
        return 0.0;
    }
    rows as f64 * ROW_HEIGHT + (rows - 1) as f64 * ROW_GAP
}

/// A positioned legend entry.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct PlacedItem {
    /// Index into the input item list.
    pub index: usize,
    /// The swatch rectangle.
    pub swatch: Rect,
    /// The label anchor (start-anchored, alphabetic baseline).
    pub label_pos: Point,
    /// The label text, possibly ellipsized.
    pub text: String,
    /// Whether the label was truncated.
    pub truncated: bool,
}

/// Lays out legend items inside `band`.
///
/// This is pure geometry; [`render`] draws the result.
pub(crate) fn layout_items(
    ctx: &RenderContext<'_>,
    items: &[LegendItem],
    band: Rect,
    position: LegendPosition,
    alignment: LegendAlignment,
) -> Vec<PlacedItem> {
    if position.is_horizontal() {
        layout_rows(ctx, items, band, alignment)
    } else {
        layout_stack(ctx, items, band, alignment)
    }
}

fn fitted(ctx: &RenderContext<'_>, label: &str, max_width: f64) -> (String, bool, f64) {
    let style = TextStyle::new(FONT_SIZE);
    let fit = fit_label(ctx.measurer, label, style, max_width);
    let width = ctx.text_width(&fit.text, style);
    (fit.text, fit.truncated, width)
}

fn layout_rows(
    ctx: &RenderContext<'_>,
    items: &[LegendItem],
    band: Rect,
    alignment: LegendAlignment,
) -> Vec<PlacedItem> {
    struct Pending {
        index: usize,
        text: String,
        truncated: bool,
        width: f64,
    }

    // Greedy wrap: an item moves to the next row when it no longer fits,
    // unless it is the first item of its row.
    let mut rows: Vec<Vec<Pending>> = Vec::new();
    let mut row: Vec<Pending> = Vec::new();
    let mut cursor = 0.0;
    for (index, item) in items.iter().enumerate() {
        let (text, truncated, label_width) =
            fitted(ctx, &item.label, MAX_LABEL_WIDTH.min(band.width()));
        let item_width = SWATCH_SIZE + SWATCH_GAP + label_width;
        let advance = if row.is_empty() { 0.0 } else { ITEM_GAP };
        if !row.is_empty() && cursor + advance + item_width > band.width() {
            rows.push(core::mem::take(&mut row));
            cursor = 0.0;
        }
        cursor += if row.is_empty() { 0.0 } else { ITEM_GAP };
        cursor += item_width;
        row.push(Pending {
            index,
            text,
            truncated,
            width: item_width,
        });
    }
    if !row.is_empty() {
        rows.push(row);
    }

    let mut placed = Vec::with_capacity(items.len());
    for (row_idx, row) in rows.iter().enumerate() {
        let row_width: f64 =
            row.iter().map(|p| p.width).sum::<f64>() + (row.len() - 1) as f64 * ITEM_GAP;
        let slack = (band.width() - row_width).max(0.0);
        let mut x = band.x0
            + match alignment {
                LegendAlignment::Start => 0.0,
                LegendAlignment::Center => slack / 2.0,
                LegendAlignment::End => slack,
            };
        let y = band.y0 + row_idx as f64 * (ROW_HEIGHT + ROW_GAP);
        for p in row {
            let swatch_y = y + (ROW_HEIGHT - SWATCH_SIZE) / 2.0;
            placed.push(PlacedItem {
                index: p.index,
                swatch: Rect::new(x, swatch_y, x + SWATCH_SIZE, swatch_y + SWATCH_SIZE),
                label_pos: Point::new(
                    x + SWATCH_SIZE + SWATCH_GAP,
                    y + ROW_HEIGHT / 2.0 + FONT_SIZE * 0.3,
                ),
                text: p.text.clone(),
                truncated: p.truncated,
            });
            x += p.width + ITEM_GAP;
        }
    }
    placed
}

fn layout_stack(
    ctx: &RenderContext<'_>,
    items: &[LegendItem],
    band: Rect,
    alignment: LegendAlignment,
) -> Vec<PlacedItem> {
    let max_label = (band.width() - SWATCH_SIZE - SWATCH_GAP).max(0.0);
    let block_height = wrapped_height(items.len());
    let slack = (band.height() - block_height).max(0.0);
    let mut y = band.y0
        + match alignment {
            LegendAlignment::Start => 0.0,
            LegendAlignment::Center => slack / 2.0,
            LegendAlignment::End => slack,
        };

    let mut placed = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let (text, truncated, _) = fitted(ctx, &item.label, max_label);
        let swatch_y = y + (ROW_HEIGHT - SWATCH_SIZE) / 2.0;
        placed.push(PlacedItem {
            index,
            swatch: Rect::new(
                band.x0,
                swatch_y,
                band.x0 + SWATCH_SIZE,
                swatch_y + SWATCH_SIZE,
            ),
            label_pos: Point::new(
                band.x0 + SWATCH_SIZE + SWATCH_GAP,
                y + ROW_HEIGHT / 2.0 + FONT_SIZE * 0.3,
            ),
            text,
            truncated,
        });
        y += ROW_HEIGHT + ROW_GAP;
    }
    placed
}

/// Draws the legend into `band`.
///
/// Consumes the entries mark renderers collected on the context.
pub(crate) fn render(ctx: &mut RenderContext<'_>, band: Rect, text_color: Color) {
    let items = core::mem::take(&mut ctx.legend_items);
    if items.is_empty() {
        ctx.legend_items = items;
        return;
    }
    let position = ctx.config.layout.legend_position;
    let alignment = ctx.config.layout.legend_alignment;
    let placed = layout_items(ctx, &items, band, position, alignment);

    for p in &placed {
        let item = &items[p.index];
        let shape = kurbo::RoundedRect::from_rect(p.swatch, 2.0).to_path(0.1);
        ctx.fill_path(
            &shape,
            &item.paint,
            p.swatch,
            FillOptions {
                z: z_order::LEGEND_SWATCHES,
                ..FillOptions::default()
            },
        );
        let title = p.truncated.then_some(item.label.as_str());
        ctx.draw_text(
            Label::new(p.label_pos, p.text.clone(), FONT_SIZE, text_color)
                .anchored(TextAnchor::Start)
                .baselined(TextBaseline::Alphabetic),
            z_order::LEGEND_LABELS,
            title,
        );
    }
    ctx.legend_items = items;
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::format;
    use glint_scene::Scene;
    use glint_text::HeuristicTextMeasurer;
    use peniko::color::palette::css;

    use super::*;
    use crate::config::{ChartConfig, ChartKind, Encoding};
    use crate::context::Backend;
    use crate::data::DataSet;
    use crate::layout::GraphArea;
    use crate::palette::{ColorResolver, StaticPalettes};
    use crate::scale::ScaleSet;

    fn with_ctx<R>(f: impl FnOnce(&mut RenderContext<'_>) -> R) -> R {
        let data = DataSet::new();
        let scales = ScaleSet::new();
        let config = ChartConfig::new(ChartKind::Bar, Encoding::new());
        let palettes = StaticPalettes::default();
        let measurer = HeuristicTextMeasurer;
        let mut scene = Scene::new(400.0, 300.0);
        let mut ctx = RenderContext::new(
            Backend::Scene(&mut scene),
            &data,
            &scales,
            &config,
            GraphArea::default(),
            ColorResolver::new(&palettes, &config),
            &measurer,
        );
        f(&mut ctx)
    }

    fn items(n: usize, label: &str) -> Vec<LegendItem> {
        (0..n)
            .map(|i| LegendItem::new(format!("{label}{i:02}"), SeriesPaint::solid(css::BLUE)))
            .collect()
    }

    #[test]
    fn overflowing_items_wrap_and_stay_inside_the_band() {
        // Labels around 80px wide, a 300px band: a handful per row at most.
        let band = Rect::new(0.0, 0.0, 300.0, 100.0);
        let items = items(20, "long-series-");
        let placed = with_ctx(|ctx| {
            layout_items(
                ctx,
                &items,
                band,
                LegendPosition::Top,
                LegendAlignment::Start,
            )
        });
        assert_eq!(placed.len(), 20);
        let rows = placed
            .iter()
            .map(|p| (p.swatch.y0 * 10.0) as i64)
            .collect::<std::collections::BTreeSet<_>>();
        assert!(rows.len() > 1, "20 wide items must wrap in 300px");
        for p in &placed {
            assert!(p.swatch.x0 >= band.x0);
            assert!(p.swatch.x1 <= band.x1 + 1e-9);
        }
    }

    #[test]
    fn center_alignment_splits_the_slack() {
        let band = Rect::new(0.0, 0.0, 300.0, 20.0);
        let items = items(1, "a");
        let (start, center, end) = with_ctx(|ctx| {
            let at = |align| layout_items(ctx, &items, band, LegendPosition::Top, align);
            (
                at(LegendAlignment::Start)[0].swatch.x0,
                at(LegendAlignment::Center)[0].swatch.x0,
                at(LegendAlignment::End)[0].swatch.x0,
            )
        });
        assert!(start < center && center < end);
        assert!((center - (start + end) / 2.0).abs() < 1e-9);
    }

    #[test]
    fn side_band_stacks_one_item_per_row() {
        let band = Rect::new(0.0, 0.0, SIDE_WIDTH, 200.0);
        let items = items(3, "s");
        let placed = with_ctx(|ctx| {
            layout_items(
                ctx,
                &items,
                band,
                LegendPosition::Right,
                LegendAlignment::Start,
            )
        });
        assert_eq!(placed[0].swatch.x0, placed[1].swatch.x0);
        assert!(placed[1].swatch.y0 > placed[0].swatch.y0);
        assert!(placed[2].swatch.y0 > placed[1].swatch.y0);
    }

    #[test]
    fn narrow_side_band_truncates_labels() {
        let band = Rect::new(0.0, 0.0, 60.0, 100.0);
        let items = std::vec![LegendItem::new(
            "an-extremely-long-series-name",
            SeriesPaint::solid(css::BLUE),
        )];
        let placed = with_ctx(|ctx| {
            layout_items(
                ctx,
                &items,
                band,
                LegendPosition::Left,
                LegendAlignment::Start,
            )
        });
        assert!(placed[0].truncated);
        assert!(placed[0].text.ends_with('\u{2026}'));
    }

    #[test]
    fn wrapped_height_matches_the_row_formula() {
        assert_eq!(wrapped_height(0), 0.0);
        assert_eq!(wrapped_height(1), ROW_HEIGHT);
        assert_eq!(wrapped_height(3), 3.0 * ROW_HEIGHT + 2.0 * ROW_GAP);
    }

    #[test]
    fn render_emits_swatch_and_label_nodes() {
        let data = DataSet::new();
        let scales = ScaleSet::new();
        let config = ChartConfig::new(ChartKind::Bar, Encoding::new());
        let palettes = StaticPalettes::default();
        let measurer = HeuristicTextMeasurer;
        let mut scene = Scene::new(400.0, 300.0);
        let mut ctx = RenderContext::new(
            Backend::Scene(&mut scene),
            &data,
            &scales,
            &config,
            GraphArea::default(),
            ColorResolver::new(&palettes, &config),
            &measurer,
        );
        ctx.legend_items = items(2, "s");
        render(
            &mut ctx,
            Rect::new(10.0, 10.0, 390.0, 30.0),
            css::BLACK,
        );
        drop(ctx);
        assert_eq!(scene.content().len(), 4);
    }
}
