// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mark renderers, one per chart kind.
//!
//! Every renderer follows the same contract: read rows and scales off the
//! context, emit primitives through the backend facade, record one hit
//! region per interactive mark, and push legend entries in series order.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Arc, BezPath, Point, Vec2};
use peniko::Color;

use crate::axis::Tick;
use crate::config::{Channel, ChartKind};
use crate::context::{Label, RenderContext};
use crate::data::{DataSet, Row};
use crate::format::format_number;
use crate::legend::LegendItem;
use crate::z_order;

pub(crate) mod area;
pub(crate) mod bar;
pub(crate) mod heatmap;
pub(crate) mod histogram;
pub(crate) mod line;
pub(crate) mod pie;
pub(crate) mod radar;
pub(crate) mod scatter;

/// Data-label font size.
pub(crate) const DATA_LABEL_SIZE: f64 = 10.0;

/// What a mark renderer hands back to the engine.
#[derive(Clone, Debug, Default)]
pub struct MarkOutput {
    /// Replacement x-axis ticks (histograms label bin edges).
    pub x_ticks: Option<Vec<Tick>>,
}

/// Dispatches to the renderer for the configured chart kind.
pub(crate) fn render(ctx: &mut RenderContext<'_>) -> MarkOutput {
    match ctx.config.kind {
        ChartKind::Bar => bar::render(ctx),
        ChartKind::Line => line::render(ctx),
        ChartKind::Area => area::render(ctx),
        ChartKind::Pie => pie::render(ctx),
        ChartKind::Scatter => scatter::render(ctx),
        ChartKind::Radar => radar::render(ctx),
        ChartKind::Heatmap => heatmap::render(ctx),
        ChartKind::Histogram => histogram::render(ctx),
    }
}

/// How a series selects its values.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum SeriesKey {
    /// The i-th y field.
    Field(usize),
    /// Rows whose color-field category matches.
    Category(String),
}

/// One series: an index (drives color resolution), a label and a key.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Series {
    pub id: usize,
    pub label: String,
    pub key: SeriesKey,
}

/// Builds the series list: one per y field when several are bound, else one
/// per category of the color field, else a single series.
pub(crate) fn series_list(config: &crate::config::ChartConfig, data: &DataSet) -> Vec<Series> {
    let enc = &config.encoding;
    if enc.y.len() > 1 {
        return enc
            .y
            .iter()
            .enumerate()
            .map(|(id, f)| Series {
                id,
                label: String::from(f.axis_title()),
                key: SeriesKey::Field(id),
            })
            .collect();
    }
    if let Some(color) = &enc.color {
        if !color.field_type.is_continuous() {
            return data
                .categories(&color.field)
                .into_iter()
                .enumerate()
                .map(|(id, label)| Series {
                    id,
                    key: SeriesKey::Category(label.clone()),
                    label,
                })
                .collect();
        }
    }
    alloc::vec![Series {
        id: 0,
        label: enc
            .y
            .first()
            .map(|f| String::from(f.axis_title()))
            .unwrap_or_default(),
        key: SeriesKey::Field(0),
    }]
}

/// Whether `row` belongs to `series`.
///
/// Field-keyed series own every row; category-keyed series own the rows
/// whose color-field category matches. Distinct from [`series_value`]
/// returning `None`, which also happens when an owned row has no usable
/// numeric value.
pub(crate) fn series_owns(
    config: &crate::config::ChartConfig,
    series: &Series,
    row: &Row,
) -> bool {
    match &series.key {
        SeriesKey::Field(_) => true,
        SeriesKey::Category(cat) => config
            .encoding
            .color
            .as_ref()
            .and_then(|color| row.get(&color.field))
            .is_some_and(|v| v.category() == *cat),
    }
}

/// The y value of `row` for `series`, if the row belongs to it.
pub(crate) fn series_value(
    config: &crate::config::ChartConfig,
    series: &Series,
    row: &Row,
) -> Option<f64> {
    let enc = &config.encoding;
    match &series.key {
        SeriesKey::Field(i) => row.get(&enc.y.get(*i)?.field)?.as_f64(),
        SeriesKey::Category(cat) => {
            let color = enc.color.as_ref()?;
            (row.get(&color.field)?.category() == *cat)
                .then(|| row.get(&enc.y.first()?.field)?.as_f64())
                .flatten()
        }
    }
}

/// Pushes one legend entry per series, when the legend is visible.
pub(crate) fn push_legend(ctx: &mut RenderContext<'_>, series: &[Series]) {
    if !ctx.config.legend_visible() {
        return;
    }
    ctx.legend_items = series
        .iter()
        .map(|s| LegendItem::new(s.label.clone(), ctx.colors.series(s.id)))
        .collect();
}

/// The pixel y of the bar/area baseline: zero, clamped into the y domain.
pub(crate) fn y_baseline(ctx: &RenderContext<'_>) -> f64 {
    let area = ctx.area;
    let Some(scale) = ctx.scales.get(Channel::Y) else {
        return area.bottom;
    };
    let Some((d0, d1)) = scale.numeric_domain() else {
        return area.bottom;
    };
    let zero = 0.0_f64.clamp(d0.min(d1), d0.max(d1));
    scale
        .position(&crate::data::Value::Number(zero))
        .unwrap_or(area.bottom)
}

/// A straight poly-line through the points.
pub(crate) fn poly_path(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    let mut iter = points.iter();
    if let Some(first) = iter.next() {
        path.move_to(*first);
        for p in iter {
            path.line_to(*p);
        }
    }
    path
}

/// A Catmull-Rom style smooth curve through the points.
///
/// Control points are `p1 + (p2 - p0)/6` and `p2 - (p3 - p1)/6`, with
/// endpoints duplicated, so the curve passes through every sample.
pub(crate) fn smooth_path(points: &[Point]) -> BezPath {
    if points.len() < 3 {
        return poly_path(points);
    }
    let mut path = BezPath::new();
    path.move_to(points[0]);
    let n = points.len();
    for i in 0..n - 1 {
        let p0 = points[i.saturating_sub(1)];
        let p1 = points[i];
        let p2 = points[i + 1];
        let p3 = points[(i + 2).min(n - 1)];
        let c1 = p1 + (p2 - p0) / 6.0;
        let c2 = p2 - (p3 - p1) / 6.0;
        path.curve_to(c1, c2, p2);
    }
    path
}

/// A circle path.
pub(crate) fn circle_path(center: Point, radius: f64) -> BezPath {
    use kurbo::Shape as _;
    kurbo::Circle::new(center, radius).to_path(0.1)
}

/// An annular sector from `start` to `end` radians (screen angles, clockwise
/// from "3 o'clock"). `inner == 0` degenerates to a plain slice.
pub(crate) fn annular_sector(
    center: Point,
    inner: f64,
    outer: f64,
    start: f64,
    end: f64,
) -> BezPath {
    use crate::float::FloatExt as _;
    let sweep = end - start;
    let at =
        |radius: f64, angle: f64| center + Vec2::new(radius * angle.cos(), radius * angle.sin());
    let mut path = BezPath::new();
    path.move_to(at(outer, start));
    Arc::new(center, (outer, outer), start, sweep, 0.0)
        .to_cubic_beziers(0.1, |c1, c2, p| path.curve_to(c1, c2, p));
    if inner > 0.0 {
        path.line_to(at(inner, end));
        Arc::new(center, (inner, inner), end, -sweep, 0.0)
            .to_cubic_beziers(0.1, |c1, c2, p| path.curve_to(c1, c2, p));
    } else {
        path.line_to(center);
    }
    path.close_path();
    path
}

/// Draws a value label centered above `pos`.
pub(crate) fn data_label(ctx: &mut RenderContext<'_>, pos: Point, value: f64, color: Color) {
    ctx.draw_text(
        Label::new(pos, format_number(value), DATA_LABEL_SIZE, color)
            .anchored(glint_text::TextAnchor::Middle)
            .baselined(glint_text::TextBaseline::Alphabetic),
        z_order::SERIES_POINTS,
        None,
    );
}

#[cfg(test)]
mod tests {
    extern crate std;

    use kurbo::{ParamCurveNearest as _, Shape as _};

    use super::*;
    use crate::config::{ChartConfig, Encoding, FieldEncoding};

    #[test]
    fn multi_y_fields_become_series() {
        let config = ChartConfig::new(
            ChartKind::Bar,
            Encoding::new()
                .with_y(FieldEncoding::quantitative("a"))
                .with_y(FieldEncoding::quantitative("b").with_title("B side")),
        );
        let series = series_list(&config, &DataSet::new());
        assert_eq!(series.len(), 2);
        assert_eq!(series[1].label, "B side");
        assert_eq!(series[1].key, SeriesKey::Field(1));
    }

    #[test]
    fn color_categories_become_series_in_first_seen_order() {
        let config = ChartConfig::new(
            ChartKind::Bar,
            Encoding::new()
                .with_y(FieldEncoding::quantitative("v"))
                .with_color(FieldEncoding::nominal("region")),
        );
        let data = DataSet::from_rows([
            Row::new().with("region", "west").with("v", 1.0),
            Row::new().with("region", "east").with("v", 2.0),
        ]);
        let series = series_list(&config, &data);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].label, "west");

        let row = Row::new().with("region", "east").with("v", 2.0);
        assert_eq!(series_value(&config, &series[0], &row), None);
        assert_eq!(series_value(&config, &series[1], &row), Some(2.0));
    }

    #[test]
    fn smooth_path_passes_through_every_sample() {
        let points = std::vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 5.0),
            Point::new(20.0, 0.0),
            Point::new(30.0, 8.0),
        ];
        let path = smooth_path(&points);
        for p in &points {
            let on_curve = path.segments().any(|seg| {
                let nearest = seg.nearest(*p, 1e-6);
                nearest.distance_sq < 1e-6
            });
            assert!(on_curve, "{p:?} not on curve");
        }
    }

    #[test]
    fn annular_sector_contains_its_centroid() {
        let center = Point::new(50.0, 50.0);
        let path = annular_sector(center, 10.0, 30.0, 0.0, core::f64::consts::FRAC_PI_2);
        let mid = center + Vec2::new(20.0, 20.0) * core::f64::consts::FRAC_1_SQRT_2;
        assert_eq!(path.winding(mid), 1);
        assert_eq!(path.winding(center), 0, "hole excluded");
        assert_eq!(path.winding(center + Vec2::new(-20.0, 0.0)), 0);
    }
}
