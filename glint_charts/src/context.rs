// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-pass render context.
//!
//! Chart math is written once; only the drawing primitives differ between
//! backends. [`RenderContext`] pairs the shared state (data, scales, config,
//! geometry, colors) with a [`Backend`] sum and exposes a small primitive
//! facade (`fill_path`, `stroke_path`, `draw_text`, …) implemented once per
//! variant, with exhaustive matching — adding a backend is a compile-checked
//! change.

use alloc::string::String;
use alloc::vec::Vec;

use glint_raster::Painter;
use glint_scene::{Node, NodeKind, Paint, PathNode, Scene, StrokeProps, TextNode};
use glint_text::{FontWeight, TextAnchor, TextBaseline, TextMeasurer, TextStyle};
use kurbo::{BezPath, Point, Rect, Shape as _};
use peniko::Color;

use crate::config::ChartConfig;
use crate::data::{ColumnTable, DataSet};
use crate::hit::{HitRegion, Selection};
use crate::layout::GraphArea;
use crate::legend::LegendItem;
use crate::palette::{ColorResolver, SeriesPaint};
use crate::scale::ScaleSet;
use crate::z_order;

/// The rendering target of a pass.
pub enum Backend<'a> {
    /// The retained vector scene.
    Scene(&'a mut Scene),
    /// The immediate-mode raster painter.
    Raster(Painter<'a>),
}

impl core::fmt::Debug for Backend<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Scene(_) => f.write_str("Backend::Scene(..)"),
            Self::Raster(_) => f.write_str("Backend::Raster(..)"),
        }
    }
}

/// Options for a filled primitive.
#[derive(Clone, Copy, Debug)]
pub struct FillOptions<'a> {
    /// Opacity in `0..=1`.
    pub opacity: f32,
    /// Scene z-index (ignored by the raster backend).
    pub z: i32,
    /// Hover title (vector backend only).
    pub title: Option<&'a str>,
}

impl Default for FillOptions<'_> {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            z: z_order::SERIES_FILL,
            title: None,
        }
    }
}

/// Options for a stroked primitive.
#[derive(Clone, Debug)]
pub struct StrokeOptions {
    /// Stroke width in pixels.
    pub width: f64,
    /// Dash pattern; empty for solid.
    pub dash: Vec<f64>,
    /// Opacity in `0..=1`.
    pub opacity: f32,
    /// Scene z-index (ignored by the raster backend).
    pub z: i32,
}

impl Default for StrokeOptions {
    fn default() -> Self {
        Self {
            width: 1.0,
            dash: Vec::new(),
            opacity: 1.0,
            z: z_order::SERIES_STROKE,
        }
    }
}

/// A positioned single-line text primitive.
#[derive(Clone, Debug)]
pub struct Label {
    /// Anchor position.
    pub pos: Point,
    /// The text.
    pub text: String,
    /// Font size in pixels.
    pub font_size: f64,
    /// Font weight.
    pub weight: FontWeight,
    /// Text color.
    pub color: Color,
    /// Horizontal anchor.
    pub anchor: TextAnchor,
    /// Vertical baseline.
    pub baseline: TextBaseline,
    /// Rotation around `pos` in degrees.
    pub angle: f64,
}

impl Label {
    /// Creates a start-anchored, baseline-aligned label.
    pub fn new(pos: Point, text: impl Into<String>, font_size: f64, color: Color) -> Self {
        Self {
            pos,
            text: text.into(),
            font_size,
            weight: FontWeight::NORMAL,
            color,
            anchor: TextAnchor::Start,
            baseline: TextBaseline::Alphabetic,
            angle: 0.0,
        }
    }

    /// Sets the horizontal anchor.
    #[must_use]
    pub fn anchored(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Sets the vertical baseline.
    #[must_use]
    pub fn baselined(mut self, baseline: TextBaseline) -> Self {
        self.baseline = baseline;
        self
    }

    /// Sets the font weight.
    #[must_use]
    pub fn weighted(mut self, weight: FontWeight) -> Self {
        self.weight = weight;
        self
    }

    /// Sets the rotation in degrees.
    #[must_use]
    pub fn rotated(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }
}

/// Everything a mark renderer needs for one pass.
pub struct RenderContext<'a> {
    backend: Backend<'a>,
    /// The row set.
    pub data: &'a DataSet,
    /// The caller-supplied scales.
    pub scales: &'a ScaleSet,
    /// The chart configuration.
    pub config: &'a ChartConfig,
    /// The plot rectangle.
    pub area: GraphArea,
    /// Series color resolution.
    pub colors: ColorResolver<'a>,
    /// Optional column metadata for formatting.
    pub columns: Option<&'a ColumnTable>,
    /// The layout/truncation text measurer.
    pub measurer: &'a dyn TextMeasurer,
    /// Legend entries, populated by mark renderers in series order.
    pub legend_items: Vec<LegendItem>,
    /// The current edit-mode selection, if any.
    pub selection: Option<Selection>,
    /// The pointer position for hover resolution, if any.
    pub hover: Option<Point>,
    hits: Vec<HitRegion>,
}

impl core::fmt::Debug for RenderContext<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RenderContext")
            .field("backend", &self.backend)
            .field("area", &self.area)
            .field("hits", &self.hits.len())
            .finish_non_exhaustive()
    }
}

impl<'a> RenderContext<'a> {
    /// Creates a context for one render pass.
    pub fn new(
        backend: Backend<'a>,
        data: &'a DataSet,
        scales: &'a ScaleSet,
        config: &'a ChartConfig,
        area: GraphArea,
        colors: ColorResolver<'a>,
        measurer: &'a dyn TextMeasurer,
    ) -> Self {
        Self {
            backend,
            data,
            scales,
            config,
            area,
            colors,
            columns: None,
            measurer,
            legend_items: Vec::new(),
            selection: None,
            hover: None,
            hits: Vec::new(),
        }
    }

    /// Attaches column metadata.
    #[must_use]
    pub fn with_columns(mut self, columns: &'a ColumnTable) -> Self {
        self.columns = Some(columns);
        self
    }

    /// Sets the edit-mode selection.
    #[must_use]
    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = Some(selection);
        self
    }

    /// Sets the hover pointer position.
    #[must_use]
    pub fn with_hover(mut self, pointer: Point) -> Self {
        self.hover = Some(pointer);
        self
    }

    /// Whether `selection` currently selects series `id`.
    pub fn series_selected(&self, id: usize) -> bool {
        self.selection == Some(Selection::Series { id })
    }

    /// Fills a path with a resolved series paint.
    ///
    /// `bounds` anchors gradient geometry: unit-box gradients resolve
    /// against it on the raster backend and ride SVG object bounding boxes
    /// on the vector backend.
    pub fn fill_path(
        &mut self,
        path: &BezPath,
        paint: &SeriesPaint,
        bounds: Rect,
        opts: FillOptions<'_>,
    ) {
        match &mut self.backend {
            Backend::Scene(scene) => {
                let node = PathNode::filled(path.clone(), paint.scene_paint())
                    .with_opacity(opts.opacity);
                push_scene_node(scene, NodeKind::Path(node), opts.z, opts.title);
            }
            Backend::Raster(painter) => {
                let raster = paint.raster_paint(bounds).with_alpha(opts.opacity);
                painter.fill_path(path, &raster);
            }
        }
    }

    /// Fills a path with a solid color.
    pub fn fill_solid(&mut self, path: &BezPath, color: Color, opts: FillOptions<'_>) {
        let bounds = path.bounding_box();
        self.fill_path(path, &SeriesPaint::solid(color), bounds, opts);
    }

    /// Fills an axis-aligned rectangle with a solid color.
    pub fn fill_rect(&mut self, rect: Rect, color: Color, opts: FillOptions<'_>) {
        self.fill_solid(&rect.to_path(0.1), color, opts);
    }

    /// Strokes a path with a solid color.
    pub fn stroke_path(&mut self, path: &BezPath, color: Color, opts: StrokeOptions) {
        match &mut self.backend {
            Backend::Scene(scene) => {
                let stroke = StrokeProps::solid(Paint::Solid(color), opts.width)
                    .with_dash(opts.dash.iter().copied());
                let node = PathNode::stroked(path.clone(), stroke).with_opacity(opts.opacity);
                push_scene_node(scene, NodeKind::Path(node), opts.z, None);
            }
            Backend::Raster(painter) => {
                let paint = Paint::Solid(color.multiply_alpha(opts.opacity));
                painter.stroke_path(path, &paint, opts.width, &opts.dash);
            }
        }
    }

    /// Draws a single line of text.
    pub fn draw_text(&mut self, label: Label, z: i32, title: Option<&str>) {
        match &mut self.backend {
            Backend::Scene(scene) => {
                let node = TextNode::new(
                    label.pos,
                    label.text,
                    label.font_size,
                    Paint::Solid(label.color),
                )
                .with_anchor(label.anchor)
                .with_baseline(label.baseline)
                .with_angle(label.angle)
                .with_weight(label.weight);
                push_scene_node(scene, NodeKind::Text(node), z, title);
            }
            Backend::Raster(painter) => {
                painter.draw_text(
                    label.pos,
                    &label.text,
                    label.font_size,
                    label.weight,
                    label.color,
                    label.anchor,
                    label.baseline,
                    label.angle,
                );
            }
        }
    }

    /// Draws the hover tooltip box into the overlay layer (vector) or on
    /// top of everything painted so far (raster).
    pub fn draw_overlay_box(&mut self, rect: Rect, fill: Color, lines: &[Label]) {
        match &mut self.backend {
            Backend::Scene(scene) => {
                let id = scene.alloc_id();
                let shape = kurbo::RoundedRect::from_rect(rect, 3.0).to_path(0.1);
                scene.push_overlay(Node::new(
                    id,
                    NodeKind::Path(PathNode::filled(shape, Paint::Solid(fill))),
                ));
                for line in lines {
                    let id = scene.alloc_id();
                    let node = TextNode::new(
                        line.pos,
                        line.text.clone(),
                        line.font_size,
                        Paint::Solid(line.color),
                    )
                    .with_anchor(line.anchor)
                    .with_baseline(line.baseline);
                    scene.push_overlay(Node::new(id, NodeKind::Text(node)));
                }
            }
            Backend::Raster(painter) => {
                let shape = kurbo::RoundedRect::from_rect(rect, 3.0).to_path(0.1);
                painter.fill_path(&shape, &Paint::Solid(fill));
                for line in lines {
                    painter.draw_text(
                        line.pos,
                        &line.text,
                        line.font_size,
                        line.weight,
                        line.color,
                        line.anchor,
                        line.baseline,
                        line.angle,
                    );
                }
            }
        }
    }

    /// Measures text width with the context's measurer.
    pub fn text_width(&self, text: &str, style: TextStyle) -> f64 {
        self.measurer.measure(text, style).advance_width
    }

    /// Records an interactive region.
    pub fn record_hit(&mut self, region: HitRegion) {
        self.hits.push(region);
    }

    /// The recorded regions, in draw order.
    pub fn hits(&self) -> &[HitRegion] {
        &self.hits
    }

    /// The topmost region containing `p`.
    pub fn hit_at(&self, p: Point) -> Option<&HitRegion> {
        self.hits.iter().rev().find(|h| h.shape.contains(p))
    }

    /// What a click at `p` would select.
    pub fn selection_at(&self, p: Point) -> Option<Selection> {
        self.hit_at(p).map(|h| h.selection.clone())
    }

    /// The region under the current hover pointer, if any.
    pub fn hovered(&self) -> Option<&HitRegion> {
        self.hit_at(self.hover?)
    }
}

fn push_scene_node(scene: &mut Scene, kind: NodeKind, z: i32, title: Option<&str>) {
    let id = scene.alloc_id();
    let mut node = Node::new(id, kind).with_z_index(z);
    if let Some(title) = title {
        node = node.with_title(title);
    }
    scene.push(node);
}
