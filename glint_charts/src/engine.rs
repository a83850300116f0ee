// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The render engine: one configuration + data pass onto a backend.

use alloc::string::String;
use alloc::vec::Vec;

use glint_raster::{Painter, Pixmap};
use glint_scene::Scene;
use glint_text::{FontWeight, HeuristicTextMeasurer, TextMeasurer, TextStyle};
use kurbo::{Point, Rect};
use peniko::Color;

use crate::axis::{self, AxisTheme};
use crate::config::{Channel, ChartConfig, LegendPosition};
use crate::context::{Backend, FillOptions, Label, RenderContext};
use crate::data::{ColumnTable, DataSet};
use crate::hit::{HitRegion, Selection};
use crate::layout::{LayoutResult, compute_layout};
use crate::legend;
use crate::mark;
use crate::palette::{ColorResolver, PaletteProvider};
use crate::scale::{ScaleSet, infer_scales};
use crate::title;
use crate::tooltip;
use crate::z_order;

/// Chart-wide colors outside the data marks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    /// Background fill behind the whole chart; `None` leaves it unpainted.
    pub background: Option<Color>,
    /// Title and legend text color.
    pub text: Color,
    /// Axis colors.
    pub axis: AxisTheme,
    /// Tooltip box fill.
    pub tooltip_fill: Color,
    /// Tooltip text color.
    pub tooltip_text: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: None,
            text: Color::from_rgb8(0x11, 0x18, 0x27),
            axis: AxisTheme::default(),
            tooltip_fill: Color::from_rgba8(0x11, 0x18, 0x27, 0xe6),
            tooltip_text: Color::WHITE,
        }
    }
}

/// What a render pass leaves behind for the host: the computed geometry and
/// the interactive regions, in draw order.
#[derive(Clone, Debug)]
pub struct RenderReport {
    /// The band geometry of the pass.
    pub layout: LayoutResult,
    /// Recorded hit regions.
    pub hits: Vec<HitRegion>,
}

impl RenderReport {
    /// The topmost region containing `p`.
    pub fn hit_at(&self, p: Point) -> Option<&HitRegion> {
        self.hits.iter().rev().find(|h| h.shape.contains(p))
    }

    /// What a click at `p` selects.
    pub fn selection_at(&self, p: Point) -> Option<Selection> {
        self.hit_at(p).map(|h| h.selection.clone())
    }
}

/// A configured chart, ready to render onto either backend.
///
/// The borrowed inputs stay with the host; a `Chart` is cheap to rebuild
/// every pass.
pub struct Chart<'a> {
    config: &'a ChartConfig,
    data: &'a DataSet,
    palettes: &'a dyn PaletteProvider,
    columns: Option<&'a ColumnTable>,
    measurer: &'a dyn TextMeasurer,
    scales: Option<&'a ScaleSet>,
    selection: Option<Selection>,
    hover: Option<Point>,
    theme: Theme,
}

impl core::fmt::Debug for Chart<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Chart")
            .field("kind", &self.config.kind)
            .field("rows", &self.data.rows().len())
            .finish_non_exhaustive()
    }
}

impl<'a> Chart<'a> {
    /// Creates a chart over borrowed inputs with the default theme and the
    /// heuristic text measurer.
    pub fn new(
        config: &'a ChartConfig,
        data: &'a DataSet,
        palettes: &'a dyn PaletteProvider,
    ) -> Self {
        Self {
            config,
            data,
            palettes,
            columns: None,
            measurer: &HeuristicTextMeasurer,
            scales: None,
            selection: None,
            hover: None,
            theme: Theme::default(),
        }
    }

    /// Attaches column metadata for tick and tooltip formatting.
    #[must_use]
    pub fn with_columns(mut self, columns: &'a ColumnTable) -> Self {
        self.columns = Some(columns);
        self
    }

    /// Replaces the text measurer (hosts with real font metrics).
    #[must_use]
    pub fn with_measurer(mut self, measurer: &'a dyn TextMeasurer) -> Self {
        self.measurer = measurer;
        self
    }

    /// Supplies scales instead of inferring them from the data.
    #[must_use]
    pub fn with_scales(mut self, scales: &'a ScaleSet) -> Self {
        self.scales = Some(scales);
        self
    }

    /// Sets the edit-mode selection.
    #[must_use]
    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = Some(selection);
        self
    }

    /// Sets the hover pointer; the hovered mark's tooltip is drawn into the
    /// overlay layer.
    #[must_use]
    pub fn with_hover(mut self, pointer: Point) -> Self {
        self.hover = Some(pointer);
        self
    }

    /// Replaces the theme.
    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Renders into the retained scene. The scene is reset first, so a
    /// stale tooltip overlay can never survive into the next pass.
    pub fn render_scene(&self, scene: &mut Scene) -> RenderReport {
        scene.begin_pass();
        let (width, height) = (scene.width(), scene.height());
        self.render(Backend::Scene(scene), width, height)
    }

    /// Renders onto the pixmap, painting in back-to-front order.
    pub fn render_pixmap(&self, pixmap: &mut Pixmap) -> RenderReport {
        let (width, height) = (f64::from(pixmap.width()), f64::from(pixmap.height()));
        self.render(Backend::Raster(Painter::new(pixmap)), width, height)
    }

    fn render(&self, backend: Backend<'_>, width: f64, height: f64) -> RenderReport {
        let layout = compute_layout(self.config, width, height);
        let inferred;
        let scales = match self.scales {
            Some(s) => s,
            None => {
                inferred = infer_scales(self.config, self.data, &layout.graph_area);
                &inferred
            }
        };

        let mut colors = ColorResolver::new(self.palettes, self.config);
        if let Some(scale) = scales.get(Channel::Color) {
            colors = colors.with_color_scale(self.config.mark.scheme, scale);
        }
        let mut ctx = RenderContext::new(
            backend,
            self.data,
            scales,
            self.config,
            layout.graph_area,
            colors,
            self.measurer,
        );
        if let Some(columns) = self.columns {
            ctx = ctx.with_columns(columns);
        }
        if let Some(selection) = self.selection.clone() {
            ctx = ctx.with_selection(selection);
        }
        if let Some(pointer) = self.hover {
            ctx = ctx.with_hover(pointer);
        }

        if let Some(background) = self.theme.background {
            ctx.fill_rect(
                layout.container,
                background,
                FillOptions {
                    z: z_order::PLOT_BACKGROUND,
                    ..FillOptions::default()
                },
            );
        }

        let polar = self.config.kind.is_polar();
        let drawable = layout.graph_area.is_valid()
            && layout.graph_area.width() > 0.0
            && layout.graph_area.height() > 0.0;

        if drawable {
            if !polar {
                axis::render_grid(&mut ctx, &self.theme.axis);
            }
            let out = mark::render(&mut ctx);
            if !polar {
                axis::render_axes(&mut ctx, &self.theme.axis, out.x_ticks);
            }
        }

        if let Some(band) = legend_band_rect(&layout) {
            legend::render(&mut ctx, band, self.theme.text);
        }

        if layout.title_height > 0.0 {
            if let Some(text) = self.config.layout.title.as_deref() {
                let band = Rect::new(
                    layout.inner.x0,
                    layout.inner.y0,
                    layout.inner.x1,
                    layout.inner.y0 + layout.title_height,
                );
                title::render(&mut ctx, band, text, self.theme.text);
            }
        }

        if let Some(pointer) = self.hover {
            self.draw_tooltip(&mut ctx, pointer, layout.container);
        }

        RenderReport {
            layout,
            hits: ctx.hits().to_vec(),
        }
    }

    /// Draws the hovered mark's tooltip near the pointer.
    fn draw_tooltip(&self, ctx: &mut RenderContext<'_>, pointer: Point, container: Rect) {
        let Some(hovered) = ctx.hovered().cloned() else {
            return;
        };
        if hovered.tooltip.is_empty() {
            return;
        }
        let style = TextStyle::new(tooltip::FONT_SIZE);
        let heading_style = style.with_weight(FontWeight::BOLD);
        let mut lines: Vec<(String, FontWeight)> = Vec::new();
        if !hovered.label.is_empty() {
            lines.push((hovered.label.clone(), FontWeight::BOLD));
        }
        for field in &hovered.tooltip {
            lines.push((field.line(), FontWeight::NORMAL));
        }
        let max_width = lines
            .iter()
            .map(|(text, weight)| {
                let s = if *weight == FontWeight::BOLD {
                    heading_style
                } else {
                    style
                };
                self.measurer.measure(text, s).advance_width
            })
            .fold(0.0, f64::max);

        let rect = tooltip::place_box(pointer, lines.len(), max_width, container);
        let line_height = tooltip::FONT_SIZE + 3.0;
        let labels: Vec<Label> = lines
            .into_iter()
            .enumerate()
            .map(|(i, (text, weight))| {
                Label::new(
                    Point::new(
                        rect.x0 + tooltip::BOX_PADDING,
                        rect.y0 + tooltip::BOX_PADDING + tooltip::FONT_SIZE + i as f64 * line_height,
                    ),
                    text,
                    tooltip::FONT_SIZE,
                    self.theme.tooltip_text,
                )
                .weighted(weight)
            })
            .collect();
        ctx.draw_overlay_box(rect, self.theme.tooltip_fill, &labels);
    }
}

/// The rectangle the legend occupies, if one is reserved.
fn legend_band_rect(layout: &LayoutResult) -> Option<Rect> {
    let inner = layout.inner;
    let top = inner.y0 + layout.title_height;
    let band = layout.legend;
    match band.position? {
        LegendPosition::Top => Some(Rect::new(inner.x0, top, inner.x1, top + band.height)),
        LegendPosition::Bottom => {
            Some(Rect::new(inner.x0, inner.y1 - band.height, inner.x1, inner.y1))
        }
        LegendPosition::Left => Some(Rect::new(inner.x0, top, inner.x0 + band.width, inner.y1)),
        LegendPosition::Right => Some(Rect::new(inner.x1 - band.width, top, inner.x1, inner.y1)),
    }
}
