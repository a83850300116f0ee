// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The immediate-mode painter.

extern crate alloc;

use alloc::vec::Vec;

use glint_scene::{GradientStop, Paint, stops_color_at};
use glint_text::{FontWeight, TextAnchor, TextBaseline};
use kurbo::{Affine, BezPath, PathEl, Point, Rect, Shape, Stroke, StrokeOpts, flatten, stroke};
use peniko::Color;
use peniko::color::Rgba8;

use crate::float::FloatExt as _;
use crate::font;
use crate::pixmap::Pixmap;

/// Curve flattening tolerance in pixels.
const TOLERANCE: f64 = 0.25;

#[derive(Clone, Debug)]
struct State {
    transform: Affine,
    alpha: f32,
    clip: Option<Rect>,
}

impl Default for State {
    fn default() -> Self {
        Self {
            transform: Affine::IDENTITY,
            alpha: 1.0,
            clip: None,
        }
    }
}

/// Paints shapes and text directly into a [`Pixmap`].
///
/// Unlike the retained scene there is no node tree and no z-order: calls
/// take effect immediately, so callers emit primitives in paint order. A
/// save/restore stack carries the current transform, a global alpha and an
/// optional rectangular clip.
pub struct Painter<'a> {
    pixmap: &'a mut Pixmap,
    state: State,
    stack: Vec<State>,
}

impl<'a> Painter<'a> {
    /// Creates a painter over `pixmap` with an identity state.
    pub fn new(pixmap: &'a mut Pixmap) -> Self {
        Self {
            pixmap,
            state: State::default(),
            stack: Vec::new(),
        }
    }

    /// Target width in pixels.
    pub fn width(&self) -> f64 {
        f64::from(self.pixmap.width())
    }

    /// Target height in pixels.
    pub fn height(&self) -> f64 {
        f64::from(self.pixmap.height())
    }

    /// Pushes the current state.
    pub fn save(&mut self) {
        self.stack.push(self.state.clone());
    }

    /// Pops to the most recent save; a pop without a matching save resets to
    /// the identity state.
    pub fn restore(&mut self) {
        self.state = self.stack.pop().unwrap_or_default();
    }

    /// Appends `affine` to the current transform.
    pub fn transform(&mut self, affine: Affine) {
        self.state.transform *= affine;
    }

    /// Multiplies the global alpha.
    pub fn mul_alpha(&mut self, alpha: f32) {
        self.state.alpha *= alpha.clamp(0.0, 1.0);
    }

    /// Intersects the clip with `rect` (transformed to device space).
    pub fn clip_rect(&mut self, rect: Rect) {
        let device = self.state.transform.transform_rect_bbox(rect);
        self.state.clip = Some(match self.state.clip {
            Some(clip) => clip.intersect(device),
            None => device,
        });
    }

    /// Fills `path` with `paint` using the nonzero winding rule.
    pub fn fill_path(&mut self, path: &BezPath, paint: &Paint) {
        let mut device = path.clone();
        device.apply_affine(self.state.transform);
        let shader = Shader::new(paint, self.state.transform);
        self.fill_device(&device, &shader);
    }

    /// Fills an axis-aligned rectangle.
    pub fn fill_rect(&mut self, rect: Rect, paint: &Paint) {
        self.fill_path(&rect.to_path(TOLERANCE), paint);
    }

    /// Strokes `path` with the given width and dash pattern (empty for a
    /// solid stroke).
    pub fn stroke_path(&mut self, path: &BezPath, paint: &Paint, width: f64, dash: &[f64]) {
        if width <= 0.0 {
            return;
        }
        let mut style = Stroke::new(width);
        if !dash.is_empty() {
            style = style.with_dashes(0.0, dash.iter().copied());
        }
        let outline = stroke(path.iter(), &style, &StrokeOpts::default(), TOLERANCE);
        self.fill_path(&outline, paint);
    }

    /// Draws one line of text with the built-in bitmap font.
    ///
    /// `pos` is interpreted through `anchor` and `baseline` the same way the
    /// vector backend interprets them, so both backends place labels at the
    /// same spot. `angle` rotates around `pos`, in degrees.
    pub fn draw_text(
        &mut self,
        pos: Point,
        text: &str,
        font_size: f64,
        weight: FontWeight,
        color: Color,
        anchor: TextAnchor,
        baseline: TextBaseline,
        angle: f64,
    ) {
        let unit = font_size / font::UNITS_PER_EM;
        let count = text.chars().count() as f64;
        let advance = count * font::ADVANCE * unit;
        let dx = match anchor {
            TextAnchor::Start => 0.0,
            TextAnchor::Middle => -advance / 2.0,
            TextAnchor::End => -advance,
        };
        // Matches the heuristic measurer's 0.8/0.2 ascent/descent split.
        let dy = match baseline {
            TextBaseline::Alphabetic => 0.0,
            TextBaseline::Middle => 0.3 * font_size,
            TextBaseline::Hanging => 0.8 * font_size,
        };

        let mut ink = BezPath::new();
        let mut pen = 0.0;
        for ch in text.chars() {
            let cols = font::glyph(ch);
            for (ci, bits) in cols.iter().enumerate() {
                for row in 0..7u8 {
                    if bits & (1 << row) != 0 {
                        let x0 = pen + ci as f64 * unit;
                        let y0 = (f64::from(row) - font::BASELINE_ROW) * unit;
                        push_rect(&mut ink, x0, y0, unit);
                    }
                }
            }
            pen += font::ADVANCE * unit;
        }

        self.save();
        self.transform(
            Affine::translate(pos.to_vec2())
                * Affine::rotate(angle * (core::f64::consts::PI / 180.0))
                * Affine::translate((dx, dy)),
        );
        let paint = Paint::Solid(color);
        self.fill_path(&ink, &paint);
        if weight >= FontWeight::BOLD {
            // Cheap emboldening: a second strike half a unit to the right.
            self.transform(Affine::translate((0.5 * unit, 0.0)));
            self.fill_path(&ink, &paint);
        }
        self.restore();
    }

    /// Scanline fill of a device-space path (nonzero winding, pixel-center
    /// sampling, no anti-aliasing).
    fn fill_device(&mut self, path: &BezPath, shader: &Shader) {
        let edges = collect_edges(path);
        if edges.is_empty() {
            return;
        }
        let bbox = path.bounding_box();
        let clip = self.state.clip;
        let (y_min, y_max) = match clip {
            Some(c) => (bbox.y0.max(c.y0), bbox.y1.min(c.y1)),
            None => (bbox.y0, bbox.y1),
        };
        if !y_min.is_finite() || !y_max.is_finite() {
            return;
        }
        let y_start = (y_min.floor().max(0.0)) as i64;
        let y_end = (y_max.ceil().min(self.height())) as i64;

        let mut crossings: Vec<(f64, i32)> = Vec::new();
        for y in y_start..y_end {
            let yc = y as f64 + 0.5;
            crossings.clear();
            for (p0, p1) in &edges {
                let dir = if p0.y <= yc && p1.y > yc {
                    1
                } else if p1.y <= yc && p0.y > yc {
                    -1
                } else {
                    continue;
                };
                let t = (yc - p0.y) / (p1.y - p0.y);
                crossings.push((p0.x + t * (p1.x - p0.x), dir));
            }
            crossings.sort_by(|a, b| a.0.total_cmp(&b.0));

            let mut winding = 0;
            let mut span_start = 0.0;
            for (x, dir) in &crossings {
                if winding == 0 {
                    span_start = *x;
                }
                winding += dir;
                if winding == 0 {
                    self.fill_span(yc, y, span_start, *x, clip, shader);
                }
            }
        }
    }

    fn fill_span(
        &mut self,
        yc: f64,
        y: i64,
        mut xa: f64,
        mut xb: f64,
        clip: Option<Rect>,
        shader: &Shader,
    ) {
        if let Some(c) = clip {
            if yc < c.y0 || yc >= c.y1 {
                return;
            }
            xa = xa.max(c.x0);
            xb = xb.min(c.x1);
        }
        xa = xa.max(0.0);
        xb = xb.min(self.width());
        if xb <= xa {
            return;
        }
        let x_start = (xa - 0.5).ceil() as i64;
        let x_end = (xb - 0.5).ceil() as i64;
        let alpha = self.state.alpha;
        for x in x_start..x_end {
            let rgba = shader.sample(x as f64 + 0.5, yc);
            self.pixmap.blend_pixel(x, y, rgba, alpha);
        }
    }
}

fn push_rect(path: &mut BezPath, x0: f64, y0: f64, size: f64) {
    path.move_to((x0, y0));
    path.line_to((x0 + size, y0));
    path.line_to((x0 + size, y0 + size));
    path.line_to((x0, y0 + size));
    path.close_path();
}

/// Flattens a path into closed polygon edges.
fn collect_edges(path: &BezPath) -> Vec<(Point, Point)> {
    let mut edges = Vec::new();
    let mut start = Point::ZERO;
    let mut last = Point::ZERO;
    flatten(path.iter(), TOLERANCE, |el| match el {
        PathEl::MoveTo(p) => {
            if last != start {
                edges.push((last, start));
            }
            start = p;
            last = p;
        }
        PathEl::LineTo(p) => {
            if p != last {
                edges.push((last, p));
            }
            last = p;
        }
        PathEl::ClosePath => {
            if last != start {
                edges.push((last, start));
            }
            last = start;
        }
        // flatten only emits moves, lines and closes.
        PathEl::QuadTo(..) | PathEl::CurveTo(..) => {}
    });
    if last != start {
        edges.push((last, start));
    }
    edges
}

/// A paint resolved into device space.
enum Shader {
    Solid(Rgba8),
    Linear {
        start: Point,
        delta: kurbo::Vec2,
        len_sq: f64,
        stops: Vec<GradientStop>,
    },
    Radial {
        center: Point,
        radius: f64,
        stops: Vec<GradientStop>,
    },
}

impl Shader {
    fn new(paint: &Paint, transform: Affine) -> Self {
        match paint {
            Paint::Solid(c) => Self::Solid(c.to_rgba8()),
            Paint::Linear(g) => {
                let start = transform * g.start;
                let end = transform * g.end;
                let delta = end - start;
                Self::Linear {
                    start,
                    delta,
                    len_sq: delta.dot(delta),
                    stops: g.stops.to_vec(),
                }
            }
            Paint::Radial(g) => {
                let center = transform * g.center;
                let radius = g.radius * transform.determinant().abs().sqrt();
                Self::Radial {
                    center,
                    radius,
                    stops: g.stops.to_vec(),
                }
            }
        }
    }

    fn sample(&self, x: f64, y: f64) -> Rgba8 {
        match self {
            Self::Solid(rgba) => *rgba,
            Self::Linear {
                start,
                delta,
                len_sq,
                stops,
            } => {
                let t = if *len_sq <= f64::EPSILON {
                    0.0
                } else {
                    (Point::new(x, y) - *start).dot(*delta) / len_sq
                };
                stops_color_at(stops, t as f32).to_rgba8()
            }
            Self::Radial {
                center,
                radius,
                stops,
            } => {
                let d = Point::new(x, y) - *center;
                let t = if *radius <= f64::EPSILON {
                    1.0
                } else {
                    d.hypot() / radius
                };
                stops_color_at(stops, t as f32).to_rgba8()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use glint_scene::{GradientStop, LinearGradient};
    use peniko::color::palette::css;
    use smallvec::smallvec;

    use super::*;

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Rect {
        Rect::new(x0, y0, x1, y1)
    }

    #[test]
    fn fill_rect_covers_interior_only() {
        let mut pm = Pixmap::new(10, 10);
        let mut p = Painter::new(&mut pm);
        p.fill_rect(rect(2.0, 2.0, 8.0, 8.0), &Paint::Solid(css::RED));
        assert_eq!(pm.pixel(5, 5).r, 255);
        assert_eq!(pm.pixel(5, 5).a, 255);
        assert_eq!(pm.pixel(1, 5).a, 0);
        assert_eq!(pm.pixel(8, 8).a, 0, "x1/y1 edge is exclusive");
    }

    #[test]
    fn transform_moves_the_fill() {
        let mut pm = Pixmap::new(10, 10);
        let mut p = Painter::new(&mut pm);
        p.save();
        p.transform(Affine::translate((4.0, 0.0)));
        p.fill_rect(rect(0.0, 0.0, 4.0, 4.0), &Paint::Solid(css::BLUE));
        p.restore();
        p.fill_rect(rect(0.0, 6.0, 2.0, 8.0), &Paint::Solid(css::LIME));
        assert_eq!(pm.pixel(5, 1).b, 255);
        assert_eq!(pm.pixel(1, 1).a, 0);
        assert_eq!(pm.pixel(1, 7).g, 255, "restore undoes the translate");
    }

    #[test]
    fn clip_limits_painting() {
        let mut pm = Pixmap::new(10, 10);
        let mut p = Painter::new(&mut pm);
        p.save();
        p.clip_rect(rect(0.0, 0.0, 5.0, 10.0));
        p.fill_rect(rect(0.0, 0.0, 10.0, 10.0), &Paint::Solid(css::RED));
        p.restore();
        assert_eq!(pm.pixel(2, 2).a, 255);
        assert_eq!(pm.pixel(7, 2).a, 0);
    }

    #[test]
    fn nonzero_winding_fills_self_overlap() {
        // Two overlapping rects in one path still fill solidly.
        let mut path = BezPath::new();
        push_rect(&mut path, 1.0, 1.0, 5.0);
        push_rect(&mut path, 3.0, 3.0, 5.0);
        let mut pm = Pixmap::new(10, 10);
        let mut p = Painter::new(&mut pm);
        p.fill_path(&path, &Paint::Solid(css::BLACK));
        assert_eq!(pm.pixel(4, 4).a, 255, "overlap region stays filled");
    }

    #[test]
    fn linear_gradient_shades_left_to_right() {
        let paint = Paint::Linear(LinearGradient {
            start: Point::new(0.0, 0.0),
            end: Point::new(10.0, 0.0),
            stops: smallvec![
                GradientStop {
                    offset: 0.0,
                    color: Color::from_rgba8(0, 0, 0, 255),
                },
                GradientStop {
                    offset: 1.0,
                    color: Color::from_rgba8(255, 255, 255, 255),
                },
            ],
        });
        let mut pm = Pixmap::new(10, 4);
        let mut p = Painter::new(&mut pm);
        p.fill_rect(rect(0.0, 0.0, 10.0, 4.0), &paint);
        let left = pm.pixel(0, 1).r;
        let right = pm.pixel(9, 1).r;
        assert!(left < 30, "left edge near black, got {left}");
        assert!(right > 225, "right edge near white, got {right}");
    }

    #[test]
    fn stroke_outlines_without_filling() {
        let mut pm = Pixmap::new(20, 20);
        let mut p = Painter::new(&mut pm);
        let path = rect(4.0, 4.0, 16.0, 16.0).to_path(0.1);
        p.stroke_path(&path, &Paint::Solid(css::BLACK), 2.0, &[]);
        assert_eq!(pm.pixel(4, 10).a, 255, "on the edge");
        assert_eq!(pm.pixel(10, 10).a, 0, "interior untouched");
    }

    #[test]
    fn text_ink_lands_near_the_anchor() {
        let mut pm = Pixmap::new(40, 20);
        let mut p = Painter::new(&mut pm);
        p.draw_text(
            Point::new(2.0, 15.0),
            "A1",
            10.0,
            FontWeight::NORMAL,
            css::BLACK,
            TextAnchor::Start,
            TextBaseline::Alphabetic,
            0.0,
        );
        let mut ink = 0;
        for y in 0..20 {
            for x in 0..40 {
                if pm.pixel(x, y).a > 0 {
                    ink += 1;
                    assert!(x < 14, "advance is 6 px per glyph at size 10, x={x}");
                    assert!((8..=15).contains(&y), "glyph rows sit above baseline, y={y}");
                }
            }
        }
        assert!(ink > 10, "expected some ink, got {ink}");
    }
}
