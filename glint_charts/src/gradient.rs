// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! CSS gradient descriptor parsing and backend paint synthesis.
//!
//! Palettes may list gradient descriptor strings
//! (`linear-gradient(90deg, #ff0000, #0000ff 80%)`) in place of solid
//! colors. Parsing is tolerant: an unparseable descriptor yields `None` and
//! the caller falls back to a solid color.

use alloc::string::String;
use alloc::vec::Vec;

use glint_scene::{GradientStop, LinearGradient, Paint, RadialGradient};
use kurbo::{Point, Rect};
use peniko::Color;
use smallvec::SmallVec;

use crate::float::FloatExt as _;
use crate::palette::parse_css_color;

/// The geometry of a parsed gradient.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GradientGeometry {
    /// A linear gradient at `angle` degrees (0 = left→right, 90 = top→bottom).
    Linear {
        /// Direction in degrees, `0..360`.
        angle: f64,
    },
    /// A radial gradient centered at `(cx, cy)` in unit-box coordinates.
    Radial {
        /// Center x in `0..=1`.
        cx: f64,
        /// Center y in `0..=1`.
        cy: f64,
    },
}

/// A parsed gradient descriptor with resolved stop offsets.
#[derive(Clone, Debug, PartialEq)]
pub struct GradientSpec {
    /// Linear or radial geometry.
    pub geometry: GradientGeometry,
    /// Ordered stops with offsets in `0..=1`.
    pub stops: SmallVec<[GradientStop; 4]>,
}

impl GradientSpec {
    /// The first stop's color, the solid fallback for this gradient.
    pub fn first_color(&self) -> Color {
        self.stops.first().map(|s| s.color).unwrap_or(Color::BLACK)
    }

    /// Synthesizes the vector-backend paint in unit-box coordinates.
    pub fn scene_paint(&self) -> Paint {
        match self.geometry {
            GradientGeometry::Linear { angle } => {
                let (start, end) = unit_box_vector(angle);
                Paint::Linear(LinearGradient {
                    start,
                    end,
                    stops: self.stops.clone(),
                })
            }
            GradientGeometry::Radial { cx, cy } => Paint::Radial(RadialGradient {
                center: Point::new(cx, cy),
                radius: 0.5,
                stops: self.stops.clone(),
            }),
        }
    }

    /// Synthesizes the raster-backend paint in absolute pixels, resolved
    /// against the mark's bounding rectangle.
    pub fn raster_paint(&self, bounds: Rect) -> Paint {
        let map = |p: Point| {
            Point::new(
                bounds.x0 + p.x * bounds.width(),
                bounds.y0 + p.y * bounds.height(),
            )
        };
        match self.geometry {
            GradientGeometry::Linear { angle } => {
                let (start, end) = unit_box_vector(angle);
                Paint::Linear(LinearGradient {
                    start: map(start),
                    end: map(end),
                    stops: self.stops.clone(),
                })
            }
            GradientGeometry::Radial { cx, cy } => Paint::Radial(RadialGradient {
                center: map(Point::new(cx, cy)),
                radius: 0.5 * bounds.width().max(bounds.height()),
                stops: self.stops.clone(),
            }),
        }
    }
}

/// Converts a gradient angle to unit-box start/end points via
/// `0.5 ∓ cos/sin(θ)/2` and `0.5 ± cos/sin(θ)/2`.
pub(crate) fn unit_box_vector(angle_deg: f64) -> (Point, Point) {
    let theta = angle_deg * (core::f64::consts::PI / 180.0);
    let (cos, sin) = (theta.cos(), theta.sin());
    (
        Point::new(0.5 - cos / 2.0, 0.5 - sin / 2.0),
        Point::new(0.5 + cos / 2.0, 0.5 + sin / 2.0),
    )
}

/// Parses a CSS gradient descriptor.
///
/// Returns `None` for anything that is not a well-formed
/// `linear-gradient(..)` / `radial-gradient(..)` with at least one parseable
/// color stop.
pub fn parse_gradient(input: &str) -> Option<GradientSpec> {
    let trimmed = input.trim();
    let (linear, body) = if let Some(rest) = trimmed.strip_prefix("linear-gradient(") {
        (true, rest)
    } else if let Some(rest) = trimmed.strip_prefix("radial-gradient(") {
        (false, rest)
    } else {
        return None;
    };
    let body = body.strip_suffix(')')?;
    let mut args = split_top_level(body);
    if args.is_empty() {
        return None;
    }

    let mut geometry = if linear {
        GradientGeometry::Linear { angle: 90.0 }
    } else {
        GradientGeometry::Radial { cx: 0.5, cy: 0.5 }
    };

    // First argument may describe direction/shape rather than a stop.
    let first = args[0].trim();
    let mut consumed_first = false;
    if linear {
        if let Some(angle) = parse_direction(first) {
            geometry = GradientGeometry::Linear {
                angle: angle.rem_euclid(360.0),
            };
            consumed_first = true;
        }
    } else if first.starts_with("circle") || first.starts_with("ellipse") || first.contains("at ")
    {
        if let Some((cx, cy)) = parse_center(first) {
            geometry = GradientGeometry::Radial { cx, cy };
        }
        consumed_first = true;
    }
    if consumed_first {
        args.remove(0);
    }

    let mut raw: Vec<(Color, Option<f32>)> = Vec::new();
    for arg in &args {
        let (color, pos) = parse_stop(arg)?;
        raw.push((color, pos));
    }
    if raw.is_empty() {
        return None;
    }

    let n = raw.len();
    let stops = raw
        .into_iter()
        .enumerate()
        .map(|(i, (color, pos))| GradientStop {
            offset: pos.unwrap_or(if n == 1 {
                0.0
            } else {
                i as f32 / (n - 1) as f32
            }),
            color,
        })
        .collect();
    Some(GradientSpec { geometry, stops })
}

fn parse_direction(arg: &str) -> Option<f64> {
    match arg {
        "to right" => return Some(0.0),
        "to bottom" => return Some(90.0),
        "to left" => return Some(180.0),
        "to top" => return Some(270.0),
        _ => {}
    }
    let deg = arg.strip_suffix("deg")?;
    deg.trim().parse::<f64>().ok().filter(|a| a.is_finite())
}

fn parse_center(arg: &str) -> Option<(f64, f64)> {
    let after_at = arg.split("at ").nth(1)?;
    let mut parts = after_at.split_whitespace();
    let cx = parse_percent64(parts.next()?)?;
    let cy = parts.next().map_or(Some(cx), parse_percent64)?;
    Some((cx, cy))
}

fn parse_percent64(token: &str) -> Option<f64> {
    let number = token.strip_suffix('%')?;
    let v = number.trim().parse::<f64>().ok()?;
    v.is_finite().then_some((v / 100.0).clamp(0.0, 1.0))
}

/// Parses one `color [position%]` stop argument.
fn parse_stop(arg: &str) -> Option<(Color, Option<f32>)> {
    let arg = arg.trim();
    let (color_part, pos) = match arg.rsplit_once(char::is_whitespace) {
        Some((head, tail)) if tail.ends_with('%') && !head.ends_with(',') => {
            (head.trim(), Some(parse_percent64(tail)? as f32))
        }
        _ => (arg, None),
    };
    Some((parse_css_color(color_part)?, pos))
}

/// Splits on commas that are not nested inside parentheses, so `rgb(..)`
/// colors survive.
fn split_top_level(s: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut depth = 0_i32;
    let mut current = String::new();
    for ch in s.chars() {
        match ch {
            '(' => {
                depth += 1;
                current.push(ch);
            }
            ')' => {
                depth -= 1;
                current.push(ch);
            }
            ',' if depth == 0 => {
                out.push(core::mem::take(&mut current));
            }
            _ => current.push(ch),
        }
    }
    if !current.trim().is_empty() {
        out.push(current);
    }
    out.into_iter().map(|s| String::from(s.trim())).collect()
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn unit_box_vector_matches_the_documented_formula() {
        let (p1, p2) = unit_box_vector(0.0);
        assert!((p1.y - p2.y).abs() < 1e-9, "0 degrees is horizontal");
        assert!((p1.x - 0.0).abs() < 1e-9 && (p2.x - 1.0).abs() < 1e-9);

        let (p1, p2) = unit_box_vector(90.0);
        assert!((p1.x - p2.x).abs() < 1e-9, "90 degrees is vertical");
        assert!((p1.y - 0.0).abs() < 1e-9 && (p2.y - 1.0).abs() < 1e-9);

        let (p1, p2) = unit_box_vector(180.0);
        assert!((p1.x - 1.0).abs() < 1e-9 && (p2.x - 0.0).abs() < 1e-9);

        let (p1, p2) = unit_box_vector(270.0);
        assert!((p1.y - 1.0).abs() < 1e-9 && (p2.y - 0.0).abs() < 1e-9);
    }

    #[test]
    fn parses_direction_keywords_and_angles() {
        let g = parse_gradient("linear-gradient(to right, #ff0000, #0000ff)").unwrap();
        assert_eq!(g.geometry, GradientGeometry::Linear { angle: 0.0 });

        let g = parse_gradient("linear-gradient(45deg, #ff0000, #0000ff)").unwrap();
        assert_eq!(g.geometry, GradientGeometry::Linear { angle: 45.0 });

        // No direction argument: defaults to top-to-bottom.
        let g = parse_gradient("linear-gradient(#ff0000, #0000ff)").unwrap();
        assert_eq!(g.geometry, GradientGeometry::Linear { angle: 90.0 });
    }

    #[test]
    fn stops_default_to_an_even_spread() {
        let g = parse_gradient("linear-gradient(to right, red, lime, blue)").unwrap();
        let offsets: std::vec::Vec<f32> = g.stops.iter().map(|s| s.offset).collect();
        assert_eq!(offsets, std::vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn explicit_positions_are_honored() {
        let g = parse_gradient("linear-gradient(to right, red 10%, blue 80%)").unwrap();
        assert!((g.stops[0].offset - 0.1).abs() < 1e-6);
        assert!((g.stops[1].offset - 0.8).abs() < 1e-6);
    }

    #[test]
    fn radial_center_parses() {
        let g = parse_gradient("radial-gradient(circle at 30% 40%, red, blue)").unwrap();
        match g.geometry {
            GradientGeometry::Radial { cx, cy } => {
                assert!((cx - 0.3).abs() < 1e-9);
                assert!((cy - 0.4).abs() < 1e-9);
            }
            GradientGeometry::Linear { .. } => panic!("expected radial"),
        }
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(parse_gradient("#ff0000").is_none());
        assert!(parse_gradient("linear-gradient(").is_none());
        assert!(parse_gradient("linear-gradient(to right, not-a-color)").is_none());
        assert!(parse_gradient("conic-gradient(red, blue)").is_none());
    }

    #[test]
    fn rgb_colors_survive_the_comma_split() {
        let g =
            parse_gradient("linear-gradient(to right, rgb(255, 0, 0), rgb(0, 0, 255))").unwrap();
        assert_eq!(g.stops.len(), 2);
        assert_eq!(g.stops[0].color.to_rgba8().r, 255);
    }

    #[test]
    fn raster_paint_resolves_against_bounds() {
        let g = parse_gradient("linear-gradient(to right, red, blue)").unwrap();
        let paint = g.raster_paint(Rect::new(10.0, 20.0, 110.0, 70.0));
        match paint {
            Paint::Linear(lg) => {
                assert!((lg.start.x - 10.0).abs() < 1e-9);
                assert!((lg.end.x - 110.0).abs() < 1e-9);
            }
            _ => panic!("expected linear paint"),
        }
    }
}
