// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paint types shared by both rendering backends.
//!
//! This is a deliberately small model: solid sRGB colors plus two-geometry
//! gradients with plain color stop lists. Gradient geometry follows the
//! backend convention of its consumer:
//! - scene (vector) nodes use **unit-box** coordinates (`0..=1` against the
//!   painted shape's bounding box, the SVG `objectBoundingBox` convention);
//! - the raster painter uses **absolute pixel** coordinates.

extern crate alloc;

use kurbo::Point;
use peniko::Color;
use smallvec::SmallVec;

/// A single gradient color stop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    /// Stop offset in `0..=1`.
    pub offset: f32,
    /// Stop color.
    pub color: Color,
}

/// A linear gradient between two points.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearGradient {
    /// Gradient start point.
    pub start: Point,
    /// Gradient end point.
    pub end: Point,
    /// Color stops ordered by offset.
    pub stops: SmallVec<[GradientStop; 4]>,
}

/// A radial gradient from a center point.
#[derive(Clone, Debug, PartialEq)]
pub struct RadialGradient {
    /// Gradient center.
    pub center: Point,
    /// Gradient radius.
    pub radius: f64,
    /// Color stops ordered by offset.
    pub stops: SmallVec<[GradientStop; 4]>,
}

/// A fill or stroke paint.
#[derive(Clone, Debug, PartialEq)]
pub enum Paint {
    /// A solid color.
    Solid(Color),
    /// A linear gradient.
    Linear(LinearGradient),
    /// A radial gradient.
    Radial(RadialGradient),
}

impl Paint {
    /// Returns the paint's representative solid color.
    ///
    /// For gradients this is the first stop (used by degraded paths such as
    /// legend text or backends without gradient support).
    pub fn first_color(&self) -> Color {
        match self {
            Self::Solid(c) => *c,
            Self::Linear(g) => g.stops.first().map(|s| s.color).unwrap_or(Color::BLACK),
            Self::Radial(g) => g.stops.first().map(|s| s.color).unwrap_or(Color::BLACK),
        }
    }

    /// Returns a copy with every stop/solid alpha scaled by `alpha`.
    #[must_use]
    pub fn with_alpha(&self, alpha: f32) -> Self {
        let scale = |c: Color| c.multiply_alpha(alpha);
        match self {
            Self::Solid(c) => Self::Solid(scale(*c)),
            Self::Linear(g) => {
                let mut g = g.clone();
                for s in &mut g.stops {
                    s.color = scale(s.color);
                }
                Self::Linear(g)
            }
            Self::Radial(g) => {
                let mut g = g.clone();
                for s in &mut g.stops {
                    s.color = scale(s.color);
                }
                Self::Radial(g)
            }
        }
    }
}

impl From<Color> for Paint {
    fn from(value: Color) -> Self {
        Self::Solid(value)
    }
}

/// Interpolates gradient stops at parameter `t` (clamped to `0..=1`).
///
/// Stops are assumed sorted by offset; an empty stop list yields black.
pub fn stops_color_at(stops: &[GradientStop], t: f32) -> Color {
    let Some(first) = stops.first() else {
        return Color::BLACK;
    };
    let t = t.clamp(0.0, 1.0);
    if t <= first.offset {
        return first.color;
    }
    let last = stops[stops.len() - 1];
    if t >= last.offset {
        return last.color;
    }
    for pair in stops.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t >= a.offset && t <= b.offset {
            let span = b.offset - a.offset;
            let f = if span <= f32::EPSILON {
                0.0
            } else {
                (t - a.offset) / span
            };
            return lerp_color(a.color, b.color, f);
        }
    }
    last.color
}

fn lerp_color(a: Color, b: Color, t: f32) -> Color {
    let ac = a.components;
    let bc = b.components;
    Color::new([
        ac[0] + (bc[0] - ac[0]) * t,
        ac[1] + (bc[1] - ac[1]) * t,
        ac[2] + (bc[2] - ac[2]) * t,
        ac[3] + (bc[3] - ac[3]) * t,
    ])
}
