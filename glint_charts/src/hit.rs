// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hit regions: the interaction side of a render pass.
//!
//! Mark renderers record one region per interactive mark while drawing. The
//! host feeds pointer positions back through [`crate::RenderContext`] to
//! resolve hovers (tooltips) and clicks (selection).

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect};

use crate::tooltip::TooltipField;

/// What a click on a mark selects.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selection {
    /// A data series, by series index.
    Series {
        /// The series index in encoding order.
        id: usize,
    },
    /// The chart title.
    Title,
}

/// The geometry of one interactive region.
#[derive(Clone, Debug, PartialEq)]
pub enum HitShape {
    /// An axis-aligned rectangle.
    Rect(Rect),
    /// A circle, used for line/scatter points (the invisible enlarged
    /// tooltip trigger).
    Circle {
        /// Center.
        center: Point,
        /// Radius.
        radius: f64,
    },
    /// An annular sector (pie slices).
    Sector {
        /// Pie center.
        center: Point,
        /// Inner radius.
        inner: f64,
        /// Outer radius.
        outer: f64,
        /// Start angle in radians.
        start: f64,
        /// End angle in radians, `>= start`.
        end: f64,
    },
    /// A convex or concave polygon (radar series).
    Polygon(Vec<Point>),
}

impl HitShape {
    /// Whether `p` lies inside the shape.
    pub fn contains(&self, p: Point) -> bool {
        match self {
            Self::Rect(r) => r.contains(p),
            Self::Circle { center, radius } => (p - *center).hypot2() <= radius * radius,
            Self::Sector {
                center,
                inner,
                outer,
                start,
                end,
            } => {
                let d = p - *center;
                let dist2 = d.hypot2();
                if dist2 < inner * inner || dist2 > outer * outer {
                    return false;
                }
                let angle = d.atan2();
                let span = end - start;
                ((angle - start).rem_euclid(core::f64::consts::TAU)) <= span
            }
            Self::Polygon(points) => polygon_contains(points, p),
        }
    }
}

/// Even-odd ray cast.
fn polygon_contains(points: &[Point], p: Point) -> bool {
    let mut inside = false;
    let n = points.len();
    if n < 3 {
        return false;
    }
    let mut j = n - 1;
    for i in 0..n {
        let (a, b) = (points[i], points[j]);
        if (a.y > p.y) != (b.y > p.y) {
            let x = a.x + (p.y - a.y) / (b.y - a.y) * (b.x - a.x);
            if p.x < x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// One interactive region recorded during a render pass.
#[derive(Clone, Debug, PartialEq)]
pub struct HitRegion {
    /// The region geometry.
    pub shape: HitShape,
    /// What clicking it selects.
    pub selection: Selection,
    /// Tooltip content for hovers.
    pub tooltip: Vec<TooltipField>,
    /// The hovered mark's label (series or category), for hosts that show
    /// a heading.
    pub label: String,
}
