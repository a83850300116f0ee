// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene node types.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use glint_text::{FontWeight, TextAnchor, TextBaseline};
use kurbo::{BezPath, Point};
use smallvec::SmallVec;

use crate::paint::Paint;

/// A stable scene node identity.
///
/// Ids are allocated by [`crate::Scene`] and are unique within one scene for
/// its whole lifetime, so hosts can reference nodes across passes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

/// Stroke parameters for path nodes.
#[derive(Clone, Debug)]
pub struct StrokeProps {
    /// Stroke paint.
    pub paint: Paint,
    /// Stroke width in scene coordinates.
    pub width: f64,
    /// Dash pattern in scene coordinates; empty means a solid stroke.
    pub dash: SmallVec<[f64; 4]>,
}

impl StrokeProps {
    /// Creates a solid stroke.
    pub fn solid(paint: impl Into<Paint>, width: f64) -> Self {
        Self {
            paint: paint.into(),
            width,
            dash: SmallVec::new(),
        }
    }

    /// Sets the dash pattern.
    #[must_use]
    pub fn with_dash(mut self, dash: impl IntoIterator<Item = f64>) -> Self {
        self.dash = dash.into_iter().collect();
        self
    }
}

/// A filled and/or stroked path.
#[derive(Clone, Debug)]
pub struct PathNode {
    /// Path geometry in scene coordinates.
    pub path: BezPath,
    /// Fill paint, if any.
    pub fill: Option<Paint>,
    /// Stroke, if any.
    pub stroke: Option<StrokeProps>,
    /// Node opacity in `0..=1`, applied to both fill and stroke.
    pub opacity: f32,
}

impl PathNode {
    /// Creates a filled path with no stroke.
    pub fn filled(path: BezPath, fill: impl Into<Paint>) -> Self {
        Self {
            path,
            fill: Some(fill.into()),
            stroke: None,
            opacity: 1.0,
        }
    }

    /// Creates a stroked path with no fill.
    pub fn stroked(path: BezPath, stroke: StrokeProps) -> Self {
        Self {
            path,
            fill: None,
            stroke: Some(stroke),
            opacity: 1.0,
        }
    }

    /// Sets the stroke.
    #[must_use]
    pub fn with_stroke(mut self, stroke: StrokeProps) -> Self {
        self.stroke = Some(stroke);
        self
    }

    /// Sets the node opacity.
    #[must_use]
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }
}

/// A single line of text.
///
/// Text is stored unshaped; the serializer maps anchor/baseline onto the
/// target's text attributes.
#[derive(Clone, Debug)]
pub struct TextNode {
    /// Text origin in scene coordinates.
    pub pos: Point,
    /// The text content (a single line).
    pub text: String,
    /// Font size in scene coordinates.
    pub font_size: f64,
    /// Font weight.
    pub weight: FontWeight,
    /// Fill paint.
    pub fill: Paint,
    /// Horizontal anchoring relative to `pos`.
    pub anchor: TextAnchor,
    /// Vertical baseline relative to `pos`.
    pub baseline: TextBaseline,
    /// Rotation around `pos`, in degrees.
    pub angle: f64,
}

impl TextNode {
    /// Creates a text node with default anchoring and no rotation.
    pub fn new(pos: Point, text: impl Into<String>, font_size: f64, fill: impl Into<Paint>) -> Self {
        Self {
            pos,
            text: text.into(),
            font_size,
            weight: FontWeight::NORMAL,
            fill: fill.into(),
            anchor: TextAnchor::Start,
            baseline: TextBaseline::Alphabetic,
            angle: 0.0,
        }
    }

    /// Sets the horizontal anchor.
    #[must_use]
    pub fn with_anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Sets the vertical baseline.
    #[must_use]
    pub fn with_baseline(mut self, baseline: TextBaseline) -> Self {
        self.baseline = baseline;
        self
    }

    /// Sets the rotation angle in degrees.
    #[must_use]
    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }

    /// Sets the font weight.
    #[must_use]
    pub fn with_weight(mut self, weight: FontWeight) -> Self {
        self.weight = weight;
        self
    }
}

/// The payload of a scene node.
#[derive(Clone, Debug)]
pub enum NodeKind {
    /// A container; children render in insertion order.
    Group(Vec<Node>),
    /// A filled/stroked path.
    Path(PathNode),
    /// A text run.
    Text(TextNode),
}

/// A node in the retained scene.
#[derive(Clone, Debug)]
pub struct Node {
    /// Stable identity.
    pub id: NodeId,
    /// Render order; higher values paint later. Ties break on `id`.
    pub z_index: i32,
    /// Optional hover title (serialized as an SVG `<title>` child).
    pub title: Option<String>,
    /// The node payload.
    pub kind: NodeKind,
}

impl Node {
    /// Creates a node with z-index 0 and no title.
    pub fn new(id: NodeId, kind: NodeKind) -> Self {
        Self {
            id,
            z_index: 0,
            title: None,
            kind,
        }
    }

    /// Sets the z-index.
    #[must_use]
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Sets the hover title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}
