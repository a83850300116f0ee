// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A retained-mode vector scene graph for Glint charts.
//!
//! The scene is a persistent tree of typed nodes (groups, paths, text) with
//! explicit z-ordering and stable ids. Chart renderers append nodes during a
//! render pass; the host keeps the scene alive between passes and serializes
//! it (currently to SVG) whenever it needs pixels on screen.
//!
//! Two details matter for chart interaction:
//! - every node can carry a `title` string, surfaced as a hover tooltip by
//!   the SVG serializer (`<title>`), and
//! - a separate **overlay** layer holds transient nodes (the hover tooltip
//!   box). The overlay is cleared at the start of every render pass and can
//!   be disposed independently of the chart content, so tooltip nodes never
//!   accumulate across renders.

#![no_std]

extern crate alloc;

mod node;
mod paint;
mod scene;
mod svg;

pub use node::{Node, NodeId, NodeKind, PathNode, StrokeProps, TextNode};
pub use paint::{GradientStop, LinearGradient, Paint, RadialGradient, stops_color_at};
pub use scene::Scene;
