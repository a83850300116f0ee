// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The retained scene container.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use crate::node::{Node, NodeId, NodeKind};

/// A persistent scene: chart content plus a disposable overlay layer.
///
/// The content layer holds everything a render pass emits (grid, marks,
/// guides). The overlay layer holds transient interaction nodes (the hover
/// tooltip); it is cleared on [`Scene::begin_pass`] and can be dropped on its
/// own via [`Scene::clear_overlay`], so transient nodes never leak across
/// renders.
#[derive(Clone, Debug)]
pub struct Scene {
    width: f64,
    height: f64,
    next_id: u64,
    content: Vec<Node>,
    overlay: Vec<Node>,
}

impl Scene {
    /// Creates an empty scene with the given pixel dimensions.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
            next_id: 0,
            content: Vec::new(),
            overlay: Vec::new(),
        }
    }

    /// Scene width in pixels.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Scene height in pixels.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Allocates a fresh node id.
    pub fn alloc_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Clears both layers, keeping id allocation monotonic.
    ///
    /// Renderers append fresh nodes rather than diffing, so a caller must
    /// begin each pass here (or call [`Scene::clear`]) before re-rendering.
    pub fn begin_pass(&mut self) {
        self.content.clear();
        self.overlay.clear();
    }

    /// Clears everything, including the overlay.
    pub fn clear(&mut self) {
        self.begin_pass();
    }

    /// Removes overlay (tooltip) nodes only.
    pub fn clear_overlay(&mut self) {
        self.overlay.clear();
    }

    /// Appends a node to the content layer.
    pub fn push(&mut self, node: Node) {
        self.content.push(node);
    }

    /// Appends a node to the overlay layer.
    ///
    /// Overlay nodes always paint above content, regardless of z-index.
    pub fn push_overlay(&mut self, node: Node) {
        self.overlay.push(node);
    }

    /// Convenience: allocates an id and pushes a content node.
    pub fn add(&mut self, kind: NodeKind, z_index: i32) -> NodeId {
        let id = self.alloc_id();
        self.push(Node::new(id, kind).with_z_index(z_index));
        id
    }

    /// Content nodes in insertion order.
    pub fn content(&self) -> &[Node] {
        &self.content
    }

    /// Overlay nodes in insertion order.
    pub fn overlay(&self) -> &[Node] {
        &self.overlay
    }

    /// Content nodes in paint order: sorted by `(z_index, id)`.
    pub fn content_ordered(&self) -> Vec<&Node> {
        let mut out: Vec<&Node> = self.content.iter().collect();
        out.sort_by_key(|n| (n.z_index, n.id));
        out
    }

    /// Serializes the scene to an SVG document.
    pub fn to_svg(&self) -> String {
        crate::svg::write_svg(self)
    }
}
