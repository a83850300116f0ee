// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An immediate-mode software rasterizer for Glint charts.
//!
//! This backend renders straight into an RGBA8 [`Pixmap`]: there is no
//! retained tree, no z-order and no hover affordances, so chart renderers
//! emit primitives in paint order and re-render from scratch on every
//! interaction. The [`Painter`] offers the small primitive set charts need
//! (path fill/stroke, rectangles, bitmap-font text) plus a save/restore
//! stack for transform, alpha and rectangular clipping.
//!
//! Rasterization is deliberately simple: nonzero-winding scanline fill with
//! pixel-center sampling and no anti-aliasing. Text uses a built-in 5x7
//! bitmap font whose advance matches the heuristic text measurer, keeping
//! layout identical across backends.

#![no_std]

extern crate alloc;

mod float;
mod font;
mod painter;
mod pixmap;

pub use painter::Painter;
pub use pixmap::Pixmap;
