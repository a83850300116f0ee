// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Z-index conventions for scene nodes.
//!
//! Chrome layers step by 4 so a host can slot custom nodes between any two
//! bands. The raster backend has no z-order; callers there emit primitives
//! in this same sequence instead.

/// Plot background fill.
pub const PLOT_BACKGROUND: i32 = -8;
/// Background gridlines.
pub const GRID_LINES: i32 = -4;
/// Filled series geometry (bars, areas, slices, cells).
pub const SERIES_FILL: i32 = 0;
/// Series outlines and line strokes.
pub const SERIES_STROKE: i32 = 4;
/// Point markers.
pub const SERIES_POINTS: i32 = 8;
/// Axis rules and tick marks.
pub const AXIS_RULES: i32 = 12;
/// Axis tick labels.
pub const AXIS_LABELS: i32 = 16;
/// Axis titles.
pub const AXIS_TITLES: i32 = 20;
/// Legend swatches.
pub const LEGEND_SWATCHES: i32 = 24;
/// Legend labels.
pub const LEGEND_LABELS: i32 = 28;
/// The chart title.
pub const TITLES: i32 = 32;
