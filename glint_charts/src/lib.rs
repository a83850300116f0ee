// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A declarative chart rendering engine.
//!
//! A chart is a [`ChartConfig`] (chart kind, channel encodings, mark and
//! layout options) applied to a [`DataSet`] of pre-aggregated rows. One
//! render pass turns the pair into pixels on either backend:
//! - the **vector** backend appends to a retained [`glint_scene::Scene`]
//!   (serialized to SVG by the host), and
//! - the **raster** backend paints immediately onto a
//!   [`glint_raster::Pixmap`].
//!
//! Chart math is shared; only the drawing primitives differ, behind the
//! [`RenderContext`] facade. Besides pixels, a pass reports hit regions for
//! hover tooltips and click selection — see [`Chart`] and [`RenderReport`].
//!
//! ```
//! use glint_charts::{Chart, ChartConfig, ChartKind, DataSet, Encoding, FieldEncoding, Row, StaticPalettes};
//!
//! let config = ChartConfig::new(
//!     ChartKind::Bar,
//!     Encoding::new()
//!         .with_x(FieldEncoding::nominal("region"))
//!         .with_y(FieldEncoding::quantitative("sales")),
//! );
//! let data = DataSet::from_rows([
//!     Row::new().with("region", "west").with("sales", 12.0),
//!     Row::new().with("region", "east").with("sales", 9.0),
//! ]);
//! let palettes = StaticPalettes::default();
//! let mut scene = glint_scene::Scene::new(400.0, 300.0);
//! let report = Chart::new(&config, &data, &palettes).render_scene(&mut scene);
//! assert!(!report.hits.is_empty());
//! ```

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod axis;
mod config;
mod context;
mod data;
mod engine;
mod float;
mod format;
mod gradient;
mod hit;
mod layout;
mod legend;
mod mark;
mod palette;
mod scale;
#[cfg(test)]
mod scenario_tests;
mod title;
mod tooltip;
mod z_order;

pub use axis::{AxisTheme, Tick};
pub use config::{
    AxisOptions, BinSpec, Channel, ChartConfig, ChartKind, ColorScheme, Encoding, FieldEncoding,
    FieldType, Interpolation, LayoutOptions, LegendAlignment, LegendOrientation, LegendPosition,
    MarkStyle,
};
pub use context::{Backend, FillOptions, Label, RenderContext, StrokeOptions};
pub use data::{ColumnMeta, ColumnTable, DataSet, Row, Value};
pub use engine::{Chart, RenderReport, Theme};
pub use format::{Granularity, format_date, format_number, format_time, format_value};
pub use gradient::{GradientGeometry, GradientSpec, parse_gradient};
pub use hit::{HitRegion, HitShape, Selection};
pub use layout::{GraphArea, LayoutResult, LegendBand, compute_layout};
pub use legend::LegendItem;
pub use mark::MarkOutput;
pub use palette::{
    ColorResolver, DEFAULT_COLORS, Palette, PaletteProvider, SeriesPaint, StaticPalettes,
    parse_css_color, scheme_color,
};
pub use scale::{Scale, ScaleBand, ScaleLinear, ScaleSet, ScaleTime, infer_scales, nice_ticks};
pub use tooltip::{FADE_IN_MS, FADE_OUT_MS, TooltipField, fields_for_row};
pub use z_order::{
    AXIS_LABELS, AXIS_RULES, AXIS_TITLES, GRID_LINES, LEGEND_LABELS, LEGEND_SWATCHES,
    PLOT_BACKGROUND, SERIES_FILL, SERIES_POINTS, SERIES_STROKE, TITLES,
};
