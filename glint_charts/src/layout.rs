// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The layout engine: carving the pixel rectangle into chart bands.

use kurbo::Rect;

use crate::config::{ChartConfig, ChartKind, LegendOrientation, LegendPosition};
use crate::legend;

/// Base padding on every side, in pixels.
pub(crate) const PADDING: f64 = 10.0;

/// Pie charts keep only this much padding on the left and bottom, since
/// those sides carry no axis chrome.
pub(crate) const PIE_EDGE_PADDING: f64 = 2.0;

/// Title band height (font size plus spacing).
pub(crate) const TITLE_BAND: f64 = 24.0;

/// Title font size.
pub(crate) const TITLE_FONT_SIZE: f64 = 16.0;

/// Height reserved for the x axis (tick marks plus tick labels).
pub(crate) const X_AXIS_BAND: f64 = 20.0;

/// Width reserved for the y axis (tick marks plus tick labels).
pub(crate) const Y_AXIS_BAND: f64 = 40.0;

/// Height/width reserved for an axis label (title) band.
pub(crate) const AXIS_LABEL_BAND: f64 = 18.0;

/// The rectangle marks draw in, excluding all chrome.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GraphArea {
    /// Left edge.
    pub left: f64,
    /// Right edge.
    pub right: f64,
    /// Top edge.
    pub top: f64,
    /// Bottom edge.
    pub bottom: f64,
}

impl GraphArea {
    /// Builds an area from edges, clamping to non-negative extents.
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right: right.max(left),
            bottom: bottom.max(top),
        }
    }

    /// `right - left`, never negative.
    pub fn width(&self) -> f64 {
        (self.right - self.left).max(0.0)
    }

    /// `bottom - top`, never negative.
    pub fn height(&self) -> f64 {
        (self.bottom - self.top).max(0.0)
    }

    /// The area as a [`Rect`].
    pub fn rect(&self) -> Rect {
        Rect::new(self.left, self.top, self.right, self.bottom)
    }

    /// The center point.
    pub fn center(&self) -> kurbo::Point {
        kurbo::Point::new(
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }

    /// Whether every bound is finite.
    ///
    /// Render passes abort on an invalid area instead of letting NaN reach a
    /// drawing primitive.
    pub fn is_valid(&self) -> bool {
        self.left.is_finite()
            && self.right.is_finite()
            && self.top.is_finite()
            && self.bottom.is_finite()
    }
}

/// The size of the band a legend occupies.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LegendBand {
    /// Which side the band is on, if a legend is shown.
    pub position: Option<LegendPosition>,
    /// Band height (top/bottom legends).
    pub height: f64,
    /// Band width (left/right legends).
    pub width: f64,
}

/// The output of [`compute_layout`].
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutResult {
    /// The full target rectangle.
    pub container: Rect,
    /// The container inset by the base padding.
    pub inner: Rect,
    /// The plot rectangle.
    pub graph_area: GraphArea,
    /// Height of the title band (0 when absent).
    pub title_height: f64,
    /// The legend band.
    pub legend: LegendBand,
    /// Height of the x axis band (0 when absent).
    pub x_axis_height: f64,
    /// Width of the y axis band (0 when absent).
    pub y_axis_width: f64,
    /// Height of the x axis label band (0 when absent).
    pub x_label_height: f64,
    /// Width of the y axis label band (0 when absent).
    pub y_label_width: f64,
}

/// Computes chart geometry from the configuration and pixel dimensions.
///
/// Starts from the base padding (pies trim the left and bottom sides), then
/// reserves bands in order: title (top), legend (its configured side), axis
/// labels and axes (bottom / left). Polar charts reserve no axis bands.
/// Every rectangle clamps to non-negative extents rather than going
/// negative.
pub fn compute_layout(config: &ChartConfig, width: f64, height: f64) -> LayoutResult {
    if !width.is_finite() || !height.is_finite() {
        #[cfg(feature = "tracing")]
        tracing::warn!(width, height, "non-finite chart dimensions");
    }
    let container = Rect::new(0.0, 0.0, width.max(0.0), height.max(0.0));
    let (left_pad, bottom_pad) = if config.kind == ChartKind::Pie {
        (PIE_EDGE_PADDING, PIE_EDGE_PADDING)
    } else {
        (PADDING, PADDING)
    };
    let inner = shrink(container, left_pad, PADDING, PADDING, bottom_pad);

    let title_height = if config.layout.show_title
        && config
            .layout
            .title
            .as_deref()
            .is_some_and(|t| !t.is_empty())
    {
        TITLE_BAND
    } else {
        0.0
    };

    let legend = if config.legend_visible() {
        let position = config.layout.legend_position;
        let mut band = LegendBand {
            position: Some(position),
            height: 0.0,
            width: 0.0,
        };
        if position.is_horizontal() {
            band.height = legend::FONT_SIZE + legend::BAND_SPACING;
            if config.layout.legend_orientation == LegendOrientation::Vertical {
                band.height *= 2.0;
            }
        } else {
            band.width = legend::SIDE_WIDTH;
        }
        band
    } else {
        LegendBand::default()
    };

    let polar = config.kind.is_polar();
    let x_axis_height = if !polar && config.layout.x_axis.show {
        X_AXIS_BAND
    } else {
        0.0
    };
    let y_axis_width = if !polar && config.layout.y_axis.show {
        Y_AXIS_BAND
    } else {
        0.0
    };
    let x_label_height = if !polar && config.layout.x_axis.wants_label() {
        AXIS_LABEL_BAND
    } else {
        0.0
    };
    let y_label_width = if !polar && config.layout.y_axis.wants_label() {
        AXIS_LABEL_BAND
    } else {
        0.0
    };

    let mut plot = shrink(inner, 0.0, title_height, 0.0, 0.0);
    plot = match legend.position {
        Some(LegendPosition::Top) => shrink(plot, 0.0, legend.height, 0.0, 0.0),
        Some(LegendPosition::Bottom) => shrink(plot, 0.0, 0.0, 0.0, legend.height),
        Some(LegendPosition::Left) => shrink(plot, legend.width, 0.0, 0.0, 0.0),
        Some(LegendPosition::Right) => shrink(plot, 0.0, 0.0, legend.width, 0.0),
        None => plot,
    };
    plot = shrink(
        plot,
        y_axis_width + y_label_width,
        0.0,
        0.0,
        x_axis_height + x_label_height,
    );

    LayoutResult {
        container,
        inner,
        graph_area: GraphArea::new(plot.x0, plot.y0, plot.x1, plot.y1),
        title_height,
        legend,
        x_axis_height,
        y_axis_width,
        x_label_height,
        y_label_width,
    }
}

/// Insets a rectangle, clamping so width/height never go negative.
fn shrink(r: Rect, left: f64, top: f64, right: f64, bottom: f64) -> Rect {
    let x0 = r.x0 + left;
    let y0 = r.y0 + top;
    Rect::new(x0, y0, (r.x1 - right).max(x0), (r.y1 - bottom).max(y0))
}
