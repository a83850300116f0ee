// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The declarative chart configuration.

use alloc::string::String;
use alloc::vec::Vec;

/// The chart type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChartKind {
    /// Vertical bars, stacked or grouped.
    Bar,
    /// Poly-lines, optionally smoothed.
    Line,
    /// Filled regions, optionally stacked.
    Area,
    /// Pie / donut slices.
    Pie,
    /// Points, optionally size-encoded.
    Scatter,
    /// Overlaid polygons on a polar category grid.
    Radar,
    /// A colored cell matrix.
    Heatmap,
    /// Binned frequencies of a numeric field.
    Histogram,
}

impl ChartKind {
    /// Whether the chart uses polar geometry (no cartesian axes).
    pub fn is_polar(self) -> bool {
        matches!(self, Self::Pie | Self::Radar)
    }
}

/// The semantic type of an encoded field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FieldType {
    /// Continuous numbers.
    Quantitative,
    /// Points in time.
    Temporal,
    /// Unordered categories.
    Nominal,
    /// Ordered categories.
    Ordinal,
}

impl FieldType {
    /// Whether values of this type map through a continuous scale.
    pub fn is_continuous(self) -> bool {
        matches!(self, Self::Quantitative | Self::Temporal)
    }
}

/// A binning request on a quantitative field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BinSpec {
    /// Upper bound on the number of bins.
    pub maxbins: u32,
}

impl Default for BinSpec {
    fn default() -> Self {
        Self { maxbins: 10 }
    }
}

/// The binding of one data field to a visual channel.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldEncoding {
    /// The data field name.
    pub field: String,
    /// The field's semantic type.
    pub field_type: FieldType,
    /// Optional binning.
    pub bin: Option<BinSpec>,
    /// Optional axis title override; defaults to the field name.
    pub title: Option<String>,
}

impl FieldEncoding {
    /// Creates an encoding for `field` with the given type.
    pub fn new(field: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            field: field.into(),
            field_type,
            bin: None,
            title: None,
        }
    }

    /// Shorthand for a quantitative encoding.
    pub fn quantitative(field: impl Into<String>) -> Self {
        Self::new(field, FieldType::Quantitative)
    }

    /// Shorthand for a nominal encoding.
    pub fn nominal(field: impl Into<String>) -> Self {
        Self::new(field, FieldType::Nominal)
    }

    /// Enables binning with the default bin bound.
    #[must_use]
    pub fn binned(mut self) -> Self {
        self.bin = Some(BinSpec::default());
        self
    }

    /// Sets the axis title override.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// The axis title: the override if set, else the field name.
    pub fn axis_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.field)
    }
}

/// A visual channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Channel {
    /// Horizontal position.
    X,
    /// Vertical position.
    Y,
    /// Series / category color.
    Color,
    /// Point size.
    Size,
}

/// Channel → field bindings. Each channel may carry several fields
/// (multi-series y, scatter's x/y cross product).
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Encoding {
    /// X channel fields.
    pub x: Vec<FieldEncoding>,
    /// Y channel fields.
    pub y: Vec<FieldEncoding>,
    /// Color channel field.
    pub color: Option<FieldEncoding>,
    /// Size channel field.
    pub size: Option<FieldEncoding>,
}

impl Encoding {
    /// Creates an empty encoding.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an x field.
    #[must_use]
    pub fn with_x(mut self, enc: FieldEncoding) -> Self {
        self.x.push(enc);
        self
    }

    /// Adds a y field.
    #[must_use]
    pub fn with_y(mut self, enc: FieldEncoding) -> Self {
        self.y.push(enc);
        self
    }

    /// Sets the color field.
    #[must_use]
    pub fn with_color(mut self, enc: FieldEncoding) -> Self {
        self.color = Some(enc);
        self
    }

    /// Sets the size field.
    #[must_use]
    pub fn with_size(mut self, enc: FieldEncoding) -> Self {
        self.size = Some(enc);
        self
    }

    /// The first field bound to `channel`, if any.
    pub fn first(&self, channel: Channel) -> Option<&FieldEncoding> {
        match channel {
            Channel::X => self.x.first(),
            Channel::Y => self.y.first(),
            Channel::Color => self.color.as_ref(),
            Channel::Size => self.size.as_ref(),
        }
    }
}

/// Curve interpolation for line and area marks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Interpolation {
    /// Straight segments.
    #[default]
    Linear,
    /// A smooth Catmull-Rom style curve through the points.
    Monotone,
}

/// Sequential color schemes for heatmap cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ColorScheme {
    /// Light to dark blue.
    #[default]
    Blues,
    /// Light to dark green.
    Greens,
    /// Light to dark red.
    Reds,
    /// Dark purple through teal to yellow.
    Viridis,
}

/// Mark-level style overrides.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarkStyle {
    /// Fill color override (a CSS color string).
    pub fill: Option<String>,
    /// Stroke color override (a CSS color string).
    pub stroke: Option<String>,
    /// Mark opacity in `0..=1`.
    pub opacity: f32,
    /// Whether line charts draw visible point markers.
    pub points: bool,
    /// Visible point marker radius.
    pub point_size: f64,
    /// Whether value labels are drawn next to marks.
    pub data_labels: bool,
    /// Curve interpolation.
    pub interpolation: Interpolation,
    /// Bar corner radius in pixels.
    pub corner_radius: f64,
    /// Stacking override: `None` means the chart-type default.
    pub stacked: Option<bool>,
    /// Pie inner radius as a fraction of the outer radius (`0` = solid pie).
    pub inner_radius: f64,
    /// Heatmap color scheme.
    pub scheme: ColorScheme,
    /// Histogram bin count.
    pub bins: u32,
}

impl Default for MarkStyle {
    fn default() -> Self {
        Self {
            fill: None,
            stroke: None,
            opacity: 1.0,
            points: false,
            point_size: 3.5,
            data_labels: false,
            interpolation: Interpolation::Linear,
            corner_radius: 0.0,
            stacked: None,
            inner_radius: 0.0,
            scheme: ColorScheme::default(),
            bins: 10,
        }
    }
}

/// Legend placement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LegendPosition {
    /// Above the plot.
    #[default]
    Top,
    /// Below the plot.
    Bottom,
    /// Left of the plot.
    Left,
    /// Right of the plot.
    Right,
}

impl LegendPosition {
    /// Whether the legend occupies a horizontal band.
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }
}

/// Row/block alignment within the legend band.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LegendAlignment {
    /// Flush with the leading edge.
    #[default]
    Start,
    /// Centered.
    Center,
    /// Flush with the trailing edge.
    End,
}

/// How items flow inside a horizontal legend band.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LegendOrientation {
    /// Items run left to right, wrapping into rows.
    #[default]
    Horizontal,
    /// Items are expected to wrap; the band reserves a double height.
    Vertical,
}

/// Per-axis options.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AxisOptions {
    /// Whether the axis (line, ticks, tick labels) is drawn.
    pub show: bool,
    /// The axis label (title) text.
    pub label: Option<String>,
    /// Whether the axis label band is reserved and drawn.
    pub show_label: bool,
    /// Whether tick marks and tick labels are drawn.
    pub show_ticks: bool,
    /// Whether gridlines for this axis are drawn.
    pub grid: bool,
}

impl Default for AxisOptions {
    fn default() -> Self {
        Self {
            show: true,
            label: None,
            show_label: true,
            show_ticks: true,
            grid: false,
        }
    }
}

impl AxisOptions {
    /// Whether a label band must be reserved.
    pub fn wants_label(&self) -> bool {
        self.show_label && self.label.as_deref().is_some_and(|l| !l.is_empty())
    }
}

/// Chart-level layout options.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutOptions {
    /// The chart title.
    pub title: Option<String>,
    /// Whether the title band is reserved and drawn.
    pub show_title: bool,
    /// Legend visibility: `None` = automatic (color encoding, multiple y
    /// fields, or pie), `Some(true)` = always, `Some(false)` = never.
    pub show_legend: Option<bool>,
    /// Legend placement.
    pub legend_position: LegendPosition,
    /// Legend row/block alignment.
    pub legend_alignment: LegendAlignment,
    /// Legend item flow.
    pub legend_orientation: LegendOrientation,
    /// X axis options.
    pub x_axis: AxisOptions,
    /// Y axis options.
    pub y_axis: AxisOptions,
}

/// A full chart configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChartConfig {
    /// The chart type.
    pub kind: ChartKind,
    /// Channel bindings.
    pub encoding: Encoding,
    /// Mark style overrides.
    pub mark: MarkStyle,
    /// Layout options.
    pub layout: LayoutOptions,
    /// The palette to resolve series colors from, by id.
    pub palette: Option<String>,
}

impl ChartConfig {
    /// Creates a configuration with default mark and layout blocks.
    pub fn new(kind: ChartKind, encoding: Encoding) -> Self {
        Self {
            kind,
            encoding,
            mark: MarkStyle::default(),
            layout: LayoutOptions {
                show_title: true,
                ..LayoutOptions::default()
            },
            palette: None,
        }
    }

    /// Whether the legend should be shown, applying the automatic gate.
    pub fn legend_visible(&self) -> bool {
        match self.layout.show_legend {
            Some(explicit) => explicit,
            None => {
                self.encoding.color.is_some()
                    || self.encoding.y.len() > 1
                    || self.kind == ChartKind::Pie
            }
        }
    }

    /// Whether bar/area marks stack: the default whenever there are multiple
    /// y fields or a color encoding, unless explicitly disabled.
    pub fn stacking_enabled(&self) -> bool {
        let default = self.encoding.y.len() > 1 || self.encoding.color.is_some();
        self.mark.stacked.unwrap_or(default)
    }
}
