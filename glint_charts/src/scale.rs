// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scales: value → pixel maps.
//!
//! Scale construction belongs to the caller; the engine consumes a
//! [`ScaleSet`] attached to the render context. The [`infer_scales`] helper
//! builds a reasonable default set from a dataset for demos and tests.

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;

use crate::config::{Channel, ChartConfig, ChartKind, FieldType};
use crate::data::{DataSet, Value};
use crate::float::FloatExt as _;
use crate::format::Granularity;
use crate::layout::GraphArea;

/// A linear map from a numeric domain onto a pixel range.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleLinear {
    d0: f64,
    d1: f64,
    r0: f64,
    r1: f64,
}

impl ScaleLinear {
    /// Creates a scale mapping `domain` onto `range`.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            d0: domain.0,
            d1: domain.1,
            r0: range.0,
            r1: range.1,
        }
    }

    /// The domain `(min, max)`.
    pub fn domain(&self) -> (f64, f64) {
        (self.d0, self.d1)
    }

    /// The pixel range.
    pub fn range(&self) -> (f64, f64) {
        (self.r0, self.r1)
    }

    /// Returns a copy with a different domain, keeping the range.
    #[must_use]
    pub fn with_domain(&self, domain: (f64, f64)) -> Self {
        Self::new(domain, (self.r0, self.r1))
    }

    /// Maps a domain value to a pixel position.
    ///
    /// A degenerate domain maps everything to the range midpoint.
    pub fn position(&self, v: f64) -> f64 {
        let span = self.d1 - self.d0;
        if span == 0.0 || !span.is_finite() {
            return (self.r0 + self.r1) / 2.0;
        }
        self.r0 + (v - self.d0) / span * (self.r1 - self.r0)
    }

    /// Round tick values covering the domain, at most roughly `count`.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        nice_ticks(self.d0, self.d1, count)
    }
}

/// A linear scale over timestamp seconds with granularity-aware labels.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleTime {
    inner: ScaleLinear,
}

impl ScaleTime {
    /// Creates a time scale over `(start, end)` seconds since the epoch.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            inner: ScaleLinear::new(domain, range),
        }
    }

    /// The underlying linear scale.
    pub fn linear(&self) -> &ScaleLinear {
        &self.inner
    }

    /// The label granularity implied by the domain span.
    pub fn granularity(&self) -> Granularity {
        let (d0, d1) = self.inner.domain();
        Granularity::for_span((d1 - d0).abs())
    }
}

/// A band scale: ordered categories → equal-width slots.
///
/// With `n` bands, inner padding `pi` and outer padding `po` (both fractions
/// of the band width), the band width solves
/// `span = n*bw + (n-1)*pi*bw + 2*po*bw`.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleBand {
    domain: Vec<String>,
    r0: f64,
    r1: f64,
    padding_inner: f64,
    padding_outer: f64,
}

impl ScaleBand {
    /// Creates a band scale with the default paddings (0.1 / 0.1).
    pub fn new(domain: Vec<String>, range: (f64, f64)) -> Self {
        Self {
            domain,
            r0: range.0,
            r1: range.1,
            padding_inner: 0.1,
            padding_outer: 0.1,
        }
    }

    /// Sets inner and outer padding as fractions of the band width.
    #[must_use]
    pub fn with_padding(mut self, inner: f64, outer: f64) -> Self {
        self.padding_inner = inner.max(0.0);
        self.padding_outer = outer.max(0.0);
        self
    }

    /// The category list.
    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    /// The width of one band in pixels.
    pub fn bandwidth(&self) -> f64 {
        let n = self.domain.len();
        if n == 0 {
            return 0.0;
        }
        let n_f = n as f64;
        let span = (self.r1 - self.r0).abs();
        span / (n_f + self.padding_inner * (n_f - 1.0) + 2.0 * self.padding_outer)
    }

    /// The distance between consecutive band starts.
    pub fn step(&self) -> f64 {
        self.bandwidth() * (1.0 + self.padding_inner)
    }

    /// The index of a category in the domain.
    pub fn index(&self, key: &str) -> Option<usize> {
        self.domain.iter().position(|d| d == key)
    }

    /// The band start position for a category.
    pub fn position(&self, key: &str) -> Option<f64> {
        let i = self.index(key)?;
        let bw = self.bandwidth();
        let dir = if self.r1 >= self.r0 { 1.0 } else { -1.0 };
        Some(self.r0 + dir * bw * (self.padding_outer + i as f64 * (1.0 + self.padding_inner)))
    }
}

/// A scale of any kind.
#[derive(Clone, Debug, PartialEq)]
pub enum Scale {
    /// Continuous numeric.
    Linear(ScaleLinear),
    /// Continuous temporal.
    Time(ScaleTime),
    /// Categorical bands.
    Band(ScaleBand),
}

impl Scale {
    /// Maps a value to a pixel position.
    ///
    /// For band scales this is the band start. Invalid values (non-numeric
    /// on a continuous scale, unknown category on a band scale) yield
    /// `None`; the result is never NaN.
    pub fn position(&self, value: &Value) -> Option<f64> {
        let pos = match self {
            Self::Linear(s) => s.position(value.as_f64()?),
            Self::Time(s) => s.linear().position(value.as_f64()?),
            Self::Band(s) => s.position(&value.category())?,
        };
        pos.is_finite().then_some(pos)
    }

    /// Like [`Scale::position`], but offset to the band center for band
    /// scales — the position point-like marks use.
    pub fn center(&self, value: &Value) -> Option<f64> {
        let pos = self.position(value)?;
        Some(match self {
            Self::Band(s) => pos + s.bandwidth() / 2.0,
            Self::Linear(_) | Self::Time(_) => pos,
        })
    }

    /// The band width for categorical scales.
    pub fn bandwidth(&self) -> Option<f64> {
        match self {
            Self::Band(s) => Some(s.bandwidth()),
            Self::Linear(_) | Self::Time(_) => None,
        }
    }

    /// The continuous domain, if the scale has one.
    pub fn numeric_domain(&self) -> Option<(f64, f64)> {
        match self {
            Self::Linear(s) => Some(s.domain()),
            Self::Time(s) => Some(s.linear().domain()),
            Self::Band(_) => None,
        }
    }
}

/// The scales attached to a render context, keyed by channel.
#[derive(Clone, Debug, Default)]
pub struct ScaleSet {
    scales: HashMap<Channel, Scale>,
}

impl ScaleSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a scale for `channel`, replacing any existing one.
    pub fn insert(&mut self, channel: Channel, scale: Scale) {
        self.scales.insert(channel, scale);
    }

    /// Looks up the scale for `channel`.
    pub fn get(&self, channel: Channel) -> Option<&Scale> {
        self.scales.get(&channel)
    }
}

/// Computes round tick values covering `[d0, d1]`.
pub fn nice_ticks(d0: f64, d1: f64, count: usize) -> Vec<f64> {
    if !d0.is_finite() || !d1.is_finite() || count < 2 {
        return Vec::new();
    }
    if d1 <= d0 {
        return alloc::vec![d0];
    }
    let step = nice_step((d1 - d0) / (count - 1) as f64);
    let mut out = Vec::new();
    let mut t = (d0 / step).ceil() * step;
    while t <= d1 + step * 1e-9 {
        out.push(if t.abs() < step * 1e-9 { 0.0 } else { t });
        t += step;
    }
    out
}

/// Rounds a raw step to a 1/2/5 × 10^k value.
fn nice_step(raw: f64) -> f64 {
    let magnitude = 10.0_f64.powi(raw.log10().floor() as i32);
    let norm = raw / magnitude;
    magnitude
        * if norm < 1.5 {
            1.0
        } else if norm < 3.0 {
            2.0
        } else if norm < 7.0 {
            5.0
        } else {
            10.0
        }
}

/// Builds a default scale set for a chart from its data.
///
/// The x channel becomes a band scale for categorical fields and a linear or
/// time scale for continuous ones; the y channel spans all y fields (stack
/// totals when stacking applies) and is extended to include zero so bar
/// baselines are meaningful. The y range is inverted (bottom to top). A size
/// channel gets a linear scale onto a point-radius range, and a categorical
/// color channel a band scale over `0..=1` for scheme sampling. Histograms
/// get a linear x over their bin edges and a y over the bin counts.
pub fn infer_scales(config: &ChartConfig, data: &DataSet, area: &GraphArea) -> ScaleSet {
    let mut set = ScaleSet::new();
    let x_range = (area.left, area.right);
    let y_range = (area.bottom, area.top);

    if config.kind == ChartKind::Histogram {
        if let Some(enc) = config.encoding.x.first() {
            let (lo, hi) = data.numeric_extent(&enc.field).unwrap_or((0.0, 1.0));
            let bins = enc.bin.map_or(config.mark.bins, |b| b.maxbins);
            let edges = crate::mark::histogram::bin_edges(lo, hi, bins);
            let counts = crate::mark::histogram::bin_counts(data, &enc.field, &edges);
            let max_count = counts.iter().copied().max().unwrap_or(0).max(1) as f64;
            set.insert(
                Channel::X,
                Scale::Linear(ScaleLinear::new((edges[0], edges[edges.len() - 1]), x_range)),
            );
            set.insert(
                Channel::Y,
                Scale::Linear(ScaleLinear::new((0.0, max_count), y_range)),
            );
        }
        return set;
    }

    if config.kind == ChartKind::Heatmap {
        if let Some(enc) = config.encoding.x.first() {
            set.insert(
                Channel::X,
                Scale::Band(ScaleBand::new(data.categories(&enc.field), x_range)),
            );
        }
        if let Some(enc) = config.encoding.y.first() {
            // Rows run top-down.
            set.insert(
                Channel::Y,
                Scale::Band(ScaleBand::new(
                    data.categories(&enc.field),
                    (area.top, area.bottom),
                )),
            );
        }
        return set;
    }

    if let Some(enc) = config.encoding.x.first() {
        let scale = if enc.field_type.is_continuous() && config.kind != ChartKind::Bar {
            // Spans every bound x field, so scatter cross products share one
            // scale.
            let mut extent: Option<(f64, f64)> = None;
            for enc in &config.encoding.x {
                if let Some((lo, hi)) = data.numeric_extent(&enc.field) {
                    let e = extent.get_or_insert((lo, hi));
                    e.0 = e.0.min(lo);
                    e.1 = e.1.max(hi);
                }
            }
            let (lo, hi) = extent.unwrap_or((0.0, 1.0));
            if enc.field_type == FieldType::Temporal {
                Scale::Time(ScaleTime::new((lo, hi), x_range))
            } else {
                Scale::Linear(ScaleLinear::new((lo, hi), x_range))
            }
        } else {
            Scale::Band(ScaleBand::new(data.categories(&enc.field), x_range))
        };
        set.insert(Channel::X, scale);
    }

    if !config.encoding.y.is_empty() {
        let mut lo = 0.0_f64;
        let mut hi = 0.0_f64;
        let stacked =
            matches!(config.kind, ChartKind::Bar | ChartKind::Area) && config.stacking_enabled();
        if stacked {
            let (stack_lo, stack_hi) = stacked_extent(config, data);
            lo = lo.min(stack_lo);
            hi = hi.max(stack_hi);
        } else {
            for enc in &config.encoding.y {
                if let Some((field_lo, field_hi)) = data.numeric_extent(&enc.field) {
                    lo = lo.min(field_lo);
                    hi = hi.max(field_hi);
                }
            }
        }
        if lo == hi {
            hi = lo + 1.0;
        }
        set.insert(Channel::Y, Scale::Linear(ScaleLinear::new((lo, hi), y_range)));
    }

    if let Some(enc) = &config.encoding.size {
        let (lo, hi) = data.numeric_extent(&enc.field).unwrap_or((0.0, 1.0));
        set.insert(
            Channel::Size,
            Scale::Linear(ScaleLinear::new((lo, hi), (2.0, 10.0))),
        );
    }

    // A categorical color field gets a band scale over the unit interval;
    // the engine samples the scheme at each band center.
    if let Some(enc) = &config.encoding.color {
        if !enc.field_type.is_continuous() {
            set.insert(
                Channel::Color,
                Scale::Band(ScaleBand::new(data.categories(&enc.field), (0.0, 1.0))),
            );
        }
    }

    set
}

/// Per-sign stack totals across categories: the most negative downward sum
/// and the largest upward sum.
fn stacked_extent(config: &ChartConfig, data: &DataSet) -> (f64, f64) {
    let series = crate::mark::series_list(config, data);
    let x_field = config.encoding.x.first().map(|f| f.field.as_str());
    let mut sums: HashMap<String, (f64, f64)> = HashMap::new();
    for row in data.rows() {
        let key = x_field
            .and_then(|f| row.get(f))
            .map(Value::category)
            .unwrap_or_default();
        let entry = sums.entry(key).or_insert((0.0, 0.0));
        for s in &series {
            if let Some(v) = crate::mark::series_value(config, s, row) {
                if v < 0.0 {
                    entry.0 += v;
                } else {
                    entry.1 += v;
                }
            }
        }
    }
    let mut lo = 0.0_f64;
    let mut hi = 0.0_f64;
    for (neg, pos) in sums.values() {
        lo = lo.min(*neg);
        hi = hi.max(*pos);
    }
    (lo, hi)
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::string::ToString;

    use super::*;

    fn band(domain: &[&str], range: (f64, f64)) -> ScaleBand {
        ScaleBand::new(domain.iter().map(|s| s.to_string()).collect(), range)
    }

    #[test]
    fn linear_maps_and_degenerates_gracefully() {
        let s = ScaleLinear::new((0.0, 10.0), (0.0, 100.0));
        assert!((s.position(5.0) - 50.0).abs() < 1e-9);
        let degenerate = ScaleLinear::new((3.0, 3.0), (0.0, 100.0));
        assert!((degenerate.position(3.0) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn band_widths_fill_the_range() {
        let s = band(&["a", "b", "c"], (0.0, 330.0));
        let bw = s.bandwidth();
        let n = 3.0;
        let expected_span = n * bw + 2.0 * 0.1 * bw + 0.1 * bw * (n - 1.0);
        assert!((expected_span - 330.0).abs() < 1e-9);
        let last = s.position("c").unwrap();
        assert!(last + bw <= 330.0 + 1e-9, "last band ends inside the range");
    }

    #[test]
    fn band_position_handles_inverted_ranges() {
        let s = band(&["a", "b"], (100.0, 0.0));
        let a = s.position("a").unwrap();
        let b = s.position("b").unwrap();
        assert!(a > b, "first band starts nearer range start");
        assert!(s.position("zz").is_none());
    }

    #[test]
    fn scale_position_never_yields_nan() {
        let s = Scale::Linear(ScaleLinear::new((0.0, 10.0), (0.0, 100.0)));
        assert_eq!(s.position(&Value::Number(f64::NAN)), None);
        assert_eq!(s.position(&Value::from("oops")), None);
        assert!(s.position(&Value::Number(2.0)).is_some());
    }

    #[test]
    fn center_offsets_bands_only() {
        let b = Scale::Band(band(&["a", "b"], (0.0, 100.0)));
        let start = b.position(&Value::from("a")).unwrap();
        let center = b.center(&Value::from("a")).unwrap();
        assert!((center - start - b.bandwidth().unwrap() / 2.0).abs() < 1e-9);

        let l = Scale::Linear(ScaleLinear::new((0.0, 1.0), (0.0, 100.0)));
        assert_eq!(
            l.position(&Value::Number(0.5)),
            l.center(&Value::Number(0.5))
        );
    }

    #[test]
    fn categorical_color_fields_get_a_unit_band_scale() {
        use crate::config::{Encoding, FieldEncoding};
        use crate::data::{DataSet, Row};
        use crate::layout::GraphArea;

        let config = ChartConfig::new(
            ChartKind::Bar,
            Encoding::new()
                .with_x(FieldEncoding::nominal("month"))
                .with_y(FieldEncoding::quantitative("v"))
                .with_color(FieldEncoding::nominal("region")),
        );
        let data = DataSet::from_rows([
            Row::new().with("month", "jan").with("region", "west").with("v", 1.0),
            Row::new().with("month", "jan").with("region", "east").with("v", 2.0),
        ]);
        let area = GraphArea::new(40.0, 20.0, 360.0, 260.0);
        let scales = infer_scales(&config, &data, &area);
        let color = scales.get(Channel::Color).expect("color scale inferred");
        let west = color.center(&Value::from("west")).unwrap();
        let east = color.center(&Value::from("east")).unwrap();
        assert!((0.0..=1.0).contains(&west) && (0.0..=1.0).contains(&east));
        assert!(west < east, "centers follow first-seen category order");

        let continuous = ChartConfig::new(
            ChartKind::Scatter,
            Encoding::new()
                .with_x(FieldEncoding::quantitative("x"))
                .with_y(FieldEncoding::quantitative("y"))
                .with_color(FieldEncoding::quantitative("heat")),
        );
        let scales = infer_scales(&continuous, &data, &area);
        assert!(scales.get(Channel::Color).is_none());
    }

    #[test]
    fn nice_ticks_are_round_and_cover_the_domain() {
        let ticks = nice_ticks(0.0, 10.0, 5);
        assert_eq!(ticks, std::vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);

        let ticks = nice_ticks(-3.0, 7.0, 5);
        assert!(ticks.contains(&0.0), "{ticks:?}");
        assert!(ticks.first().unwrap() >= &-3.0);
        assert!(ticks.last().unwrap() <= &7.0);
    }
}
