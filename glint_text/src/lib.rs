// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text measurement hooks for chart layout.
//!
//! Chart guides (axes, legends, titles) need text extents to reserve margins
//! and to truncate labels that do not fit. Shaping and glyph layout live in
//! the rendering backends, so chart code depends only on a tiny measurement
//! interface.
//!
//! This crate is intentionally:
//! - small and dependency-free,
//! - `no_std`-friendly (it uses `alloc` only for truncated label strings), and
//! - backend-agnostic (a bitmap-font rasterizer and an SVG emitter can share
//!   one measurer so layout agrees across backends).

#![no_std]

extern crate alloc;

use alloc::string::String;

/// A minimal text measurement interface used by guide generators.
///
/// Implementations can be heuristic (fast, but approximate) or backed by a
/// real shaping engine. Both backends in this workspace use glyph advances
/// compatible with [`HeuristicTextMeasurer`], so the heuristic is also the
/// authoritative layout measurer.
pub trait TextMeasurer {
    /// Measure a single line of text.
    ///
    /// `text` is treated as a single line; callers should split on `\n` if
    /// they want multi-line layout.
    fn measure(&self, text: &str, style: TextStyle) -> TextMetrics;
}

/// Text styling inputs relevant to measurement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    /// Font size in the chart's coordinate system (typically pixels).
    pub font_size: f64,
    /// Font weight (e.g. `400` for normal, `700` for bold).
    pub weight: FontWeight,
}

impl TextStyle {
    /// Creates a default `TextStyle` with the given `font_size`.
    #[must_use]
    pub fn new(font_size: f64) -> Self {
        Self {
            font_size,
            weight: FontWeight::NORMAL,
        }
    }

    /// Sets the font weight.
    #[must_use]
    pub fn with_weight(mut self, weight: FontWeight) -> Self {
        self.weight = weight;
        self
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::new(12.0)
    }
}

/// CSS-style font weights.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FontWeight(pub u16);

impl FontWeight {
    /// Normal weight (`400`).
    pub const NORMAL: Self = Self(400);
    /// Bold weight (`700`).
    pub const BOLD: Self = Self(700);
}

/// Horizontal text anchoring relative to the text origin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextAnchor {
    /// The origin is at the left edge of the text.
    #[default]
    Start,
    /// The origin is at the horizontal center of the text.
    Middle,
    /// The origin is at the right edge of the text.
    End,
}

/// Vertical text baseline relative to the text origin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextBaseline {
    /// The origin is on the alphabetic baseline.
    #[default]
    Alphabetic,
    /// The origin is at the vertical midline.
    Middle,
    /// The origin is at the top of the glyphs.
    Hanging,
}

/// Measured metrics for a single line of text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextMetrics {
    /// The advance width (useful for horizontal layout).
    pub advance_width: f64,
    /// Distance from baseline to the top of typical glyphs.
    pub ascent: f64,
    /// Distance from baseline to the bottom of typical glyphs.
    pub descent: f64,
}

impl TextMetrics {
    /// Returns `ascent + descent`.
    #[must_use]
    pub fn line_height(&self) -> f64 {
        self.ascent + self.descent
    }
}

/// A tiny heuristic text measurer.
///
/// It assumes an average glyph width of ~0.6em and a baseline at ~0.8em,
/// which matches the embedded raster font's cell geometry.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicTextMeasurer;

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure(&self, text: &str, style: TextStyle) -> TextMetrics {
        TextMetrics {
            advance_width: 0.6 * style.font_size * text.chars().count() as f64,
            ascent: 0.8 * style.font_size,
            descent: 0.2 * style.font_size,
        }
    }
}

/// The suffix appended to truncated labels.
pub const ELLIPSIS: char = '\u{2026}';

/// The outcome of fitting a label into a maximum width.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FittedLabel {
    /// The text to display (possibly ellipsized).
    pub text: String,
    /// Whether the original text was cut.
    pub truncated: bool,
}

impl FittedLabel {
    fn intact(text: &str) -> Self {
        Self {
            text: String::from(text),
            truncated: false,
        }
    }
}

/// Fits `text` into `max_width`, truncating with an ellipsis if needed.
///
/// When the full text does not fit, this binary-searches for the longest
/// character prefix such that `prefix + '…'` still measures within
/// `max_width`. If not even the ellipsis fits, the result is an empty string
/// (still flagged as truncated).
pub fn fit_label(
    measurer: &dyn TextMeasurer,
    text: &str,
    style: TextStyle,
    max_width: f64,
) -> FittedLabel {
    if text.is_empty() {
        return FittedLabel::intact(text);
    }
    let full = measurer.measure(text, style).advance_width;
    if full <= max_width {
        return FittedLabel::intact(text);
    }

    let chars: alloc::vec::Vec<char> = text.chars().collect();
    let width_of = |prefix_len: usize| -> f64 {
        let mut s: String = chars[..prefix_len].iter().collect();
        s.push(ELLIPSIS);
        measurer.measure(&s, style).advance_width
    };

    // Invariant: `lo` fits (or is zero), `hi` does not.
    let mut lo = 0_usize;
    let mut hi = chars.len();
    while lo + 1 < hi {
        let mid = lo + (hi - lo) / 2;
        if width_of(mid) <= max_width {
            lo = mid;
        } else {
            hi = mid;
        }
    }

    let mut out: String = chars[..lo].iter().collect();
    if lo > 0 || width_of(0) <= max_width {
        out.push(ELLIPSIS);
    } else {
        out.clear();
    }
    FittedLabel {
        text: out,
        truncated: true,
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn heuristic_measures_scale_with_font_size() {
        let m = HeuristicTextMeasurer;
        let small = m.measure("abc", TextStyle::new(10.0));
        let large = m.measure("abc", TextStyle::new(20.0));
        assert!((small.advance_width - 18.0).abs() < 1e-9);
        assert!((large.advance_width - 2.0 * small.advance_width).abs() < 1e-9);
        assert!((small.line_height() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn fit_label_keeps_text_that_fits() {
        let m = HeuristicTextMeasurer;
        let fitted = fit_label(&m, "short", TextStyle::new(10.0), 100.0);
        assert_eq!(fitted.text, "short");
        assert!(!fitted.truncated);
    }

    #[test]
    fn fit_label_returns_longest_fitting_prefix() {
        let m = HeuristicTextMeasurer;
        let style = TextStyle::new(10.0);
        let text = "abcdefghijklmnop";
        let max_width = 40.0;
        let fitted = fit_label(&m, text, style, max_width);
        assert!(fitted.truncated);
        assert!(fitted.text.ends_with(ELLIPSIS));
        assert!(m.measure(&fitted.text, style).advance_width <= max_width);

        // One more character would overflow.
        let visible = fitted.text.chars().count() - 1;
        let mut longer: String = text.chars().take(visible + 1).collect();
        longer.push(ELLIPSIS);
        assert!(m.measure(&longer, style).advance_width > max_width);
    }

    #[test]
    fn fit_label_truncating_further_never_widens() {
        let m = HeuristicTextMeasurer;
        let style = TextStyle::new(12.0);
        let text = "a rather long categorical label";
        let mut prev = f64::INFINITY;
        for max in [160.0, 120.0, 80.0, 40.0, 10.0, 2.0] {
            let fitted = fit_label(&m, text, style, max);
            let w = m.measure(&fitted.text, style).advance_width;
            assert!(w <= prev + 1e-9, "width grew as max shrank: {w} > {prev}");
            assert!(w <= max || fitted.text.is_empty());
            prev = w;
        }
    }

    #[test]
    fn fit_label_degrades_to_empty_when_nothing_fits() {
        let m = HeuristicTextMeasurer;
        let fitted = fit_label(&m, "abc", TextStyle::new(10.0), 1.0);
        assert!(fitted.truncated);
        assert!(fitted.text.is_empty());
    }
}
