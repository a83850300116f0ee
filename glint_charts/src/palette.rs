// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Palettes and series color resolution.

use alloc::string::String;
use alloc::vec::Vec;

use glint_scene::{GradientStop, Paint, stops_color_at};
use kurbo::Rect;
use peniko::Color;
use peniko::color::{AlphaColor, Srgb, parse_color};

use crate::config::{ChartConfig, ColorScheme};
use crate::gradient::{GradientSpec, parse_gradient};

/// A named, ordered color list supplied by the host.
///
/// Entries are CSS color strings or CSS gradient descriptor strings.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Palette {
    /// The palette id charts reference.
    pub id: String,
    /// Ordered color entries.
    pub colors: Vec<String>,
}

/// The injected palette capability.
///
/// The provider owns its own fallback chain; the engine only falls back to
/// [`DEFAULT_COLORS`] when the provider yields nothing usable.
pub trait PaletteProvider {
    /// All palettes the host knows about.
    fn palettes(&self) -> &[Palette];
}

/// A provider over a fixed palette list, for hosts without palette storage.
#[derive(Clone, Debug, Default)]
pub struct StaticPalettes {
    palettes: Vec<Palette>,
}

impl StaticPalettes {
    /// Creates a provider over the given palettes.
    pub fn new(palettes: impl IntoIterator<Item = Palette>) -> Self {
        Self {
            palettes: palettes.into_iter().collect(),
        }
    }
}

impl PaletteProvider for StaticPalettes {
    fn palettes(&self) -> &[Palette] {
        &self.palettes
    }
}

/// The fixed fallback palette (a ten-color categorical set).
pub const DEFAULT_COLORS: [Color; 10] = [
    Color::from_rgb8(0x4e, 0x79, 0xa7),
    Color::from_rgb8(0xf2, 0x8e, 0x2b),
    Color::from_rgb8(0xe1, 0x57, 0x59),
    Color::from_rgb8(0x76, 0xb7, 0xb2),
    Color::from_rgb8(0x59, 0xa1, 0x4f),
    Color::from_rgb8(0xed, 0xc9, 0x48),
    Color::from_rgb8(0xb0, 0x7a, 0xa1),
    Color::from_rgb8(0xff, 0x9d, 0xa7),
    Color::from_rgb8(0x9c, 0x75, 0x5f),
    Color::from_rgb8(0xba, 0xb0, 0xac),
];

/// Parses a CSS color string (hex, named, `rgb()`/`rgba()`, …).
pub fn parse_css_color(s: &str) -> Option<Color> {
    parse_color(s.trim())
        .ok()
        .map(|c| c.to_alpha_color::<Srgb>())
}

/// The resolved paint for one series: an optional gradient plus its solid
/// stand-in.
#[derive(Clone, Debug, PartialEq)]
pub struct SeriesPaint {
    /// The gradient, when the palette entry is a gradient descriptor.
    pub gradient: Option<GradientSpec>,
    /// The solid color (the gradient's first stop when a gradient is set).
    pub color: Color,
}

impl SeriesPaint {
    /// A plain solid paint.
    pub fn solid(color: Color) -> Self {
        Self {
            gradient: None,
            color,
        }
    }

    /// The paint for the vector backend (gradients in unit-box coordinates).
    pub fn scene_paint(&self) -> Paint {
        match &self.gradient {
            Some(g) => g.scene_paint(),
            None => Paint::Solid(self.color),
        }
    }

    /// The paint for the raster backend, resolved against `bounds`.
    pub fn raster_paint(&self, bounds: Rect) -> Paint {
        match &self.gradient {
            Some(g) => g.raster_paint(bounds),
            None => Paint::Solid(self.color),
        }
    }
}

/// Resolves per-series colors with the documented priority chain:
/// palette gradient → mark-level override → color scale → palette entry →
/// default palette with index wraparound.
pub struct ColorResolver<'a> {
    provider: &'a dyn PaletteProvider,
    palette_id: Option<&'a str>,
    fill_override: Option<Color>,
    stroke_override: Option<Color>,
    scale_colors: Vec<Color>,
}

impl core::fmt::Debug for ColorResolver<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ColorResolver")
            .field("palette_id", &self.palette_id)
            .field("fill_override", &self.fill_override)
            .field("stroke_override", &self.stroke_override)
            .finish_non_exhaustive()
    }
}

impl<'a> ColorResolver<'a> {
    /// Creates a resolver for one render pass.
    pub fn new(provider: &'a dyn PaletteProvider, config: &'a ChartConfig) -> Self {
        Self {
            provider,
            palette_id: config.palette.as_deref(),
            fill_override: config.mark.fill.as_deref().and_then(parse_css_color),
            stroke_override: config.mark.stroke.as_deref().and_then(parse_css_color),
            scale_colors: Vec::new(),
        }
    }

    /// Attaches a color scale: each category's band center on `scale` is
    /// sampled through `scheme`, yielding one color per series index.
    /// Non-band scales are ignored.
    #[must_use]
    pub fn with_color_scale(mut self, scheme: ColorScheme, scale: &crate::scale::Scale) -> Self {
        if let crate::scale::Scale::Band(band) = scale {
            self.scale_colors = band
                .domain()
                .iter()
                .filter_map(|cat| {
                    let t = band.position(cat)? + band.bandwidth() / 2.0;
                    Some(scheme_color(scheme, t))
                })
                .collect();
        }
        self
    }

    fn active_palette(&self) -> Option<&'a Palette> {
        let palettes = self.provider.palettes();
        match self.palette_id {
            Some(id) => palettes.iter().find(|p| p.id == id),
            None => palettes.first(),
        }
    }

    /// Resolves the fill paint for series/category `index`.
    pub fn series(&self, index: usize) -> SeriesPaint {
        let entry = self
            .active_palette()
            .filter(|p| !p.colors.is_empty())
            .map(|p| p.colors[index % p.colors.len()].as_str());

        if let Some(entry) = entry {
            if let Some(gradient) = parse_gradient(entry) {
                let color = gradient.first_color();
                return SeriesPaint {
                    gradient: Some(gradient),
                    color,
                };
            }
        }
        if let Some(color) = self.fill_override {
            return SeriesPaint::solid(color);
        }
        if let Some(color) = self.scale_colors.get(index) {
            return SeriesPaint::solid(*color);
        }
        if let Some(color) = entry.and_then(parse_css_color) {
            return SeriesPaint::solid(color);
        }
        SeriesPaint::solid(DEFAULT_COLORS[index % DEFAULT_COLORS.len()])
    }

    /// The stroke override, if the mark block sets one.
    pub fn stroke_override(&self) -> Option<Color> {
        self.stroke_override
    }
}

const fn c(r: u8, g: u8, b: u8) -> AlphaColor<Srgb> {
    Color::from_rgb8(r, g, b)
}

/// Interpolates a sequential scheme at `t` in `0..=1`.
pub fn scheme_color(scheme: ColorScheme, t: f64) -> Color {
    let stops: &[GradientStop] = match scheme {
        ColorScheme::Blues => &[
            GradientStop {
                offset: 0.0,
                color: c(0xf7, 0xfb, 0xff),
            },
            GradientStop {
                offset: 1.0,
                color: c(0x08, 0x30, 0x6b),
            },
        ],
        ColorScheme::Greens => &[
            GradientStop {
                offset: 0.0,
                color: c(0xf7, 0xfc, 0xf5),
            },
            GradientStop {
                offset: 1.0,
                color: c(0x00, 0x44, 0x1b),
            },
        ],
        ColorScheme::Reds => &[
            GradientStop {
                offset: 0.0,
                color: c(0xff, 0xf5, 0xf0),
            },
            GradientStop {
                offset: 1.0,
                color: c(0x67, 0x00, 0x0d),
            },
        ],
        ColorScheme::Viridis => &[
            GradientStop {
                offset: 0.0,
                color: c(0x44, 0x01, 0x54),
            },
            GradientStop {
                offset: 0.5,
                color: c(0x21, 0x90, 0x8c),
            },
            GradientStop {
                offset: 1.0,
                color: c(0xfd, 0xe7, 0x25),
            },
        ],
    };
    stops_color_at(stops, t.clamp(0.0, 1.0) as f32)
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::string::ToString;

    use super::*;
    use crate::config::{ChartKind, Encoding};

    fn provider(colors: &[&str]) -> StaticPalettes {
        StaticPalettes::new([Palette {
            id: "test".to_string(),
            colors: colors.iter().map(|s| s.to_string()).collect(),
        }])
    }

    fn config() -> ChartConfig {
        let mut cfg = ChartConfig::new(ChartKind::Bar, Encoding::new());
        cfg.palette = Some("test".to_string());
        cfg
    }

    #[test]
    fn palette_gradient_wins_over_override() {
        let p = provider(&["linear-gradient(to right, red, blue)"]);
        let mut cfg = config();
        cfg.mark.fill = Some("#00ff00".to_string());
        let resolver = ColorResolver::new(&p, &cfg);
        let paint = resolver.series(0);
        assert!(paint.gradient.is_some());
        assert_eq!(paint.color.to_rgba8().r, 255);
    }

    #[test]
    fn override_wins_over_solid_palette_entry() {
        let p = provider(&["#123456"]);
        let mut cfg = config();
        cfg.mark.fill = Some("#00ff00".to_string());
        let resolver = ColorResolver::new(&p, &cfg);
        let paint = resolver.series(0);
        assert!(paint.gradient.is_none());
        assert_eq!(paint.color.to_rgba8().g, 255);
    }

    #[test]
    fn palette_indexing_wraps_around() {
        let p = provider(&["#ff0000", "#00ff00"]);
        let cfg = config();
        let resolver = ColorResolver::new(&p, &cfg);
        assert_eq!(resolver.series(0).color, resolver.series(2).color);
        assert_ne!(resolver.series(0).color, resolver.series(1).color);
    }

    #[test]
    fn unknown_palette_falls_back_to_defaults() {
        let p = StaticPalettes::default();
        let cfg = config();
        let resolver = ColorResolver::new(&p, &cfg);
        assert_eq!(resolver.series(0).color, DEFAULT_COLORS[0]);
        assert_eq!(resolver.series(10).color, DEFAULT_COLORS[0]);
    }

    #[test]
    fn unparseable_entry_falls_back_to_defaults() {
        let p = provider(&["definitely-not-a-color"]);
        let cfg = config();
        let resolver = ColorResolver::new(&p, &cfg);
        assert_eq!(resolver.series(0).color, DEFAULT_COLORS[0]);
    }

    #[test]
    fn color_scale_sits_between_override_and_palette_entries() {
        use crate::scale::{Scale, ScaleBand};

        let scale = Scale::Band(ScaleBand::new(
            std::vec!["a".to_string(), "b".to_string()],
            (0.0, 1.0),
        ));
        let expected: std::vec::Vec<Color> = ["a", "b"]
            .iter()
            .map(|cat| {
                let t = scale.position(&crate::data::Value::from(*cat)).unwrap()
                    + scale.bandwidth().unwrap() / 2.0;
                scheme_color(ColorScheme::Viridis, t)
            })
            .collect();

        let p = provider(&["#123456"]);
        let cfg = config();
        let resolver =
            ColorResolver::new(&p, &cfg).with_color_scale(ColorScheme::Viridis, &scale);
        assert_eq!(resolver.series(0).color, expected[0]);
        assert_eq!(resolver.series(1).color, expected[1]);
        // Indexes past the scale domain fall through to the palette entry.
        assert_eq!(resolver.series(2).color, parse_css_color("#123456").unwrap());

        let mut cfg = config();
        cfg.mark.fill = Some("#00ff00".to_string());
        let resolver =
            ColorResolver::new(&p, &cfg).with_color_scale(ColorScheme::Viridis, &scale);
        assert_eq!(
            resolver.series(0).color.to_rgba8().g,
            255,
            "the mark-level override still wins"
        );
    }

    #[test]
    fn scheme_colors_darken_with_t() {
        let light = scheme_color(ColorScheme::Blues, 0.0).to_rgba8();
        let dark = scheme_color(ColorScheme::Blues, 1.0).to_rgba8();
        assert!(u32::from(light.r) + u32::from(light.g) > u32::from(dark.r) + u32::from(dark.g));
    }
}
