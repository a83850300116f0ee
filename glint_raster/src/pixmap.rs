// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The pixel buffer.

extern crate alloc;

use alloc::vec;
use alloc::vec::Vec;

use peniko::Color;
use peniko::color::Rgba8;

/// A straight-alpha RGBA8 pixel buffer.
///
/// Pixels are stored row-major, four bytes per pixel, not premultiplied.
/// A fresh pixmap is fully transparent.
#[derive(Clone, Debug)]
pub struct Pixmap {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Pixmap {
    /// Creates a transparent pixmap.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        }
    }

    /// Buffer width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Buffer height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The raw RGBA8 bytes, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Reads a pixel; out-of-bounds reads return transparent black.
    pub fn pixel(&self, x: u32, y: u32) -> Rgba8 {
        if x >= self.width || y >= self.height {
            return Rgba8 {
                r: 0,
                g: 0,
                b: 0,
                a: 0,
            };
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Rgba8 {
            r: self.data[i],
            g: self.data[i + 1],
            b: self.data[i + 2],
            a: self.data[i + 3],
        }
    }

    /// Replaces every pixel with `color`.
    pub fn fill(&mut self, color: Color) {
        let rgba = color.to_rgba8();
        for px in self.data.chunks_exact_mut(4) {
            px[0] = rgba.r;
            px[1] = rgba.g;
            px[2] = rgba.b;
            px[3] = rgba.a;
        }
    }

    /// Source-over blends `color` (scaled by `alpha`) onto one pixel.
    ///
    /// Out-of-bounds writes are ignored.
    pub fn blend_pixel(&mut self, x: i64, y: i64, color: Rgba8, alpha: f32) {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return;
        }
        let sa = f32::from(color.a) / 255.0 * alpha.clamp(0.0, 1.0);
        if sa <= 0.0 {
            return;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let da = f32::from(self.data[i + 3]) / 255.0;
        let oa = sa + da * (1.0 - sa);
        if oa <= 0.0 {
            return;
        }
        let blend = |src: u8, dst: u8| {
            let s = f32::from(src);
            let d = f32::from(dst);
            let v = (s * sa + d * da * (1.0 - sa)) / oa;
            v.clamp(0.0, 255.0) as u8
        };
        self.data[i] = blend(color.r, self.data[i]);
        self.data[i + 1] = blend(color.g, self.data[i + 1]);
        self.data[i + 2] = blend(color.b, self.data[i + 2]);
        self.data[i + 3] = (oa * 255.0 + 0.5) as u8;
    }

    /// Encodes the buffer as a binary PPM (`P6`) image, compositing onto
    /// white since PPM has no alpha channel.
    pub fn to_ppm(&self) -> Vec<u8> {
        use core::fmt::Write as _;

        let mut header = alloc::string::String::new();
        let _ = write!(header, "P6\n{} {}\n255\n", self.width, self.height);
        let mut out = Vec::with_capacity(header.len() + self.data.len() / 4 * 3);
        out.extend_from_slice(header.as_bytes());
        for px in self.data.chunks_exact(4) {
            let a = f32::from(px[3]) / 255.0;
            for ch in &px[..3] {
                let v = f32::from(*ch) * a + 255.0 * (1.0 - a);
                out.push(v.clamp(0.0, 255.0) as u8);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use peniko::color::palette::css;

    use super::*;

    #[test]
    fn new_pixmap_is_transparent() {
        let pm = Pixmap::new(4, 3);
        assert_eq!(pm.data().len(), 48);
        assert_eq!(pm.pixel(2, 1).a, 0);
    }

    #[test]
    fn blend_opaque_replaces() {
        let mut pm = Pixmap::new(2, 2);
        pm.fill(css::WHITE);
        pm.blend_pixel(
            1,
            1,
            Rgba8 {
                r: 255,
                g: 0,
                b: 0,
                a: 255,
            },
            1.0,
        );
        let px = pm.pixel(1, 1);
        assert_eq!((px.r, px.g, px.b, px.a), (255, 0, 0, 255));
    }

    #[test]
    fn blend_half_alpha_mixes() {
        let mut pm = Pixmap::new(1, 1);
        pm.fill(css::WHITE);
        pm.blend_pixel(
            0,
            0,
            Rgba8 {
                r: 0,
                g: 0,
                b: 0,
                a: 255,
            },
            0.5,
        );
        let px = pm.pixel(0, 0);
        assert!(px.r > 100 && px.r < 160, "expected mid gray, got {px:?}");
    }

    #[test]
    fn out_of_bounds_blend_is_ignored() {
        let mut pm = Pixmap::new(2, 2);
        pm.blend_pixel(
            -1,
            5,
            Rgba8 {
                r: 255,
                g: 255,
                b: 255,
                a: 255,
            },
            1.0,
        );
        assert!(pm.data().iter().all(|b| *b == 0));
    }

    #[test]
    fn ppm_composites_onto_white() {
        let pm = Pixmap::new(1, 1);
        let ppm = pm.to_ppm();
        assert!(ppm.starts_with(b"P6\n1 1\n255\n"));
        assert_eq!(&ppm[ppm.len() - 3..], &[255, 255, 255]);
    }
}
