// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! SVG serialization of a [`Scene`].

extern crate alloc;

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Write as _;

use glint_text::{FontWeight, TextAnchor, TextBaseline};
use kurbo::{BezPath, PathEl};

use crate::node::{Node, NodeKind, PathNode, TextNode};
use crate::paint::Paint;
use crate::scene::Scene;

/// Serializes the scene to a standalone SVG document.
///
/// Content nodes are emitted in paint order (`(z_index, id)`), then overlay
/// nodes on top in insertion order. Gradient paints are interned into
/// `<defs>` and referenced via `url(#gl-grad-N)`; identical gradients share
/// one definition.
pub(crate) fn write_svg(scene: &Scene) -> String {
    let mut w = SvgWriter::default();
    for node in scene.content_ordered() {
        w.node(node, 1);
    }
    for node in scene.overlay() {
        w.node(node, 1);
    }

    let mut out = String::new();
    let _ = write!(
        out,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n",
        w = Num(scene.width()),
        h = Num(scene.height()),
    );
    if !w.defs.is_empty() {
        out.push_str("  <defs>\n");
        for def in &w.defs {
            out.push_str(def);
        }
        out.push_str("  </defs>\n");
    }
    out.push_str(&w.body);
    out.push_str("</svg>\n");
    out
}

#[derive(Default)]
struct SvgWriter {
    defs: Vec<String>,
    interned: Vec<Paint>,
    body: String,
}

impl SvgWriter {
    fn node(&mut self, node: &Node, depth: usize) {
        match &node.kind {
            NodeKind::Group(children) => {
                self.indent(depth);
                self.body.push_str("<g>");
                if let Some(title) = &node.title {
                    self.title(title);
                }
                self.body.push('\n');
                for child in children {
                    self.node(child, depth + 1);
                }
                self.indent(depth);
                self.body.push_str("</g>\n");
            }
            NodeKind::Path(path) => self.path(path, node.title.as_deref(), depth),
            NodeKind::Text(text) => self.text(text, node.title.as_deref(), depth),
        }
    }

    fn path(&mut self, path: &PathNode, title: Option<&str>, depth: usize) {
        self.indent(depth);
        let d = path_data(&path.path);
        let mut el = format!("<path d=\"{d}\"");
        match &path.fill {
            Some(paint) => self.paint_attr(&mut el, "fill", paint),
            None => el.push_str(" fill=\"none\""),
        }
        if let Some(stroke) = &path.stroke {
            self.paint_attr(&mut el, "stroke", &stroke.paint);
            let _ = write!(el, " stroke-width=\"{}\"", Num(stroke.width));
            if !stroke.dash.is_empty() {
                el.push_str(" stroke-dasharray=\"");
                for (i, seg) in stroke.dash.iter().enumerate() {
                    if i > 0 {
                        el.push(' ');
                    }
                    let _ = write!(el, "{}", Num(*seg));
                }
                el.push('"');
            }
        }
        if path.opacity < 1.0 {
            let _ = write!(el, " opacity=\"{}\"", Num(f64::from(path.opacity)));
        }
        self.body.push_str(&el);
        self.close(title, "path");
    }

    fn text(&mut self, text: &TextNode, title: Option<&str>, depth: usize) {
        self.indent(depth);
        let mut el = format!(
            "<text x=\"{}\" y=\"{}\" font-size=\"{}\"",
            Num(text.pos.x),
            Num(text.pos.y),
            Num(text.font_size),
        );
        if text.weight != FontWeight::NORMAL {
            let _ = write!(el, " font-weight=\"{}\"", text.weight.0);
        }
        self.paint_attr(&mut el, "fill", &text.fill);
        match text.anchor {
            TextAnchor::Start => {}
            TextAnchor::Middle => el.push_str(" text-anchor=\"middle\""),
            TextAnchor::End => el.push_str(" text-anchor=\"end\""),
        }
        match text.baseline {
            TextBaseline::Alphabetic => {}
            TextBaseline::Middle => el.push_str(" dominant-baseline=\"middle\""),
            TextBaseline::Hanging => el.push_str(" dominant-baseline=\"hanging\""),
        }
        if text.angle != 0.0 {
            let _ = write!(
                el,
                " transform=\"rotate({} {} {})\"",
                Num(text.angle),
                Num(text.pos.x),
                Num(text.pos.y),
            );
        }
        self.body.push_str(&el);
        self.body.push('>');
        if let Some(title) = title {
            self.title(title);
        }
        escape_xml(&mut self.body, &text.text);
        self.body.push_str("</text>\n");
    }

    /// Emits the element close: self-closing unless a `<title>` child is
    /// needed.
    fn close(&mut self, title: Option<&str>, tag: &str) {
        match title {
            Some(title) => {
                self.body.push('>');
                self.title(title);
                let _ = write!(self.body, "</{tag}>\n");
            }
            None => self.body.push_str("/>\n"),
        }
    }

    fn title(&mut self, title: &str) {
        self.body.push_str("<title>");
        escape_xml(&mut self.body, title);
        self.body.push_str("</title>");
    }

    fn paint_attr(&mut self, el: &mut String, attr: &str, paint: &Paint) {
        match paint {
            Paint::Solid(color) => {
                let rgba = color.to_rgba8();
                let _ = write!(el, " {attr}=\"#{:02x}{:02x}{:02x}\"", rgba.r, rgba.g, rgba.b);
                if rgba.a != 255 {
                    let _ = write!(
                        el,
                        " {attr}-opacity=\"{}\"",
                        Num(f64::from(rgba.a) / 255.0)
                    );
                }
            }
            Paint::Linear(_) | Paint::Radial(_) => {
                let id = self.intern_gradient(paint);
                let _ = write!(el, " {attr}=\"url(#gl-grad-{id})\"");
            }
        }
    }

    fn intern_gradient(&mut self, paint: &Paint) -> usize {
        if let Some(id) = self.interned.iter().position(|p| p == paint) {
            return id;
        }
        let id = self.interned.len();
        self.interned.push(paint.clone());

        let mut def = String::new();
        match paint {
            Paint::Linear(g) => {
                let _ = write!(
                    def,
                    "    <linearGradient id=\"gl-grad-{id}\" x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\">\n",
                    Num(g.start.x),
                    Num(g.start.y),
                    Num(g.end.x),
                    Num(g.end.y),
                );
                write_stops(&mut def, &g.stops);
                def.push_str("    </linearGradient>\n");
            }
            Paint::Radial(g) => {
                let _ = write!(
                    def,
                    "    <radialGradient id=\"gl-grad-{id}\" cx=\"{}\" cy=\"{}\" r=\"{}\">\n",
                    Num(g.center.x),
                    Num(g.center.y),
                    Num(g.radius),
                );
                write_stops(&mut def, &g.stops);
                def.push_str("    </radialGradient>\n");
            }
            Paint::Solid(_) => unreachable!("solid paints are emitted inline"),
        }
        self.defs.push(def);
        id
    }

    fn indent(&mut self, depth: usize) {
        for _ in 0..depth {
            self.body.push_str("  ");
        }
    }
}

fn write_stops(out: &mut String, stops: &[crate::paint::GradientStop]) {
    for stop in stops {
        let rgba = stop.color.to_rgba8();
        let _ = write!(
            out,
            "      <stop offset=\"{}\" stop-color=\"#{:02x}{:02x}{:02x}\"",
            Num(f64::from(stop.offset)),
            rgba.r,
            rgba.g,
            rgba.b,
        );
        if rgba.a != 255 {
            let _ = write!(out, " stop-opacity=\"{}\"", Num(f64::from(rgba.a) / 255.0));
        }
        out.push_str("/>\n");
    }
}

/// Serializes a path's `d` attribute with [`Num`]-compacted coordinates.
fn path_data(path: &BezPath) -> String {
    let mut d = String::new();
    for el in path.elements() {
        if !d.is_empty() {
            d.push(' ');
        }
        let _ = match *el {
            PathEl::MoveTo(p) => write!(d, "M{} {}", Num(p.x), Num(p.y)),
            PathEl::LineTo(p) => write!(d, "L{} {}", Num(p.x), Num(p.y)),
            PathEl::QuadTo(c, p) => {
                write!(d, "Q{} {} {} {}", Num(c.x), Num(c.y), Num(p.x), Num(p.y))
            }
            PathEl::CurveTo(c1, c2, p) => write!(
                d,
                "C{} {} {} {} {} {}",
                Num(c1.x),
                Num(c1.y),
                Num(c2.x),
                Num(c2.y),
                Num(p.x),
                Num(p.y),
            ),
            PathEl::ClosePath => {
                d.push('Z');
                Ok(())
            }
        };
    }
    d
}

fn escape_xml(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
}

/// Compact attribute-value formatting for coordinates: at most three decimal
/// places, no trailing zeros.
struct Num(f64);

impl core::fmt::Display for Num {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let v = self.0;
        if !v.is_finite() {
            return write!(f, "0");
        }
        // Round to 1/1000 using integer math so this stays core-only.
        let scaled = v * 1000.0;
        let rounded = if scaled >= 0.0 {
            (scaled + 0.5) as i64
        } else {
            (scaled - 0.5) as i64
        };
        if rounded % 1000 == 0 {
            write!(f, "{}", rounded / 1000)
        } else {
            let frac = (rounded % 1000).unsigned_abs();
            let mut digits = format!("{frac:03}");
            while digits.ends_with('0') {
                digits.pop();
            }
            if rounded < 0 && rounded / 1000 == 0 {
                write!(f, "-0.{digits}")
            } else {
                write!(f, "{}.{digits}", rounded / 1000)
            }
        }
    }
}
