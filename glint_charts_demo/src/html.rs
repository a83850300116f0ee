// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A minimal HTML report wrapper around the demo SVGs.

/// One report section: a heading, a short description, and inline SVG.
#[derive(Debug)]
pub struct HtmlSection {
    /// Section heading.
    pub title: &'static str,
    /// One-line description under the heading.
    pub description: &'static str,
    /// Inline SVG markup.
    pub svg: String,
}

/// Renders the full report page.
pub fn render_report(title: &str, sections: &[HtmlSection]) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>");
    push_escaped(&mut out, title);
    out.push_str(
        "</title>\n<style>\n\
         body { font-family: sans-serif; margin: 24px; color: #111827; }\n\
         section { margin-bottom: 32px; }\n\
         h2 { margin-bottom: 4px; }\n\
         p { margin-top: 0; color: #4b5563; }\n\
         svg { border: 1px solid #e5e7eb; }\n\
         </style>\n</head>\n<body>\n<h1>",
    );
    push_escaped(&mut out, title);
    out.push_str("</h1>\n");
    for section in sections {
        out.push_str("<section>\n<h2>");
        push_escaped(&mut out, section.title);
        out.push_str("</h2>\n<p>");
        push_escaped(&mut out, section.description);
        out.push_str("</p>\n");
        out.push_str(&section.svg);
        out.push_str("\n</section>\n");
    }
    out.push_str("</body>\n</html>\n");
    out
}

fn push_escaped(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}
