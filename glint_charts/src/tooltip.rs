// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tooltip content and placement.
//!
//! Tooltips are scoped to one render pass: the engine draws the hovered
//! mark's tooltip into the scene's overlay layer (or last onto the pixmap),
//! and the overlay is cleared at the start of the next pass, so tooltip
//! nodes can never accumulate.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect};

use crate::data::{ColumnTable, Row};
use crate::format::format_value;

/// Tooltip fade-in duration hosts should animate with, in milliseconds.
pub const FADE_IN_MS: u32 = 200;

/// Tooltip fade-out duration, in milliseconds.
pub const FADE_OUT_MS: u32 = 500;

/// Pointer-to-tooltip offset in pixels.
pub(crate) const POINTER_OFFSET: (f64, f64) = (12.0, 12.0);

/// Tooltip body font size.
pub(crate) const FONT_SIZE: f64 = 11.0;

/// Padding inside the tooltip box.
pub(crate) const BOX_PADDING: f64 = 6.0;

/// One `label: value` line in a tooltip.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TooltipField {
    /// The field label.
    pub label: String,
    /// The formatted value.
    pub value: String,
}

impl TooltipField {
    /// Creates a field line.
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }

    /// The rendered line text.
    pub fn line(&self) -> String {
        let mut out = self.label.clone();
        out.push_str(": ");
        out.push_str(&self.value);
        out
    }
}

/// Builds tooltip fields from a row, using column metadata for formatting
/// when available.
pub fn fields_for_row(row: &Row, columns: Option<&ColumnTable>) -> Vec<TooltipField> {
    row.fields()
        .map(|(name, value)| {
            let meta = columns.and_then(|t| t.get(name));
            TooltipField::new(name, format_value(value, meta))
        })
        .collect()
}

/// Computes the tooltip box rectangle for the given content.
///
/// The box sits at the pointer plus [`POINTER_OFFSET`] and is nudged back
/// inside `container` when it would overflow right or bottom.
pub(crate) fn place_box(
    pointer: Point,
    line_count: usize,
    max_line_width: f64,
    container: Rect,
) -> Rect {
    let width = max_line_width + 2.0 * BOX_PADDING;
    let height = line_count as f64 * (FONT_SIZE + 3.0) + 2.0 * BOX_PADDING;
    let mut x = pointer.x + POINTER_OFFSET.0;
    let mut y = pointer.y + POINTER_OFFSET.1;
    if x + width > container.x1 {
        x = (pointer.x - POINTER_OFFSET.0 - width).max(container.x0);
    }
    if y + height > container.y1 {
        y = (pointer.y - POINTER_OFFSET.1 - height).max(container.y0);
    }
    Rect::new(x, y, x + width, y + height)
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::config::FieldType;
    use crate::data::ColumnMeta;

    #[test]
    fn row_fields_become_label_value_lines() {
        let row = Row::new().with("region", "west").with("sales", 1234.0);
        let fields = fields_for_row(&row, None);
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].line(), "region: west");
        assert_eq!(fields[1].line(), "sales: 1234");
    }

    #[test]
    fn column_metadata_formats_values() {
        let row = Row::new().with("elapsed", 1.5);
        let table = ColumnTable::new([ColumnMeta {
            field: String::from("elapsed"),
            field_type: FieldType::Quantitative,
            unit: Some(String::from("s")),
        }]);
        let fields = fields_for_row(&row, Some(&table));
        assert_eq!(fields[0].value, "1.5 s");
    }

    #[test]
    fn box_tracks_pointer_and_stays_inside() {
        let container = Rect::new(0.0, 0.0, 300.0, 200.0);
        let near = place_box(Point::new(10.0, 10.0), 2, 60.0, container);
        assert!((near.x0 - 22.0).abs() < 1e-9);
        assert!((near.y0 - 22.0).abs() < 1e-9);

        let far = place_box(Point::new(295.0, 195.0), 2, 60.0, container);
        assert!(far.x1 <= 300.0 + 1e-9, "flipped left of the pointer");
        assert!(far.y1 <= 295.0, "flipped above the pointer");
    }
}
