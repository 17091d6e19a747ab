// Keyflick Geometry
// Maps layout coordinates to key slots

use crate::layout::{KeyboardLayout, SlotId};

/// Geometry parameters in layout coordinate units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryConfig {
    /// Number of unit-width keys spanning the full grid width
    pub keys_per_row: f32,
    pub key_height: f32,
    pub vertical_margin: f32,
    pub horizontal_margin: f32,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            keys_per_row: 10.0,
            key_height: 50.0,
            vertical_margin: 5.0,
            horizontal_margin: 5.0,
        }
    }
}

/// A slot's bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl SlotRect {
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

/// Resolved dimensions of the keyboard surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyboardGeometry {
    pub key_width: f32,
    pub key_height: f32,
    pub vertical_margin: f32,
    pub horizontal_margin: f32,
    pub keys_per_row: f32,
}

impl KeyboardGeometry {
    /// Size the unit key so `keys_per_row` keys fill `width` inside the
    /// horizontal margins
    pub fn for_width(width: f32, config: &GeometryConfig) -> Self {
        Self {
            key_width: (width - config.horizontal_margin * 2.0) / config.keys_per_row,
            key_height: config.key_height,
            vertical_margin: config.vertical_margin,
            horizontal_margin: config.horizontal_margin,
            keys_per_row: config.keys_per_row,
        }
    }

    /// Total surface height for a number of rows
    pub fn height(&self, rows: usize) -> f32 {
        self.key_height * rows as f32 + self.vertical_margin * 2.0
    }

    /// Left edge of a row, centered when narrower than the grid
    pub fn row_start(&self, row_width: f32) -> f32 {
        (self.keys_per_row * self.key_width - row_width) / 2.0 + self.horizontal_margin
    }

    /// Find the slot under a point.
    ///
    /// Rows are scanned top to bottom and slots left to right; the first
    /// slot whose span contains the point wins.
    pub fn hit_test(&self, layout: &KeyboardLayout, x: f32, y: f32) -> Option<SlotId> {
        let mut top = self.vertical_margin;
        for (row_index, row) in layout.rows().iter().enumerate() {
            let row_top = top;
            top += self.key_height;
            if y < row_top || y >= row_top + self.key_height {
                continue;
            }

            let mut left = self.row_start(row.width(self.key_width));
            for (col, slot) in row.slots().iter().enumerate() {
                let width = self.key_width * slot.width();
                if x >= left && x < left + width {
                    return Some(SlotId::new(row_index, col));
                }
                left += width;
            }
        }
        None
    }

    /// Bounding box of a slot
    pub fn slot_rect(&self, layout: &KeyboardLayout, id: SlotId) -> Option<SlotRect> {
        let row = layout.rows().get(id.row)?;
        let slot = row.slots().get(id.col)?;
        let x = self.row_start(row.width(self.key_width))
            + row.slots()[..id.col]
                .iter()
                .map(|s| s.width() * self.key_width)
                .sum::<f32>();
        Some(SlotRect {
            x,
            y: self.vertical_margin + self.key_height * id.row as f32,
            width: slot.width() * self.key_width,
            height: self.key_height,
        })
    }
}
