use serde::{Deserialize, Serialize};

/// Which candidate the canvas sizer picked.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LayoutShape {
    /// `s` columns by `ceil(n / s)` rows.
    Square,
    /// `ceil(n / s)` columns by `s` rows.
    Rectangle,
}

/// Canvas geometry for one run, computed once from the image count and cell size.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct LayoutPlan {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub cell_width: u32,
    pub cell_height: u32,
    pub shape: LayoutShape,
}

impl LayoutPlan {
    /// Cells per row (`canvas_width / cell_width`).
    pub fn columns(&self) -> u32 {
        self.canvas_width / self.cell_width
    }
    /// Cells per column (`canvas_height / cell_height`).
    pub fn rows(&self) -> u32 {
        self.canvas_height / self.cell_height
    }
    /// Total number of cells the canvas can hold.
    pub fn capacity(&self) -> u64 {
        self.columns() as u64 * self.rows() as u64
    }
    pub fn area(&self) -> u64 {
        self.canvas_width as u64 * self.canvas_height as u64
    }
}

/// One stylesheet rule: where a packed image lives on the canvas.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlacementRecord {
    /// Source file name (no directories).
    pub file_name: String,
    /// Full selector body, e.g. `right-sprite spr-my-photo-png`.
    pub css_identifier: String,
    pub offset_left: u32,
    pub offset_top: u32,
}

/// Counters for one packing run.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct PackStats {
    /// Images handed to the packer.
    pub discovered: usize,
    /// Images composited onto the canvas.
    pub packed: usize,
    /// Images skipped because they could not be decoded.
    pub skipped: usize,
    pub cache_hits: usize,
    pub cache_misses: usize,
    pub canvas_area: u64,
    pub used_area: u64,
}

impl PackStats {
    /// Used area over canvas area (0.0 to 1.0).
    pub fn occupancy(&self) -> f64 {
        if self.canvas_area > 0 {
            self.used_area as f64 / self.canvas_area as f64
        } else {
            0.0
        }
    }

    /// Returns wasted space in pixels.
    pub fn wasted_area(&self) -> u64 {
        self.canvas_area.saturating_sub(self.used_area)
    }

    /// Returns a human-readable summary of the statistics.
    pub fn summary(&self) -> String {
        format!(
            "Images: {}, Packed: {}, Skipped: {}, Cache: {} hit / {} miss, Occupancy: {:.2}%, Wasted: {} px²",
            self.discovered,
            self.packed,
            self.skipped,
            self.cache_hits,
            self.cache_misses,
            self.occupancy() * 100.0,
            self.wasted_area(),
        )
    }
}
