use crate::compositing::blit_cell;
use crate::error::{Result, SpriteError};
use crate::export::base_rule;
use crate::model::{LayoutPlan, PackStats, PlacementRecord};
use crate::normalize::{CellNormalizer, CellSource};
use image::{Rgb, RgbImage};
use std::path::Path;
use tracing::{info, instrument, warn};

/// Packed canvas plus everything the stylesheet needs.
pub struct SpriteSheet {
    pub plan: LayoutPlan,
    pub canvas: RgbImage,
    /// One record per packed image, in scan order.
    pub placements: Vec<PlacementRecord>,
    /// `.{class} { background: url(...) }` rule that precedes the per-image rules.
    pub base_rule: String,
    pub stats: PackStats,
}

/// Left-to-right, top-to-bottom cell cursor over a canvas.
#[derive(Debug, Clone, Copy)]
pub struct RasterCursor {
    left: u32,
    top: u32,
    cell_width: u32,
    cell_height: u32,
    canvas_width: u32,
}

impl RasterCursor {
    pub fn new(plan: &LayoutPlan) -> Self {
        Self {
            left: 0,
            top: 0,
            cell_width: plan.cell_width,
            cell_height: plan.cell_height,
            canvas_width: plan.canvas_width,
        }
    }

    /// Current `(left, top)` offset.
    pub fn position(&self) -> (u32, u32) {
        (self.left, self.top)
    }

    pub fn advance(&mut self) {
        self.left += self.cell_width;
        if self.left >= self.canvas_width {
            self.left = 0;
            self.top += self.cell_height;
        }
    }
}

/// CSS-safe form of a file name: ASCII lower-case, every run of characters outside
/// `[a-z0-9]` collapsed into one `-`.
pub fn slugify(file_name: &str) -> String {
    let mut out = String::with_capacity(file_name.len());
    let mut in_gap = false;
    for c in file_name.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
            in_gap = false;
        } else if !in_gap {
            out.push('-');
            in_gap = true;
        }
    }
    out
}

/// Selector body for a packed file, e.g. `right-sprite spr-my-photo-png`.
pub fn css_identifier(css_class: &str, file_name: &str) -> String {
    format!("{} spr-{}", css_class, slugify(file_name))
}

/// Placement records for `file_names` without decoding or compositing anything.
///
/// Every name is assumed to pack successfully, so the result matches `pack_sprites`
/// whenever no image is skipped.
pub fn plan_placements<S: AsRef<str>>(
    plan: &LayoutPlan,
    file_names: &[S],
    css_class: &str,
) -> Vec<PlacementRecord> {
    let mut cursor = RasterCursor::new(plan);
    file_names
        .iter()
        .map(|name| {
            let name = name.as_ref();
            let (offset_left, offset_top) = cursor.position();
            cursor.advance();
            PlacementRecord {
                file_name: name.to_string(),
                css_identifier: css_identifier(css_class, name),
                offset_left,
                offset_top,
            }
        })
        .collect()
}

#[instrument(skip_all, fields(images = sources.len()))]
/// Normalizes each source into a cell and composites it onto a fresh canvas.
///
/// Notes:
/// - Sources are packed in the given order; the caller is responsible for sorting.
/// - A source that fails to normalize is skipped and does not consume a cell.
/// - Fails with `InvalidConfig` if the plan has fewer cells than `sources`, or if its cell
///   size differs from the normalizer's.
pub fn pack_sprites<P: AsRef<Path>>(
    plan: &LayoutPlan,
    sources: &[P],
    css_class: &str,
    normalizer: &mut CellNormalizer<'_>,
    background: [u8; 3],
) -> Result<SpriteSheet> {
    let cell = (plan.cell_width, plan.cell_height);
    if normalizer.cell_size() != cell {
        let (nw, nh) = normalizer.cell_size();
        return Err(SpriteError::InvalidConfig(format!(
            "normalizer cell {}x{} does not match layout cell {}x{}",
            nw, nh, cell.0, cell.1
        )));
    }
    if sources.len() as u64 > plan.capacity() {
        return Err(SpriteError::InvalidConfig(format!(
            "layout holds {} cells but {} sources were given",
            plan.capacity(),
            sources.len()
        )));
    }

    let mut canvas = RgbImage::from_pixel(plan.canvas_width, plan.canvas_height, Rgb(background));
    let mut cursor = RasterCursor::new(plan);
    let mut placements = Vec::with_capacity(sources.len());
    let mut stats = PackStats {
        discovered: sources.len(),
        canvas_area: plan.area(),
        ..Default::default()
    };

    for src in sources {
        let path = src.as_ref();
        let (cell, origin) = match normalizer.normalize(path) {
            Ok(v) => v,
            Err(e) => {
                warn!(?path, error = %e, "skip image");
                stats.skipped += 1;
                continue;
            }
        };
        match origin {
            CellSource::Cache => stats.cache_hits += 1,
            CellSource::Resized => stats.cache_misses += 1,
        }

        let (left, top) = cursor.position();
        blit_cell(&cell, &mut canvas, left, top, plan.cell_width, plan.cell_height);
        drop(cell);

        let file_name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        placements.push(PlacementRecord {
            css_identifier: css_identifier(css_class, &file_name),
            file_name,
            offset_left: left,
            offset_top: top,
        });
        stats.packed += 1;
        stats.used_area += plan.cell_width as u64 * plan.cell_height as u64;
        cursor.advance();
    }

    info!(
        packed = stats.packed,
        skipped = stats.skipped,
        cache_hits = stats.cache_hits,
        cache_misses = stats.cache_misses,
        "packed sprites"
    );

    Ok(SpriteSheet {
        plan: *plan,
        canvas,
        placements,
        base_rule: base_rule(css_class),
        stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::compute_layout;

    #[test]
    fn cursor_wraps_at_canvas_width() {
        let plan = compute_layout(3, 100, 100).unwrap();
        let mut c = RasterCursor::new(&plan);
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(c.position());
            c.advance();
        }
        assert_eq!(seen, vec![(0, 0), (100, 0), (0, 100), (100, 100)]);
    }

    #[test]
    fn slug_collapses_runs() {
        assert_eq!(slugify("a__b..c"), "a-b-c");
        assert_eq!(slugify("Été.png"), "-t-png");
    }
}
