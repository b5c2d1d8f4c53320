//! Canvas sizing for uniform cells.

use crate::error::{Result, SpriteError};
use crate::model::{LayoutPlan, LayoutShape};

/// Computes the canvas size for `image_count` cells of `cell_width x cell_height`.
///
/// One extra cell is always reserved, so an empty input still yields a one-cell canvas.
/// With `n = image_count + 1` and `s = ceil(sqrt(n))`, a square (`s` columns) and a
/// rectangle (`s` rows) candidate are compared on wasted area; ties go to the square.
pub fn compute_layout(image_count: usize, cell_width: u32, cell_height: u32) -> Result<LayoutPlan> {
    if cell_width == 0 || cell_height == 0 {
        return Err(SpriteError::InvalidDimensions {
            width: cell_width,
            height: cell_height,
        });
    }
    let too_large = || SpriteError::CanvasTooLarge {
        images: image_count,
    };

    let n = (image_count as u64).checked_add(1).ok_or_else(too_large)?;
    let s = ceil_sqrt(n);
    let other = n.div_ceil(s);

    // Widened so sides cannot overflow; oversized ones are rejected below.
    let (n, s, other) = (n as u128, s as u128, other as u128);
    let (cw, ch) = (cell_width as u128, cell_height as u128);
    let needed = n.saturating_mul(cw).saturating_mul(ch);

    let square = (s * cw, other * ch);
    let rect = (other * cw, s * ch);
    let waste = |(w, h): (u128, u128)| w.saturating_mul(h).saturating_sub(needed);

    let ((w, h), shape) = if waste(square) <= waste(rect) {
        (square, LayoutShape::Square)
    } else {
        (rect, LayoutShape::Rectangle)
    };

    Ok(LayoutPlan {
        canvas_width: u32::try_from(w).map_err(|_| too_large())?,
        canvas_height: u32::try_from(h).map_err(|_| too_large())?,
        cell_width,
        cell_height,
        shape,
    })
}

fn ceil_sqrt(n: u64) -> u64 {
    let r = n.isqrt();
    if r * r < n { r + 1 } else { r }
}
