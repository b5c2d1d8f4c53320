use crate::error::Result;
use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, Rgb, RgbImage, RgbaImage};

/// Blit the top-left `w x h` of `cell` into `canvas` at destination (dx, dy).
///
/// Pixels falling outside either buffer are clipped, so an oversized or undersized
/// cached cell never writes past its slot's canvas bounds.
pub fn blit_cell(cell: &RgbImage, canvas: &mut RgbImage, dx: u32, dy: u32, w: u32, h: u32) {
    let (cw, ch) = canvas.dimensions();
    let rw = w.min(cell.width());
    let rh = h.min(cell.height());
    for yy in 0..rh {
        for xx in 0..rw {
            if dx + xx < cw && dy + yy < ch {
                let px = *cell.get_pixel(xx, yy);
                canvas.put_pixel(dx + xx, dy + yy, px);
            }
        }
    }
}

/// Composite `src` over a solid `background`, dropping the alpha channel.
pub fn flatten_alpha(src: &RgbaImage, background: Rgb<u8>) -> RgbImage {
    let (w, h) = src.dimensions();
    let mut out = RgbImage::from_pixel(w, h, background);
    for (x, y, px) in src.enumerate_pixels() {
        let a = px[3] as u32;
        if a == 0 {
            continue;
        }
        let mut rgb = [0u8; 3];
        for (i, c) in rgb.iter_mut().enumerate() {
            *c = ((px[i] as u32 * a + background[i] as u32 * (255 - a) + 127) / 255) as u8;
        }
        out.put_pixel(x, y, Rgb(rgb));
    }
    out
}

/// Encode an RGB buffer as baseline JPEG at `quality` (1..=100).
pub fn encode_jpeg(img: &RgbImage, quality: u8) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    let mut enc = JpegEncoder::new_with_quality(&mut bytes, quality);
    enc.encode(img.as_raw(), img.width(), img.height(), ExtendedColorType::Rgb8)?;
    Ok(bytes)
}
