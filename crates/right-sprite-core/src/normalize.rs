use crate::cache::{CacheKey, CacheStore};
use crate::compositing::{encode_jpeg, flatten_alpha};
use crate::error::{Result, SpriteError};
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageReader, Rgb, RgbImage};
use std::path::Path;
use tracing::{debug, warn};

/// Where a normalized cell came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellSource {
    Cache,
    Resized,
}

/// Produces fixed-size cells from source images, backed by a `CacheStore`.
pub struct CellNormalizer<'a> {
    cache: &'a mut dyn CacheStore,
    width: u32,
    height: u32,
    quality: u8,
    background: Rgb<u8>,
}

impl<'a> CellNormalizer<'a> {
    pub fn new(cache: &'a mut dyn CacheStore, width: u32, height: u32) -> Self {
        Self {
            cache,
            width,
            height,
            quality: 60,
            background: Rgb([255, 255, 255]),
        }
    }

    /// JPEG quality for cells written to the cache.
    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = quality;
        self
    }

    /// Colour transparent source pixels are flattened onto.
    pub fn with_background(mut self, rgb: [u8; 3]) -> Self {
        self.background = Rgb(rgb);
        self
    }

    pub fn cell_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns the cell for `source`, resizing and caching it on a miss.
    ///
    /// Cached entries are trusted as-is. The source is stretched to the cell size without
    /// preserving aspect ratio.
    pub fn normalize(&mut self, source: &Path) -> Result<(RgbImage, CellSource)> {
        let key = CacheKey::for_source(source, self.width, self.height);

        if let Some(bytes) = self.cache.get(&key)? {
            debug!(key = %key.artifact_name(), "cache hit");
            let cell = image::load_from_memory(&bytes)
                .map_err(|e| SpriteError::Decode {
                    name: key.artifact_name(),
                    source: e,
                })?
                .to_rgb8();
            return Ok((cell, CellSource::Cache));
        }

        debug!(key = %key.artifact_name(), "cache miss");
        let img = decode_source(source).map_err(|e| SpriteError::Decode {
            name: source.display().to_string(),
            source: e,
        })?;
        let cell = self.resize(&img);
        drop(img);

        let bytes = encode_jpeg(&cell, self.quality)?;
        if let Err(e) = self.cache.put(&key, &bytes) {
            warn!(key = %key.artifact_name(), error = %e, "could not store cell in cache");
        }
        Ok((cell, CellSource::Resized))
    }

    fn resize(&self, img: &DynamicImage) -> RgbImage {
        let flat = flatten_alpha(&img.to_rgba8(), self.background);
        imageops::resize(&flat, self.width, self.height, FilterType::Triangle)
    }
}

fn decode_source(p: &Path) -> std::result::Result<DynamicImage, image::ImageError> {
    ImageReader::open(p)?.with_guessed_format()?.decode()
}
