//! Core library for packing a folder of images into a CSS sprite.
//!
//! - Layout: `compute_layout` sizes a canvas for N uniform cells (plus one spare cell)
//! - Cells: `CellNormalizer` stretches each source to the cell size, backed by a `CacheStore`
//! - Packing: `pack_sprites` fills the canvas row by row and records `background-position` offsets
//! - Driver: `build_sprites` validates config, scans, packs and writes `<class>.jpg` + `<class>.css`
//!
//! Quick example:
//! ```ignore
//! use right_sprite_core::{SpriteConfig, build_sprites};
//! # fn main() -> anyhow::Result<()> {
//! let cfg = SpriteConfig::builder()
//!     .source_dir("web/assets/images/items")
//!     .output_dir("web/assets/css/sprites")
//!     .url_prefix("assets/css/sprites")
//!     .with_cell_size(200, 200)
//!     .build();
//! let out = build_sprites(&cfg)?;
//! println!("stylesheet: {:?}", out.css_url);
//! # Ok(()) }
//! ```

pub mod cache;
pub mod compositing;
pub mod config;
pub mod error;
pub mod export;
pub mod layout;
pub mod model;
pub mod normalize;
pub mod packer;
pub mod pipeline;
pub mod scan;

pub use cache::*;
pub use config::*;
pub use error::*;
pub use export::*;
pub use layout::*;
pub use model::*;
pub use normalize::*;
pub use packer::*;
pub use pipeline::*;

/// Convenience prelude for common types and functions.
/// Importing `right_sprite_core::prelude::*` brings the primary APIs into scope.
pub mod prelude {
    pub use crate::cache::{CacheKey, CacheStore, DirCache, MemoryCache};
    pub use crate::config::{SpriteConfig, SpriteConfigBuilder};
    pub use crate::model::{LayoutPlan, LayoutShape, PackStats, PlacementRecord};
    pub use crate::normalize::{CellNormalizer, CellSource};
    pub use crate::packer::{SpriteSheet, pack_sprites, plan_placements};
    pub use crate::{
        SpriteOutput, build_sprites, build_sprites_with_cache, compute_layout, to_stylesheet,
    };
}
