use crate::cache::{CacheStore, DirCache};
use crate::compositing::encode_jpeg;
use crate::config::SpriteConfig;
use crate::error::{Result, SpriteError};
use crate::export::{image_file_name, public_url, stylesheet_file_name, to_stylesheet};
use crate::layout::compute_layout;
use crate::normalize::CellNormalizer;
use crate::packer::{SpriteSheet, pack_sprites};
use crate::scan::scan_images;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Result of a sprite build.
pub struct SpriteOutput {
    /// Public URL of the stylesheet, if the url prefix occurs in its path.
    pub css_url: Option<String>,
    /// Absolute path of the sprite sheet (not written on dry runs).
    pub image_path: PathBuf,
    /// Absolute path of the stylesheet (not written on dry runs).
    pub stylesheet_path: PathBuf,
    /// Stylesheet text as written.
    pub stylesheet: String,
    pub sheet: SpriteSheet,
}

/// Absolute source and output directories for a run.
#[derive(Debug, Clone)]
pub struct ResolvedDirs {
    pub source: PathBuf,
    pub output: PathBuf,
}

/// Builds the sprite sheet and stylesheet described by `cfg`, caching cells in
/// `cfg.cache_dir`.
pub fn build_sprites(cfg: &SpriteConfig) -> Result<SpriteOutput> {
    let mut cache = DirCache::new(cfg.cache_dir.clone());
    debug!(dir = %cache.dir().display(), "using cell cache directory");
    build_sprites_with_cache(cfg, &mut cache)
}

#[instrument(skip_all)]
/// Builds the sprite sheet and stylesheet using `cache` for normalized cells.
///
/// Steps: validate, resolve directories, scan (sorted), size the canvas once, pack once,
/// then write `<class>.jpg` and `<class>.css` into the output directory.
/// Nothing is read or written before validation succeeds.
pub fn build_sprites_with_cache(
    cfg: &SpriteConfig,
    cache: &mut dyn CacheStore,
) -> Result<SpriteOutput> {
    cfg.validate()?;
    let dirs = resolve_dirs(cfg)?;
    let css_class = cfg.css_class_name();

    info!(
        css_class,
        cell_width = cfg.sprite_width,
        cell_height = cfg.sprite_height,
        source = %dirs.source.display(),
        output = %dirs.output.display(),
        url_prefix = cfg.url_prefix_trimmed().unwrap_or_default(),
        "resolved configuration"
    );

    let sources = scan_images(&dirs.source, &cfg.include, &cfg.exclude)?;
    info!(count = sources.len(), "discovered source images");

    let plan = compute_layout(sources.len(), cfg.sprite_width, cfg.sprite_height)?;
    info!(
        width = plan.canvas_width,
        height = plan.canvas_height,
        shape = ?plan.shape,
        "canvas layout"
    );

    let mut normalizer = CellNormalizer::new(cache, cfg.sprite_width, cfg.sprite_height)
        .with_quality(cfg.quality)
        .with_background(cfg.background);
    let sheet = pack_sprites(&plan, &sources, css_class, &mut normalizer, cfg.background)?;
    info!("{}", sheet.stats.summary());

    let image_path = dirs.output.join(image_file_name(css_class));
    let stylesheet_path = dirs.output.join(stylesheet_file_name(css_class));
    let stylesheet = to_stylesheet(&sheet);

    if cfg.dry_run {
        info!("dry run: sprite sheet and stylesheet not written");
    } else {
        let jpeg = encode_jpeg(&sheet.canvas, cfg.quality)?;
        write_artifact(&image_path, &jpeg)?;
        info!(path = %image_path.display(), "wrote sprite sheet");
        write_artifact(&stylesheet_path, stylesheet.as_bytes())?;
        info!(path = %stylesheet_path.display(), "wrote stylesheet");
    }

    let css_url = cfg
        .url_prefix_trimmed()
        .and_then(|prefix| public_url(&stylesheet_path, prefix));

    Ok(SpriteOutput {
        css_url,
        image_path,
        stylesheet_path,
        stylesheet,
        sheet,
    })
}

/// Canonicalizes the source directory (which must exist) and creates the output directory.
pub fn resolve_dirs(cfg: &SpriteConfig) -> Result<ResolvedDirs> {
    let missing = |field| SpriteError::ConfigurationIncomplete { field };
    let source_dir = cfg.source_dir().ok_or_else(|| missing("source_dir"))?;
    let output_dir = cfg.output_dir().ok_or_else(|| missing("output_dir"))?;

    let source = canonical_dir(source_dir)?;
    fs::create_dir_all(output_dir).map_err(|e| SpriteError::DirectoryUnavailable {
        path: output_dir.to_path_buf(),
        source: e,
    })?;
    let output = canonical_dir(output_dir)?;
    Ok(ResolvedDirs { source, output })
}

fn canonical_dir(p: &Path) -> Result<PathBuf> {
    let unavailable = |e| SpriteError::DirectoryUnavailable {
        path: p.to_path_buf(),
        source: e,
    };
    let abs = fs::canonicalize(p).map_err(unavailable)?;
    if !abs.is_dir() {
        return Err(unavailable(std::io::Error::new(
            std::io::ErrorKind::NotADirectory,
            "not a directory",
        )));
    }
    Ok(abs)
}

fn write_artifact(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes).map_err(|e| SpriteError::Write {
        path: path.to_path_buf(),
        source: e,
    })
}
