use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Sprite build configuration.
///
/// Field names serialize as snake_case; the camelCase option names of the legacy
/// sprite script (`cssClass`, `writeSpriteFilesPublic`, ...) are accepted as aliases so
/// existing config files keep working.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpriteConfig {
    /// Stylesheet selector base name; also the base name of the output files.
    #[serde(default = "default_css_class", alias = "cssClass")]
    pub css_class: String,
    /// Cell width in pixels.
    #[serde(default = "default_cell_side", alias = "spriteWidth")]
    pub sprite_width: u32,
    /// Cell height in pixels.
    #[serde(default = "default_cell_side", alias = "spriteHeight")]
    pub sprite_height: u32,

    /// Directory receiving `<css_class>.jpg` and `<css_class>.css`.
    #[serde(default, alias = "writeSpriteFilesPublic")]
    pub output_dir: Option<PathBuf>,
    /// Directory scanned recursively for source images.
    #[serde(default, alias = "sourceImagesFolder")]
    pub source_dir: Option<PathBuf>,
    /// URL path prefix used to derive the public URL of the stylesheet.
    #[serde(default, alias = "outputUrlSlugs")]
    pub url_prefix: Option<String>,

    /// Where normalized cells are cached between runs.
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,
    /// JPEG quality (1..=100) for the sprite sheet and cached cells.
    #[serde(default = "default_quality")]
    pub quality: u8,
    /// Canvas fill and alpha-flatten colour.
    #[serde(default = "default_background")]
    pub background: [u8; 3],

    /// Include patterns (glob). If non-empty, only matching files are packed.
    #[serde(default)]
    pub include: Vec<String>,
    /// Exclude patterns (glob).
    #[serde(default)]
    pub exclude: Vec<String>,
    /// Compute and pack, but do not write the sprite sheet or stylesheet.
    #[serde(default)]
    pub dry_run: bool,
}

impl Default for SpriteConfig {
    fn default() -> Self {
        Self {
            css_class: default_css_class(),
            sprite_width: default_cell_side(),
            sprite_height: default_cell_side(),
            output_dir: None,
            source_dir: None,
            url_prefix: None,
            cache_dir: default_cache_dir(),
            quality: default_quality(),
            background: default_background(),
            include: Vec::new(),
            exclude: Vec::new(),
            dry_run: false,
        }
    }
}

impl SpriteConfig {
    /// Validates the configuration.
    ///
    /// Returns an error if:
    /// - the css class, source dir, output dir or url prefix is missing/empty after trimming
    /// - the cell size has a zero side
    /// - quality is outside 1..=100
    pub fn validate(&self) -> crate::error::Result<()> {
        use crate::error::SpriteError;

        if self.css_class_name().is_empty() {
            return Err(SpriteError::ConfigurationIncomplete { field: "css_class" });
        }
        if self.source_dir().is_none() {
            return Err(SpriteError::ConfigurationIncomplete { field: "source_dir" });
        }
        if self.output_dir().is_none() {
            return Err(SpriteError::ConfigurationIncomplete { field: "output_dir" });
        }
        if self.url_prefix_trimmed().is_none() {
            return Err(SpriteError::ConfigurationIncomplete { field: "url_prefix" });
        }

        if self.sprite_width == 0 || self.sprite_height == 0 {
            return Err(SpriteError::InvalidDimensions {
                width: self.sprite_width,
                height: self.sprite_height,
            });
        }
        if !(1..=100).contains(&self.quality) {
            return Err(SpriteError::InvalidConfig(format!(
                "quality must be within 1..=100, got {}",
                self.quality
            )));
        }
        Ok(())
    }

    /// Selector base name with surrounding dots removed (`.foo.` -> `foo`).
    pub fn css_class_name(&self) -> &str {
        self.css_class.trim().trim_matches('.')
    }

    pub fn source_dir(&self) -> Option<&Path> {
        non_empty_dir(self.source_dir.as_deref())
    }

    pub fn output_dir(&self) -> Option<&Path> {
        non_empty_dir(self.output_dir.as_deref())
    }

    /// Url prefix without leading/trailing slashes, `None` when nothing is left.
    pub fn url_prefix_trimmed(&self) -> Option<&str> {
        self.url_prefix
            .as_deref()
            .map(|s| s.trim().trim_matches('/'))
            .filter(|s| !s.is_empty())
    }

    /// Create a fluent builder for `SpriteConfig`.
    pub fn builder() -> SpriteConfigBuilder {
        SpriteConfigBuilder::new()
    }
}

// A path consisting only of separators counts as missing.
fn non_empty_dir(p: Option<&Path>) -> Option<&Path> {
    p.filter(|p| {
        !p.to_string_lossy()
            .trim()
            .trim_matches(|c: char| c == '/' || c == '\\')
            .is_empty()
    })
}

fn default_css_class() -> String {
    "right-sprite".into()
}
fn default_cell_side() -> u32 {
    200
}
fn default_cache_dir() -> PathBuf {
    PathBuf::from("cropped")
}
fn default_quality() -> u8 {
    60
}
fn default_background() -> [u8; 3] {
    [255, 255, 255]
}

/// Builder for `SpriteConfig` for ergonomic construction.
#[derive(Debug, Default, Clone)]
pub struct SpriteConfigBuilder {
    cfg: SpriteConfig,
}

impl SpriteConfigBuilder {
    pub fn new() -> Self {
        Self {
            cfg: SpriteConfig::default(),
        }
    }
    pub fn css_class(mut self, v: impl Into<String>) -> Self {
        self.cfg.css_class = v.into();
        self
    }
    pub fn with_cell_size(mut self, w: u32, h: u32) -> Self {
        self.cfg.sprite_width = w;
        self.cfg.sprite_height = h;
        self
    }
    pub fn source_dir(mut self, v: impl Into<PathBuf>) -> Self {
        self.cfg.source_dir = Some(v.into());
        self
    }
    pub fn output_dir(mut self, v: impl Into<PathBuf>) -> Self {
        self.cfg.output_dir = Some(v.into());
        self
    }
    pub fn url_prefix(mut self, v: impl Into<String>) -> Self {
        self.cfg.url_prefix = Some(v.into());
        self
    }
    pub fn cache_dir(mut self, v: impl Into<PathBuf>) -> Self {
        self.cfg.cache_dir = v.into();
        self
    }
    pub fn quality(mut self, v: u8) -> Self {
        self.cfg.quality = v;
        self
    }
    pub fn background(mut self, rgb: [u8; 3]) -> Self {
        self.cfg.background = rgb;
        self
    }
    pub fn include(mut self, pattern: impl Into<String>) -> Self {
        self.cfg.include.push(pattern.into());
        self
    }
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.cfg.exclude.push(pattern.into());
        self
    }
    pub fn dry_run(mut self, v: bool) -> Self {
        self.cfg.dry_run = v;
        self
    }
    pub fn build(self) -> SpriteConfig {
        self.cfg
    }
}
