use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Args, Parser, Subcommand};
use right_sprite_core::scan::scan_images;
use right_sprite_core::{
    SpriteConfig, SpriteError, build_sprites, compute_layout, plan_placements, to_json_manifest,
};
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "right-sprite",
    about = "Pack a folder of images into a CSS sprite (JPEG + stylesheet)",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action=ArgAction::Count, global=true, help_heading = "Logging")]
    verbose: u8,
    /// Quiet mode (overrides verbose)
    #[arg(
        short,
        long,
        default_value_t = false,
        global = true,
        help_heading = "Logging"
    )]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build the sprite sheet and stylesheet
    Build(BuildArgs),
    /// Print planned placements as JSON without decoding any image
    Layout(SpriteArgs),
}

/// Options shared by every subcommand. Anything given here overrides the YAML config.
#[derive(Args, Debug, Clone)]
struct SpriteArgs {
    /// YAML config file (accepts cssClass/spriteWidth/... option names too)
    #[arg(long, help_heading = "Input/Output")]
    config: Option<PathBuf>,
    /// Source images directory (scanned recursively)
    #[arg(short, long, help_heading = "Input/Output")]
    source: Option<PathBuf>,
    /// Output directory for <class>.jpg and <class>.css
    #[arg(short, long, help_heading = "Input/Output")]
    out_dir: Option<PathBuf>,
    /// URL path prefix used to derive the stylesheet's public URL
    #[arg(short, long, help_heading = "Input/Output")]
    url_prefix: Option<String>,
    /// Include patterns (glob). If set, only files matching any pattern are packed
    #[arg(long, help_heading = "Input/Output")]
    include: Vec<String>,
    /// Exclude patterns (glob). Files matching any pattern are ignored
    #[arg(long, help_heading = "Input/Output")]
    exclude: Vec<String>,

    /// CSS class name (also the output file base name)
    #[arg(long, help_heading = "Sprite")]
    css_class: Option<String>,
    /// Cell width in pixels
    #[arg(long, help_heading = "Sprite")]
    width: Option<u32>,
    /// Cell height in pixels
    #[arg(long, help_heading = "Sprite")]
    height: Option<u32>,
}

#[derive(Args, Debug, Clone)]
struct BuildArgs {
    #[command(flatten)]
    sprite: SpriteArgs,
    /// Directory for cached normalized cells
    #[arg(long, help_heading = "Image Processing")]
    cache_dir: Option<PathBuf>,
    /// JPEG quality (1..=100)
    #[arg(long, help_heading = "Image Processing")]
    quality: Option<u8>,
    /// Export a JSON manifest of the packed sprites to this file
    #[arg(long, help_heading = "Export")]
    manifest: Option<PathBuf>,
    /// Print the merged configuration (after CLI/YAML) and exit
    #[arg(long, default_value_t = false, help_heading = "Export")]
    print_config: bool,
    /// Output format for --print-config: json|yaml
    #[arg(long, default_value = "json", value_parser = ["json", "yaml"], help_heading = "Export")]
    print_config_format: String,
    /// Dry run: pack but do not write the sprite sheet or stylesheet
    #[arg(long, default_value_t = false, help_heading = "Export")]
    dry_run: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing_with_level(cli.quiet, cli.verbose);
    match &cli.command {
        Commands::Build(args) => run_build(args),
        Commands::Layout(args) => run_layout(args),
    }
}

fn run_build(args: &BuildArgs) -> anyhow::Result<()> {
    let mut cfg = load_config(&args.sprite)?;
    if let Some(v) = &args.cache_dir {
        cfg.cache_dir = v.clone();
    }
    if let Some(v) = args.quality {
        cfg.quality = v;
    }
    if args.dry_run {
        cfg.dry_run = true;
    }

    if args.print_config {
        match args.print_config_format.as_str() {
            "yaml" => println!("{}", serde_yaml::to_string(&cfg)?),
            _ => println!("{}", serde_json::to_string_pretty(&cfg)?),
        }
        return Ok(());
    }

    let out = match build_sprites(&cfg) {
        Ok(out) => out,
        Err(e @ SpriteError::ConfigurationIncomplete { .. }) => {
            anyhow::bail!("{e} (see --help, or pass --config <file.yaml>)")
        }
        Err(e) => return Err(e).context("sprite build failed"),
    };

    if let Some(path) = &args.manifest {
        let value = to_json_manifest(&out.sheet, cfg.css_class_name());
        if !cfg.dry_run {
            fs::write(path, serde_json::to_string_pretty(&value)?)
                .with_context(|| format!("write {}", path.display()))?;
            info!(?path, "manifest exported");
        } else {
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
    }

    match &out.css_url {
        Some(url) => println!("{url}"),
        None => info!(
            stylesheet = %out.stylesheet_path.display(),
            "url prefix not found in stylesheet path; no public url"
        ),
    }
    Ok(())
}

fn run_layout(args: &SpriteArgs) -> anyhow::Result<()> {
    let cfg = load_config(args)?;
    let source = cfg
        .source_dir()
        .context("a source directory is required (--source or config)")?;
    let paths = scan_images(source, &cfg.include, &cfg.exclude)?;
    let plan = compute_layout(paths.len(), cfg.sprite_width, cfg.sprite_height)?;
    let names: Vec<String> = paths
        .iter()
        .filter_map(|p| p.file_name())
        .map(|s| s.to_string_lossy().into_owned())
        .collect();
    let records = plan_placements(&plan, names.as_slice(), cfg.css_class_name());
    let value = serde_json::json!({ "plan": plan, "placements": records });
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

/// YAML config (if any) with CLI flags layered on top.
fn load_config(args: &SpriteArgs) -> anyhow::Result<SpriteConfig> {
    let mut cfg = if let Some(path) = &args.config {
        let file =
            fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        serde_yaml::from_str::<SpriteConfig>(&file)
            .with_context(|| format!("parse {}", path.display()))?
    } else {
        SpriteConfig::default()
    };
    if let Some(v) = &args.source {
        cfg.source_dir = Some(v.clone());
    }
    if let Some(v) = &args.out_dir {
        cfg.output_dir = Some(v.clone());
    }
    if let Some(v) = &args.url_prefix {
        cfg.url_prefix = Some(v.clone());
    }
    if let Some(v) = &args.css_class {
        cfg.css_class = v.clone();
    }
    if let Some(v) = args.width {
        cfg.sprite_width = v;
    }
    if let Some(v) = args.height {
        cfg.sprite_height = v;
    }
    cfg.include.extend(args.include.iter().cloned());
    cfg.exclude.extend(args.exclude.iter().cloned());
    Ok(cfg)
}

fn init_tracing_with_level(quiet: bool, verbose: u8) {
    let level = if quiet {
        "error".to_string()
    } else {
        match verbose {
            0 => "info".into(),
            1 => "debug".into(),
            _ => "trace".into(),
        }
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
