//! Command-line annotator: text, rectangles, and scalebars on image files.

use std::error::Error as _;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use image_overlay::{
    init_with_level, overlay_rectangle_with, overlay_scalebar_with, overlay_text_with, Anchor,
    OverlayConfig, OverlayError, PixelFont, TextRasterizer, TtfFont,
};
use log::LevelFilter;
use thiserror::Error;

// ── errors ──────────────────────────────────────────────────────────────────

/// Errors that terminate the annotator with a nonzero exit.
#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Overlay(#[from] OverlayError),

    #[error(transparent)]
    Font(#[from] image_overlay::FontError),

    #[error("cannot open image {path:?}")]
    OpenImage {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("cannot write image {path:?}")]
    SaveImage {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("cannot read {path:?}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse {path:?} as JSON")]
    ParseJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{path:?} must hold a JSON object of scalar values")]
    TextJsonShape { path: PathBuf },
}

// ── argument types ──────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "image-overlay")]
#[command(about = "Overlay contrast-aware text, rectangles, and scalebars on images")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Draw word-wrapped text at the anchor.
    Text(TextArgs),
    /// Draw an opaque rectangle at the anchor.
    Rect(RectArgs),
    /// Draw a scalebar with its distance label.
    Scalebar(ScalebarArgs),
}

#[derive(Debug, Clone, Args)]
struct CommonArgs {
    /// Input image.
    #[arg(long, short = 'i')]
    input: PathBuf,

    /// Output path; without it the input is overwritten.
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// Placement: tl, tr, bl, br, a spelled-out corner, or x,y.
    #[arg(long, default_value = "br")]
    anchor: Anchor,

    /// JSON file with overlay settings; the flags below override its
    /// fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Corner anchor inset in pixels.
    #[arg(long)]
    margin: Option<u32>,

    /// Mean-luminance cutoff between black and white ink.
    #[arg(long)]
    threshold: Option<f64>,

    /// Text canvas width as a fraction of the image width.
    #[arg(long)]
    relative_size: Option<f64>,

    /// Contrast sampling window in pixels.
    #[arg(long)]
    extent: Option<u32>,

    /// Log shade sampling and compositing details.
    #[arg(long, short = 'v')]
    verbose: bool,
}

impl CommonArgs {
    fn to_config(&self) -> Result<OverlayConfig, CliError> {
        let mut cfg = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path).map_err(|source| CliError::ReadFile {
                    path: path.clone(),
                    source,
                })?;
                serde_json::from_str(&text).map_err(|source| CliError::ParseJson {
                    path: path.clone(),
                    source,
                })?
            }
            None => OverlayConfig::default(),
        };
        if let Some(margin) = self.margin {
            cfg.margin = margin;
        }
        if let Some(threshold) = self.threshold {
            cfg.shade_threshold = threshold;
        }
        if let Some(relative) = self.relative_size {
            cfg.relative_text_size = relative;
        }
        if let Some(extent) = self.extent {
            cfg.sample_extent = extent;
        }
        Ok(cfg)
    }

    fn output(&self) -> &Path {
        self.output.as_deref().unwrap_or(&self.input)
    }
}

#[derive(Debug, Clone, Args)]
struct TextArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// The text to draw.
    #[arg(long, required_unless_present = "text_json", conflicts_with = "text_json")]
    text: Option<String>,

    /// JSON object rendered as `key: value` entries joined by commas.
    #[arg(long)]
    text_json: Option<PathBuf>,

    /// TTF/OTF font file; without it the built-in bitmap face is used.
    #[arg(long)]
    font: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
struct RectArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Rectangle width in pixels.
    #[arg(long)]
    width: u32,

    /// Rectangle height in pixels.
    #[arg(long)]
    height: u32,
}

#[derive(Debug, Clone, Args)]
struct ScalebarArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// TTF/OTF font file for the label; without it the built-in bitmap
    /// face is used.
    #[arg(long)]
    font: Option<PathBuf>,
}

// ── image plumbing ──────────────────────────────────────────────────────────

/// A decoded image, kept in its alpha-ness so saving does not grow or drop
/// a channel.
enum Loaded {
    Rgb(image::RgbImage),
    Rgba(image::RgbaImage),
}

fn load_image(path: &Path) -> Result<Loaded, CliError> {
    let img = image::open(path).map_err(|source| CliError::OpenImage {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(if img.color().has_alpha() {
        Loaded::Rgba(img.to_rgba8())
    } else {
        Loaded::Rgb(img.to_rgb8())
    })
}

impl Loaded {
    fn save(&self, path: &Path) -> Result<(), CliError> {
        match self {
            Loaded::Rgb(img) => img.save(path),
            Loaded::Rgba(img) => img.save(path),
        }
        .map_err(|source| CliError::SaveImage {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn load_font(path: Option<&PathBuf>) -> Result<Box<dyn TextRasterizer>, CliError> {
    match path {
        Some(path) => Ok(Box::new(TtfFont::from_path(path)?)),
        None => Ok(Box::new(PixelFont)),
    }
}

// ── subcommands ─────────────────────────────────────────────────────────────

fn run_text(args: TextArgs) -> Result<(), CliError> {
    let cfg = args.common.to_config()?;
    let text = resolve_text(&args)?;
    let font = load_font(args.font.as_ref())?;

    let mut img = load_image(&args.common.input)?;
    match &mut img {
        Loaded::Rgb(img) => {
            overlay_text_with(img, &text, args.common.anchor, font.as_ref(), &cfg)?
        }
        Loaded::Rgba(img) => {
            overlay_text_with(img, &text, args.common.anchor, font.as_ref(), &cfg)?
        }
    }
    img.save(args.common.output())
}

fn run_rect(args: RectArgs) -> Result<(), CliError> {
    let cfg = args.common.to_config()?;
    let dims = [args.width, args.height];

    let mut img = load_image(&args.common.input)?;
    match &mut img {
        Loaded::Rgb(img) => overlay_rectangle_with(img, dims, args.common.anchor, &cfg)?,
        Loaded::Rgba(img) => overlay_rectangle_with(img, dims, args.common.anchor, &cfg)?,
    }
    img.save(args.common.output())
}

fn run_scalebar(args: ScalebarArgs) -> Result<(), CliError> {
    let cfg = args.common.to_config()?;
    let font = load_font(args.font.as_ref())?;

    let mut img = load_image(&args.common.input)?;
    match &mut img {
        Loaded::Rgb(img) => overlay_scalebar_with(img, args.common.anchor, font.as_ref(), &cfg)?,
        Loaded::Rgba(img) => overlay_scalebar_with(img, args.common.anchor, font.as_ref(), &cfg)?,
    }
    img.save(args.common.output())
}

/// Pull the annotation text from `--text` or from a JSON object file
/// rendered as `key: value` entries.
fn resolve_text(args: &TextArgs) -> Result<String, CliError> {
    if let Some(text) = &args.text {
        return Ok(text.clone());
    }
    let path = args.text_json.as_ref().expect("clap requires text or text-json");

    let raw = std::fs::read_to_string(path).map_err(|source| CliError::ReadFile {
        path: path.clone(),
        source,
    })?;
    let value: serde_json::Value =
        serde_json::from_str(&raw).map_err(|source| CliError::ParseJson {
            path: path.clone(),
            source,
        })?;
    let serde_json::Value::Object(map) = value else {
        return Err(CliError::TextJsonShape { path: path.clone() });
    };

    let mut parts = Vec::with_capacity(map.len());
    for (key, value) in &map {
        let rendered = match value {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Number(n) => n.to_string(),
            serde_json::Value::Bool(b) => b.to_string(),
            _ => return Err(CliError::TextJsonShape { path: path.clone() }),
        };
        parts.push(format!("{key}: {rendered}"));
    }
    Ok(parts.join(", "))
}

// ── entry point ─────────────────────────────────────────────────────────────

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Text(args) => run_text(args),
        Commands::Rect(args) => run_rect(args),
        Commands::Scalebar(args) => run_scalebar(args),
    }
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let verbose = match &cli.command {
        Commands::Text(args) => args.common.verbose,
        Commands::Rect(args) => args.common.verbose,
        Commands::Scalebar(args) => args.common.verbose,
    };
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let _ = init_with_level(level);

    match run(cli) {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            let mut source = err.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }
            std::process::ExitCode::FAILURE
        }
    }
}
