use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bgpack::models::{ConfigSource, ConversionConfig, ConversionParams, EncodeParams, CONFIG_ENV};
use bgpack::services::{render_preview, ConversionPipeline, PreviewRequest};
use indexed_pack::{BitDepth, PaletteFormat, PixelOrder, ResizeMode};

#[derive(Parser)]
#[command(name = "bgpack", version)]
#[command(about = "Convert images into packed palette bitmaps for embedded displays")]
struct Cli {
    /// YAML config file (defaults to $BGPACK_CONFIG, then built-in defaults)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Resample an image and write the packed bitmap and palette
    Convert(ConvertArgs),
    /// Encode an image at its own size: `-b B [-q Q] INPUT IMAGE_OUT PALETTE_OUT`
    Encode(EncodeArgs),
    /// Render an image/palette pair back into a PNG
    Preview(PreviewArgs),
}

#[derive(Args)]
struct ConvertArgs {
    /// Source PNG or JPEG
    input: PathBuf,

    /// Packed bitmap output path
    #[arg(long)]
    output_image: PathBuf,

    /// Palette output path
    #[arg(long)]
    output_palette: PathBuf,

    /// Target width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Target height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Bits per pixel: 1, 2, 4 or 8
    #[arg(short = 'b', long)]
    bit_depth: Option<u8>,

    /// Maximum palette entries (0 keeps the image's own colors)
    #[arg(short = 'q', long)]
    quantize: Option<usize>,

    /// stretch, fit or crop
    #[arg(long)]
    resize_mode: Option<ResizeMode>,

    /// Border color for fit mode, e.g. "#000000FF"
    #[arg(long)]
    pad_color: Option<String>,

    /// rgba8888 or psx16
    #[arg(long)]
    palette_format: Option<PaletteFormat>,

    /// low-first or high-first
    #[arg(long)]
    pixel_order: Option<PixelOrder>,

    /// Alpha below which psx16 entries become transparent
    #[arg(long)]
    alpha_cutoff: Option<u8>,

    /// Pad the palette file to 2^B entries
    #[arg(long)]
    pad_palette: bool,

    /// Write only the used palette entries, even if the config pads
    #[arg(long, conflicts_with = "pad_palette")]
    no_pad_palette: bool,

    /// Perceptual refinement passes after the median cut
    #[arg(long)]
    refine_iterations: Option<usize>,

    /// Delegate encoding to this program instead of the built-in encoder
    #[arg(long)]
    encoder_command: Option<PathBuf>,
}

#[derive(Args)]
struct EncodeArgs {
    /// Bits per pixel: 1, 2, 4 or 8
    #[arg(short = 'b')]
    bit_depth: u8,

    /// Maximum palette entries; omitted keeps the image's own colors
    #[arg(short = 'q')]
    quantize: Option<usize>,

    /// Source image, encoded at its own size
    input: PathBuf,

    /// Packed bitmap output path
    image_out: PathBuf,

    /// Palette output path
    palette_out: PathBuf,
}

#[derive(Args)]
struct PreviewArgs {
    /// Packed bitmap to read
    #[arg(long)]
    image: PathBuf,

    /// Palette file to read
    #[arg(long)]
    palette: PathBuf,

    /// Bitmap width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Bitmap height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Bits per pixel of the bitmap
    #[arg(short = 'b', long)]
    bit_depth: Option<u8>,

    /// rgba8888 or psx16
    #[arg(long)]
    palette_format: Option<PaletteFormat>,

    /// low-first or high-first
    #[arg(long)]
    pixel_order: Option<PixelOrder>,

    /// PNG output path
    #[arg(short, long)]
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bgpack=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    match cli.command {
        Some(Commands::Convert(args)) => run_convert_command(cli.config.as_deref(), args),
        Some(Commands::Encode(args)) => run_encode_command(cli.config.as_deref(), args),
        Some(Commands::Preview(args)) => run_preview_command(cli.config.as_deref(), args),
        None => run_status_command(cli.config.as_deref()),
    }
}

/// Full conversion: decode, resample, quantize, pack, write.
fn run_convert_command(config_path: Option<&Path>, args: ConvertArgs) -> anyhow::Result<()> {
    let (mut config, source) = ConversionConfig::load(config_path)?;
    tracing::debug!(config = %source, "Using configuration");

    // CLI flags override file values
    if let Some(mode) = args.resize_mode {
        config.resize_mode = mode.to_string();
    }
    if let Some(color) = args.pad_color {
        config.pad_color = color;
    }
    if let Some(format) = args.palette_format {
        config.palette_format = format.to_string();
    }
    if let Some(order) = args.pixel_order {
        config.pixel_order = order.to_string();
    }
    if let Some(cutoff) = args.alpha_cutoff {
        config.alpha_cutoff = cutoff;
    }
    if args.pad_palette {
        config.pad_palette = true;
    } else if args.no_pad_palette {
        config.pad_palette = false;
    }
    if let Some(iterations) = args.refine_iterations {
        config.refine_iterations = iterations;
    }
    if let Some(command) = args.encoder_command {
        config.encoder.command = Some(command);
    }

    let params = ConversionParams {
        width: args.width.unwrap_or(config.width),
        height: args.height.unwrap_or(config.height),
        bit_depth: args.bit_depth.unwrap_or(config.bit_depth),
        quantize: args.quantize.unwrap_or(config.quantize),
        source: args.input,
        image_out: args.output_image,
        palette_out: args.output_palette,
    };

    let pipeline = ConversionPipeline::from_config(&config)?;
    let report = pipeline.run(&params)?;

    println!(
        "Converted {} -> {} ({} bytes), {} ({} entries, {} bytes)",
        params.source.display(),
        report.outputs.image_path().display(),
        report.image_bytes,
        report.outputs.palette_path().display(),
        report.palette_entries,
        report.palette_bytes
    );
    Ok(())
}

/// Encoder contract: always in-process, never resamples.
fn run_encode_command(config_path: Option<&Path>, args: EncodeArgs) -> anyhow::Result<()> {
    let (config, _) = ConversionConfig::load(config_path)?;
    let pipeline = ConversionPipeline::in_process(config.options()?);

    pipeline.encode_canonical_file(&EncodeParams {
        bit_depth: args.bit_depth,
        quantize: args.quantize.unwrap_or(0),
        source: args.input,
        image_out: args.image_out,
        palette_out: args.palette_out,
    })?;
    Ok(())
}

/// Read an output pair back and write a PNG preview.
fn run_preview_command(config_path: Option<&Path>, args: PreviewArgs) -> anyhow::Result<()> {
    let (config, _) = ConversionConfig::load(config_path)?;
    let options = config.options()?;

    let bits = args.bit_depth.unwrap_or(config.bit_depth);
    let bit_depth =
        BitDepth::from_bits(bits).ok_or(bgpack::error::ConvertError::InvalidBitDepth(bits))?;

    render_preview(&PreviewRequest {
        image_path: args.image,
        palette_path: args.palette,
        width: args.width.unwrap_or(config.width),
        height: args.height.unwrap_or(config.height),
        bit_depth,
        palette_format: args.palette_format.unwrap_or(options.palette_format),
        pixel_order: args.pixel_order.unwrap_or(options.pixel_order),
        output: args.output.clone(),
    })?;

    println!("Wrote {}", args.output.display());
    Ok(())
}

/// Show version, effective configuration and usage
fn run_status_command(config_path: Option<&Path>) -> anyhow::Result<()> {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let (config, source) = ConversionConfig::load(config_path)?;
    let options = config.options()?;

    println!("bgpack v{VERSION}");
    println!("Packed palette bitmaps for embedded displays\n");

    println!("Configuration:");
    match &source {
        ConfigSource::Defaults => println!("  Source         = {source} ({CONFIG_ENV} not set)"),
        ConfigSource::File(_) => println!("  Source         = {source}"),
    }
    println!("  Size           = {}x{}", config.width, config.height);
    println!("  Bit depth      = {}", config.bit_depth);
    println!("  Quantize       = {}", config.quantize);
    println!("  Resize mode    = {}", options.resize_mode);
    println!("  Pad color      = {}", options.pad_color);
    println!("  Refine passes  = {}", options.refine_iterations);
    println!("  Pixel order    = {}", options.pixel_order);
    println!("  Palette format = {}", options.palette_format);
    println!("  Alpha cutoff   = {}", options.alpha_cutoff);
    println!("  Pad palette    = {}", options.pad_palette);
    println!(
        "  Encoder        = {}",
        config
            .encoder
            .command
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "built-in".to_string())
    );

    println!("\nCommands:");
    println!("  bgpack convert INPUT --output-image IMG --output-palette PAL");
    println!("  bgpack encode -b B [-q Q] INPUT IMG PAL");
    println!("  bgpack preview --image IMG --palette PAL --output PNG");
    println!("\nRun 'bgpack help <command>' for all options.");
    Ok(())
}
