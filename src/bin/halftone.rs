use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "halftone", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one image as a halftone PNG.
    Render(RenderArgs),
    /// Print the effective render parameters as JSON.
    Params(ParamArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input image (any format the `image` crate decodes).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long, default_value = halftone::EXPORT_FILE_NAME)]
    out: PathBuf,

    /// Width given to landscape images (default 900, or HALFTONE_MAX_WIDTH).
    #[arg(long)]
    max_width: Option<u32>,

    /// Height given to portrait and square images (default 700, or HALFTONE_MAX_HEIGHT).
    #[arg(long)]
    max_height: Option<u32>,

    #[command(flatten)]
    params: ParamArgs,
}

#[derive(clap::Args, Debug)]
struct ParamArgs {
    /// Render parameters JSON; flags below override individual fields.
    #[arg(long)]
    params: Option<PathBuf>,

    /// Maximum dot diameter in pixels.
    #[arg(long, allow_negative_numbers = true)]
    dot_size: Option<i32>,

    /// Grid pitch in pixels (>= 1).
    #[arg(long, allow_negative_numbers = true)]
    spacing: Option<i32>,

    /// Fill color as #RGB, #RRGGBB or #RRGGBBAA.
    #[arg(long)]
    color: Option<String>,

    /// Shape drawn per sample.
    #[arg(long, value_enum)]
    shape: Option<ShapeChoice>,

    /// Channel used as the brightness proxy.
    #[arg(long, value_enum)]
    channel: Option<ChannelChoice>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ShapeChoice {
    Circle,
    Square,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ChannelChoice {
    Red,
    Green,
    Blue,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Params(args) => cmd_params(args),
    }
}

fn resolve_params(args: &ParamArgs) -> anyhow::Result<halftone::RenderParameters> {
    let mut params = match &args.params {
        Some(path) => halftone::RenderParameters::from_path(path)?,
        None => halftone::RenderParameters::default(),
    };

    if let Some(v) = args.dot_size {
        params.dot_size = v;
    }
    if let Some(v) = args.spacing {
        params.spacing = v;
    }
    if let Some(v) = &args.color {
        params.color = v.parse()?;
    }
    if let Some(v) = args.shape {
        params.shape = match v {
            ShapeChoice::Circle => halftone::Shape::Circle,
            ShapeChoice::Square => halftone::Shape::Square,
        };
    }
    if let Some(v) = args.channel {
        params.channel = match v {
            ChannelChoice::Red => halftone::BrightnessChannel::Red,
            ChannelChoice::Green => halftone::BrightnessChannel::Green,
            ChannelChoice::Blue => halftone::BrightnessChannel::Blue,
        };
    }

    params.validate()?;
    Ok(params)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let params = resolve_params(&args.params)?;

    let mut loader = halftone::LoaderOpts::from_env();
    if let Some(w) = args.max_width {
        loader.max_width = w;
    }
    if let Some(h) = args.max_height {
        loader.max_height = h;
    }
    loader.validate()?;

    let mut session = halftone::HalftoneSession::new(loader).with_params(params)?;
    let stats = session
        .load_path(&args.in_path)
        .with_context(|| format!("load image '{}'", args.in_path.display()))?;
    session.save_png(&args.out)?;

    eprintln!(
        "rendered {} samples ({} painted)",
        stats.samples, stats.painted
    );
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_params(args: ParamArgs) -> anyhow::Result<()> {
    let params = resolve_params(&args)?;
    println!("{}", serde_json::to_string_pretty(&params)?);
    Ok(())
}
