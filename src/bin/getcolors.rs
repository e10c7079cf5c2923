use std::num::NonZeroUsize;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use palette_tools::{ColorCollection, Config, SampleMode, Sampler, cli};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    /// One hex color per line
    Text,
    /// JSON array of hex colors
    Json,
}

/// List colors in hex format from the specified image.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    after_help = "Examples: getcolors -m quantize -n 4 -I input.png\n      or: getcolors --mode kmeans-hue-spread --number 24 input.gif"
)]
struct Args {
    /// Method for getting colors (quantize, kmeans-random-spread,
    /// kmeans-static-spread, kmeans-hue-spread, kmeans-bright-hue-spread,
    /// kmeans-saturated-hue-spread)
    #[arg(short, long)]
    mode: Option<String>,

    /// Maximum number of colors to list from the image
    #[arg(short, long, allow_negative_numbers = true)]
    number: Option<i64>,

    /// Depth of tree used in color quantization, 1 through 8 (default 8)
    #[arg(short, long, allow_negative_numbers = true)]
    depth: Option<i64>,

    /// Input image file
    #[arg(short = 'I', long = "input", value_name = "INPUT")]
    input_flag: Option<PathBuf>,

    /// Input image file
    #[arg(value_name = "INPUT", conflicts_with = "input_flag")]
    input: Option<PathBuf>,

    /// JSON configuration file; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Print extra information to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    cli::init_logging(args.verbose);

    let Some(mode_name) = args.mode.as_deref() else {
        bail!("No mode specified");
    };
    let Some(input) = args.input.or(args.input_flag) else {
        bail!("No input file specified");
    };
    let number = args.number.context("No number of colors specified")?;
    let num_colors = usize::try_from(number)
        .ok()
        .and_then(NonZeroUsize::new)
        .context("Number of colors must be a positive integer")?;

    let mut config = match &args.config {
        Some(path) => Config::from_json_file(path)?,
        None => Config::default(),
    };
    if let Some(depth) = args.depth {
        match u8::try_from(depth).ok().filter(|d| (1..=8).contains(d)) {
            Some(depth) => config.quantize.tree_depth = depth,
            None => tracing::warn!(
                depth,
                default = config.quantize.tree_depth,
                "depth option is not between 1 and 8; using default"
            ),
        }
    }

    let mode = SampleMode::parse(mode_name);
    if !mode.is_valid() {
        bail!("Unknown mode \"{mode_name}\"");
    }

    let colors = Sampler::new(&config)
        .sample_path(num_colors, mode, &input)
        .context("Getting color subset failed")?;

    match args.format {
        Format::Text => println!("{}", colors.to_hex_string("\n")),
        Format::Json => println!("{}", serde_json::to_string(&colors.to_hex_vec())?),
    }
    Ok(())
}
