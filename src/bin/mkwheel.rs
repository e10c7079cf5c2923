use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::Parser;
use palette_tools::{Color, Config, WheelKind, cli, render_hue_wheel, wheel};

/// Create a color wheel image of the specified properties.
///
/// Exactly one color, one wheel type and one output file are required.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    after_help = "Examples: mkwheel -c cyan -t hsl-hue-mirror -H 512 -O output.png\n      or: mkwheel -c \"#FF0000\" --type hsl-hue output.gif"
)]
struct Args {
    /// Height of the generated image (default 256)
    #[arg(short = 'H', long)]
    height: Option<u32>,

    /// Type of color wheel, "hsl-hue" or "hsl-hue-mirror"
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    kind: Option<String>,

    #[arg(short, long, help = format!("Color on which to base the color wheel; {}", cli::HASH_HINT))]
    color: Option<String>,

    /// Output image file
    #[arg(short = 'O', long = "output", value_name = "OUTPUT")]
    output_flag: Option<PathBuf>,

    /// Output image file
    #[arg(value_name = "OUTPUT", conflicts_with = "output_flag")]
    output: Option<PathBuf>,

    /// JSON configuration file; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print extra information to stdout
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let start = Instant::now();
    let args = Args::parse();
    cli::init_logging(args.verbose);

    let Some(output) = args.output.or(args.output_flag) else {
        bail!("No output file specified");
    };
    let Some(color_arg) = args.color.as_deref() else {
        bail!("No color specified");
    };
    let Some(kind_arg) = args.kind.as_deref() else {
        bail!("No color wheel type specified");
    };
    let kind: WheelKind = kind_arg.parse()?;
    let base: Color = color_arg.parse()?;

    let config = match &args.config {
        Some(path) => Config::from_json_file(path)?,
        None => Config::default(),
    };
    let height = args.height.unwrap_or(config.wheel.height);
    if height == 0 {
        bail!("Height option \"{height}\" specified; height must be a positive integer");
    }

    let hue = wheel::base_hue(&base);
    if args.verbose {
        println!("Constructing a color wheel based on hue value {:.2}", 360.0 * hue);
    }
    render_hue_wheel(kind, hue, height)?
        .save(&output)
        .with_context(|| format!("failed to create {}", output.display()))?;

    if args.verbose {
        println!(
            "Created {} in {} microseconds",
            output.display(),
            start.elapsed().as_micros()
        );
    }
    Ok(())
}
