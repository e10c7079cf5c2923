use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Parser;
use palette_tools::{Config, Orientation, StripesImage, cli};

/// Create an image file with stripes of the specified colors.
///
/// At least one color is required. Width, length and orientation are optional.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    after_help = "Examples: mkstripes -c red -c orange -c yellow -o vertical output.png\n      or: mkstripes -c cyan -c \"#ffffff\" -c \"#FF0000\" -l 500 -w 500 output.gif"
)]
struct Args {
    #[arg(short, long = "color", value_name = "COLOR", help = format!("An additional stripe color, as hex or a CSS name (repeatable); {}", cli::HASH_HINT))]
    colors: Vec<String>,

    /// Width in pixels of each stripe (default 100)
    #[arg(short, long)]
    width: Option<u32>,

    /// Length in pixels of the stripes (default 100 per color)
    #[arg(short, long)]
    length: Option<u32>,

    /// Stripe orientation, "vertical" or "horizontal" (default vertical)
    #[arg(short, long)]
    orientation: Option<String>,

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
    let args = Args::parse();
    cli::init_logging(args.verbose);

    let Some(output) = args.output.or(args.output_flag) else {
        bail!("No output file specified");
    };
    let config = match &args.config {
        Some(path) => Config::from_json_file(path)?,
        None => Config::default(),
    };

    let mut stripes = StripesImage::new(&config.stripes);
    for color in cli::parse_colors(args.colors.iter().map(String::as_str)) {
        stripes.insert_color(color);
    }
    if stripes.is_empty() {
        bail!("No colors have been gathered; colors are required in order to generate an image");
    }

    if let Some(width) = args.width {
        stripes.set_width(width);
    }
    if let Some(length) = args.length {
        stripes.set_length(length);
    }
    if let Some(name) = args.orientation.as_deref() {
        let orientation = Orientation::parse(name);
        if !orientation.is_valid() {
            bail!("\"{name}\" is not a valid orientation; it must be either \"vertical\" or \"horizontal\"");
        }
        stripes.set_orientation(orientation);
    }

    let summary = stripes.export(&output)?;
    if args.verbose {
        println!("{summary}");
    }
    Ok(())
}
