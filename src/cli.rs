//! Helpers shared by the command-line tools.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::color::Color;

/// Install a stderr subscriber. `RUST_LOG` wins; otherwise only warnings
/// are shown, or debug output with `verbose`.
pub fn init_logging(verbose: bool) {
    let fallback = if verbose {
        "palette_tools=debug"
    } else {
        "palette_tools=warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| fallback.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();
}

/// Parse every color argument, warning about and skipping the ones that
/// are not colors.
pub fn parse_colors<'a>(args: impl IntoIterator<Item = &'a str>) -> Vec<Color> {
    args.into_iter()
        .filter_map(|arg| match arg.parse::<Color>() {
            Ok(color) => Some(color),
            Err(e) => {
                tracing::warn!("{e}; ignoring");
                None
            }
        })
        .collect()
}

/// Hint appended to argument errors involving `#` colors.
pub const HASH_HINT: &str =
    "if the color value has a '#' character then place the color value in quotes";
