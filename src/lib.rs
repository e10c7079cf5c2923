//! Extract representative color palettes from images, and render simple
//! synthetic color images (stripes, color wheels).
//!
//! The sampling pipeline reduces the multiset of pixel colors to a small
//! palette:
//!
//! 1. the [`Image`] codec boundary yields the histogram of opaque colors;
//! 2. an optional [`HslRange`] band-pass keeps only bright or saturated colors;
//! 3. [`hue_spread`] provides hue-diverse starting centroids;
//! 4. [`find_clusters`] runs k-means in RGB space;
//! 5. the [`Sampler`] picks the path for a [`SampleMode`] and sorts the result.
//!
//! ```no_run
//! use std::num::NonZeroUsize;
//! use std::path::Path;
//! use palette_tools::{ColorCollection, Image, SampleMode, Sampler, Config};
//!
//! let image = Image::open(Path::new("wallpaper.png"))?;
//! let sampler = Sampler::new(&Config::default());
//! let colors = sampler.sample(NonZeroUsize::new(8).unwrap(), SampleMode::KmeansHueSpread, &image)?;
//! println!("{}", colors.to_hex_string("\n"));
//! # Ok::<(), palette_tools::Error>(())
//! ```

pub mod codec;
pub mod collection;
pub mod color;
pub mod config;
pub mod error;
pub mod hsl_range;
pub mod hue_spread;
pub mod kmeans;
pub mod mode;
pub mod sampler;
pub mod stripes;
pub mod wheel;

#[cfg(feature = "native-bin")]
pub mod cli;

pub use codec::Image;
pub use collection::{ColorCollection, ColorSet, ColorVector};
pub use color::Color;
pub use config::{ClusterConfig, Config, QuantizeConfig, StripesConfig, WheelConfig};
pub use error::{ClusterError, Error, Result, SampleError};
pub use hsl_range::{HslRange, bright_colors, saturated_colors};
pub use hue_spread::{hue_spread, hue_spread_hsl};
pub use kmeans::{SeedMode, find_clusters, find_clusters_with};
pub use mode::SampleMode;
pub use sampler::{Sampler, sample};
pub use stripes::{Orientation, StripesImage};
pub use wheel::{WheelKind, render_hue_wheel, render_wheel};
