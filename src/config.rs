//! Tunable parameters for sampling and rendering.
//!
//! Every field has a documented default, so a JSON file only needs to name
//! the values it changes:
//!
//! ```no_run
//! use palette_tools::Config;
//! use std::path::Path;
//!
//! let config = Config::from_json_file(Path::new("palette.json"))?;
//! assert_eq!(config.kmeans.iterations, 10);
//! # Ok::<(), palette_tools::Error>(())
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::stripes::Orientation;

/// Complete configuration, one section per component.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub kmeans: ClusterConfig,
    pub quantize: QuantizeConfig,
    pub stripes: StripesConfig,
    pub wheel: WheelConfig,
}

impl Config {
    pub fn from_json_str(json: &str, origin: &Path) -> Result<Self> {
        serde_json::from_str(json).map_err(|source| Error::ConfigParse {
            path: origin.to_path_buf(),
            source,
        })
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json, path)
    }
}

/// K-means clusterer settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    /// Lloyd iterations; always run in full (default 10).
    pub iterations: usize,

    /// Seed for the random-spread initialization; `None` draws from the OS.
    pub random_seed: Option<u64>,

    /// Data sets at least this large assign points on the rayon pool
    /// (default 4096).
    pub parallel_threshold: usize,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            iterations: 10,
            random_seed: None,
            parallel_threshold: 4096,
        }
    }
}

/// Settings of the image codec's own palette reduction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuantizeConfig {
    /// Significant bits kept per channel before reduction, 1 through 8 (default 8).
    pub tree_depth: u8,

    /// Iteration cap of the Lab k-means (default 20).
    pub max_iterations: usize,

    /// Convergence threshold of the Lab k-means (default 1e-4).
    pub convergence: f32,

    /// Seed of the Lab k-means (default 0).
    pub seed: u64,
}

impl QuantizeConfig {
    pub const DEFAULT_TREE_DEPTH: u8 = 8;
}

impl Default for QuantizeConfig {
    fn default() -> Self {
        Self {
            tree_depth: Self::DEFAULT_TREE_DEPTH,
            max_iterations: 20,
            convergence: 1e-4,
            seed: 0,
        }
    }
}

/// Stripes image settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StripesConfig {
    /// Thickness of each stripe in pixels (default 100).
    pub width: u32,

    /// Length of each stripe in pixels; `None` uses 100 per color.
    pub length: Option<u32>,

    /// Stripe direction (default vertical).
    pub orientation: Orientation,
}

impl StripesConfig {
    pub const DEFAULT_WIDTH: u32 = 100;
    pub const LENGTH_PER_COLOR: u32 = 100;
}

impl Default for StripesConfig {
    fn default() -> Self {
        Self {
            width: Self::DEFAULT_WIDTH,
            length: None,
            orientation: Orientation::Vertical,
        }
    }
}

/// Color wheel settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WheelConfig {
    /// Image height in pixels (default 256).
    pub height: u32,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self { height: 256 }
    }
}
