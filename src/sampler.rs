//! Composes filtering, seeding and clustering into palette-reduction strategies.

use std::num::NonZeroUsize;
use std::path::Path;

use tracing::{debug, warn};

use crate::codec::Image;
use crate::collection::ColorVector;
use crate::color::Color;
use crate::config::{ClusterConfig, Config, QuantizeConfig};
use crate::error::{self, SampleError};
use crate::hsl_range::{bright_colors, saturated_colors};
use crate::hue_spread::hue_spread;
use crate::kmeans::{SeedMode, find_clusters_with};
use crate::mode::SampleMode;

/// Runs one [`SampleMode`] per call; holds configuration only.
#[derive(Clone, Debug, Default)]
pub struct Sampler {
    kmeans: ClusterConfig,
    quantize: QuantizeConfig,
}

impl Sampler {
    pub fn new(config: &Config) -> Self {
        Self {
            kmeans: config.kmeans.clone(),
            quantize: config.quantize.clone(),
        }
    }

    /// Reduce the image to at most `num_colors` representative colors,
    /// sorted by the HSL ordering of [`Color`].
    ///
    /// | mode | data | seeds |
    /// |---|---|---|
    /// | `quantize` | codec palette reduction | n/a |
    /// | `kmeans-random-spread` | unique colors | random |
    /// | `kmeans-static-spread` | unique colors | static spread |
    /// | `kmeans-hue-spread` | unique colors | hue spread |
    /// | `kmeans-bright-hue-spread` | bright unique colors | hue spread |
    /// | `kmeans-saturated-hue-spread` | saturated unique colors | hue spread |
    pub fn sample(
        &self,
        num_colors: NonZeroUsize,
        mode: SampleMode,
        image: &Image,
    ) -> Result<ColorVector, SampleError> {
        let k = num_colors.get();
        debug!(%mode, k, "sampling colors");

        let mut colors: ColorVector = match mode {
            SampleMode::Quantize => image.quantize(num_colors, &self.quantize).into_vector(),
            SampleMode::KmeansRandomSpread => {
                self.cluster(k, SeedMode::RandomSpread, &image.unique_colors())?
            }
            SampleMode::KmeansStaticSpread => {
                self.cluster(k, SeedMode::StaticSpread, &image.unique_colors())?
            }
            SampleMode::KmeansHueSpread => {
                let seeds = hue_spread(num_colors);
                self.cluster(k, SeedMode::KeepExisting(&seeds), &image.unique_colors())?
            }
            SampleMode::KmeansBrightHueSpread => {
                let seeds = hue_spread(num_colors);
                let data = bright_colors(&image.unique_colors());
                self.cluster(k, SeedMode::KeepExisting(&seeds), &data)?
            }
            SampleMode::KmeansSaturatedHueSpread => {
                let seeds = hue_spread(num_colors);
                let data = saturated_colors(&image.unique_colors());
                self.cluster(k, SeedMode::KeepExisting(&seeds), &data)?
            }
            SampleMode::Unknown => return Err(SampleError::UnknownMode),
        };

        colors.sort();
        Ok(colors)
    }

    /// Decode the image at `path` and [`sample`](Self::sample) it.
    pub fn sample_path(
        &self,
        num_colors: NonZeroUsize,
        mode: SampleMode,
        path: &Path,
    ) -> error::Result<ColorVector> {
        let image = Image::open(path)?;
        Ok(self.sample(num_colors, mode, &image)?)
    }

    fn cluster(
        &self,
        k: usize,
        seed: SeedMode<'_>,
        data: &[Color],
    ) -> Result<ColorVector, SampleError> {
        debug!(k, data = data.len(), "clustering unique colors");
        find_clusters_with(k, seed, data, &self.kmeans)
            .map(ColorVector::from)
            .map_err(|e| {
                warn!(error = %e, "k-means failed");
                SampleError::from(e)
            })
    }
}

/// [`Sampler::sample`] with the default configuration.
pub fn sample(
    num_colors: NonZeroUsize,
    mode: SampleMode,
    image: &Image,
) -> Result<ColorVector, SampleError> {
    Sampler::default().sample(num_colors, mode, image)
}
