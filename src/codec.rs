//! Image codec boundary: decoding, pixel histograms, the codec's own
//! palette reduction, and encoding.
//!
//! Everything from the `image` crate that can fail is converted into
//! [`Error`] here, so the sampling core only ever sees colors.

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::path::Path;

use image::{DynamicImage, RgbaImage};
use kmeans_colors::get_kmeans;
use palette::{IntoColor, Lab, LinSrgb, Srgb};
use tracing::debug;

use crate::collection::{ColorCollection, ColorSet};
use crate::color::Color;
use crate::config::QuantizeConfig;
use crate::error::{Error, Result};

/// `kmeans_colors` labels clusters with a `u8`.
const MAX_QUANTIZE_COLORS: usize = 256;

/// A decoded RGBA image.
#[derive(Clone, Debug)]
pub struct Image {
    pixels: RgbaImage,
}

impl Image {
    pub fn open(path: &Path) -> Result<Self> {
        let decoded = image::open(path).map_err(|source| Error::ImageRead {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), width = decoded.width(), height = decoded.height(), "decoded image");
        Ok(Self::from_dynamic(decoded))
    }

    pub fn from_memory(bytes: &[u8]) -> Result<Self> {
        let decoded = image::load_from_memory(bytes).map_err(|source| Error::ImageRead {
            path: "<memory>".into(),
            source,
        })?;
        Ok(Self::from_dynamic(decoded))
    }

    pub fn from_dynamic(image: DynamicImage) -> Self {
        Self {
            pixels: image.to_rgba8(),
        }
    }

    pub fn from_rgba(pixels: RgbaImage) -> Self {
        Self { pixels }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn as_rgba(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        self.pixels.save(path).map_err(|source| Error::ImageWrite {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Opaque pixels (alpha > 0) as RGB, in raster order.
    fn opaque_pixels(&self) -> impl Iterator<Item = Srgb<u8>> + '_ {
        self.pixels
            .pixels()
            .filter(|p| p[3] > 0)
            .map(|p| Srgb::new(p[0], p[1], p[2]))
    }

    /// Pixel count per distinct opaque color, sorted by color.
    pub fn histogram(&self) -> Vec<(Color, usize)> {
        let mut counts: HashMap<Color, usize> = HashMap::new();
        for pixel in self.opaque_pixels() {
            *counts.entry(pixel.into()).or_default() += 1;
        }
        let mut histogram: Vec<(Color, usize)> = counts.into_iter().collect();
        histogram.sort_by(|a, b| a.0.cmp(&b.0));
        histogram
    }

    /// Every opaque pixel's color, each repeated by its pixel count.
    pub fn colors(&self) -> Vec<Color> {
        self.histogram()
            .into_iter()
            .flat_map(|(color, count)| std::iter::repeat_n(color, count))
            .collect()
    }

    /// One entry per distinct opaque color.
    pub fn unique_colors(&self) -> Vec<Color> {
        self.histogram().into_iter().map(|(color, _)| color).collect()
    }

    /// Reduce the image to at most `n` colors with the codec's own algorithm.
    ///
    /// Channels are first truncated to `tree_depth` significant bits. An
    /// image that already has no more than `n` colors is returned unchanged;
    /// otherwise every opaque pixel is clustered in CIE Lab and the centroids
    /// that own at least one pixel are returned.
    pub fn quantize(&self, n: NonZeroUsize, config: &QuantizeConfig) -> ColorSet {
        let depth = config.tree_depth.clamp(1, 8);
        let mask = u8::MAX << (8 - depth);
        let pixels: Vec<Srgb<u8>> = self
            .opaque_pixels()
            .map(|p| Srgb::new(p.red & mask, p.green & mask, p.blue & mask))
            .collect();

        let unique: ColorSet = pixels.iter().map(|&p| Color::from(p)).collect();
        if unique.len() <= n.get() {
            debug!(colors = unique.len(), requested = n.get(), "image already within palette size");
            return unique;
        }

        let k = n.get().min(MAX_QUANTIZE_COLORS);
        let lab_pixels: Vec<Lab> = pixels
            .iter()
            .map(|&srgb| {
                let linear: LinSrgb<f32> = srgb.into_linear();
                linear.into_color()
            })
            .collect();
        let kmeans = get_kmeans(
            k,
            config.max_iterations,
            config.convergence,
            false,
            &lab_pixels,
            config.seed,
        );
        debug!(k, pixels = lab_pixels.len(), score = kmeans.score, "quantized in Lab space");

        let mut owned = vec![false; kmeans.centroids.len()];
        for &index in &kmeans.indices {
            owned[index as usize] = true;
        }
        kmeans
            .centroids
            .iter()
            .zip(owned)
            .filter(|(_, owned)| *owned)
            .map(|(&lab, _)| {
                let rgb_f32: Srgb<f32> = Srgb::from_linear(lab.into_color());
                Color::from(rgb_f32.into_format::<u8>())
            })
            .collect()
    }
}

impl From<RgbaImage> for Image {
    fn from(pixels: RgbaImage) -> Self {
        Self::from_rgba(pixels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nz(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    fn image_of(colors: &[[u8; 4]]) -> Image {
        let mut pixels = RgbaImage::new(colors.len() as u32, 1);
        for (x, c) in colors.iter().enumerate() {
            pixels.put_pixel(x as u32, 0, image::Rgba(*c));
        }
        Image::from_rgba(pixels)
    }

    #[test]
    fn histogram_counts_and_skips_transparent() {
        let image = image_of(&[
            [0, 0, 255, 255],
            [255, 0, 0, 255],
            [0, 0, 255, 255],
            [0, 255, 0, 0],
        ]);
        assert_eq!(
            image.histogram(),
            vec![(Color::new(255, 0, 0), 1), (Color::new(0, 0, 255), 2)]
        );
        assert_eq!(image.colors().len(), 3);
        assert_eq!(
            image.unique_colors(),
            vec![Color::new(255, 0, 0), Color::new(0, 0, 255)]
        );
    }

    #[test]
    fn quantize_to_more_colors_than_exist_is_a_no_op() {
        let image = image_of(&[
            [255, 0, 0, 255],
            [0, 255, 0, 255],
            [0, 0, 255, 255],
            [0, 0, 255, 255],
        ]);
        let colors = image.quantize(nz(5), &QuantizeConfig::default());
        let expected: ColorSet = [
            Color::new(255, 0, 0),
            Color::new(0, 255, 0),
            Color::new(0, 0, 255),
        ]
        .into_iter()
        .collect();
        assert_eq!(colors, expected);
    }

    #[test]
    fn quantize_reduces_to_requested_size() {
        let mut colors = Vec::new();
        for i in 0..20u8 {
            colors.push([240 + i % 10, i, i, 255]);
            colors.push([i, i, 240 + i % 10, 255]);
        }
        let image = image_of(&colors);
        let palette = image.quantize(nz(2), &QuantizeConfig::default());
        assert!(!palette.is_empty() && palette.len() <= 2);
    }

    #[test]
    fn tree_depth_truncates_channels() {
        let image = image_of(&[[0x13, 0x8F, 0xFF, 255], [0x10, 0x80, 0xF0, 255]]);
        let config = QuantizeConfig {
            tree_depth: 4,
            ..QuantizeConfig::default()
        };
        let colors = image.quantize(nz(4), &config);
        assert_eq!(colors.len(), 1);
        assert_eq!(colors.first(), Some(&Color::new(0x10, 0x80, 0xF0)));
    }

    #[test]
    fn garbage_bytes_are_a_read_error() {
        let err = Image::from_memory(b"not an image").unwrap_err();
        assert!(matches!(err, Error::ImageRead { .. }));
    }
}
