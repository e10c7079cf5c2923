//! Saturation/lightness bounds over a color set, and band-pass filters
//! derived from the empirical spread of a palette.

use crate::color::Color;

/// Saturation floor of the derived bands; achromatic colors never pass them.
const MIN_CHROMATIC_SATURATION: f64 = 1e-6;

/// Inclusive saturation and lightness bounds, each in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HslRange {
    pub min_saturation: f64,
    pub max_saturation: f64,
    pub min_lightness: f64,
    pub max_lightness: f64,
}

impl HslRange {
    pub const fn new(
        min_saturation: f64,
        max_saturation: f64,
        min_lightness: f64,
        max_lightness: f64,
    ) -> Self {
        Self {
            min_saturation,
            max_saturation,
            min_lightness,
            max_lightness,
        }
    }

    /// Tightest range containing every color.
    ///
    /// An empty input yields the all-zero sentinel, which is not a usable
    /// range.
    pub fn compute(colors: &[Color]) -> Self {
        if colors.is_empty() {
            return Self::new(0.0, 0.0, 0.0, 0.0);
        }
        colors.iter().fold(Self::new(1.0, 0.0, 1.0, 0.0), |range, color| {
            let (_, s, l) = color.hsl();
            Self::new(
                range.min_saturation.min(s),
                range.max_saturation.max(s),
                range.min_lightness.min(l),
                range.max_lightness.max(l),
            )
        })
    }

    pub fn contains(&self, color: &Color) -> bool {
        let (_, s, l) = color.hsl();
        (self.min_saturation..=self.max_saturation).contains(&s)
            && (self.min_lightness..=self.max_lightness).contains(&l)
    }

    /// Keep the colors inside this range, preserving input order.
    pub fn filter(&self, colors: &[Color]) -> Vec<Color> {
        colors.iter().copied().filter(|c| self.contains(c)).collect()
    }

    /// Sub-range dropping the dullest and darkest part of this spread.
    ///
    /// The saturation floor is `min(0.2, 20% into the spread)`, the
    /// lightness floor `min(0.3, 30% into the spread)`.
    pub fn bright(&self) -> Self {
        Self::new(
            f64::min(0.2, self.saturation_at(0.2)).max(MIN_CHROMATIC_SATURATION),
            1.0,
            f64::min(0.3, self.lightness_at(0.3)),
            1.0,
        )
    }

    /// Sub-range keeping the more saturated half, minus the extreme lightness tails.
    pub fn saturated(&self) -> Self {
        Self::new(
            f64::min(0.5, self.saturation_at(0.5)).max(MIN_CHROMATIC_SATURATION),
            1.0,
            f64::min(0.1, self.lightness_at(0.1)),
            f64::max(0.9, self.lightness_at(0.9)),
        )
    }

    fn saturation_at(&self, fraction: f64) -> f64 {
        self.min_saturation + (self.max_saturation - self.min_saturation) * fraction
    }

    fn lightness_at(&self, fraction: f64) -> f64 {
        self.min_lightness + (self.max_lightness - self.min_lightness) * fraction
    }
}

/// Colors passing the "bright" band of their own spread.
pub fn bright_colors(colors: &[Color]) -> Vec<Color> {
    HslRange::compute(colors).bright().filter(colors)
}

/// Colors passing the "saturated" band of their own spread.
pub fn saturated_colors(colors: &[Color]) -> Vec<Color> {
    HslRange::compute(colors).saturated().filter(colors)
}
