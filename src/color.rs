//! Immutable RGB color value with an HSL-derived total order.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use palette::{FromColor, IntoColor, Srgb};

use crate::error::Error;

/// HSL with `f64` components in the sRGB standard.
pub type Hsl = palette::Hsl<palette::encoding::Srgb, f64>;

/// An 8-bit RGB color with an optional alpha channel.
///
/// Equality is channel-wise. Ordering follows the HSL projection: hue
/// first, then saturation, then lightness, each as a value in `[0, 1]`.
/// Raw channels only break ties between colors whose projections coincide
/// (which keeps `Ord` consistent with `Eq`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    red: u8,
    green: u8,
    blue: u8,
    alpha: Option<u8>,
}

impl Color {
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha: None,
        }
    }

    pub const fn with_alpha(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha: Some(alpha),
        }
    }

    /// Build a color from HSL components, each in `[0, 1]` (hue as a fraction of a turn).
    pub fn from_hsl(hue: f64, saturation: f64, lightness: f64) -> Self {
        let hsl = Hsl::new(hue * 360.0, saturation, lightness);
        let rgb: Srgb<u8> = Srgb::<f64>::from_color(hsl).into_format();
        rgb.into()
    }

    pub fn red(&self) -> u8 {
        self.red
    }

    pub fn green(&self) -> u8 {
        self.green
    }

    pub fn blue(&self) -> u8 {
        self.blue
    }

    pub fn alpha(&self) -> Option<u8> {
        self.alpha
    }

    /// The RGB channels as `f64` coordinates, as used for clustering.
    pub fn rgb_point(&self) -> [f64; 3] {
        [self.red as f64, self.green as f64, self.blue as f64]
    }

    /// `(hue, saturation, lightness)`, each in `[0, 1]`.
    pub fn hsl(&self) -> (f64, f64, f64) {
        let rgb: Srgb<f64> = Srgb::new(self.red, self.green, self.blue).into_format();
        let hsl: Hsl = rgb.into_color();
        let hue = hsl.hue.into_positive_degrees() / 360.0;
        (if hue >= 1.0 { 0.0 } else { hue }, hsl.saturation, hsl.lightness)
    }

    pub fn hue(&self) -> f64 {
        self.hsl().0
    }

    pub fn saturation(&self) -> f64 {
        self.hsl().1
    }

    pub fn lightness(&self) -> f64 {
        self.hsl().2
    }

    /// `#RRGGBB` with uppercase digits; alpha is never written.
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
    }

    /// RGBA pixel; a missing alpha is fully opaque.
    pub fn to_rgba(&self) -> image::Rgba<u8> {
        image::Rgba([self.red, self.green, self.blue, self.alpha.unwrap_or(u8::MAX)])
    }
}

impl Ord for Color {
    fn cmp(&self, other: &Self) -> Ordering {
        let (h1, s1, l1) = self.hsl();
        let (h2, s2, l2) = other.hsl();
        h1.total_cmp(&h2)
            .then_with(|| s1.total_cmp(&s2))
            .then_with(|| l1.total_cmp(&l2))
            .then_with(|| {
                (self.red, self.green, self.blue, self.alpha)
                    .cmp(&(other.red, other.green, other.blue, other.alpha))
            })
    }
}

impl PartialOrd for Color {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<Srgb<u8>> for Color {
    fn from(rgb: Srgb<u8>) -> Self {
        Self::new(rgb.red, rgb.green, rgb.blue)
    }
}

impl FromStr for Color {
    type Err = Error;

    /// Accepts CSS color names, `#RGB`, `#RRGGBB` and `#RRGGBBAA` (the `#` is optional).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(named) = palette::named::from_str(&trimmed.to_ascii_lowercase()) {
            return Ok(named.into());
        }

        let invalid = || Error::InvalidColor(s.to_string());
        let hex = trimmed.trim_start_matches('#');
        if hex.len() == 8 {
            let channel = |i: usize| {
                hex.get(i..i + 2)
                    .and_then(|digits| u8::from_str_radix(digits, 16).ok())
                    .ok_or_else(invalid)
            };
            return Ok(Self::with_alpha(channel(0)?, channel(2)?, channel(4)?, channel(6)?));
        }

        hex.parse::<Srgb<u8>>().map(Self::from).map_err(|_| invalid())
    }
}
