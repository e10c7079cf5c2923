//! Colors evenly distributed around the hue circle, used as k-means seeds.

use std::num::NonZeroUsize;

use crate::color::{Color, Hsl};

const SATURATION: f64 = 1.0;
const LIGHTNESS: f64 = 0.5;

/// `n` fully saturated, mid-lightness HSL values with hues `i / n`, starting at red.
pub fn hue_spread_hsl(n: NonZeroUsize) -> Vec<Hsl> {
    let n = n.get();
    (0..n)
        .map(|i| Hsl::new(360.0 * i as f64 / n as f64, SATURATION, LIGHTNESS))
        .collect()
}

/// [`hue_spread_hsl`] rounded to 8-bit RGB colors.
pub fn hue_spread(n: NonZeroUsize) -> Vec<Color> {
    let n_f = n.get() as f64;
    (0..n.get())
        .map(|i| Color::from_hsl(i as f64 / n_f, SATURATION, LIGHTNESS))
        .collect()
}
