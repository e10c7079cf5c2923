//! Renders the saturation/lightness plane of a single hue.

use std::fmt;
use std::str::FromStr;

use image::RgbaImage;
use tracing::{debug, warn};

use crate::codec::Image;
use crate::color::Color;
use crate::error::{Error, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WheelKind {
    /// Saturation grows left to right, lightness bottom to top.
    HslHue,
    /// [`WheelKind::HslHue`] on the right half, mirrored by the
    /// complementary hue on the left half.
    HslHueMirror,
}

impl WheelKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WheelKind::HslHue => "hsl-hue",
            WheelKind::HslHueMirror => "hsl-hue-mirror",
        }
    }
}

impl FromStr for WheelKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "hsl-hue" => Ok(WheelKind::HslHue),
            "hsl-hue-mirror" => Ok(WheelKind::HslHueMirror),
            other => Err(Error::invalid("color wheel type", other)),
        }
    }
}

impl fmt::Display for WheelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hue the wheel is built around. A base color with no saturation or no
/// lightness carries no hue, so red is used instead.
pub fn base_hue(base: &Color) -> f64 {
    let (hue, saturation, lightness) = base.hsl();
    if saturation == 0.0 || lightness == 0.0 {
        warn!(
            saturation,
            lightness, "base color is indistinguishable from grey; guessing a red hue"
        );
        return 0.0;
    }
    hue
}

pub fn render_wheel(kind: WheelKind, base: &Color, height: u32) -> Result<Image> {
    render_hue_wheel(kind, base_hue(base), height)
}

/// Render the wheel of `hue`, a fraction of a turn as returned by [`base_hue`].
pub fn render_hue_wheel(kind: WheelKind, hue: f64, height: u32) -> Result<Image> {
    if height == 0 {
        return Err(Error::invalid("height", height));
    }
    let complement = (hue + 0.5).fract();
    let width = match kind {
        WheelKind::HslHue => height,
        WheelKind::HslHueMirror => height
            .checked_mul(2)
            .ok_or_else(|| Error::invalid("height", height))?,
    };
    debug!(%kind, degrees = hue * 360.0, width, height, "rendering color wheel");

    let h = height as f64;
    let pixels = RgbaImage::from_fn(width, height, |x, y| {
        let lightness = (h - y as f64) / h;
        let x = x as f64;
        let color = match kind {
            WheelKind::HslHue => Color::from_hsl(hue, x / width as f64, lightness),
            WheelKind::HslHueMirror if x >= h => Color::from_hsl(hue, (x - h) / h, lightness),
            WheelKind::HslHueMirror => Color::from_hsl(complement, (h - x) / h, lightness),
        };
        color.to_rgba()
    });
    Ok(Image::from_rgba(pixels))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_kinds() {
        assert_eq!("hsl-hue".parse::<WheelKind>().unwrap(), WheelKind::HslHue);
        assert_eq!(
            "hsl-hue-mirror".parse::<WheelKind>().unwrap(),
            WheelKind::HslHueMirror
        );
        assert!("rgb".parse::<WheelKind>().is_err());
    }

    #[test]
    fn grey_base_falls_back_to_red() {
        assert_eq!(base_hue(&Color::new(128, 128, 128)), 0.0);
        assert_eq!(base_hue(&Color::new(0, 0, 0)), 0.0);
        assert!((base_hue(&Color::new(0, 0, 255)) - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn plain_wheel_layout() {
        let image = render_wheel(WheelKind::HslHue, &Color::new(255, 0, 0), 10).unwrap();
        assert_eq!((image.width(), image.height()), (10, 10));
        let pixels = image.as_rgba();
        // Top row is white, the left column carries no saturation.
        assert_eq!(pixels.get_pixel(5, 0).0, [255, 255, 255, 255]);
        let left = pixels.get_pixel(0, 5).0;
        assert!(left[0] == left[1] && left[1] == left[2]);
        let right = pixels.get_pixel(9, 5).0;
        assert!(right[0] > right[1] && right[1] == right[2]);
    }

    #[test]
    fn mirror_shows_the_complement_on_the_left() {
        let image = render_wheel(WheelKind::HslHueMirror, &Color::new(255, 0, 0), 8).unwrap();
        assert_eq!((image.width(), image.height()), (16, 8));
        let left = image.as_rgba().get_pixel(0, 4).0;
        assert!(left[0] < left[1] && left[1] == left[2]);
        let right = image.as_rgba().get_pixel(15, 4).0;
        assert!(right[0] > right[1] && right[1] == right[2]);
    }

    #[test]
    fn hue_wheel_matches_base_color_wheel() {
        let blue = Color::new(0, 0, 255);
        let from_color = render_wheel(WheelKind::HslHueMirror, &blue, 6).unwrap();
        let from_hue = render_hue_wheel(WheelKind::HslHueMirror, base_hue(&blue), 6).unwrap();
        assert_eq!(from_color.as_rgba(), from_hue.as_rgba());
    }

    #[test]
    fn zero_height_is_rejected() {
        assert!(render_wheel(WheelKind::HslHue, &Color::new(255, 0, 0), 0).is_err());
    }
}
