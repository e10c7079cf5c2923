//! Images made of solid color stripes, one stripe per distinct color.

use std::fmt;
use std::path::Path;

use image::RgbaImage;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::codec::Image;
use crate::collection::{ColorCollection, ColorSet};
use crate::color::Color;
use crate::config::StripesConfig;
use crate::error::{Error, Result};

/// Direction the stripes run in. Unrecognized names parse to
/// [`Orientation::Unknown`], which cannot be rendered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Stripes side by side, left to right.
    #[default]
    Vertical,
    /// Stripes stacked top to bottom.
    Horizontal,
    #[serde(skip)]
    Unknown,
}

impl Orientation {
    pub fn parse(name: &str) -> Self {
        match name {
            "vertical" => Orientation::Vertical,
            "horizontal" => Orientation::Horizontal,
            _ => Orientation::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Vertical => "vertical",
            Orientation::Horizontal => "horizontal",
            Orientation::Unknown => "unknown",
        }
    }

    pub fn is_valid(&self) -> bool {
        *self != Orientation::Unknown
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stripes image under construction. Colors are kept in HSL order and
/// duplicates collapse into one stripe.
#[derive(Clone, Debug)]
pub struct StripesImage {
    colors: ColorSet,
    width: u32,
    length: Option<u32>,
    orientation: Orientation,
}

impl Default for StripesImage {
    fn default() -> Self {
        Self::new(&StripesConfig::default())
    }
}

impl StripesImage {
    pub fn new(config: &StripesConfig) -> Self {
        Self {
            colors: ColorSet::new(),
            width: config.width,
            length: config.length,
            orientation: config.orientation,
        }
    }

    pub fn insert_color(&mut self, color: Color) -> bool {
        self.colors.insert(color)
    }

    pub fn set_width(&mut self, width: u32) {
        self.width = width;
    }

    pub fn set_length(&mut self, length: u32) {
        self.length = Some(length);
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

    pub fn colors(&self) -> &ColorSet {
        &self.colors
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Output size as `(width, height)`.
    pub fn dimensions(&self) -> Result<(u32, u32)> {
        if self.colors.is_empty() {
            return Err(Error::invalid("stripe colors", "none given"));
        }
        if self.width == 0 {
            return Err(Error::invalid("stripe width", self.width));
        }
        let count = self.colors.len() as u32;
        let length = match self.length {
            Some(0) => return Err(Error::invalid("stripe length", 0)),
            Some(length) => length,
            None => StripesConfig::LENGTH_PER_COLOR
                .checked_mul(count)
                .ok_or_else(|| Error::invalid("stripe length", "too large"))?,
        };
        let across = self
            .width
            .checked_mul(count)
            .ok_or_else(|| Error::invalid("image size", "too large"))?;

        match self.orientation {
            Orientation::Vertical => Ok((across, length)),
            Orientation::Horizontal => Ok((length, across)),
            Orientation::Unknown => Err(Error::invalid(
                "orientation",
                "must be either \"vertical\" or \"horizontal\"",
            )),
        }
    }

    pub fn render(&self) -> Result<Image> {
        let (width, height) = self.dimensions()?;
        let stripes: Vec<_> = self.colors.iter().map(Color::to_rgba).collect();
        let pixels = RgbaImage::from_fn(width, height, |x, y| {
            let along = match self.orientation {
                Orientation::Horizontal => y,
                _ => x,
            };
            stripes[(along / self.width) as usize]
        });
        Ok(Image::from_rgba(pixels))
    }

    /// Render and write to `path`, returning a one-line summary.
    pub fn export(&self, path: &Path) -> Result<String> {
        let image = self.render()?;
        image.save(path)?;
        info!(path = %path.display(), stripes = self.colors.len(), "wrote stripes image");
        Ok(format!(
            "Wrote {}x{} image to {} with colors: {}",
            image.width(),
            image.height(),
            path.display(),
            self.colors.to_hex_string(", ")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::new(255, 0, 0);
    const BLUE: Color = Color::new(0, 0, 255);

    fn red_and_blue() -> StripesImage {
        let mut stripes = StripesImage::default();
        stripes.insert_color(BLUE);
        stripes.insert_color(RED);
        stripes.insert_color(RED);
        stripes
    }

    #[test]
    fn default_vertical_dimensions() {
        assert_eq!(red_and_blue().dimensions().unwrap(), (200, 200));
    }

    #[test]
    fn horizontal_swaps_axes() {
        let mut stripes = red_and_blue();
        stripes.set_orientation(Orientation::Horizontal);
        stripes.set_width(10);
        stripes.set_length(30);
        assert_eq!(stripes.dimensions().unwrap(), (30, 20));

        let image = stripes.render().unwrap();
        assert_eq!(*image.as_rgba().get_pixel(29, 9), RED.to_rgba());
        assert_eq!(*image.as_rgba().get_pixel(0, 10), BLUE.to_rgba());
    }

    #[test]
    fn vertical_stripes_follow_hsl_order() {
        let mut stripes = red_and_blue();
        stripes.set_width(4);
        stripes.set_length(2);
        let image = stripes.render().unwrap();
        assert_eq!(*image.as_rgba().get_pixel(3, 1), RED.to_rgba());
        assert_eq!(*image.as_rgba().get_pixel(4, 0), BLUE.to_rgba());
    }

    #[test]
    fn rejects_bad_configuration() {
        assert!(StripesImage::default().render().is_err());

        let mut stripes = red_and_blue();
        stripes.set_width(0);
        assert!(stripes.dimensions().is_err());

        let mut stripes = red_and_blue();
        stripes.set_length(0);
        assert!(stripes.dimensions().is_err());

        let mut stripes = red_and_blue();
        stripes.set_orientation(Orientation::parse("diagonal"));
        assert!(stripes.dimensions().is_err());
    }

    #[test]
    fn orientation_names() {
        assert_eq!(Orientation::parse("vertical"), Orientation::Vertical);
        assert_eq!(Orientation::parse("horizontal"), Orientation::Horizontal);
        assert_eq!(Orientation::parse("Vertical"), Orientation::Unknown);
        assert!(!Orientation::Unknown.is_valid());
    }
}
