//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::path::PathBuf;

use image::{Rgba, RgbaImage};
use palette_tools::{Color, Image};
use tempfile::TempDir;

pub const RED: Color = Color::new(255, 0, 0);
pub const GREEN: Color = Color::new(0, 255, 0);
pub const BLUE: Color = Color::new(0, 0, 255);

/// A one-row image with one pixel per color, in order.
pub fn row_of(colors: &[Color]) -> Image {
    let mut pixels = RgbaImage::new(colors.len() as u32, 1);
    for (x, color) in colors.iter().enumerate() {
        pixels.put_pixel(x as u32, 0, color.to_rgba());
    }
    Image::from_rgba(pixels)
}

/// A square image split into equal vertical bands of the given colors.
pub fn banded(colors: &[Color], band: u32) -> RgbaImage {
    let width = band * colors.len() as u32;
    RgbaImage::from_fn(width, band, |x, _| colors[(x / band) as usize].to_rgba())
}

pub fn transparent() -> Rgba<u8> {
    Rgba([0, 0, 0, 0])
}

/// A temp directory plus a path inside it; the directory lives as long as
/// the returned guard.
pub fn temp_path(name: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join(name);
    (dir, path)
}
