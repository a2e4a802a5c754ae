use anyhow::{Context, Result};
use image::{ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;

pub const PIXEL_CONTENT_TYPE: &str = "image/png";

/// Encode the 1x1 fully transparent tracking pixel as PNG
pub fn transparent_pixel_png() -> Result<Vec<u8>> {
    let img = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 0]));

    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png)
        .context("Failed to encode tracking pixel")?;

    Ok(buf.into_inner())
}
