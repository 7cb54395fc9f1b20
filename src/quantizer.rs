//! Production transform: palette quantization via libimagequant.
//!
//! The same engine the pngquant tool is built on, reached through the
//! `imagequant` crate instead of a vendored C binding.
//!
//! | Step | Crate / function |
//! |---|---|
//! | Decode PNG → RGBA8 | `image::load_from_memory_with_format` |
//! | Quantize + dither | `imagequant` (`set_quality`, `remapped`) |
//! | Encode 8-bit indexed PNG | `png::Encoder` (PLTE + tRNS) |
//!
//! Failures collapse to a decline at the [`PngTransform`] seam, matching the
//! boundary's binary contract; the distinguishable error variants exist only
//! inside this module.

use crate::transform::{PngTransform, Quality};
use image::ImageFormat;
use thiserror::Error;

#[derive(Error, Debug)]
enum QuantError {
    #[error("PNG decode failed: {0}")]
    Decode(#[from] image::ImageError),
    #[error("quantization failed: {0}")]
    Quantize(#[from] imagequant::Error),
    #[error("indexed PNG encode failed: {0}")]
    Encode(#[from] png::EncodingError),
}

/// libimagequant-backed [`PngTransform`].
///
/// Stateless across calls; a single instance can serve concurrent workers.
pub struct QuantTransform {
    speed: i32,
    dithering: f32,
}

impl QuantTransform {
    /// Default tuning: speed 4 (pngquant's default), full dithering.
    pub fn new() -> Self {
        Self {
            speed: 4,
            dithering: 1.0,
        }
    }
}

impl Default for QuantTransform {
    fn default() -> Self {
        Self::new()
    }
}

impl PngTransform for QuantTransform {
    fn transform(&self, png: &[u8], quality: Quality) -> Option<Vec<u8>> {
        quantize(png, quality, self.speed, self.dithering).ok()
    }
}

fn quantize(data: &[u8], quality: Quality, speed: i32, dithering: f32) -> Result<Vec<u8>, QuantError> {
    let decoded = image::load_from_memory_with_format(data, ImageFormat::Png)?.to_rgba8();
    let (width, height) = decoded.dimensions();

    let mut attrs = imagequant::new();
    attrs.set_speed(speed)?;
    // imagequant rejects targets above 100, so the range is enforced at its
    // API edge. Not validation on our part — upstream layers pass quality
    // through untouched.
    attrs.set_quality(0, quality.value().clamp(0, 100) as u8)?;

    let pixels: Vec<imagequant::RGBA> = decoded
        .pixels()
        .map(|p| imagequant::RGBA::new(p[0], p[1], p[2], p[3]))
        .collect();
    let mut img = attrs.new_image(pixels, width as usize, height as usize, 0.0)?;

    let mut res = attrs.quantize(&mut img)?;
    res.set_dithering_level(dithering)?;
    let (palette, indexed) = res.remapped(&mut img)?;

    encode_indexed(&palette, &indexed, width, height)
}

/// Write an 8-bit indexed PNG with the palette in PLTE and alpha in tRNS.
fn encode_indexed(
    palette: &[imagequant::RGBA],
    indexed: &[u8],
    width: u32,
    height: u32,
) -> Result<Vec<u8>, QuantError> {
    let mut plte = Vec::with_capacity(palette.len() * 3);
    let mut trns = Vec::with_capacity(palette.len());
    for color in palette {
        plte.extend_from_slice(&[color.r, color.g, color.b]);
        trns.push(color.a);
    }

    let mut out = Vec::new();
    let mut encoder = png::Encoder::new(&mut out, width, height);
    encoder.set_color(png::ColorType::Indexed);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_palette(plte);
    encoder.set_trns(trns);
    encoder.set_compression(png::Compression::Best);

    let mut writer = encoder.write_header()?;
    writer.write_image_data(indexed)?;
    writer.finish()?;

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, RgbaImage};
    use std::io::Cursor;

    /// PNG-encode a synthetic gradient of the given dimensions.
    fn gradient_png(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_fn(width, height, |x, y| {
            image::Rgba([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8, 255])
        });
        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn output_decodes_as_png_with_same_dimensions() {
        let source = gradient_png(32, 24);
        let transform = QuantTransform::new();

        let result = transform.transform(&source, Quality(30)).unwrap();
        assert!(!result.is_empty());

        let decoded = image::load_from_memory_with_format(&result, ImageFormat::Png).unwrap();
        assert_eq!(decoded.width(), 32);
        assert_eq!(decoded.height(), 24);
    }

    #[test]
    fn quantized_gradient_is_smaller_than_source() {
        // Large enough that the 8-bit palette always beats RGBA.
        let source = gradient_png(128, 128);
        let transform = QuantTransform::new();

        let result = transform.transform(&source, Quality(30)).unwrap();
        assert!(result.len() <= source.len());
    }

    #[test]
    fn boundary_qualities_are_accepted() {
        let source = gradient_png(16, 16);
        let transform = QuantTransform::new();

        assert!(transform.transform(&source, Quality(0)).is_some());
        assert!(transform.transform(&source, Quality(100)).is_some());
    }

    #[test]
    fn garbage_input_declines() {
        let transform = QuantTransform::new();
        assert_eq!(transform.transform(b"not a png", Quality(30)), None);
    }

    #[test]
    fn empty_input_declines() {
        let transform = QuantTransform::new();
        assert_eq!(transform.transform(b"", Quality(30)), None);
    }

    #[test]
    fn alpha_survives_the_palette() {
        let img = RgbaImage::from_fn(20, 20, |x, _| {
            if x < 10 {
                image::Rgba([200, 40, 40, 255])
            } else {
                image::Rgba([0, 0, 0, 0])
            }
        });
        let mut source = Vec::new();
        DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut source), ImageFormat::Png)
            .unwrap();

        let transform = QuantTransform::new();
        let result = transform.transform(&source, Quality(80)).unwrap();

        let decoded = image::load_from_memory_with_format(&result, ImageFormat::Png)
            .unwrap()
            .to_rgba8();
        assert_eq!(decoded.get_pixel(15, 10)[3], 0);
        assert_eq!(decoded.get_pixel(5, 10)[3], 255);
    }
}
