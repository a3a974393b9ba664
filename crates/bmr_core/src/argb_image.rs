//! Packed ARGB pixel buffers.
//!
//! Face textures, overlay layers and render targets all use [`ArgbImage`]:
//! a row-major `Vec<u32>` of `0xAARRGGBB` pixels. Decoding goes through the
//! `image` crate.

use std::path::Path;

use thiserror::Error;

use crate::blend::{composite, BlendMode};
use crate::color;
use crate::error::{CoreError, CoreResult};

/// Errors that can occur while loading an image from disk.
#[derive(Error, Debug)]
pub enum ImageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image decoding error: {0}")]
    Decode(#[from] ::image::ImageError),
}

pub type ImageResult<T> = Result<T, ImageError>;

/// A row-major buffer of packed ARGB pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArgbImage {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl ArgbImage {
    /// A fully transparent image.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, 0)
    }

    /// An image with every pixel set to `argb`.
    pub fn filled(width: u32, height: u32, argb: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![argb; width as usize * height as usize],
        }
    }

    /// Wrap an existing pixel buffer. The buffer must hold exactly
    /// `width * height` pixels.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<u32>) -> CoreResult<Self> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(CoreError::invalid(format!(
                "pixel buffer of {} does not match {}x{} image",
                pixels.len(),
                width,
                height
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn from_rgba_image(rgba: &::image::RgbaImage) -> Self {
        let (width, height) = rgba.dimensions();
        let pixels = rgba.pixels().map(|p| color::from_rgba(p.0)).collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn to_rgba_image(&self) -> ::image::RgbaImage {
        ::image::RgbaImage::from_fn(self.width, self.height, |x, y| {
            ::image::Rgba(color::to_rgba(self.pixels[self.index(x, y)]))
        })
    }

    /// Load and decode an image file. The format is detected from the
    /// file contents.
    pub fn open(path: impl AsRef<Path>) -> ImageResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let img = ::image::load_from_memory(&bytes)?;
        let image = Self::from_rgba_image(&img.to_rgba8());

        log::debug!(
            "Loaded image: {} ({}x{})",
            path.display(),
            image.width,
            image.height
        );

        Ok(image)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [u32] {
        &mut self.pixels
    }

    pub fn into_pixels(self) -> Vec<u32> {
        self.pixels
    }

    /// Raw bytes of the pixel buffer in native endianness.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Pixel at `(x, y)`, or `None` outside the image.
    pub fn get(&self, x: u32, y: u32) -> Option<u32> {
        (x < self.width && y < self.height).then(|| self.pixels[self.index(x, y)])
    }

    /// Pixel at `(x, y)`; transparent black outside the image.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> u32 {
        self.get(x, y).unwrap_or(0)
    }

    /// Set the pixel at `(x, y)`. Writes outside the image are ignored.
    pub fn set(&mut self, x: u32, y: u32, argb: u32) {
        if x < self.width && y < self.height {
            let idx = self.index(x, y);
            self.pixels[idx] = argb;
        }
    }

    /// Scale RGB of every non-transparent pixel by `ratio`, truncating.
    /// Alpha is left untouched.
    pub fn multiply_rgb(&mut self, ratio: f64) {
        let scale = |c: u32| ((c as f64 * ratio) as u32).min(255);
        for px in self.pixels.iter_mut().filter(|px| color::alpha(**px) != 0) {
            let [r, g, b, a] = color::channels(*px);
            *px = color::pack(scale(r), scale(g), scale(b), a);
        }
    }

    /// Blend `layer` (as source) over this image (as destination). Pixels
    /// outside `layer` contribute transparent black.
    pub fn composite_layer(&mut self, layer: &ArgbImage, mode: BlendMode) {
        let width = self.width;
        for (i, px) in self.pixels.iter_mut().enumerate() {
            let x = (i % width as usize) as u32;
            let y = (i / width as usize) as u32;
            *px = composite(layer.pixel(x, y), *px, mode);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pixels_checks_length() {
        assert!(ArgbImage::from_pixels(2, 2, vec![0; 4]).is_ok());

        let err = ArgbImage::from_pixels(2, 2, vec![0; 3]).unwrap_err();
        assert!(matches!(err, CoreError::InvalidArgument(_)));
    }

    #[test]
    fn test_get_and_set() {
        let mut img = ArgbImage::new(3, 2);
        img.set(2, 1, 0xFF00FF00);
        img.set(5, 5, 0xFFFFFFFF);

        assert_eq!(img.get(2, 1), Some(0xFF00FF00));
        assert_eq!(img.pixels()[5], 0xFF00FF00);
        assert_eq!(img.get(3, 0), None);
        assert_eq!(img.pixel(3, 0), 0);
    }

    #[test]
    fn test_rgba_round_trip() {
        let mut rgba = ::image::RgbaImage::new(2, 1);
        rgba.put_pixel(0, 0, ::image::Rgba([255, 0, 0, 255]));
        rgba.put_pixel(1, 0, ::image::Rgba([0, 0, 255, 128]));

        let img = ArgbImage::from_rgba_image(&rgba);
        assert_eq!(img.pixels(), &[0xFFFF0000, 0x800000FF]);
        assert_eq!(img.to_rgba_image(), rgba);
    }

    #[test]
    fn test_as_bytes() {
        let img = ArgbImage::filled(2, 2, 0x01020304);
        let bytes = img.as_bytes();

        assert_eq!(bytes.len(), 16);
        assert_eq!(&bytes[..4], &0x01020304u32.to_ne_bytes());
    }

    #[test]
    fn test_multiply_rgb_skips_transparent() {
        let mut img = ArgbImage::from_pixels(2, 1, vec![0xFF804020, 0x00804020]).unwrap();
        img.multiply_rgb(0.5);

        assert_eq!(img.pixels(), &[0xFF402010, 0x00804020]);
    }

    #[test]
    fn test_composite_layer_smaller_overlay() {
        let mut img = ArgbImage::filled(2, 1, color::pack(100, 100, 100, 255));
        let layer = ArgbImage::filled(1, 1, 0xFFFFFFFF);
        img.composite_layer(&layer, BlendMode::GLINT);

        assert_eq!(img.pixel(0, 0), 0xFFFFFFFF);
        // Outside the layer: transparent black leaves the base alone
        assert_eq!(img.pixel(1, 0), color::pack(100, 100, 100, 255));
    }

    #[test]
    fn test_open_missing_file() {
        let _ = env_logger::builder().is_test(true).try_init();
        let err = ArgbImage::open("does/not/exist.png").unwrap_err();
        assert!(matches!(err, ImageError::Io(_)));
    }

    #[test]
    fn test_open_undecodable_file() {
        let path = std::env::temp_dir().join(format!("bmr-garbage-{}.png", std::process::id()));
        std::fs::write(&path, b"definitely not an image").unwrap();

        let err = ArgbImage::open(&path).unwrap_err();
        let _ = std::fs::remove_file(&path);
        assert!(matches!(err, ImageError::Decode(_)));
    }

    #[test]
    fn test_open_png() {
        let path = std::env::temp_dir().join(format!("bmr-open-{}.png", std::process::id()));
        let img = ArgbImage::from_pixels(2, 1, vec![0xFFFF0000, 0x800000FF]).unwrap();
        img.to_rgba_image().save(&path).unwrap();

        let loaded = ArgbImage::open(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, img);
    }
}
