/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The image struct and the file api built on top of it
use std::path::Path;

use log::warn;
use picha_core::bit_depth::BitDepth;
use picha_core::colorspace::ColorSpace;
use picha_core::options::{DecoderOptions, EncoderOptions};
use picha_png::{PngDecoder, PngEncoder};

use crate::color::RgbColor;
use crate::errors::ImgErrors;
use crate::flip::vertical_flip;

/// A decoded image held as one contiguous pixel buffer
///
/// Pixels are stored row major, top row first, the pixel at
/// `(x, y)` sits at index `y * width + x` of [pixels](Self::pixels)
///
/// An image with zero width and height holds no valid picture,
/// that state is what [new](Self::new) returns and what any
/// failed in place decode resets to. Callers must treat zero
/// dimensions as the no image signal and not as an empty image
pub struct PngImage {
    width:  usize,
    height: usize,
    pixels: Vec<u8>
}

impl PngImage {
    /// Create an empty image with zero dimensions
    pub const fn new() -> PngImage {
        PngImage {
            width:  0,
            height: 0,
            pixels: Vec::new()
        }
    }

    /// Create an image filled with a single color
    pub fn fill(pixel: RgbColor, width: usize, height: usize) -> PngImage {
        let length = width * height * ColorSpace::RGB.num_components();

        let mut image = PngImage {
            width,
            height,
            pixels: vec![0; length]
        };

        for px in image.pixels_mut() {
            *px = pixel;
        }

        image
    }

    /// Read a png file from the file system
    ///
    /// A shorthand for [open_with_options](Self::open_with_options)
    /// called with default options
    pub fn open<P: AsRef<Path>>(file: P) -> Result<PngImage, ImgErrors> {
        Self::open_with_options(file, DecoderOptions::default())
    }

    /// Read a png file from the file system with custom
    /// decoder options
    ///
    /// # Example
    /// Decode a file with strict mode enabled
    ///
    /// ```no_run
    /// use picha_core::options::DecoderOptions;
    /// use picha_image::PngImage;
    ///
    /// let options = DecoderOptions::default().set_strict_mode(true);
    /// let image = PngImage::open_with_options("/a/file.png", options).unwrap();
    /// ```
    pub fn open_with_options<P: AsRef<Path>>(
        file: P, options: DecoderOptions
    ) -> Result<PngImage, ImgErrors> {
        let contents = std::fs::read(file)?;

        Self::read(&contents, options)
    }

    /// Decode a png file already loaded into memory
    pub fn read(data: &[u8], options: DecoderOptions) -> Result<PngImage, ImgErrors> {
        let mut image = PngImage::new();
        image.decode_from_memory(data, options)?;

        Ok(image)
    }

    /// Decode a png file held in memory, replacing the current
    /// contents of this image
    ///
    /// On any failure the image resets to the empty zero by zero
    /// state before the error is returned, a caller can never
    /// observe a half decoded picture
    pub fn decode_from_memory(
        &mut self, data: &[u8], options: DecoderOptions
    ) -> Result<(), ImgErrors> {
        match self.decode_inner(data, options) {
            Ok(()) => Ok(()),
            Err(err) => {
                warn!("Decode failed, resetting the image to the empty state");

                self.width = 0;
                self.height = 0;
                self.pixels = Vec::new();

                Err(err)
            }
        }
    }

    fn decode_inner(&mut self, data: &[u8], options: DecoderOptions) -> Result<(), ImgErrors> {
        let mut decoder = PngDecoder::new_with_options(data, options);

        decoder.decode_headers()?;

        // it is safe to unwrap the getters below, the headers
        // were just decoded
        let (width, height) = decoder.get_dimensions().unwrap();
        let colorspace = decoder.get_colorspace().unwrap();

        let mut pixels = vec![0; width * height * colorspace.num_components()];

        decoder.decode_into(&mut pixels)?;

        self.width = width;
        self.height = height;
        self.pixels = pixels;

        Ok(())
    }

    /// Encode the image as a png file returning the raw bytes
    pub fn write_to_memory(&self) -> Result<Vec<u8>, ImgErrors> {
        let options = EncoderOptions::new(
            self.width,
            self.height,
            ColorSpace::RGB,
            BitDepth::Eight
        );

        let contents = PngEncoder::new(&self.pixels, options).encode()?;

        Ok(contents)
    }

    /// Encode the image and write it to the file system
    ///
    /// Saving an image with zero dimensions is an error since
    /// those signal no valid picture is loaded
    pub fn save<P: AsRef<Path>>(&self, file: P) -> Result<(), ImgErrors> {
        let contents = self.write_to_memory()?;

        std::fs::write(file, contents)?;

        Ok(())
    }

    /// Return the image width in pixels
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Return the image height in pixels
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Return the image width and height in one call
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Return the color of the pixel at `(x, y)` counted from
    /// the top left corner
    ///
    /// Returns `None` when the coordinates fall outside the
    /// image
    pub fn get_pixel(&self, x: usize, y: usize) -> Option<RgbColor> {
        if x >= self.width || y >= self.height {
            return None;
        }

        Some(self.pixels()[y * self.width + x])
    }

    /// Set the color of the pixel at `(x, y)` counted from the
    /// top left corner
    ///
    /// Writes outside the image are silently ignored
    pub fn set_pixel(&mut self, x: usize, y: usize, pixel: RgbColor) {
        if x >= self.width || y >= self.height {
            return;
        }
        let width = self.width;

        self.pixels_mut()[y * width + x] = pixel;
    }

    /// View the pixel buffer as a slice of color values
    pub fn pixels(&self) -> &[RgbColor] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// View the pixel buffer as a mutable slice of color values
    pub fn pixels_mut(&mut self) -> &mut [RgbColor] {
        bytemuck::cast_slice_mut(&mut self.pixels)
    }

    /// Reverse the row order of the image in place
    ///
    /// Useful for renderers that rasterize bottom row first,
    /// since the format stores the top row first
    pub fn flip_vertically(&mut self) {
        let width = self.width;

        vertical_flip(self.pixels_mut(), width);
    }
}

impl Default for PngImage {
    fn default() -> Self {
        Self::new()
    }
}
