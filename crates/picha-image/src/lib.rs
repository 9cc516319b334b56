//! A simple image api over the picha png codec
//!
//! This crate ties the decoder and encoder crates together and
//! exposes a single [`PngImage`] type which owns a contiguous
//! pixel buffer and knows how to read itself from and write
//! itself to the file system
//!
//! # Usage
//!
//! Load a file, recolor a pixel, reverse the row order and save
//! the result
//!
//! ```no_run
//! use picha_image::{PngImage, RgbColor};
//!
//! let mut image = PngImage::open("input.png").unwrap();
//!
//! image.set_pixel(0, 0, RgbColor::RED);
//! image.flip_vertically();
//!
//! image.save("output.png").unwrap();
//! ```
//!
//! Images can also be created from scratch and drawn on through
//! [`PngImage::fill`] and the pixel accessors
//!
//! ```
//! use picha_image::{PngImage, RgbColor};
//!
//! let mut image = PngImage::fill(RgbColor::BLACK, 300, 300);
//!
//! for i in 0..300 {
//!     image.set_pixel(i, i, RgbColor::WHITE);
//! }
//! ```
//!
//! An image with zero width and height holds no valid picture,
//! see [`PngImage::new`]

pub use color::RgbColor;
pub use errors::ImgErrors;
pub use image::PngImage;
pub use picha_core;
pub use picha_png;

pub mod color;
pub mod errors;
pub mod flip;
pub mod image;
