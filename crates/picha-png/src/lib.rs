//! A png decoder and encoder
//!
//! This features a simple PNG reader and writer in Rust which
//! handles a focused subset of ISO/IEC 15948:2003 (E), eight bit
//! RGB images whose pixel data travels in stored deflate blocks
//!
//! # Features
//! - Reconstruction of all five scanline filters
//! - Chunk level crc checks and zlib adler32 checks, both can be
//!   turned off from decoder options
//! - An encoder whose output any conforming PNG reader accepts
//!
//! # Usage
//! Decoding to raw bytes, pixels come back as packed RGB triples,
//! one byte per sample
//!
//!```no_run
//! use picha_png::PngDecoder;
//! let mut decoder = PngDecoder::new(&[]);
//!
//! let pixels = decoder.decode_raw();
//! ```
//!
//! Encoding raw bytes into a PNG file
//!
//!```no_run
//! use picha_core::bit_depth::BitDepth;
//! use picha_core::colorspace::ColorSpace;
//! use picha_core::options::EncoderOptions;
//! use picha_png::PngEncoder;
//!
//! let pixels = [0; 30];
//! let options = EncoderOptions::new(5, 2, ColorSpace::RGB, BitDepth::Eight);
//!
//! let png_bytes = PngEncoder::new(&pixels, options).encode().unwrap();
//! ```
//!
//! # Extracting metadata
//!
//! Once headers have been decoded, image metadata can be accessed
//! via the [`get_info()`](PngDecoder::get_info) method
//!
//! # Alternatives
//! - [png](https://crates.io/crates/png) crate

pub use decoder::{PngDecoder, PngInfo};
pub use encoder::PngEncoder;
pub use enums::PngColor;
pub use picha_core;

mod constants;
mod crc;
mod decoder;
mod encoder;
mod enums;
pub mod error;
mod filters;
mod headers;
mod zlib;
