/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use core::fmt::{Debug, Display, Formatter};

use picha_core::bit_depth::BitDepth;
use picha_core::colorspace::ColorSpace;

pub use crate::zlib::DecodeErrorStatus;

/// Possible errors that may occur during decoding
pub enum PngDecodeErrors {
    /// The image does not start with the png magic bytes
    ///
    /// Indicates the file is not a png at all
    BadSignature,
    /// Generic message that does not need heap allocation
    GenericStatic(&'static str),
    /// Generic message
    Generic(String),
    /// A chunk arrived with a crc other than the one
    /// stored in the file
    ///
    /// # Arguments
    /// - 1st argument is the crc stored in the file
    /// - 2nd argument is the crc calculated from the chunk bytes
    BadCrc(u32, u32),
    /// An error occurred reconstructing pixels from the
    /// idat chunks
    ZlibDecodeErrors(DecodeErrorStatus),
    /// The image is a valid png but uses a feature
    /// this decoder does not implement
    UnsupportedImage(String),
    /// The caller provided output buffer cannot hold the
    /// whole image
    TooSmallOutput(usize, usize)
}

impl Debug for PngDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::BadSignature => writeln!(f, "Bad PNG signature, not a png"),
            Self::GenericStatic(val) => writeln!(f, "{val}"),
            Self::Generic(val) => writeln!(f, "{val}"),
            Self::BadCrc(expected, found) => writeln!(
                f,
                "CRC does not match, expected {expected} but found {found}"
            ),
            Self::ZlibDecodeErrors(err) => {
                writeln!(f, "Error decoding idat chunks {err:?}")
            }
            Self::UnsupportedImage(val) => {
                writeln!(f, "Unsupported image: {val}")
            }
            Self::TooSmallOutput(expected, found) => {
                write!(f, "Too small output, expected buffer with at least {expected} bytes but got one with {found} bytes")
            }
        }
    }
}

impl Display for PngDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{self:?}")
    }
}

impl std::error::Error for PngDecodeErrors {}

impl From<&'static str> for PngDecodeErrors {
    fn from(val: &'static str) -> Self {
        Self::GenericStatic(val)
    }
}

impl From<String> for PngDecodeErrors {
    fn from(val: String) -> Self {
        Self::Generic(val)
    }
}

impl From<DecodeErrorStatus> for PngDecodeErrors {
    fn from(val: DecodeErrorStatus) -> Self {
        Self::ZlibDecodeErrors(val)
    }
}

/// Errors encountered during encoding
pub enum PngEncodeErrors {
    /// The input buffer is smaller than the dimensions
    /// in the options imply
    ///
    /// # Arguments
    /// - 1st argument is the number of bytes we expected
    /// - 2nd argument is the number of bytes in the buffer
    TooShortInput(usize, usize),
    /// The filtered scanlines cannot fit into a single
    /// stored deflate block
    TooLargeImage(usize),
    /// Unsupported colorspace
    ///
    /// The first argument is the colorspace encountered,
    /// the second argument is the list of supported colorspaces
    UnsupportedColorspace(ColorSpace, &'static [ColorSpace]),
    /// The depth cannot be written by this encoder
    UnsupportedDepth(BitDepth),
    Generic(&'static str)
}

impl Debug for PngEncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            PngEncodeErrors::TooShortInput(expected, found) => {
                writeln!(
                    f,
                    "Too short input, expected {expected} bytes but found {found}"
                )
            }
            PngEncodeErrors::TooLargeImage(found) => {
                writeln!(
                    f,
                    "Image too large, filtered scanlines take {found} bytes but a stored deflate block can only carry 65535"
                )
            }
            PngEncodeErrors::UnsupportedColorspace(found, supported) => {
                writeln!(f, "Cannot encode image with colorspace {found:?}, supported ones are {supported:?}")
            }
            PngEncodeErrors::UnsupportedDepth(depth) => {
                writeln!(f, "Cannot encode image with depth {depth:?}, only eight bit depth is supported")
            }
            PngEncodeErrors::Generic(val) => {
                writeln!(f, "{val}")
            }
        }
    }
}

impl Display for PngEncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{self:?}")
    }
}

impl std::error::Error for PngEncodeErrors {}

impl From<&'static str> for PngEncodeErrors {
    fn from(val: &'static str) -> Self {
        Self::Generic(val)
    }
}
