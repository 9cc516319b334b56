/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Errors possible during image handling
use std::fmt::{Debug, Display, Formatter};

use picha_png::error::{PngDecodeErrors, PngEncodeErrors};

/// All possible image errors that can occur.
///
/// Contains decoding, encoding and file handling
/// errors possible
pub enum ImgErrors {
    PngDecodeErrors(PngDecodeErrors),
    PngEncodeErrors(PngEncodeErrors),
    IoErrors(std::io::Error),
    GenericString(String),
    GenericStr(&'static str)
}

impl Debug for ImgErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PngDecodeErrors(ref error) => {
                writeln!(f, "Png decoding failed:{error:?}")
            }
            Self::PngEncodeErrors(ref error) => {
                writeln!(f, "Png encoding failed:{error:?}")
            }
            Self::IoErrors(ref error) => {
                writeln!(f, "Io error:{error:?}")
            }
            Self::GenericString(err) => {
                writeln!(f, "{err}")
            }
            Self::GenericStr(err) => {
                writeln!(f, "{err}")
            }
        }
    }
}

impl Display for ImgErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{self:?}")
    }
}

impl std::error::Error for ImgErrors {}

impl From<PngDecodeErrors> for ImgErrors {
    fn from(from: PngDecodeErrors) -> Self {
        ImgErrors::PngDecodeErrors(from)
    }
}

impl From<PngEncodeErrors> for ImgErrors {
    fn from(from: PngEncodeErrors) -> Self {
        ImgErrors::PngEncodeErrors(from)
    }
}

impl From<std::io::Error> for ImgErrors {
    fn from(from: std::io::Error) -> Self {
        ImgErrors::IoErrors(from)
    }
}

impl From<String> for ImgErrors {
    fn from(s: String) -> ImgErrors {
        ImgErrors::GenericString(s)
    }
}

impl From<&'static str> for ImgErrors {
    fn from(s: &'static str) -> ImgErrors {
        ImgErrors::GenericStr(s)
    }
}
