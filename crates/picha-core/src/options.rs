//! Decoder and Encoder Options
//!
//! This module exposes structs for which all implemented
//! codecs get shared options for decoding and encoding
//!
//! All supported options are put into one struct to allow for
//! global configuration, e.g the same `DecoderOptions` can be
//! reused for every image decoded by a program

pub use decoder::DecoderOptions;
pub use encoder::EncoderOptions;

mod decoder;
mod encoder;
