//! Core routines shared by the `picha` family of crates
//!
//! This crate provides a set of small utilities shared
//! by the decoder and encoder crates under the `picha` umbrella
//!
//! It currently contains
//!
//! - A bytestream reader and writer with endian aware reads and writes
//! - Colorspace and bit depth information shared by images
//! - Image decoder and encoder options

pub mod bit_depth;
pub mod bytestream;
pub mod colorspace;
pub mod options;
