//! A simple implementation of a bytestream reader
//! and writer
//!
//! The readers and writers here are endian aware and
//! always bounds checked, hence are useful for a lot of
//! image readers and writers. They are put here to
//! minimize code duplication across the format crates.

pub use reader::PByteReader;
pub use writer::PByteWriter;

mod reader;
mod writer;
