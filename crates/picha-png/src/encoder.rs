/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! A PNG encoder for eight bit RGB images
//!
//! The encoder writes the minimal chunk sequence a conforming
//! reader needs, an IHDR chunk, one or more IDAT chunks and an
//! IEND chunk, with scanlines stored unfiltered inside a single
//! stored deflate block.
//!
//! Storing scanlines uncompressed caps the image sizes we can
//! write, see [`encode`](PngEncoder::encode) for the exact limit.

use picha_core::bit_depth::BitDepth;
use picha_core::bytestream::PByteWriter;
use picha_core::colorspace::ColorSpace;
use picha_core::options::EncoderOptions;

use crate::constants::{IDAT_CHUNK_SIZE, IHDR_LENGTH, MAX_STORED_BLOCK_SIZE, PNG_SIGNATURE};
use crate::decoder::PngChunk;
use crate::enums::PngChunkType;
use crate::error::PngEncodeErrors;
use crate::headers::write_chunk;
use crate::zlib::DeflateEncoder;

const SUPPORTED_COLORSPACES: [ColorSpace; 1] = [ColorSpace::RGB];

/// A PNG encoder
///
/// Writes eight bit RGB pixels as a PNG file, one byte
/// per sample, three samples per pixel.
pub struct PngEncoder<'a> {
    options: EncoderOptions,
    data:    &'a [u8]
}

impl<'a> PngEncoder<'a> {
    /// Create a new encoder which will encode the pixels
    /// in `data`
    ///
    /// `options` must describe the dimensions, depth and colorspace
    /// of the pixels, dimensions the encoder trusts when laying
    /// out scanlines
    pub fn new(data: &'a [u8], options: EncoderOptions) -> PngEncoder<'a> {
        PngEncoder { options, data }
    }

    /// Return the maximum size for which the encoder can
    /// safely write the image into
    pub fn max_size(&self) -> usize {
        let scanline_space = (self.calculate_scanline_size() + 1) * self.options.get_height();
        // zlib header, stored block preamble and the adler checksum
        let zlib_space = scanline_space + 11;
        let idat_chunks = (zlib_space / IDAT_CHUNK_SIZE) + 1;

        // signature, IHDR, the IDAT chunk overheads and IEND,
        // a chunk carries 12 bytes over its payload
        8 + (IHDR_LENGTH + 12) + zlib_space + (idat_chunks * 12) + 12
    }

    const fn calculate_scanline_size(&self) -> usize {
        self.options.get_width() * self.options.get_colorspace().num_components()
    }

    fn encode_headers(&self, writer: &mut PByteWriter) -> Result<(), PngEncodeErrors> {
        // write signature
        writer.write_u64_be_err(PNG_SIGNATURE)?;

        let mut ihdr = [0_u8; IHDR_LENGTH];
        {
            let mut header_writer = PByteWriter::new(&mut ihdr);

            // width and height
            header_writer.write_u32_be_err(self.options.get_width() as u32)?;
            header_writer.write_u32_be_err(self.options.get_height() as u32)?;
            // depth
            header_writer.write_u8_err(self.options.get_depth().bit_size() as u8)?;

            let color = match self.options.get_colorspace() {
                ColorSpace::RGB => 2,
                // encode validated the colorspace before coming here
                _ => unreachable!("Unsupported colorspace past validation")
            };
            header_writer.write_u8_err(color)?;

            // compression, filter and interlace methods, all
            // fixed to zero
            header_writer.write_u8_err(0)?;
            header_writer.write_u8_err(0)?;
            header_writer.write_u8_err(0)?;

            debug_assert_eq!(header_writer.position(), IHDR_LENGTH);
        }

        let header = PngChunk {
            length:     IHDR_LENGTH,
            chunk_type: PngChunkType::IHDR,
            chunk:      *b"IHDR"
        };

        write_chunk(&header, &ihdr, writer)
    }

    /// Copy scanlines into their filtered representation
    ///
    /// Every scanline gets a leading filter byte of zero, the
    /// `None` filter, pixel bytes pass through untouched
    fn filter_scanlines(&self, scanline_length: usize) -> Vec<u8> {
        let scanline_size = self.calculate_scanline_size();

        let mut filter_scanline = vec![0; scanline_length];

        for (filter_s, current) in filter_scanline
            .chunks_exact_mut(scanline_size + 1)
            .zip(self.data.chunks_exact(scanline_size))
        {
            // first byte stays zero, the filter tag
            filter_s[1..].copy_from_slice(current);
        }
        filter_scanline
    }

    fn write_idat_chunks(
        &self, encoded_chunks: &[u8], writer: &mut PByteWriter
    ) -> Result<(), PngEncodeErrors> {
        debug_assert!(!encoded_chunks.is_empty());
        // Most decoders love data in 8KB chunks, since
        // probably libpng does that by default
        // so let's try emulating that
        for chunk in encoded_chunks.chunks(IDAT_CHUNK_SIZE) {
            let chunk_type = PngChunk {
                length:     chunk.len(),
                chunk_type: PngChunkType::IDAT,
                chunk:      *b"IDAT"
            };
            write_chunk(&chunk_type, chunk, writer)?;
        }
        Ok(())
    }

    /// Encode the pixels handed to [`new`](PngEncoder::new) as
    /// a complete PNG file
    ///
    /// The filtered scanlines must fit in one stored deflate
    /// block, so `(width * 3 + 1) * height` cannot go above
    /// 65535 bytes, larger images return
    /// [`TooLargeImage`](PngEncodeErrors::TooLargeImage)
    pub fn encode(&self) -> Result<Vec<u8>, PngEncodeErrors> {
        let options = &self.options;

        if options.get_depth() != BitDepth::Eight {
            return Err(PngEncodeErrors::UnsupportedDepth(options.get_depth()));
        }
        if options.get_colorspace() != ColorSpace::RGB {
            return Err(PngEncodeErrors::UnsupportedColorspace(
                options.get_colorspace(),
                &SUPPORTED_COLORSPACES
            ));
        }
        if options.get_width() == 0 || options.get_height() == 0 {
            return Err(PngEncodeErrors::Generic("Width or height cannot be zero"));
        }

        let expected_data_size = options
            .get_width()
            .checked_mul(options.get_height())
            .ok_or(PngEncodeErrors::Generic("Overflow"))?
            .checked_mul(options.get_colorspace().num_components())
            .ok_or(PngEncodeErrors::Generic("Overflow"))?;

        if self.data.len() != expected_data_size {
            return Err(PngEncodeErrors::TooShortInput(
                expected_data_size,
                self.data.len()
            ));
        }

        // cannot overflow, expected_data_size + height is bounded
        // by an existing allocation
        let scanline_length = (self.calculate_scanline_size() + 1) * options.get_height();

        if scanline_length > MAX_STORED_BLOCK_SIZE {
            return Err(PngEncodeErrors::TooLargeImage(scanline_length));
        }

        // set encoded data to be an array of zeroes
        let mut encoded_data = vec![0; self.max_size()];

        let mut writer = PByteWriter::new(&mut encoded_data);

        self.encode_headers(&mut writer)?;

        let filtered = self.filter_scanlines(scanline_length);
        let encoded_chunks = DeflateEncoder::new(&filtered).encode_zlib();

        self.write_idat_chunks(&encoded_chunks, &mut writer)?;

        // IEND carries no payload
        let end = PngChunk {
            length:     0,
            chunk_type: PngChunkType::IEND,
            chunk:      *b"IEND"
        };
        write_chunk(&end, &[], &mut writer)?;

        let len = writer.position();
        // reduce the length to be the expected value
        encoded_data.truncate(len);

        Ok(encoded_data)
    }
}

#[test]
fn test_simple_write() {
    use crate::PngDecoder;

    let width = 40;
    let height = 10;
    let data = vec![100; width * height * 3];

    let options = EncoderOptions::new(width, height, ColorSpace::RGB, BitDepth::Eight);

    let encoder = PngEncoder::new(&data, options);

    let sink = encoder.encode().unwrap();

    let mut hello = PngDecoder::new(&sink);
    let bytes = hello.decode_raw().unwrap();
    assert_eq!(&data, &bytes);
}
