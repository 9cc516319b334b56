/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Per chunk payload handling
//!
//! Each routine here consumes exactly one chunk payload plus its
//! trailing crc from the stream, the framer in the decoder module
//! has already confirmed the payload is fully present.

use std::io::Write;

use log::{info, trace};
use picha_core::bytestream::PByteWriter;

use crate::crc::calc_crc_with_bytes;
use crate::decoder::{PngChunk, PngDecoder};
use crate::enums::PngColor;
use crate::error::{PngDecodeErrors, PngEncodeErrors};

impl<'a> PngDecoder<'a> {
    pub(crate) fn parse_ihdr(&mut self, chunk: PngChunk) -> Result<(), PngDecodeErrors> {
        if self.seen_hdr {
            return Err(PngDecodeErrors::GenericStatic("Multiple IHDR, corrupt PNG"));
        }

        if chunk.length != 13 {
            return Err(PngDecodeErrors::GenericStatic("BAD IHDR length"));
        }

        let pos_start = self.stream.get_position();

        self.png_info.width = self.stream.get_u32_be() as usize;
        self.png_info.height = self.stream.get_u32_be() as usize;

        if self.png_info.width == 0 || self.png_info.height == 0 {
            return Err(PngDecodeErrors::GenericStatic(
                "Width or height cannot be zero"
            ));
        }

        if self.png_info.width > self.options.get_max_width() {
            return Err(PngDecodeErrors::Generic(format!(
                "Image width {}, larger than maximum configured width {}, aborting",
                self.png_info.width,
                self.options.get_max_width()
            )));
        }

        if self.png_info.height > self.options.get_max_height() {
            return Err(PngDecodeErrors::Generic(format!(
                "Image height {}, larger than maximum configured height {}, aborting",
                self.png_info.height,
                self.options.get_max_height()
            )));
        }

        self.png_info.depth = self.stream.get_u8();

        match self.png_info.depth {
            8 => { /* the only depth we reconstruct */ }
            1 | 2 | 4 | 16 => {
                return Err(PngDecodeErrors::UnsupportedImage(format!(
                    "Bit depth {}, only eight bit images are supported",
                    self.png_info.depth
                )))
            }
            _ => {
                return Err(PngDecodeErrors::Generic(format!(
                    "Unknown bit depth {}",
                    self.png_info.depth
                )))
            }
        }

        let color = self.stream.get_u8();

        if let Some(img_color) = PngColor::from_int(color) {
            self.png_info.color = img_color;
        } else {
            return Err(PngDecodeErrors::Generic(format!(
                "Unknown color value {color}"
            )));
        }
        if self.png_info.color != PngColor::RGB {
            return Err(PngDecodeErrors::UnsupportedImage(format!(
                "Color type {:?}, only RGB images are supported",
                self.png_info.color
            )));
        }
        self.png_info.component = self.png_info.color.num_components();

        if self.stream.get_u8() != 0 {
            return Err(PngDecodeErrors::GenericStatic("Unknown compression method"));
        }

        let filter_method = self.stream.get_u8();

        if filter_method != 0 {
            return Err(PngDecodeErrors::Generic(format!(
                "Unknown filter method {filter_method}"
            )));
        }

        let interlace_method = self.stream.get_u8();

        match interlace_method {
            0 => { /* sequential, the only layout we reconstruct */ }
            1 => {
                return Err(PngDecodeErrors::UnsupportedImage(
                    "Adam7 interlaced images are not supported".to_string()
                ))
            }
            _ => {
                return Err(PngDecodeErrors::Generic(format!(
                    "Unknown interlace method {interlace_method}"
                )))
            }
        }

        let pos_end = self.stream.get_position();

        assert_eq!(pos_end - pos_start, 13); //we read all bytes

        // skip crc
        self.stream.skip(4);

        info!("Width: {}", self.png_info.width);
        info!("Height: {}", self.png_info.height);
        info!("Depth: {:?}", self.png_info.depth);
        info!("Color type: {:?}", self.png_info.color);

        self.seen_hdr = true;

        Ok(())
    }

    pub(crate) fn parse_idat(&mut self, png_chunk: PngChunk) -> Result<(), PngDecodeErrors> {
        // get a reference to the IDAT chunk stream and push it,
        // we will later pass these to the deflate decoder as a whole, to get the whole
        // uncompressed stream.

        let idat_stream = self.stream.get(png_chunk.length)?;

        self.idat_chunks.extend_from_slice(idat_stream);

        // skip crc
        self.stream.skip(4);

        Ok(())
    }

    pub(crate) fn skip_unknown_chunk(&mut self, chunk: PngChunk) {
        let chunk_name = core::str::from_utf8(&chunk.chunk).unwrap_or("XXXX");

        trace!("Encountered unknown chunk {:?}", chunk_name);
        trace!("Length of chunk {}", chunk.length);
        trace!("Skipping {} bytes", chunk.length + 4);

        self.stream.skip(chunk.length + 4);
    }
}

/// Write one full chunk into `writer`
///
/// Writes the length, the four byte chunk name, the payload and
/// the crc computed over the name and payload. Space for the
/// whole chunk is confirmed before the first byte goes out, a
/// chunk is never half written.
pub(crate) fn write_chunk(
    chunk: &PngChunk, data: &[u8], writer: &mut PByteWriter
) -> Result<(), PngEncodeErrors> {
    // length, name and crc surround the payload with 12 bytes
    if !writer.has(chunk.length + 12) {
        return Err(PngEncodeErrors::Generic("No more space"));
    }

    // write length
    writer.write_u32_be_err(chunk.length as u32)?;
    // write chunk name
    writer
        .write_all(&chunk.chunk)
        .map_err(|_| PngEncodeErrors::Generic("No more space"))?;
    // write chunk data
    writer
        .write_all(data)
        .map_err(|_| PngEncodeErrors::Generic("No more space"))?;

    // crc is a continuous function, so first crc the chunk name
    // and then crc that with the chunk bytes passing in the previous crc

    // equal to crc((chunk.chunk + data), u32::MAX)
    let crc = calc_crc_with_bytes(&chunk.chunk, u32::MAX);
    let crc = !calc_crc_with_bytes(data, crc);

    writer.write_u32_be_err(crc)?;

    Ok(())
}
