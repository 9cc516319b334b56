/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use log::warn;
use picha_core::bit_depth::BitDepth;
use picha_core::bytestream::PByteReader;
use picha_core::colorspace::ColorSpace;
use picha_core::options::DecoderOptions;

use crate::constants::PNG_SIGNATURE;
use crate::crc::calc_crc_with_bytes;
use crate::enums::{FilterMethod, PngChunkType, PngColor};
use crate::error::PngDecodeErrors;
use crate::filters::{
    handle_avg, handle_avg_first, handle_paeth, handle_paeth_first, handle_sub, handle_up
};
use crate::zlib::DeflateDecoder;

/// One framed chunk, as returned by the framer
///
/// `chunk` keeps the raw four byte name so unknown chunks can
/// still be named in logs and errors
#[derive(Copy, Clone)]
pub(crate) struct PngChunk {
    pub length:     usize,
    pub chunk_type: PngChunkType,
    pub chunk:      [u8; 4]
}

/// Image metadata taken from the IHDR chunk
#[derive(Default, Debug, Copy, Clone)]
pub struct PngInfo {
    pub width:     usize,
    pub height:    usize,
    pub depth:     u8,
    pub color:     PngColor,
    pub component: u8
}

/// A png decoder
///
/// Decodes eight bit RGB images whose pixel data travels in
/// stored deflate blocks, anything else is rejected with an
/// informative error.
pub struct PngDecoder<'a> {
    pub(crate) seen_hdr:    bool,
    pub(crate) stream:      PByteReader<'a>,
    pub(crate) options:     DecoderOptions,
    pub(crate) idat_chunks: Vec<u8>,
    pub(crate) png_info:    PngInfo
}

impl<'a> PngDecoder<'a> {
    pub fn new(data: &'a [u8]) -> PngDecoder<'a> {
        let default_opt = DecoderOptions::default();

        PngDecoder::new_with_options(data, default_opt)
    }

    pub fn new_with_options(data: &'a [u8], options: DecoderOptions) -> PngDecoder<'a> {
        PngDecoder {
            seen_hdr: false,
            stream: PByteReader::new(data),
            options,
            idat_chunks: Vec::with_capacity(37), // randomly chosen size, my favourite number,
            png_info: PngInfo::default()
        }
    }

    /// Return image dimensions as `(width, height)` or none
    /// if the headers haven't been decoded
    pub const fn get_dimensions(&self) -> Option<(usize, usize)> {
        if !self.seen_hdr {
            return None;
        }

        Some((self.png_info.width, self.png_info.height))
    }

    pub const fn get_depth(&self) -> Option<BitDepth> {
        if !self.seen_hdr {
            return None;
        }
        match self.png_info.depth {
            8 => Some(BitDepth::Eight),
            _ => unreachable!()
        }
    }

    pub fn get_colorspace(&self) -> Option<ColorSpace> {
        if !self.seen_hdr {
            return None;
        }
        match self.png_info.color {
            PngColor::RGB => Some(ColorSpace::RGB),
            _ => unreachable!()
        }
    }

    /// Get image metadata read from the IHDR chunk
    ///
    /// Returns none if the headers haven't been decoded
    pub const fn get_info(&self) -> Option<&PngInfo> {
        if !self.seen_hdr {
            return None;
        }
        Some(&self.png_info)
    }

    fn read_chunk_header(&mut self) -> Result<PngChunk, PngDecodeErrors> {
        // Format is length - chunk type - [data] - crc chunk, load crc chunk now
        let chunk_length = self.stream.get_u32_be_err()? as usize;
        let chunk_type_int = self.stream.get_u32_be_err()?.to_be_bytes();

        let chunk_type = match &chunk_type_int {
            b"IHDR" => PngChunkType::IHDR,
            b"IDAT" => PngChunkType::IDAT,
            b"IEND" => PngChunkType::IEND,
            _ => PngChunkType::unkn
        };

        if !self.stream.has(chunk_length + 4 /*crc stream*/) {
            let err = format!(
                "Not enough bytes for chunk {:?}, bytes requested are {}, but bytes present are {}",
                chunk_type,
                chunk_length + 4,
                self.stream.remaining()
            );

            return Err(PngDecodeErrors::Generic(err));
        }

        let mut crc_bytes = [0; 4];

        let crc_ref = self.stream.peek_at(chunk_length, 4)?;

        crc_bytes.copy_from_slice(crc_ref);

        let crc = u32::from_be_bytes(crc_bytes);

        if self.options.png_get_confirm_crc() {
            // go back and point to chunk type.
            self.stream.rewind(4);
            // read chunk type + chunk data
            let bytes = self.stream.peek_at(0, chunk_length + 4)?;

            // calculate crc
            let calc_crc = !calc_crc_with_bytes(bytes, u32::MAX);

            if crc != calc_crc {
                return Err(PngDecodeErrors::BadCrc(crc, calc_crc));
            }
            // go point after the chunk type
            // The other parts expect the reader to point to the
            // start of the chunk data.
            self.stream.skip(4);
        }

        Ok(PngChunk {
            length: chunk_length,
            chunk: chunk_type_int,
            chunk_type
        })
    }

    /// Decode the png headers, stopping after the IHDR chunk
    ///
    /// After this succeeds the dimension, depth and colorspace
    /// getters return values. Calling it again is a no-op.
    pub fn decode_headers(&mut self) -> Result<(), PngDecodeErrors> {
        if self.seen_hdr {
            return Ok(());
        }
        // READ PNG signature
        let signature = self.stream.get_u64_be_err()?;

        if signature != PNG_SIGNATURE {
            return Err(PngDecodeErrors::BadSignature);
        }

        // check if first chunk is ihdr here
        if self.stream.peek_at(4, 4)? != b"IHDR" {
            return Err(PngDecodeErrors::GenericStatic(
                "First chunk not IHDR, Corrupt PNG"
            ));
        }

        let header = self.read_chunk_header()?;

        self.parse_ihdr(header)?;

        Ok(())
    }

    /// Decode a png encoded image and return the raw interleaved
    /// pixels
    ///
    /// For the eight bit RGB images this decoder supports the
    /// output is three bytes per pixel, row after row
    pub fn decode_raw(&mut self) -> Result<Vec<u8>, PngDecodeErrors> {
        self.decode_headers()?;

        let info = self.png_info;
        let image_len = usize::from(info.component) * info.width * info.height;

        // allocate out to be enough to hold raw decoded bytes
        let mut out = vec![0; image_len];

        self.decode_into(&mut out)?;

        Ok(out)
    }

    /// Decode a png encoded image writing the raw interleaved
    /// pixels into `out`
    ///
    /// `out` must hold at least `3 * width * height` bytes, a
    /// buffer that is too small returns
    /// [`TooSmallOutput`](PngDecodeErrors::TooSmallOutput) before
    /// any chunk past the header is read
    pub fn decode_into(&mut self, out: &mut [u8]) -> Result<(), PngDecodeErrors> {
        self.decode_headers()?;

        let info = self.png_info;
        let image_len = usize::from(info.component) * info.width * info.height;

        if out.len() < image_len {
            return Err(PngDecodeErrors::TooSmallOutput(image_len, out.len()));
        }

        let mut seen_idat = false;
        let mut seen_iend = false;

        while !self.stream.eof() {
            let header = self.read_chunk_header()?;

            match header.chunk_type {
                PngChunkType::IHDR => {
                    self.parse_ihdr(header)?;
                }
                PngChunkType::IDAT => {
                    self.parse_idat(header)?;
                    seen_idat = true;
                }
                PngChunkType::IEND => {
                    seen_iend = true;
                    break;
                }
                _ => {
                    // pixel data must arrive back to back, a stray chunk
                    // in the middle of delivery is a framing error
                    if seen_idat && !self.pixel_block_complete() {
                        return Err(PngDecodeErrors::Generic(format!(
                            "Chunk {} interrupts pixel data delivery",
                            core::str::from_utf8(&header.chunk).unwrap_or("XXXX")
                        )));
                    }
                    self.skip_unknown_chunk(header);
                }
            }
        }

        if !seen_iend {
            if self.options.get_strict_mode() {
                return Err(PngDecodeErrors::GenericStatic(
                    "Stream ended before the IEND chunk"
                ));
            }
            warn!("Stream ended before the IEND chunk, proceeding with the data received");
        }

        // go parse IDAT chunks returning the inflate
        let deflate_data = self.inflate()?;
        // remove idat chunks from memory
        // we are already done with them.
        self.idat_chunks = Vec::new();

        self.create_png_image_raw(&deflate_data, out)?;

        Ok(())
    }

    /// Whether the zlib stream assembled from idat chunks so far
    /// already carries all the bytes its stored block declared
    fn pixel_block_complete(&self) -> bool {
        if self.idat_chunks.len() < 7 {
            return false;
        }
        // blocks we can't decode get rejected later with a better
        // error, don't reason about their length here
        if (self.idat_chunks[2] >> 1) & 3 != 0 {
            return true;
        }
        let len = u16::from(self.idat_chunks[3]) | (u16::from(self.idat_chunks[4]) << 8);

        self.idat_chunks.len() >= usize::from(len) + 11
    }

    /// Create the png data from post deflated data
    ///
    /// `out` needs to have enough space to hold the whole image,
    /// callers check that before coming here
    fn create_png_image_raw(
        &self, deflate_data: &[u8], out: &mut [u8]
    ) -> Result<(), PngDecodeErrors> {
        let info = &self.png_info;
        let components = usize::from(info.component);

        let (width, height) = (info.width, info.height);

        let img_width_bytes = components * width;
        let image_len = img_width_bytes * height;

        let out = &mut out[0..image_len];

        if deflate_data.len() < image_len + height
        // account for filter bytes
        {
            let msg = format!(
                "Not enough pixels, expected {} but found {}",
                image_len + height,
                deflate_data.len()
            );
            return Err(PngDecodeErrors::Generic(msg));
        }

        // add width plus colour component, this gives us number of bytes per every scan line
        let chunk_size = width * components + 1; // filter byte

        // each chunk is a width stride of unfiltered data
        let chunks = deflate_data.chunks_exact(chunk_size);

        // Begin doing loop un-filtering.
        let width_stride = chunk_size - 1;

        let mut prev_row_start = 0;
        let mut first_row = true;
        let mut out_position = 0;

        for in_stride in chunks.take(height) {
            // Split output into current and previous
            // current points to the start of the row where we are writing de-filtered output to
            // prev is all rows we already wrote output to.
            let (prev, current) = out.split_at_mut(out_position);

            // get the previous row.
            // Set this to a dummy to handle special case of first row, if we aren't in the first
            // row, we actually take the real slice a line down
            let mut prev_row: &[u8] = &[0_u8];

            if !first_row {
                prev_row = &prev[prev_row_start..prev_row_start + width_stride];
                prev_row_start += width_stride;
            }

            out_position += width_stride;

            // take filter
            let filter_byte = in_stride[0];
            // raw image bytes
            let raw = &in_stride[1..];

            // get it's type
            let mut filter = FilterMethod::from_int(filter_byte).ok_or_else(|| {
                PngDecodeErrors::UnsupportedImage(format!("Unknown filter {filter_byte}"))
            })?;

            if first_row {
                // match our filters to special filters for first row
                // these special filters do not need the previous scanline and treat it
                // as zero

                if filter == FilterMethod::Paeth {
                    filter = FilterMethod::PaethFirst;
                }
                if filter == FilterMethod::Up {
                    // up for the first row becomes a memcpy
                    filter = FilterMethod::None;
                }
                if filter == FilterMethod::Average {
                    filter = FilterMethod::AvgFirst;
                }

                first_row = false;
            }

            match filter {
                FilterMethod::None => current[0..width_stride].copy_from_slice(raw),

                FilterMethod::Average => handle_avg(prev_row, raw, current, components),

                FilterMethod::Sub => handle_sub(raw, current, components),

                FilterMethod::Up => handle_up(prev_row, raw, current),

                FilterMethod::Paeth => handle_paeth(prev_row, raw, current, components),

                FilterMethod::PaethFirst => handle_paeth_first(raw, current, components),

                FilterMethod::AvgFirst => handle_avg_first(raw, current, components),

                FilterMethod::Unknown => unreachable!()
            }
        }

        Ok(())
    }

    /// Undo deflate decoding
    fn inflate(&mut self) -> Result<Vec<u8>, PngDecodeErrors> {
        let mut decoder = DeflateDecoder::new(&self.idat_chunks)
            .set_confirm_checksum(self.options.inflate_get_confirm_adler());

        decoder.decode_zlib().map_err(PngDecodeErrors::ZlibDecodeErrors)
    }
}
