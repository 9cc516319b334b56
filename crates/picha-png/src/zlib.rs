/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! A reduced zlib codec understanding only stored blocks
//!
//! Pixel data in a png travels inside a zlib stream. This module
//! decodes the subset of that format where the stream holds exactly
//! one stored (uncompressed) deflate block, and encodes the same
//! shape. Streams produced by a real entropy coder are rejected as
//! unsupported rather than decoded.
//!
//! See <https://www.ietf.org/rfc/rfc1950.txt> and
//! <https://www.ietf.org/rfc/rfc1951.txt> for the wire layout.

use crate::constants::MAX_STORED_BLOCK_SIZE;

const DEFLATE_BLOCKTYPE_UNCOMPRESSED: u8 = 0;

/// Reasons the zlib stream in an image could not be decoded
pub enum DecodeErrorStatus {
    /// The stream ended before the declared data was delivered
    InsufficientData,
    Generic(&'static str),
    GenericStr(String),
    /// The stream uses a block type this decoder does not implement
    ///
    /// Only stored (type 0) blocks are understood
    UnsupportedCompression(u8),
    /// The adler32 checksum stored in the stream does not match
    /// the one calculated over the decoded bytes
    ///
    /// # Arguments
    /// - 1st argument is the checksum stored in the stream
    /// - 2nd argument is the checksum calculated during decoding
    MismatchedAdler(u32, u32)
}

impl core::fmt::Debug for DecodeErrorStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InsufficientData => writeln!(f, "Insufficient data"),
            Self::Generic(reason) => writeln!(f, "{reason}"),
            Self::GenericStr(reason) => writeln!(f, "{reason}"),
            Self::UnsupportedCompression(block_type) => writeln!(
                f,
                "Unsupported block type {block_type}, only stored blocks can be decoded"
            ),
            Self::MismatchedAdler(expected, found) => {
                writeln!(f, "Mismatched Adler, expected {expected} but found {found}")
            }
        }
    }
}

/// A running adler32 checksum
///
/// The hash runs over the whole decompressed stream no matter how
/// many separate slices deliver it, so state lives here and
/// [`finish`](Self::finish) extracts the final value
pub(crate) struct Adler32 {
    a: u32,
    b: u32
}

impl Adler32 {
    pub(crate) const fn new() -> Adler32 {
        Adler32 { a: 1, b: 0 }
    }

    pub(crate) fn update(&mut self, data: &[u8]) {
        for byte in data {
            self.a = (self.a + u32::from(*byte)) % 65521;
            self.b = (self.b + self.a) % 65521;
        }
    }

    pub(crate) const fn finish(&self) -> u32 {
        (self.b << 16) | self.a
    }
}

/// Calculate the adler32 hash of `data` in one go
pub(crate) fn calc_adler_hash(data: &[u8]) -> u32 {
    let mut hash = Adler32::new();
    hash.update(data);
    hash.finish()
}

/// Decodes a zlib stream whose payload is a single stored block
pub(crate) struct DeflateDecoder<'a> {
    data:             &'a [u8],
    position:         usize,
    confirm_checksum: bool
}

impl<'a> DeflateDecoder<'a> {
    /// Create a new decoder for `data`
    ///
    /// Checksum confirmation is on by default
    pub(crate) fn new(data: &'a [u8]) -> DeflateDecoder<'a> {
        DeflateDecoder {
            data,
            position: 0,
            confirm_checksum: true
        }
    }

    /// Whether the decoder should confirm the trailing adler32
    /// checksum after decoding
    #[must_use]
    pub(crate) fn set_confirm_checksum(mut self, yes: bool) -> Self {
        self.confirm_checksum = yes;
        self
    }

    /// Decode the stream, returning the raw bytes the stored
    /// block carried
    pub(crate) fn decode_zlib(&mut self) -> Result<Vec<u8>, DecodeErrorStatus> {
        if self.data.len()
            < 2 /* zlib header */
            + 5 /* block header + LEN + NLEN */
            + 4
        /* adler32 */
        {
            return Err(DecodeErrorStatus::InsufficientData);
        }

        // Zlib flags
        // See https://www.ietf.org/rfc/rfc1950.txt for
        // the RFC
        let cmf = self.data[0];
        let flg = self.data[1];

        let cm = cmf & 0xF;
        let cinfo = cmf >> 4;

        // confirm we have the right deflate methods
        if cm != 8 {
            if cm == 15 {
                return Err(DecodeErrorStatus::Generic(
                    "CM of 15 is preserved by the standard, currently don't know how to handle it"
                ));
            }
            return Err(DecodeErrorStatus::GenericStr(format!(
                "Unknown zlib compression method {cm}"
            )));
        }
        if cinfo > 7 {
            return Err(DecodeErrorStatus::GenericStr(format!(
                "Unknown cinfo `{cinfo}` greater than 7, not allowed"
            )));
        }
        let flag_checks = (u16::from(cmf) * 256) + u16::from(flg);

        if flag_checks % 31 != 0 {
            return Err(DecodeErrorStatus::Generic("FCHECK integrity not preserved"));
        }

        self.position = 2;

        self.decode_stored_block()
    }

    fn decode_stored_block(&mut self) -> Result<Vec<u8>, DecodeErrorStatus> {
        let block_header = self.data[self.position];
        self.position += 1;

        let bfinal = block_header & 1;
        let block_type = (block_header >> 1) & 3;

        if block_type != DEFLATE_BLOCKTYPE_UNCOMPRESSED {
            return Err(DecodeErrorStatus::UnsupportedCompression(block_type));
        }
        if bfinal != 1 {
            return Err(DecodeErrorStatus::Generic(
                "Only a single final stored block is supported"
            ));
        }
        // LEN and NLEN, little endian
        let len = u16::from(self.data[self.position]) | (u16::from(self.data[self.position + 1]) << 8);
        self.position += 2;
        let nlen = u16::from(self.data[self.position]) | (u16::from(self.data[self.position + 1]) << 8);
        self.position += 2;

        if len != !nlen {
            return Err(DecodeErrorStatus::Generic("Len and nlen do not match"));
        }

        let start = self.position;
        let end = start + usize::from(len);

        // stored bytes plus the trailing adler
        if self.data.len() < end + 4 {
            return Err(DecodeErrorStatus::InsufficientData);
        }
        let out_block = self.data[start..end].to_vec();
        self.position = end;

        let stored_adler = u32::from_be_bytes([
            self.data[self.position],
            self.data[self.position + 1],
            self.data[self.position + 2],
            self.data[self.position + 3]
        ]);
        self.position += 4;

        if self.confirm_checksum {
            let mut hash = Adler32::new();
            hash.update(&out_block);

            let adler = hash.finish();

            if adler != stored_adler {
                return Err(DecodeErrorStatus::MismatchedAdler(stored_adler, adler));
            }
        }
        Ok(out_block)
    }
}

/// Encodes bytes as a zlib stream holding a single stored block
pub(crate) struct DeflateEncoder<'a> {
    data: &'a [u8]
}

impl<'a> DeflateEncoder<'a> {
    /// Create a new encoder
    ///
    /// `data` must fit in one stored block, so it cannot be longer
    /// than 65535 bytes, callers check that before handing data here
    pub(crate) fn new(data: &'a [u8]) -> DeflateEncoder<'a> {
        DeflateEncoder { data }
    }

    pub(crate) fn encode_zlib(&self) -> Vec<u8> {
        debug_assert!(self.data.len() <= MAX_STORED_BLOCK_SIZE);

        const ZLIB_CM_DEFLATE: u16 = 8;
        const ZLIB_CINFO_32K_WINDOW: u16 = 7;

        let mut output = Vec::with_capacity(self.data.len() + 11);

        let mut hdr = (ZLIB_CM_DEFLATE << 8) | (ZLIB_CINFO_32K_WINDOW << 12);
        hdr |= 31 - (hdr % 31);

        output.extend_from_slice(&hdr.to_be_bytes());

        // BFINAL and BTYPE, the stream is byte aligned here so this
        // takes exactly one byte
        output.push(1 | (DEFLATE_BLOCKTYPE_UNCOMPRESSED << 1));

        // LEN and NLEN
        let len = self.data.len() as u16;
        output.extend_from_slice(&len.to_le_bytes());
        output.extend_from_slice(&(!len).to_le_bytes());

        output.extend_from_slice(self.data);

        // add adler hash
        let hash = calc_adler_hash(self.data);
        output.extend_from_slice(&hash.to_be_bytes());

        output
    }
}
