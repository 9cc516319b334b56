/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Calculate the crc32 checksum protecting every png chunk
//!
//! The crc covers the four bytes of the chunk type plus the
//! chunk payload, never the length field, so the calculation
//! is exposed as a resumable function that can be chained over
//! separate slices.

/// Lookup table for the crc32 polynomial `0xEDB88320`,
/// computed at compile time
const CRC_TABLE: [u32; 256] = {
    let mut table = [0u32; 256];
    let mut n = 0;
    while n < 256 {
        let mut c = n as u32;
        let mut k = 0;
        while k < 8 {
            if c & 1 != 0 {
                c = 0xEDB88320 ^ (c >> 1);
            } else {
                c >>= 1;
            }
            k += 1;
        }
        table[n] = c;
        n += 1;
    }
    table
};

/// Update a running crc with the bytes in `data`
///
/// `state` is the running crc of everything hashed so far, pass
/// `u32::MAX` on the first call and invert the value returned by
/// the last call to get the final crc
pub(crate) fn calc_crc_with_bytes(data: &[u8], state: u32) -> u32 {
    let mut crc = state;

    for byte in data {
        crc = CRC_TABLE[usize::from((crc as u8) ^ byte)] ^ (crc >> 8);
    }
    crc
}

/// Calculate the crc of `data` in one go
pub(crate) fn calc_crc(data: &[u8]) -> u32 {
    !calc_crc_with_bytes(data, u32::MAX)
}
