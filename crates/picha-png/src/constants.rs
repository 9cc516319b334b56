/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

/// The png signature, as one big endian u64
///
/// Expands to the bytes `137 80 78 71 13 10 26 10`,
/// i.e `\x89PNG\r\n\x1a\n`
pub const PNG_SIGNATURE: u64 = 0x89504E470D0A1A0A;

/// Size of the IHDR payload, fixed by the format
pub const IHDR_LENGTH: usize = 13;

/// Preferred size of a single IDAT chunk payload when encoding
///
/// Most decoders expect data in 8KB chunks, since
/// probably libpng does that by default
/// so let's try emulating that
pub const IDAT_CHUNK_SIZE: usize = 8192;

/// Largest payload a single stored deflate block can carry
pub const MAX_STORED_BLOCK_SIZE: usize = 65535;
