/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

static ERROR_MSG: &str = "No more bytes";

enum Mode {
    // Big endian
    BE,
    // Little Endian
    LE
}

/// An encapsulation of a byte stream reader
///
/// The reader is generic over an in memory buffer and
/// keeps track of the current position, all reads are
/// bounds checked and never panic.
pub struct PByteReader<'a> {
    stream:   &'a [u8],
    position: usize
}

impl<'a> PByteReader<'a> {
    /// Create a new reader for the stream
    pub const fn new(buf: &'a [u8]) -> PByteReader<'a> {
        PByteReader {
            stream:   buf,
            position: 0
        }
    }

    /// Skip `num` bytes ahead of the stream
    ///
    /// The cursor may move past the end of the buffer,
    /// reads from there simply fail
    pub fn skip(&mut self, num: usize) {
        self.position = self.position.wrapping_add(num);
    }

    /// Undo a read of `num` bytes, moving the cursor back
    pub fn rewind(&mut self, num: usize) {
        self.position = self.position.saturating_sub(num);
    }

    /// Return true if the stream can satisfy a read
    /// of `num` more bytes from the current position
    pub const fn has(&self, num: usize) -> bool {
        self.position.saturating_add(num) <= self.stream.len()
    }

    /// Number of unread bytes in this stream
    pub const fn remaining(&self) -> usize {
        self.stream.len().saturating_sub(self.position)
    }

    /// Return true if we have read all bytes in this stream
    pub const fn eof(&self) -> bool {
        self.position >= self.stream.len()
    }

    /// Return the current position of the cursor
    pub const fn get_position(&self) -> usize {
        self.position
    }

    /// Read a single byte from the stream, returning 0
    /// if the stream is exhausted
    ///
    /// Should be combined with [`has`](Self::has)
    pub fn get_u8(&mut self) -> u8 {
        match self.stream.get(self.position) {
            Some(byte) => {
                self.position += 1;
                *byte
            }
            None => 0
        }
    }

    /// Read a single byte from the stream, erroring out
    /// if the stream is exhausted
    pub fn get_u8_err(&mut self) -> Result<u8, &'static str> {
        match self.stream.get(self.position) {
            Some(byte) => {
                self.position += 1;
                Ok(*byte)
            }
            None => Err(ERROR_MSG)
        }
    }

    /// Read `N` bytes into a fixed size array, erroring out
    /// if there are not enough bytes left in the stream
    pub fn get_fixed_bytes_or_err<const N: usize>(&mut self) -> Result<[u8; N], &'static str> {
        let mut byte_store = [0; N];

        match self.stream.get(self.position..self.position + N) {
            Some(position) => {
                byte_store.copy_from_slice(position);
                self.position += N;

                Ok(byte_store)
            }
            None => Err(ERROR_MSG)
        }
    }

    /// Read `num_bytes` bytes from the stream as a slice,
    /// advancing the cursor past them
    ///
    /// The returned slice borrows from the underlying stream,
    /// not from the reader
    pub fn get(&mut self, num_bytes: usize) -> Result<&'a [u8], &'static str> {
        match self.stream.get(self.position..self.position + num_bytes) {
            Some(bytes) => {
                self.position += num_bytes;
                Ok(bytes)
            }
            None => Err(ERROR_MSG)
        }
    }

    /// Look at `num_bytes` bytes starting at `position` bytes
    /// ahead of the cursor without advancing the cursor
    ///
    /// The returned slice borrows from the underlying stream,
    /// not from the reader
    pub fn peek_at(&self, position: usize, num_bytes: usize) -> Result<&'a [u8], &'static str> {
        let start = self.position + position;
        let end = start + num_bytes;

        match self.stream.get(start..end) {
            Some(bytes) => Ok(bytes),
            None => Err(ERROR_MSG)
        }
    }
}

macro_rules! get_single_type {
    ($name:tt,$name2:tt,$name3:tt,$name4:tt,$name5:tt,$name6:tt,$int_type:tt) => {
        impl<'a> PByteReader<'a> {
            #[inline(always)]
            fn $name(&mut self, mode: Mode) -> $int_type {
                const SIZE_OF_VAL: usize = core::mem::size_of::<$int_type>();

                let mut space = [0; SIZE_OF_VAL];

                match self.stream.get(self.position..self.position + SIZE_OF_VAL) {
                    Some(position) => {
                        space.copy_from_slice(position);
                        self.position += SIZE_OF_VAL;

                        match mode {
                            Mode::LE => $int_type::from_le_bytes(space),
                            Mode::BE => $int_type::from_be_bytes(space)
                        }
                    }
                    None => 0
                }
            }

            #[inline(always)]
            fn $name2(&mut self, mode: Mode) -> Result<$int_type, &'static str> {
                const SIZE_OF_VAL: usize = core::mem::size_of::<$int_type>();

                let mut space = [0; SIZE_OF_VAL];

                match self.stream.get(self.position..self.position + SIZE_OF_VAL) {
                    Some(position) => {
                        space.copy_from_slice(position);
                        self.position += SIZE_OF_VAL;

                        match mode {
                            Mode::LE => Ok($int_type::from_le_bytes(space)),
                            Mode::BE => Ok($int_type::from_be_bytes(space))
                        }
                    }
                    None => Err(ERROR_MSG)
                }
            }

            #[doc=concat!("Read ",stringify!($int_type)," as a big endian integer")]
            #[doc=concat!("Returning an error if the underlying buffer cannot support a ",stringify!($int_type)," read.")]
            #[inline]
            pub fn $name3(&mut self) -> Result<$int_type, &'static str> {
                self.$name2(Mode::BE)
            }

            #[doc=concat!("Read ",stringify!($int_type)," as a little endian integer")]
            #[doc=concat!("Returning an error if the underlying buffer cannot support a ",stringify!($int_type)," read.")]
            #[inline]
            pub fn $name4(&mut self) -> Result<$int_type, &'static str> {
                self.$name2(Mode::LE)
            }

            #[doc=concat!("Read ",stringify!($int_type)," as a big endian integer")]
            #[doc=concat!("Or return 0 if the underlying buffer cannot support a ",stringify!($int_type)," read.")]
            #[inline]
            pub fn $name5(&mut self) -> $int_type {
                self.$name(Mode::BE)
            }

            #[doc=concat!("Read ",stringify!($int_type)," as a little endian integer")]
            #[doc=concat!("Or return 0 if the underlying buffer cannot support a ",stringify!($int_type)," read.")]
            #[inline]
            pub fn $name6(&mut self) -> $int_type {
                self.$name(Mode::LE)
            }
        }
    };
}

get_single_type!(
    get_u16_inner_or_default,
    get_u16_inner_or_die,
    get_u16_be_err,
    get_u16_le_err,
    get_u16_be,
    get_u16_le,
    u16
);
get_single_type!(
    get_u32_inner_or_default,
    get_u32_inner_or_die,
    get_u32_be_err,
    get_u32_le_err,
    get_u32_be,
    get_u32_le,
    u32
);
get_single_type!(
    get_u64_inner_or_default,
    get_u64_inner_or_die,
    get_u64_be_err,
    get_u64_le_err,
    get_u64_be,
    get_u64_le,
    u64
);
