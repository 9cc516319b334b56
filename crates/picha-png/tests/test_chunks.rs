/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Tests running the decoder over hand assembled chunk streams

use picha_core::bit_depth::BitDepth;
use picha_core::colorspace::ColorSpace;
use picha_core::options::{DecoderOptions, EncoderOptions};
use picha_png::error::{DecodeErrorStatus, PngDecodeErrors};
use picha_png::{PngDecoder, PngEncoder};

const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

fn crc32(data: &[u8]) -> u32 {
    let mut crc = u32::MAX;

    for &byte in data {
        crc ^= u32::from(byte);

        for _ in 0..8 {
            let mask = (crc & 1).wrapping_neg();
            crc = (crc >> 1) ^ (0xEDB8_8320 & mask);
        }
    }
    !crc
}

fn chunk(name: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(payload.len() + 12);

    out.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    out.extend_from_slice(name);
    out.extend_from_slice(payload);

    let mut checked = name.to_vec();
    checked.extend_from_slice(payload);
    out.extend_from_slice(&crc32(&checked).to_be_bytes());

    out
}

fn ihdr_chunk(width: u32, height: u32) -> Vec<u8> {
    let mut payload = Vec::with_capacity(13);

    payload.extend_from_slice(&width.to_be_bytes());
    payload.extend_from_slice(&height.to_be_bytes());
    // eight bit RGB, no interlacing
    payload.extend_from_slice(&[8, 2, 0, 0, 0]);

    chunk(b"IHDR", &payload)
}

/// Wrap `data` in a zlib stream holding one stored block
fn stored_zlib(data: &[u8]) -> Vec<u8> {
    let mut out = vec![0x78, 0x01, 0x01];

    let len = data.len() as u16;
    out.extend_from_slice(&len.to_le_bytes());
    out.extend_from_slice(&(!len).to_le_bytes());
    out.extend_from_slice(data);

    let (mut a, mut b) = (1_u32, 0_u32);

    for &byte in data {
        a = (a + u32::from(byte)) % 65521;
        b = (b + a) % 65521;
    }
    out.extend_from_slice(&((b << 16) | a).to_be_bytes());

    out
}

/// Prefix every scanline with the `None` filter tag
fn raw_scanlines(pixels: &[u8], width: usize) -> Vec<u8> {
    let mut out = Vec::new();

    for row in pixels.chunks_exact(width * 3) {
        out.push(0);
        out.extend_from_slice(row);
    }
    out
}

fn paeth(a: u8, b: u8, c: u8) -> u8 {
    let a = i16::from(a);
    let b = i16::from(b);
    let c = i16::from(c);
    let p = a + b - c;
    let pa = (p - a).abs();
    let pb = (p - b).abs();
    let pc = (p - c).abs();

    if pa <= pb && pa <= pc {
        return a as u8;
    }
    if pb <= pc {
        return b as u8;
    }
    c as u8
}

/// Forward filter each scanline with the tag picked for its row,
/// neighbours outside the image count as zero
fn filter_scanlines(pixels: &[u8], width: usize, tags: &[u8]) -> Vec<u8> {
    let stride = width * 3;
    let mut prev_row = vec![0_u8; stride];
    let mut out = Vec::new();

    for (row, &tag) in pixels.chunks_exact(stride).zip(tags) {
        out.push(tag);

        for i in 0..stride {
            let left = if i >= 3 { row[i - 3] } else { 0 };
            let up = prev_row[i];
            let upper_left = if i >= 3 { prev_row[i - 3] } else { 0 };

            let predictor = match tag {
                0 => 0,
                1 => left,
                2 => up,
                3 => ((u16::from(left) + u16::from(up)) / 2) as u8,
                4 => paeth(left, up, upper_left),
                _ => unreachable!()
            };
            out.push(row[i].wrapping_sub(predictor));
        }
        prev_row.copy_from_slice(row);
    }
    out
}

fn build_png(chunks: &[&[u8]]) -> Vec<u8> {
    let mut out = PNG_SIGNATURE.to_vec();

    for chunk in chunks {
        out.extend_from_slice(chunk);
    }
    out
}

/// A 3x2 image plus its zlib wrapped pixel data
fn sample_image() -> (Vec<u8>, Vec<u8>) {
    let pixels: Vec<u8> = (0..3 * 2 * 3).map(|i| (i * 13) as u8).collect();
    let zlib = stored_zlib(&raw_scanlines(&pixels, 3));

    (pixels, zlib)
}

fn encode_sample() -> (Vec<u8>, Vec<u8>) {
    let pixels: Vec<u8> = (0..4 * 4 * 3).map(|i| (i * 7) as u8).collect();

    let options = EncoderOptions::new(4, 4, ColorSpace::RGB, BitDepth::Eight);
    let encoded = PngEncoder::new(&pixels, options).encode().unwrap();

    (pixels, encoded)
}

#[test]
fn test_multiple_idat_chunks_assemble() {
    let (pixels, zlib) = sample_image();

    let single = build_png(&[
        &ihdr_chunk(3, 2),
        &chunk(b"IDAT", &zlib),
        &chunk(b"IEND", &[])
    ]);

    let halved = build_png(&[
        &ihdr_chunk(3, 2),
        &chunk(b"IDAT", &zlib[..10]),
        &chunk(b"IDAT", &zlib[10..]),
        &chunk(b"IEND", &[])
    ]);

    // deliver the same stream over three consecutive chunks,
    // split anywhere, even inside the stored block preamble
    let split = build_png(&[
        &ihdr_chunk(3, 2),
        &chunk(b"IDAT", &zlib[..4]),
        &chunk(b"IDAT", &zlib[4..9]),
        &chunk(b"IDAT", &zlib[9..]),
        &chunk(b"IEND", &[])
    ]);

    let from_single = PngDecoder::new(&single).decode_raw().unwrap();
    let from_halved = PngDecoder::new(&halved).decode_raw().unwrap();
    let from_split = PngDecoder::new(&split).decode_raw().unwrap();

    assert_eq!(from_single, pixels);
    assert_eq!(from_halved, pixels);
    assert_eq!(from_split, pixels);
}

#[test]
fn test_filtered_scanlines_reconstruct() {
    let (width, height) = (7_usize, 6_usize);
    let pixels: Vec<u8> = (0..width * height * 3).map(|i| (i * 31) as u8).collect();

    // try every tag on the first row, where `Up`, `Average` and `Paeth`
    // take their special zero previous row paths, with later rows
    // cycling through all five filters over a real previous row
    for first_tag in 0..=4_u8 {
        let tags: Vec<u8> = (0..height)
            .map(|row| if row == 0 { first_tag } else { (row % 5) as u8 })
            .collect();

        let zlib = stored_zlib(&filter_scanlines(&pixels, width, &tags));

        let png = build_png(&[
            &ihdr_chunk(7, 6),
            &chunk(b"IDAT", &zlib),
            &chunk(b"IEND", &[])
        ]);

        let decoded = PngDecoder::new(&png).decode_raw().unwrap();

        assert_eq!(decoded, pixels, "first row filter {first_tag}");
    }
}

#[test]
fn test_unknown_chunk_before_idat_skipped() {
    let (pixels, zlib) = sample_image();

    let png = build_png(&[
        &ihdr_chunk(3, 2),
        &chunk(b"tEXt", b"Comment\0picha"),
        &chunk(b"IDAT", &zlib),
        &chunk(b"IEND", &[])
    ]);

    let decoded = PngDecoder::new(&png).decode_raw().unwrap();
    assert_eq!(decoded, pixels);
}

#[test]
fn test_unknown_chunk_after_pixel_data_skipped() {
    let (pixels, zlib) = sample_image();

    let png = build_png(&[
        &ihdr_chunk(3, 2),
        &chunk(b"IDAT", &zlib),
        &chunk(b"tIME", &[0; 7]),
        &chunk(b"IEND", &[])
    ]);

    let decoded = PngDecoder::new(&png).decode_raw().unwrap();
    assert_eq!(decoded, pixels);
}

#[test]
fn test_chunk_interrupting_pixel_data_errors() {
    let (_, zlib) = sample_image();

    // five bytes cannot hold the stored block preamble, so
    // pixel data is still arriving when tEXt shows up
    let png = build_png(&[
        &ihdr_chunk(3, 2),
        &chunk(b"IDAT", &zlib[..5]),
        &chunk(b"tEXt", b"Comment\0sneaky"),
        &chunk(b"IDAT", &zlib[5..]),
        &chunk(b"IEND", &[])
    ]);

    let result = PngDecoder::new(&png).decode_raw();
    let err = result.unwrap_err();

    assert!(err.to_string().contains("interrupts"));
}

#[test]
fn test_bad_crc_detected() {
    let (_, mut encoded) = encode_sample();

    // 8 byte signature, 25 byte IHDR chunk, 8 bytes of IDAT length
    // and type, the 7 byte zlib preamble and one filter tag put the
    // first pixel byte at 49
    encoded[49] ^= 0xFF;

    let result = PngDecoder::new(&encoded).decode_raw();

    assert!(matches!(result, Err(PngDecodeErrors::BadCrc(_, _))));
}

#[test]
fn test_crc_check_disabled_adler_still_catches() {
    let (_, mut encoded) = encode_sample();

    encoded[49] ^= 0xFF;

    let options = DecoderOptions::default().png_set_confirm_crc(false);
    let result = PngDecoder::new_with_options(&encoded, options).decode_raw();

    assert!(matches!(
        result,
        Err(PngDecodeErrors::ZlibDecodeErrors(
            DecodeErrorStatus::MismatchedAdler(_, _)
        ))
    ));
}

#[test]
fn test_adler_catches_corruption_behind_valid_crcs() {
    let (_, mut zlib) = sample_image();

    // corrupt a stored pixel byte before chunking, every chunk
    // crc is then computed over the corrupt payload and passes
    zlib[10] ^= 0xFF;

    let png = build_png(&[
        &ihdr_chunk(3, 2),
        &chunk(b"IDAT", &zlib),
        &chunk(b"IEND", &[])
    ]);

    let result = PngDecoder::new(&png).decode_raw();

    assert!(matches!(
        result,
        Err(PngDecodeErrors::ZlibDecodeErrors(
            DecodeErrorStatus::MismatchedAdler(_, _)
        ))
    ));
}

#[test]
fn test_missing_iend_decodes_with_warning() {
    let (pixels, mut encoded) = encode_sample();

    // drop the trailing IEND chunk
    encoded.truncate(encoded.len() - 12);

    let decoded = PngDecoder::new(&encoded).decode_raw().unwrap();
    assert_eq!(decoded, pixels);
}

#[test]
fn test_missing_iend_rejected_in_strict_mode() {
    let (_, mut encoded) = encode_sample();

    encoded.truncate(encoded.len() - 12);

    let options = DecoderOptions::default().set_strict_mode(true);
    let result = PngDecoder::new_with_options(&encoded, options).decode_raw();

    assert!(result.is_err());
}

#[test]
fn test_truncated_chunk_errors() {
    let (_, encoded) = encode_sample();

    // cut inside the IDAT payload
    let result = PngDecoder::new(&encoded[..50]).decode_raw();
    assert!(result.is_err());

    // cut inside a chunk length field
    let result = PngDecoder::new(&encoded[..35]).decode_raw();
    assert!(result.is_err());
}

#[test]
fn test_incomplete_pixel_data_errors() {
    let (_, zlib) = sample_image();

    let png = build_png(&[
        &ihdr_chunk(3, 2),
        &chunk(b"IDAT", &zlib[..15]),
        &chunk(b"IEND", &[])
    ]);

    let result = PngDecoder::new(&png).decode_raw();

    assert!(matches!(
        result,
        Err(PngDecodeErrors::ZlibDecodeErrors(
            DecodeErrorStatus::InsufficientData
        ))
    ));
}

#[test]
fn test_missing_pixel_data_errors() {
    let png = build_png(&[&ihdr_chunk(3, 2), &chunk(b"IEND", &[])]);

    let result = PngDecoder::new(&png).decode_raw();
    assert!(result.is_err());
}

#[test]
fn test_bad_signature_rejected() {
    let result = PngDecoder::new(&[0xFF; 16]).decode_raw();

    assert!(matches!(result, Err(PngDecodeErrors::BadSignature)));
}

#[test]
fn test_first_chunk_must_be_ihdr() {
    let (_, zlib) = sample_image();

    let png = build_png(&[
        &chunk(b"tEXt", b"Comment\0first"),
        &ihdr_chunk(3, 2),
        &chunk(b"IDAT", &zlib),
        &chunk(b"IEND", &[])
    ]);

    let result = PngDecoder::new(&png).decode_raw();
    assert!(result.is_err());
}

#[test]
fn test_pixel_data_before_header_rejected() {
    let (_, zlib) = sample_image();

    let png = build_png(&[
        &chunk(b"IDAT", &zlib),
        &ihdr_chunk(3, 2),
        &chunk(b"IEND", &[])
    ]);

    let result = PngDecoder::new(&png).decode_raw();
    assert!(result.is_err());
}

#[test]
fn test_multiple_ihdr_rejected() {
    let (_, zlib) = sample_image();

    let png = build_png(&[
        &ihdr_chunk(3, 2),
        &ihdr_chunk(3, 2),
        &chunk(b"IDAT", &zlib),
        &chunk(b"IEND", &[])
    ]);

    let result = PngDecoder::new(&png).decode_raw();
    assert!(result.is_err());
}

#[test]
fn test_trailing_bytes_after_iend_ignored() {
    let (pixels, mut encoded) = encode_sample();

    encoded.extend_from_slice(&[0xAB; 24]);

    let decoded = PngDecoder::new(&encoded).decode_raw().unwrap();
    assert_eq!(decoded, pixels);
}
