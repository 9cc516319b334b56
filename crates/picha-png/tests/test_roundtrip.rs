/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use nanorand::Rng;
use picha_core::bit_depth::BitDepth;
use picha_core::colorspace::ColorSpace;
use picha_core::options::EncoderOptions;
use picha_png::error::{PngDecodeErrors, PngEncodeErrors};
use picha_png::{PngColor, PngDecoder, PngEncoder};

fn encode_rgb(pixels: &[u8], width: usize, height: usize) -> Vec<u8> {
    let options = EncoderOptions::new(width, height, ColorSpace::RGB, BitDepth::Eight);

    PngEncoder::new(pixels, options).encode().unwrap()
}

fn decode_picha(data: &[u8]) -> Vec<u8> {
    PngDecoder::new(data).decode_raw().unwrap()
}

fn decode_ref(data: &[u8]) -> Vec<u8> {
    let mut decoder = png::Decoder::new(data);
    decoder.set_transformations(png::Transformations::EXPAND);

    let mut reader = decoder.read_info().unwrap();

    // Allocate the output buffer.
    let mut buf = vec![0; reader.output_buffer_size()];
    let _ = reader.next_frame(&mut buf).unwrap();

    buf
}

fn roundtrip(width: usize, height: usize) {
    let mut pixels = vec![0_u8; width * height * 3];
    nanorand::WyRand::new().fill(&mut pixels);

    let encoded = encode_rgb(&pixels, width, height);
    let decoded = decode_picha(&encoded);

    assert_eq!(&pixels, &decoded);
}

#[test]
fn test_simple_roundtrip() {
    let width = 3;
    let height = 2;

    let pixels: Vec<u8> = (0..width * height * 3).map(|i| (i * 9) as u8).collect();

    let encoded = encode_rgb(&pixels, width, height);
    let decoded = decode_picha(&encoded);

    assert_eq!(&pixels, &decoded);
}

#[test]
fn test_random_pixels_roundtrip() {
    roundtrip(100, 100);
}

#[test]
fn test_single_pixel_roundtrip() {
    roundtrip(1, 1);
}

#[test]
fn test_single_row_roundtrip() {
    roundtrip(1000, 1);
}

#[test]
fn test_single_column_roundtrip() {
    roundtrip(1, 1000);
}

#[test]
fn test_largest_writable_image() {
    // (140 * 3 + 1) * 155 = 65255, close to the single
    // stored block limit of 65535
    roundtrip(140, 155);
}

#[test]
fn test_reference_decoder_accepts_output() {
    let (width, height) = (32, 32);

    let mut pixels = vec![0_u8; width * height * 3];
    nanorand::WyRand::new().fill(&mut pixels);

    let encoded = encode_rgb(&pixels, width, height);
    let ref_pixels = decode_ref(&encoded);

    assert_eq!(&pixels, &ref_pixels);
}

#[test]
fn test_output_layout() {
    let pixels = vec![128; 4 * 4 * 3];
    let encoded = encode_rgb(&pixels, 4, 4);

    // signature
    assert_eq!(&encoded[..8], &[137, 80, 78, 71, 13, 10, 26, 10]);
    // IHDR must come first
    assert_eq!(&encoded[12..16], b"IHDR");

    // the file ends with an empty IEND chunk whose crc never changes
    let tail = &encoded[encoded.len() - 12..];
    assert_eq!(&tail[..8], &[0, 0, 0, 0, b'I', b'E', b'N', b'D']);
    assert_eq!(&tail[8..], &0xAE42_6082_u32.to_be_bytes());
}

#[test]
fn test_header_metadata() {
    let pixels = vec![0; 7 * 5 * 3];
    let encoded = encode_rgb(&pixels, 7, 5);

    let mut decoder = PngDecoder::new(&encoded);

    assert!(decoder.get_dimensions().is_none());

    decoder.decode_headers().unwrap();

    assert_eq!(decoder.get_dimensions(), Some((7, 5)));
    assert_eq!(decoder.get_depth(), Some(BitDepth::Eight));
    assert_eq!(decoder.get_colorspace(), Some(ColorSpace::RGB));

    let info = decoder.get_info().unwrap();
    assert_eq!(info.width, 7);
    assert_eq!(info.height, 5);
    assert_eq!(info.depth, 8);
    assert_eq!(info.color, PngColor::RGB);
    assert_eq!(info.component, 3);
}

#[test]
fn test_decode_headers_is_idempotent() {
    let pixels = vec![90; 2 * 2 * 3];
    let encoded = encode_rgb(&pixels, 2, 2);

    let mut decoder = PngDecoder::new(&encoded);
    decoder.decode_headers().unwrap();
    decoder.decode_headers().unwrap();

    let decoded = decoder.decode_raw().unwrap();
    assert_eq!(&pixels, &decoded);
}

#[test]
fn test_decode_into_buffer_checks() {
    let pixels = vec![7; 2 * 2 * 3];
    let encoded = encode_rgb(&pixels, 2, 2);

    let mut small = [0_u8; 5];
    let result = PngDecoder::new(&encoded).decode_into(&mut small);

    assert!(matches!(
        result,
        Err(PngDecodeErrors::TooSmallOutput(12, 5))
    ));

    // an exactly sized buffer works
    let mut exact = [0_u8; 12];
    PngDecoder::new(&encoded).decode_into(&mut exact).unwrap();

    assert_eq!(exact.as_slice(), pixels.as_slice());
}

#[test]
fn test_too_large_image_rejected() {
    let (width, height) = (150, 150);
    let pixels = vec![0; width * height * 3];

    let options = EncoderOptions::new(width, height, ColorSpace::RGB, BitDepth::Eight);
    let result = PngEncoder::new(&pixels, options).encode();

    assert!(matches!(result, Err(PngEncodeErrors::TooLargeImage(_))));
}

#[test]
fn test_wrong_buffer_length_rejected() {
    let pixels = vec![0; 10];

    let options = EncoderOptions::new(4, 4, ColorSpace::RGB, BitDepth::Eight);
    let result = PngEncoder::new(&pixels, options).encode();

    assert!(matches!(
        result,
        Err(PngEncodeErrors::TooShortInput(48, 10))
    ));
}

#[test]
fn test_unsupported_encode_colorspace_rejected() {
    let pixels = vec![0; 4 * 4 * 4];

    let options = EncoderOptions::new(4, 4, ColorSpace::RGBA, BitDepth::Eight);
    let result = PngEncoder::new(&pixels, options).encode();

    assert!(matches!(
        result,
        Err(PngEncodeErrors::UnsupportedColorspace(ColorSpace::RGBA, _))
    ));
}

#[test]
fn test_zero_dimension_encode_rejected() {
    let options = EncoderOptions::new(0, 4, ColorSpace::RGB, BitDepth::Eight);
    let result = PngEncoder::new(&[], options).encode();

    assert!(result.is_err());
}
