/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! A set of filter functions for de-filtering png scanlines
//!
//! There exist two types of filter functions here,
//! special filter functions for the first scanline which has special conditions
//! and normal filter functions,
//!
//! The special first scanlines have a suffix _first on them and are only called
//! for the first scanline.
//!
//! All arithmetic is modulo 256, carried out with wrapping adds.

#[allow(clippy::manual_memcpy)]
pub fn handle_sub(raw: &[u8], current: &mut [u8], components: usize) {
    if current.len() < components || raw.len() < components {
        return;
    }
    // handle leftmost pixel explicitly, it has no left neighbour
    for i in 0..components {
        current[i] = raw[i];
    }
    // raw length is one row, so always keep it in check
    let end = current.len().min(raw.len());

    for i in components..end {
        let a = current[i - components];
        current[i] = raw[i].wrapping_add(a);
    }
}

pub fn handle_up(prev_row: &[u8], raw: &[u8], current: &mut [u8]) {
    for ((filt, recon), up) in raw.iter().zip(current).zip(prev_row) {
        *recon = (*filt).wrapping_add(*up)
    }
}

#[allow(clippy::manual_memcpy)]
pub fn handle_avg(prev_row: &[u8], raw: &[u8], current: &mut [u8], components: usize) {
    if raw.len() < components || current.len() < components {
        return;
    }

    // handle leftmost pixel explicitly, its left neighbour is zero
    for i in 0..components {
        current[i] = raw[i].wrapping_add(prev_row[i] >> 1);
    }
    // raw length is one row, so always keep it in check
    let end = current.len().min(raw.len()).min(prev_row.len());

    if components > 8 {
        // optimizer hint to tell the compiler that we don't see this ever happening
        return;
    }
    for i in components..end {
        let a = u16::from(current[i - components]);
        let b = u16::from(prev_row[i]);

        let c = (((a + b) >> 1) & 0xFF) as u8;

        current[i] = raw[i].wrapping_add(c);
    }
}

/// Handle images with the first scanline as an average scanline
///
/// The above row is treated as zero
#[allow(clippy::manual_memcpy)]
pub fn handle_avg_first(raw: &[u8], current: &mut [u8], components: usize) {
    if raw.len() < components || current.len() < components {
        return;
    }

    for i in 0..components {
        current[i] = raw[i];
    }
    let end = current.len().min(raw.len());

    for i in components..end {
        let avg = current[i - components] >> 1;
        current[i] = raw[i].wrapping_add(avg)
    }
}

#[allow(clippy::manual_memcpy)]
pub fn handle_paeth(prev_row: &[u8], raw: &[u8], current: &mut [u8], components: usize) {
    if raw.len() < components || current.len() < components {
        return;
    }

    // handle leftmost pixel explicitly, left and top-left are zero
    for i in 0..components {
        current[i] = raw[i].wrapping_add(paeth(0, prev_row[i], 0));
    }
    // raw length is one row, so always keep it in check
    let end = current.len().min(raw.len()).min(prev_row.len());

    if components > 8 {
        // optimizer hint to tell the compiler that we don't see this ever happening
        return;
    }

    for i in components..end {
        let paeth_res = paeth(
            current[i - components],
            prev_row[i],
            prev_row[i - components]
        );
        current[i] = raw[i].wrapping_add(paeth_res)
    }
}

/// Handle images with the first scanline as a paeth scanline
///
/// Special in that the above row is treated as zero
#[allow(clippy::manual_memcpy)]
pub fn handle_paeth_first(raw: &[u8], current: &mut [u8], components: usize) {
    if raw.len() < components || current.len() < components {
        return;
    }

    for i in 0..components {
        current[i] = raw[i];
    }
    let end = current.len().min(raw.len());

    for i in components..end {
        let paeth_res = paeth(current[i - components], 0, 0);
        current[i] = raw[i].wrapping_add(paeth_res)
    }
}

/// The paeth predictor
///
/// Chooses whichever of left, above and upper left is closest to
/// the initial estimate `a + b - c`, ties break towards left, then
/// above, then upper left
#[inline(always)]
pub fn paeth(a: u8, b: u8, c: u8) -> u8 {
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

#[cfg(test)]
mod tests {
    use crate::filters::{
        handle_avg, handle_avg_first, handle_paeth, handle_sub, handle_up, paeth
    };

    #[test]
    fn test_sub_adds_decoded_left_pixel() {
        let raw = [10, 20, 30, 5, 5, 5];
        let mut current = [0; 6];

        handle_sub(&raw, &mut current, 3);

        assert_eq!(current, [10, 20, 30, 15, 25, 35]);
    }

    #[test]
    fn test_sub_accumulates_across_row() {
        let raw = [1, 2, 3, 1, 1, 1, 1, 1, 1];
        let mut current = [0; 9];

        handle_sub(&raw, &mut current, 3);

        assert_eq!(current, [1, 2, 3, 2, 3, 4, 3, 4, 5]);
    }

    #[test]
    fn test_up_wraps_modulo_256() {
        let prev_row = [5, 5, 10];
        let raw = [1, 250, 255];
        let mut current = [0; 3];

        handle_up(&prev_row, &raw, &mut current);

        assert_eq!(current, [6, 255, 9]);
    }

    #[test]
    fn test_avg_uses_wide_intermediate() {
        // left + up would overflow a byte before halving
        let prev_row = [254, 0, 0, 254, 0, 0];
        let raw = [200, 0, 0, 10, 0, 0];
        let mut current = [0; 6];

        handle_avg(&prev_row, &raw, &mut current, 3);

        // first pixel: 200 + (254 >> 1), second: 10 + ((71 + 254) >> 1)
        assert_eq!(current[0], 71);
        assert_eq!(current[3], 172);
    }

    #[test]
    fn test_avg_first_row_halves_left_only() {
        let raw = [100, 0, 0, 4, 0, 0];
        let mut current = [0; 6];

        handle_avg_first(&raw, &mut current, 3);

        assert_eq!(current[0], 100);
        assert_eq!(current[3], 54);
    }

    #[test]
    fn test_paeth_tie_breaks() {
        // all candidates tie, left wins
        assert_eq!(paeth(4, 4, 4), 4);
        // above and upper left tie, above wins
        assert_eq!(paeth(0, 3, 1), 3);
        // clean nearest pick, upper left
        assert_eq!(paeth(10, 6, 8), 8);
    }

    #[test]
    fn test_paeth_row_reconstruction() {
        let prev_row = [10, 20, 30, 40, 50, 60];
        let raw = [1, 1, 1, 1, 1, 1];
        let mut current = [0; 6];

        handle_paeth(&prev_row, &raw, &mut current, 3);

        // leftmost pixel predicts from above only
        assert_eq!(&current[..3], &[11, 21, 31]);
        // then each byte picks the nearest of left, above, upper left
        assert_eq!(&current[3..], &[41, 51, 61]);
    }
}
