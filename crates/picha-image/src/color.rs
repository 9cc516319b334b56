/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! A single pixel value, three eight bit samples in r, g, b order
use bytemuck::{Pod, Zeroable};

/// A red, green and blue triple describing one pixel
///
/// The struct is three consecutive bytes with no padding
/// so a pixel buffer can be viewed as raw samples and back
/// without copying
#[repr(C)]
#[derive(Copy, Clone, Default, Debug, Eq, PartialEq)]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8
}

// Safety: three u8 fields, size 3, align 1, no padding and
// every bit pattern is a valid color
unsafe impl Zeroable for RgbColor {}

unsafe impl Pod for RgbColor {}

impl RgbColor {
    pub const BLACK: RgbColor = RgbColor::new(0, 0, 0);
    pub const WHITE: RgbColor = RgbColor::new(255, 255, 255);
    pub const RED: RgbColor = RgbColor::new(255, 0, 0);
    pub const GREEN: RgbColor = RgbColor::new(0, 255, 0);
    pub const BLUE: RgbColor = RgbColor::new(0, 0, 255);
    pub const YELLOW: RgbColor = RgbColor::new(255, 255, 0);
    pub const MAGENTA: RgbColor = RgbColor::new(255, 0, 255);
    pub const CYAN: RgbColor = RgbColor::new(0, 255, 255);

    /// Create a new color from its components
    pub const fn new(r: u8, g: u8, b: u8) -> RgbColor {
        RgbColor { r, g, b }
    }
}

#[cfg(test)]
mod tests {
    use crate::color::RgbColor;

    #[test]
    fn test_layout_matches_samples() {
        let colors = [RgbColor::new(1, 2, 3), RgbColor::new(4, 5, 6)];
        let bytes: &[u8] = bytemuck::cast_slice(&colors);

        assert_eq!(bytes, &[1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_named_colors() {
        assert_eq!(RgbColor::WHITE, RgbColor::new(255, 255, 255));
        assert_eq!(RgbColor::BLACK, RgbColor::default());
    }
}
