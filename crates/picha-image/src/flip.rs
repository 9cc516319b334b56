/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Flip filter: reverse the row order of an image in place

/// Flip an image on the vertical axis
///
///
/// ```text
///
///old image     new image
/// ┌─────────┐   ┌──────────┐
/// │a b c d e│   │f g h i j │
/// │f g h i j│   │a b c d e │
/// └─────────┘   └──────────┘
/// ```
///
/// `width` is the number of values making up one row, for a
/// slice of raw samples that is pixels per row times samples
/// per pixel
///
/// When the image has an odd number of rows the middle row
/// stays where it is
pub fn vertical_flip<T: Copy + Default>(channel: &mut [T], width: usize) {
    // Walk the top half and the bottom half towards the middle
    // exchanging whole rows through a scratch row
    let len = channel.len();

    let (top, bottom) = channel.split_at_mut(len / 2);

    let mut stride = vec![T::default(); width];

    for (t, b) in top
        .chunks_exact_mut(width)
        .zip(bottom.rchunks_exact_mut(width))
    {
        stride.copy_from_slice(t);
        t.copy_from_slice(b);
        b.copy_from_slice(&stride);
    }
}

#[cfg(test)]
mod tests {
    use crate::flip::vertical_flip;

    #[test]
    fn test_flip_even_rows() {
        let mut rows = vec![1, 1, 2, 2, 3, 3, 4, 4];

        vertical_flip(&mut rows, 2);

        assert_eq!(rows, vec![4, 4, 3, 3, 2, 2, 1, 1]);
    }

    #[test]
    fn test_flip_odd_rows_keeps_middle() {
        let mut rows = vec![1, 1, 2, 2, 3, 3];

        vertical_flip(&mut rows, 2);

        assert_eq!(rows, vec![3, 3, 2, 2, 1, 1]);
    }

    #[test]
    fn test_flip_is_an_involution() {
        let original: Vec<u8> = (0..60).collect();
        let mut rows = original.clone();

        vertical_flip(&mut rows, 6);
        vertical_flip(&mut rows, 6);

        assert_eq!(rows, original);
    }
}
