//! Raster view of a bitstream: one pixel per bit, row-major.
//!
//! `true` bits are black and `false` bits white. Cells past the end of the
//! stream in the last row are red.

use crate::error::{Error, Result};
use image::{Rgb, RgbImage};

const ONE: Rgb<u8> = Rgb([0, 0, 0]);
const ZERO: Rgb<u8> = Rgb([255, 255, 255]);
const PAST_END: Rgb<u8> = Rgb([255, 0, 0]);

/// Columns and rows needed to lay out `bits` pixels `cols` wide.
pub fn dimensions(bits: u64, cols: u32) -> Result<(u32, u32)> {
    if cols == 0 {
        return Err(Error::InvalidColumns);
    }
    let rows = u32::try_from(bits.div_ceil(cols as u64))
        .map_err(|_| Error::PictureTooLarge { bits, cols })?;
    Ok((cols, rows))
}

pub fn render(bits: &[bool], cols: u32) -> Result<RgbImage> {
    let (cols, rows) = dimensions(bits.len() as u64, cols)?;
    debug!("render {} bits as {cols}x{rows}", bits.len());
    Ok(RgbImage::from_fn(cols, rows, |x, y| {
        let index = y as usize * cols as usize + x as usize;
        match bits.get(index) {
            Some(true) => ONE,
            Some(false) => ZERO,
            None => PAST_END,
        }
    }))
}

pub fn render_bytes(bytes: &[u8], cols: u32) -> Result<RgbImage> {
    let bits: Vec<bool> = bytes
        .iter()
        .flat_map(|byte| (0..8).rev().map(move |shift| (byte >> shift) & 1 == 1))
        .collect();
    render(&bits, cols)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_dimensions() {
        let image = render_bytes(&[0xF0, 0x0F], 6).unwrap();
        assert_eq!(image.dimensions(), (6, 3));
        assert_eq!(*image.get_pixel(0, 0), ONE);
        assert_eq!(*image.get_pixel(4, 0), ZERO);
        // bit 12 is the first 1 of 0x0F
        assert_eq!(*image.get_pixel(0, 2), ONE);
        assert_eq!(*image.get_pixel(4, 2), PAST_END);
        assert_eq!(*image.get_pixel(5, 2), PAST_END);
    }

    #[test]
    fn test_render_empty() {
        let image = render(&[], 8).unwrap();
        assert_eq!(image.dimensions(), (8, 0));
    }

    #[test]
    fn test_dimensions_overflow() {
        assert_eq!(dimensions(u32::MAX as u64, 1).unwrap(), (1, u32::MAX));
        assert_eq!(dimensions(1 << 32, 2).unwrap(), (2, 1 << 31));
        assert!(matches!(
            dimensions(1 << 32, 1),
            Err(Error::PictureTooLarge { bits, cols: 1 }) if bits == 1 << 32
        ));
    }

    #[test]
    fn test_render_zero_columns() {
        assert!(matches!(render(&[true], 0), Err(Error::InvalidColumns)));
    }
}
