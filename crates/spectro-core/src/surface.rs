use std::path::Path;

use image::{ImageFormat, ImageResult, RgbaImage};

use crate::color_map::Rgba;
use crate::spectrogram::DEFAULT_EXTENT;

const BYTES_PER_PIXEL: usize = 4;

/// Fixed-size RGBA raster that the compositor draws into.
///
/// Bytes are stored row-major as `[r, g, b, a]` per pixel, so the buffer can be
/// handed to any host that blits 8-bit RGBA directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelSurface {
    image: RgbaImage,
}

impl PixelSurface {
    /// A fully transparent surface. Extents that do not fit in `u32` fall
    /// back to [`DEFAULT_EXTENT`].
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            image: RgbaImage::new(checked_extent(width, "width"), checked_extent(height, "height")),
        }
    }

    pub fn width(&self) -> usize {
        self.image.width() as usize
    }

    pub fn height(&self) -> usize {
        self.image.height() as usize
    }

    pub fn pixel(&self, x: usize, y: usize) -> Rgba {
        self.image.get_pixel(x as u32, y as u32).0
    }

    pub fn put_pixel(&mut self, x: usize, y: usize, rgba: Rgba) {
        self.image.put_pixel(x as u32, y as u32, image::Rgba(rgba));
    }

    pub fn fill(&mut self, rgba: Rgba) {
        for px in self.image.pixels_mut() {
            px.0 = rgba;
        }
    }

    pub fn fill_row(&mut self, y: usize, rgba: Rgba) {
        let stride = self.stride();
        let buf: &mut [u8] = &mut self.image;
        for px in buf[y * stride..(y + 1) * stride].chunks_exact_mut(BYTES_PER_PIXEL) {
            px.copy_from_slice(&rgba);
        }
    }

    pub fn fill_column(&mut self, x: usize, rgba: Rgba) {
        for y in 0..self.height() {
            self.put_pixel(x, y, rgba);
        }
    }

    /// Scroll the content one row. `toward_end` moves rows down (row 0 opens
    /// up), otherwise up (the last row opens up). The row that falls off the
    /// far edge is lost; the opened row keeps stale pixels until overwritten.
    pub fn shift_rows(&mut self, toward_end: bool) {
        let stride = self.stride();
        let len = stride * self.height();
        if len <= stride {
            return;
        }
        let buf: &mut [u8] = &mut self.image;
        if toward_end {
            buf.copy_within(0..len - stride, stride);
        } else {
            buf.copy_within(stride..len, 0);
        }
    }

    /// Scroll the content one column, right when `toward_end`, otherwise left.
    pub fn shift_columns(&mut self, toward_end: bool) {
        let stride = self.stride();
        if stride <= BYTES_PER_PIXEL {
            return;
        }
        let buf: &mut [u8] = &mut self.image;
        for row in buf.chunks_exact_mut(stride) {
            if toward_end {
                row.copy_within(0..stride - BYTES_PER_PIXEL, BYTES_PER_PIXEL);
            } else {
                row.copy_within(BYTES_PER_PIXEL..stride, 0);
            }
        }
    }

    /// Raw `[r, g, b, a]` bytes, row-major.
    pub fn as_raw(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub fn as_image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Pixels packed as little-endian 32-bit words (`0xAABBGGRR`), the layout
    /// a host sees when it views the RGBA bytes through a `u32` array.
    pub fn to_le_words(&self) -> Vec<u32> {
        self.as_raw()
            .chunks_exact(BYTES_PER_PIXEL)
            .map(|px| u32::from_le_bytes([px[0], px[1], px[2], px[3]]))
            .collect()
    }

    pub fn save_png(&self, path: &Path) -> ImageResult<()> {
        self.image.save_with_format(path, ImageFormat::Png)
    }

    fn stride(&self) -> usize {
        self.width() * BYTES_PER_PIXEL
    }
}

fn checked_extent(value: usize, what: &str) -> u32 {
    u32::try_from(value).unwrap_or_else(|_| {
        log::warn!("surface {what} of {value} does not fit, using {DEFAULT_EXTENT}");
        DEFAULT_EXTENT as u32
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba = [255, 0, 0, 255];
    const BLUE: Rgba = [0, 0, 255, 255];

    #[test]
    fn test_new_is_transparent() {
        let s = PixelSurface::new(3, 2);
        assert_eq!(s.as_raw().len(), 3 * 2 * 4);
        assert!(s.as_raw().iter().all(|b| *b == 0));
    }

    #[test]
    fn test_shift_rows_down_and_up() {
        let mut s = PixelSurface::new(2, 3);
        s.fill_row(0, RED);
        s.shift_rows(true);
        assert_eq!(s.pixel(1, 1), RED);
        // Opened row keeps its stale content
        assert_eq!(s.pixel(0, 0), RED);

        let mut s = PixelSurface::new(2, 3);
        s.fill_row(2, BLUE);
        s.shift_rows(false);
        assert_eq!(s.pixel(0, 1), BLUE);
        assert_eq!(s.pixel(0, 0), [0, 0, 0, 0]);
    }

    #[test]
    fn test_shift_columns() {
        let mut s = PixelSurface::new(3, 2);
        s.fill_column(0, RED);
        s.shift_columns(true);
        assert_eq!(s.pixel(1, 0), RED);
        assert_eq!(s.pixel(1, 1), RED);
        assert_eq!(s.pixel(2, 1), [0, 0, 0, 0]);

        s.shift_columns(false);
        s.shift_columns(false);
        assert_eq!(s.pixel(0, 0), [0, 0, 0, 0]);
        assert_eq!(s.pixel(2, 0), [0, 0, 0, 0]);
    }

    #[test]
    fn test_single_line_shift_is_noop() {
        let mut s = PixelSurface::new(4, 1);
        s.fill(RED);
        s.shift_rows(true);
        assert!(s.as_raw().chunks_exact(4).all(|px| px == RED));
    }

    #[test]
    fn test_oversized_extent_falls_back() {
        let Ok(too_big) = usize::try_from(u64::from(u32::MAX) + 1) else {
            return;
        };
        let s = PixelSurface::new(too_big, 2);
        assert_eq!((s.width(), s.height()), (DEFAULT_EXTENT, 2));
    }

    #[test]
    fn test_le_words() {
        let mut s = PixelSurface::new(1, 1);
        s.put_pixel(0, 0, [0x11, 0x22, 0x33, 0x44]);
        assert_eq!(s.to_le_words(), vec![0x4433_2211]);
    }
}
