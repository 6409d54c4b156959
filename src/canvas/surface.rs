use image::Rgba;

use super::canvas::Canvas;

/// One 8-bit RGBA pixel with straight alpha.
pub type Rgba8 = Rgba<u8>;

pub const TRANSPARENT: Rgba8 = Rgba([0, 0, 0, 0]);

/// A pixel buffer the engine can paint into.
///
/// Pixels are addressed by flat index `y * width + x`. Everything the engine
/// writes goes through `set_pixel`; there is no copy-on-write.
pub trait PixelSurface {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Read the pixel at a flat index. The index must be in range.
    fn pixel(&self, index: usize) -> Rgba8;

    /// Write the pixel at a flat index. The index must be in range.
    fn set_pixel(&mut self, index: usize, color: Rgba8);

    /// Flat index for `(x, y)`, or `None` when the coordinate is off the surface.
    fn index_of(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width() as i32 || y >= self.height() as i32 {
            return None;
        }
        Some(y as usize * self.width() as usize + x as usize)
    }

    /// Bounds-checked read by coordinate.
    fn pixel_at(&self, x: i32, y: i32) -> Option<Rgba8> {
        self.index_of(x, y).map(|index| self.pixel(index))
    }

    /// Copy of the current pixels, for painters that sample unmodified data.
    fn snapshot(&self) -> Canvas {
        let mut copy = Canvas::new(self.width(), self.height());
        for index in 0..copy.pixel_count() {
            copy.set_pixel(index, self.pixel(index));
        }
        copy
    }
}
