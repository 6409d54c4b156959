use image::RgbaImage;

use super::surface::{PixelSurface, Rgba8, TRANSPARENT};
use crate::error::StrokeError;

/// Contiguous RGBA8 pixel buffer backed by an `image::RgbaImage`.
#[derive(Clone, Debug, PartialEq)]
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    /// Create a fully transparent canvas.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, TRANSPARENT)
    }

    /// Create a canvas where every pixel is `color`.
    pub fn filled(width: u32, height: u32, color: Rgba8) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, color),
        }
    }

    pub fn as_image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn pixel_count(&self) -> usize {
        self.image.width() as usize * self.image.height() as usize
    }

    /// Bounds-checked read.
    pub fn get(&self, x: i32, y: i32) -> Option<Rgba8> {
        self.pixel_at(x, y)
    }

    /// Bounds-checked write; off-canvas coordinates are ignored.
    pub fn put(&mut self, x: i32, y: i32, color: Rgba8) {
        if let Some(index) = self.index_of(x, y) {
            self.set_pixel(index, color);
        }
    }

    /// Overwrite every pixel with `color`.
    pub fn clear(&mut self, color: Rgba8) {
        for px in self.image.pixels_mut() {
            *px = color;
        }
    }
}

impl PixelSurface for Canvas {
    fn width(&self) -> u32 {
        self.image.width()
    }

    fn height(&self) -> u32 {
        self.image.height()
    }

    fn pixel(&self, index: usize) -> Rgba8 {
        let raw: &[u8] = &self.image;
        let o = index * 4;
        image::Rgba([raw[o], raw[o + 1], raw[o + 2], raw[o + 3]])
    }

    fn set_pixel(&mut self, index: usize, color: Rgba8) {
        let raw: &mut [u8] = &mut self.image;
        let o = index * 4;
        raw[o..o + 4].copy_from_slice(&color.0);
    }

    fn snapshot(&self) -> Canvas {
        self.clone()
    }
}

/// Which buffer of a layer an edit applies to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EditTarget {
    #[default]
    Pixels,
    Mask,
}

/// Single painting layer: pixel content plus an optional mask.
#[derive(Clone, Debug)]
pub struct Layer {
    pub name: String,
    pub locked: bool,
    pub edit_target: EditTarget,
    pixels: Canvas,
    mask: Option<Canvas>,
}

impl Layer {
    /// Create an unlocked, transparent layer.
    pub fn new(name: impl Into<String>, width: u32, height: u32) -> Self {
        Self::from_canvas(name, Canvas::new(width, height))
    }

    pub fn from_canvas(name: impl Into<String>, pixels: Canvas) -> Self {
        Self {
            name: name.into(),
            locked: false,
            edit_target: EditTarget::Pixels,
            pixels,
            mask: None,
        }
    }

    /// Attach an opaque white mask (fully revealing) if the layer has none.
    pub fn add_mask(&mut self) {
        if self.mask.is_none() {
            let (w, h) = (self.pixels.width(), self.pixels.height());
            self.mask = Some(Canvas::filled(w, h, image::Rgba([255, 255, 255, 255])));
        }
    }

    pub fn pixels(&self) -> &Canvas {
        &self.pixels
    }

    pub fn mask(&self) -> Option<&Canvas> {
        self.mask.as_ref()
    }

    /// Resolve the buffer currently being edited.
    pub fn edit_surface(&self) -> Result<&Canvas, StrokeError> {
        match self.edit_target {
            EditTarget::Pixels => Ok(&self.pixels),
            EditTarget::Mask => self
                .mask
                .as_ref()
                .ok_or_else(|| StrokeError::MissingMask(self.name.clone())),
        }
    }

    /// Resolve the buffer currently being edited for writing.
    pub fn edit_surface_mut(&mut self) -> Result<&mut Canvas, StrokeError> {
        if self.locked {
            return Err(StrokeError::LayerLocked(self.name.clone()));
        }
        match self.edit_target {
            EditTarget::Pixels => Ok(&mut self.pixels),
            EditTarget::Mask => self
                .mask
                .as_mut()
                .ok_or_else(|| StrokeError::MissingMask(self.name.clone())),
        }
    }
}
