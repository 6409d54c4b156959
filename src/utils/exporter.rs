use crate::canvas::{Canvas, PixelSurface};
use crate::error::ExportError;
use image::ImageFormat;
use std::path::Path;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    PNG,
    TIFF,
}

impl ExportFormat {
    /// Pick a format from a file extension, defaulting to PNG.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("tif") || ext.eq_ignore_ascii_case("tiff") => {
                ExportFormat::TIFF
            }
            _ => ExportFormat::PNG,
        }
    }

    fn image_format(&self) -> ImageFormat {
        match self {
            ExportFormat::PNG => ImageFormat::Png,
            ExportFormat::TIFF => ImageFormat::Tiff,
        }
    }
}

/// Write the canvas pixels to an image file.
pub fn export_canvas(canvas: &Canvas, path: &Path, format: ExportFormat) -> Result<(), ExportError> {
    canvas
        .as_image()
        .save_with_format(path, format.image_format())?;
    log::debug!(
        "exported {}x{} canvas to {}",
        canvas.width(),
        canvas.height(),
        path.display()
    );
    Ok(())
}
