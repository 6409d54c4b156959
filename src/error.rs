use thiserror::Error;

use crate::brush_engine::footprint::CustomBrushId;
use crate::brush_engine::painter::PainterKind;

/// Misuse of the stroke engine by a calling tool.
///
/// These are programmer errors: the caller is expected to log them and drop
/// the current stroke, not to retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StrokeError {
    #[error("a stroke is already active")]
    AlreadyActive,
    #[error("no stroke is active")]
    NotActive,
    #[error("the {0:?} painter needs a pre-stroke snapshot")]
    MissingSnapshot(PainterKind),
    #[error("no painter registered for {0:?}")]
    UnregisteredPainter(PainterKind),
    #[error("unknown custom brush {0}")]
    UnknownBrush(CustomBrushId),
    #[error("layer \"{0}\" is locked")]
    LayerLocked(String),
    #[error("layer \"{0}\" has no mask to edit")]
    MissingMask(String),
}

/// Failure while writing a canvas to disk.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write image: {0}")]
    Image(#[from] image::ImageError),
}
