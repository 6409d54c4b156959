pub mod brush_engine;
pub mod canvas;
pub mod error;
pub mod fill;
pub mod selection;
pub mod symmetry;
pub mod utils;

pub use brush_engine::brush_options::{BrushSettings, BrushShape, BrushTip, ToolSettings};
pub use brush_engine::footprint::{CustomBrush, CustomBrushId, FootprintCache};
pub use brush_engine::painter::{PainterKind, StrokePainter};
pub use brush_engine::painters::PainterRegistry;
pub use brush_engine::stroke::StrokeSession;
pub use canvas::{Canvas, ChangeSet, History, Layer, PixelSurface, Rgba8};
pub use error::{ExportError, StrokeError};
pub use fill::{FillRequest, FloodFillEngine, ShapeFillRenderer, ShapeFillRequest};
pub use selection::{Selection, SelectionMask, SelectionShape};
pub use symmetry::{MirrorSymmetry, SymmetrySource};
