use std::sync::Arc;

use crate::brush_engine::brush_options::{BrushTip, ToolSettings};
use crate::brush_engine::falloff::stamp_alpha;
use crate::brush_engine::footprint::{BrushLibrary, Footprint, FootprintCache};
use crate::canvas::{PixelSurface, Rgba8};
use crate::error::StrokeError;
use crate::selection::Selection;
use crate::symmetry::SymmetrySource;

/// One footprint cell that survived bounds, selection and alpha checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StampTarget {
    pub index: usize,
    pub x: i32,
    pub y: i32,
    pub dx: i32,
    pub dy: i32,
    pub alpha: u8,
}

/// Immutable settings for a single stamp or line call.
///
/// Built fresh from the live tool settings for every call, since the brush
/// can be changed while a stroke is in progress.
#[derive(Clone)]
pub struct StrokeContext<'a> {
    pub color: Rgba8,
    pub secondary: Rgba8,
    pub tolerance: u8,
    pub size: u32,
    pub tip: BrushTip,
    pub density: u8,
    pub opacity: u8,
    pub footprint: Arc<Footprint>,
    pub selection: Option<&'a dyn Selection>,
    pub symmetry: Option<&'a dyn SymmetrySource>,
    /// Symmetry slot of the copy being stamped; 0 is the original.
    pub slot: usize,
}

impl<'a> StrokeContext<'a> {
    /// Resolve the footprint for the current brush and capture the settings.
    pub fn new(
        settings: &ToolSettings,
        cache: &FootprintCache,
        brushes: &BrushLibrary,
    ) -> Result<Self, StrokeError> {
        let brush = &settings.brush;
        let footprint = match brush.tip {
            BrushTip::Builtin(shape) => cache.offsets(shape, brush.size),
            BrushTip::Custom(id) => {
                let custom = brushes.get(id).ok_or(StrokeError::UnknownBrush(id))?;
                cache.custom_offsets(id, custom, brush.size)
            }
        };

        Ok(Self {
            color: settings.foreground,
            secondary: settings.background,
            tolerance: settings.tolerance,
            size: footprint.size(),
            tip: brush.tip,
            density: brush.density,
            opacity: brush.opacity,
            footprint,
            selection: None,
            symmetry: None,
            slot: 0,
        })
    }

    pub fn with_selection(mut self, selection: Option<&'a dyn Selection>) -> Self {
        self.selection = selection;
        self
    }

    pub fn with_symmetry(mut self, symmetry: Option<&'a dyn SymmetrySource>) -> Self {
        self.symmetry = symmetry;
        self
    }

    /// Nothing this context stamps can change a pixel.
    pub fn is_noop(&self) -> bool {
        self.opacity == 0
    }

    /// Alpha for a footprint offset.
    pub fn alpha_at(&self, dx: i32, dy: i32) -> u8 {
        stamp_alpha(dx, dy, self.size, self.tip, self.density, self.opacity)
    }

    /// Whether the selection (if any) lets `(x, y)` be painted.
    pub fn allows(&self, x: i32, y: i32) -> bool {
        self.selection.is_none_or(|s| s.contains(x, y))
    }

    /// Points a stamp at `(x, y)` fans out to, itself plus its mirrors, each
    /// with its symmetry slot.
    pub fn stamp_points(&self, x: i32, y: i32, width: u32, height: u32) -> Vec<(usize, (i32, i32))> {
        match self.symmetry {
            Some(symmetry) => symmetry.slotted_points(x, y, width, height),
            None => vec![(0, (x, y))],
        }
    }

    /// Cells a stamp centered on `(x, y)` may touch, in footprint order.
    pub fn targets(&self, surface: &dyn PixelSurface, x: i32, y: i32) -> Vec<StampTarget> {
        if self.is_noop() {
            return Vec::new();
        }
        self.footprint
            .iter()
            .filter_map(|(dx, dy)| {
                let (px, py) = (x + dx, y + dy);
                let index = surface.index_of(px, py)?;
                if !self.allows(px, py) {
                    return None;
                }
                let alpha = self.alpha_at(dx, dy);
                (alpha > 0).then_some(StampTarget {
                    index,
                    x: px,
                    y: py,
                    dx,
                    dy,
                    alpha,
                })
            })
            .collect()
    }
}
