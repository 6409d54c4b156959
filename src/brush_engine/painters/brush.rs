use crate::brush_engine::accumulation::AccumulationStore;
use crate::brush_engine::context::StrokeContext;
use crate::brush_engine::painter::{PainterKind, StrokePainter, StrokeState};
use crate::canvas::{Canvas, ChangeSet, PixelSurface};
use crate::error::StrokeError;
use crate::utils::color::over_rgba8;

/// Lays the foreground color down with straight-alpha "over" blending.
#[derive(Debug, Default)]
pub struct BrushPainter {
    state: StrokeState,
}

impl BrushPainter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StrokePainter for BrushPainter {
    fn kind(&self) -> PainterKind {
        PainterKind::Brush
    }

    fn is_active(&self) -> bool {
        self.state.is_active()
    }

    fn accumulation(&self) -> Option<&AccumulationStore> {
        self.state.accumulation()
    }

    fn begin(&mut self, target: &dyn PixelSurface, snapshot: Option<Canvas>) -> Result<(), StrokeError> {
        self.state.begin(self.kind(), self.needs_snapshot(), target, snapshot)
    }

    fn stamp_at(
        &mut self,
        target: &mut dyn PixelSurface,
        x: i32,
        y: i32,
        ctx: &StrokeContext<'_>,
    ) -> Result<(), StrokeError> {
        let (store, _) = self.state.parts()?;
        for cell in ctx.targets(&*target, x, y) {
            store.blend(target, cell.index, cell.alpha, |dst| {
                over_rgba8(ctx.color, cell.alpha, dst)
            });
        }
        Ok(())
    }

    fn end(&mut self, description: &str) -> Result<Option<ChangeSet>, StrokeError> {
        self.state.end(description)
    }
}
