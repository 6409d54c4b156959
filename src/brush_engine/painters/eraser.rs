use crate::brush_engine::accumulation::AccumulationStore;
use crate::brush_engine::context::StrokeContext;
use crate::brush_engine::painter::{PainterKind, StrokePainter, StrokeState};
use crate::canvas::{Canvas, ChangeSet, PixelSurface};
use crate::error::StrokeError;
use crate::utils::color::{Color, blend_erase};

/// Removes coverage from the target in proportion to the stamp alpha.
#[derive(Debug, Default)]
pub struct EraserPainter {
    state: StrokeState,
}

impl EraserPainter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StrokePainter for EraserPainter {
    fn kind(&self) -> PainterKind {
        PainterKind::Eraser
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
            let strength = cell.alpha as f32 / 255.0;
            store.blend(target, cell.index, cell.alpha, |dst| {
                blend_erase(strength, Color::from_rgba8(dst)).to_rgba8()
            });
        }
        Ok(())
    }

    fn end(&mut self, description: &str) -> Result<Option<ChangeSet>, StrokeError> {
        self.state.end(description)
    }
}
