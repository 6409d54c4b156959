use crate::brush_engine::accumulation::AccumulationStore;
use crate::brush_engine::context::StrokeContext;
use crate::brush_engine::painter::{PainterKind, StrokePainter, StrokeState};
use crate::canvas::{Canvas, ChangeSet, PixelSurface};
use crate::error::StrokeError;
use crate::utils::color::{colors_similar, over_rgba8};

/// Repaints only pixels whose pre-stroke color is within tolerance of the
/// secondary color, leaving everything else alone.
#[derive(Debug, Default)]
pub struct ReplacerPainter {
    state: StrokeState,
}

impl ReplacerPainter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StrokePainter for ReplacerPainter {
    fn kind(&self) -> PainterKind {
        PainterKind::Replacer
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
            let original = store.original(&*target, cell.index);
            if !colors_similar(original, ctx.secondary, ctx.tolerance) {
                continue;
            }
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
