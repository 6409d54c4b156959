use crate::brush_engine::accumulation::AccumulationStore;
use crate::brush_engine::context::StrokeContext;
use crate::brush_engine::painter::{PainterKind, StrokePainter, StrokeState};
use crate::canvas::{Canvas, ChangeSet, PixelSurface};
use crate::error::StrokeError;
use crate::utils::color::Color;

/// Fraction of the picked-up paint deposited per stamp at full alpha.
const SMUDGE_STRENGTH: f32 = 0.6;

/// Drags paint from the previous stamp position onto the current one.
///
/// Each symmetry slot keeps its own previous position, so a mirrored copy
/// drags along its own trail.
#[derive(Debug, Default)]
pub struct SmudgePainter {
    state: StrokeState,
    last: Vec<Option<(i32, i32)>>,
}

impl SmudgePainter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StrokePainter for SmudgePainter {
    fn kind(&self) -> PainterKind {
        PainterKind::Smudge
    }

    fn is_active(&self) -> bool {
        self.state.is_active()
    }

    fn accumulation(&self) -> Option<&AccumulationStore> {
        self.state.accumulation()
    }

    fn begin(&mut self, target: &dyn PixelSurface, snapshot: Option<Canvas>) -> Result<(), StrokeError> {
        self.state.begin(self.kind(), self.needs_snapshot(), target, snapshot)?;
        self.last.clear();
        Ok(())
    }

    fn stamp_at(
        &mut self,
        target: &mut dyn PixelSurface,
        x: i32,
        y: i32,
        ctx: &StrokeContext<'_>,
    ) -> Result<(), StrokeError> {
        let (store, _) = self.state.parts()?;
        if self.last.len() <= ctx.slot {
            self.last.resize(ctx.slot + 1, None);
        }
        // The first stamp only picks paint up.
        let Some((lx, ly)) = self.last[ctx.slot].replace((x, y)) else {
            return Ok(());
        };
        if (lx, ly) == (x, y) {
            return Ok(());
        }

        // Sample everything first so this stamp never reads its own output.
        let moves: Vec<_> = ctx
            .targets(&*target, x, y)
            .into_iter()
            .filter_map(|cell| {
                let carried = target.pixel_at(lx + cell.dx, ly + cell.dy)?;
                Some((cell, carried))
            })
            .collect();

        for (cell, carried) in moves {
            let t = SMUDGE_STRENGTH * cell.alpha as f32 / 255.0;
            let dst = Color::from_rgba8(target.pixel(cell.index));
            let value = dst.lerp(Color::from_rgba8(carried), t).to_rgba8();
            store.write(target, cell.index, cell.alpha, value);
        }
        Ok(())
    }

    fn end(&mut self, description: &str) -> Result<Option<ChangeSet>, StrokeError> {
        self.last.clear();
        self.state.end(description)
    }
}
