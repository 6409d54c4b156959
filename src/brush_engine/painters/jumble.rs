use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::brush_engine::accumulation::AccumulationStore;
use crate::brush_engine::context::StrokeContext;
use crate::brush_engine::painter::{PainterKind, StrokePainter, StrokeState};
use crate::canvas::{Canvas, ChangeSet, PixelSurface};
use crate::error::StrokeError;
use crate::utils::color::Color;

/// Scatters pixels: each covered pixel takes the pre-stroke value of a random
/// neighbor within the brush radius.
#[derive(Debug)]
pub struct JumblePainter {
    state: StrokeState,
    rng: StdRng,
}

impl Default for JumblePainter {
    fn default() -> Self {
        Self::new()
    }
}

impl JumblePainter {
    pub fn new() -> Self {
        Self {
            state: StrokeState::new(),
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    /// Deterministic jumbling, for tests and replays.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            state: StrokeState::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl StrokePainter for JumblePainter {
    fn kind(&self) -> PainterKind {
        PainterKind::Jumble
    }

    fn needs_snapshot(&self) -> bool {
        true
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
        let (store, snapshot) = self.state.parts()?;
        let Some(source) = snapshot else {
            return Err(StrokeError::MissingSnapshot(PainterKind::Jumble));
        };
        let reach = (ctx.size as i32 + 1) / 2;

        for cell in ctx.targets(&*target, x, y) {
            let jx = self.rng.random_range(-reach..=reach);
            let jy = self.rng.random_range(-reach..=reach);
            let Some(picked) = source.get(cell.x + jx, cell.y + jy) else {
                continue;
            };
            let t = cell.alpha as f32 / 255.0;
            let dst = Color::from_rgba8(target.pixel(cell.index));
            let value = dst.lerp(Color::from_rgba8(picked), t).to_rgba8();
            store.write(target, cell.index, cell.alpha, value);
        }
        Ok(())
    }

    fn end(&mut self, description: &str) -> Result<Option<ChangeSet>, StrokeError> {
        self.state.end(description)
    }
}
