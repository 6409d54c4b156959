use crate::brush_engine::accumulation::AccumulationStore;
use crate::brush_engine::context::StrokeContext;
use crate::brush_engine::painter::{PainterKind, StrokePainter, StrokeState};
use crate::canvas::{Canvas, ChangeSet, PixelSurface, Rgba8};
use crate::error::StrokeError;
use crate::utils::color::Color;

/// Softens the target by pulling each pixel toward the 3x3 average of the
/// pre-stroke image, so repeated passes never compound.
#[derive(Debug, Default)]
pub struct BlurPainter {
    state: StrokeState,
}

impl BlurPainter {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Alpha-weighted 3x3 box average around `(x, y)`, clipped to the surface.
fn box_average(source: &Canvas, x: i32, y: i32) -> Option<Color> {
    let mut sum = [0.0f32; 3];
    let mut alpha = 0.0;
    let mut count = 0;
    for ny in y - 1..=y + 1 {
        for nx in x - 1..=x + 1 {
            let Some(px) = source.get(nx, ny) else {
                continue;
            };
            let c = Color::from_rgba8(px);
            sum[0] += c.r * c.a;
            sum[1] += c.g * c.a;
            sum[2] += c.b * c.a;
            alpha += c.a;
            count += 1;
        }
    }
    if count == 0 {
        return None;
    }
    if alpha <= f32::EPSILON {
        return Some(Color::TRANSPARENT);
    }
    Some(Color {
        r: sum[0] / alpha,
        g: sum[1] / alpha,
        b: sum[2] / alpha,
        a: alpha / count as f32,
    })
}

impl StrokePainter for BlurPainter {
    fn kind(&self) -> PainterKind {
        PainterKind::Blur
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
            return Err(StrokeError::MissingSnapshot(PainterKind::Blur));
        };
        for cell in ctx.targets(&*target, x, y) {
            let Some(average) = box_average(source, cell.x, cell.y) else {
                continue;
            };
            let t = cell.alpha as f32 / 255.0;
            store.blend(target, cell.index, cell.alpha, |dst: Rgba8| {
                Color::from_rgba8(dst).lerp(average, t).to_rgba8()
            });
        }
        Ok(())
    }

    fn end(&mut self, description: &str) -> Result<Option<ChangeSet>, StrokeError> {
        self.state.end(description)
    }
}
