use crate::brush_engine::accumulation::AccumulationStore;
use crate::brush_engine::context::StrokeContext;
use crate::canvas::{Canvas, ChangeSet, PixelSurface};
use crate::error::StrokeError;
use crate::utils::vector::Vec2;

/// The closed set of stroke tools.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PainterKind {
    Brush,
    Eraser,
    Blur,
    Smudge,
    Jumble,
    Replacer,
}

impl PainterKind {
    pub const ALL: [PainterKind; 6] = [
        PainterKind::Brush,
        PainterKind::Eraser,
        PainterKind::Blur,
        PainterKind::Smudge,
        PainterKind::Jumble,
        PainterKind::Replacer,
    ];

    /// Default undo label for strokes made with this tool.
    pub fn label(self) -> &'static str {
        match self {
            PainterKind::Brush => "Brush",
            PainterKind::Eraser => "Eraser",
            PainterKind::Blur => "Blur",
            PainterKind::Smudge => "Smudge",
            PainterKind::Jumble => "Jumble",
            PainterKind::Replacer => "Color Replace",
        }
    }
}

/// A stroke tool.
///
/// Idle until [`begin`](Self::begin), active until [`end`](Self::end).
/// Beginning twice, or stamping/ending while idle, is an error.
pub trait StrokePainter {
    fn kind(&self) -> PainterKind;

    /// Whether `begin` must be handed a copy of the untouched target.
    fn needs_snapshot(&self) -> bool {
        false
    }

    fn is_active(&self) -> bool;

    /// Per-pixel records of the stroke in progress.
    fn accumulation(&self) -> Option<&AccumulationStore>;

    fn begin(&mut self, target: &dyn PixelSurface, snapshot: Option<Canvas>) -> Result<(), StrokeError>;

    fn stamp_at(
        &mut self,
        target: &mut dyn PixelSurface,
        x: i32,
        y: i32,
        ctx: &StrokeContext<'_>,
    ) -> Result<(), StrokeError>;

    /// Stamp at every unit step from `(x0, y0)` to `(x1, y1)` inclusive, so
    /// fast pointer movement leaves no gaps.
    fn stamp_line(
        &mut self,
        target: &mut dyn PixelSurface,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        ctx: &StrokeContext<'_>,
    ) -> Result<(), StrokeError> {
        for (x, y) in line_steps(x0, y0, x1, y1) {
            self.stamp_at(target, x, y, ctx)?;
        }
        Ok(())
    }

    /// Finish the stroke. Returns `None` when no pixel ended up different.
    fn end(&mut self, description: &str) -> Result<Option<ChangeSet>, StrokeError>;
}

/// Integer points from `(x0, y0)` to `(x1, y1)`, one per step along the
/// longer axis, rounded to the nearest pixel.
pub fn line_steps(x0: i32, y0: i32, x1: i32, y1: i32) -> Vec<(i32, i32)> {
    let (start, end) = (Vec2::from((x0, y0)), Vec2::from((x1, y1)));
    let steps = (x1 - x0).abs().max((y1 - y0).abs());
    if steps == 0 {
        return vec![(x0, y0)];
    }
    (0..=steps)
        .map(|i| start.lerp(end, i as f32 / steps as f32).round())
        .collect()
}

/// Lifecycle state shared by every painter: the accumulation store while a
/// stroke is active plus the optional pre-stroke snapshot.
#[derive(Debug, Default)]
pub struct StrokeState {
    accumulation: Option<AccumulationStore>,
    snapshot: Option<Canvas>,
}

impl StrokeState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.accumulation.is_some()
    }

    /// Move to the active state.
    pub fn begin(
        &mut self,
        kind: PainterKind,
        needs_snapshot: bool,
        target: &dyn PixelSurface,
        snapshot: Option<Canvas>,
    ) -> Result<(), StrokeError> {
        if self.is_active() {
            return Err(StrokeError::AlreadyActive);
        }
        if needs_snapshot && snapshot.is_none() {
            return Err(StrokeError::MissingSnapshot(kind));
        }
        self.snapshot = if needs_snapshot { snapshot } else { None };
        self.accumulation = Some(AccumulationStore::new());
        log::trace!("{kind:?} stroke started on {}x{}", target.width(), target.height());
        Ok(())
    }

    pub fn accumulation(&self) -> Option<&AccumulationStore> {
        self.accumulation.as_ref()
    }

    /// Store and snapshot of the active stroke.
    pub fn parts(&mut self) -> Result<(&mut AccumulationStore, Option<&Canvas>), StrokeError> {
        let store = self.accumulation.as_mut().ok_or(StrokeError::NotActive)?;
        Ok((store, self.snapshot.as_ref()))
    }

    /// Back to idle; everything per-stroke is dropped even when the result
    /// is `None`.
    pub fn end(&mut self, description: &str) -> Result<Option<ChangeSet>, StrokeError> {
        let mut store = self.accumulation.take().ok_or(StrokeError::NotActive)?;
        self.snapshot = None;
        Ok(store.take_change_set(description))
    }
}
