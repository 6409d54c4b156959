use std::sync::Arc;

use crate::brush_engine::brush_options::ToolSettings;
use crate::brush_engine::context::StrokeContext;
use crate::brush_engine::footprint::{BrushLibrary, FootprintCache};
use crate::brush_engine::painter::{PainterKind, StrokePainter, line_steps};
use crate::brush_engine::painters::PainterRegistry;
use crate::canvas::{ChangeSet, Layer, PixelSurface};
use crate::error::StrokeError;
use crate::selection::Selection;
use crate::symmetry::SymmetrySource;
use crate::utils::profiler::ScopeTimer;

/// Drives one painter at a time against a layer.
///
/// Tool settings may change between stamps; every stamp reads them fresh.
pub struct StrokeSession {
    settings: ToolSettings,
    footprints: Arc<FootprintCache>,
    brushes: BrushLibrary,
    registry: PainterRegistry,
    selection: Option<Box<dyn Selection>>,
    symmetry: Option<Box<dyn SymmetrySource>>,
    active: Option<Box<dyn StrokePainter>>,
    stroke_timer: Option<ScopeTimer>,
}

impl Default for StrokeSession {
    fn default() -> Self {
        Self::new()
    }
}

impl StrokeSession {
    /// Session backed by the process-wide footprint cache.
    pub fn new() -> Self {
        Self::with_cache(FootprintCache::shared())
    }

    pub fn with_cache(footprints: Arc<FootprintCache>) -> Self {
        Self {
            settings: ToolSettings::default(),
            footprints,
            brushes: BrushLibrary::new(),
            registry: PainterRegistry::default(),
            selection: None,
            symmetry: None,
            active: None,
            stroke_timer: None,
        }
    }

    pub fn settings(&self) -> &ToolSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut ToolSettings {
        &mut self.settings
    }

    pub fn footprints(&self) -> &FootprintCache {
        &self.footprints
    }

    pub fn brushes(&self) -> &BrushLibrary {
        &self.brushes
    }

    /// Brush library plus the cache its edits must invalidate.
    pub fn brushes_mut(&mut self) -> (&mut BrushLibrary, &FootprintCache) {
        (&mut self.brushes, self.footprints.as_ref())
    }

    pub fn registry_mut(&mut self) -> &mut PainterRegistry {
        &mut self.registry
    }

    pub fn set_selection(&mut self, selection: Option<Box<dyn Selection>>) {
        self.selection = selection;
    }

    pub fn set_symmetry(&mut self, symmetry: Option<Box<dyn SymmetrySource>>) {
        self.symmetry = symmetry;
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_kind(&self) -> Option<PainterKind> {
        self.active.as_ref().map(|p| p.kind())
    }

    /// Start a stroke with a freshly built painter of `kind`.
    pub fn begin_tool(&mut self, kind: PainterKind, layer: &Layer) -> Result<(), StrokeError> {
        let painter = self
            .registry
            .create(kind)
            .ok_or(StrokeError::UnregisteredPainter(kind))?;
        self.begin(painter, layer)
    }

    /// Start a stroke on `layer`'s current edit target.
    pub fn begin(&mut self, mut painter: Box<dyn StrokePainter>, layer: &Layer) -> Result<(), StrokeError> {
        if let Some(current) = &self.active {
            log::warn!(
                "begin {:?} ignored: {:?} stroke still active",
                painter.kind(),
                current.kind()
            );
            return Err(StrokeError::AlreadyActive);
        }
        if layer.locked {
            return Err(StrokeError::LayerLocked(layer.name.clone()));
        }

        let surface = layer.edit_surface()?;
        let snapshot = painter.needs_snapshot().then(|| surface.snapshot());
        painter.begin(surface, snapshot)?;

        log::debug!(
            "{:?} stroke on \"{}\" ({:?})",
            painter.kind(),
            layer.name,
            layer.edit_target
        );
        self.active = Some(painter);
        self.stroke_timer = Some(ScopeTimer::new("stroke"));
        Ok(())
    }

    pub fn stamp_at(&mut self, layer: &mut Layer, x: i32, y: i32) -> Result<(), StrokeError> {
        let Self {
            settings,
            footprints,
            brushes,
            selection,
            symmetry,
            active,
            ..
        } = self;
        let painter = active.as_mut().ok_or(StrokeError::NotActive)?;
        let mut ctx = StrokeContext::new(settings, footprints, brushes)?
            .with_selection(selection.as_deref())
            .with_symmetry(symmetry.as_deref());

        let surface = layer.edit_surface_mut()?;
        let (w, h) = (surface.width(), surface.height());
        for (slot, (px, py)) in ctx.stamp_points(x, y, w, h) {
            log::trace!("stamp {:?} at ({px}, {py}), slot {slot}", painter.kind());
            ctx.slot = slot;
            painter.stamp_at(&mut *surface, px, py, &ctx)?;
        }
        Ok(())
    }

    pub fn stamp_line(
        &mut self,
        layer: &mut Layer,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
    ) -> Result<(), StrokeError> {
        let Self {
            settings,
            footprints,
            brushes,
            selection,
            symmetry,
            active,
            ..
        } = self;
        let painter = active.as_mut().ok_or(StrokeError::NotActive)?;
        let mut ctx = StrokeContext::new(settings, footprints, brushes)?
            .with_selection(selection.as_deref())
            .with_symmetry(symmetry.as_deref());

        let surface = layer.edit_surface_mut()?;
        log::trace!("line {:?} ({x0}, {y0}) -> ({x1}, {y1})", painter.kind());
        if ctx.symmetry.is_none() {
            return painter.stamp_line(&mut *surface, x0, y0, x1, y1, &ctx);
        }

        // Mirrors are resolved per step: a mirrored endpoint may collapse
        // onto the original, so start and end lists need not line up.
        let (w, h) = (surface.width(), surface.height());
        for (x, y) in line_steps(x0, y0, x1, y1) {
            for (slot, (px, py)) in ctx.stamp_points(x, y, w, h) {
                ctx.slot = slot;
                painter.stamp_at(&mut *surface, px, py, &ctx)?;
            }
        }
        Ok(())
    }

    /// Finish the stroke. `None` means nothing changed and nothing should be
    /// pushed to history.
    pub fn commit(&mut self, description: &str) -> Result<Option<ChangeSet>, StrokeError> {
        let mut painter = self.active.take().ok_or(StrokeError::NotActive)?;
        self.stroke_timer = None;
        let change_set = painter.end(description)?;
        match &change_set {
            Some(set) => log::debug!("commit \"{description}\": {} pixels", set.len()),
            None => log::debug!("commit \"{description}\": no change"),
        }
        Ok(change_set)
    }

    /// Drop the stroke without producing a change set. Pixels already
    /// written stay written.
    pub fn cancel(&mut self) -> Result<(), StrokeError> {
        let mut painter = self.active.take().ok_or(StrokeError::NotActive)?;
        self.stroke_timer = None;
        let discarded = painter.end("cancelled")?;
        log::debug!(
            "{:?} stroke cancelled, {} pixels left as painted",
            painter.kind(),
            discarded.map_or(0, |set| set.len())
        );
        Ok(())
    }
}
