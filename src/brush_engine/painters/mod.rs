//! The concrete stroke tools.

pub mod blur;
pub mod brush;
pub mod eraser;
pub mod jumble;
pub mod replacer;
pub mod smudge;

use std::collections::HashMap;

pub use blur::BlurPainter;
pub use brush::BrushPainter;
pub use eraser::EraserPainter;
pub use jumble::JumblePainter;
pub use replacer::ReplacerPainter;
pub use smudge::SmudgePainter;

use crate::brush_engine::painter::{PainterKind, StrokePainter};

pub type PainterFactory = fn() -> Box<dyn StrokePainter>;

/// Maps each tool kind to a constructor for a fresh, idle painter.
pub struct PainterRegistry {
    factories: HashMap<PainterKind, PainterFactory>,
}

impl Default for PainterRegistry {
    fn default() -> Self {
        let mut registry = Self {
            factories: HashMap::new(),
        };
        registry.register(PainterKind::Brush, || Box::new(BrushPainter::new()));
        registry.register(PainterKind::Eraser, || Box::new(EraserPainter::new()));
        registry.register(PainterKind::Blur, || Box::new(BlurPainter::new()));
        registry.register(PainterKind::Smudge, || Box::new(SmudgePainter::new()));
        registry.register(PainterKind::Jumble, || Box::new(JumblePainter::new()));
        registry.register(PainterKind::Replacer, || Box::new(ReplacerPainter::new()));
        registry
    }
}

impl PainterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the constructor used for `kind`.
    pub fn register(&mut self, kind: PainterKind, factory: PainterFactory) {
        self.factories.insert(kind, factory);
    }

    pub fn create(&self, kind: PainterKind) -> Option<Box<dyn StrokePainter>> {
        self.factories.get(&kind).map(|factory| factory())
    }

    /// Registered kinds in [`PainterKind::ALL`] order.
    pub fn kinds(&self) -> Vec<PainterKind> {
        PainterKind::ALL
            .into_iter()
            .filter(|kind| self.factories.contains_key(kind))
            .collect()
    }
}
