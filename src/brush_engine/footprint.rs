//! Precomputed brush footprints.
//!
//! A footprint is the list of `(dx, dy)` cell offsets a stamp covers around
//! its center. A brush of size `s` spans the cells
//! `-(s / 2) ..= s - s / 2 - 1` on each axis, so odd sizes are centered on
//! cell `(0, 0)` while even sizes are centered on the corner shared by cells
//! `(-1, -1)` and `(0, 0)`.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, LazyLock, Mutex, MutexGuard, PoisonError};

use crate::brush_engine::brush_options::{BrushShape, BrushTip};
use crate::brush_engine::falloff::cell_center;

/// Edge length of a custom brush master mask.
pub const CUSTOM_MASK_SIZE: usize = 16;

/// Largest size a custom brush can be scaled to.
pub const MAX_CUSTOM_SIZE: u32 = 128;

/// Sub-samples per axis when rasterizing circles.
const CIRCLE_SUBSAMPLES: usize = 8;

/// A cell belongs to a circle when at least 3/5 of its sub-samples do.
const COVERAGE_NUM: usize = 3;
const COVERAGE_DEN: usize = 5;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CustomBrushId(pub u32);

impl fmt::Display for CustomBrushId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// User-defined brush: a 16x16 boolean mask plus a pivot given as a fraction
/// of the brush size.
#[derive(Clone, Debug, PartialEq)]
pub struct CustomBrush {
    mask: [[bool; CUSTOM_MASK_SIZE]; CUSTOM_MASK_SIZE],
    pivot: (f32, f32),
}

impl CustomBrush {
    pub fn new(mask: [[bool; CUSTOM_MASK_SIZE]; CUSTOM_MASK_SIZE], pivot: (f32, f32)) -> Self {
        Self {
            mask,
            pivot: (pivot.0.clamp(0.0, 1.0), pivot.1.clamp(0.0, 1.0)),
        }
    }

    /// Build a centered brush from bit rows, most significant bit leftmost.
    pub fn from_rows(rows: [u16; CUSTOM_MASK_SIZE]) -> Self {
        let mut mask = [[false; CUSTOM_MASK_SIZE]; CUSTOM_MASK_SIZE];
        for (y, row) in rows.iter().enumerate() {
            for (x, cell) in mask[y].iter_mut().enumerate() {
                *cell = row & (0x8000 >> x) != 0;
            }
        }
        Self::new(mask, (0.5, 0.5))
    }

    /// Mask with every cell set.
    pub fn filled() -> Self {
        Self::new([[true; CUSTOM_MASK_SIZE]; CUSTOM_MASK_SIZE], (0.5, 0.5))
    }

    pub fn with_pivot(self, pivot: (f32, f32)) -> Self {
        Self::new(self.mask, pivot)
    }

    pub fn pivot(&self) -> (f32, f32) {
        self.pivot
    }

    pub fn is_set(&self, x: usize, y: usize) -> bool {
        x < CUSTOM_MASK_SIZE && y < CUSTOM_MASK_SIZE && self.mask[y][x]
    }
}

/// Ordered, never-empty list of offsets covered by one stamp.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Footprint {
    size: u32,
    offsets: Vec<(i32, i32)>,
}

impl Footprint {
    fn new(size: u32, mut offsets: Vec<(i32, i32)>) -> Self {
        if offsets.is_empty() {
            offsets.push((0, 0));
        }
        Self { size, offsets }
    }

    /// Brush size this footprint was computed for.
    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn offsets(&self) -> &[(i32, i32)] {
        &self.offsets
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    pub fn contains(&self, dx: i32, dy: i32) -> bool {
        self.offsets.contains(&(dx, dy))
    }

    pub fn iter(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.offsets.iter().copied()
    }
}

/// Offset range covered by a brush of `size` along one axis.
fn span(size: u32) -> std::ops::Range<i32> {
    let half = (size / 2) as i32;
    -half..size as i32 - half
}

/// Every cell of a `size x size` block.
pub fn square_offsets(size: u32) -> Vec<(i32, i32)> {
    let size = size.max(1);
    span(size)
        .flat_map(|dy| span(size).map(move |dx| (dx, dy)))
        .collect()
}

/// Cells at least 60% covered by a disk of diameter `size`, measured on an
/// 8x8 sub-sample grid per cell.
pub fn circle_offsets(size: u32) -> Vec<(i32, i32)> {
    let size = size.max(1);
    let r = size as f32 / 2.0;
    let r_sq = r * r;
    let samples = CIRCLE_SUBSAMPLES * CIRCLE_SUBSAMPLES;
    let step = 1.0 / CIRCLE_SUBSAMPLES as f32;

    let mut offsets = Vec::new();
    for dy in span(size) {
        let cy = cell_center(dy, size);
        for dx in span(size) {
            let cx = cell_center(dx, size);
            let mut inside = 0;
            for sy in 0..CIRCLE_SUBSAMPLES {
                let py = cy - 0.5 + (sy as f32 + 0.5) * step;
                for sx in 0..CIRCLE_SUBSAMPLES {
                    let px = cx - 0.5 + (sx as f32 + 0.5) * step;
                    if px * px + py * py <= r_sq {
                        inside += 1;
                    }
                }
            }
            if inside * COVERAGE_DEN >= samples * COVERAGE_NUM {
                offsets.push((dx, dy));
            }
        }
    }
    offsets
}

/// Nearest-neighbor scale of a custom mask to `size` (clamped to 1..=128),
/// positioned by the brush pivot.
pub fn custom_offsets(brush: &CustomBrush, size: u32) -> Vec<(i32, i32)> {
    let size = size.clamp(1, MAX_CUSTOM_SIZE);
    let n = CUSTOM_MASK_SIZE as u32;
    let pivot_x = (brush.pivot.0 * size as f32).floor() as i32;
    let pivot_y = (brush.pivot.1 * size as f32).floor() as i32;

    let mut offsets = Vec::new();
    for ty in 0..size {
        // floor(ty / (size / 16)) without the float division
        let my = ((ty * n) / size).min(n - 1) as usize;
        for tx in 0..size {
            let mx = ((tx * n) / size).min(n - 1) as usize;
            if brush.is_set(mx, my) {
                offsets.push((tx as i32 - pivot_x, ty as i32 - pivot_y));
            }
        }
    }
    offsets
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
struct FootprintKey {
    tip: BrushTip,
    size: u32,
}

static SHARED: LazyLock<Arc<FootprintCache>> = LazyLock::new(|| Arc::new(FootprintCache::new()));

/// Memoizes footprints per (shape, size) and (custom brush, size).
///
/// Entries live until explicitly invalidated. Invalidation must not race
/// with painting that still holds the old footprint's settings.
#[derive(Debug, Default)]
pub struct FootprintCache {
    entries: Mutex<HashMap<FootprintKey, Arc<Footprint>>>,
}

impl FootprintCache {
    /// Isolated cache, mostly useful for tests.
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide default instance.
    pub fn shared() -> Arc<FootprintCache> {
        Arc::clone(&SHARED)
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<FootprintKey, Arc<Footprint>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Footprint of a built-in shape; `size` is clamped to at least 1.
    pub fn offsets(&self, shape: BrushShape, size: u32) -> Arc<Footprint> {
        let size = size.max(1);
        let key = FootprintKey {
            tip: BrushTip::Builtin(shape),
            size,
        };
        let mut entries = self.entries();
        Arc::clone(entries.entry(key).or_insert_with(|| {
            let offsets = match shape {
                BrushShape::Circle => circle_offsets(size),
                BrushShape::Square => square_offsets(size),
            };
            log::trace!("footprint cache miss: {shape:?} size {size} -> {} cells", offsets.len());
            Arc::new(Footprint::new(size, offsets))
        }))
    }

    /// Footprint of a custom brush; `size` is clamped to 1..=128.
    pub fn custom_offsets(&self, id: CustomBrushId, brush: &CustomBrush, size: u32) -> Arc<Footprint> {
        let size = size.clamp(1, MAX_CUSTOM_SIZE);
        let key = FootprintKey {
            tip: BrushTip::Custom(id),
            size,
        };
        let mut entries = self.entries();
        Arc::clone(entries.entry(key).or_insert_with(|| {
            let offsets = custom_offsets(brush, size);
            log::trace!("footprint cache miss: brush {id} size {size} -> {} cells", offsets.len());
            Arc::new(Footprint::new(size, offsets))
        }))
    }

    /// Drop one entry. Returns whether it was cached.
    pub fn invalidate(&self, tip: BrushTip, size: u32) -> bool {
        self.entries().remove(&FootprintKey { tip, size }).is_some()
    }

    /// Drop every size cached for a custom brush, returning how many went.
    pub fn invalidate_custom(&self, id: CustomBrushId) -> usize {
        let mut entries = self.entries();
        let before = entries.len();
        entries.retain(|key, _| key.tip != BrushTip::Custom(id));
        before - entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

/// Custom brush definitions addressed by id.
#[derive(Debug, Default)]
pub struct BrushLibrary {
    brushes: HashMap<CustomBrushId, CustomBrush>,
    next_id: u32,
}

impl BrushLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a brush and return its new id.
    pub fn insert(&mut self, brush: CustomBrush) -> CustomBrushId {
        let id = CustomBrushId(self.next_id);
        self.next_id += 1;
        self.brushes.insert(id, brush);
        id
    }

    pub fn get(&self, id: CustomBrushId) -> Option<&CustomBrush> {
        self.brushes.get(&id)
    }

    /// Replace a brush's mask, dropping its stale footprints from `cache`.
    pub fn update(&mut self, id: CustomBrushId, brush: CustomBrush, cache: &FootprintCache) -> bool {
        match self.brushes.get_mut(&id) {
            Some(slot) => {
                *slot = brush;
                let dropped = cache.invalidate_custom(id);
                log::debug!("custom brush {id} edited, {dropped} cached footprints dropped");
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: CustomBrushId, cache: &FootprintCache) -> Option<CustomBrush> {
        let removed = self.brushes.remove(&id);
        if removed.is_some() {
            cache.invalidate_custom(id);
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.brushes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.brushes.is_empty()
    }
}
