use crate::canvas::{ChangeSet, PixelChange, PixelSurface, Rgba8};
use crate::selection::Selection;
use crate::utils::color::colors_similar;
use crate::utils::pool::BufferPool;
use crate::utils::profiler::ScopeTimer;

const NEIGHBORS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Parameters of one fill.
#[derive(Clone, Copy)]
pub struct FillRequest<'a> {
    pub color: Rgba8,
    /// Largest per-channel difference from the seed color that still fills.
    pub tolerance: u8,
    /// Connected region only, or every similar pixel on the surface.
    pub contiguous: bool,
    pub selection: Option<&'a dyn Selection>,
}

impl<'a> FillRequest<'a> {
    pub fn new(color: Rgba8) -> Self {
        Self {
            color,
            tolerance: 0,
            contiguous: true,
            selection: None,
        }
    }

    pub fn with_tolerance(mut self, tolerance: u8) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn global(mut self) -> Self {
        self.contiguous = false;
        self
    }

    pub fn with_selection(mut self, selection: &'a dyn Selection) -> Self {
        self.selection = Some(selection);
        self
    }

    fn allows(&self, x: i32, y: i32) -> bool {
        self.selection.is_none_or(|s| s.contains(x, y))
    }
}

/// Paint-bucket fill. Keeps its visited buffers around between calls.
#[derive(Debug, Default)]
pub struct FloodFillEngine {
    visited: BufferPool,
}

impl FloodFillEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill from the seed `(x, y)`. Returns `None` when the seed is off the
    /// surface or no pixel changed.
    pub fn fill(
        &mut self,
        target: &mut dyn PixelSurface,
        x: i32,
        y: i32,
        request: &FillRequest<'_>,
    ) -> Option<ChangeSet> {
        let seed_index = target.index_of(x, y)?;
        let seed = target.pixel(seed_index);
        if request.tolerance == 0 && seed == request.color {
            log::debug!("fill at ({x}, {y}) skipped: seed already {:?}", seed.0);
            return None;
        }

        let _timer = ScopeTimer::new("flood fill");
        let changes = if request.contiguous {
            if !request.allows(x, y) {
                return None;
            }
            self.fill_contiguous(target, x, y, seed, request)
        } else {
            fill_global(target, seed, request)
        };

        log::debug!(
            "fill at ({x}, {y}) tol {} contiguous {}: {} pixels",
            request.tolerance,
            request.contiguous,
            changes.len()
        );
        ChangeSet::new("Fill", changes)
    }

    fn fill_contiguous(
        &mut self,
        target: &mut dyn PixelSurface,
        x: i32,
        y: i32,
        seed: Rgba8,
        request: &FillRequest<'_>,
    ) -> Vec<PixelChange> {
        let width = target.width() as usize;
        let mut visited = self.visited.rent(width * target.height() as usize);
        let mut changes = Vec::new();
        let mut stack = vec![(x, y)];
        visited[y as usize * width + x as usize] = true;

        while let Some((cx, cy)) = stack.pop() {
            let index = cy as usize * width + cx as usize;
            write_changed(target, index, request.color, &mut changes);

            for (dx, dy) in NEIGHBORS {
                let (nx, ny) = (cx + dx, cy + dy);
                let Some(n) = target.index_of(nx, ny) else {
                    continue;
                };
                if visited[n] || !request.allows(nx, ny) {
                    continue;
                }
                if colors_similar(target.pixel(n), seed, request.tolerance) {
                    visited[n] = true;
                    stack.push((nx, ny));
                }
            }
        }
        changes
    }
}

fn fill_global(target: &mut dyn PixelSurface, seed: Rgba8, request: &FillRequest<'_>) -> Vec<PixelChange> {
    let width = target.width() as usize;
    let count = width * target.height() as usize;
    let mut changes = Vec::new();
    for index in 0..count {
        let (x, y) = ((index % width) as i32, (index / width) as i32);
        if request.allows(x, y) && colors_similar(target.pixel(index), seed, request.tolerance) {
            write_changed(target, index, request.color, &mut changes);
        }
    }
    changes
}

fn write_changed(target: &mut dyn PixelSurface, index: usize, color: Rgba8, changes: &mut Vec<PixelChange>) {
    let before = target.pixel(index);
    if before != color {
        target.set_pixel(index, color);
        changes.push(PixelChange {
            index,
            before,
            after: color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;
    use image::Rgba;

    #[test]
    fn off_surface_seed_is_a_noop() {
        let mut canvas = Canvas::new(4, 4);
        let mut engine = FloodFillEngine::new();
        let req = FillRequest::new(Rgba([1, 2, 3, 255]));
        assert!(engine.fill(&mut canvas, -1, 0, &req).is_none());
        assert!(engine.fill(&mut canvas, 0, 4, &req).is_none());
    }

    #[test]
    fn visited_buffer_goes_back_to_the_pool() {
        let mut canvas = Canvas::new(4, 4);
        let mut engine = FloodFillEngine::new();
        let req = FillRequest::new(Rgba([9, 9, 9, 255]));
        let set = engine.fill(&mut canvas, 1, 1, &req).unwrap();
        assert_eq!(set.len(), 16);
        assert_eq!(engine.visited.available(), 1);
    }

    #[test]
    fn tolerance_bridges_near_colors() {
        let mut canvas = Canvas::filled(3, 1, Rgba([100, 100, 100, 255]));
        canvas.put(1, 0, Rgba([104, 100, 100, 255]));
        let mut engine = FloodFillEngine::new();

        let strict = FillRequest::new(Rgba([0, 0, 0, 255]));
        let set = engine.fill(&mut canvas.clone(), 0, 0, &strict).unwrap();
        assert_eq!(set.len(), 1);

        let loose = strict.with_tolerance(4);
        let set = engine.fill(&mut canvas, 0, 0, &loose).unwrap();
        assert_eq!(set.len(), 3);
    }
}
