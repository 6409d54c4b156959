use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use crate::brush_engine::brush_options::{BrushShape, BrushTip};
use crate::brush_engine::falloff::{halo_alpha, soft_band, stamp_alpha};
use crate::brush_engine::footprint::FootprintCache;
use crate::canvas::{ChangeSet, PixelChange, PixelSurface, Rgba8};
use crate::selection::Selection;
use crate::utils::color::over_rgba8;

/// A rasterized shape (line, rectangle, ellipse...) to composite.
#[derive(Clone, Copy)]
pub struct ShapeFillRequest<'a> {
    pub color: Rgba8,
    pub size: u32,
    pub shape: BrushShape,
    pub density: u8,
    pub opacity: u8,
    /// Treat the points as a solid region instead of stamping along them.
    pub filled: bool,
    pub selection: Option<&'a dyn Selection>,
}

impl<'a> ShapeFillRequest<'a> {
    /// Hard, opaque outline drawn with a round brush of `size`.
    pub fn new(color: Rgba8, size: u32) -> Self {
        Self {
            color,
            size: size.max(1),
            shape: BrushShape::Circle,
            density: 255,
            opacity: 255,
            filled: false,
            selection: None,
        }
    }

    pub fn filled(mut self) -> Self {
        self.filled = true;
        self
    }

    pub fn with_shape(mut self, shape: BrushShape) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_density(mut self, density: u8) -> Self {
        self.density = density;
        self
    }

    pub fn with_opacity(mut self, opacity: u8) -> Self {
        self.opacity = opacity;
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

/// Strongest alpha reaching each pixel, keyed by flat index.
type CoverageMap = BTreeMap<usize, u8>;

fn raise(coverage: &mut CoverageMap, index: usize, alpha: u8) {
    let slot = coverage.entry(index).or_insert(0);
    *slot = (*slot).max(alpha);
}

/// Composites point sets with one blend per touched pixel.
pub struct ShapeFillRenderer {
    footprints: Arc<FootprintCache>,
}

impl Default for ShapeFillRenderer {
    fn default() -> Self {
        Self::new(FootprintCache::shared())
    }
}

impl ShapeFillRenderer {
    pub fn new(footprints: Arc<FootprintCache>) -> Self {
        Self { footprints }
    }

    pub fn render(
        &self,
        target: &mut dyn PixelSurface,
        points: &[(i32, i32)],
        request: &ShapeFillRequest<'_>,
    ) -> Option<ChangeSet> {
        if request.opacity == 0 || points.is_empty() {
            return None;
        }
        let coverage = if request.filled {
            self.filled_coverage(&*target, points, request)
        } else {
            self.outline_coverage(&*target, points, request)
        };

        let mut changes = Vec::new();
        for (index, alpha) in coverage {
            let before = target.pixel(index);
            let after = over_rgba8(request.color, alpha, before);
            if after != before {
                target.set_pixel(index, after);
                changes.push(PixelChange { index, before, after });
            }
        }
        log::debug!(
            "shape ({} points, filled {}): {} pixels",
            points.len(),
            request.filled,
            changes.len()
        );
        ChangeSet::new("Shape", changes)
    }

    fn outline_coverage(
        &self,
        target: &dyn PixelSurface,
        points: &[(i32, i32)],
        request: &ShapeFillRequest<'_>,
    ) -> CoverageMap {
        let footprint = self.footprints.offsets(request.shape, request.size);
        let tip = BrushTip::from(request.shape);
        let mut coverage = CoverageMap::new();
        for &(x, y) in points {
            for (dx, dy) in footprint.iter() {
                let (px, py) = (x + dx, y + dy);
                let Some(index) = target.index_of(px, py) else {
                    continue;
                };
                if !request.allows(px, py) {
                    continue;
                }
                let alpha = stamp_alpha(dx, dy, footprint.size(), tip, request.density, request.opacity);
                if alpha > 0 {
                    raise(&mut coverage, index, alpha);
                }
            }
        }
        coverage
    }

    fn filled_coverage(
        &self,
        target: &dyn PixelSurface,
        points: &[(i32, i32)],
        request: &ShapeFillRequest<'_>,
    ) -> CoverageMap {
        let inside: HashSet<(i32, i32)> = points.iter().copied().collect();
        let mut coverage = CoverageMap::new();

        // Interior: flat opacity, density plays no part here.
        for &(x, y) in &inside {
            if !request.allows(x, y) {
                continue;
            }
            if let Some(index) = target.index_of(x, y) {
                raise(&mut coverage, index, request.opacity);
            }
        }

        let band = soft_band(request.size, request.density);
        if band <= f32::EPSILON {
            return coverage;
        }

        // Halo: stamped outward from boundary points, never inside the set.
        let halo_size = 2 * (band + 1.0).ceil() as u32 + 1;
        let footprint = self.footprints.offsets(request.shape, halo_size);
        let metric = BrushTip::from(request.shape).metric();
        let boundary = inside.iter().copied().filter(|&(x, y)| {
            [(-1, 0), (1, 0), (0, -1), (0, 1)]
                .iter()
                .any(|(dx, dy)| !inside.contains(&(x + dx, y + dy)))
        });

        for (bx, by) in boundary {
            for (dx, dy) in footprint.iter() {
                let (px, py) = (bx + dx, by + dy);
                if inside.contains(&(px, py)) {
                    continue;
                }
                let Some(index) = target.index_of(px, py) else {
                    continue;
                };
                if !request.allows(px, py) {
                    continue;
                }
                let d = metric.distance(dx as f32, dy as f32);
                let alpha = halo_alpha(d, request.size, request.density, request.opacity);
                if alpha > 0 {
                    raise(&mut coverage, index, alpha);
                }
            }
        }
        coverage
    }
}
