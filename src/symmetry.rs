/// Where a single stamp is repeated.
pub trait SymmetrySource {
    /// The original point first, then any mirrored copies. Never contains
    /// duplicates.
    fn points(&self, x: i32, y: i32, width: u32, height: u32) -> Vec<(i32, i32)> {
        self.slotted_points(x, y, width, height)
            .into_iter()
            .map(|(_, p)| p)
            .collect()
    }

    /// Like [`points`](Self::points), with each copy tagged by a slot that
    /// stays the same for that copy over the whole stroke, even on steps
    /// where it collapses onto another copy and is dropped.
    fn slotted_points(&self, x: i32, y: i32, width: u32, height: u32) -> Vec<(usize, (i32, i32))>;
}

/// Mirrors stamps across the canvas center lines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MirrorSymmetry {
    /// Mirror left/right across the vertical center line.
    pub horizontal: bool,
    /// Mirror top/bottom across the horizontal center line.
    pub vertical: bool,
}

impl MirrorSymmetry {
    pub const ORIGINAL: usize = 0;
    pub const HORIZONTAL: usize = 1;
    pub const VERTICAL: usize = 2;
    pub const BOTH: usize = 3;

    pub fn new(horizontal: bool, vertical: bool) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }
}

impl SymmetrySource for MirrorSymmetry {
    fn slotted_points(&self, x: i32, y: i32, width: u32, height: u32) -> Vec<(usize, (i32, i32))> {
        let mx = width as i32 - 1 - x;
        let my = height as i32 - 1 - y;
        let mut points = vec![(Self::ORIGINAL, (x, y))];
        let mut push = |slot: usize, p: (i32, i32)| {
            if !points.iter().any(|&(_, q)| q == p) {
                points.push((slot, p));
            }
        };
        if self.horizontal {
            push(Self::HORIZONTAL, (mx, y));
        }
        if self.vertical {
            push(Self::VERTICAL, (x, my));
        }
        if self.horizontal && self.vertical {
            push(Self::BOTH, (mx, my));
        }
        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_mirror_is_identity() {
        assert_eq!(MirrorSymmetry::default().points(2, 3, 10, 10), vec![(2, 3)]);
    }

    #[test]
    fn quad_mirror() {
        let pts = MirrorSymmetry::new(true, true).points(1, 2, 10, 8);
        assert_eq!(pts, vec![(1, 2), (8, 2), (1, 5), (8, 5)]);
    }

    #[test]
    fn center_line_points_are_not_duplicated() {
        let pts = MirrorSymmetry::new(true, false).points(2, 0, 5, 5);
        assert_eq!(pts, vec![(2, 0)]);
    }

    #[test]
    fn slots_are_stable_when_a_mirror_collapses() {
        let mirror = MirrorSymmetry::new(true, true);
        let slots: Vec<_> = mirror
            .slotted_points(1, 2, 10, 8)
            .into_iter()
            .map(|(slot, _)| slot)
            .collect();
        assert_eq!(slots, vec![0, 1, 2, 3]);

        // On the vertical center line the left/right mirror coincides with
        // the original, but the top/bottom copy keeps its slot.
        let pts = mirror.slotted_points(2, 1, 5, 8);
        assert_eq!(
            pts,
            vec![(MirrorSymmetry::ORIGINAL, (2, 1)), (MirrorSymmetry::VERTICAL, (2, 6))]
        );
    }
}
