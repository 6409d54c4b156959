use crate::utils::vector::Vec2;

/// Which pixels an operation may touch.
pub trait Selection {
    fn contains(&self, x: i32, y: i32) -> bool;
}

impl<F> Selection for F
where
    F: Fn(i32, i32) -> bool,
{
    fn contains(&self, x: i32, y: i32) -> bool {
        self(x, y)
    }
}

/// Geometric selection in canvas space. A pixel is inside when its center is.
#[derive(Clone, Debug)]
pub enum SelectionShape {
    Rectangle { start: Vec2, end: Vec2 },
    Circle { center: Vec2, radius: f32 },
    Lasso { points: Vec<Vec2> },
}

impl SelectionShape {
    pub fn contains_point(&self, p: Vec2) -> bool {
        match self {
            SelectionShape::Rectangle { start, end } => {
                let (x0, x1) = (start.x.min(end.x), start.x.max(end.x));
                let (y0, y1) = (start.y.min(end.y), start.y.max(end.y));
                p.x >= x0 && p.x <= x1 && p.y >= y0 && p.y <= y1
            }
            SelectionShape::Circle { center, radius } => (p - *center).length() <= *radius,
            SelectionShape::Lasso { points } => lasso_contains(points, p),
        }
    }
}

impl Selection for SelectionShape {
    fn contains(&self, x: i32, y: i32) -> bool {
        self.contains_point(Vec2::pixel_center(x, y))
    }
}

// Even-odd rule; the polygon is implicitly closed.
fn lasso_contains(points: &[Vec2], p: Vec2) -> bool {
    if points.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let (a, b) = (points[i], points[j]);
        if (a.y > p.y) != (b.y > p.y) {
            let x_cross = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Rasterized selection, one flag per canvas pixel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectionMask {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl SelectionMask {
    /// Everything selected.
    pub fn all(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits: vec![true; width as usize * height as usize],
        }
    }

    /// Nothing selected.
    pub fn none(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits: vec![false; width as usize * height as usize],
        }
    }

    pub fn from_shape(shape: &SelectionShape, width: u32, height: u32) -> Self {
        let mut mask = Self::none(width, height);
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                if shape.contains(x, y) {
                    mask.set(x, y, true);
                }
            }
        }
        mask
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn set(&mut self, x: i32, y: i32, selected: bool) {
        if let Some(i) = self.index(x, y) {
            self.bits[i] = selected;
        }
    }

    pub fn invert(&mut self) {
        for bit in &mut self.bits {
            *bit = !*bit;
        }
    }

    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }
}

impl Selection for SelectionMask {
    fn contains(&self, x: i32, y: i32) -> bool {
        self.index(x, y).is_some_and(|i| self.bits[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rectangle_accepts_reversed_corners() {
        let shape = SelectionShape::Rectangle {
            start: Vec2::new(4.0, 4.0),
            end: Vec2::new(1.0, 1.0),
        };
        assert!(shape.contains(1, 1));
        assert!(shape.contains(3, 3));
        assert!(!shape.contains(4, 4));
        assert!(!shape.contains(0, 2));
    }

    #[test]
    fn circle_tests_pixel_centers() {
        let shape = SelectionShape::Circle {
            center: Vec2::new(5.0, 5.0),
            radius: 2.0,
        };
        assert!(shape.contains(4, 4));
        assert!(shape.contains(5, 6));
        assert!(!shape.contains(7, 7));
    }

    #[test]
    fn concave_lasso() {
        // U shape open at the top
        let points = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(3.0, 0.0),
            Vec2::new(3.0, 6.0),
            Vec2::new(6.0, 6.0),
            Vec2::new(6.0, 0.0),
            Vec2::new(9.0, 0.0),
            Vec2::new(9.0, 9.0),
            Vec2::new(0.0, 9.0),
        ];
        let shape = SelectionShape::Lasso { points };
        assert!(shape.contains(1, 1));
        assert!(shape.contains(7, 1));
        assert!(!shape.contains(4, 2));
        assert!(shape.contains(4, 8));
        assert!(!SelectionShape::Lasso { points: vec![] }.contains(0, 0));
    }

    #[test]
    fn mask_set_invert_and_bounds() {
        let mut mask = SelectionMask::none(3, 3);
        mask.set(1, 1, true);
        mask.set(5, 5, true);
        assert_eq!(mask.count(), 1);
        assert!(mask.contains(1, 1));
        mask.invert();
        assert_eq!(mask.count(), 8);
        assert!(!mask.contains(1, 1));
        assert!(!mask.contains(-1, 0));
        assert_eq!(SelectionMask::all(2, 2).count(), 4);
    }

    #[test]
    fn mask_from_shape_matches_the_shape() {
        let shape = SelectionShape::Circle {
            center: Vec2::new(4.0, 4.0),
            radius: 2.5,
        };
        let mask = SelectionMask::from_shape(&shape, 8, 8);
        for y in 0..8 {
            for x in 0..8 {
                assert_eq!(mask.contains(x, y), shape.contains(x, y), "({x}, {y})");
            }
        }
        assert!(mask.count() > 0);
    }

    #[test]
    fn closures_are_selections() {
        let left_half = |x: i32, _y: i32| x < 2;
        let sel: &dyn Selection = &left_half;
        assert!(sel.contains(1, 9));
        assert!(!sel.contains(2, 0));
    }
}
