//! Outline and filled shape rendering.

mod common;

use std::collections::HashSet;
use std::sync::Arc;

use common::{RED, alpha_at};
use rusty_pixel::{BrushShape, Canvas, FootprintCache, SelectionMask, ShapeFillRenderer, ShapeFillRequest};

fn renderer() -> ShapeFillRenderer {
    ShapeFillRenderer::new(Arc::new(FootprintCache::new()))
}

fn rect_points(x0: i32, y0: i32, x1: i32, y1: i32) -> Vec<(i32, i32)> {
    (y0..=y1)
        .flat_map(|y| (x0..=x1).map(move |x| (x, y)))
        .collect()
}

#[test]
fn filled_interior_gets_exact_opacity() {
    let mut canvas = Canvas::new(24, 24);
    let points = rect_points(8, 8, 15, 15);
    let req = ShapeFillRequest::new(RED, 6)
        .with_density(128)
        .with_opacity(200)
        .filled();
    renderer().render(&mut canvas, &points, &req).unwrap();

    for &(x, y) in &points {
        assert_eq!(alpha_at(&canvas, x, y), 200, "({x}, {y})");
    }
}

#[test]
fn halo_just_outside_is_strictly_partial() {
    let mut canvas = Canvas::new(24, 24);
    let points = rect_points(8, 8, 15, 15);
    let inside: HashSet<_> = points.iter().copied().collect();
    let req = ShapeFillRequest::new(RED, 6)
        .with_density(128)
        .with_opacity(200)
        .filled();
    renderer().render(&mut canvas, &points, &req).unwrap();

    for y in 7..=16 {
        for x in 7..=16 {
            if inside.contains(&(x, y)) {
                continue;
            }
            let a = alpha_at(&canvas, x, y);
            assert!(a > 0 && a < 200, "({x}, {y}) alpha {a}");
        }
    }
    // Fades further out.
    assert!(alpha_at(&canvas, 5, 12) < alpha_at(&canvas, 7, 12));
    assert_eq!(alpha_at(&canvas, 0, 0), 0);
}

#[test]
fn nearly_hard_or_faint_fill_keeps_a_partial_first_ring() {
    let points = rect_points(8, 8, 15, 15);
    for (density, opacity) in [(254, 255), (200, 3)] {
        let mut canvas = Canvas::new(24, 24);
        let req = ShapeFillRequest::new(RED, 4)
            .with_density(density)
            .with_opacity(opacity)
            .filled();
        renderer().render(&mut canvas, &points, &req).unwrap();

        for i in 8..=15 {
            for (x, y) in [(7, i), (16, i), (i, 7), (i, 16)] {
                let a = alpha_at(&canvas, x, y);
                assert!(
                    a > 0 && a < opacity,
                    "density {density} opacity {opacity}: ({x}, {y}) alpha {a}"
                );
            }
        }
        assert_eq!(alpha_at(&canvas, 12, 12), opacity);
    }
}

#[test]
fn square_brush_halo_uses_chebyshev_distance() {
    let mut canvas = Canvas::new(20, 20);
    let points = rect_points(8, 8, 11, 11);
    let req = ShapeFillRequest::new(RED, 8)
        .with_shape(BrushShape::Square)
        .with_density(64)
        .filled();
    renderer().render(&mut canvas, &points, &req).unwrap();

    // Diagonal neighbor of the corner is as close as the edge neighbor.
    assert_eq!(alpha_at(&canvas, 7, 7), alpha_at(&canvas, 7, 9));
}

#[test]
fn hard_filled_shape_touches_only_its_points() {
    let mut canvas = Canvas::new(16, 16);
    let points = rect_points(2, 2, 6, 4);
    let req = ShapeFillRequest::new(RED, 9).filled();
    let set = renderer().render(&mut canvas, &points, &req).unwrap();
    assert_eq!(set.len(), points.len());
}

#[test]
fn outline_keeps_the_strongest_alpha_per_pixel() {
    let mut canvas = Canvas::new(24, 24);
    let points: Vec<_> = (4..20).map(|x| (x, 12)).collect();
    let req = ShapeFillRequest::new(RED, 5).with_density(0).with_opacity(255);
    let set = renderer().render(&mut canvas, &points, &req).unwrap();

    // Along the line every pixel is some stamp's center.
    for x in 4..20 {
        assert_eq!(alpha_at(&canvas, x, 12), 255);
    }
    // One blend per pixel: each pixel appears once in the change set.
    let indices: HashSet<_> = set.changes().iter().map(|c| c.index).collect();
    assert_eq!(indices.len(), set.len());

    // Above the line the alpha equals the single-stamp falloff at dy = -1.
    let single = {
        let mut c = Canvas::new(24, 24);
        renderer().render(&mut c, &[(12, 12)], &req).unwrap();
        alpha_at(&c, 12, 11)
    };
    assert_eq!(alpha_at(&canvas, 12, 11), single);
}

#[test]
fn empty_selection_renders_nothing() {
    let mut canvas = Canvas::new(12, 12);
    let nothing = SelectionMask::none(12, 12);
    let points = rect_points(3, 3, 8, 8);
    for filled in [false, true] {
        let mut req = ShapeFillRequest::new(RED, 4).with_density(100).with_selection(&nothing);
        req.filled = filled;
        assert!(renderer().render(&mut canvas, &points, &req).is_none());
    }
    assert_eq!(canvas, Canvas::new(12, 12));
}
