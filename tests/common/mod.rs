#![allow(dead_code)]

use std::sync::Arc;

use image::Rgba;
use rusty_pixel::{Canvas, FootprintCache, PixelSurface, Rgba8, StrokeSession};

pub const RED: Rgba8 = Rgba([255, 0, 0, 255]);
pub const GREEN: Rgba8 = Rgba([0, 255, 0, 255]);
pub const BLUE: Rgba8 = Rgba([0, 0, 255, 255]);
pub const WHITE: Rgba8 = Rgba([255, 255, 255, 255]);
pub const BLACK: Rgba8 = Rgba([0, 0, 0, 255]);

/// Session with its own footprint cache so tests never share state.
pub fn isolated_session() -> StrokeSession {
    StrokeSession::with_cache(Arc::new(FootprintCache::new()))
}

/// Flat indices where two same-sized surfaces differ.
pub fn diff_indices(a: &Canvas, b: &Canvas) -> Vec<usize> {
    assert_eq!((a.width(), a.height()), (b.width(), b.height()));
    (0..a.pixel_count())
        .filter(|&i| a.pixel(i) != b.pixel(i))
        .collect()
}

/// White canvas split by a vertical black wall at column `wall`.
pub fn walled_canvas(width: u32, height: u32, wall: i32) -> Canvas {
    let mut canvas = Canvas::filled(width, height, WHITE);
    for y in 0..height as i32 {
        canvas.put(wall, y, BLACK);
    }
    canvas
}

pub fn alpha_at(canvas: &Canvas, x: i32, y: i32) -> u8 {
    canvas.get(x, y).map_or(0, |p| p.0[3])
}
