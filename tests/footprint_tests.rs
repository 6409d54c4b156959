//! Footprint rasterization and cache behavior.

use std::collections::HashSet;
use std::sync::Arc;

use rusty_pixel::brush_engine::footprint::{BrushLibrary, circle_offsets, custom_offsets, square_offsets};
use rusty_pixel::{BrushShape, BrushTip, CustomBrush, CustomBrushId, FootprintCache};

#[test]
fn footprints_are_never_empty() {
    let cache = FootprintCache::new();
    for shape in [BrushShape::Circle, BrushShape::Square] {
        for size in [0, 1, 2, 3, 7, 16, 64] {
            assert!(!cache.offsets(shape, size).is_empty(), "{shape:?} {size}");
        }
    }
}

#[test]
fn repeated_lookups_share_one_instance() {
    let cache = FootprintCache::new();
    let a = cache.offsets(BrushShape::Circle, 9);
    let b = cache.offsets(BrushShape::Circle, 9);
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(cache.len(), 1);

    let c = cache.offsets(BrushShape::Square, 9);
    assert!(!Arc::ptr_eq(&a, &c));
    assert_eq!(cache.len(), 2);
}

#[test]
fn shared_cache_is_a_single_process_instance() {
    assert!(Arc::ptr_eq(&FootprintCache::shared(), &FootprintCache::shared()));
}

#[test]
fn circle_is_symmetric_modulo_parity() {
    for size in 1..=32u32 {
        let cells: HashSet<_> = circle_offsets(size).into_iter().collect();
        // Even sizes are centered on a cell corner, so mirror around -0.5.
        let shift = if size % 2 == 0 { 1 } else { 0 };
        for &(dx, dy) in &cells {
            assert!(cells.contains(&(-dx - shift, dy)), "size {size} ({dx}, {dy})");
            assert!(cells.contains(&(dx, -dy - shift)), "size {size} ({dx}, {dy})");
            assert!(cells.contains(&(dy, dx)), "size {size} ({dx}, {dy})");
        }
    }
}

#[test]
fn small_circles_match_their_squares() {
    assert_eq!(circle_offsets(1), vec![(0, 0)]);
    assert_eq!(circle_offsets(2).len(), 4);
    assert!(circle_offsets(8).len() < square_offsets(8).len());
}

#[test]
fn square_count_is_size_squared() {
    for size in 1..=40u32 {
        assert_eq!(square_offsets(size).len(), (size * size) as usize);
    }
}

#[test]
fn full_custom_mask_covers_every_size() {
    let brush = CustomBrush::filled();
    for size in 1..=128u32 {
        let custom: HashSet<_> = custom_offsets(&brush, size).into_iter().collect();
        let square: HashSet<_> = square_offsets(size).into_iter().collect();
        assert_eq!(custom, square, "size {size}");
    }
}

#[test]
fn custom_sizes_are_clamped() {
    let cache = FootprintCache::new();
    let brush = CustomBrush::filled();
    let huge = cache.custom_offsets(CustomBrushId(0), &brush, 1000);
    assert_eq!(huge.size(), 128);
    assert_eq!(huge.len(), 128 * 128);
    let tiny = cache.custom_offsets(CustomBrushId(0), &brush, 0);
    assert_eq!(tiny.offsets(), &[(0, 0)]);
}

#[test]
fn custom_pivot_shifts_the_footprint() {
    // Only the top-left quadrant is set.
    let mut rows = [0u16; 16];
    for row in rows.iter_mut().take(8) {
        *row = 0xFF00;
    }
    let brush = CustomBrush::from_rows(rows).with_pivot((0.0, 0.0));
    let cells = custom_offsets(&brush, 4);
    assert_eq!(cells, vec![(0, 0), (1, 0), (0, 1), (1, 1)]);
}

#[test]
fn mask_rows_read_msb_first() {
    let mut rows = [0u16; 16];
    rows[2] = 0x8001;
    let brush = CustomBrush::from_rows(rows);
    assert!(brush.is_set(0, 2));
    assert!(brush.is_set(15, 2));
    assert!(!brush.is_set(1, 2));
    assert!(!brush.is_set(16, 2));
    // Full size samples the mask one to one.
    assert_eq!(custom_offsets(&brush, 16).len(), 2);
}

#[test]
fn empty_custom_mask_still_stamps_its_center() {
    let cache = FootprintCache::new();
    let brush = CustomBrush::from_rows([0; 16]);
    let fp = cache.custom_offsets(CustomBrushId(5), &brush, 12);
    assert_eq!(fp.offsets(), &[(0, 0)]);
}

#[test]
fn invalidation_drops_only_the_named_entries() {
    let cache = FootprintCache::new();
    cache.offsets(BrushShape::Circle, 4);
    cache.offsets(BrushShape::Circle, 5);
    assert!(cache.invalidate(BrushTip::CIRCLE, 4));
    assert!(!cache.invalidate(BrushTip::CIRCLE, 4));
    assert_eq!(cache.len(), 1);

    let brush = CustomBrush::filled();
    cache.custom_offsets(CustomBrushId(1), &brush, 3);
    cache.custom_offsets(CustomBrushId(1), &brush, 6);
    cache.custom_offsets(CustomBrushId(2), &brush, 6);
    assert_eq!(cache.invalidate_custom(CustomBrushId(1)), 2);
    assert_eq!(cache.len(), 2);
}

#[test]
fn editing_a_custom_brush_refreshes_its_footprint() {
    let cache = FootprintCache::new();
    let mut library = BrushLibrary::new();
    let id = library.insert(CustomBrush::filled());

    let before = cache.custom_offsets(id, library.get(id).unwrap(), 8);
    assert_eq!(before.len(), 64);

    let mut rows = [0u16; 16];
    rows[0] = 0x8000;
    assert!(library.update(id, CustomBrush::from_rows(rows), &cache));
    assert!(cache.is_empty());

    let after = cache.custom_offsets(id, library.get(id).unwrap(), 8);
    assert!(!Arc::ptr_eq(&before, &after));
    assert!(after.len() < before.len());
    assert!(!library.update(CustomBrushId(99), CustomBrush::filled(), &cache));
}
