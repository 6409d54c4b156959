use crate::brush_engine::brush_options::{BrushTip, DistanceMetric};

/// Hermite smoothstep on `t` in 0..1.
#[inline]
pub fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Remaining coverage after `t` of the soft band: 1 at the hard edge, 0 at the rim.
#[inline]
pub fn falloff_mask(t: f32) -> f32 {
    1.0 - smoothstep(t)
}

/// Position of cell `d`'s center relative to the stamp center.
///
/// Even sizes put the stamp center on a cell corner, so their cells sit half
/// a pixel off the integer grid.
#[inline]
pub fn cell_center(d: i32, size: u32) -> f32 {
    if size % 2 == 0 {
        d as f32 + 0.5
    } else {
        d as f32
    }
}

/// Distance from the stamp center to the center of cell `(dx, dy)`.
pub fn stamp_distance(dx: i32, dy: i32, size: u32, metric: DistanceMetric) -> f32 {
    metric.distance(cell_center(dx, size), cell_center(dy, size))
}

#[inline]
fn scale(opacity: u8, mask: f32) -> u8 {
    (opacity as f32 * mask.clamp(0.0, 1.0)).round() as u8
}

/// Alpha a stamp applies at offset `(dx, dy)`.
///
/// The inner `radius * density / 255` is painted at full `opacity`; between
/// there and the radius the alpha falls off along a smoothstep. Built-in
/// shapes are clipped at the radius. Custom masks already define their own
/// outline and are only faded inside the soft band.
pub fn stamp_alpha(dx: i32, dy: i32, size: u32, tip: BrushTip, density: u8, opacity: u8) -> u8 {
    if opacity == 0 {
        return 0;
    }
    let size = size.max(1);
    let r = size as f32 / 2.0;
    let r_hard = r * density as f32 / 255.0;
    let d = stamp_distance(dx, dy, size, tip.metric());

    if d <= r_hard {
        return opacity;
    }
    match tip {
        BrushTip::Builtin(_) if d > r => return 0,
        BrushTip::Custom(_) if r - r_hard <= f32::EPSILON => return opacity,
        _ => {}
    }

    let t = ((d - r_hard) / (r - r_hard)).min(1.0);
    scale(opacity, falloff_mask(t))
}

/// Width of the soft band of a brush, in pixels.
pub fn soft_band(size: u32, density: u8) -> f32 {
    let r = size.max(1) as f32 / 2.0;
    r - r * density as f32 / 255.0
}

/// Alpha of a filled shape's outer halo at `distance` from its boundary.
///
/// The halo reaches `soft_band + 1` pixels out, so the first ring outside a
/// shape is always partially covered while density is below 255. Inside the
/// reach the result is kept within `1..opacity`, however thin the band.
pub fn halo_alpha(distance: f32, size: u32, density: u8, opacity: u8) -> u8 {
    let band = soft_band(size, density);
    if opacity == 0 || band <= f32::EPSILON || distance <= 0.0 {
        return 0;
    }
    let reach = band + 1.0;
    if distance >= reach {
        return 0;
    }
    let ceiling = opacity.saturating_sub(1).max(1);
    scale(opacity, falloff_mask(distance / reach)).clamp(1, ceiling)
}
