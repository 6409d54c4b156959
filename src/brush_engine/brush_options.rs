use image::Rgba;

use crate::brush_engine::footprint::CustomBrushId;
use crate::canvas::Rgba8;

/// Built-in brush outlines.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BrushShape {
    Circle,
    Square,
}

/// What a brush stamps: a built-in shape or a user-defined mask.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BrushTip {
    Builtin(BrushShape),
    Custom(CustomBrushId),
}

impl BrushTip {
    pub const CIRCLE: BrushTip = BrushTip::Builtin(BrushShape::Circle);
    pub const SQUARE: BrushTip = BrushTip::Builtin(BrushShape::Square);

    /// Distance metric used by the density falloff for this tip.
    pub fn metric(self) -> DistanceMetric {
        match self {
            BrushTip::Builtin(BrushShape::Square) => DistanceMetric::Chebyshev,
            BrushTip::Builtin(BrushShape::Circle) | BrushTip::Custom(_) => {
                DistanceMetric::Euclidean
            }
        }
    }
}

impl From<BrushShape> for BrushTip {
    fn from(shape: BrushShape) -> Self {
        BrushTip::Builtin(shape)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DistanceMetric {
    Euclidean,
    Chebyshev,
}

impl DistanceMetric {
    pub fn distance(self, x: f32, y: f32) -> f32 {
        match self {
            DistanceMetric::Euclidean => (x * x + y * y).sqrt(),
            DistanceMetric::Chebyshev => x.abs().max(y.abs()),
        }
    }
}

/// Brush geometry and strength.
#[derive(Clone, Debug, PartialEq)]
pub struct BrushSettings {
    pub size: u32,
    pub tip: BrushTip,
    pub density: u8, // 0..255, fraction of the radius painted at full strength
    pub opacity: u8, // 0..255
}

impl Default for BrushSettings {
    fn default() -> Self {
        Self {
            size: 1,
            tip: BrushTip::CIRCLE,
            density: 255,
            opacity: 255,
        }
    }
}

impl BrushSettings {
    /// Create a brush with the given size and tip, fully dense and opaque.
    pub fn new(size: u32, tip: impl Into<BrushTip>) -> Self {
        Self {
            size: size.max(1),
            tip: tip.into(),
            ..Self::default()
        }
    }

    pub fn with_density(mut self, density: u8) -> Self {
        self.density = density;
        self
    }

    pub fn with_opacity(mut self, opacity: u8) -> Self {
        self.opacity = opacity;
        self
    }
}

/// Live tool state a stroke session reads on every stamp.
#[derive(Clone, Debug, PartialEq)]
pub struct ToolSettings {
    pub foreground: Rgba8,
    pub background: Rgba8,
    pub tolerance: u8,
    pub brush: BrushSettings,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            foreground: Rgba([0, 0, 0, 255]),
            background: Rgba([255, 255, 255, 255]),
            tolerance: 0,
            brush: BrushSettings::default(),
        }
    }
}

impl ToolSettings {
    pub fn with_foreground(mut self, color: Rgba8) -> Self {
        self.foreground = color;
        self
    }

    pub fn with_background(mut self, color: Rgba8) -> Self {
        self.background = color;
        self
    }

    pub fn with_tolerance(mut self, tolerance: u8) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_brush(mut self, brush: BrushSettings) -> Self {
        self.brush = brush;
        self
    }
}
