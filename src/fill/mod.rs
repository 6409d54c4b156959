//! Region fills: seeded flood fill and point-set shape rendering.

pub mod flood;
pub mod shape;

pub use flood::{FillRequest, FloodFillEngine};
pub use shape::{ShapeFillRenderer, ShapeFillRequest};
