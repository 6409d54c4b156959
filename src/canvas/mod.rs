#[allow(clippy::module_inception)]
pub mod canvas;
pub mod history;
pub mod surface;

pub use canvas::{Canvas, EditTarget, Layer};
pub use history::{ChangeSet, History, PixelChange};
pub use surface::{PixelSurface, Rgba8, TRANSPARENT};
