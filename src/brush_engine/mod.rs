pub mod accumulation;
pub mod brush_options;
pub mod context;
pub mod falloff;
pub mod footprint;
pub mod painter;
pub mod painters;
pub mod stroke;
