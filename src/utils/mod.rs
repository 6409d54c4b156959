pub mod color;
pub mod exporter;
pub mod pool;
pub mod profiler;
pub mod vector;
