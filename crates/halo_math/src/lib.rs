// Re-export glam for convenience
pub use glam;
pub use glam::DVec3;

/// Double precision vector used throughout Halo for points, directions and colors.
pub type Vec3 = DVec3;

// Halo math types
mod interval;
mod ray;
mod vector;

pub use interval::Interval;
pub use ray::Ray;
pub use vector::{MathError, VectorExt};
