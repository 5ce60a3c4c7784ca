//! Shape trait and HitInfo for ray-object intersection.

use halo_core::Material;
use halo_math::{Interval, MathError, Ray, Vec3};

/// Record of the nearest ray-object intersection.
#[derive(Debug, Clone, Copy)]
pub struct HitInfo<'a> {
    /// Parameter t along the ray, always > 0
    pub distance: f64,
    /// Point of intersection
    pub point: Vec3,
    /// Outward unit surface normal
    pub normal: Vec3,
    /// Material at the intersection point
    pub material: &'a Material,
}

/// Trait for primitives that can be hit by rays.
///
/// Shapes are shared read-only between render threads.
pub trait Shape: Send + Sync {
    /// Test if a ray hits this shape at a distance strictly inside `ray_t`.
    ///
    /// Only the nearest root of the shape is considered; a hit behind the
    /// ray origin is never reported.
    fn ray_trace(&self, ray: &Ray, ray_t: Interval) -> Result<Option<HitInfo<'_>>, MathError>;
}
