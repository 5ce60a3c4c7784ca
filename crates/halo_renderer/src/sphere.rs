//! Sphere primitive for ray tracing.

use crate::hittable::{HitInfo, Shape};
use halo_core::{Material, SceneError};
use halo_math::{Interval, MathError, Ray, Vec3, VectorExt};

/// A sphere primitive.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: Vec3,
    radius: f64,
    material: Material,
}

impl Sphere {
    /// Create a new sphere. The radius must be positive and finite.
    pub fn new(center: Vec3, radius: f64, material: Material) -> Result<Self, SceneError> {
        if !(radius > 0.0) || !radius.is_finite() {
            return Err(SceneError::NonPositiveRadius(radius));
        }
        material.validate()?;

        Ok(Self {
            center,
            radius,
            material,
        })
    }
}

impl Shape for Sphere {
    fn ray_trace(&self, ray: &Ray, ray_t: Interval) -> Result<Option<HitInfo<'_>>, MathError> {
        let oc = ray.origin() - self.center;
        let a = ray.direction().dot(ray.direction());
        let b = 2.0 * oc.dot(ray.direction());
        let c = oc.dot(oc) - self.radius * self.radius;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return Ok(None);
        }

        // Near root only. A zero-length direction yields NaN and misses.
        let t = (-b - discriminant.sqrt()) / (2.0 * a);
        if !ray_t.surrounds(t) {
            return Ok(None);
        }

        let point = ray.at(t);
        let normal = (point - self.center).normalized()?;

        Ok(Some(HitInfo {
            distance: t,
            point,
            normal,
            material: &self.material,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grey() -> Material {
        Material::diffuse(Vec3::splat(0.5))
    }

    #[test]
    fn test_sphere_hit() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, 10.0), 1.0, grey()).unwrap();
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);

        let hit = sphere.ray_trace(&ray, Interval::POSITIVE).unwrap().unwrap();
        assert_eq!(hit.distance, 9.0);
        assert_eq!(hit.point, Vec3::new(0.0, 0.0, 9.0));
        assert_eq!(hit.normal, Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(*hit.material, grey());
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, 10.0), 1.0, grey()).unwrap();

        // Negative discriminant
        let ray = Ray::new(Vec3::ZERO, Vec3::Y);
        assert!(sphere.ray_trace(&ray, Interval::POSITIVE).unwrap().is_none());
    }

    #[test]
    fn test_sphere_behind_origin() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -10.0), 1.0, grey()).unwrap();
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);

        // Both roots negative
        assert!(sphere.ray_trace(&ray, Interval::POSITIVE).unwrap().is_none());
    }

    #[test]
    fn test_sphere_inside_reports_no_exit() {
        let sphere = Sphere::new(Vec3::ZERO, 5.0, grey()).unwrap();
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        assert!(sphere.ray_trace(&ray, Interval::POSITIVE).unwrap().is_none());
    }

    #[test]
    fn test_sphere_hit_distance_positive() {
        let sphere = Sphere::new(Vec3::new(1.0, 2.0, 20.0), 3.0, grey()).unwrap();
        let direction = Vec3::new(0.05, 0.1, 1.0).normalize();
        let ray = Ray::new(Vec3::ZERO, direction);

        let hit = sphere.ray_trace(&ray, Interval::POSITIVE).unwrap().unwrap();
        assert!(hit.distance > 0.0);
        assert!((hit.normal.length() - 1.0).abs() < 1e-9);
        assert!(((hit.point - sphere.center).length() - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_sphere_respects_interval_max() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, 10.0), 1.0, grey()).unwrap();
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);

        assert!(sphere.ray_trace(&ray, Interval::new(0.0, 9.0)).unwrap().is_none());
        assert!(sphere.ray_trace(&ray, Interval::new(0.0, 9.5)).unwrap().is_some());
    }

    #[test]
    fn test_zero_direction_misses() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, 10.0), 1.0, grey()).unwrap();
        let ray = Ray::new(Vec3::ZERO, Vec3::ZERO);

        assert!(sphere.ray_trace(&ray, Interval::POSITIVE).unwrap().is_none());
    }

    #[test]
    fn test_invalid_radius() {
        assert!(matches!(
            Sphere::new(Vec3::ZERO, 0.0, grey()),
            Err(SceneError::NonPositiveRadius(_))
        ));
        assert!(matches!(
            Sphere::new(Vec3::ZERO, -1.0, grey()),
            Err(SceneError::NonPositiveRadius(_))
        ));
    }
}
