//! The renderable scene and its nearest-hit resolver.

use crate::hittable::{HitInfo, Shape};
use crate::sphere::Sphere;
use halo_core::{SceneDescription, SceneError};
use halo_math::{Interval, MathError, Ray};

/// An ordered collection of shapes.
///
/// Built once, then shared by reference with every render thread. Nothing
/// mutates it while a render is running.
#[derive(Default)]
pub struct Scene {
    shapes: Vec<Box<dyn Shape>>,
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self { shapes: Vec::new() }
    }

    /// Build the shapes of a scene description, validating every sphere.
    pub fn from_description(description: &SceneDescription) -> Result<Self, SceneError> {
        let mut scene = Self::new();
        for (index, sphere) in description.spheres.iter().enumerate() {
            let shape = Sphere::new(sphere.center, sphere.radius, sphere.material).map_err(
                |source| SceneError::Sphere {
                    index,
                    source: Box::new(source),
                },
            )?;
            scene.add(Box::new(shape));
        }
        log::debug!("Built scene with {} shapes", scene.len());
        Ok(scene)
    }

    /// Add a shape to the end of the scene.
    pub fn add(&mut self, shape: Box<dyn Shape>) {
        self.shapes.push(shape);
    }

    /// Get the number of shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Check if the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Find the closest hit at a positive distance.
    ///
    /// Linear scan; on equal distances the shape added first wins.
    pub fn nearest_hit(&self, ray: &Ray) -> Result<Option<HitInfo<'_>>, MathError> {
        let mut closest: Option<HitInfo<'_>> = None;

        for shape in &self.shapes {
            let max = closest.map_or(f64::INFINITY, |hit| hit.distance);
            if let Some(hit) = shape.ray_trace(ray, Interval::new(Interval::POSITIVE.min, max))? {
                closest = Some(hit);
            }
        }

        Ok(closest)
    }
}
