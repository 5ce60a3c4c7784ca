//! Camera for ray generation.

use halo_core::RenderConfig;
use halo_math::{MathError, Ray, Vec3, VectorExt};

/// Pinhole camera at the origin looking down +Z.
///
/// Pixel offsets are scaled linearly by `fov / size` on each axis, so the
/// field of view spans the image width and height alike.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub image_width: u32,
    pub image_height: u32,
    /// Field of view in radians
    fov: f64,
    /// Distance from the origin to the screen plane
    screen_distance: f64,
}

impl Camera {
    /// Create a new camera.
    pub fn new(image_width: u32, image_height: u32, fov: f64, screen_distance: f64) -> Self {
        Self {
            image_width,
            image_height,
            fov,
            screen_distance,
        }
    }

    /// Create a camera from the image and lens settings of a render config.
    pub fn from_config(config: &RenderConfig) -> Self {
        Self::new(config.width, config.height, config.fov, config.screen_distance)
    }

    /// Unit direction through the center of pixel (px, py).
    pub fn direction(&self, px: u32, py: u32) -> Result<Vec3, MathError> {
        let u = px as f64 + 0.5;
        let v = py as f64 + 0.5;
        let width = self.image_width as f64;
        let height = self.image_height as f64;

        let x = (u - width / 2.0) * (self.fov / width);
        let y = -(v - height / 2.0) * (self.fov / height);
        Vec3::new(x, y, self.screen_distance).normalized()
    }

    /// Generate the ray for pixel (px, py). Every ray starts at the origin.
    pub fn get_ray(&self, px: u32, py: u32) -> Result<Ray, MathError> {
        Ok(Ray::new(Vec3::ZERO, self.direction(px, py)?))
    }
}
