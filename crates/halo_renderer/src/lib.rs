//! Halo Renderer - CPU Path Tracing
//!
//! A Monte Carlo path tracer for scenes made of spheres.
//!
//! The image is split into row bands that render in parallel on a rayon
//! pool, each band with its own random stream, and the results are stitched
//! back together in row order.

mod band;
mod camera;
mod hittable;
mod integrator;
mod renderer;
mod sampler;
mod scene;
mod sphere;

pub use band::{band_seed, partition_rows, render_band, BandResult, RowBand};
pub use camera::Camera;
pub use hittable::{HitInfo, Shape};
pub use integrator::{trace, TraceResult};
pub use renderer::{render, render_description, render_pixel, PixelBuffer, RenderError};
pub use sampler::{random_direction, standard_normal};
pub use scene::Scene;
pub use sphere::Sphere;

/// Re-export the scene description and settings from halo_core
pub use halo_core::{Material, RenderConfig, SamplingMode, SceneDescription};

/// Re-export Vec3 and common math types from halo_math
pub use halo_math::{MathError, Ray, Vec3, VectorExt};

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;
