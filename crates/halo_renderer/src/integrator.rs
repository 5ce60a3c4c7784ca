//! Path integrator.
//!
//! Follows one camera ray through the scene, accumulating emitted light
//! weighted by the surviving throughput of every bounce. The estimator is
//! deliberately simple: no 1/pi normalization, no russian roulette and no
//! next event estimation.

use crate::hittable::HitInfo;
use crate::sampler::random_direction;
use crate::scene::Scene;
use crate::Color;
use halo_core::RenderConfig;
use halo_math::{MathError, Ray, Vec3, VectorExt};
use rand::RngCore;

/// Outcome of a single path sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceResult {
    /// Light carried back along the path
    pub light: Color,
    /// Whether the path hit anything at all
    pub hit: bool,
}

/// Trace one path sample starting at `ray`.
///
/// Stops on the first miss or after `config.max_bounces` bounces. A
/// degenerate bounce sample only fails the path if another bounce would
/// follow it.
pub fn trace(
    mut ray: Ray,
    scene: &Scene,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Result<TraceResult, MathError> {
    let mut light = Color::ZERO;
    let mut throughput = Color::ONE;
    let mut hit_any = false;

    for bounce in 0..config.max_bounces {
        let Some(hit) = scene.nearest_hit(&ray)? else {
            break;
        };

        light += hit.material.emitted() * throughput;
        hit_any = true;

        let direction = match bounce_direction(&ray, &hit, config, rng) {
            Ok(direction) => direction,
            // Nothing is traced along the last direction
            Err(MathError::DegenerateSample) if bounce + 1 == config.max_bounces => break,
            Err(err) => return Err(err),
        };

        let cos_term = hit.normal.dot(direction);
        throughput *= hit.material.color * cos_term;
        ray = Ray::new(hit.point, direction);
    }

    Ok(TraceResult {
        light,
        hit: hit_any,
    })
}

/// Pick the outgoing direction at a hit.
///
/// Diffuse surfaces use the hemisphere sample as is. Smooth surfaces blend
/// it toward the mirror reflection of the incoming ray.
fn bounce_direction(
    ray: &Ray,
    hit: &HitInfo<'_>,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Result<Vec3, MathError> {
    let diffuse = random_direction(hit.normal, rng, config.sampling)?;
    let smoothness = hit.material.smoothness;
    if smoothness <= 0.0 {
        return Ok(diffuse);
    }

    let specular = ray.direction().reflected(hit.normal)?;
    diffuse.lerp(specular, smoothness).normalized()
}
