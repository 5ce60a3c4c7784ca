//! Random bounce directions.

use halo_core::SamplingMode;
use halo_math::{MathError, Vec3, VectorExt};
use rand::{Rng, RngCore};
use std::f64::consts::TAU;

/// Draw one sample from the standard normal distribution (Box-Muller).
pub fn standard_normal(rng: &mut dyn RngCore) -> f64 {
    let theta = TAU * rng.gen::<f64>();
    // gen() is in [0, 1); flip it so the log never sees zero
    let rho = (-2.0 * (1.0 - rng.gen::<f64>()).ln()).sqrt();
    rho * theta.cos()
}

/// Sample a unit direction in the hemisphere around `normal`.
///
/// Three independent normal samples give a direction uniform on the sphere,
/// which is flipped by the sign of its dot product with the normal. A sample
/// exactly perpendicular to the normal is redrawn in
/// [`SamplingMode::Corrected`] and fails with [`MathError::DegenerateSample`]
/// in [`SamplingMode::Legacy`]. The integrator only treats that failure as
/// fatal when a further bounce would follow the direction.
pub fn random_direction(
    normal: Vec3,
    rng: &mut dyn RngCore,
    mode: SamplingMode,
) -> Result<Vec3, MathError> {
    if mode == SamplingMode::Corrected && normal == Vec3::ZERO {
        // Every sample would be perpendicular
        return Err(MathError::ZeroLength);
    }

    loop {
        let sample = Vec3::new(
            standard_normal(rng),
            standard_normal(rng),
            standard_normal(rng),
        );

        let direction = match (sample.normalized(), mode) {
            (Ok(direction), _) => direction,
            (Err(err), SamplingMode::Legacy) => return Err(err),
            (Err(_), SamplingMode::Corrected) => continue,
        };

        let side = normal.dot(sample);
        if side > 0.0 {
            return Ok(direction);
        }
        if side < 0.0 {
            return Ok(-direction);
        }

        match mode {
            SamplingMode::Legacy => return Err(MathError::DegenerateSample),
            SamplingMode::Corrected => continue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_standard_normal_moments() {
        let mut rng = StdRng::seed_from_u64(7);
        let n = 50_000;
        let samples: Vec<f64> = (0..n).map(|_| standard_normal(&mut rng)).collect();

        let mean = samples.iter().sum::<f64>() / n as f64;
        let variance = samples.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / n as f64;

        assert!(mean.abs() < 0.03, "mean = {mean}");
        assert!((variance - 1.0).abs() < 0.05, "variance = {variance}");
        assert!(samples.iter().all(|s| s.is_finite()));
    }

    #[test]
    fn test_random_direction_in_hemisphere() {
        let mut rng = StdRng::seed_from_u64(42);
        let normal = Vec3::new(0.3, -0.4, 0.866).normalize();

        for mode in [SamplingMode::Corrected, SamplingMode::Legacy] {
            for _ in 0..2_000 {
                let direction = random_direction(normal, &mut rng, mode).unwrap();
                assert!((direction.length() - 1.0).abs() < 1e-9);
                assert!(direction.dot(normal) >= 0.0);
            }
        }
    }

    #[test]
    fn test_random_direction_covers_hemisphere() {
        let mut rng = StdRng::seed_from_u64(3);
        let normal = Vec3::Y;

        let mean = (0..20_000)
            .map(|_| random_direction(normal, &mut rng, SamplingMode::Corrected).unwrap())
            .fold(Vec3::ZERO, |acc, d| acc + d)
            / 20_000.0;

        // Uniform hemisphere: tangent components average out, normal component to 1/2
        assert!(mean.x.abs() < 0.02, "{mean:?}");
        assert!(mean.z.abs() < 0.02, "{mean:?}");
        assert!((mean.y - 0.5).abs() < 0.02, "{mean:?}");
    }

    #[test]
    fn test_legacy_degenerate_sample() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            random_direction(Vec3::ZERO, &mut rng, SamplingMode::Legacy),
            Err(MathError::DegenerateSample)
        );
    }

    #[test]
    fn test_corrected_zero_normal() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            random_direction(Vec3::ZERO, &mut rng, SamplingMode::Corrected),
            Err(MathError::ZeroLength)
        );
    }

    #[test]
    fn test_seeded_streams_repeat() {
        let mut a = StdRng::seed_from_u64(99);
        let mut b = StdRng::seed_from_u64(99);
        for _ in 0..100 {
            assert_eq!(
                random_direction(Vec3::Z, &mut a, SamplingMode::Corrected),
                random_direction(Vec3::Z, &mut b, SamplingMode::Corrected)
            );
        }
    }
}
