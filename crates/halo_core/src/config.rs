//! Render configuration.
//!
//! One immutable [`RenderConfig`] is built at startup, validated, and then
//! passed by reference to every stage of the renderer.

use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;
use thiserror::Error;

/// Errors in render parameters.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("image dimensions must be positive, got {width}x{height}")]
    ZeroDimension { width: u32, height: u32 },

    #[error("rays per pixel must be positive")]
    NoRaysPerPixel,

    #[error("max bounces must be positive")]
    NoBounces,

    #[error("worker count must be positive")]
    NoWorkers,

    #[error("{workers} workers for {height} rows: every band needs at least one row")]
    TooManyWorkers { workers: usize, height: u32 },

    #[error("field of view must be a positive finite angle in radians, got {0}")]
    InvalidFov(f64),

    #[error("screen distance must be positive and finite, got {0}")]
    InvalidScreenDistance(f64),

    #[error("failed to parse render config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// How the sampler and pixel estimator treat their two historical shortcuts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SamplingMode {
    /// Redraw bounce directions perpendicular to the normal, and average each
    /// pixel over the samples actually taken.
    #[default]
    Corrected,

    /// Fail on perpendicular bounce directions, and average each pixel over
    /// the configured sample count even when sampling stopped early.
    Legacy,
}

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Path samples per pixel
    pub rays_per_pixel: u32,
    /// Maximum bounces per path sample
    pub max_bounces: u32,
    /// Number of row bands, and of threads rendering them
    pub workers: usize,
    /// Field of view in radians
    pub fov: f64,
    /// Distance from the camera to the screen plane
    pub screen_distance: f64,
    /// Base seed for the per-band random streams
    pub seed: u64,
    /// Legacy or corrected sampling behavior
    pub sampling: SamplingMode,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 1000,
            rays_per_pixel: 100,
            max_bounces: 10,
            workers: 24,
            fov: FRAC_PI_2,
            screen_distance: 1.0,
            seed: 0,
            sampling: SamplingMode::Corrected,
        }
    }
}

impl RenderConfig {
    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set quality settings.
    pub fn with_quality(mut self, rays_per_pixel: u32, max_bounces: u32) -> Self {
        self.rays_per_pixel = rays_per_pixel;
        self.max_bounces = max_bounces;
        self
    }

    /// Set the worker count.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Set the base random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the sampling mode.
    pub fn with_sampling(mut self, sampling: SamplingMode) -> Self {
        self.sampling = sampling;
        self
    }

    /// Parse and validate a JSON render config. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every parameter before any rendering work starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::ZeroDimension {
                width: self.width,
                height: self.height,
            });
        }
        if self.rays_per_pixel == 0 {
            return Err(ConfigError::NoRaysPerPixel);
        }
        if self.max_bounces == 0 {
            return Err(ConfigError::NoBounces);
        }
        if self.workers == 0 {
            return Err(ConfigError::NoWorkers);
        }
        if !(self.fov > 0.0) || !self.fov.is_finite() {
            return Err(ConfigError::InvalidFov(self.fov));
        }
        if !(self.screen_distance > 0.0) || !self.screen_distance.is_finite() {
            return Err(ConfigError::InvalidScreenDistance(self.screen_distance));
        }
        if self.workers > self.height as usize {
            return Err(ConfigError::TooManyWorkers {
                workers: self.workers,
                height: self.height,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RenderConfig::default();
        assert_eq!(config.rays_per_pixel, 100);
        assert_eq!(config.max_bounces, 10);
        assert_eq!((config.width, config.height), (1000, 1000));
        assert_eq!(config.workers, 24);
        assert_eq!(config.fov, FRAC_PI_2);
        assert_eq!(config.screen_distance, 1.0);
        assert_eq!(config.sampling, SamplingMode::Corrected);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_values() {
        let base = RenderConfig::default();

        assert!(matches!(
            base.clone().with_resolution(0, 10).validate(),
            Err(ConfigError::ZeroDimension { .. })
        ));
        assert!(matches!(
            base.clone().with_quality(0, 10).validate(),
            Err(ConfigError::NoRaysPerPixel)
        ));
        assert!(matches!(
            base.clone().with_quality(10, 0).validate(),
            Err(ConfigError::NoBounces)
        ));
        assert!(matches!(
            base.clone().with_workers(0).validate(),
            Err(ConfigError::NoWorkers)
        ));
    }

    #[test]
    fn test_validate_rejects_more_workers_than_rows() {
        let config = RenderConfig::default().with_resolution(4, 2).with_workers(3000);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TooManyWorkers {
                workers: 3000,
                height: 2
            })
        ));

        // One row per band is still fine
        assert!(config.with_workers(2).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_camera() {
        let mut config = RenderConfig::default();
        config.fov = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidFov(_))));

        let mut config = RenderConfig::default();
        config.screen_distance = f64::INFINITY;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidScreenDistance(_))
        ));
    }

    #[test]
    fn test_from_json_str() {
        let config =
            RenderConfig::from_json_str(r#"{ "width": 64, "height": 48, "sampling": "legacy" }"#)
                .unwrap();
        assert_eq!((config.width, config.height), (64, 48));
        assert_eq!(config.sampling, SamplingMode::Legacy);
        assert_eq!(config.rays_per_pixel, 100);
    }

    #[test]
    fn test_preview_json() {
        let config = RenderConfig::from_json_str(include_str!("../../../scenes/preview.json")).unwrap();
        assert_eq!((config.width, config.height), (200, 200));
        assert_eq!(config.workers, 8);
        assert_eq!(config.fov, FRAC_PI_2);
    }

    #[test]
    fn test_from_json_str_errors() {
        assert!(matches!(
            RenderConfig::from_json_str(r#"{ "rays_per_pixel": -1 }"#),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            RenderConfig::from_json_str(r#"{ "workers": 0 }"#),
            Err(ConfigError::NoWorkers)
        ));
    }
}
