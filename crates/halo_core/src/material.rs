//! Surface materials.

use halo_math::Vec3;
use serde::{Deserialize, Serialize};

use crate::scene::SceneError;

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

/// Surface description for a diffuse, optionally emissive, sphere.
///
/// The default material is black, non-emissive and fully diffuse.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    /// Albedo, each channel in [0, 1] by convention
    pub color: Color,

    /// Color of the light this surface radiates
    pub emission: Color,

    /// Scale applied to `emission`, never negative
    pub emission_strength: f64,

    /// Blend toward mirror reflection (0 = diffuse, 1 = mirror)
    pub smoothness: f64,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Color::ZERO,
            emission: Color::ZERO,
            emission_strength: 0.0,
            smoothness: 0.0,
        }
    }
}

impl Material {
    /// A non-emissive diffuse material with the given albedo.
    pub fn diffuse(color: Color) -> Self {
        Self {
            color,
            ..Self::default()
        }
    }

    /// A material that radiates `emission * strength`.
    pub fn emissive(color: Color, emission: Color, strength: f64) -> Self {
        Self {
            color,
            emission,
            emission_strength: strength,
            smoothness: 0.0,
        }
    }

    /// Set the smoothness.
    pub fn with_smoothness(mut self, smoothness: f64) -> Self {
        self.smoothness = smoothness;
        self
    }

    /// Light radiated by the surface.
    #[inline]
    pub fn emitted(&self) -> Color {
        self.emission * self.emission_strength
    }

    /// Check the invariants a renderable material must hold.
    pub fn validate(&self) -> Result<(), SceneError> {
        if !(self.emission_strength >= 0.0) {
            return Err(SceneError::NegativeEmissionStrength(self.emission_strength));
        }
        if !(0.0..=1.0).contains(&self.smoothness) {
            return Err(SceneError::SmoothnessOutOfRange(self.smoothness));
        }
        Ok(())
    }
}
