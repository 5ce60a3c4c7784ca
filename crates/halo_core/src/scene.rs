//! Scene description types.
//!
//! A scene is an ordered list of spheres. The description is plain data that
//! can be built in code or loaded from JSON; the renderer turns it into
//! intersectable shapes once, before any rendering starts.

use halo_math::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::material::{Color, Material};

/// Errors found while building or validating a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("sphere radius must be positive, got {0}")]
    NonPositiveRadius(f64),

    #[error("emission strength must not be negative, got {0}")]
    NegativeEmissionStrength(f64),

    #[error("smoothness must be within [0, 1], got {0}")]
    SmoothnessOutOfRange(f64),

    #[error("sphere #{index}: {source}")]
    Sphere {
        index: usize,
        #[source]
        source: Box<SceneError>,
    },

    #[error("failed to parse scene description: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One sphere of a scene description.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SphereDescription {
    pub center: Vec3,
    pub radius: f64,
    #[serde(default)]
    pub material: Material,
}

impl SphereDescription {
    /// Create a new sphere description.
    pub fn new(center: Vec3, radius: f64, material: Material) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }

    /// Check radius and material invariants.
    pub fn validate(&self) -> Result<(), SceneError> {
        if !(self.radius > 0.0) || !self.radius.is_finite() {
            return Err(SceneError::NonPositiveRadius(self.radius));
        }
        self.material.validate()
    }
}

/// An ordered list of spheres. Order matters: it breaks intersection ties.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    pub spheres: Vec<SphereDescription>,
}

impl SceneDescription {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sphere.
    pub fn with_sphere(mut self, sphere: SphereDescription) -> Self {
        self.spheres.push(sphere);
        self
    }

    /// Parse and validate a JSON scene description.
    pub fn from_json_str(json: &str) -> Result<Self, SceneError> {
        let scene: Self = serde_json::from_str(json)?;
        scene.validate()?;
        Ok(scene)
    }

    /// Validate every sphere, reporting the first offending index.
    pub fn validate(&self) -> Result<(), SceneError> {
        for (index, sphere) in self.spheres.iter().enumerate() {
            sphere.validate().map_err(|source| SceneError::Sphere {
                index,
                source: Box::new(source),
            })?;
        }
        Ok(())
    }

    /// The default scene: a large magenta ground sphere, a red and a blue
    /// sphere either side of a white light.
    pub fn demo() -> Self {
        Self::new()
            .with_sphere(SphereDescription::new(
                Vec3::new(0.0, -50.0, 15.0),
                50.0,
                Material::diffuse(Color::new(1.0, 0.0, 1.0)),
            ))
            .with_sphere(SphereDescription::new(
                Vec3::new(-6.0, 2.0, 10.0),
                2.0,
                Material::diffuse(Color::new(1.0, 0.0, 0.0)),
            ))
            .with_sphere(SphereDescription::new(
                Vec3::new(0.0, 2.0, 10.0),
                2.5,
                Material::emissive(Color::ZERO, Color::ONE, 1.5),
            ))
            .with_sphere(SphereDescription::new(
                Vec3::new(6.0, 2.0, 10.0),
                2.0,
                Material::diffuse(Color::new(0.0, 0.0, 1.0)),
            ))
    }

    /// Number of spheres.
    pub fn len(&self) -> usize {
        self.spheres.len()
    }

    /// Check if the scene has no spheres.
    pub fn is_empty(&self) -> bool {
        self.spheres.is_empty()
    }
}
