//! Halo Core - Scene description and render settings
//!
//! This crate holds the data a render is built from:
//! - Surface materials
//! - Sphere scene descriptions (JSON loadable)
//! - Render configuration and its validation

pub mod config;
pub mod material;
pub mod scene;

// Re-export commonly used types
pub use config::{ConfigError, RenderConfig, SamplingMode};
pub use material::Material;
pub use scene::{SceneDescription, SceneError, SphereDescription};
