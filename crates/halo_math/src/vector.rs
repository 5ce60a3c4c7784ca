//! Fallible vector operations and color conversion on top of glam.

use crate::{Interval, Vec3};
use thiserror::Error;

/// Errors raised by vector math.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathError {
    #[error("cannot normalize a zero-length vector")]
    ZeroLength,

    #[error("sampled direction is perpendicular to the surface normal")]
    DegenerateSample,
}

/// Halo-specific operations on [`Vec3`].
///
/// Arithmetic, dot product and magnitude come from glam directly.
pub trait VectorExt: Sized {
    /// Scale to unit length.
    ///
    /// Fails with [`MathError::ZeroLength`] when the magnitude is exactly zero.
    fn normalized(self) -> Result<Self, MathError>;

    /// Reflect about `normal`. Both vectors are normalized first.
    fn reflected(self, normal: Self) -> Result<Self, MathError>;

    /// Convert a linear color to 8-bit channels.
    ///
    /// Each channel is clamped to [0, 1] and scaled by 255, no gamma.
    fn to_rgb8(self) -> [u8; 3];
}

impl VectorExt for Vec3 {
    fn normalized(self) -> Result<Self, MathError> {
        let magnitude = self.length();
        if magnitude == 0.0 {
            return Err(MathError::ZeroLength);
        }
        Ok(self / magnitude)
    }

    fn reflected(self, normal: Self) -> Result<Self, MathError> {
        let normal = normal.normalized()?;
        let incoming = self.normalized()?;
        Ok(incoming - 2.0 * incoming.dot(normal) * normal)
    }

    fn to_rgb8(self) -> [u8; 3] {
        let channel = |c: f64| (Interval::UNIT.clamp(c) * 255.0) as u8;
        [channel(self.x), channel(self.y), channel(self.z)]
    }
}
