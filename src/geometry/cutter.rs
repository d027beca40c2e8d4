use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};

/// A planar cutting surface sampled from a (nearly) horizontal input
/// surface.
///
/// Carries the sampled reference point and unit normal; the reference
/// point's z value is the cutter's elevation. The surface extent is treated
/// as unbounded during splitting.
#[derive(Debug, Clone)]
pub struct CuttingSurface {
    origin: Point3,
    normal: Vector3,
}

impl CuttingSurface {
    /// Creates a cutting surface from a sampled reference point and normal.
    ///
    /// The normal is normalized to unit length.
    ///
    /// # Errors
    ///
    /// Returns an error if the normal is zero-length.
    pub fn new(origin: Point3, normal: Vector3) -> Result<Self> {
        let len = normal.norm();
        if len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        Ok(Self {
            origin,
            normal: normal / len,
        })
    }

    /// Returns the sampled reference point.
    #[must_use]
    pub fn origin(&self) -> &Point3 {
        &self.origin
    }

    /// Returns the sampled unit normal.
    #[must_use]
    pub fn normal(&self) -> &Vector3 {
        &self.normal
    }

    /// Returns the sampled elevation (z of the reference point).
    #[must_use]
    pub fn elevation(&self) -> f64 {
        self.origin.z
    }

    /// Returns the same surface with its normal reversed.
    #[must_use]
    pub fn flipped(&self) -> Self {
        Self {
            origin: self.origin,
            normal: -self.normal,
        }
    }
}
