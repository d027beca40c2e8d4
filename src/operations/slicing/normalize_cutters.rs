use crate::error::{OperationError, Result};
use crate::math::TOLERANCE;

use super::LabeledCutter;

/// Fixes the orientation of sorted cutters so splitting behaves
/// consistently.
///
/// The lowest cutter's normal is flipped to point downward; every other
/// cutter's normal is flipped to point upward. Splitting against a surface
/// is orientation-sensitive, so [`super::SplitSolid`] requires this
/// invariant and fails when it does not hold.
pub struct NormalizeCutters {
    cutters: Vec<LabeledCutter>,
}

impl NormalizeCutters {
    /// Creates a new `NormalizeCutters` operation over cutters already
    /// sorted ascending by elevation.
    #[must_use]
    pub fn new(cutters: Vec<LabeledCutter>) -> Self {
        Self { cutters }
    }

    /// Executes the normalization, returning reoriented cutters.
    ///
    /// # Errors
    ///
    /// Returns an error if a cutter's normal is perpendicular to the
    /// vertical axis; such a surface is not a usable horizontal slicing
    /// guide.
    pub fn execute(self) -> Result<Vec<LabeledCutter>> {
        let mut out = Vec::with_capacity(self.cutters.len());
        for (i, mut cutter) in self.cutters.into_iter().enumerate() {
            let z = cutter.surface.normal().z;
            if z.abs() < TOLERANCE {
                return Err(OperationError::InvalidInput(format!(
                    "cutting surface '{}' is vertical; its normal has no z component",
                    cutter.label
                ))
                .into());
            }
            let flip = if i == 0 { z > 0.0 } else { z < 0.0 };
            if flip {
                cutter.surface = cutter.surface.flipped();
            }
            out.push(cutter);
        }
        Ok(out)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::CuttingSurface;
    use crate::math::{Point3, Vector3};

    fn cutter(z: f64, normal: Vector3) -> LabeledCutter {
        LabeledCutter {
            surface: CuttingSurface::new(Point3::new(0.0, 0.0, z), normal).unwrap(),
            label: format!("L{z}"),
        }
    }

    #[test]
    fn lowest_cutter_points_down() {
        let out = NormalizeCutters::new(vec![cutter(1.0, Vector3::z()), cutter(4.0, Vector3::z())])
            .execute()
            .unwrap();
        assert!(out[0].surface.normal().z < 0.0);
        assert!(out[1].surface.normal().z > 0.0);
    }

    #[test]
    fn upper_cutters_point_up() {
        let out = NormalizeCutters::new(vec![
            cutter(1.0, -Vector3::z()),
            cutter(4.0, -Vector3::z()),
            cutter(8.0, Vector3::z()),
        ])
        .execute()
        .unwrap();
        assert!(out[0].surface.normal().z < 0.0);
        assert!(out[1].surface.normal().z > 0.0);
        assert!(out[2].surface.normal().z > 0.0);
    }

    #[test]
    fn tilted_cutter_is_normalized_best_effort() {
        let out = NormalizeCutters::new(vec![cutter(2.0, Vector3::new(0.1, 0.0, -1.0))])
            .execute()
            .unwrap();
        // lowest: already pointing down, unchanged
        assert!(out[0].surface.normal().z < 0.0);
    }

    #[test]
    fn vertical_cutter_is_rejected() {
        let result = NormalizeCutters::new(vec![cutter(2.0, Vector3::x())]).execute();
        assert!(result.is_err());
    }
}
