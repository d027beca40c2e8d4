use crate::error::{OperationError, Result};
use crate::geometry::Solid;
use crate::math::{Point3, TOLERANCE};

/// Creates a closed box solid from two corner points.
///
/// Useful for building valid input solids without hand-writing face lists.
pub struct MakeBox {
    min_corner: Point3,
    max_corner: Point3,
}

impl MakeBox {
    /// Creates a new `MakeBox` operation.
    #[must_use]
    pub fn new(min_corner: Point3, max_corner: Point3) -> Self {
        Self {
            min_corner,
            max_corner,
        }
    }

    /// Executes the operation, returning the box's boundary representation.
    ///
    /// Faces are wound counter-clockwise around their outward normals.
    ///
    /// # Errors
    ///
    /// Returns an error if the box is degenerate along any axis.
    pub fn execute(&self) -> Result<Solid> {
        let (lo, hi) = (self.min_corner, self.max_corner);
        if hi.x - lo.x < TOLERANCE || hi.y - lo.y < TOLERANCE || hi.z - lo.z < TOLERANCE {
            return Err(OperationError::InvalidInput(
                "box corners must span a positive extent on every axis".into(),
            )
            .into());
        }

        let p = |x: f64, y: f64, z: f64| Point3::new(x, y, z);
        let faces = vec![
            // bottom (-z)
            vec![
                p(lo.x, lo.y, lo.z),
                p(lo.x, hi.y, lo.z),
                p(hi.x, hi.y, lo.z),
                p(hi.x, lo.y, lo.z),
            ],
            // top (+z)
            vec![
                p(lo.x, lo.y, hi.z),
                p(hi.x, lo.y, hi.z),
                p(hi.x, hi.y, hi.z),
                p(lo.x, hi.y, hi.z),
            ],
            // front (-y)
            vec![
                p(lo.x, lo.y, lo.z),
                p(hi.x, lo.y, lo.z),
                p(hi.x, lo.y, hi.z),
                p(lo.x, lo.y, hi.z),
            ],
            // back (+y)
            vec![
                p(lo.x, hi.y, lo.z),
                p(lo.x, hi.y, hi.z),
                p(hi.x, hi.y, hi.z),
                p(hi.x, hi.y, lo.z),
            ],
            // left (-x)
            vec![
                p(lo.x, lo.y, lo.z),
                p(lo.x, lo.y, hi.z),
                p(lo.x, hi.y, hi.z),
                p(lo.x, hi.y, lo.z),
            ],
            // right (+x)
            vec![
                p(hi.x, lo.y, lo.z),
                p(hi.x, hi.y, lo.z),
                p(hi.x, hi.y, hi.z),
                p(hi.x, lo.y, hi.z),
            ],
        ];

        Ok(Solid::from_faces(faces))
    }
}
