use std::collections::HashMap;

use crate::error::{Result, TopologyError};
use crate::math::Point3;

/// A planar boundary polygon, wound counter-clockwise around its outward
/// normal.
pub type Face = Vec<Point3>;

/// A 3D solid described by its boundary polygons.
///
/// A *closed* solid has every undirected edge shared by exactly two faces
/// with opposite directions. Inputs to the slicing pipeline are validated
/// with [`Solid::validate_closed`]; intermediate fragments produced by
/// splitting may temporarily be open (e.g. when capping fails) and are
/// built with [`Solid::from_faces`].
#[derive(Debug, Clone, Default)]
pub struct Solid {
    faces: Vec<Face>,
}

impl Solid {
    /// Wraps boundary faces without validating closedness.
    #[must_use]
    pub fn from_faces(faces: Vec<Face>) -> Self {
        Self { faces }
    }

    /// Returns the boundary faces.
    #[must_use]
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Returns `true` if the solid has no boundary faces.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Iterates over every boundary vertex.
    pub fn points(&self) -> impl Iterator<Item = &Point3> {
        self.faces.iter().flatten()
    }

    /// Checks that the boundary is closed and consistently wound.
    ///
    /// Vertices are matched on a grid of cell size `tolerance`, so faces must
    /// agree on shared vertex coordinates to within the model tolerance.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::NotClosed`] if any edge is not shared by
    /// exactly two faces, or [`TopologyError::InvalidTopology`] if a face has
    /// fewer than 3 vertices.
    pub fn validate_closed(&self, tolerance: f64) -> Result<()> {
        if self.faces.is_empty() {
            return Err(TopologyError::NotClosed("solid has no faces".into()).into());
        }

        let mut edges: HashMap<(VertexKey, VertexKey), i64> = HashMap::new();
        for face in &self.faces {
            if face.len() < 3 {
                return Err(TopologyError::InvalidTopology(format!(
                    "face has {} vertices, need at least 3",
                    face.len()
                ))
                .into());
            }
            for i in 0..face.len() {
                let a = vertex_key(&face[i], tolerance);
                let b = vertex_key(&face[(i + 1) % face.len()], tolerance);
                if a == b {
                    continue; // zero-length edge, ignore
                }
                // Count +1 for (a, b), -1 for (b, a); a closed, consistently
                // wound boundary nets out to zero on every undirected edge.
                if a < b {
                    *edges.entry((a, b)).or_insert(0) += 1;
                } else {
                    *edges.entry((b, a)).or_insert(0) -= 1;
                }
            }
        }

        let unmatched = edges.values().filter(|&&count| count != 0).count();
        if unmatched > 0 {
            return Err(TopologyError::NotClosed(format!(
                "{unmatched} boundary edge(s) not shared by two opposing faces"
            ))
            .into());
        }
        Ok(())
    }
}

type VertexKey = (i64, i64, i64);

#[allow(clippy::cast_possible_truncation)]
fn vertex_key(p: &Point3, tolerance: f64) -> VertexKey {
    let cell = tolerance.max(crate::math::TOLERANCE);
    (
        (p.x / cell).round() as i64,
        (p.y / cell).round() as i64,
        (p.z / cell).round() as i64,
    )
}
