use crate::error::Result;
use crate::geometry::Solid;
use crate::tessellation::triangulate_polygon;
use crate::topology::{FragmentId, ModelStore, SolidId};

/// Computes the volume of a solid or fragment.
///
/// Uses the signed tetrahedron method: each boundary face is triangulated
/// and every triangle contributes `v0 . (v1 x v2) / 6`. With outward-wound
/// faces the sum is the enclosed volume; the absolute value is returned so
/// a globally inverted boundary still yields a positive volume.
pub struct Volume {
    target: Target,
    tolerance: f64,
}

enum Target {
    Solid(SolidId),
    Fragment(FragmentId),
}

impl Volume {
    /// Creates a volume query over a registered solid.
    #[must_use]
    pub fn solid(id: SolidId, tolerance: f64) -> Self {
        Self {
            target: Target::Solid(id),
            tolerance,
        }
    }

    /// Creates a volume query over a fragment.
    #[must_use]
    pub fn fragment(id: FragmentId, tolerance: f64) -> Self {
        Self {
            target: Target::Fragment(id),
            tolerance,
        }
    }

    /// Executes the query, returning the volume (absolute value).
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is missing or a face cannot be
    /// triangulated.
    pub fn execute(&self, store: &ModelStore) -> Result<f64> {
        let shape: &Solid = match self.target {
            Target::Solid(id) => &store.solid(id)?.shape,
            Target::Fragment(id) => &store.fragment(id)?.shape,
        };
        mesh_volume(shape, self.tolerance)
    }
}

/// Signed-tetrahedron volume of a boundary representation.
///
/// # Errors
///
/// Returns an error if a face cannot be triangulated.
pub fn mesh_volume(shape: &Solid, tolerance: f64) -> Result<f64> {
    let mut signed_volume = 0.0;
    for face in shape.faces() {
        for tri in triangulate_polygon(face, tolerance)? {
            let det = tri[0]
                .coords
                .dot(&tri[1].coords.cross(&tri[2].coords));
            signed_volume += det;
        }
    }
    Ok(signed_volume.abs() / 6.0)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point3;
    use crate::operations::creation::MakeBox;
    use crate::topology::SolidData;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn register(store: &mut ModelStore, shape: Solid) -> SolidId {
        store.add_solid(SolidData {
            shape,
            label: String::new(),
            source_index: 0,
        })
    }

    #[test]
    fn box_volume() {
        let mut store = ModelStore::new();
        let shape = MakeBox::new(p(0.0, 0.0, 0.0), p(2.0, 3.0, 4.0))
            .execute()
            .unwrap();
        let solid = register(&mut store, shape);

        let volume = Volume::solid(solid, 1e-6).execute(&store).unwrap();
        assert!((volume - 24.0).abs() < 1e-9, "expected 24.0, got {volume}");
    }

    #[test]
    fn offset_box_volume() {
        let mut store = ModelStore::new();
        let shape = MakeBox::new(p(1.0, 2.0, 3.0), p(3.0, 5.0, 7.0))
            .execute()
            .unwrap();
        let solid = register(&mut store, shape);

        let volume = Volume::solid(solid, 1e-6).execute(&store).unwrap();
        // 2 * 3 * 4 = 24, independent of the offset from the origin
        assert!((volume - 24.0).abs() < 1e-9, "expected 24.0, got {volume}");
    }

    #[test]
    fn open_shape_volume_is_partial() {
        let mut store = ModelStore::new();
        let shape = MakeBox::new(p(0.0, 0.0, 0.0), p(1.0, 1.0, 1.0))
            .execute()
            .unwrap();
        let mut faces = shape.faces().to_vec();
        faces.pop();
        let solid = register(&mut store, Solid::from_faces(faces));

        // Still computes, just not the closed-volume value
        let volume = Volume::solid(solid, 1e-6).execute(&store).unwrap();
        assert!(volume.is_finite());
    }
}
