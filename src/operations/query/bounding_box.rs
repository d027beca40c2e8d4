use crate::error::{GeometryError, Result};
use crate::geometry::Solid;
use crate::math::Point3;
use crate::topology::{FragmentId, ModelStore, SolidId};

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy)]
pub struct Aabb {
    /// Minimum corner of the bounding box.
    pub min: Point3,
    /// Maximum corner of the bounding box.
    pub max: Point3,
}

impl Aabb {
    /// Computes the bounding box of a point set.
    ///
    /// Returns `None` for an empty set.
    pub fn from_points<'a>(points: impl Iterator<Item = &'a Point3>) -> Option<Self> {
        let mut aabb: Option<Self> = None;
        for p in points {
            match &mut aabb {
                None => {
                    aabb = Some(Self { min: *p, max: *p });
                }
                Some(b) => {
                    b.min = Point3::new(b.min.x.min(p.x), b.min.y.min(p.y), b.min.z.min(p.z));
                    b.max = Point3::new(b.max.x.max(p.x), b.max.y.max(p.y), b.max.z.max(p.z));
                }
            }
        }
        aabb
    }

    /// Returns the smallest box enclosing both boxes.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: Point3::new(
                self.min.x.min(other.min.x),
                self.min.y.min(other.min.y),
                self.min.z.min(other.min.z),
            ),
            max: Point3::new(
                self.max.x.max(other.max.x),
                self.max.y.max(other.max.y),
                self.max.z.max(other.max.z),
            ),
        }
    }

    /// Returns the box center's z coordinate, the representative elevation
    /// used when binning fragments.
    #[must_use]
    pub fn mid_z(&self) -> f64 {
        (self.min.z + self.max.z) / 2.0
    }
}

/// Computes the axis-aligned bounding box of a solid or fragment.
pub struct BoundingBox {
    target: Target,
}

enum Target {
    Solid(SolidId),
    Fragment(FragmentId),
}

impl BoundingBox {
    /// Creates a query over a registered solid.
    #[must_use]
    pub fn solid(id: SolidId) -> Self {
        Self {
            target: Target::Solid(id),
        }
    }

    /// Creates a query over a fragment.
    #[must_use]
    pub fn fragment(id: FragmentId) -> Self {
        Self {
            target: Target::Fragment(id),
        }
    }

    /// Executes the query, returning the AABB.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is missing or has no vertices.
    pub fn execute(&self, store: &ModelStore) -> Result<Aabb> {
        let shape: &Solid = match self.target {
            Target::Solid(id) => &store.solid(id)?.shape,
            Target::Fragment(id) => &store.fragment(id)?.shape,
        };
        Aabb::from_points(shape.points())
            .ok_or_else(|| GeometryError::Degenerate("empty solid has no bounding box".into()).into())
    }
}
