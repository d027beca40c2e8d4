mod triangulate;

pub use triangulate::triangulate_polygon;

use crate::math::Point3;

/// A triangle in 3D space, wound like the polygon it came from.
pub type Triangle = [Point3; 3];
