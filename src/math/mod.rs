pub mod plane;
pub mod polygon;

pub use plane::Plane;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Global geometric tolerance for floating-point comparisons.
///
/// Slicing operations additionally take a per-call model tolerance; this
/// constant is the floor below which any supplied tolerance is treated
/// as degenerate.
pub const TOLERANCE: f64 = 1e-10;
