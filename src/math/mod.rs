/// 3D point type used for solid-operation parameters.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type used for solid-operation parameters.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-9;

/// Minimum area below which a polygon is considered degenerate.
pub const AREA_TOLERANCE: f64 = 1e-6;
