//! Triangle type for geometric calculations.

use nalgebra::{Point3, Vector3};

/// A triangle with concrete vertex positions.
///
/// Winding is counter-clockwise when viewed from the front, so
/// [`plane_normal`](Self::plane_normal) points toward the viewer.
///
/// # Example
///
/// ```
/// use mesh_types::{Triangle, Point3};
///
/// let tri = Triangle::new(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// );
///
/// // Points above the XY plane are on the positive side
/// assert!((tri.plane_distance(&Point3::new(5.0, 5.0, 2.0)) - 2.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// First vertex.
    pub v0: Point3<f64>,
    /// Second vertex.
    pub v1: Point3<f64>,
    /// Third vertex.
    pub v2: Point3<f64>,
}

impl Triangle {
    /// Create a new triangle from three points.
    #[inline]
    #[must_use]
    pub const fn new(v0: Point3<f64>, v1: Point3<f64>, v2: Point3<f64>) -> Self {
        Self { v0, v1, v2 }
    }

    /// Create a triangle from coordinate arrays.
    #[inline]
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Point3::new is not const in nalgebra
    pub fn from_arrays(v0: [f64; 3], v1: [f64; 3], v2: [f64; 3]) -> Self {
        Self {
            v0: Point3::from(v0),
            v1: Point3::from(v1),
            v2: Point3::from(v2),
        }
    }

    /// Vertices in winding order.
    #[inline]
    #[must_use]
    pub const fn vertices(&self) -> [Point3<f64>; 3] {
        [self.v0, self.v1, self.v2]
    }

    /// Unnormalized plane normal `(v1 - v0) x (v2 - v0)`.
    #[inline]
    #[must_use]
    pub fn plane_normal(&self) -> Vector3<f64> {
        (self.v1 - self.v0).cross(&(self.v2 - self.v0))
    }

    /// True when the three vertices are collinear or coincident.
    #[inline]
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.plane_normal().norm_squared() == 0.0
    }

    /// Signed distance from `point` to the infinite plane through the triangle.
    ///
    /// Positive on the side the normal points to. The triangle's footprint is
    /// not taken into account. Degenerate triangles divide by zero and yield
    /// a non-finite value.
    #[must_use]
    pub fn plane_distance(&self, point: &Point3<f64>) -> f64 {
        let nor = self.plane_normal();
        nor.dot(&(point - self.v0)) / nor.norm()
    }
}
