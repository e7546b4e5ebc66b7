//! CPU evaluation of the generated distance function.
//!
//! Mirrors what the emitted `sdf(pos)` computes: the minimum over all faces
//! of the signed distance to each face's plane, starting from the sentinel.
//! This is not a true signed distance to the mesh.

use mesh_types::{IndexedMesh, MeshTopology, Point3};

/// Numeric value of [`SENTINEL_DISTANCE`](crate::SENTINEL_DISTANCE).
pub const SENTINEL: f64 = 1e10;

/// Evaluate the plane-distance approximation at `point`.
///
/// Faces with out-of-range indices are skipped. A degenerate face produces a
/// non-finite plane distance; NaN terms are ignored by the minimum, while an
/// infinite negative term wins it.
///
/// # Example
///
/// ```
/// use mesh_shaderpark::{approximate_distance, SENTINEL};
/// use mesh_types::{IndexedMesh, Point3, Vertex};
///
/// let empty = IndexedMesh::new();
/// assert_eq!(approximate_distance(&empty, Point3::origin()), SENTINEL);
///
/// let tri = IndexedMesh::from_parts(
///     vec![
///         Vertex::from_coords(0.0, 0.0, 0.0),
///         Vertex::from_coords(1.0, 0.0, 0.0),
///         Vertex::from_coords(0.0, 1.0, 0.0),
///     ],
///     vec![[0, 1, 2]],
/// );
/// assert!((approximate_distance(&tri, Point3::new(3.0, 3.0, 0.5)) - 0.5).abs() < 1e-12);
/// ```
#[must_use]
pub fn approximate_distance(mesh: &IndexedMesh, point: Point3<f64>) -> f64 {
    (0..mesh.face_count())
        .filter_map(|i| mesh.triangle(i))
        .map(|tri| tri.plane_distance(&point))
        .fold(SENTINEL, f64::min)
}
