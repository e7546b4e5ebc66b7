//! Traits for mesh types.

use crate::Triangle;

/// Minimal topology interface for a triangle mesh.
pub trait MeshTopology {
    /// Get the number of vertices.
    fn vertex_count(&self) -> usize;

    /// Get the number of faces (triangles).
    fn face_count(&self) -> usize;

    /// Check if the mesh is empty.
    fn is_empty(&self) -> bool {
        self.vertex_count() == 0 || self.face_count() == 0
    }

    /// Get a triangle by face index with resolved vertex positions.
    ///
    /// Returns `None` if the face index, or any vertex index the face
    /// references, is out of bounds.
    fn triangle(&self, face_index: usize) -> Option<Triangle>;
}
