//! Core mesh types shared by the loader and the shader generator.
//!
//! - [`Vertex`] - A point in 3D space
//! - [`IndexedMesh`] - A triangle mesh with indexed vertices
//! - [`Triangle`] - A concrete triangle with resolved vertex positions
//!
//! # Units
//!
//! Coordinates are unit-agnostic `f64`. Whatever unit the source file uses
//! is carried through to the generated program, multiplied by the scale
//! factor.
//!
//! # Example
//!
//! ```
//! use mesh_types::{IndexedMesh, MeshTopology, Vertex};
//!
//! let mut mesh = IndexedMesh::new();
//! mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
//! mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
//! mesh.vertices.push(Vertex::from_coords(0.0, 1.0, 0.0));
//! mesh.faces.push([0, 1, 2]);
//!
//! mesh.scale(2.0);
//! let tri = mesh.triangle(0).unwrap();
//! assert_eq!(tri.v1.x, 2.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod mesh;
mod traits;
mod triangle;
mod vertex;

pub use mesh::IndexedMesh;
pub use traits::MeshTopology;
pub use triangle::Triangle;
pub use vertex::Vertex;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
