//! Shader Park SDF code generation from triangle meshes.
//!
//! Turns a mesh file into a [Shader Park](https://shaderpark.com) program
//! whose `sdf(pos)` is the minimum, over all faces, of the signed distance
//! from `pos` to each face's plane. This is a plane-distance approximation,
//! not a bounded triangle distance: points far outside a triangle's
//! footprint still get that plane's distance.
//!
//! # Example
//!
//! ```no_run
//! use mesh_shaderpark::{try_generate, GenerateParams};
//!
//! let report = try_generate("model.stl", &GenerateParams::with_scale(2.0), "model.js")?;
//! println!("emitted {} triangles", report.face_count);
//! # Ok::<(), mesh_shaderpark::CodegenError>(())
//! ```
//!
//! Meshes already in memory go through [`generate_program`] directly:
//!
//! ```
//! use mesh_shaderpark::generate_program;
//! use mesh_types::{IndexedMesh, Vertex};
//!
//! let mut mesh = IndexedMesh::from_parts(
//!     vec![
//!         Vertex::from_coords(0.0, 0.0, 0.0),
//!         Vertex::from_coords(1.0, 0.0, 0.0),
//!         Vertex::from_coords(0.0, 1.0, 0.0),
//!     ],
//!     vec![[0, 1, 2]],
//! );
//! mesh.scale(2.0);
//!
//! let program = generate_program(&mesh).unwrap();
//! assert!(program.contains("let p2_0 = [2.0, 0.0, 0.0];"));
//! assert_eq!(program.matches("d = min(d, sdTriangle(").count(), 1);
//! ```
//!
//! # Output Contract
//!
//! - Fragments appear in face order, one per face, inside `sdf`
//! - Coordinates are emitted at full precision
//! - Identical inputs produce byte-identical output

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod error;
mod eval;
mod generate;
mod params;
mod program;

pub use error::{CodegenError, CodegenResult, ErrorKind};
pub use eval::{approximate_distance, SENTINEL};
pub use generate::{
    generate, load_scaled_mesh, try_generate, write_mesh_program, GenerateReport,
};
pub use params::GenerateParams;
pub use program::{
    format_literal, format_point, generate_program, triangle_fragment, ProgramBuilder, EPILOGUE,
    PREAMBLE, SENTINEL_DISTANCE, TRIANGLE_HELPER,
};

// Re-exported so callers can name loader types without a direct dependency
pub use mesh_io::{IoError, MeshFormat};
