//! Error types for Shader Park code generation.

use std::path::PathBuf;

use mesh_io::IoError;
use thiserror::Error;

/// Result type for code generation.
pub type CodegenResult<T> = Result<T, CodegenError>;

/// Coarse failure category, one per way generation can go wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The mesh could not be read or parsed.
    Load,
    /// The output file could not be written.
    Write,
    /// Anything else, such as a face referencing a missing vertex.
    Unexpected,
}

/// Errors that can occur while generating a Shader Park program.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Mesh loading failed.
    #[error("failed to load mesh: {0}")]
    Load(#[from] IoError),

    /// Writing the generated program failed.
    #[error("failed to write {path}: {source}")]
    Write {
        /// Output path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A face references a vertex index past the end of the vertex list.
    #[error("face {face} references vertex {index}, but the mesh has {vertex_count} vertices")]
    FaceIndexOutOfRange {
        /// Face position in the mesh.
        face: usize,
        /// The offending vertex index.
        index: u32,
        /// Number of vertices in the mesh.
        vertex_count: usize,
    },
}

impl CodegenError {
    /// Category of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Load(_) => ErrorKind::Load,
            Self::Write { .. } => ErrorKind::Write,
            Self::FaceIndexOutOfRange { .. } => ErrorKind::Unexpected,
        }
    }
}
