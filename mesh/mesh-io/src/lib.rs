//! Mesh file loading.
//!
//! - **STL** (Stereolithography) - Binary and ASCII, detected by content
//! - **OBJ** (Wavefront) - ASCII, vertices and faces only
//!
//! # Example
//!
//! ```no_run
//! use mesh_io::{load_mesh, MeshFormat};
//!
//! // Format detected from .stl extension
//! let mesh = load_mesh("model.stl").unwrap();
//! assert_eq!(MeshFormat::from_path("model.stl"), Some(MeshFormat::Stl));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod error;
mod obj;
mod stl;

pub use error::{IoError, IoResult};
pub use obj::{load_obj, parse_obj};
pub use stl::{load_stl, parse_stl};

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use mesh_types::IndexedMesh;
use tracing::debug;

/// Supported mesh file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshFormat {
    /// STL (Stereolithography) format, binary or ASCII.
    Stl,
    /// OBJ (Wavefront) format.
    Obj,
}

impl MeshFormat {
    /// Detect format from file extension (case-insensitive).
    ///
    /// Returns `None` if the extension is missing or not recognized.
    #[must_use]
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        path.as_ref().extension()?.to_str()?.parse().ok()
    }

    /// Get the canonical file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Stl => "stl",
            Self::Obj => "obj",
        }
    }
}

impl fmt::Display for MeshFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for MeshFormat {
    type Err = IoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "stl" => Ok(Self::Stl),
            "obj" => Ok(Self::Obj),
            _ => Err(IoError::UnknownFormat {
                extension: s.to_string(),
            }),
        }
    }
}

/// Load a mesh from a file, detecting format from extension.
///
/// # Errors
///
/// Returns an error if:
/// - The file format cannot be determined from the extension
/// - The file cannot be read
/// - The file content is invalid for the detected format
pub fn load_mesh<P: AsRef<Path>>(path: P) -> IoResult<IndexedMesh> {
    let path = path.as_ref();
    let format = MeshFormat::from_path(path).ok_or_else(|| IoError::UnknownFormat {
        extension: path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("(none)")
            .to_string(),
    })?;
    load_mesh_as(path, format)
}

/// Load a mesh from a file in an explicitly chosen format.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is invalid for `format`.
pub fn load_mesh_as<P: AsRef<Path>>(path: P, format: MeshFormat) -> IoResult<IndexedMesh> {
    let path = path.as_ref();
    debug!(path = %path.display(), %format, "Loading mesh");
    match format {
        MeshFormat::Stl => load_stl(path),
        MeshFormat::Obj => load_obj(path),
    }
}
