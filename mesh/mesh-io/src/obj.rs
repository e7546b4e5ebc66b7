//! Wavefront OBJ support (geometry only).
//!
//! Reads `v` and `f` records. Face corners may carry `/vt/vn` suffixes,
//! which are ignored. Indices are 1-based; negative indices count back from
//! the most recent vertex. Polygons are fan-triangulated around their first
//! corner. Every other directive (`vn`, `vt`, `o`, `g`, `usemtl`, ...) is
//! skipped.

use std::path::Path;

use mesh_types::{IndexedMesh, Vertex};
use tracing::debug;

use crate::error::{IoError, IoResult};

/// Load a mesh from an OBJ file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, a number fails to parse, or
/// a face references a vertex that does not exist.
pub fn load_obj<P: AsRef<Path>>(path: P) -> IoResult<IndexedMesh> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| IoError::from_open(path, e))?;
    parse_obj(&text)
}

/// Parse OBJ text already held in memory.
///
/// # Errors
///
/// See [`load_obj`].
pub fn parse_obj(text: &str) -> IoResult<IndexedMesh> {
    let mut mesh = IndexedMesh::new();
    let mut corners: Vec<u32> = Vec::new();

    for (line_no, line) in text.lines().enumerate() {
        let line = line.split('#').next().unwrap_or_default();
        let mut parts = line.split_whitespace();
        match parts.next() {
            Some("v") => {
                let coords: Vec<&str> = parts.take(3).collect();
                if coords.len() < 3 {
                    return Err(IoError::invalid_content(format!(
                        "line {}: vertex needs three coordinates",
                        line_no + 1
                    )));
                }
                mesh.vertices.push(Vertex::from_coords(
                    coords[0].parse()?,
                    coords[1].parse()?,
                    coords[2].parse()?,
                ));
            }
            Some("f") => {
                corners.clear();
                for token in parts {
                    corners.push(resolve_index(token, mesh.vertices.len(), line_no + 1)?);
                }
                if corners.len() < 3 {
                    return Err(IoError::invalid_content(format!(
                        "line {}: face needs at least three corners",
                        line_no + 1
                    )));
                }
                for pair in corners[1..].windows(2) {
                    mesh.faces.push([corners[0], pair[0], pair[1]]);
                }
            }
            _ => {}
        }
    }

    debug!(
        vertices = mesh.vertices.len(),
        faces = mesh.faces.len(),
        "Parsed OBJ"
    );
    Ok(mesh)
}

/// Turn one face corner token into a 0-based vertex index.
fn resolve_index(token: &str, vertex_count: usize, line: usize) -> IoResult<u32> {
    let raw: i64 = token.split('/').next().unwrap_or_default().parse()?;

    #[allow(clippy::cast_possible_wrap)]
    // Wrap: vertex counts beyond i64::MAX are not representable in memory
    let resolved = match raw {
        0 => None,
        r if r > 0 => Some(r - 1),
        r => Some(vertex_count as i64 + r),
    };

    resolved
        .filter(|&i| i >= 0 && (i as usize) < vertex_count)
        .and_then(|i| u32::try_from(i).ok())
        .ok_or_else(|| {
            IoError::invalid_content(format!(
                "line {line}: face index {raw} out of range for {vertex_count} vertices"
            ))
        })
}
