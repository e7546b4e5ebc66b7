//! STL (Stereolithography) file format support.
//!
//! Both ASCII and binary STL are read. The variant is detected from the
//! file content, never from the extension.
//!
//! # Binary Format
//!
//! ```text
//! UINT8[80]    – Header (ignored, often contains file info)
//! UINT32       – Number of triangles
//! foreach triangle
//!     REAL32[3] – Normal vector (ignored)
//!     REAL32[3] – Vertex 1
//!     REAL32[3] – Vertex 2
//!     REAL32[3] – Vertex 3
//!     UINT16    – Attribute byte count (ignored)
//! end
//! ```
//!
//! # ASCII Format
//!
//! ```text
//! solid name
//!   facet normal ni nj nk
//!     outer loop
//!       vertex v1x v1y v1z
//!       vertex v2x v2y v2z
//!       vertex v3x v3y v3z
//!     endloop
//!   endfacet
//!   ...
//! endsolid name
//! ```
//!
//! STL carries no shared vertices: every facet appends three fresh vertices
//! and one face, in file order. ASCII files with several `solid` blocks are
//! merged into a single mesh.

use std::path::Path;

use mesh_types::{IndexedMesh, Vertex};
use tracing::{debug, warn};

use crate::error::{IoError, IoResult};

/// STL binary header size in bytes.
const HEADER_SIZE: usize = 80;

/// Size of one triangle in binary STL (normal + 3 vertices + attribute).
const TRIANGLE_SIZE: usize = 50;

/// How far into the file to look for the `facet` keyword.
const SNIFF_LEN: usize = 1024;

/// UTF-8 byte order mark some editors put in front of ASCII STL.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Load a mesh from an STL file.
///
/// # Errors
///
/// Returns an error if:
/// - The file does not exist or cannot be read
/// - The file content is not valid STL
///
/// # Example
///
/// ```no_run
/// use mesh_io::load_stl;
///
/// let mesh = load_stl("model.stl").unwrap();
/// println!("Loaded {} faces", mesh.faces.len());
/// ```
pub fn load_stl<P: AsRef<Path>>(path: P) -> IoResult<IndexedMesh> {
    let path = path.as_ref();
    let data = std::fs::read(path).map_err(|e| IoError::from_open(path, e))?;
    parse_stl(&data)
}

/// Parse STL data already held in memory.
///
/// # Errors
///
/// Returns an error if the data is neither valid ASCII nor valid binary STL.
pub fn parse_stl(data: &[u8]) -> IoResult<IndexedMesh> {
    if is_ascii_stl(data) {
        debug!(bytes = data.len(), "Parsing ASCII STL");
        // Solid names may carry non-UTF-8 bytes; keywords and numbers are ASCII
        let text = String::from_utf8_lossy(strip_bom(data));
        parse_stl_ascii(&text)
    } else {
        debug!(bytes = data.len(), "Parsing binary STL");
        parse_stl_binary(data)
    }
}

/// Decide whether `data` is ASCII STL.
///
/// Binary exporters frequently write "solid" into the 80-byte header, so the
/// keyword alone is not enough. A file whose size matches the binary layout
/// exactly is treated as binary unless its header is NUL-free and a `facet`
/// keyword shows up early in the file.
fn is_ascii_stl(data: &[u8]) -> bool {
    let text = strip_bom(data);
    let start = text
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(text.len());
    if !text[start..].starts_with(b"solid") {
        return false;
    }
    if !binary_size_matches(data) {
        return true;
    }
    let sniff = &data[..data.len().min(SNIFF_LEN)];
    !data[..HEADER_SIZE].contains(&0) && sniff.windows(5).any(|w| w == b"facet")
}

fn strip_bom(data: &[u8]) -> &[u8] {
    data.strip_prefix(UTF8_BOM).unwrap_or(data)
}

/// True when the declared triangle count accounts for the file length.
fn binary_size_matches(data: &[u8]) -> bool {
    declared_face_count(data)
        .is_some_and(|count| data.len() == HEADER_SIZE + 4 + count as usize * TRIANGLE_SIZE)
}

fn declared_face_count(data: &[u8]) -> Option<u32> {
    let bytes = data.get(HEADER_SIZE..HEADER_SIZE + 4)?;
    Some(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

/// Parse binary STL.
fn parse_stl_binary(data: &[u8]) -> IoResult<IndexedMesh> {
    let face_count = declared_face_count(data).ok_or(IoError::InvalidHeader {
        expected: HEADER_SIZE + 4,
        got: data.len(),
    })?;

    let body = &data[HEADER_SIZE + 4..];
    let available = body.len() / TRIANGLE_SIZE;
    if available < face_count as usize {
        #[allow(clippy::cast_possible_truncation)]
        // Truncation: available < face_count, which is a u32
        return Err(IoError::InvalidFaceCount {
            expected: face_count,
            got: available as u32,
        });
    }
    if available > face_count as usize {
        warn!(
            declared = face_count,
            present = available,
            "Binary STL has trailing data after the declared triangles"
        );
    }

    let mut mesh = IndexedMesh::with_capacity(face_count as usize * 3, face_count as usize);
    for record in body.chunks_exact(TRIANGLE_SIZE).take(face_count as usize) {
        // Skip normal (12 bytes), read 3 vertices (36 bytes total)
        push_facet(
            &mut mesh,
            [
                read_vertex(&record[12..24]),
                read_vertex(&record[24..36]),
                read_vertex(&record[36..48]),
            ],
        );
    }

    Ok(mesh)
}

/// Read a vertex from 12 bytes (3 little-endian f32s).
fn read_vertex(buf: &[u8]) -> Vertex {
    let x = f32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]);
    let y = f32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]);
    let z = f32::from_le_bytes([buf[8], buf[9], buf[10], buf[11]]);
    Vertex::from_coords(f64::from(x), f64::from(y), f64::from(z))
}

fn push_facet(mesh: &mut IndexedMesh, corners: [Vertex; 3]) {
    #[allow(clippy::cast_possible_truncation)]
    // Truncation: mesh indices are u32, meshes with >4B vertices are unsupported
    let base = mesh.vertices.len() as u32;
    mesh.vertices.extend(corners);
    mesh.faces.push([base, base + 1, base + 2]);
}

/// Parse ASCII STL.
fn parse_stl_ascii(text: &str) -> IoResult<IndexedMesh> {
    let mut mesh = IndexedMesh::new();
    let mut in_facet = false;
    let mut in_loop = false;
    let mut corners: Vec<Vertex> = Vec::with_capacity(3);

    for (line_no, line) in text.lines().enumerate() {
        let mut parts = line.split_whitespace();
        let Some(keyword) = parts.next() else {
            continue;
        };

        match keyword.to_ascii_lowercase().as_str() {
            "facet" => {
                in_facet = true;
            }
            "outer" => {
                if parts.next().is_some_and(|p| p.eq_ignore_ascii_case("loop")) {
                    in_loop = true;
                    corners.clear();
                }
            }
            "vertex" if in_loop => {
                let coords: Vec<&str> = parts.collect();
                if coords.len() < 3 {
                    return Err(IoError::invalid_content(format!(
                        "line {}: vertex needs three coordinates",
                        line_no + 1
                    )));
                }
                let x: f64 = coords[0].parse()?;
                let y: f64 = coords[1].parse()?;
                let z: f64 = coords[2].parse()?;
                corners.push(Vertex::from_coords(x, y, z));
            }
            "endloop" => {
                in_loop = false;
            }
            "endfacet" => {
                if in_facet {
                    match <[Vertex; 3]>::try_from(corners.as_slice()) {
                        Ok(tri) => push_facet(&mut mesh, tri),
                        Err(_) => warn!(
                            line = line_no + 1,
                            vertices = corners.len(),
                            "Skipping facet without exactly three vertices"
                        ),
                    }
                }
                corners.clear();
                in_facet = false;
            }
            // Multi-solid files continue with another `solid` block
            "endsolid" => {
                in_facet = false;
                in_loop = false;
                corners.clear();
            }
            _ => {}
        }
    }

    Ok(mesh)
}
