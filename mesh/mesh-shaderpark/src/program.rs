//! Shader Park program text.
//!
//! A program is an ordered list of chunks joined with `\n`:
//!
//! 1. [`PREAMBLE`] - the `sdTriangle` helper and the opening of `sdf(pos)`
//! 2. one fragment per face, in face order, emitted inside `sdf`
//! 3. [`EPILOGUE`] - closes `sdf` and defines `main`

use mesh_types::{IndexedMesh, Point3, Triangle};
use tracing::debug;

use crate::error::{CodegenError, CodegenResult};

/// Name of the generated triangle-distance helper.
pub const TRIANGLE_HELPER: &str = "sdTriangle";

/// Initial value of the running distance, before any triangle is considered.
pub const SENTINEL_DISTANCE: &str = "1e10";

/// Helper definition plus the opening of the aggregate `sdf` function.
pub const PREAMBLE: &str = "\
// Function to calculate the signed distance to a triangle
function sdTriangle(p, a, b, c) {
    let ba = subtract(b, a);
    let ca = subtract(c, a);
    let pa = subtract(p, a);
    let nor = cross(ba, ca);
    return dot(nor, pa) / length(nor);
}

// Combine all triangles into a single SDF function
function sdf(pos) {
    let d = 1e10; // Start with a large initial value";

/// Closes `sdf` and defines the `main` entry point.
pub const EPILOGUE: &str = "    return d;
}

function main() {
    let pos = getPosition();
    let d = sdf(pos); // Call the SDF function
    setSDF(d);  // Directly set the SDF for rendering
}
";

/// Render a float as a JavaScript numeric literal.
///
/// Finite values use the shortest representation that round-trips, always
/// with a fractional part or exponent (`2.0`, `0.1`, `1e-7`). Non-finite
/// values map to the JavaScript globals `NaN`, `Infinity` and `-Infinity`.
///
/// # Example
///
/// ```
/// use mesh_shaderpark::format_literal;
///
/// assert_eq!(format_literal(2.0), "2.0");
/// assert_eq!(format_literal(-0.25), "-0.25");
/// assert_eq!(format_literal(f64::INFINITY), "Infinity");
/// ```
#[must_use]
pub fn format_literal(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        String::from(if value > 0.0 { "Infinity" } else { "-Infinity" })
    } else {
        format!("{value:?}")
    }
}

/// Render a point as a Shader Park array literal `[x, y, z]`.
#[must_use]
pub fn format_point(point: &Point3<f64>) -> String {
    format!(
        "[{}, {}, {}]",
        format_literal(point.x),
        format_literal(point.y),
        format_literal(point.z)
    )
}

/// Fragment for face `index`: three point declarations and the `min` update.
#[must_use]
pub fn triangle_fragment(index: usize, triangle: &Triangle) -> String {
    let [a, b, c] = triangle.vertices();
    format!(
        "    let p1_{index} = {};\n    let p2_{index} = {};\n    let p3_{index} = {};\n    d = min(d, {TRIANGLE_HELPER}(pos, p1_{index}, p2_{index}, p3_{index}));",
        format_point(&a),
        format_point(&b),
        format_point(&c),
    )
}

/// Incremental builder for a Shader Park SDF program.
///
/// # Example
///
/// ```
/// use mesh_shaderpark::{ProgramBuilder, PREAMBLE, EPILOGUE};
/// use mesh_types::Triangle;
///
/// let mut builder = ProgramBuilder::new();
/// builder.push_triangle(&Triangle::from_arrays([0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]));
/// assert_eq!(builder.triangle_count(), 1);
///
/// let program = builder.finish();
/// assert!(program.starts_with(PREAMBLE));
/// assert!(program.ends_with(EPILOGUE));
/// assert!(program.contains("let p2_0 = [1.0, 0.0, 0.0];"));
/// ```
#[derive(Debug, Clone)]
pub struct ProgramBuilder {
    chunks: Vec<String>,
    triangles: usize,
    degenerate: usize,
}

impl Default for ProgramBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgramBuilder {
    /// Start a program with the preamble already in place.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Start a program, reserving room for `triangles` face fragments.
    #[must_use]
    pub fn with_capacity(triangles: usize) -> Self {
        let mut chunks = Vec::with_capacity(triangles + 2);
        chunks.push(PREAMBLE.to_string());
        Self {
            chunks,
            triangles: 0,
            degenerate: 0,
        }
    }

    /// Append the fragment for the next face.
    ///
    /// Degenerate faces are emitted like any other and only counted.
    pub fn push_triangle(&mut self, triangle: &Triangle) -> &mut Self {
        self.chunks.push(triangle_fragment(self.triangles, triangle));
        self.triangles += 1;
        if triangle.is_degenerate() {
            self.degenerate += 1;
        }
        self
    }

    /// Number of face fragments pushed so far.
    #[must_use]
    pub const fn triangle_count(&self) -> usize {
        self.triangles
    }

    /// Number of pushed faces with zero area.
    #[must_use]
    pub const fn degenerate_count(&self) -> usize {
        self.degenerate
    }

    /// Append the epilogue and join everything into the program text.
    #[must_use]
    pub fn finish(mut self) -> String {
        self.chunks.push(EPILOGUE.to_string());
        self.chunks.join("\n")
    }
}

/// Build the program for a mesh whose vertices are already scaled.
///
/// # Errors
///
/// Returns [`CodegenError::FaceIndexOutOfRange`] if a face references a
/// vertex that does not exist.
pub fn generate_program(mesh: &IndexedMesh) -> CodegenResult<String> {
    let mut builder = ProgramBuilder::with_capacity(mesh.faces.len());

    for (face_index, face) in mesh.faces.iter().enumerate() {
        let corner = |index: u32| {
            mesh.vertices
                .get(index as usize)
                .map(|v| v.position)
                .ok_or(CodegenError::FaceIndexOutOfRange {
                    face: face_index,
                    index,
                    vertex_count: mesh.vertices.len(),
                })
        };
        let triangle = Triangle::new(corner(face[0])?, corner(face[1])?, corner(face[2])?);
        builder.push_triangle(&triangle);
    }

    debug!(
        triangles = builder.triangle_count(),
        degenerate = builder.degenerate_count(),
        "Built program"
    );
    Ok(builder.finish())
}
