//! File-to-file generation.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use mesh_io::{load_mesh, load_mesh_as};
use mesh_types::{IndexedMesh, Point3};
use tracing::{debug, error, info, warn};

use crate::error::{CodegenError, CodegenResult};
use crate::params::GenerateParams;
use crate::program::generate_program;

/// Summary of a successful generation.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateReport {
    /// File the program was written to.
    pub output_path: PathBuf,
    /// Number of faces emitted.
    pub face_count: usize,
    /// Number of vertices in the loaded mesh.
    pub vertex_count: usize,
    /// Size of the written program.
    pub bytes_written: usize,
    /// Extents of the scaled mesh, `None` if it has no vertices.
    pub bounds: Option<(Point3<f64>, Point3<f64>)>,
}

/// Load `mesh_path` and apply the scale factor from `params`.
///
/// # Errors
///
/// Returns [`CodegenError::Load`] if the mesh cannot be read or parsed.
pub fn load_scaled_mesh(mesh_path: &Path, params: &GenerateParams) -> CodegenResult<IndexedMesh> {
    let mut mesh = match params.format {
        Some(format) => load_mesh_as(mesh_path, format)?,
        None => load_mesh(mesh_path)?,
    };
    mesh.scale(params.scale);
    Ok(mesh)
}

/// Generate a Shader Park program from a mesh file.
///
/// The whole program is built in memory before the output file is opened,
/// so a load or formatting failure leaves `output_path` untouched. An
/// existing file is overwritten.
///
/// # Errors
///
/// - [`CodegenError::Load`] if the mesh cannot be loaded
/// - [`CodegenError::FaceIndexOutOfRange`] if a face references a missing vertex
/// - [`CodegenError::Write`] if the output cannot be written
///
/// # Example
///
/// ```no_run
/// use mesh_shaderpark::{try_generate, GenerateParams};
///
/// let report = try_generate("bunny.stl", &GenerateParams::with_scale(0.01), "bunny.js").unwrap();
/// println!("{} triangles", report.face_count);
/// ```
pub fn try_generate<P: AsRef<Path>, Q: AsRef<Path>>(
    mesh_path: P,
    params: &GenerateParams,
    output_path: Q,
) -> CodegenResult<GenerateReport> {
    let mesh_path = mesh_path.as_ref();
    let output_path = output_path.as_ref();

    info!(
        mesh = %mesh_path.display(),
        scale = params.scale,
        "Generating Shader Park SDF"
    );

    let mesh = load_scaled_mesh(mesh_path, params)?;
    debug!(
        vertices = mesh.vertices.len(),
        faces = mesh.faces.len(),
        "Mesh loaded"
    );

    write_mesh_program(&mesh, output_path)
}

/// Generate the program for an already loaded and scaled mesh and write it
/// to `output_path`.
///
/// # Errors
///
/// - [`CodegenError::FaceIndexOutOfRange`] if a face references a missing vertex
/// - [`CodegenError::Write`] if the output cannot be written
pub fn write_mesh_program<Q: AsRef<Path>>(
    mesh: &IndexedMesh,
    output_path: Q,
) -> CodegenResult<GenerateReport> {
    let output_path = output_path.as_ref();
    let program = generate_program(mesh)?;
    write_program(output_path, &program)?;

    info!(
        output = %output_path.display(),
        faces = mesh.faces.len(),
        bytes = program.len(),
        "Shader Park code written"
    );

    Ok(GenerateReport {
        output_path: output_path.to_path_buf(),
        face_count: mesh.faces.len(),
        vertex_count: mesh.vertices.len(),
        bytes_written: program.len(),
        bounds: mesh.bounds(),
    })
}

/// Generate a Shader Park program, reporting only success or failure.
///
/// Failures are logged at error level with their diagnostic and never
/// propagate. Use [`try_generate`] to inspect the error.
///
/// # Example
///
/// ```no_run
/// use mesh_shaderpark::generate;
///
/// if !generate("model.stl", 1.0, "model.js") {
///     eprintln!("Failed to generate Shader Park code.");
/// }
/// ```
pub fn generate<P: AsRef<Path>, Q: AsRef<Path>>(mesh_path: P, scale: f64, output_path: Q) -> bool {
    match try_generate(mesh_path, &GenerateParams::with_scale(scale), output_path) {
        Ok(_) => true,
        Err(e) => {
            error!(kind = ?e.kind(), "Error: {e}");
            false
        }
    }
}

/// Write `program` to `path`.
///
/// If the file was created but writing fails part way through, the partial
/// file is removed again.
fn write_program(path: &Path, program: &str) -> CodegenResult<()> {
    let write_error = |source: std::io::Error| CodegenError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::create(path).map_err(write_error)?;
    if let Err(source) = file.write_all(program.as_bytes()) {
        drop(file);
        if fs::remove_file(path).is_err() {
            warn!(path = %path.display(), "Could not remove partially written output");
        }
        return Err(write_error(source));
    }
    Ok(())
}
