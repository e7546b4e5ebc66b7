//! STL to Shader Park converter.
//!
//! Reads a triangle mesh, scales it, and writes a Shader Park program whose
//! SDF is the minimum plane distance over all triangles.
//!
//! # Usage
//!
//! ```text
//! stl-to-shaderpark model.stl                    # writes model.js
//! stl-to-shaderpark model.stl -s 0.01 -o out.js
//! stl-to-shaderpark scan.dat --format stl --probe 0,0,0
//! ```
//!
//! Set `RUST_LOG=debug` for per-stage detail.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::Parser;
use mesh_shaderpark::{
    approximate_distance, load_scaled_mesh, write_mesh_program, GenerateParams, MeshFormat,
};
use mesh_types::Point3;
use tracing::debug;

/// Extension used when no output path is given.
const DEFAULT_OUTPUT_EXTENSION: &str = "js";

/// Convert a triangle mesh into a Shader Park SDF program
#[derive(Parser, Debug)]
#[command(name = "stl-to-shaderpark")]
#[command(about = "Convert a triangle mesh into a Shader Park SDF program", long_about = None)]
#[command(version)]
struct Cli {
    /// Mesh file to convert (STL or OBJ)
    #[arg(name = "MESH")]
    mesh: PathBuf,

    /// Output file [default: MESH with a .js extension]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Uniform scale factor applied to every vertex
    #[arg(short, long, default_value_t = 1.0, allow_negative_numbers = true)]
    scale: f64,

    /// Input format, overriding detection from the extension
    #[arg(long)]
    format: Option<MeshFormat>,

    /// Print the approximate distance at this point after generating
    #[arg(long, value_name = "X,Y,Z", value_delimiter = ',', allow_hyphen_values = true)]
    probe: Option<Vec<f64>>,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.mesh.with_extension(DEFAULT_OUTPUT_EXTENSION))
    }

    fn params(&self) -> GenerateParams {
        let params = GenerateParams::with_scale(self.scale);
        match self.format {
            Some(format) => params.format(format),
            None => params,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.quiet);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Failed to generate Shader Park code.");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(quiet: bool) {
    let level = if quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let output = cli.output_path();
    if cli.mesh.as_os_str().is_empty() || output.as_os_str().is_empty() {
        bail!("Please specify the STL file and output file path.");
    }
    if output == cli.mesh {
        bail!(
            "output path {} would overwrite the input mesh",
            output.display()
        );
    }

    let params = cli.params();
    debug!(?params, output = %output.display(), "Resolved arguments");

    let mesh = load_scaled_mesh(&cli.mesh, &params)
        .with_context(|| format!("reading {}", cli.mesh.display()))?;
    let report = write_mesh_program(&mesh, &output)
        .with_context(|| format!("generating {}", output.display()))?;

    println!("Shader Park code has been generated successfully!");
    println!(
        "  {} triangles -> {} ({} bytes)",
        report.face_count,
        report.output_path.display(),
        report.bytes_written
    );
    if let Some((lo, hi)) = report.bounds {
        println!(
            "  extents: [{}, {}, {}] .. [{}, {}, {}]",
            lo.x, lo.y, lo.z, hi.x, hi.y, hi.z
        );
    }

    if let Some(probe) = &cli.probe {
        let [x, y, z] = <[f64; 3]>::try_from(probe.as_slice())
            .context("--probe takes exactly three coordinates")?;
        let d = approximate_distance(&mesh, Point3::new(x, y, z));
        println!("  sdf({x}, {y}, {z}) = {d}");
    }

    Ok(())
}
