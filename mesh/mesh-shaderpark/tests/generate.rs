//! End-to-end tests: mesh file in, Shader Park program out.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::float_cmp)]
#![allow(clippy::cast_possible_truncation)]

use std::path::Path;

use approx::assert_relative_eq;
use mesh_shaderpark::{
    approximate_distance, generate, load_scaled_mesh, try_generate, ErrorKind, GenerateParams,
    MeshFormat, EPILOGUE, PREAMBLE, SENTINEL,
};
use mesh_types::{Point3, Triangle};

// =============================================================================
// Fixtures
// =============================================================================

fn write_binary_stl(path: &Path, triangles: &[[[f32; 3]; 3]]) {
    let mut data = vec![0u8; 80];
    data.extend_from_slice(&(triangles.len() as u32).to_le_bytes());
    for tri in triangles {
        data.extend_from_slice(&[0u8; 12]);
        for v in tri {
            for c in v {
                data.extend_from_slice(&c.to_le_bytes());
            }
        }
        data.extend_from_slice(&[0u8; 2]);
    }
    std::fs::write(path, data).unwrap();
}

fn write_ascii_stl(path: &Path, triangles: &[[[f64; 3]; 3]]) {
    let mut text = String::from("solid fixture\n");
    for tri in triangles {
        text.push_str("  facet normal 0 0 0\n    outer loop\n");
        for [x, y, z] in tri {
            text.push_str(&format!("      vertex {x} {y} {z}\n"));
        }
        text.push_str("    endloop\n  endfacet\n");
    }
    text.push_str("endsolid fixture\n");
    std::fs::write(path, text).unwrap();
}

const UNIT_RIGHT: [[f64; 3]; 3] = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];

/// Parse every `let pN_i = [x, y, z];` line, in order of appearance.
fn point_literals(program: &str) -> Vec<[f64; 3]> {
    program
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            line.starts_with("let p").then_some(())?;
            let open = line.find('[')?;
            let close = line.find(']')?;
            let coords: Vec<f64> = line[open + 1..close]
                .split(", ")
                .map(|c| c.parse().unwrap())
                .collect();
            Some([coords[0], coords[1], coords[2]])
        })
        .collect()
}

/// Rebuild triangles from the emitted literals.
fn emitted_triangles(program: &str) -> Vec<Triangle> {
    point_literals(program)
        .chunks_exact(3)
        .map(|c| Triangle::from_arrays(c[0], c[1], c[2]))
        .collect()
}

fn update_count(program: &str) -> usize {
    program.matches("d = min(d, sdTriangle(pos, ").count()
}

// =============================================================================
// Program structure
// =============================================================================

#[test]
fn single_triangle_scaled_by_two() {
    let dir = tempfile::tempdir().unwrap();
    let mesh = dir.path().join("tri.stl");
    let out = dir.path().join("tri.js");
    write_ascii_stl(&mesh, &[UNIT_RIGHT]);

    assert!(generate(&mesh, 2.0, &out));
    let program = std::fs::read_to_string(&out).unwrap();

    assert!(program.contains("    let p1_0 = [0.0, 0.0, 0.0];\n"));
    assert!(program.contains("    let p2_0 = [2.0, 0.0, 0.0];\n"));
    assert!(program.contains("    let p3_0 = [0.0, 2.0, 0.0];\n"));
    assert!(program.contains("    d = min(d, sdTriangle(pos, p1_0, p2_0, p3_0));\n"));
    assert_eq!(update_count(&program), 1);
    assert_eq!(program.matches("let d = 1e10;").count(), 1);
}

#[test]
fn empty_mesh_returns_sentinel() {
    let dir = tempfile::tempdir().unwrap();
    let mesh = dir.path().join("empty.stl");
    let out = dir.path().join("empty.js");
    write_ascii_stl(&mesh, &[]);

    let report = try_generate(&mesh, &GenerateParams::default(), &out).unwrap();
    assert_eq!(report.face_count, 0);
    assert!(report.bounds.is_none());

    let program = std::fs::read_to_string(&out).unwrap();
    assert_eq!(program, format!("{PREAMBLE}\n{EPILOGUE}"));
    assert_eq!(update_count(&program), 0);

    let loaded = load_scaled_mesh(&mesh, &GenerateParams::default()).unwrap();
    assert_eq!(approximate_distance(&loaded, Point3::new(1.0, 2.0, 3.0)), SENTINEL);
}

#[test]
fn one_update_per_face_with_unique_names() {
    let dir = tempfile::tempdir().unwrap();
    let mesh = dir.path().join("many.stl");
    let out = dir.path().join("many.js");
    let triangles: Vec<[[f32; 3]; 3]> = (0..5)
        .map(|i| {
            let z = i as f32;
            [[0.0, 0.0, z], [1.0, 0.0, z], [0.0, 1.0, z]]
        })
        .collect();
    write_binary_stl(&mesh, &triangles);

    let report = try_generate(&mesh, &GenerateParams::default(), &out).unwrap();
    assert_eq!(report.face_count, 5);
    assert_eq!(report.vertex_count, 15);

    let program = std::fs::read_to_string(&out).unwrap();
    assert_eq!(update_count(&program), 5);
    for i in 0..5 {
        for n in 1..=3 {
            assert_eq!(program.matches(&format!("let p{n}_{i} = ")).count(), 1);
        }
        assert!(program.contains(&format!("sdTriangle(pos, p1_{i}, p2_{i}, p3_{i})")));
    }
}

#[test]
fn fragments_live_inside_sdf_in_face_order() {
    let dir = tempfile::tempdir().unwrap();
    let mesh = dir.path().join("two.stl");
    let out = dir.path().join("two.js");
    write_ascii_stl(&mesh, &[UNIT_RIGHT, UNIT_RIGHT]);
    assert!(generate(&mesh, 1.0, &out));
    let program = std::fs::read_to_string(&out).unwrap();

    let sdf_open = program.find("function sdf(pos) {").unwrap();
    let first = program.find("let p1_0 =").unwrap();
    let second = program.find("let p1_1 =").unwrap();
    let ret = program.find("    return d;").unwrap();
    let main = program.find("function main() {").unwrap();
    assert!(sdf_open < first && first < second && second < ret && ret < main);
}

#[test]
fn emitted_literals_encode_the_same_field() {
    let dir = tempfile::tempdir().unwrap();
    let mesh = dir.path().join("tilted.stl");
    let out = dir.path().join("tilted.js");
    write_ascii_stl(
        &mesh,
        &[
            [[0.0, 0.0, 0.0], [1.0, 0.0, 0.25], [0.0, 1.0, 0.5]],
            [[2.0, -1.0, 0.0], [2.0, 1.0, 0.0], [2.5, 0.0, 3.0]],
        ],
    );
    let params = GenerateParams::with_scale(1.5);
    try_generate(&mesh, &params, &out).unwrap();

    let program = std::fs::read_to_string(&out).unwrap();
    let loaded = load_scaled_mesh(&mesh, &params).unwrap();
    for p in [
        Point3::new(0.3, 0.3, 2.0),
        Point3::new(-4.0, 1.0, 0.0),
        Point3::new(3.0, 0.0, 1.0),
    ] {
        let from_text = emitted_triangles(&program)
            .iter()
            .map(|t| t.plane_distance(&p))
            .fold(SENTINEL, f64::min);
        assert_relative_eq!(from_text, approximate_distance(&loaded, p), epsilon = 1e-12);
    }
}

// =============================================================================
// Coordinates and scaling
// =============================================================================

#[test]
fn scale_one_reproduces_coordinates() {
    let dir = tempfile::tempdir().unwrap();
    let mesh = dir.path().join("coords.stl");
    let out = dir.path().join("coords.js");
    let tri = [[0.1f32, -2.5, 1234.5], [1e-3, 7.0, -0.0], [3.75, 1e6, 42.0]];
    write_binary_stl(&mesh, &[tri]);

    assert!(generate(&mesh, 1.0, &out));
    let program = std::fs::read_to_string(&out).unwrap();
    let literals = point_literals(&program);

    let expected: Vec<[f64; 3]> = tri
        .iter()
        .map(|v| v.map(f64::from))
        .collect();
    assert_eq!(literals, expected);
}

#[test]
fn negative_scale_mirrors_coordinates() {
    let dir = tempfile::tempdir().unwrap();
    let mesh = dir.path().join("tri.stl");
    let out = dir.path().join("tri.js");
    write_ascii_stl(&mesh, &[UNIT_RIGHT]);

    assert!(generate(&mesh, -1.0, &out));
    let literals = point_literals(&std::fs::read_to_string(&out).unwrap());
    assert_eq!(literals[1], [-1.0, -0.0, -0.0]);
}

#[test]
fn report_bounds_are_scaled() {
    let dir = tempfile::tempdir().unwrap();
    let mesh = dir.path().join("tri.stl");
    let out = dir.path().join("tri.js");
    write_ascii_stl(&mesh, &[UNIT_RIGHT]);

    let report = try_generate(&mesh, &GenerateParams::with_scale(3.0), &out).unwrap();
    let (lo, hi) = report.bounds.unwrap();
    assert_eq!(lo, Point3::new(0.0, 0.0, 0.0));
    assert_eq!(hi, Point3::new(3.0, 3.0, 0.0));
    assert_eq!(
        report.bytes_written,
        std::fs::metadata(&out).unwrap().len() as usize
    );
}

// =============================================================================
// Determinism and overwrite
// =============================================================================

#[test]
fn identical_inputs_give_identical_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let mesh = dir.path().join("tri.stl");
    let out = dir.path().join("tri.js");
    write_binary_stl(&mesh, &[[[0.3, 0.1, 0.7], [1.1, 0.2, 0.0], [0.0, 1.9, 0.4]]]);

    assert!(generate(&mesh, 0.7, &out));
    let first = std::fs::read(&out).unwrap();
    assert!(generate(&mesh, 0.7, &out));
    let second = std::fs::read(&out).unwrap();
    assert_eq!(first, second);
}

#[test]
fn existing_output_is_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let mesh = dir.path().join("tri.stl");
    let out = dir.path().join("tri.js");
    write_ascii_stl(&mesh, &[UNIT_RIGHT]);
    std::fs::write(&out, "x".repeat(100_000)).unwrap();

    assert!(generate(&mesh, 1.0, &out));
    let program = std::fs::read_to_string(&out).unwrap();
    assert!(program.starts_with(PREAMBLE));
    assert!(!program.contains("xxxx"));
}

// =============================================================================
// Other input formats
// =============================================================================

#[test]
fn obj_input_is_fan_triangulated() {
    let dir = tempfile::tempdir().unwrap();
    let mesh = dir.path().join("quad.obj");
    let out = dir.path().join("quad.js");
    std::fs::write(&mesh, "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n").unwrap();

    let report = try_generate(&mesh, &GenerateParams::with_scale(2.0), &out).unwrap();
    assert_eq!(report.face_count, 2);
    let program = std::fs::read_to_string(&out).unwrap();
    assert!(program.contains("let p3_1 = [0.0, 2.0, 0.0];"));
}

#[test]
fn explicit_format_overrides_extension() {
    let dir = tempfile::tempdir().unwrap();
    let mesh = dir.path().join("scan.dat");
    let out = dir.path().join("scan.js");
    write_ascii_stl(&mesh, &[UNIT_RIGHT]);

    let params = GenerateParams::default().format(MeshFormat::Stl);
    assert_eq!(try_generate(&mesh, &params, &out).unwrap().face_count, 1);
}

// =============================================================================
// Failure scenarios
// =============================================================================

#[test]
fn missing_mesh_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let mesh = dir.path().join("does_not_exist.stl");
    let out = dir.path().join("out.js");

    assert!(!generate(&mesh, 1.0, &out));
    assert!(!out.exists());

    let err = try_generate(&mesh, &GenerateParams::default(), &out).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Load);
    assert!(err.to_string().contains("does_not_exist.stl"));
}

#[test]
fn missing_output_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let mesh = dir.path().join("tri.stl");
    let out = dir.path().join("no_such_dir").join("out.js");
    write_ascii_stl(&mesh, &[UNIT_RIGHT]);

    assert!(!generate(&mesh, 1.0, &out));
    assert!(!out.exists());

    let err = try_generate(&mesh, &GenerateParams::default(), &out).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Write);
}

#[test]
fn unparsable_mesh_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let mesh = dir.path().join("broken.stl");
    let out = dir.path().join("broken.js");
    std::fs::write(&mesh, b"not an stl").unwrap();

    assert!(!generate(&mesh, 1.0, &out));
    assert!(!out.exists());
}

#[test]
fn unknown_extension_is_a_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let mesh = dir.path().join("model.fbx");
    let out = dir.path().join("model.js");
    std::fs::write(&mesh, b"whatever").unwrap();

    let err = try_generate(&mesh, &GenerateParams::default(), &out).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Load);
    assert!(!out.exists());
}

#[test]
fn dangling_obj_face_is_a_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let mesh = dir.path().join("bad.obj");
    let out = dir.path().join("bad.js");
    std::fs::write(&mesh, "v 0 0 0\nv 1 0 0\nf 1 2 3\n").unwrap();

    let err = try_generate(&mesh, &GenerateParams::default(), &out).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Load);
}
