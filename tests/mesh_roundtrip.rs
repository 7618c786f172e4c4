use hydromesh::io::{write_boundary_edges, write_cell_outlines, write_centres};
use hydromesh::prelude::*;

fn sample_mesh() -> Mesh {
    let grid = StructuredGrid::cartesian(3, 3, Point::new(10.0, -5.0), 0.25, 0.125);
    let config = MeshConfig {
        boundaries: vec![OpenBoundarySpec {
            name: "offshore".into(),
            start: Point::new(10.1, -4.9),
            mid: Point::new(10.4, -4.95),
            end: Point::new(10.7, -4.9),
        }],
        ..MeshConfig::default()
    };
    let bathy: Vec<f64> = (0..9).map(|i| -10.0 + 0.37 * i as f64).collect();
    assemble(MeshInput::Grid(grid), Some(bathy), &config).unwrap()
}

#[test]
fn write_then_read_reproduces_the_mesh() {
    let mesh = sample_mesh();
    let mut buf = Vec::new();
    write_mesh(&mesh, &mut buf).unwrap();
    let back = read_mesh(buf.as_slice(), mesh.projection()).unwrap();
    assert_eq!(back, mesh);
}

#[test]
fn format_is_one_based_on_disk() {
    let mesh = sample_mesh();
    let mut buf = Vec::new();
    write_mesh(&mesh, &mut buf).unwrap();
    let text = String::from_utf8(buf).unwrap();

    assert!(text.starts_with("Mesh2 unstructured v1.0\n"));
    let face_line = text
        .lines()
        .find(|l| l.starts_with("nMesh2_face "))
        .unwrap();
    assert_eq!(face_line.split_whitespace().last(), Some("9"));
    assert!(text.contains("\nCoordinates\n1 "));
    assert!(text.contains("NBOUNDARIES    1"));
    assert!(text.contains("BOUNDARY0.NAME offshore"));
    assert!(text.contains("\nBATHY   9\n"));
    // No 0 ids anywhere in the Indices section.
    let indices = text.split("Indices").nth(1).unwrap();
    for line in indices.lines().take_while(|l| !l.starts_with("NBOUNDARIES")) {
        for field in line.split_whitespace() {
            if let Ok(v) = field.parse::<i64>() {
                assert!(v >= 1, "unexpected id {v} in line {line:?}");
            }
        }
    }
}

#[test]
fn diagnostics_are_nan_separated() {
    let mesh = sample_mesh();

    let mut e = Vec::new();
    write_cell_outlines(&mesh, &mut e).unwrap();
    let e = String::from_utf8(e).unwrap();
    assert_eq!(e.matches("NaN NaN").count(), mesh.cell_count());
    // Each outline closes back on its first vertex: rings of 4 produce 5
    // points plus the separator.
    assert_eq!(e.lines().count(), mesh.cell_count() * 6);

    let mut c = Vec::new();
    write_centres(&mesh, &mut c).unwrap();
    assert_eq!(
        String::from_utf8(c).unwrap().lines().count(),
        mesh.cell_count()
    );

    let mut b = Vec::new();
    write_boundary_edges(&mesh, &mut b).unwrap();
    let b = String::from_utf8(b).unwrap();
    let nedges: usize = mesh.boundaries().iter().map(|s| s.edges.len()).sum();
    assert_eq!(b.matches("NaN NaN").count(), nedges);
}

#[test]
fn mesh_without_bathymetry_round_trips() {
    let grid = StructuredGrid::cartesian(2, 2, Point::new(0.0, 0.0), 1.0, 1.0);
    let mesh = assemble(MeshInput::Grid(grid), None, &MeshConfig::default()).unwrap();
    let mut buf = Vec::new();
    write_mesh(&mesh, &mut buf).unwrap();
    let back = read_mesh(buf.as_slice(), Projection::Planar).unwrap();
    assert_eq!(back, mesh);
    assert!(back.bathymetry().is_none());
}
