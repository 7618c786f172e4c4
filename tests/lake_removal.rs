use hydromesh::boundary::{ObcEdge, OpenBoundarySegment};
use hydromesh::prelude::*;

/// A 3x1 strip whose middle cell is land: stripping it leaves two
/// disconnected single-cell components.
fn split_strip_config(seed: Point) -> (StructuredGrid, Vec<f64>, MeshConfig) {
    let grid = StructuredGrid::cartesian(3, 1, Point::new(0.0, 0.0), 1.0, 1.0);
    let bathy = vec![-4.0, 99.0, -6.0];
    let config = MeshConfig {
        land_value: Some(99.0),
        interior_seed: Some(seed),
        ..MeshConfig::default()
    };
    (grid, bathy, config)
}

#[test]
fn lake_on_the_far_side_of_land_is_removed() {
    let (grid, bathy, config) = split_strip_config(Point::new(0.5, 0.5));
    let mesh = assemble(MeshInput::Grid(grid), Some(bathy), &config).unwrap();

    assert_eq!(mesh.cell_count(), 1);
    assert_eq!(mesh.bathymetry(), Some(&[-4.0][..]));
    // The survivor keeps its geometry: a unit quad at the origin.
    let centre = mesh.vertices()[mesh.cells()[0].centroid];
    assert!((centre.x - 0.5).abs() < 1e-12 && (centre.y - 0.5).abs() < 1e-12);
}

#[test]
fn seed_selects_which_component_survives() {
    let (grid, bathy, config) = split_strip_config(Point::new(2.5, 0.5));
    let mesh = assemble(MeshInput::Grid(grid), Some(bathy), &config).unwrap();

    assert_eq!(mesh.cell_count(), 1);
    assert_eq!(mesh.bathymetry(), Some(&[-6.0][..]));
}

#[test]
fn removal_renumbers_cells_densely_and_in_order() {
    // Five cells, remove the middle one by masking directly.
    let remap = CellRemap::from_mask(&[true, true, false, true, true]);
    assert_eq!(remap.kept, vec![0, 1, 3, 4]);
    assert_eq!(
        remap.old_to_new,
        vec![Some(0), Some(1), None, Some(2), Some(3)]
    );
    assert_eq!(remap.select(&["a", "b", "c", "d", "e"]), vec!["a", "b", "d", "e"]);
}

#[test]
fn bound_boundary_losing_its_cells_is_fatal() {
    // Bind first, remove after: the segment's cell vanishes and the
    // remap must refuse to continue.
    let mut seg = OpenBoundarySegment {
        name: "tidal".into(),
        edges: vec![
            ObcEdge {
                cell: 0,
                va: 0,
                vb: 1,
            },
            ObcEdge {
                cell: 3,
                va: 7,
                vb: 8,
            },
        ],
    };
    let remap = CellRemap::from_mask(&[true, true, true, false]);
    let err = seg.remap_cells(&remap.old_to_new).unwrap_err();
    assert_eq!(
        err,
        MeshError::DanglingBoundaryCell {
            name: "tidal".into(),
            cell: 3
        }
    );
}

#[test]
fn adjacency_gains_boundary_edges_where_cells_were_removed() {
    let rings = vec![
        vec![0usize, 3, 4, 1],
        vec![1usize, 4, 5, 2],
        vec![2usize, 5, 6, 7],
    ];
    let adj = build_adjacency(&rings);
    let remap = CellRemap::from_mask(&[true, false, true]);
    let cut = adj.remap(&remap.old_to_new);

    assert_eq!(cut.cell_count(), 2);
    // Both survivors lost their only neighbour.
    for c in 0..2 {
        assert_eq!(cut.boundary_edges(c).count(), 4);
    }
    cut.check_symmetry().unwrap();
}
