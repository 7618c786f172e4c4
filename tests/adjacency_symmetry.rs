use hydromesh::prelude::*;
use proptest::prelude::*;

fn grid_rings(nx: usize, ny: usize) -> Vec<Vec<usize>> {
    let stride = nx + 1;
    let mut rings = Vec::with_capacity(nx * ny);
    for j in 0..ny {
        for i in 0..nx {
            let sw = j * stride + i;
            rings.push(vec![sw, sw + stride, sw + stride + 1, sw + 1]);
        }
    }
    rings
}

proptest! {
    #[test]
    fn grid_adjacency_is_symmetric(nx in 1usize..6, ny in 1usize..6) {
        let adj = build_adjacency(&grid_rings(nx, ny));
        prop_assert!(adj.check_symmetry().is_ok());

        // Interior shared edges: horizontal plus vertical.
        let interior = ny * (nx - 1) + nx * (ny - 1);
        let paired: usize = (0..adj.cell_count())
            .map(|c| (0..adj.sides(c)).filter(|&j| adj.neighbor(c, j).is_some()).count())
            .sum();
        prop_assert_eq!(paired, 2 * interior);

        let boundary: usize = (0..adj.cell_count())
            .map(|c| adj.boundary_edges(c).count())
            .sum();
        prop_assert_eq!(boundary, 4 * nx * ny - 2 * interior);
    }

    #[test]
    fn ring_rotation_does_not_change_pairing(rot_a in 0usize..4, rot_b in 0usize..4) {
        // Two quads sharing an edge, with arbitrarily rotated rings.
        let mut a = vec![0usize, 3, 4, 1];
        let mut b = vec![1usize, 4, 5, 2];
        a.rotate_left(rot_a);
        b.rotate_left(rot_b);
        let adj = build_adjacency(&[a.clone(), b.clone()]);

        prop_assert!(adj.check_symmetry().is_ok());
        let shared: Vec<_> = (0..4).filter(|&j| adj.neighbor(0, j).is_some()).collect();
        prop_assert_eq!(shared.len(), 1);
        let (c2, j2) = adj.neighbor(0, shared[0]).unwrap();
        prop_assert_eq!(c2, 1);
        prop_assert_eq!(adj.neighbor(1, j2), Some((0, shared[0])));
    }
}
