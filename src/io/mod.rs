//! Persisted mesh format and plot diagnostics.
//!
//! # Format
//! A line-oriented text format, 1-based on disk and 0-based in memory:
//!
//! ```text
//! Mesh2 unstructured v1.0
//! nMaxMesh2_face_nodes <max ring size>
//! nMesh2_face_indices  <vertex count>
//! nMesh2_face          <cell count>
//! Mesh2_topology
//!
//! Coordinates
//! <id> <x> <y>                 one line per vertex
//!
//! Indices
//! <cell> <npe> <centroid id>   then npe lines of
//! <j> <va> <vb>                edge j from ring vertex j to j+1
//!
//! NBOUNDARIES    <n>
//! BOUNDARY<i>.NAME <name>
//! BOUNDARY<i>.NPOINTS  <k>
//! <cell> (<va> <vb>)           one line per boundary edge
//!
//! BATHY   <cell count>
//! <value>                      one line per cell
//! ```
//!
//! Coordinates are written with Rust's shortest round-trip float
//! formatting, so a write/read cycle reproduces the mesh exactly.
//!
//! The diagnostic writers emit `x y` polylines separated by `NaN NaN`
//! lines, suitable for plotting cell outlines, centres and open boundary
//! edges directly.

use std::io::{BufRead, Write};

use crate::assembler::Mesh;
use crate::boundary::{ObcEdge, OpenBoundarySegment};
use crate::geometry::{Point, Projection};
use crate::mesh_error::MeshError;
use crate::pool::PooledCell;

/// Write `mesh` in the persisted text format.
pub fn write_mesh<W: Write>(mesh: &Mesh, w: &mut W) -> Result<(), MeshError> {
    writeln!(w, "Mesh2 unstructured v1.0")?;
    writeln!(w, "nMaxMesh2_face_nodes {}", mesh.max_sides())?;
    writeln!(w, "nMesh2_face_indices  {}", mesh.vertices().len())?;
    writeln!(w, "nMesh2_face          {}", mesh.cell_count())?;
    writeln!(w, "Mesh2_topology")?;

    writeln!(w, "\nCoordinates")?;
    for (n, p) in mesh.vertices().iter().enumerate() {
        writeln!(w, "{} {} {}", n + 1, p.x, p.y)?;
    }

    writeln!(w, "\nIndices")?;
    for (cc, cell) in mesh.cells().iter().enumerate() {
        let npe = cell.sides();
        writeln!(w, "{} {} {}", cc + 1, npe, cell.centroid + 1)?;
        for j in 0..npe {
            writeln!(
                w,
                "{} {} {}",
                j + 1,
                cell.ring[j] + 1,
                cell.ring[(j + 1) % npe] + 1
            )?;
        }
    }

    writeln!(w, "\nNBOUNDARIES    {}", mesh.boundaries().len())?;
    for (n, seg) in mesh.boundaries().iter().enumerate() {
        writeln!(w, "BOUNDARY{n}.NAME {}", seg.name)?;
        writeln!(w, "BOUNDARY{n}.NPOINTS  {}", seg.edges.len())?;
        for e in &seg.edges {
            writeln!(w, "{} ({} {})", e.cell + 1, e.va + 1, e.vb + 1)?;
        }
    }

    if let Some(bathy) = mesh.bathymetry() {
        writeln!(w, "\nBATHY   {}", bathy.len())?;
        for v in bathy {
            writeln!(w, "{v}")?;
        }
    }
    Ok(())
}

/// Read a mesh written by [`write_mesh`].
///
/// The format does not record the projection, so the caller supplies it;
/// adjacency, boundary flags and edge metrics are recomputed.
pub fn read_mesh<R: BufRead>(reader: R, projection: Projection) -> Result<Mesh, MeshError> {
    let mut raw = Vec::new();
    for line in reader.lines() {
        raw.push(line?);
    }
    let mut lines = raw
        .into_iter()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty());

    let header = lines.next().ok_or_else(|| parse_err("empty file"))?;
    if !header.starts_with("Mesh2 unstructured") {
        return Err(parse_err(format!("unrecognised header: {header}")));
    }

    let mut nvert = None;
    let mut ncell = None;
    let mut vertices: Vec<Point> = Vec::new();
    let mut cells: Vec<PooledCell> = Vec::new();
    let mut boundaries: Vec<OpenBoundarySegment> = Vec::new();
    let mut bathymetry: Option<Vec<f64>> = None;

    while let Some(line) = lines.next() {
        let mut fields = line.split_whitespace();
        match fields.next() {
            Some("nMaxMesh2_face_nodes") | Some("Mesh2_topology") => {}
            Some("nMesh2_face_indices") => {
                nvert = Some(parse_usize(fields.next(), "vertex count")?);
            }
            Some("nMesh2_face") => {
                ncell = Some(parse_usize(fields.next(), "cell count")?);
            }
            Some("Coordinates") => {
                let n =
                    nvert.ok_or_else(|| parse_err("Coordinates before nMesh2_face_indices"))?;
                for _ in 0..n {
                    let line =
                        lines.next().ok_or_else(|| parse_err("truncated Coordinates"))?;
                    let mut f = line.split_whitespace();
                    let _id = parse_usize(f.next(), "vertex id")?;
                    let x = parse_f64(f.next(), "x coordinate")?;
                    let y = parse_f64(f.next(), "y coordinate")?;
                    vertices.push(Point::new(x, y));
                }
            }
            Some("Indices") => {
                let n = ncell.ok_or_else(|| parse_err("Indices before nMesh2_face"))?;
                for _ in 0..n {
                    let line = lines.next().ok_or_else(|| parse_err("truncated Indices"))?;
                    let mut f = line.split_whitespace();
                    let _cc = parse_usize(f.next(), "cell id")?;
                    let npe = parse_usize(f.next(), "cell side count")?;
                    let centroid = parse_index(f.next(), "centroid id", vertices.len())?;
                    let mut ring = Vec::with_capacity(npe);
                    for _ in 0..npe {
                        let line =
                            lines.next().ok_or_else(|| parse_err("truncated cell edges"))?;
                        let mut f = line.split_whitespace();
                        let _j = parse_usize(f.next(), "edge number")?;
                        let va = parse_index(f.next(), "edge vertex", vertices.len())?;
                        let _vb = parse_index(f.next(), "edge vertex", vertices.len())?;
                        ring.push(va);
                    }
                    cells.push(PooledCell { centroid, ring });
                }
            }
            Some("NBOUNDARIES") => {
                let nobc = parse_usize(fields.next(), "boundary count")?;
                for i in 0..nobc {
                    let mut name = format!("boundary{i}");
                    let mut line = lines
                        .next()
                        .ok_or_else(|| parse_err("truncated boundary section"))?;
                    if let Some(rest) = line.strip_prefix(&format!("BOUNDARY{i}.NAME")) {
                        name = rest.trim().to_string();
                        line = lines
                            .next()
                            .ok_or_else(|| parse_err("truncated boundary section"))?;
                    }
                    let npoints = line
                        .strip_prefix(&format!("BOUNDARY{i}.NPOINTS"))
                        .ok_or_else(|| parse_err(format!("expected BOUNDARY{i}.NPOINTS")))?
                        .trim()
                        .parse::<usize>()
                        .map_err(|_| parse_err("invalid boundary point count"))?;
                    let mut edges = Vec::with_capacity(npoints);
                    for _ in 0..npoints {
                        let line = lines
                            .next()
                            .ok_or_else(|| parse_err("truncated boundary edges"))?;
                        let cleaned = line.replace(['(', ')'], " ");
                        let mut f = cleaned.split_whitespace();
                        let cell = parse_index(f.next(), "boundary cell", cells.len())?;
                        let va = parse_index(f.next(), "boundary vertex", vertices.len())?;
                        let vb = parse_index(f.next(), "boundary vertex", vertices.len())?;
                        edges.push(ObcEdge { cell, va, vb });
                    }
                    boundaries.push(OpenBoundarySegment { name, edges });
                }
            }
            Some("BATHY") => {
                let n = parse_usize(fields.next(), "bathymetry count")?;
                if n != cells.len() {
                    return Err(MeshError::BathymetryMismatch {
                        got: n,
                        expected: cells.len(),
                    });
                }
                let mut values = Vec::with_capacity(n);
                for _ in 0..n {
                    let line = lines.next().ok_or_else(|| parse_err("truncated BATHY"))?;
                    values.push(
                        line.parse::<f64>()
                            .map_err(|_| parse_err(format!("invalid bathymetry: {line}")))?,
                    );
                }
                bathymetry = Some(values);
            }
            Some(other) => {
                return Err(parse_err(format!("unrecognised section: {other}")));
            }
            None => {}
        }
    }

    if cells.is_empty() {
        return Err(MeshError::EmptyMesh);
    }
    Ok(Mesh::from_parts(
        vertices,
        cells,
        boundaries,
        bathymetry,
        projection,
    ))
}

/// Write every cell outline as a closed polyline, NaN-separated.
pub fn write_cell_outlines<W: Write>(mesh: &Mesh, w: &mut W) -> Result<(), MeshError> {
    for cell in mesh.cells() {
        for &v in &cell.ring {
            let p = mesh.vertices()[v];
            writeln!(w, "{} {}", p.x, p.y)?;
        }
        let first = mesh.vertices()[cell.ring[0]];
        writeln!(w, "{} {}", first.x, first.y)?;
        writeln!(w, "NaN NaN")?;
    }
    Ok(())
}

/// Write every cell centre, one per line.
pub fn write_centres<W: Write>(mesh: &Mesh, w: &mut W) -> Result<(), MeshError> {
    for cell in mesh.cells() {
        let p = mesh.vertices()[cell.centroid];
        writeln!(w, "{} {}", p.x, p.y)?;
    }
    Ok(())
}

/// Write open boundary edges as NaN-separated segments.
pub fn write_boundary_edges<W: Write>(mesh: &Mesh, w: &mut W) -> Result<(), MeshError> {
    for seg in mesh.boundaries() {
        for e in &seg.edges {
            let a = mesh.vertices()[e.va];
            let b = mesh.vertices()[e.vb];
            writeln!(w, "{} {}", a.x, a.y)?;
            writeln!(w, "{} {}", b.x, b.y)?;
            writeln!(w, "NaN NaN")?;
        }
    }
    Ok(())
}

fn parse_err(msg: impl Into<String>) -> MeshError {
    MeshError::Parse(msg.into())
}

fn parse_usize(field: Option<&str>, what: &str) -> Result<usize, MeshError> {
    field
        .ok_or_else(|| parse_err(format!("missing {what}")))?
        .parse::<usize>()
        .map_err(|_| parse_err(format!("invalid {what}")))
}

fn parse_f64(field: Option<&str>, what: &str) -> Result<f64, MeshError> {
    field
        .ok_or_else(|| parse_err(format!("missing {what}")))?
        .parse::<f64>()
        .map_err(|_| parse_err(format!("invalid {what}")))
}

/// Parse a 1-based on-disk id into a 0-based index, bounds checked.
fn parse_index(field: Option<&str>, what: &str, count: usize) -> Result<usize, MeshError> {
    let id = parse_usize(field, what)?;
    if id == 0 || id > count {
        return Err(parse_err(format!("{what} {id} out of range 1..={count}")));
    }
    Ok(id - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_garbage_header() {
        let err = read_mesh("nonsense\n".as_bytes(), Projection::Planar).unwrap_err();
        assert!(matches!(err, MeshError::Parse(_)));
    }

    #[test]
    fn rejects_out_of_range_ids() {
        let text = "Mesh2 unstructured v1.0\n\
                    nMesh2_face_indices 1\n\
                    nMesh2_face 1\n\
                    Coordinates\n\
                    1 0 0\n\
                    Indices\n\
                    1 3 2\n";
        let err = read_mesh(text.as_bytes(), Projection::Planar).unwrap_err();
        assert!(matches!(err, MeshError::Parse(_)));
    }
}
