use super::{SubControlVolume, SubControlVolumeFace};
use crate::StrError;
use gemlab::mesh::Mesh;
use gemlab::shapes::GeoKind;
use std::collections::HashMap;

/// Holds the finite-volume view of a mesh
///
/// Derives sub-control volumes (one per cell), sub-control-volume faces
/// (interior faces shared by exactly two cells; the rest are boundary faces),
/// and the element stencils from a [`gemlab::mesh::Mesh`]. The mesh is read
/// once at construction and never mutated.
///
/// Supported cell kinds are `Lin2` (1-D), `Tri3`, and `Qua4` (2-D). Cell
/// corners must be ordered counterclockwise in 2-D so that volumes come out
/// positive.
pub struct FvGridGeometry {
    /// Space dimension (1 or 2)
    pub ndim: usize,

    /// All sub-control volumes; the index equals the cell id
    scvs: Vec<SubControlVolume>,

    /// All sub-control-volume faces
    scvfs: Vec<SubControlVolumeFace>,

    /// Maps a cell id to the indices of its faces
    element_scvfs: Vec<Vec<usize>>,

    /// Maps a cell id to its stencil: sorted, deduplicated cell indices
    /// influencing the element residual (the cell itself plus face neighbors)
    element_stencils: Vec<Vec<usize>>,
}

impl FvGridGeometry {
    /// Builds the finite-volume geometry from a mesh
    pub fn new(mesh: &Mesh) -> Result<Self, StrError> {
        if mesh.cells.is_empty() {
            return Err("mesh must have at least one cell");
        }
        let ndim = mesh.ndim;

        // sub-control volumes
        let mut scvs = Vec::with_capacity(mesh.cells.len());
        for cell in &mesh.cells {
            let (center, volume) = cell_center_and_volume(mesh, cell.kind, &cell.points)?;
            if volume <= 0.0 {
                return Err("cell volume must be positive (check the corner ordering)");
            }
            scvs.push(SubControlVolume {
                cell_id: cell.id,
                attribute: cell.attribute,
                center,
                volume,
            });
        }

        // faces, keyed by their sorted point ids
        let mut scvfs: Vec<SubControlVolumeFace> = Vec::new();
        let mut element_scvfs: Vec<Vec<usize>> = vec![Vec::new(); mesh.cells.len()];
        let mut key_to_scvf: HashMap<Vec<usize>, usize> = HashMap::new();
        for cell in &mesh.cells {
            for local_points in local_faces(cell.kind)? {
                let points: Vec<usize> = local_points.iter().map(|l| cell.points[*l]).collect();
                let mut key = points.clone();
                key.sort();
                match key_to_scvf.get(&key) {
                    None => {
                        let face = face_geometry(mesh, &scvs[cell.id], &points)?;
                        key_to_scvf.insert(key, scvfs.len());
                        element_scvfs[cell.id].push(scvfs.len());
                        scvfs.push(face);
                    }
                    Some(index) => {
                        let face = &mut scvfs[*index];
                        if face.outside.is_some() {
                            return Err("mesh face is shared by more than two cells");
                        }
                        face.outside = Some(cell.id);
                        element_scvfs[cell.id].push(*index);
                    }
                }
            }
        }

        // stencils: self + face neighbors, sorted and deduplicated
        let mut element_stencils: Vec<Vec<usize>> = vec![Vec::new(); mesh.cells.len()];
        for (cell_id, stencil) in element_stencils.iter_mut().enumerate() {
            stencil.push(cell_id);
            for index in &element_scvfs[cell_id] {
                let face = &scvfs[*index];
                if face.inside != cell_id {
                    stencil.push(face.inside);
                }
                if let Some(outside) = face.outside {
                    if outside != cell_id {
                        stencil.push(outside);
                    }
                }
            }
            stencil.sort();
            stencil.dedup();
        }

        Ok(FvGridGeometry {
            ndim,
            scvs,
            scvfs,
            element_scvfs,
            element_stencils,
        })
    }

    /// Returns the number of sub-control volumes
    pub fn num_scv(&self) -> usize {
        self.scvs.len()
    }

    /// Returns the number of sub-control-volume faces
    pub fn num_scvf(&self) -> usize {
        self.scvfs.len()
    }

    /// Returns the i-th sub-control volume
    pub fn scv(&self, index: usize) -> Result<&SubControlVolume, StrError> {
        self.scvs.get(index).ok_or("sub-control volume index is out of range")
    }

    /// Returns the i-th sub-control-volume face
    pub fn scvf(&self, index: usize) -> Result<&SubControlVolumeFace, StrError> {
        self.scvfs
            .get(index)
            .ok_or("sub-control-volume face index is out of range")
    }

    /// Returns the indices of the faces of an element
    pub fn element_scvfs(&self, cell_id: usize) -> Result<&[usize], StrError> {
        match self.element_scvfs.get(cell_id) {
            Some(indices) => Ok(indices),
            None => Err("cell id is out of range"),
        }
    }

    /// Returns the stencil of an element: the sorted, deduplicated cell indices
    /// influencing its residual (the cell itself plus its face neighbors)
    pub fn element_stencil(&self, cell_id: usize) -> Result<&[usize], StrError> {
        match self.element_stencils.get(cell_id) {
            Some(indices) => Ok(indices),
            None => Err("cell id is out of range"),
        }
    }

    /// Returns the face neighbors of an element (recomputed, sorted, without the element itself)
    pub fn neighbor_stencil(&self, cell_id: usize) -> Result<Vec<usize>, StrError> {
        let mut neighbors = Vec::new();
        for index in self.element_scvfs(cell_id)? {
            let face = &self.scvfs[*index];
            if face.inside != cell_id {
                neighbors.push(face.inside);
            }
            if let Some(outside) = face.outside {
                if outside != cell_id {
                    neighbors.push(outside);
                }
            }
        }
        neighbors.sort();
        neighbors.dedup();
        Ok(neighbors)
    }
}

/// Returns the local point indices of the faces of a cell kind
fn local_faces(kind: GeoKind) -> Result<&'static [&'static [usize]], StrError> {
    match kind {
        GeoKind::Lin2 => Ok(&[&[0], &[1]]),
        GeoKind::Tri3 => Ok(&[&[0, 1], &[1, 2], &[2, 0]]),
        GeoKind::Qua4 => Ok(&[&[0, 1], &[1, 2], &[2, 3], &[3, 0]]),
        _ => Err("mesh cell kind must be Lin2, Tri3, or Qua4"),
    }
}

/// Computes the centroid and volume of a cell
fn cell_center_and_volume(mesh: &Mesh, kind: GeoKind, points: &[usize]) -> Result<(Vec<f64>, f64), StrError> {
    let coords = |p: usize| -> &[f64] { &mesh.points[p].coords };
    match kind {
        GeoKind::Lin2 => {
            if mesh.ndim != 1 {
                return Err("Lin2 cells require a 1-D mesh");
            }
            let (xa, xb) = (coords(points[0])[0], coords(points[1])[0]);
            Ok((vec![(xa + xb) / 2.0], xb - xa))
        }
        GeoKind::Tri3 | GeoKind::Qua4 => {
            if mesh.ndim != 2 {
                return Err("Tri3 and Qua4 cells require a 2-D mesh");
            }
            let n = points.len();
            let mut center = vec![0.0, 0.0];
            let mut area = 0.0; // shoelace formula (signed)
            for i in 0..n {
                let a = coords(points[i]);
                let b = coords(points[(i + 1) % n]);
                area += (a[0] * b[1] - b[0] * a[1]) / 2.0;
                center[0] += a[0] / (n as f64);
                center[1] += a[1] / (n as f64);
            }
            Ok((center, area))
        }
        _ => Err("mesh cell kind must be Lin2, Tri3, or Qua4"),
    }
}

/// Computes the geometry of a face with the normal pointing out of the inside cell
fn face_geometry(mesh: &Mesh, inside: &SubControlVolume, points: &[usize]) -> Result<SubControlVolumeFace, StrError> {
    if mesh.ndim == 1 {
        let x = mesh.points[points[0]].coords[0];
        let normal = if x > inside.center[0] { 1.0 } else { -1.0 };
        return Ok(SubControlVolumeFace {
            inside: inside.cell_id,
            outside: None,
            normal: vec![normal],
            area: 1.0,
            center: vec![x],
        });
    }
    // 2-D edge (a, b): counterclockwise corner ordering makes (dy, -dx) point outward
    let a = &mesh.points[points[0]].coords;
    let b = &mesh.points[points[1]].coords;
    let (dx, dy) = (b[0] - a[0], b[1] - a[1]);
    let length = f64::sqrt(dx * dx + dy * dy);
    if length <= 0.0 {
        return Err("mesh face has zero length");
    }
    Ok(SubControlVolumeFace {
        inside: inside.cell_id,
        outside: None,
        normal: vec![dy / length, -dx / length],
        area: length,
        center: vec![(a[0] + b[0]) / 2.0, (a[1] + b[1]) / 2.0],
    })
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
