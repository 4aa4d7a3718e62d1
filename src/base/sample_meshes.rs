use gemlab::mesh::{Cell, Mesh, Point};
use gemlab::shapes::GeoKind;

/// Holds sample meshes for testing
pub struct SampleMeshes {}

impl SampleMeshes {
    /// Returns a 1-D column of n Lin2 cells along x, from 0 to length
    ///
    /// ```text
    /// 0----1----2-- ... --n
    /// ```
    pub fn column_lin2(n: usize, length: f64) -> Mesh {
        let dx = length / (n as f64);
        let points = (0..(n + 1))
            .map(|i| Point {
                id: i,
                marker: 0,
                coords: vec![(i as f64) * dx],
            })
            .collect();
        let cells = (0..n)
            .map(|i| Cell {
                id: i,
                attribute: 1,
                kind: GeoKind::Lin2,
                points: vec![i, i + 1],
            })
            .collect();
        Mesh {
            ndim: 1,
            points,
            cells,
        }
    }

    /// Returns a structured nx × ny grid of Qua4 cells covering [0,lx] × [0,ly]
    pub fn rectangle_qua4(nx: usize, ny: usize, lx: f64, ly: f64) -> Mesh {
        let dx = lx / (nx as f64);
        let dy = ly / (ny as f64);
        let mut points = Vec::with_capacity((nx + 1) * (ny + 1));
        for j in 0..(ny + 1) {
            for i in 0..(nx + 1) {
                points.push(Point {
                    id: j * (nx + 1) + i,
                    marker: 0,
                    coords: vec![(i as f64) * dx, (j as f64) * dy],
                });
            }
        }
        let mut cells = Vec::with_capacity(nx * ny);
        for j in 0..ny {
            for i in 0..nx {
                let p0 = j * (nx + 1) + i;
                cells.push(Cell {
                    id: j * nx + i,
                    attribute: 1,
                    kind: GeoKind::Qua4,
                    points: vec![p0, p0 + 1, p0 + nx + 2, p0 + nx + 1],
                });
            }
        }
        Mesh {
            ndim: 2,
            points,
            cells,
        }
    }

    /// Returns a unit square split into two Tri3 cells
    ///
    /// ```text
    /// 3------2
    /// | [1] /|
    /// |   /  |
    /// | / [0]|
    /// 0------1
    /// ```
    #[rustfmt::skip]
    pub fn two_tri3() -> Mesh {
        Mesh {
            ndim: 2,
            points: vec![
                Point { id: 0, marker: 0, coords: vec![0.0, 0.0] },
                Point { id: 1, marker: 0, coords: vec![1.0, 0.0] },
                Point { id: 2, marker: 0, coords: vec![1.0, 1.0] },
                Point { id: 3, marker: 0, coords: vec![0.0, 1.0] },
            ],
            cells: vec![
                Cell { id: 0, attribute: 1, kind: GeoKind::Tri3, points: vec![0, 1, 2] },
                Cell { id: 1, attribute: 1, kind: GeoKind::Tri3, points: vec![0, 2, 3] },
            ],
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::SampleMeshes;
    use gemlab::shapes::GeoKind;
    use russell_lab::approx_eq;

    #[test]
    fn column_lin2_works() {
        let mesh = SampleMeshes::column_lin2(4, 2.0);
        assert_eq!(mesh.ndim, 1);
        assert_eq!(mesh.points.len(), 5);
        assert_eq!(mesh.cells.len(), 4);
        approx_eq(mesh.points[4].coords[0], 2.0, 1e-15);
        assert_eq!(mesh.cells[3].points, &[3, 4]);
        assert_eq!(mesh.cells[0].kind, GeoKind::Lin2);
    }

    #[test]
    fn rectangle_qua4_works() {
        let mesh = SampleMeshes::rectangle_qua4(3, 2, 3.0, 2.0);
        assert_eq!(mesh.ndim, 2);
        assert_eq!(mesh.points.len(), 12);
        assert_eq!(mesh.cells.len(), 6);
        // counterclockwise corner numbering
        assert_eq!(mesh.cells[0].points, &[0, 1, 5, 4]);
        assert_eq!(mesh.cells[5].points, &[6, 7, 11, 10]);
        approx_eq(mesh.points[11].coords[0], 3.0, 1e-15);
        approx_eq(mesh.points[11].coords[1], 2.0, 1e-15);
    }

    #[test]
    fn two_tri3_works() {
        let mesh = SampleMeshes::two_tri3();
        assert_eq!(mesh.points.len(), 4);
        assert_eq!(mesh.cells.len(), 2);
        assert_eq!(mesh.cells[0].kind, GeoKind::Tri3);
    }
}
