use gemlab::mesh::CellAttribute;

/// Holds the control volume associated with one cell
///
/// In the cell-centered scheme there is exactly one sub-control volume per
/// cell, hence the SCV index coincides with the cell id.
#[derive(Clone, Debug)]
pub struct SubControlVolume {
    /// Id of the cell this volume belongs to
    pub cell_id: usize,

    /// Attribute of the cell (key into the element parameters)
    pub attribute: CellAttribute,

    /// Centroid coordinates (length = ndim)
    pub center: Vec<f64>,

    /// Volume (length in 1-D, area in 2-D); always positive
    pub volume: f64,
}

impl SubControlVolume {
    /// Returns the index of this sub-control volume
    pub fn index(&self) -> usize {
        self.cell_id
    }
}
