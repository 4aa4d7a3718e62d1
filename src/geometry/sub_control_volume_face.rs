/// Holds one face of a sub-control volume
///
/// Interior faces connect two sub-control volumes; the unit normal always
/// points from `inside` to `outside`. Boundary faces have no outside volume
/// and the normal points out of the domain.
#[derive(Clone, Debug)]
pub struct SubControlVolumeFace {
    /// Index of the sub-control volume on the inside
    pub inside: usize,

    /// Index of the sub-control volume on the outside (None on the boundary)
    pub outside: Option<usize>,

    /// Unit normal pointing from inside to outside (length = ndim)
    pub normal: Vec<f64>,

    /// Face area (1.0 in 1-D, edge length in 2-D)
    pub area: f64,

    /// Centroid coordinates (length = ndim)
    pub center: Vec<f64>,
}

impl SubControlVolumeFace {
    /// Tells whether this face lies on the domain boundary
    pub fn boundary(&self) -> bool {
        self.outside.is_none()
    }
}
