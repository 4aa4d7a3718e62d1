use super::{ElementVolumeVariables, Problem};
use crate::flux::{harmonic_mean_normal, normal_projection};
use crate::StrError;

/// Holds the cached flux variables (transmissibilities) of one element
///
/// The transmissibility `t = area·k_h/d` of each face is solution-independent
/// for the supported two-point laws and is reused across the residual and
/// Jacobian evaluations of one assembly pass. The cache records the bound
/// element and a monotonically increasing generation counter; every read
/// validates both, so an access through a stale binding fails loudly instead
/// of returning another element's values.
pub struct ElementFluxVarsCache {
    bound_cell: Option<usize>,
    generation: u64,
    faces: Vec<usize>,
    transmissibility: Vec<f64>,
    k_normal: Vec<f64>,
}

impl ElementFluxVarsCache {
    /// Allocates a new (unbound) instance
    pub fn new() -> Self {
        ElementFluxVarsCache {
            bound_cell: None,
            generation: 0,
            faces: Vec::new(),
            transmissibility: Vec::new(),
            k_normal: Vec::new(),
        }
    }

    /// Binds an element, computing the transmissibility of each of its faces
    ///
    /// The permeability tensors come from the already-bound element volume
    /// variables. Returns the generation token that subsequent reads must present.
    pub fn bind(
        &mut self,
        problem: &Problem,
        cell_id: usize,
        elem_vars: &ElementVolumeVariables,
    ) -> Result<u64, StrError> {
        self.bound_cell = Some(cell_id);
        self.generation += 1;
        self.faces.clear();
        self.transmissibility.clear();
        self.k_normal.clear();
        for &scvf_index in problem.geometry.element_scvfs(cell_id)? {
            let face = problem.geometry.scvf(scvf_index)?;
            let inside_scv = problem.geometry.scv(face.inside)?;
            let inside_vars = elem_vars.get(face.inside)?;
            let (k_h, distance, extrusion) = match face.outside {
                Some(outside) => {
                    let outside_scv = problem.geometry.scv(outside)?;
                    let outside_vars = elem_vars.get(outside)?;
                    let k_h =
                        harmonic_mean_normal(&inside_vars.permeability, &outside_vars.permeability, &face.normal)?;
                    let distance = distance_between(&inside_scv.center, &outside_scv.center);
                    let extrusion = (inside_vars.extrusion_factor + outside_vars.extrusion_factor) / 2.0;
                    (k_h, distance, extrusion)
                }
                None => {
                    let k_h = normal_projection(&inside_vars.permeability, &face.normal)?;
                    let distance = distance_between(&inside_scv.center, &face.center);
                    (k_h, distance, inside_vars.extrusion_factor)
                }
            };
            if distance <= 0.0 {
                return Err("the distance across a face must be positive");
            }
            self.faces.push(scvf_index);
            self.transmissibility.push(face.area * extrusion * k_h / distance);
            self.k_normal.push(k_h);
        }
        Ok(self.generation)
    }

    /// Returns (transmissibility, normal permeability) of a face of the bound element
    pub fn get(&self, cell_id: usize, scvf_index: usize, generation: u64) -> Result<(f64, f64), StrError> {
        match self.bound_cell {
            None => return Err("flux-variables cache is not bound"),
            Some(bound) => {
                if bound != cell_id {
                    return Err("flux-variables cache is bound to another element");
                }
            }
        }
        if generation != self.generation {
            return Err("stale flux-variables cache");
        }
        match self.faces.iter().position(|i| *i == scvf_index) {
            Some(local) => Ok((self.transmissibility[local], self.k_normal[local])),
            None => Err("face does not belong to the bound element"),
        }
    }
}

/// Euclidean distance between two coordinate slices
fn distance_between(a: &[f64], b: &[f64]) -> f64 {
    let mut sum = 0.0;
    for i in 0..a.len() {
        sum += (b[i] - a[i]) * (b[i] - a[i]);
    }
    f64::sqrt(sum)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::ElementFluxVarsCache;
    use crate::base::{Config, Elem, ParamFluids, ParamPorousLiq, SampleMeshes};
    use crate::fv::{ElementVolumeVariables, GridVolumeVariables, Problem};
    use crate::geometry::FvGridGeometry;
    use crate::StrError;
    use russell_lab::{approx_eq, Vector};

    fn setup() -> (Config, &'static str) {
        let mut config = Config::new();
        config
            .set_param_fluids(ParamFluids::sample_water_air())
            .unwrap()
            .set_param_elements(1, Elem::PorousLiq(ParamPorousLiq::sample()))
            .unwrap();
        (config, "")
    }

    #[test]
    fn transmissibility_is_cached_per_face() -> Result<(), StrError> {
        let mesh = SampleMeshes::column_lin2(2, 2.0);
        let geo = FvGridGeometry::new(&mesh)?;
        let (config, _) = setup();
        let problem = Problem::new(&config, &geo)?;
        let mut grid_vars = GridVolumeVariables::new(geo.num_scv());
        let uu = Vector::from(&[100_000.0, 100_000.0]);
        grid_vars.update_all(&problem, &uu)?;
        let mut elem_vars = ElementVolumeVariables::new();
        elem_vars.bind(&problem, &grid_vars, 0, &uu)?;

        let mut cache = ElementFluxVarsCache::new();
        let generation = cache.bind(&problem, 0, &elem_vars)?;
        for &scvf_index in geo.element_scvfs(0)? {
            let face = geo.scvf(scvf_index)?;
            let (t, k_h) = cache.get(0, scvf_index, generation)?;
            approx_eq(k_h, 1e-12, 1e-26);
            if face.boundary() {
                // half-cell distance 0.5
                approx_eq(t, 1e-12 / 0.5, 1e-24);
            } else {
                // cell-center distance 1.0
                approx_eq(t, 1e-12, 1e-24);
            }
        }
        Ok(())
    }

    #[test]
    fn stale_and_mismatched_reads_fail() -> Result<(), StrError> {
        let mesh = SampleMeshes::column_lin2(3, 3.0);
        let geo = FvGridGeometry::new(&mesh)?;
        let (config, _) = setup();
        let problem = Problem::new(&config, &geo)?;
        let mut grid_vars = GridVolumeVariables::new(geo.num_scv());
        let uu = Vector::from(&[1.0, 2.0, 3.0]);
        grid_vars.update_all(&problem, &uu)?;
        let mut elem_vars = ElementVolumeVariables::new();

        let mut cache = ElementFluxVarsCache::new();
        assert_eq!(cache.get(0, 0, 0).err(), Some("flux-variables cache is not bound"));

        elem_vars.bind(&problem, &grid_vars, 0, &uu)?;
        let first = cache.bind(&problem, 0, &elem_vars)?;
        let own_face = geo.element_scvfs(0)?[0];
        cache.get(0, own_face, first)?;
        assert_eq!(
            cache.get(1, own_face, first).err(),
            Some("flux-variables cache is bound to another element")
        );

        // re-binding bumps the generation; the old token is rejected
        elem_vars.bind(&problem, &grid_vars, 1, &uu)?;
        let second = cache.bind(&problem, 1, &elem_vars)?;
        assert!(second > first);
        let face_of_1 = geo.element_scvfs(1)?[0];
        assert_eq!(cache.get(1, face_of_1, first).err(), Some("stale flux-variables cache"));

        // a face of another element is rejected even with the right token
        let foreign = geo
            .element_scvfs(2)?
            .iter()
            .find(|i| !geo.element_scvfs(1).unwrap().contains(i))
            .copied()
            .unwrap();
        assert_eq!(
            cache.get(1, foreign, second).err(),
            Some("face does not belong to the bound element")
        );
        Ok(())
    }
}
