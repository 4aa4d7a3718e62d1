use crate::StrError;
use russell_tensor::Tensor2;

/// Projects a symmetric tensor onto a unit normal: n·K·n
pub fn normal_projection(k: &Tensor2, normal: &[f64]) -> Result<f64, StrError> {
    let ndim = normal.len();
    if ndim < 1 || ndim > 3 {
        return Err("normal vector must have 1 to 3 components");
    }
    let mut projection = 0.0;
    for i in 0..ndim {
        for j in 0..ndim {
            projection += normal[i] * k.get(i, j) * normal[j];
        }
    }
    Ok(projection)
}

/// Returns the harmonic mean of the normal projections of two permeability tensors
///
/// Each tensor is first projected onto the face normal (n·K·n); the scalar
/// harmonic mean `2·k1·k2/(k1 + k2)` of the projections follows. A zero
/// projection on either side yields zero (impermeable interface). For equal
/// tensors the mean equals the projection itself.
pub fn harmonic_mean_normal(k_inside: &Tensor2, k_outside: &Tensor2, normal: &[f64]) -> Result<f64, StrError> {
    let k1 = normal_projection(k_inside, normal)?;
    let k2 = normal_projection(k_outside, normal)?;
    if k1 <= 0.0 || k2 <= 0.0 {
        return Ok(0.0);
    }
    Ok(2.0 * k1 * k2 / (k1 + k2))
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
