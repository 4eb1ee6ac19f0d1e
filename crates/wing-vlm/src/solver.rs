//! Dense direct solve of A·Γ = RHS.
//!
//! LU with partial pivoting, no refinement or regularisation. Near-coincident
//! panels (very fine spanwise spacing on a short span) drive the pivot ratio
//! down; below `PIVOT_RATIO_TOLERANCE` the system is rejected as singular.

use nalgebra::DVector;

use crate::error::{Result, VlmError};
use crate::influence::InfluenceSystem;

/// Smallest accepted min|U_ii| / max|U_ii|.
pub const PIVOT_RATIO_TOLERANCE: f64 = 1e-12;

/// Pivot ratio below which a conditioning warning is logged.
const ILL_CONDITIONED_RATIO: f64 = 1e-8;

/// Solve for the circulation vector Γ.
pub fn solve_circulation(system: &InfluenceSystem) -> Result<DVector<f64>> {
    let n = system.size();
    let lu = system.a.clone().lu();

    let pivots = lu.u().diagonal();
    let largest = pivots.amax();
    let pivot_ratio = if largest > 0.0 && largest.is_finite() { pivots.amin() / largest } else { 0.0 };

    if !(pivot_ratio >= PIVOT_RATIO_TOLERANCE) {
        return Err(VlmError::SingularSystem { size: n, pivot_ratio });
    }
    if pivot_ratio < ILL_CONDITIONED_RATIO {
        log::warn!("influence matrix is ill-conditioned (pivot ratio {pivot_ratio:e})");
    }

    let gamma = lu
        .solve(&system.rhs)
        .ok_or(VlmError::SingularSystem { size: n, pivot_ratio })?;

    if gamma.iter().any(|g| !g.is_finite()) {
        return Err(VlmError::SingularSystem { size: n, pivot_ratio });
    }

    log::debug!("solver: {n} circulations, pivot ratio {pivot_ratio:.3e}");
    Ok(gamma)
}
