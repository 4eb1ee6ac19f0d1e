//! wing-models
//!
//! Closed-form reference loadings used to sanity-check lattice solutions.
//!
//! Elliptic wing (Prandtl), span `b`, area `S`, speed `V`:
//!
//!   Γ(y)  = Γ0 · sqrt(1 − (2y/b)²),   Γ0 = 2·V·S·CL / (π·b)
//!   w     = Γ0 / (2b)                  (uniform downwash, positive down)
//!   CDi   = CL² / (π·AR)
//!
//! A single horseshoe of strength Γ with its legs at the tips induces
//!
//!   w(y) = Γ/(2π) · (1/(b/2 − y) + 1/(b/2 + y))
//!
//! on the bound line, which diverges at the tips.
//!
//! Exports:
//!   - `elliptic_root_circulation`, `elliptic_circulation`, `elliptic_downwash`
//!   - `tip_vortex_pair_downwash`
//!   - `elliptic_induced_drag`
//!   - `lifting_line_lift_slope`, `helmbold_lift_slope`
//!   - `EllipticReference` summary

use std::f64::consts::PI;

/// Two-dimensional thin-airfoil lift slope [1/rad].
pub const THIN_AIRFOIL_LIFT_SLOPE: f64 = 2.0 * PI;

/// Root circulation Γ0 [m²/s] of the elliptic loading that produces `cl`.
pub fn elliptic_root_circulation(speed: f64, area: f64, span: f64, cl: f64) -> f64 {
    2.0 * speed * area * cl / (PI * span)
}

/// Elliptic circulation at span position `y`; zero outside the tips.
pub fn elliptic_circulation(gamma0: f64, span: f64, y: f64) -> f64 {
    let eta = 2.0 * y / span;
    if eta.abs() >= 1.0 {
        return 0.0;
    }
    gamma0 * (1.0 - eta * eta).sqrt()
}

/// Uniform downwash of the elliptic loading (positive down).
pub fn elliptic_downwash(gamma0: f64, span: f64) -> f64 {
    gamma0 / (2.0 * span)
}

/// Downwash (positive down) of a single tip-to-tip horseshoe at span position `y`.
///
/// Not finite at the tips (y = ±b/2).
pub fn tip_vortex_pair_downwash(gamma: f64, span: f64, y: f64) -> f64 {
    let half = 0.5 * span;
    let r1 = half - y; // distance to the starboard tip vortex
    let r2 = half + y; // distance to the port tip vortex
    gamma / (2.0 * PI) * (1.0 / r1 + 1.0 / r2)
}

/// Induced drag coefficient of an elliptic loading.
pub fn elliptic_induced_drag(cl: f64, aspect_ratio: f64) -> f64 {
    cl * cl / (PI * aspect_ratio)
}

/// Finite-wing lift slope from classical lifting-line theory with span
/// efficiency `e`: a = a0 · AR / (AR + 2/e).
pub fn lifting_line_lift_slope(aspect_ratio: f64, e: f64) -> f64 {
    THIN_AIRFOIL_LIFT_SLOPE * aspect_ratio / (aspect_ratio + 2.0 / e)
}

/// Helmbold (low aspect ratio corrected) lift slope, incompressible,
/// `sweep_half_chord` in radians.
pub fn helmbold_lift_slope(aspect_ratio: f64, sweep_half_chord: f64) -> f64 {
    let t = sweep_half_chord.tan();
    let root = (aspect_ratio * aspect_ratio * (1.0 + t * t) + 4.0).sqrt();
    2.0 * PI * aspect_ratio / (2.0 + root)
}

/// Elliptic-wing numbers matching a given lift coefficient.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EllipticReference {
    pub cl: f64,
    pub aspect_ratio: f64,
    pub root_circulation: f64,
    pub downwash: f64,
    pub induced_drag_coefficient: f64,
}

impl EllipticReference {
    pub fn for_lift(cl: f64, speed: f64, span: f64, area: f64) -> Self {
        let aspect_ratio = span * span / area;
        let root_circulation = elliptic_root_circulation(speed, area, span, cl);
        Self {
            cl,
            aspect_ratio,
            root_circulation,
            downwash: elliptic_downwash(root_circulation, span),
            induced_drag_coefficient: elliptic_induced_drag(cl, aspect_ratio),
        }
    }
}

/* -------------------------------- tests -------------------------------- */
