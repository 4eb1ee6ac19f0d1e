//! Load integrator (Kutta–Joukowski).
//!
//! Panels cover the starboard half only, so half-wing sums are doubled:
//!
//!   ΔL_j = ρ·V∞·Γ_j·Δy_j          L  = 2·Σ ΔL_j
//!   ΔD_j = ρ·w_j·Γ_j·Δy_j          Di = 2·Σ ΔD_j
//!   CL   = 2·L / (ρ·V∞²·S)        CDi = 2·Di / (ρ·V∞²·S)
//!
//! with S the full-wing area and w_j = −(B·Γ)_j the downwash (positive down).

use nalgebra::DVector;
use serde::{Deserialize, Serialize};
use wing_core::Freestream;

use crate::geometry::WingMesh;

/// Both halves are loaded identically.
pub const SYMMETRY_FACTOR: f64 = 2.0;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SectionLoad {
    pub y_mid: f64,        // m
    pub width: f64,        // m
    pub chord: f64,        // m
    pub circulation: f64,  // m²/s
    pub downwash: f64,     // m/s, positive down
    pub lift: f64,         // N
    pub induced_drag: f64, // N
    pub cl: f64,           // local section lift coefficient
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Loads {
    pub sections: Vec<SectionLoad>,
    /// Full-wing lift [N]
    pub lift: f64,
    /// Full-wing induced drag [N]
    pub induced_drag: f64,
    pub cl: f64,
    pub cdi: f64,
    pub reference_area: f64,
}

impl Loads {
    /// Span efficiency e = CL² / (π·AR·CDi); `None` without positive drag.
    pub fn span_efficiency(&self, aspect_ratio: f64) -> Option<f64> {
        (self.cdi > 0.0).then(|| self.cl * self.cl / (std::f64::consts::PI * aspect_ratio * self.cdi))
    }
}

/// Integrate sectional and total loads from Γ and the normal wash B·Γ.
pub fn integrate_loads(
    mesh: &WingMesh,
    circulation: &DVector<f64>,
    normal_wash: &DVector<f64>,
    freestream: &Freestream,
    reference_area: f64,
) -> Loads {
    let rho = freestream.density;
    let v_inf = freestream.speed;
    let q = freestream.dynamic_pressure();

    let sections: Vec<SectionLoad> = (0..mesh.panel_count())
        .map(|j| {
            let gamma = circulation[j];
            let downwash = -normal_wash[j];
            let width = mesh.panel_width(j);
            let chord = mesh.panel_chord(j);
            let lift = rho * v_inf * gamma * width;
            let induced_drag = rho * downwash * gamma * width;
            // pointed tips have zero chord: no meaningful section coefficient
            let cl = if chord > 0.0 && q > 0.0 { lift / (q * chord * width) } else { 0.0 };
            SectionLoad { y_mid: mesh.panel_mid_y(j), width, chord, circulation: gamma, downwash, lift, induced_drag, cl }
        })
        .collect();

    let lift = SYMMETRY_FACTOR * sections.iter().map(|s| s.lift).sum::<f64>();
    let induced_drag = SYMMETRY_FACTOR * sections.iter().map(|s| s.induced_drag).sum::<f64>();

    let denom = rho * v_inf * v_inf * reference_area;
    let cl = 2.0 * lift / denom;
    let cdi = 2.0 * induced_drag / denom;

    log::debug!("loads: L = {lift:.4} N, Di = {induced_drag:.5} N, CL = {cl:.5}, CDi = {cdi:.6}");
    Loads { sections, lift, induced_drag, cl, cdi, reference_area }
}
