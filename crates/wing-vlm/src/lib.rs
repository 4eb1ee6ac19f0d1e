//! wing-vlm
//!
//! Horseshoe vortex-lattice solver for a finite, swept, tapered wing.
//! - One horseshoe per spanwise panel, bound leg on the quarter chord,
//!   trailing legs along the free stream to a far-wake point.
//! - No-flow-through enforced at the three-quarter-chord control points.
//! - Symmetry plane handled by a mirror-image horseshoe, so only the
//!   starboard half carries unknowns.
//! - Lift & induced drag from Kutta–Joukowski on Γ and the trailing-leg
//!   downwash.
//!
//! Pipeline:
//!   geometry → wake → collocation → influence → solver → loads
//!
//! Conventions:
//! - x downstream, y along the starboard span, z up.
//! - Totals (L, Di, CL, CDi) are full-wing values.
//! - Positive twist lifts the tip trailing edge (washout).
//!
//! The kernel's near-field cut-off is an absolute length⁴ threshold, so it
//! does not scale with the wing. On small wings it can drop a panel's own
//! bound vortex and the loads come out wrong; `solve` logs a warning when a
//! panel gets close to that (see `KernelConfig::near_field_margin`).

pub mod collocation;
pub mod error;
pub mod geometry;
pub mod influence;
pub mod kernel;
pub mod loads;
pub mod planform;
pub mod solver;
pub mod wake;

use nalgebra::DVector;
use serde::{Deserialize, Serialize};
use wing_core::{Freestream, Vec3};

pub use collocation::ControlPoint;
pub use error::{Location, Result, VlmError};
pub use geometry::WingMesh;
pub use influence::InfluenceSystem;
pub use kernel::KernelConfig;
pub use loads::{Loads, SectionLoad};
pub use planform::Planform;
pub use wake::{Horseshoe, WakeConfig};

/// Spanwise stations used when none are given (four panels per half).
pub const DEFAULT_SPAN_STATIONS: usize = 5;

/// Panels whose bound-vortex near-field margin falls below this are reported.
pub const NEAR_FIELD_WARN_MARGIN: f64 = 10.0;

/// Inputs for the solver
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Inputs {
    pub planform: Planform,
    pub freestream: Freestream,
    pub span_stations: usize, // Ny, panels = Ny − 1
    #[serde(default)]
    pub kernel: KernelConfig,
    #[serde(default)]
    pub wake: WakeConfig,
}

impl Inputs {
    pub fn new(planform: Planform, freestream: Freestream, span_stations: usize) -> Self {
        Self {
            planform,
            freestream,
            span_stations,
            kernel: KernelConfig::default(),
            wake: WakeConfig::default(),
        }
    }
}

/// Everything one solve produces. Geometry is kept for plotting.
#[derive(Clone, Debug)]
pub struct Solution {
    pub planform: Planform,
    pub freestream: Freestream,
    pub mesh: WingMesh,
    pub horseshoes: Vec<Horseshoe>,
    pub control_points: Vec<ControlPoint>,
    pub system: InfluenceSystem,
    /// Γ, one per starboard panel, root to tip.
    pub circulation: DVector<f64>,
    /// B·Γ, the trailing-leg wash along each control-point normal.
    pub normal_wash: DVector<f64>,
    pub loads: Loads,
}

impl Solution {
    /// (y, Γ) at every panel midpoint across the full span, port tip first.
    pub fn full_span_circulation(&self) -> Vec<(f64, f64)> {
        let n = self.mesh.panel_count();
        let starboard = (0..n).map(|j| (self.mesh.panel_mid_y(j), self.circulation[j]));
        let port = (0..n).rev().map(|j| (-self.mesh.panel_mid_y(j), self.circulation[j]));
        port.chain(starboard).collect()
    }

    pub fn span_efficiency(&self) -> Option<f64> {
        self.loads.span_efficiency(self.planform.aspect_ratio())
    }
}

/// Top-level API: run the whole pipeline once.
pub fn solve(inputs: &Inputs) -> Result<Solution> {
    validate_flow(&inputs.freestream)?;

    let planform = inputs.planform;
    let freestream = inputs.freestream;

    // 1) Geometry
    let mesh = geometry::build_mesh(&planform, inputs.span_stations)?;

    // 2) Horseshoes, trailing legs along the free stream
    let far_distance = inputs.wake.far_field_spans * planform.span();
    let horseshoes = wake::build_horseshoes(&mesh, &freestream.direction(), far_distance);

    // 3) Control points & normals
    let control_points = collocation::control_points(&mesh)?;

    // 4) A, B, RHS
    let velocity: Vec3 = freestream.velocity();
    if let Some((j, margin)) = weakest_near_field(&mesh, &inputs.kernel) {
        log::warn!(
            "panel {j}: bound vortex near-field margin {margin:.3} vs core tolerance {:e}; \
             loads may be wrong, lower the tolerance for a wing this small",
            inputs.kernel.core_tolerance
        );
    }
    let system = InfluenceSystem::assemble(&control_points, &horseshoes, &velocity, &inputs.kernel)?;

    // 5) Γ, then the downwash from the trailing legs
    let circulation = solver::solve_circulation(&system)?;
    let normal_wash = &system.b * &circulation;

    // 6) Loads
    let loads = loads::integrate_loads(&mesh, &circulation, &normal_wash, &freestream, planform.reference_area());

    log::debug!(
        "solve: AR {:.3}, alpha {:.2} deg -> CL {:.5}",
        planform.aspect_ratio(),
        freestream.alpha.to_degrees(),
        loads.cl
    );

    Ok(Solution {
        planform,
        freestream,
        mesh,
        horseshoes,
        control_points,
        system,
        circulation,
        normal_wash,
        loads,
    })
}

/// One point of a lift polar.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PolarPoint {
    pub alpha: f64, // rad
    pub cl: f64,
    pub cdi: f64,
}

/// Independent solves at each angle of attack [rad].
pub fn polar(inputs: &Inputs, alphas: &[f64]) -> Result<Vec<PolarPoint>> {
    alphas
        .iter()
        .map(|&alpha| {
            let run = Inputs { freestream: inputs.freestream.with_alpha(alpha), ..inputs.clone() };
            let sol = solve(&run)?;
            Ok(PolarPoint { alpha, cl: sol.loads.cl, cdi: sol.loads.cdi })
        })
        .collect()
}

/// Panel with the smallest margin between its control point and its own
/// bound vortex, if that margin is under `NEAR_FIELD_WARN_MARGIN`.
fn weakest_near_field(mesh: &WingMesh, kernel: &KernelConfig) -> Option<(usize, f64)> {
    (0..mesh.panel_count())
        .map(|j| (j, kernel.near_field_margin(mesh.panel_width(j), 0.5 * mesh.panel_chord(j))))
        .filter(|&(_, margin)| margin < NEAR_FIELD_WARN_MARGIN)
        .min_by(|a, b| a.1.total_cmp(&b.1))
}

fn validate_flow(fs: &Freestream) -> Result<()> {
    if !(fs.speed.is_finite() && fs.speed > 0.0) {
        return Err(VlmError::InvalidFlow(format!("free-stream speed must be positive, got {}", fs.speed)));
    }
    if !(fs.density.is_finite() && fs.density > 0.0) {
        return Err(VlmError::InvalidFlow(format!("density must be positive, got {}", fs.density)));
    }
    if !fs.alpha.is_finite() {
        return Err(VlmError::InvalidFlow("angle of attack is not finite".to_owned()));
    }
    Ok(())
}

/* ----------------------------------- tests ---------------------------------- */
