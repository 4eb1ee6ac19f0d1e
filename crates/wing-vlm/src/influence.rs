//! Influence assembler: A, B and the right-hand side.
//!
//! A[j,k] is the normal velocity at control point j induced by horseshoe k at
//! unit circulation plus its mirror image (reflected across y = 0, opposite
//! sign). B[j,k] keeps only the trailing legs. RHS[j] = −V∞·n_j.
//!
//! Every entry is a pure function of read-only geometry, so the matrices are
//! filled by index (in parallel with the `parallel` feature).

use nalgebra::{DMatrix, DVector};
use wing_core::Vec3;

use crate::collocation::ControlPoint;
use crate::error::{Location, Result, VlmError};
use crate::kernel::{horseshoe_velocity, KernelConfig};
use crate::wake::Horseshoe;

/// Which half of the wing the panels describe. The image half is implied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HalfWing {
    /// y ≥ 0
    #[default]
    Starboard,
    /// y ≤ 0
    Port,
}

impl HalfWing {
    /// Sign of the unit circulation carried by the modelled half.
    pub fn circulation_sign(self) -> f64 {
        match self {
            HalfWing::Starboard => 1.0,
            HalfWing::Port => -1.0,
        }
    }
}

/// Dense influence system for one solve.
#[derive(Clone, Debug, PartialEq)]
pub struct InfluenceSystem {
    pub a: DMatrix<f64>,
    pub b: DMatrix<f64>,
    pub rhs: DVector<f64>,
}

impl InfluenceSystem {
    /// Assemble for panels on the starboard half.
    pub fn assemble(
        control_points: &[ControlPoint],
        horseshoes: &[Horseshoe],
        freestream_velocity: &Vec3,
        kernel: &KernelConfig,
    ) -> Result<Self> {
        Self::assemble_half(HalfWing::Starboard, control_points, horseshoes, freestream_velocity, kernel)
    }

    pub fn assemble_half(
        half: HalfWing,
        control_points: &[ControlPoint],
        horseshoes: &[Horseshoe],
        freestream_velocity: &Vec3,
        kernel: &KernelConfig,
    ) -> Result<Self> {
        if control_points.len() != horseshoes.len() {
            return Err(VlmError::geometry(
                Location::Planform,
                format!(
                    "{} control points for {} horseshoes",
                    control_points.len(),
                    horseshoes.len()
                ),
            ));
        }
        let n = control_points.len();
        let sign = half.circulation_sign();

        let entries = collect_entries(n, |j, k| influence_entry(&control_points[j], &horseshoes[k], sign, kernel));

        let a = DMatrix::from_fn(n, n, |j, k| entries[j * n + k].0);
        let b = DMatrix::from_fn(n, n, |j, k| entries[j * n + k].1);
        let rhs = DVector::from_iterator(n, control_points.iter().map(|cp| -freestream_velocity.dot(&cp.normal)));

        log::debug!("influence: assembled {n}x{n} A/B matrices");
        Ok(Self { a, b, rhs })
    }

    pub fn size(&self) -> usize {
        self.rhs.len()
    }
}

/// (A[j,k], B[j,k]) for one control point and one horseshoe carrying
/// circulation `sign`, with the image horseshoe carrying `-sign`.
pub fn influence_entry(cp: &ControlPoint, hs: &Horseshoe, sign: f64, kernel: &KernelConfig) -> (f64, f64) {
    let direct = horseshoe_velocity(hs, &cp.position, sign, kernel);
    let image = horseshoe_velocity(&hs.mirrored(), &cp.position, -sign, kernel);
    (direct + image).along(&cp.normal)
}

#[cfg(feature = "parallel")]
fn collect_entries<F>(n: usize, entry: F) -> Vec<(f64, f64)>
where
    F: Fn(usize, usize) -> (f64, f64) + Sync,
{
    use rayon::prelude::*;
    (0..n * n).into_par_iter().map(|idx| entry(idx / n, idx % n)).collect()
}

#[cfg(not(feature = "parallel"))]
fn collect_entries<F>(n: usize, entry: F) -> Vec<(f64, f64)>
where
    F: Fn(usize, usize) -> (f64, f64),
{
    (0..n * n).map(|idx| entry(idx / n, idx % n)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collocation::control_points;
    use crate::geometry::build_mesh;
    use crate::planform::Planform;
    use crate::wake::build_horseshoes;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use wing_core::Freestream;

    fn lattice(p: &Planform, ny: usize, fs: &Freestream) -> (Vec<ControlPoint>, Vec<Horseshoe>) {
        let mesh = build_mesh(p, ny).unwrap();
        let cps = control_points(&mesh).unwrap();
        let hss = build_horseshoes(&mesh, &fs.direction(), 20.0 * p.span());
        (cps, hss)
    }

    #[test]
    fn zero_incidence_gives_zero_rhs() {
        let fs = Freestream::from_degrees(10.0, 0.0, 1.225);
        let (cps, hss) = lattice(&Planform::rectangular(5.0, 2.0), 5, &fs);
        let sys = InfluenceSystem::assemble(&cps, &hss, &fs.velocity(), &KernelConfig::default()).unwrap();
        assert_eq!(sys.size(), 4);
        assert_abs_diff_eq!(sys.rhs.amax(), 0.0);
    }

    #[test]
    fn diagonal_dominates_and_washes_down() {
        let fs = Freestream::from_degrees(10.0, 5.0, 1.225);
        let (cps, hss) = lattice(&Planform::rectangular(5.0, 2.0), 5, &fs);
        let sys = InfluenceSystem::assemble(&cps, &hss, &fs.velocity(), &KernelConfig::default()).unwrap();
        for j in 0..4 {
            assert!(sys.a[(j, j)] < 0.0);
            assert!(sys.rhs[j] < 0.0);
            let off: f64 = (0..4).filter(|&k| k != j).map(|k| sys.a[(j, k)].abs()).sum();
            assert!(sys.a[(j, j)].abs() > off);
        }
    }

    #[test]
    fn mirror_image_round_trip_leaves_system_unchanged() {
        let p = Planform {
            sweep: 30f64.to_radians(),
            dihedral: 6f64.to_radians(),
            twist: (-2f64).to_radians(),
            taper: 0.5,
            ..Planform::rectangular(5.0, 2.0)
        };
        let fs = Freestream::from_degrees(10.0, 4.0, 1.225);
        let kernel = KernelConfig::default();
        let (cps, hss) = lattice(&p, 7, &fs);

        let starboard = InfluenceSystem::assemble(&cps, &hss, &fs.velocity(), &kernel).unwrap();

        let port_cps: Vec<_> = cps.iter().map(ControlPoint::mirrored).collect();
        let port_hss: Vec<_> = hss.iter().map(Horseshoe::mirrored).collect();
        let port = InfluenceSystem::assemble_half(HalfWing::Port, &port_cps, &port_hss, &fs.velocity(), &kernel)
            .unwrap();

        assert_relative_eq!(starboard.a, port.a, epsilon = 1e-12);
        assert_relative_eq!(starboard.b, port.b, epsilon = 1e-12);
        assert_relative_eq!(starboard.rhs, port.rhs, epsilon = 1e-12);
    }

    #[test]
    fn mismatched_lattice_is_an_error() {
        let fs = Freestream::from_degrees(10.0, 5.0, 1.225);
        let (cps, hss) = lattice(&Planform::rectangular(5.0, 2.0), 5, &fs);
        let err = InfluenceSystem::assemble(&cps[..3], &hss, &fs.velocity(), &KernelConfig::default()).unwrap_err();
        assert_eq!(
            err,
            VlmError::DegenerateGeometry {
                location: Location::Planform,
                reason: "3 control points for 4 horseshoes".to_owned(),
            }
        );
    }

    #[test]
    fn entries_are_superposable() {
        let fs = Freestream::from_degrees(10.0, 3.0, 1.225);
        let (cps, hss) = lattice(&Planform::rectangular(5.0, 2.0), 4, &fs);
        let kernel = KernelConfig::default();
        let (a1, b1) = influence_entry(&cps[0], &hss[1], 1.0, &kernel);
        let (a3, b3) = influence_entry(&cps[0], &hss[1], 3.0, &kernel);
        assert_relative_eq!(a3, 3.0 * a1, epsilon = 1e-14);
        assert_relative_eq!(b3, 3.0 * b1, epsilon = 1e-14);
    }
}
