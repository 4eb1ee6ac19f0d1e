//! Induced-velocity kernel: Biot–Savart law for straight vortex filaments.
//!
//! For a segment P1→P2 carrying circulation Γ, evaluated at Cp:
//!
//!   r1 = Cp − P1,  r2 = Cp − P2,  r0 = P2 − P1
//!   v  = Γ / (4π |r1×r2|²) · (r0·r1/|r1| − r0·r2/|r2|) · (r1×r2)
//!
//! When |r1×r2|² falls below the core tolerance the point is on (or colinear
//! with) the filament and the segment contributes nothing.
//!
//! The tolerance is absolute (length⁴). For a point abreast the midpoint of a
//! segment of length l at distance d, |r1×r2| = l·d, so on small wings the
//! cut-off can swallow a panel's own bound vortex. `near_field_margin`
//! measures how close a lattice is to that.

use std::f64::consts::PI;
use std::ops::Add;

use serde::{Deserialize, Serialize};
use wing_core::Vec3;

use crate::wake::Horseshoe;

/// Default threshold on |r1×r2|² below which a segment is skipped.
pub const DEFAULT_CORE_TOLERANCE: f64 = 5e-5;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KernelConfig {
    /// Threshold on |r1×r2|² (length⁴) for the near-field cut-off.
    pub core_tolerance: f64,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self { core_tolerance: DEFAULT_CORE_TOLERANCE }
    }
}

impl KernelConfig {
    /// (l·d)² / tolerance for a point at distance `d` abreast the midpoint of a
    /// segment of length `l`. Below 1 the segment is cut off.
    pub fn near_field_margin(&self, length: f64, distance: f64) -> f64 {
        let cross = length * distance;
        cross * cross / self.core_tolerance
    }
}

/// Velocity induced by one horseshoe, split into all three segments and the
/// two trailing legs alone.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InducedVelocity {
    pub total: Vec3,
    pub trailing: Vec3,
}

impl InducedVelocity {
    pub fn zero() -> Self {
        Self { total: Vec3::zeros(), trailing: Vec3::zeros() }
    }

    /// Components along `normal`, as (total, trailing).
    pub fn along(&self, normal: &Vec3) -> (f64, f64) {
        (self.total.dot(normal), self.trailing.dot(normal))
    }
}

impl Add for InducedVelocity {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self { total: self.total + other.total, trailing: self.trailing + other.trailing }
    }
}

/// Velocity induced at `cp` by the straight segment `p1 → p2` of strength `gamma`.
pub fn segment_velocity(p1: &Vec3, p2: &Vec3, cp: &Vec3, gamma: f64, kernel: &KernelConfig) -> Vec3 {
    let r1 = cp - p1;
    let r2 = cp - p2;
    let r0 = p2 - p1;

    let r1_x_r2 = r1.cross(&r2);
    let norm2 = r1_x_r2.norm_squared();
    if norm2 < kernel.core_tolerance {
        return Vec3::zeros();
    }

    let r1n = r1.norm();
    let r2n = r2.norm();
    let k = gamma / (4.0 * PI * norm2) * (r0.dot(&r1) / r1n - r0.dot(&r2) / r2n);
    r1_x_r2 * k
}

/// Velocity induced at `cp` by a horseshoe of strength `gamma`.
///
/// Segments 0 and 2 are the trailing legs; segment 1 is the bound vortex.
pub fn horseshoe_velocity(hs: &Horseshoe, cp: &Vec3, gamma: f64, kernel: &KernelConfig) -> InducedVelocity {
    let mut out = InducedVelocity::zero();
    for (i, [p1, p2]) in hs.segments().into_iter().enumerate() {
        let v = segment_velocity(&p1, &p2, cp, gamma, kernel);
        out.total += v;
        if i != Horseshoe::BOUND_SEGMENT {
            out.trailing += v;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn spanwise_segment(half_length: f64) -> (Vec3, Vec3) {
        (Vec3::new(0.0, -half_length, 0.0), Vec3::new(0.0, half_length, 0.0))
    }

    #[test]
    fn long_segment_matches_infinite_filament() {
        let (p1, p2) = spanwise_segment(1.0e4);
        let r = 0.8;
        let v = segment_velocity(&p1, &p2, &Vec3::new(r, 0.0, 0.0), 2.5, &KernelConfig::default());
        assert_relative_eq!(v.norm(), 2.5 / (2.0 * PI * r), max_relative = 1e-6);
        // filament along +y, point downstream: velocity points down
        assert!(v.z < 0.0);
        assert_abs_diff_eq!(v.x, 0.0, epsilon = 1e-15);
        assert_abs_diff_eq!(v.y, 0.0, epsilon = 1e-15);
    }

    #[test]
    fn reversing_endpoints_flips_velocity() {
        let (p1, p2) = spanwise_segment(2.0);
        let cp = Vec3::new(0.3, 0.7, -0.2);
        let k = KernelConfig::default();
        let forward = segment_velocity(&p1, &p2, &cp, 1.0, &k);
        let backward = segment_velocity(&p2, &p1, &cp, 1.0, &k);
        let negated = segment_velocity(&p1, &p2, &cp, -1.0, &k);
        assert_relative_eq!(forward, -backward, epsilon = 1e-14);
        assert_relative_eq!(forward, -negated, epsilon = 1e-14);
    }

    #[test]
    fn point_on_filament_is_zero() {
        let (p1, p2) = spanwise_segment(0.5);
        let k = KernelConfig::default();
        assert_eq!(segment_velocity(&p1, &p2, &Vec3::zeros(), 1.0, &k), Vec3::zeros());
        // colinear beyond the end
        assert_eq!(segment_velocity(&p1, &p2, &Vec3::new(0.0, 3.0, 0.0), 1.0, &k), Vec3::zeros());
        // endpoint itself
        assert_eq!(segment_velocity(&p1, &p2, &p2, 1.0, &k), Vec3::zeros());
    }

    #[test]
    fn tolerance_boundary() {
        // unit-length segment: |r1×r2|² = r² at the midpoint
        let (p1, p2) = spanwise_segment(0.5);
        let k = KernelConfig::default();
        let inside = segment_velocity(&p1, &p2, &Vec3::new(0.0070, 0.0, 0.0), 1.0, &k);
        let outside = segment_velocity(&p1, &p2, &Vec3::new(0.0071, 0.0, 0.0), 1.0, &k);
        assert_eq!(inside, Vec3::zeros());
        assert!(outside.norm() > 0.0 && outside.norm().is_finite());

        let tight = KernelConfig { core_tolerance: 1e-10 };
        assert!(segment_velocity(&p1, &p2, &Vec3::new(0.0070, 0.0, 0.0), 1.0, &tight).norm() > 0.0);
    }

    #[test]
    fn margin_below_one_means_cut_off() {
        let k = KernelConfig::default();
        let (p1, p2) = spanwise_segment(0.5);
        for d in [0.0070, 0.0071, 0.05] {
            let v = segment_velocity(&p1, &p2, &Vec3::new(d, 0.0, 0.0), 1.0, &k);
            assert_eq!(k.near_field_margin(1.0, d) < 1.0, v == Vec3::zeros(), "d = {d}");
        }
    }

    #[test]
    fn horseshoe_splits_bound_and_trailing() {
        let hs = Horseshoe::new([
            Vec3::new(100.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(100.0, 1.0, 0.0),
        ]);
        let cp = Vec3::new(0.5, 0.5, 0.0);
        let k = KernelConfig::default();
        let v = horseshoe_velocity(&hs, &cp, 1.0, &k);

        let [leg_a, bound, leg_b] = hs.segments();
        let bound_only = segment_velocity(&bound[0], &bound[1], &cp, 1.0, &k);
        let legs = segment_velocity(&leg_a[0], &leg_a[1], &cp, 1.0, &k)
            + segment_velocity(&leg_b[0], &leg_b[1], &cp, 1.0, &k);

        assert_relative_eq!(v.total, bound_only + legs, epsilon = 1e-14);
        assert_relative_eq!(v.trailing, legs, epsilon = 1e-14);
        // inside the horseshoe, behind the bound vortex: everything washes down
        assert!(v.total.z < 0.0 && v.trailing.z < 0.0);
    }
}
