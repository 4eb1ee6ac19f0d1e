//! Wing planform parameters and the quantities derived from them.

use serde::{Deserialize, Serialize};

use crate::error::{Location, Result, VlmError};

/// Largest sweep/dihedral magnitude accepted [rad]; tan() blows up at 90°.
const MAX_SHEAR_ANGLE: f64 = 89.0 * std::f64::consts::PI / 180.0;

/// Planform of the starboard half-wing. Angles in radians.
///
/// Sweep and dihedral shear the stations downstream/upward by `y·tan(angle)`;
/// twist varies linearly from zero at the root to `twist` at the tip, positive
/// trailing edge up (washout).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Planform {
    pub semispan: f64,   // m
    pub root_chord: f64, // m
    pub taper: f64,      // tip chord / root chord
    pub sweep: f64,      // rad
    pub dihedral: f64,   // rad
    pub twist: f64,      // rad, at the tip
}

impl Planform {
    /// Flat, unswept, untapered wing.
    pub fn rectangular(semispan: f64, root_chord: f64) -> Self {
        Self { semispan, root_chord, taper: 1.0, sweep: 0.0, dihedral: 0.0, twist: 0.0 }
    }

    pub fn span(&self) -> f64 {
        2.0 * self.semispan
    }

    pub fn tip_chord(&self) -> f64 {
        self.taper * self.root_chord
    }

    /// Mean geometric chord, (2/3)·c_r·(1 + λ + λ²)/(1 + λ).
    pub fn mean_geometric_chord(&self) -> f64 {
        let t = self.taper;
        (2.0 / 3.0) * self.root_chord * (1.0 + t + t * t) / (1.0 + t)
    }

    /// Full-wing (both halves) planform area.
    pub fn reference_area(&self) -> f64 {
        (self.root_chord + self.tip_chord()) * self.semispan
    }

    pub fn aspect_ratio(&self) -> f64 {
        let b = self.span();
        b * b / self.reference_area()
    }

    /// Local chord at span fraction `eta` in [0, 1].
    pub fn chord_at(&self, eta: f64) -> f64 {
        self.root_chord * (1.0 + (self.taper - 1.0) * eta)
    }

    /// Local twist at span fraction `eta` in [0, 1].
    pub fn twist_at(&self, eta: f64) -> f64 {
        self.twist * eta
    }

    /// Reject inputs the lattice cannot represent.
    pub fn validate(&self) -> Result<()> {
        let bad = |reason: String| Err(VlmError::geometry(Location::Planform, reason));

        if !(self.semispan.is_finite() && self.semispan > 0.0) {
            return bad(format!("semispan must be positive, got {}", self.semispan));
        }
        if !(self.root_chord.is_finite() && self.root_chord > 0.0) {
            return bad(format!("root chord must be positive, got {}", self.root_chord));
        }
        // taper 0 is a pointed tip and still valid
        if !(self.taper.is_finite() && self.taper >= 0.0) {
            return bad(format!("taper ratio must be non-negative, got {}", self.taper));
        }
        if !self.twist.is_finite() {
            return bad("twist is not finite".to_owned());
        }
        for (name, angle) in [("sweep", self.sweep), ("dihedral", self.dihedral)] {
            if !(angle.is_finite() && angle.abs() <= MAX_SHEAR_ANGLE) {
                return bad(format!("{name} angle {angle} rad is outside ±89°"));
            }
        }
        Ok(())
    }
}
