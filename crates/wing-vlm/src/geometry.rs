//! Geometry builder: the panel-corner mesh of the starboard half-wing.
//!
//! The mesh is a grid indexed by (chordwise station i, spanwise station j).
//! Chordwise stations sit at fixed fractions of the local chord, spanwise
//! stations divide the semispan linearly from root (j = 0) to tip.

use serde::{Deserialize, Serialize};
use wing_core::{reflect_span, Vec3};

use crate::error::{Location, Result, VlmError};
use crate::planform::Planform;

/// Chordwise fractions of the local chord: leading edge, quarter chord,
/// three-quarter chord, trailing edge.
pub const CHORD_FRACTIONS: [f64; 4] = [0.0, 0.25, 0.75, 1.0];

/// Number of chordwise stations.
pub const CHORDWISE_STATIONS: usize = CHORD_FRACTIONS.len();

pub const LEADING_EDGE: usize = 0;
pub const QUARTER_CHORD: usize = 1;
pub const THREE_QUARTER_CHORD: usize = 2;
pub const TRAILING_EDGE: usize = 3;

/// Mesh points, one chordwise column of four per spanwise station.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WingMesh {
    stations: Vec<[Vec3; CHORDWISE_STATIONS]>,
}

impl WingMesh {
    /// Build from explicit station columns (root first). At least two
    /// stations are required; panel shape is checked later by collocation.
    pub fn from_stations(stations: Vec<[Vec3; CHORDWISE_STATIONS]>) -> Result<Self> {
        if stations.len() < 2 {
            return Err(VlmError::geometry(
                Location::Planform,
                format!("need at least 2 spanwise stations, got {}", stations.len()),
            ));
        }
        for (j, column) in stations.iter().enumerate() {
            if !column.iter().all(wing_core::is_finite_vec) {
                return Err(VlmError::geometry(Location::Station(j), "non-finite mesh point"));
            }
        }
        Ok(Self { stations })
    }

    /// Number of spanwise stations (Ny).
    pub fn span_stations(&self) -> usize {
        self.stations.len()
    }

    /// Number of spanwise panels (Ny − 1).
    pub fn panel_count(&self) -> usize {
        self.stations.len() - 1
    }

    /// Point at chordwise station `i`, spanwise station `j`.
    pub fn point(&self, i: usize, j: usize) -> Vec3 {
        self.stations[j][i]
    }

    pub fn station(&self, j: usize) -> &[Vec3; CHORDWISE_STATIONS] {
        &self.stations[j]
    }

    pub fn stations(&self) -> &[[Vec3; CHORDWISE_STATIONS]] {
        &self.stations
    }

    /// Quarter-chord (bound vortex) line, root to tip.
    pub fn quarter_chord_line(&self) -> Vec<Vec3> {
        self.stations.iter().map(|s| s[QUARTER_CHORD]).collect()
    }

    /// Spanwise width Δy of panel `j`, measured along the leading edge.
    pub fn panel_width(&self, j: usize) -> f64 {
        self.stations[j + 1][LEADING_EDGE].y - self.stations[j][LEADING_EDGE].y
    }

    /// Spanwise coordinate of the middle of panel `j`.
    pub fn panel_mid_y(&self, j: usize) -> f64 {
        0.5 * (self.stations[j + 1][LEADING_EDGE].y + self.stations[j][LEADING_EDGE].y)
    }

    /// Mean chord of panel `j` (average of its two edge chords).
    pub fn panel_chord(&self, j: usize) -> f64 {
        let chord = |s: &[Vec3; CHORDWISE_STATIONS]| (s[TRAILING_EDGE] - s[LEADING_EDGE]).norm();
        0.5 * (chord(&self.stations[j]) + chord(&self.stations[j + 1]))
    }

    /// Port half: every point reflected across y = 0.
    #[must_use]
    pub fn mirrored(&self) -> Self {
        let stations = self
            .stations
            .iter()
            .map(|&s| s.map(|p| reflect_span(&p)))
            .collect();
        Self { stations }
    }
}

/// Build the mesh for `planform` with `span_stations` (Ny) spanwise stations.
///
/// Each station interpolates taper factor and twist linearly from root to tip,
/// scales the chordwise offsets by the local chord, rotates them by the local
/// twist about the leading edge, then shears by sweep and dihedral.
pub fn build_mesh(planform: &Planform, span_stations: usize) -> Result<WingMesh> {
    planform.validate()?;
    if span_stations < 2 {
        return Err(VlmError::geometry(
            Location::Planform,
            format!("need at least 2 spanwise stations, got {span_stations}"),
        ));
    }

    let sweep_shift = planform.sweep.tan();
    let dihedral_shift = planform.dihedral.tan();
    let last = (span_stations - 1) as f64;

    let stations = (0..span_stations)
        .map(|j| {
            let eta = j as f64 / last;
            let y = planform.semispan * eta;
            let chord = planform.chord_at(eta);
            let (sin_t, cos_t) = planform.twist_at(eta).sin_cos();

            CHORD_FRACTIONS.map(|fraction| {
                // planar section: no camber, no thickness
                let x_local = fraction * chord;
                let z_local = 0.0;

                // positive twist lifts the trailing edge (washout)
                let x = x_local * cos_t - z_local * sin_t;
                let z = x_local * sin_t + z_local * cos_t;

                Vec3::new(x + y * sweep_shift, y, z + y * dihedral_shift)
            })
        })
        .collect();

    let mesh = WingMesh::from_stations(stations)?;
    log::debug!(
        "mesh: {} spanwise x {} chordwise stations, semispan {:.3} m",
        mesh.span_stations(),
        CHORDWISE_STATIONS,
        planform.semispan
    );
    Ok(mesh)
}
