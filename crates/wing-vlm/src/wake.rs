//! Wake generator: one horseshoe vortex per spanwise panel.
//!
//! The bound segment lies on the quarter-chord line between two adjacent
//! stations; the trailing legs run from it to a far-wake point placed along
//! the free-stream direction.

use serde::{Deserialize, Serialize};
use wing_core::{reflect_span, Vec3};

use crate::geometry::WingMesh;

/// Default far-wake distance, in full spans.
pub const DEFAULT_FAR_FIELD_SPANS: f64 = 20.0;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WakeConfig {
    /// Trailing-leg length as a multiple of the full span.
    pub far_field_spans: f64,
}

impl Default for WakeConfig {
    fn default() -> Self {
        Self { far_field_spans: DEFAULT_FAR_FIELD_SPANS }
    }
}

/// Four points, three straight segments:
/// far wake → bound start → bound end → far wake.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Horseshoe {
    points: [Vec3; 4],
}

impl Horseshoe {
    /// Index of the bound (quarter-chord) segment in `segments()`.
    pub const BOUND_SEGMENT: usize = 1;

    pub fn new(points: [Vec3; 4]) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Vec3; 4] {
        &self.points
    }

    /// Segments in order: inbound trailing leg, bound, outbound trailing leg.
    pub fn segments(&self) -> [[Vec3; 2]; 3] {
        let p = &self.points;
        [[p[0], p[1]], [p[1], p[2]], [p[2], p[3]]]
    }

    /// Image across y = 0. Point order is kept, so the same circulation
    /// would spin the other way; callers flip the sign of Γ.
    #[must_use]
    pub fn mirrored(&self) -> Self {
        Self { points: self.points.map(|p| reflect_span(&p)) }
    }
}

/// Build the horseshoes for every panel of `mesh`, with trailing legs of
/// length `far_distance` along the unit vector `direction`.
pub fn build_horseshoes(mesh: &WingMesh, direction: &Vec3, far_distance: f64) -> Vec<Horseshoe> {
    let wake = direction.normalize() * far_distance;
    let bound_line = mesh.quarter_chord_line();

    let horseshoes: Vec<Horseshoe> = bound_line
        .windows(2)
        .map(|edge| Horseshoe::new([edge[0] + wake, edge[0], edge[1], edge[1] + wake]))
        .collect();

    log::debug!(
        "wake: {} horseshoes, trailing legs {:.1} m along ({:.4}, {:.4}, {:.4})",
        horseshoes.len(),
        far_distance,
        direction.x,
        direction.y,
        direction.z
    );
    horseshoes
}
