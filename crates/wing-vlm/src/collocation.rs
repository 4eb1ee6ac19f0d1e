//! Control points and unit normals, one per spanwise panel.

use serde::{Deserialize, Serialize};
use wing_core::Vec3;

use crate::error::{Location, Result, VlmError};
use crate::geometry::{WingMesh, LEADING_EDGE, THREE_QUARTER_CHORD};

/// A normal shorter than this fraction of |a|·|b| means a collapsed panel.
const COLLAPSE_TOLERANCE: f64 = 1e-10;

/// Where the no-flow-through condition is enforced on panel j.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ControlPoint {
    pub position: Vec3,
    /// Unit normal, pointing to the upper (suction) side.
    pub normal: Vec3,
}

impl ControlPoint {
    /// Image across y = 0 (position and normal both reflected).
    #[must_use]
    pub fn mirrored(&self) -> Self {
        Self {
            position: wing_core::reflect_span(&self.position),
            normal: wing_core::reflect_span(&self.normal),
        }
    }
}

/// Control point of panel `j`: mid-span of the three-quarter-chord edge, with
/// the normal taken from the cross product of the vectors from the two
/// leading-edge corners to it.
pub fn control_point(mesh: &WingMesh, j: usize) -> Result<ControlPoint> {
    let le_in = mesh.point(LEADING_EDGE, j);
    let le_out = mesh.point(LEADING_EDGE, j + 1);
    let tq_in = mesh.point(THREE_QUARTER_CHORD, j);
    let tq_out = mesh.point(THREE_QUARTER_CHORD, j + 1);

    let position = (tq_in + tq_out) * 0.5;

    let a = position - le_in;
    let b = position - le_out;
    let n = b.cross(&a);
    let magnitude = n.norm();

    let scale = a.norm() * b.norm();
    if !(magnitude > COLLAPSE_TOLERANCE * scale) || !magnitude.is_finite() {
        return Err(VlmError::geometry(
            Location::Panel(j),
            format!("panel normal collapsed (|n| = {magnitude:e})"),
        ));
    }

    Ok(ControlPoint { position, normal: n / magnitude })
}

/// Control points for every panel, root to tip.
pub fn control_points(mesh: &WingMesh) -> Result<Vec<ControlPoint>> {
    let points = (0..mesh.panel_count())
        .map(|j| control_point(mesh, j))
        .collect::<Result<Vec<_>>>()?;

    for (j, cp) in points.iter().enumerate() {
        log::trace!(
            "panel {j}: cp ({:.4}, {:.4}, {:.4}) n ({:.4}, {:.4}, {:.4})",
            cp.position.x, cp.position.y, cp.position.z,
            cp.normal.x, cp.normal.y, cp.normal.z
        );
    }
    Ok(points)
}
