//! Text report and JSON export of a solution.
//!
//! The export is the data contract for external plotting: mesh (both halves),
//! horseshoes, control points with normals, Γ and the loads.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use wing_core::Vec3;
use wing_models::{elliptic_circulation, helmbold_lift_slope, lifting_line_lift_slope, EllipticReference};
use wing_vlm::{PolarPoint, SectionLoad, Solution};

use crate::config::RunConfig;

/* --------------------------- Shared DTOs (JSON) --------------------------- */

type Point = [f64; 3];

fn point(v: &Vec3) -> Point {
    [v.x, v.y, v.z]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeometryExport {
    /// mesh[j][i]: spanwise station j, chordwise station i
    pub mesh: Vec<Vec<Point>>,
    pub mirrored_mesh: Vec<Vec<Point>>,
    pub horseshoes: Vec<[Point; 4]>,
    pub control_points: Vec<Point>,
    pub normals: Vec<Point>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultExport {
    pub circulation: Vec<f64>,
    /// (y, Γ) across the full span
    pub full_span_circulation: Vec<(f64, f64)>,
    pub sections: Vec<SectionLoad>,
    pub lift: f64,
    pub induced_drag: f64,
    pub cl: f64,
    pub cdi: f64,
    pub span_efficiency: Option<f64>,
    pub aspect_ratio: f64,
    pub reference_area: f64,
    /// Elliptic loading with the same CL
    pub elliptic: EllipticReference,
    /// Elliptic Γ at each panel midpoint, same CL
    pub elliptic_circulation: Vec<f64>,
    /// Helmbold estimate at the same angle of attack
    pub helmbold_cl: f64,
    /// Lifting-line estimate (e = 1) at the same angle of attack
    pub lifting_line_cl: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Export {
    pub version: String,
    pub config: RunConfig,
    pub geometry: GeometryExport,
    pub results: ResultExport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub polar: Option<Vec<PolarPoint>>,
}

fn mesh_points(stations: &[[Vec3; 4]]) -> Vec<Vec<Point>> {
    stations.iter().map(|s| s.iter().map(point).collect()).collect()
}

pub fn geometry_export(sol: &Solution) -> GeometryExport {
    GeometryExport {
        mesh: mesh_points(sol.mesh.stations()),
        mirrored_mesh: mesh_points(sol.mesh.mirrored().stations()),
        horseshoes: sol.horseshoes.iter().map(|hs| (*hs.points()).map(|p| point(&p))).collect(),
        control_points: sol.control_points.iter().map(|cp| point(&cp.position)).collect(),
        normals: sol.control_points.iter().map(|cp| point(&cp.normal)).collect(),
    }
}

fn elliptic_reference(sol: &Solution) -> EllipticReference {
    let p = &sol.planform;
    EllipticReference::for_lift(sol.loads.cl, sol.freestream.speed, p.span(), p.reference_area())
}

/// Elliptic Γ at every panel midpoint for the solution's CL.
pub fn elliptic_sections(sol: &Solution) -> Vec<f64> {
    let g0 = elliptic_reference(sol).root_circulation;
    let span = sol.planform.span();
    sol.loads.sections.iter().map(|s| elliptic_circulation(g0, span, s.y_mid)).collect()
}

/// Unswept lifting-line CL at the solution's angle of attack.
pub fn lifting_line_cl(sol: &Solution) -> f64 {
    lifting_line_lift_slope(sol.planform.aspect_ratio(), 1.0) * sol.freestream.alpha
}

/// Helmbold CL at the solution's angle of attack, using the half-chord sweep.
pub fn helmbold_cl(sol: &Solution) -> f64 {
    let p = &sol.planform;
    // half-chord line sweep from the leading-edge sweep and the chord change
    let tan_half = p.sweep.tan() + 0.5 * (p.tip_chord() - p.root_chord) / p.semispan;
    helmbold_lift_slope(p.aspect_ratio(), tan_half.atan()) * sol.freestream.alpha
}

pub fn result_export(sol: &Solution) -> ResultExport {
    let p = &sol.planform;
    let loads = &sol.loads;
    ResultExport {
        circulation: sol.circulation.iter().copied().collect(),
        full_span_circulation: sol.full_span_circulation(),
        sections: loads.sections.clone(),
        lift: loads.lift,
        induced_drag: loads.induced_drag,
        cl: loads.cl,
        cdi: loads.cdi,
        span_efficiency: sol.span_efficiency(),
        aspect_ratio: p.aspect_ratio(),
        reference_area: p.reference_area(),
        elliptic: elliptic_reference(sol),
        elliptic_circulation: elliptic_sections(sol),
        helmbold_cl: helmbold_cl(sol),
        lifting_line_cl: lifting_line_cl(sol),
    }
}

pub fn build_export(config: &RunConfig, sol: &Solution, polar: Option<Vec<PolarPoint>>) -> Export {
    Export {
        version: env!("CARGO_PKG_VERSION").to_owned(),
        config: config.clone(),
        geometry: geometry_export(sol),
        results: result_export(sol),
        polar,
    }
}

pub fn write_export(path: &Path, export: &Export) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    let file = std::fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
    serde_json::to_writer_pretty(file, export)?;
    log::info!("JSON export written: {}", path.display());
    Ok(())
}

/* ------------------------------- text report ------------------------------- */

pub fn print_summary(sol: &Solution) {
    let p = &sol.planform;
    let fs = &sol.freestream;
    let loads = &sol.loads;

    println!("Horseshoe vortex lattice");
    println!(
        "  semispan {:.3} m, root chord {:.3} m, taper {:.3}, sweep {:.1}°, dihedral {:.1}°, twist {:.1}°",
        p.semispan,
        p.root_chord,
        p.taper,
        p.sweep.to_degrees(),
        p.dihedral.to_degrees(),
        p.twist.to_degrees()
    );
    println!(
        "  S = {:.3} m², AR = {:.3}, MGC = {:.3} m, {} panels per half",
        p.reference_area(),
        p.aspect_ratio(),
        p.mean_geometric_chord(),
        sol.mesh.panel_count()
    );
    println!("  V∞ = {:.3} m/s, α = {:.2}°, ρ = {:.4} kg/m³", fs.speed, fs.alpha.to_degrees(), fs.density);
    println!();
    println!(
        "  {:>8} {:>8} {:>12} {:>12} {:>10} {:>10}",
        "y [m]", "dy [m]", "Γ [m²/s]", "Γ elliptic", "w [m/s]", "cl"
    );
    for (s, g_ell) in loads.sections.iter().zip(elliptic_sections(sol)) {
        println!(
            "  {:>8.3} {:>8.3} {:>12.5} {:>12.5} {:>10.5} {:>10.5}",
            s.y_mid, s.width, s.circulation, g_ell, s.downwash, s.cl
        );
    }
    println!();
    println!("  Lift              L   = {:.5} N", loads.lift);
    println!("  Induced drag      Di  = {:.6} N", loads.induced_drag);
    println!("  Lift coefficient  CL  = {:.6}", loads.cl);
    println!("  Induced drag coef CDi = {:.6}", loads.cdi);
    match sol.span_efficiency() {
        Some(e) => println!("  span efficiency e = {e:.4}"),
        None => println!("  span efficiency e = n/a"),
    }
    println!("  Helmbold estimate CL = {:.5}", helmbold_cl(sol));
    println!("  Lifting-line      CL = {:.5}", lifting_line_cl(sol));
}

pub fn print_polar(points: &[PolarPoint]) {
    println!();
    println!("  {:>8} {:>10} {:>10}", "α [°]", "CL", "CDi");
    for pt in points {
        println!("  {:>8.2} {:>10.5} {:>10.6}", pt.alpha.to_degrees(), pt.cl, pt.cdi);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_shapes_follow_the_lattice() {
        let config = RunConfig::default();
        let sol = wing_vlm::solve(&config.to_inputs()).unwrap();
        let export = build_export(&config, &sol, None);

        let g = &export.geometry;
        assert_eq!(g.mesh.len(), 5);
        assert!(g.mesh.iter().all(|s| s.len() == 4));
        assert_eq!(g.mirrored_mesh[2][0][1], -g.mesh[2][0][1]);
        assert_eq!(g.horseshoes.len(), 4);
        assert_eq!(g.control_points.len(), 4);
        assert_eq!(g.normals.len(), 4);

        let r = &export.results;
        assert_eq!(r.circulation.len(), 4);
        assert_eq!(r.full_span_circulation.len(), 8);
        assert_eq!(r.elliptic_circulation.len(), 4);
        assert!(r.elliptic_circulation.windows(2).all(|w| w[1] < w[0]));
        assert!(r.cl > 0.0);

        let json = serde_json::to_value(&export).unwrap();
        assert!(json.get("polar").is_none());
        assert!(json["results"]["elliptic"]["root_circulation"].as_f64().unwrap() > 0.0);
    }

    #[test]
    fn helmbold_uses_half_chord_sweep() {
        let mut config = RunConfig::default();
        config.planform.sweep_deg = 0.0;
        let sol = wing_vlm::solve(&config.to_inputs()).unwrap();
        let expected = helmbold_lift_slope(5.0, 0.0) * 5f64.to_radians();
        assert!((helmbold_cl(&sol) - expected).abs() < 1e-12);
        // lifting line ignores the low-AR correction, so it sits above Helmbold
        assert!(lifting_line_cl(&sol) > helmbold_cl(&sol));
    }
}
