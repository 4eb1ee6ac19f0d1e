//! Run configuration, read from JSON. Angles are in degrees here and
//! converted to radians when building solver inputs.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use wing_core::{deg_to_rad, Atmosphere, Freestream};
use wing_vlm::{Inputs, KernelConfig, Planform, WakeConfig};

/// Top-level configuration container
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub flow: FlowConfig,
    pub planform: PlanformConfig,
    pub lattice: LatticeConfig,
}

/// Free-stream conditions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowConfig {
    /// Free-stream speed (m/s)
    pub speed: f64,
    /// Angle of attack (deg)
    pub alpha_deg: f64,
    /// Air density (kg/m³); derived from `atmosphere` when absent
    pub density: Option<f64>,
    pub atmosphere: Atmosphere,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            speed: 10.0,
            alpha_deg: 5.0,
            density: Some(wing_core::RHO_SEA_LEVEL),
            atmosphere: Atmosphere::standard(),
        }
    }
}

/// Wing planform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanformConfig {
    /// Semispan (m)
    pub semispan: f64,
    /// Root chord as a fraction of the full span
    pub root_chord_ratio: f64,
    /// Tip chord / root chord
    pub taper: f64,
    pub sweep_deg: f64,
    pub dihedral_deg: f64,
    /// Tip twist, positive washout (trailing edge up) (deg)
    pub twist_deg: f64,
}

impl Default for PlanformConfig {
    fn default() -> Self {
        Self {
            semispan: 5.0,
            root_chord_ratio: 0.2,
            taper: 1.0,
            sweep_deg: 45.0,
            dihedral_deg: 0.0,
            twist_deg: 0.0,
        }
    }
}

/// Discretisation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatticeConfig {
    /// Spanwise stations on the half-wing (panels = stations − 1)
    pub span_stations: usize,
    /// Trailing-leg length in full spans
    pub far_field_spans: f64,
    /// Near-field cut-off on |r1×r2|²
    pub core_tolerance: f64,
}

impl Default for LatticeConfig {
    fn default() -> Self {
        Self {
            span_stations: wing_vlm::DEFAULT_SPAN_STATIONS,
            far_field_spans: WakeConfig::default().far_field_spans,
            core_tolerance: KernelConfig::default().core_tolerance,
        }
    }
}

impl RunConfig {
    /// Strict load: missing file or bad JSON is an error.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = serde_json::from_str(&contents)
            .with_context(|| format!("parsing config {}", path.display()))?;
        log::info!("Loaded run configuration from {}", path.display());
        Ok(config)
    }

    /// Load from JSON file or return defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match std::fs::read_to_string(path.as_ref()) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    log::info!("Loaded run configuration from {:?}", path.as_ref());
                    config
                }
                Err(e) => {
                    log::warn!("Failed to parse run configuration: {}, using defaults", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Run configuration file not found, using defaults");
                Self::default()
            }
        }
    }

    pub fn density(&self) -> f64 {
        self.flow.density.unwrap_or_else(|| self.flow.atmosphere.density())
    }

    /// Solver inputs with angles converted to radians.
    pub fn to_inputs(&self) -> Inputs {
        let p = &self.planform;
        let planform = Planform {
            semispan: p.semispan,
            root_chord: p.root_chord_ratio * 2.0 * p.semispan,
            taper: p.taper,
            sweep: deg_to_rad(p.sweep_deg),
            dihedral: deg_to_rad(p.dihedral_deg),
            twist: deg_to_rad(p.twist_deg),
        };
        let freestream = Freestream::from_degrees(self.flow.speed, self.flow.alpha_deg, self.density());

        Inputs {
            planform,
            freestream,
            span_stations: self.lattice.span_stations,
            kernel: KernelConfig { core_tolerance: self.lattice.core_tolerance },
            wake: WakeConfig { far_field_spans: self.lattice.far_field_spans },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_case() {
        let inputs = RunConfig::default().to_inputs();
        assert_eq!(inputs.planform.semispan, 5.0);
        assert!((inputs.planform.root_chord - 2.0).abs() < 1e-12);
        assert!((inputs.planform.sweep - 45f64.to_radians()).abs() < 1e-12);
        assert_eq!(inputs.span_stations, 5);
        assert_eq!(inputs.freestream.density, 1.225);
        assert_eq!(inputs.kernel.core_tolerance, 5e-5);
        assert_eq!(inputs.wake.far_field_spans, 20.0);
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let json = r#"{ "flow": { "alpha_deg": 8.0 }, "planform": { "taper": 0.4 } }"#;
        let config: RunConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.flow.alpha_deg, 8.0);
        assert_eq!(config.flow.speed, 10.0);
        assert_eq!(config.planform.taper, 0.4);
        assert_eq!(config.planform.sweep_deg, 45.0);
        assert_eq!(config.lattice, LatticeConfig::default());
    }

    #[test]
    fn density_falls_back_to_atmosphere() {
        let json = r#"{ "flow": { "density": null, "atmosphere": { "temperature_c": 30.0 } } }"#;
        let config: RunConfig = serde_json::from_str(json).unwrap();
        let rho = config.density();
        assert!(rho < 1.225 && rho > 1.1);
    }

    #[test]
    fn missing_file_uses_defaults() {
        let config = RunConfig::load_or_default("definitely/not/here.json");
        assert_eq!(config, RunConfig::default());
        assert!(RunConfig::load("definitely/not/here.json").is_err());
    }
}
